//! Achsenparallele Bounding-Box für Pfad-Geometrie.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Achsenparallele Box, aufgespannt durch Minimum und Maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Kleinste Koordinate je Achse
    pub min: Vec3,
    /// Größte Koordinate je Achse
    pub max: Vec3,
}

impl Bounds {
    /// Erstellt Bounds aus Minimum und Maximum.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box der Größe 0 um einen einzelnen Punkt.
    pub fn from_point(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Umschließende Box einer Punktmenge (`None` bei leerer Menge).
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for point in iter {
            bounds.encapsulate(point);
        }
        Some(bounds)
    }

    /// Erweitert die Box so, dass `point` enthalten ist.
    pub fn encapsulate(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Erweitert die Box um eine andere Box.
    pub fn encapsulate_bounds(&mut self, other: &Bounds) {
        self.encapsulate(other.min);
        self.encapsulate(other.max);
    }

    /// Mittelpunkt der Box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Kantenlängen der Box.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Halbe Kantenlängen.
    pub fn extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Prüft ob `point` innerhalb (inklusive Rand) liegt.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points([
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-3.0, 4.0, 1.0),
            Vec3::new(0.0, 0.0, -5.0),
        ])
        .expect("Bounds erwartet");

        assert_eq!(bounds.min, Vec3::new(-3.0, -2.0, -5.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 1.0));
        assert_eq!(bounds.size(), Vec3::new(4.0, 6.0, 6.0));
        assert_eq!(bounds.center(), Vec3::new(-1.0, 1.0, -2.0));
        assert!(bounds.contains(Vec3::ZERO));
        assert!(!bounds.contains(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_bounds_from_empty_is_none() {
        assert!(Bounds::from_points(std::iter::empty()).is_none());
    }
}
