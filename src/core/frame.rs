//! Koordinatenrahmen: Umrechnung zwischen lokalem Pfad-Raum und Welt-Raum.

use super::PathSpace;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Liefert die Welt-Transformation eines Pfads.
///
/// Implementierungen müssen für Ebenen-Räume (`Xy`, `Xz`) in der Ebene bleiben.
pub trait FrameProvider {
    /// Lokaler Punkt → Welt-Punkt.
    fn transform_point(&self, point: Vec3, space: PathSpace) -> Vec3;
    /// Lokale Richtung → Welt-Richtung (ohne Skalierung und Translation).
    fn transform_direction(&self, direction: Vec3, space: PathSpace) -> Vec3;
    /// Welt-Punkt → lokaler Punkt.
    fn inverse_transform_point(&self, point: Vec3, space: PathSpace) -> Vec3;
}

/// Position, Rotation und (gemittelte) Skalierung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    /// Skalierung je Achse; verwendet wird nur der Mittelwert
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Einheitliche Skalierung: Mittelwert der drei Achsen.
    pub fn uniform_scale(&self) -> f32 {
        self.scale.dot(Vec3::ONE) / 3.0
    }

    /// Position und Rotation, eingeschränkt auf die Ebene des Raums.
    ///
    /// In Ebenen-Räumen bleibt nur der Rotationsanteil um die Ebenen-Normale
    /// (Swing-Twist-Zerlegung) und die Position wird in die Ebene projiziert.
    pub fn constrained(&self, space: PathSpace) -> (Vec3, Quat) {
        let Some(normal) = space.plane_normal() else {
            return (self.position, self.rotation);
        };
        let axis_part = normal * Vec3::new(self.rotation.x, self.rotation.y, self.rotation.z).dot(normal);
        let twist = Quat::from_xyzw(axis_part.x, axis_part.y, axis_part.z, self.rotation.w);
        let twist = if twist.length_squared() < 1e-12 {
            Quat::IDENTITY
        } else {
            twist.normalize()
        };
        (space.project(self.position), twist)
    }
}

impl FrameProvider for Transform {
    fn transform_point(&self, point: Vec3, space: PathSpace) -> Vec3 {
        let (position, rotation) = self.constrained(space);
        rotation * point * self.uniform_scale() + position
    }

    fn transform_direction(&self, direction: Vec3, space: PathSpace) -> Vec3 {
        let (_, rotation) = self.constrained(space);
        rotation * direction
    }

    fn inverse_transform_point(&self, point: Vec3, space: PathSpace) -> Vec3 {
        let (position, rotation) = self.constrained(space);
        let local = rotation.inverse() * (point - position);
        let scale = self.uniform_scale();
        if scale.abs() <= f32::EPSILON {
            local
        } else {
            local / scale
        }
    }
}
