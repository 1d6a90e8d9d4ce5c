//! Flacher, serialisierbarer Datensatz eines `ControlPath` (Speichern/Laden).

use super::control_path::DEFAULT_AUTO_CONTROL_LENGTH;
use super::{ControlMode, ControlPath, PathSpace};
use anyhow::{bail, Context};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Alle persistenten Felder eines `ControlPath`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPathRecord {
    pub points: Vec<Vec3>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub space: PathSpace,
    #[serde(default)]
    pub control_mode: ControlMode,
    #[serde(default = "default_auto_control_length")]
    pub auto_control_length: f32,
    #[serde(default)]
    pub anchor_twist_angles: Vec<f32>,
    #[serde(default)]
    pub global_twist_angle: f32,
    #[serde(default)]
    pub flip_normals: bool,
}

fn default_auto_control_length() -> f32 {
    DEFAULT_AUTO_CONTROL_LENGTH
}

impl ControlPathRecord {
    /// Prüft Punktanzahl, Twist-Winkel und Zahlenwerte.
    pub fn validate(&self) -> anyhow::Result<()> {
        let len = self.points.len();
        let layout_ok = if self.closed {
            len >= 6 && len % 3 == 0
        } else {
            len >= 4 && (len - 1) % 3 == 0
        };
        if !layout_ok {
            bail!(
                "Ungültige Punktanzahl {} für {} Pfad",
                len,
                if self.closed { "geschlossenen" } else { "offenen" }
            );
        }

        if let Some(index) = self.points.iter().position(|p| !p.is_finite()) {
            bail!("Punkt {} hat ungültige Koordinaten: {:?}", index, self.points[index]);
        }

        let anchors = self.anchor_count();
        if !self.anchor_twist_angles.is_empty() && self.anchor_twist_angles.len() != anchors {
            bail!(
                "Anzahl Twist-Winkel ({}) passt nicht zur Anzahl Anker ({})",
                self.anchor_twist_angles.len(),
                anchors
            );
        }
        if self.anchor_twist_angles.iter().any(|a| !a.is_finite()) {
            bail!("Twist-Winkel enthält ungültigen Wert");
        }
        if !self.global_twist_angle.is_finite() || !self.auto_control_length.is_finite() {
            bail!("Globaler Twist-Winkel oder Kontrollpunkt-Länge ungültig");
        }
        Ok(())
    }

    fn anchor_count(&self) -> usize {
        if self.closed {
            self.points.len() / 3
        } else {
            (self.points.len() + 2) / 3
        }
    }
}

impl ControlPath {
    /// Schreibt alle persistenten Felder in einen Datensatz.
    pub fn to_record(&self) -> ControlPathRecord {
        ControlPathRecord {
            points: self.points().to_vec(),
            closed: self.is_closed(),
            space: self.space(),
            control_mode: self.control_mode(),
            auto_control_length: self.auto_control_length(),
            anchor_twist_angles: self.anchor_twist_angles().to_vec(),
            global_twist_angle: self.global_normal_angle(),
            flip_normals: self.flip_normals(),
        }
    }

    /// Baut einen Pfad aus einem Datensatz.
    ///
    /// Fehlende Twist-Winkel werden mit 0 ergänzt, Punkte außerhalb der Ebene
    /// eines 2D-Raums projiziert (jeweils mit Warnung).
    pub fn from_record(record: ControlPathRecord) -> anyhow::Result<Self> {
        record.validate()?;
        let anchors = record.anchor_count();

        let mut anchor_twist_angles = record.anchor_twist_angles;
        if anchor_twist_angles.is_empty() {
            log::warn!("Keine Twist-Winkel gespeichert, verwende 0° für {} Anker", anchors);
            anchor_twist_angles = vec![0.0; anchors];
        }

        let space = record.space;
        let mut points = record.points;
        let off_plane = points.iter().filter(|p| space.project(**p) != **p).count();
        if off_plane > 0 {
            log::warn!(
                "{} Punkte außerhalb der {}-Ebene, werden projiziert",
                off_plane,
                space
            );
            points.iter_mut().for_each(|p| *p = space.project(*p));
        }

        Ok(Self::from_raw_parts(
            points,
            record.closed,
            space,
            record.control_mode,
            record.auto_control_length,
            anchor_twist_angles,
            record.global_twist_angle,
            record.flip_normals,
        ))
    }
}

/// Serialisiert einen Pfad als JSON.
pub fn write_control_path_json(path: &ControlPath) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&path.to_record()).context("ControlPath-JSON schreiben")
}

/// Liest einen Pfad aus JSON.
pub fn parse_control_path_json(json: &str) -> anyhow::Result<ControlPath> {
    let record: ControlPathRecord =
        serde_json::from_str(json).context("ControlPath-JSON ungültig")?;
    ControlPath::from_record(record).context("ControlPath-Datensatz ungültig")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edited_path() -> ControlPath {
        let mut path = ControlPath::from_points(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(3.3, 1.1, -2.7),
                Vec3::new(7.9, 0.4, 1.0),
            ],
            false,
            PathSpace::Xyz,
        )
        .expect("Pfad erwartet");
        path.set_control_mode(ControlMode::Mirrored);
        path.set_anchor_normal_angle(1, 33.3);
        path.set_global_normal_angle(12.5);
        path.set_flip_normals(true);
        path
    }

    #[test]
    fn test_record_roundtrip_preserves_fields() {
        let path = edited_path();
        let restored = ControlPath::from_record(path.to_record()).expect("Datensatz gültig");
        assert_eq!(restored.to_record(), path.to_record());
        assert_eq!(restored.version(), 0);
    }

    #[test]
    fn test_json_roundtrip() {
        let path = edited_path();
        let json = write_control_path_json(&path).expect("JSON erwartet");
        assert!(json.contains("\"control_mode\": \"mirrored\""));
        let restored = parse_control_path_json(&json).expect("JSON gültig");
        assert_eq!(restored.points(), path.points());
        assert_eq!(restored.anchor_twist_angles(), path.anchor_twist_angles());
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let mut record = ControlPath::default().to_record();
        record.points.pop();
        assert!(ControlPath::from_record(record.clone()).is_err());

        record.points.push(Vec3::ZERO);
        record.closed = true;
        assert!(ControlPath::from_record(record).is_err());
    }

    #[test]
    fn test_twist_count_and_values_checked() {
        let mut record = ControlPath::default().to_record();
        record.anchor_twist_angles = vec![0.0; 3];
        assert!(record.validate().is_err());

        record.anchor_twist_angles = vec![0.0, f32::NAN];
        assert!(record.validate().is_err());

        record.anchor_twist_angles.clear();
        let path = ControlPath::from_record(record).expect("fehlende Winkel werden ergänzt");
        assert_eq!(path.anchor_twist_angles(), &[0.0, 0.0]);
    }

    #[test]
    fn test_planar_record_is_projected() {
        let mut record = ControlPath::new(Vec3::ZERO, false, PathSpace::Xy).to_record();
        record.points[1].z = 4.0;
        let path = ControlPath::from_record(record).expect("Datensatz gültig");
        assert_eq!(path[1].z, 0.0);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{ "points": [[0,0,0],[1,0,0],[2,0,0],[3,0,0]] }"#;
        let path = parse_control_path_json(json).expect("JSON gültig");
        assert_eq!(path.control_mode(), ControlMode::Aligned);
        assert_eq!(path.space(), PathSpace::Xyz);
        assert_eq!(path.auto_control_length(), DEFAULT_AUTO_CONTROL_LENGTH);
        assert_eq!(path.num_anchors(), 2);
    }
}
