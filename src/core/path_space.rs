//! Enums für Pfad-Raum, Kontrollpunkt-Kopplung und Verhalten am Pfadende.

use anyhow::bail;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raum, in dem die Punkte eines Pfads liegen dürfen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSpace {
    /// Freier 3D-Pfad
    #[default]
    Xyz,
    /// Pfad in der XY-Ebene (z = 0)
    Xy,
    /// Pfad in der XZ-Ebene (y = 0)
    Xz,
}

impl PathSpace {
    /// Projiziert einen Punkt auf die Ebene des Raums.
    pub fn project(self, point: Vec3) -> Vec3 {
        match self {
            PathSpace::Xyz => point,
            PathSpace::Xy => Vec3::new(point.x, point.y, 0.0),
            PathSpace::Xz => Vec3::new(point.x, 0.0, point.z),
        }
    }

    /// `true` für die beiden Ebenen-Räume.
    pub fn is_planar(self) -> bool {
        self != PathSpace::Xyz
    }

    /// Normale der Ebene (`None` für Xyz).
    pub fn plane_normal(self) -> Option<Vec3> {
        match self {
            PathSpace::Xyz => None,
            PathSpace::Xy => Some(Vec3::Z),
            PathSpace::Xz => Some(Vec3::Y),
        }
    }

    /// Bezeichner für Persistenz.
    pub fn as_str(self) -> &'static str {
        match self {
            PathSpace::Xyz => "xyz",
            PathSpace::Xy => "xy",
            PathSpace::Xz => "xz",
        }
    }
}

impl fmt::Display for PathSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathSpace {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xyz" => Ok(PathSpace::Xyz),
            "xy" => Ok(PathSpace::Xy),
            "xz" => Ok(PathSpace::Xz),
            other => bail!("Unbekannter Pfad-Raum: '{}'", other),
        }
    }
}

/// Kopplung der beiden Kontrollpunkte eines Ankers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Keine Kopplung: Kontrollpunkte bewegen sich unabhängig
    Free,
    /// Beide Kontrollpunkte bleiben kolinear durch den Anker, Längen unabhängig
    #[default]
    Aligned,
    /// Kolinear und gleich lang (gespiegelt)
    Mirrored,
    /// Kontrollpunkte werden aus den Nachbar-Ankern abgeleitet
    Automatic,
}

impl ControlMode {
    /// Bezeichner für Persistenz.
    pub fn as_str(self) -> &'static str {
        match self {
            ControlMode::Free => "free",
            ControlMode::Aligned => "aligned",
            ControlMode::Mirrored => "mirrored",
            ControlMode::Automatic => "automatic",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" | "none" => Ok(ControlMode::Free),
            "aligned" => Ok(ControlMode::Aligned),
            "mirrored" => Ok(ControlMode::Mirrored),
            "automatic" => Ok(ControlMode::Automatic),
            other => bail!("Unbekannter Kontrollpunkt-Modus: '{}'", other),
        }
    }
}

/// Verhalten von Pfad-Abfragen außerhalb von [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopBehaviour {
    /// Wert wird periodisch in [0, 1] zurückgeführt
    #[default]
    Loop,
    /// Wert pendelt zwischen 0 und 1 (Ping-Pong)
    Reverse,
    /// Wert wird auf [0, 1] begrenzt
    Stop,
}
