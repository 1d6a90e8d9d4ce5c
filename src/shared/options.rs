//! Konfiguration für den Aufbau von Vertex-Pfaden.
//!
//! `VertexPathOptions` enthält alle zur Laufzeit änderbaren Werte und wird als
//! TOML-Datei gespeichert. Die `const`-Werte bleiben als Fallback/Default erhalten.

use glam::Vec3;
use serde::{Deserialize, Serialize};

// ── Unterteilung ────────────────────────────────────────────────────

/// Maximaler Winkelfehler (Grad) bei Winkelfehler-Unterteilung.
pub const MAX_ANGLE_ERROR: f32 = 0.3;
/// Minimaler Abstand zwischen zwei Vertices bei Winkelfehler-Unterteilung.
pub const MIN_VERTEX_SPACING: f32 = 0.01;
/// Vertex-Abstand bei Abstands-Unterteilung.
pub const VERTEX_SPACING: f32 = 1.0;
/// Abtastschritte pro Längeneinheit.
pub const ACCURACY: f32 = 10.0;

/// Unterteilungs-Strategie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubdivisionMode {
    /// Dichte Vertices in Kurven, wenige auf Geraden
    #[default]
    AngleError,
    /// Gleichmäßiger Abstand
    Distance,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Parameter für `VertexPath::from_options` und `PathCache`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexPathOptions {
    #[serde(default)]
    pub mode: SubdivisionMode,
    /// Winkelfehler-Schwelle in Grad
    #[serde(default = "default_max_angle_error")]
    pub max_angle_error: f32,
    /// Mindestabstand für neue Vertices (Winkelfehler-Modus)
    #[serde(default = "default_min_vertex_spacing")]
    pub min_vertex_spacing: f32,
    /// Vertex-Abstand (Abstands-Modus, Untergrenze 0.01)
    #[serde(default = "default_vertex_spacing")]
    pub vertex_spacing: f32,
    /// Abtastschritte pro Längeneinheit
    #[serde(default = "default_accuracy")]
    pub accuracy: f32,
    /// Feste Referenz-Achse für 3D-Normalen; ohne Angabe aus den Bounds geschätzt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<Vec3>,
}

impl Default for VertexPathOptions {
    fn default() -> Self {
        Self {
            mode: SubdivisionMode::AngleError,
            max_angle_error: MAX_ANGLE_ERROR,
            min_vertex_spacing: MIN_VERTEX_SPACING,
            vertex_spacing: VERTEX_SPACING,
            accuracy: ACCURACY,
            up: None,
        }
    }
}

fn default_max_angle_error() -> f32 {
    MAX_ANGLE_ERROR
}

fn default_min_vertex_spacing() -> f32 {
    MIN_VERTEX_SPACING
}

fn default_vertex_spacing() -> f32 {
    VERTEX_SPACING
}

fn default_accuracy() -> f32 {
    ACCURACY
}

impl VertexPathOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }
}
