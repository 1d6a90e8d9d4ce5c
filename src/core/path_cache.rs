//! Lazy neu aufgebauter `VertexPath` zu einem besessenen `ControlPath`.

use super::{ControlPath, VertexPath};
use crate::shared::VertexPathOptions;

/// Hält einen `ControlPath` und baut den `VertexPath` erst bei Bedarf neu.
///
/// Änderungen werden über `ControlPath::version()` erkannt.
#[derive(Debug, Clone)]
pub struct PathCache {
    control_path: ControlPath,
    options: VertexPathOptions,
    vertex_path: Option<VertexPath>,
    built_version: u64,
}

impl PathCache {
    pub fn new(control_path: ControlPath, options: VertexPathOptions) -> Self {
        Self {
            built_version: control_path.version(),
            control_path,
            options,
            vertex_path: None,
        }
    }

    pub fn control_path(&self) -> &ControlPath {
        &self.control_path
    }

    /// Zugriff zum Editieren; jede Änderung erhöht die Version und macht den Cache ungültig.
    pub fn control_path_mut(&mut self) -> &mut ControlPath {
        &mut self.control_path
    }

    /// Ersetzt den Pfad vollständig (Cache wird immer verworfen).
    pub fn replace_control_path(&mut self, control_path: ControlPath) -> ControlPath {
        self.vertex_path = None;
        std::mem::replace(&mut self.control_path, control_path)
    }

    pub fn options(&self) -> &VertexPathOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: VertexPathOptions) {
        if self.options != options {
            self.options = options;
            self.invalidate();
        }
    }

    /// `true` wenn der nächste Zugriff neu bauen muss.
    pub fn is_dirty(&self) -> bool {
        self.vertex_path.is_none() || self.built_version != self.control_path.version()
    }

    pub fn invalidate(&mut self) {
        self.vertex_path = None;
    }

    /// Liefert den aktuellen `VertexPath`, baut bei Änderungen neu.
    pub fn vertex_path(&mut self) -> &VertexPath {
        if self.is_dirty() {
            log::debug!(
                "PathCache: Neuaufbau (Version {} → {})",
                self.built_version,
                self.control_path.version()
            );
            self.built_version = self.control_path.version();
            self.vertex_path = None;
        }
        let (control_path, options) = (&self.control_path, &self.options);
        self.vertex_path
            .get_or_insert_with(|| VertexPath::from_options(control_path, options))
    }

    pub fn into_control_path(self) -> ControlPath {
        self.control_path
    }
}
