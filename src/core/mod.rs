//! Core-Domänentypen: ControlPath, Unterteilung, VertexPath, Koordinatenrahmen.

pub mod bezier;
pub mod bounds;
/// Editierbarer Bézier-Pfad
///
/// Anker und Kontrollpunkte in einem Puffer, Kontrollpunkt-Modi,
/// Twist-Winkel je Anker und Versionszähler für abhängige Caches.
pub mod control_path;
pub mod frame;
pub mod path_cache;
pub mod path_space;
pub mod record;
pub mod subdivide;
pub mod vertex_path;

pub use bounds::Bounds;
pub use control_path::ControlPath;
pub use frame::{FrameProvider, Transform};
pub use path_cache::PathCache;
pub use path_space::{ControlMode, LoopBehaviour, PathSpace};
pub use record::{parse_control_path_json, write_control_path_json, ControlPathRecord};
pub use subdivide::{split_by_angle_error, split_by_distance, VertexData, VertexPathData};
pub use vertex_path::{VertexPath, WorldPath};
