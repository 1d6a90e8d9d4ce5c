//! Bézier-Pfade: editierbarer ControlPath, Unterteilung und VertexPath.
//! Core-Funktionalität als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod shared;
pub mod xml;

pub use core::{
    ControlMode, ControlPath, ControlPathRecord, LoopBehaviour, PathSpace, VertexPath, WorldPath,
};
pub use core::{Bounds, FrameProvider, PathCache, Transform};
pub use core::{parse_control_path_json, write_control_path_json};
pub use shared::{SubdivisionMode, VertexPathOptions};
pub use xml::{parse_control_path_xml, write_control_path_xml};
