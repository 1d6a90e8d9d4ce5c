//! XML Import/Export für ControlPaths.
//!
//! Das Format nutzt "Structure of Arrays": Punkt-Koordinaten stehen als
//! parallele, kommagetrennte Listen in `<x>`, `<y>` und `<z>`.

pub mod parser;
pub mod writer;

pub use parser::parse_control_path_xml;
pub use writer::write_control_path_xml;
