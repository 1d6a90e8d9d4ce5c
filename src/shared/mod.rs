//! Layer-neutrale Hilfen: Vektor-/Winkel-Mathematik und Konfiguration.

pub mod math;
pub mod options;

pub use options::{SubdivisionMode, VertexPathOptions};
