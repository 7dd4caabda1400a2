//! Presentación: colores, etiquetas y formatos mostrados al usuario

pub mod format;
pub mod status;

pub use format::*;
pub use status::*;
