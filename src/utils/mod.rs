//! Utilidades del sistema

pub mod errors;

pub use errors::*;
