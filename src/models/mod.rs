//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! el contrato JSON de la API de rutas.

pub mod route;
pub mod status;

pub use route::*;
pub use status::Status;
