//! Configuración del proyecto
//!
//! Este módulo contiene las variables de entorno del visor y la
//! configuración por defecto del mapa.

pub mod environment;

pub use environment::*;
