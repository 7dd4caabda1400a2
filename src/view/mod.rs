//! Vista de detalle de ruta
//!
//! Orquesta la carga de la ruta, el mapa, el panel de información, la lista
//! de paradas y los controles del conductor.

pub mod dialogs;
pub mod panel;
pub mod route_detail;

pub use dialogs::Dialogs;
pub use panel::*;
pub use route_detail::*;
