//! Mapa de la ruta
//!
//! Este módulo contiene el renderizador de rutas, el handle de instancia
//! única y los backends de mapa (escena en memoria y exportación GeoJSON).

pub mod geojson;
pub mod handle;
pub mod renderer;
pub mod scene;

pub use geojson::scene_to_geojson;
pub use handle::MapHandle;
pub use renderer::{MapRenderer, RenderSummary};
pub use scene::*;
