//! Visor de rutas de reparto
//!
//! Carga una ruta desde la API REST, la dibuja en un mapa (depósito,
//! paradas numeradas, trazado), arma el panel de información y, en modo
//! conductor, expone los controles que cambian el estado de la ruta y de
//! sus paradas.

pub mod client;
pub mod config;
pub mod map;
pub mod models;
pub mod presentation;
pub mod terminal;
pub mod utils;
pub mod view;

pub use client::{RouteApi, RouteApiClient};
pub use view::{RouteDetailView, ViewMode, ViewOutcome, ViewState};
