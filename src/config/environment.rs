//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: URL de la API de rutas,
//! timeout del cliente HTTP y vista por defecto del mapa.

use std::env;
use std::str::FromStr;

use crate::utils::errors::ConfigError;

/// Centro de Ankara, usado cuando la ruta no tiene puntos válidos
pub const DEFAULT_CENTER: (f64, f64) = (39.9334, 32.8597);
pub const DEFAULT_ZOOM: u8 = 10;
pub const DEFAULT_FIT_PADDING: u32 = 50;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub map: MapConfig,
}

/// Vista por defecto y padding del ajuste a límites
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfig {
    pub default_center: (f64, f64),
    pub default_zoom: u8,
    pub fit_padding: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
            fit_padding: DEFAULT_FIT_PADDING,
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 30,
            map: MapConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno, con valores por defecto
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Igual que `from_env` pero con una fuente de variables inyectable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("ROUTE_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        Ok(Self {
            api_base_url,
            request_timeout_secs: parse_var(
                &lookup,
                "ROUTE_API_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            map: MapConfig {
                default_center: (
                    parse_var(&lookup, "MAP_DEFAULT_LAT", DEFAULT_CENTER.0)?,
                    parse_var(&lookup, "MAP_DEFAULT_LNG", DEFAULT_CENTER.1)?,
                ),
                default_zoom: parse_var(&lookup, "MAP_DEFAULT_ZOOM", DEFAULT_ZOOM)?,
                fit_padding: parse_var(&lookup, "MAP_FIT_PADDING", DEFAULT_FIT_PADDING)?,
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
