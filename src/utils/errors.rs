//! Sistema de manejo de errores
//!
//! Este módulo define los tipos de errores del visor de rutas y el texto
//! que se muestra al usuario para cada uno.

use thiserror::Error;

/// Errores al comunicarse con la API de rutas
#[derive(Error, Debug)]
pub enum ApiError {
    /// Fallo de red o de transporte
    #[error("{0}")]
    Transport(String),

    /// 404 en un endpoint de ruta o parada
    #[error("Durak veya rota bulunamadı")]
    NotFound,

    /// Cualquier otra respuesta no 2xx
    #[error("API yanıtı başarısız: {0}")]
    Status(u16),

    /// El body no es JSON válido
    #[error("API yanıtı JSON formatında değil")]
    NotJson,

    /// `success: false` con el mensaje del servidor
    #[error("{0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::NotJson
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Mensaje por defecto cuando el servidor rechaza sin explicación
pub const UNKNOWN_ERROR: &str = "Bilinmeyen bir hata oluştu";

impl ApiError {
    pub fn rejected(error: Option<String>) -> Self {
        ApiError::Rejected(error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
    }

    /// Texto de alerta tal como lo ve el conductor
    pub fn alert_text(&self) -> String {
        format!("Hata: {}", self)
    }
}

/// Errores de configuración del entorno
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Resultado tipado para operaciones contra la API
pub type ApiResult<T> = Result<T, ApiError>;
