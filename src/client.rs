//! Cliente HTTP para la API de rutas
//!
//! Este módulo contiene el trait `RouteApi`, que es lo único que la vista
//! conoce del backend, y su implementación con reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::EnvironmentConfig;
use crate::models::{
    MutationResponse, Route, RouteStatusRequest, Status, StopNoteRequest, StopStatusRequest,
};
use crate::utils::errors::{ApiError, ApiResult};

/// Endpoints que consume la vista de detalle de ruta
#[async_trait]
pub trait RouteApi: Send + Sync {
    /// `GET /api/route/:id`
    async fn get_route(&self, route_id: i64) -> ApiResult<Route>;

    /// `POST /api/route/:id/status`
    async fn update_route_status(&self, route_id: i64, status: &Status) -> ApiResult<()>;

    /// `POST /api/route/:id/stop/:stop_id/status`, siempre con `notes: null`
    async fn update_stop_status(&self, route_id: i64, stop_id: i64, status: &Status)
        -> ApiResult<()>;

    /// `POST /api/route/:id/stop/:stop_id/note`
    async fn add_stop_note(&self, route_id: i64, stop_id: i64, notes: &str) -> ApiResult<()>;
}

/// Cliente HTTP para la API de rutas
#[derive(Debug, Clone)]
pub struct RouteApiClient {
    client: Client,
    base_url: String,
}

impl RouteApiClient {
    /// Crear nuevo cliente con URL base configurable
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &EnvironmentConfig) -> ApiResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_mutation<B: Serialize + Sync>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path);
        debug!("📤 POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("❌ Error de red en POST {}: {}", url, e);
                ApiError::from(e)
            })?;

        let result: MutationResponse = read_json(response).await?;
        if result.success {
            info!("✅ POST {} aceptado", path);
            Ok(())
        } else {
            Err(ApiError::rejected(result.error))
        }
    }
}

/// Clasifica la respuesta: 404, otros no 2xx, body no JSON
async fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    debug!("📥 Respuesta HTTP {}", status);

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        error!("❌ Respuesta no es JSON válido: {}", e);
        ApiError::NotJson
    })
}

#[async_trait]
impl RouteApi for RouteApiClient {
    async fn get_route(&self, route_id: i64) -> ApiResult<Route> {
        let url = self.url(&format!("/api/route/{}", route_id));
        debug!("📤 GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let route: Route = read_json(response).await?;
        info!("📦 Ruta {} recibida con {} paradas", route.id, route.stops.len());
        Ok(route)
    }

    async fn update_route_status(&self, route_id: i64, status: &Status) -> ApiResult<()> {
        self.post_mutation(
            &format!("/api/route/{}/status", route_id),
            &RouteStatusRequest { status },
        )
        .await
    }

    async fn update_stop_status(
        &self,
        route_id: i64,
        stop_id: i64,
        status: &Status,
    ) -> ApiResult<()> {
        self.post_mutation(
            &format!("/api/route/{}/stop/{}/status", route_id, stop_id),
            &StopStatusRequest {
                status,
                notes: None,
            },
        )
        .await
    }

    async fn add_stop_note(&self, route_id: i64, stop_id: i64, notes: &str) -> ApiResult<()> {
        self.post_mutation(
            &format!("/api/route/{}/stop/{}/note", route_id, stop_id),
            &StopNoteRequest { notes },
        )
        .await
    }
}
