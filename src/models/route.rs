//! Modelo de Route
//!
//! Este módulo contiene la ruta tal como la devuelve `GET /api/route/:id`:
//! depósito, paradas ordenadas, conductor, vehículo y geometrías de tramo.
//! La vista solo lee estos datos; los agregados los calcula el servidor.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::status::Status;

/// Punto geográfico validado
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Devuelve `None` si falta alguna coordenada o no es un número finito
    pub fn checked(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Self { lat, lng })
            }
            _ => None,
        }
    }
}

/// Ruta principal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub status: Status,
    #[serde(default)]
    pub total_distance: Option<f64>,
    #[serde(default)]
    pub total_demand: Option<f64>,
    /// Minutos
    #[serde(default)]
    pub total_duration: Option<u32>,
    #[serde(default)]
    pub warehouse: Option<Depot>,
    #[serde(default)]
    pub stops: Vec<Stop>,
    #[serde(default)]
    pub driver: Option<Driver>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub route_geometries: Option<Vec<RouteGeometry>>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Depósito: origen y retorno de la ruta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Depot {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Depot {
    pub fn position(&self) -> Option<LatLng> {
        LatLng::checked(self.latitude, self.longitude)
    }
}

/// Parada de entrega dentro de la ruta
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stop {
    pub id: i64,
    #[serde(default)]
    pub sequence: Option<i32>,
    pub customer: Customer,
    #[serde(default)]
    pub demand: Option<f64>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub planned_arrival: Option<NaiveDateTime>,
}

impl Stop {
    pub fn position(&self) -> Option<LatLng> {
        LatLng::checked(self.customer.latitude, self.customer.longitude)
    }

    /// Pendiente o sin estado asignado
    pub fn is_open(&self) -> bool {
        self.status.as_ref().map_or(true, Status::is_open_stop)
    }
}

/// Cliente asociado a una parada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    #[serde(default)]
    pub id: Option<i64>,
    pub user: DriverUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverUser {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        [self.user.first_name.as_deref(), self.user.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub plate_number: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub capacity: Option<f64>,
}

impl Vehicle {
    /// Matrícula, marca y modelo, y capacidad cuando existen
    pub fn description(&self) -> String {
        let plate = self
            .plate_number
            .as_deref()
            .filter(|plate| !plate.is_empty())
            .unwrap_or("-");
        let make: Vec<&str> = [self.brand.as_deref(), self.model.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        let mut description = if make.is_empty() {
            plate.to_string()
        } else {
            format!("{} ({})", plate, make.join(" "))
        };
        if let Some(capacity) = self.capacity {
            description.push_str(&format!(" - Kapasite: {:.0} desi", capacity));
        }
        description
    }
}

/// Tramo de carretera calculado por el servidor entre dos puntos consecutivos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteGeometry {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    /// Pares `[lat, lng]`
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

/// Respuesta de los endpoints de mutación
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body de `POST /api/route/:id/status`
#[derive(Debug, Serialize)]
pub struct RouteStatusRequest<'a> {
    pub status: &'a Status,
}

/// Body de `POST /api/route/:id/stop/:stop_id/status`
#[derive(Debug, Serialize)]
pub struct StopStatusRequest<'a> {
    pub status: &'a Status,
    pub notes: Option<&'a str>,
}

/// Body de `POST /api/route/:id/stop/:stop_id/note`
#[derive(Debug, Serialize)]
pub struct StopNoteRequest<'a> {
    pub notes: &'a str,
}
