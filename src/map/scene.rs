//! Escena del mapa
//!
//! Tipos que describen lo que se dibuja (marcadores, polilíneas, vista) y
//! las interfaces que debe cumplir cualquier backend de mapa. `SceneFactory`
//! es el backend en memoria: guarda cada escena en un `SceneBoard`
//! compartido que se puede inspeccionar o exportar a GeoJSON.

use std::sync::{Arc, Mutex, MutexGuard};

use geo_types::{coord, Rect};

use crate::models::LatLng;

/// Qué representa un marcador
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    Depot,
    Stop { number: usize, stop_id: i64 },
}

/// Contenido del popup de un marcador
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: LatLng,
    /// Texto del icono: "D" para el depósito, el número de orden para paradas
    pub label: String,
    pub color: &'static str,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<LatLng>,
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f64,
    /// Patrón de guiones; `None` es línea continua
    pub dash: Option<&'static str>,
}

/// Vista inicial del mapa
#[derive(Debug, Clone, PartialEq)]
pub enum Viewport {
    /// Ajustar a los límites; x = longitud, y = latitud
    Fit { bounds: Rect<f64>, padding: u32 },
    Center { center: LatLng, zoom: u8 },
}

impl Viewport {
    /// Caja mínima que contiene todos los puntos, o `None` si no hay puntos
    pub fn bounds_of(points: &[LatLng]) -> Option<Rect<f64>> {
        let first = points.first()?;
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        let (mut min_lng, mut max_lng) = (first.lng, first.lng);

        for p in &points[1..] {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        Some(Rect::new(
            coord! { x: min_lng, y: min_lat },
            coord! { x: max_lng, y: max_lat },
        ))
    }
}

/// Todo lo dibujado en una instancia de mapa
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub container: String,
    pub markers: Vec<Marker>,
    pub polylines: Vec<Polyline>,
    pub viewport: Option<Viewport>,
}

impl MapScene {
    pub fn new(container: &str) -> Self {
        Self {
            container: container.to_string(),
            markers: Vec::new(),
            polylines: Vec::new(),
            viewport: None,
        }
    }

    pub fn stop_labels(&self) -> Vec<&str> {
        self.markers
            .iter()
            .filter(|m| matches!(m.kind, MarkerKind::Stop { .. }))
            .map(|m| m.label.as_str())
            .collect()
    }
}

/// Una instancia viva de mapa sobre un contenedor
pub trait MapSurface: Send {
    fn add_marker(&mut self, marker: Marker);
    fn add_polyline(&mut self, polyline: Polyline);
    fn set_viewport(&mut self, viewport: Viewport);
    /// Libera la instancia; no se vuelve a usar después
    fn remove(&mut self);
}

/// Crea instancias de mapa
pub trait MapFactory: Send {
    fn create(&mut self, container: &str) -> Box<dyn MapSurface>;
}

/// Registro de una escena creada por `SceneFactory`
#[derive(Debug, Clone)]
pub struct SceneRecord {
    pub scene: MapScene,
    pub live: bool,
}

/// Registro compartido de todas las escenas creadas
#[derive(Debug, Clone, Default)]
pub struct SceneBoard {
    inner: Arc<Mutex<Vec<SceneRecord>>>,
}

impl SceneBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SceneRecord>> {
        // Un panic con el lock tomado no deja datos a medio escribir
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn created(&self) -> usize {
        self.lock().len()
    }

    pub fn live_count(&self) -> usize {
        self.lock().iter().filter(|r| r.live).count()
    }

    /// Escena de la instancia viva, si existe
    pub fn live_scene(&self) -> Option<MapScene> {
        self.lock().iter().rev().find(|r| r.live).map(|r| r.scene.clone())
    }

    pub fn records(&self) -> Vec<SceneRecord> {
        self.lock().clone()
    }

    fn update<F: FnOnce(&mut SceneRecord)>(&self, index: usize, f: F) {
        if let Some(record) = self.lock().get_mut(index) {
            f(record);
        }
    }
}

/// Backend en memoria
#[derive(Debug, Clone, Default)]
pub struct SceneFactory {
    board: SceneBoard,
}

impl SceneFactory {
    pub fn new(board: SceneBoard) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &SceneBoard {
        &self.board
    }
}

impl MapFactory for SceneFactory {
    fn create(&mut self, container: &str) -> Box<dyn MapSurface> {
        let index = {
            let mut records = self.board.lock();
            records.push(SceneRecord {
                scene: MapScene::new(container),
                live: true,
            });
            records.len() - 1
        };

        Box::new(SceneSurface {
            board: self.board.clone(),
            index,
        })
    }
}

struct SceneSurface {
    board: SceneBoard,
    index: usize,
}

impl MapSurface for SceneSurface {
    fn add_marker(&mut self, marker: Marker) {
        self.board.update(self.index, |r| r.scene.markers.push(marker));
    }

    fn add_polyline(&mut self, polyline: Polyline) {
        self.board.update(self.index, |r| r.scene.polylines.push(polyline));
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.board.update(self.index, |r| r.scene.viewport = Some(viewport));
    }

    fn remove(&mut self) {
        self.board.update(self.index, |r| r.live = false);
    }
}
