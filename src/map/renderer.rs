//! Renderizado de una ruta en el mapa
//!
//! Dibuja el depósito, una marca numerada por parada y el trazado de la
//! ruta. Las paradas sin coordenadas válidas se saltan sin abortar el resto.

use tracing::{debug, warn};

use crate::config::MapConfig;
use crate::models::{LatLng, Route, Stop};
use crate::presentation::{
    format_demand, status_color, status_label, stop_status_or_pending, COLOR_PRIMARY,
    COLOR_SUCCESS,
};

use super::handle::MapHandle;
use super::scene::{Marker, MarkerKind, Polyline, Popup, Viewport};

const ROUTE_WEIGHT: u8 = 3;
const ROUTE_OPACITY: f64 = 0.8;
const STRAIGHT_DASH: &str = "5, 10";

/// Lo que se dibujó en un render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    pub markers: usize,
    pub polylines: usize,
    /// Paradas omitidas por coordenadas inválidas
    pub skipped_stops: Vec<i64>,
    /// Trazado de carretera del servidor en lugar de tramos rectos
    pub used_geometries: bool,
}

impl RenderSummary {
    /// Leyenda del tipo de trazado; `None` si no se dibujó ninguna línea
    pub fn path_legend(&self) -> Option<&'static str> {
        match (self.polylines, self.used_geometries) {
            (0, _) => None,
            (_, true) => Some("Yol güzergahı"),
            (_, false) => Some("Düz çizgi (tahmini)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MapRenderer {
    config: MapConfig,
}

impl MapRenderer {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    fn default_view(&self) -> Viewport {
        let (lat, lng) = self.config.default_center;
        Viewport::Center {
            center: LatLng { lat, lng },
            zoom: self.config.default_zoom,
        }
    }

    /// Mapa vacío en la vista por defecto, para cuando la ruta no se pudo cargar
    pub fn render_placeholder(&self, handle: &mut MapHandle, container: &str) {
        handle.replace(container).set_viewport(self.default_view());
    }

    pub fn render_route(
        &self,
        handle: &mut MapHandle,
        container: &str,
        route: &Route,
    ) -> RenderSummary {
        let surface = handle.replace(container);
        let mut summary = RenderSummary::default();
        let mut bounds_points = Vec::new();

        let depot_position = match &route.warehouse {
            Some(depot) => match depot.position() {
                Some(position) => {
                    surface.add_marker(Marker {
                        kind: MarkerKind::Depot,
                        position,
                        label: "D".to_string(),
                        color: COLOR_SUCCESS,
                        popup: Popup {
                            title: depot.name.clone(),
                            lines: depot.address.iter().cloned().collect(),
                        },
                    });
                    summary.markers += 1;
                    bounds_points.push(position);
                    Some(position)
                }
                None => {
                    warn!("⚠️ Depo '{}' sin coordenadas válidas", depot.name);
                    None
                }
            },
            None => None,
        };

        let mut stop_positions = Vec::with_capacity(route.stops.len());
        for (index, stop) in route.stops.iter().enumerate() {
            let position = stop.position();
            stop_positions.push(position);

            let Some(position) = position else {
                warn!(
                    "⚠️ Parada {} ({}) sin coordenadas válidas, se omite",
                    stop.id, stop.customer.name
                );
                summary.skipped_stops.push(stop.id);
                continue;
            };

            surface.add_marker(stop_marker(index + 1, stop, position));
            summary.markers += 1;
            bounds_points.push(position);
        }

        match Viewport::bounds_of(&bounds_points) {
            Some(bounds) => surface.set_viewport(Viewport::Fit {
                bounds,
                padding: self.config.fit_padding,
            }),
            None => surface.set_viewport(self.default_view()),
        }

        if route.stops.is_empty() {
            debug!("📭 Ruta {} sin paradas, sin trazado", route.id);
            return summary;
        }

        let geometries = route
            .route_geometries
            .as_deref()
            .filter(|geometries| !geometries.is_empty());

        let lines: Vec<Polyline> = match geometries {
            Some(geometries) => {
                summary.used_geometries = true;
                geometries
                    .iter()
                    .filter_map(|geometry| {
                        let points: Vec<LatLng> = geometry
                            .coordinates
                            .iter()
                            .filter_map(|[lat, lng]| LatLng::checked(Some(*lat), Some(*lng)))
                            .collect();
                        (points.len() >= 2).then(|| road_line(points))
                    })
                    .collect()
            }
            None => straight_segments(depot_position, route.warehouse.is_some(), &stop_positions),
        };

        for line in lines {
            surface.add_polyline(line);
            summary.polylines += 1;
        }

        debug!(
            "🗺️ Ruta {} dibujada: {} marcadores, {} líneas",
            route.id, summary.markers, summary.polylines
        );
        summary
    }
}

fn stop_marker(number: usize, stop: &Stop, position: LatLng) -> Marker {
    let status = stop_status_or_pending(stop.status.as_ref());
    let customer = &stop.customer;

    let mut lines: Vec<String> = customer.address.iter().cloned().collect();
    lines.push(format!(
        "İletişim: {}",
        customer.contact_person.as_deref().unwrap_or("-")
    ));
    lines.push(format!(
        "Telefon: {}",
        customer.contact_phone.as_deref().unwrap_or("-")
    ));
    lines.push(format!("Desi: {}", format_demand(stop.demand)));
    lines.push(format!("Durum: {}", status_label(status)));

    Marker {
        kind: MarkerKind::Stop {
            number,
            stop_id: stop.id,
        },
        position,
        label: number.to_string(),
        color: status_color(status),
        popup: Popup {
            title: customer.name.clone(),
            lines,
        },
    }
}

fn road_line(points: Vec<LatLng>) -> Polyline {
    Polyline {
        points,
        color: COLOR_PRIMARY,
        weight: ROUTE_WEIGHT,
        opacity: ROUTE_OPACITY,
        dash: None,
    }
}

/// Tramos rectos depósito→parada1→…→paradaN→depósito. Un tramo con algún
/// extremo inválido no se dibuja.
fn straight_segments(
    depot: Option<LatLng>,
    has_depot: bool,
    stops: &[Option<LatLng>],
) -> Vec<Polyline> {
    let mut chain = Vec::with_capacity(stops.len() + 2);
    if has_depot {
        chain.push(depot);
    }
    chain.extend_from_slice(stops);
    if has_depot {
        chain.push(depot);
    }

    chain
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(from), Some(to)) => Some(Polyline {
                points: vec![from, to],
                color: COLOR_PRIMARY,
                weight: ROUTE_WEIGHT,
                opacity: ROUTE_OPACITY,
                dash: Some(STRAIGHT_DASH),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::scene::{MapScene, SceneBoard, SceneFactory};
    use crate::models::{Customer, Depot, RouteGeometry, Status};

    fn depot() -> Depot {
        Depot {
            id: Some(1),
            name: "Ana Depo".to_string(),
            address: Some("Ankara".to_string()),
            latitude: Some(39.9),
            longitude: Some(32.8),
        }
    }

    fn stop(id: i64, lat: Option<f64>, lng: Option<f64>, status: Option<Status>) -> Stop {
        Stop {
            id,
            sequence: None,
            customer: Customer {
                id: None,
                name: format!("Müşteri {}", id),
                address: Some("Adres".to_string()),
                latitude: lat,
                longitude: lng,
                contact_person: Some("Ayşe".to_string()),
                contact_phone: Some("555".to_string()),
            },
            demand: Some(2.0),
            status,
            notes: None,
            planned_arrival: None,
        }
    }

    fn route(warehouse: Option<Depot>, stops: Vec<Stop>) -> Route {
        Route {
            id: 7,
            status: Status::InProgress,
            total_distance: None,
            total_demand: None,
            total_duration: None,
            warehouse,
            stops,
            driver: None,
            vehicle: None,
            route_geometries: None,
            created_at: None,
        }
    }

    fn render(route: &Route) -> (RenderSummary, MapScene) {
        let board = SceneBoard::new();
        let mut handle = MapHandle::new(Box::new(SceneFactory::new(board.clone())));
        let summary =
            MapRenderer::new(MapConfig::default()).render_route(&mut handle, "routeMap", route);
        let scene = board.live_scene().expect("live scene after render");
        (summary, scene)
    }

    #[test]
    fn test_straight_segments_close_the_loop() {
        let route = route(
            Some(depot()),
            vec![
                stop(1, Some(40.0), Some(32.9), Some(Status::Completed)),
                stop(2, Some(40.1), Some(33.0), None),
            ],
        );
        let (summary, scene) = render(&route);

        assert_eq!(summary.markers, 3);
        assert_eq!(scene.stop_labels(), vec!["1", "2"]);
        assert_eq!(scene.markers[1].color, COLOR_SUCCESS);
        assert_eq!(scene.markers[2].color, COLOR_PRIMARY);
        assert_eq!(scene.polylines.len(), 3);
        assert!(scene.polylines.iter().all(|l| l.dash == Some(STRAIGHT_DASH)));
        assert_eq!(summary.path_legend(), Some("Düz çizgi (tahmini)"));
        assert!(matches!(scene.viewport, Some(Viewport::Fit { padding: 50, .. })));
    }

    #[test]
    fn test_invalid_stop_is_skipped_with_adjoining_segments() {
        let route = route(
            Some(depot()),
            vec![
                stop(1, Some(40.0), Some(32.9), None),
                stop(2, None, Some(33.0), None),
                stop(3, Some(40.2), Some(33.1), None),
            ],
        );
        let (summary, scene) = render(&route);

        assert_eq!(summary.skipped_stops, vec![2]);
        // La numeración sigue el orden del servidor
        assert_eq!(scene.stop_labels(), vec!["1", "3"]);
        // depo→1 y 3→depo; 1→2 y 2→3 se omiten
        assert_eq!(scene.polylines.len(), 2);
    }

    #[test]
    fn test_no_stops_only_depot_and_no_lines() {
        let (summary, scene) = render(&route(Some(depot()), vec![]));
        assert_eq!(summary.markers, 1);
        assert_eq!(summary.polylines, 0);
        assert_eq!(summary.path_legend(), None);
        assert!(scene.polylines.is_empty());
    }

    #[test]
    fn test_no_valid_points_falls_back_to_default_view() {
        let (summary, scene) = render(&route(None, vec![stop(1, None, None, None)]));
        assert_eq!(summary.markers, 0);
        assert_eq!(summary.polylines, 0);
        assert_eq!(
            scene.viewport,
            Some(Viewport::Center {
                center: LatLng { lat: 39.9334, lng: 32.8597 },
                zoom: 10,
            })
        );
    }

    #[test]
    fn test_server_geometries_replace_straight_lines() {
        let mut route = route(Some(depot()), vec![stop(1, Some(40.0), Some(32.9), None)]);
        route.route_geometries = Some(vec![
            RouteGeometry {
                from: Some("warehouse".to_string()),
                to: Some("customer_1".to_string()),
                coordinates: vec![[39.9, 32.8], [39.95, 32.85], [40.0, 32.9]],
            },
            RouteGeometry {
                from: Some("customer_1".to_string()),
                to: Some("warehouse".to_string()),
                coordinates: vec![[40.0, 32.9], [39.9, 32.8]],
            },
        ]);

        let (summary, scene) = render(&route);
        assert!(summary.used_geometries);
        assert_eq!(summary.path_legend(), Some("Yol güzergahı"));
        assert_eq!(scene.polylines.len(), 2);
        assert_eq!(scene.polylines[0].points.len(), 3);
        assert!(scene.polylines.iter().all(|l| l.dash.is_none()));
    }
}
