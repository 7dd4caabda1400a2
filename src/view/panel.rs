//! Panel de información, lista de paradas y controles
//!
//! Todo se reconstruye desde cero en cada render a partir de la ruta
//! recibida; no hay parches locales sobre datos anteriores.

use crate::map::RenderSummary;
use crate::models::{Route, Status, Stop};
use crate::presentation::{
    format_date_time, format_demand, format_distance, format_duration, status_badge_variant,
    status_label, stop_status_or_pending, BadgeVariant,
};

pub const UNASSIGNED: &str = "Atanmamış";
pub const BUSY_LABEL: &str = "İşleniyor...";

/// Modo de la vista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Solo lectura (empresa / despachador)
    Plain,
    /// Con controles de cambio de estado
    Driver,
}

/// Acción que dispara un botón
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    RouteStatus(Status),
    StopStatus { stop_id: i64, status: Status },
    AddNote { stop_id: i64 },
}

impl Action {
    pub fn stop_id(&self) -> Option<i64> {
        match self {
            Action::RouteStatus(_) => None,
            Action::StopStatus { stop_id, .. } | Action::AddNote { stop_id } => Some(*stop_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    pub action: Action,
    pub label: &'static str,
    pub enabled: bool,
    pub busy: bool,
}

impl ActionButton {
    fn new(action: Action, label: &'static str, enabled: bool) -> Self {
        Self {
            action,
            label,
            enabled,
            busy: false,
        }
    }

    /// Texto visible, incluido el indicador de ocupado
    pub fn caption(&self) -> &'static str {
        if self.busy {
            BUSY_LABEL
        } else {
            self.label
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub status_label: String,
    pub status_badge: BadgeVariant,
    pub vehicle: String,
    pub driver: String,
    pub total_distance: String,
    pub total_demand: String,
    pub total_duration: String,
    pub stop_count: String,
    pub created_at: Option<String>,
}

/// Región de información: panel o mensaje de error en línea
#[derive(Debug, Clone, PartialEq)]
pub enum InfoRegion {
    Panel(InfoPanel),
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StopCard {
    pub stop_id: i64,
    pub number: usize,
    pub title: String,
    pub address: Option<String>,
    pub contact: String,
    pub notes: Option<String>,
    pub planned_arrival: Option<String>,
    pub status_label: String,
    pub status_badge: BadgeVariant,
    pub buttons: Vec<ActionButton>,
}

/// Contenido renderizado del modal
#[derive(Debug, Clone, PartialEq)]
pub struct ViewContent {
    pub route_id: i64,
    pub info: InfoRegion,
    pub route_controls: Vec<ActionButton>,
    pub stops: Vec<StopCard>,
    pub map: Option<RenderSummary>,
}

impl ViewContent {
    pub fn from_route(route: &Route, mode: ViewMode, map: RenderSummary) -> Self {
        let (route_controls, stops) = match mode {
            ViewMode::Plain => (Vec::new(), Vec::new()),
            ViewMode::Driver => (
                route_controls(&route.status),
                route
                    .stops
                    .iter()
                    .enumerate()
                    .map(|(index, stop)| stop_card(index + 1, stop, &route.status))
                    .collect(),
            ),
        };

        Self {
            route_id: route.id,
            info: InfoRegion::Panel(info_panel(route)),
            route_controls,
            stops,
            map: Some(map),
        }
    }

    pub fn load_error(route_id: i64, message: &str) -> Self {
        Self {
            route_id,
            info: InfoRegion::Error(format!(
                "Rota detayları yüklenirken bir hata oluştu: {}",
                message
            )),
            route_controls: Vec::new(),
            stops: Vec::new(),
            map: None,
        }
    }

    pub fn panel(&self) -> Option<&InfoPanel> {
        match &self.info {
            InfoRegion::Panel(panel) => Some(panel),
            InfoRegion::Error(_) => None,
        }
    }

    /// Botón (de ruta o de parada) que dispara `action`
    pub fn button(&self, action: &Action) -> Option<&ActionButton> {
        self.buttons().find(|b| &b.action == action)
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ActionButton> {
        self.route_controls
            .iter()
            .chain(self.stops.iter().flat_map(|card| card.buttons.iter()))
    }

    /// Todos los botones que referencian la parada
    pub fn stop_buttons_mut(&mut self, stop_id: i64) -> impl Iterator<Item = &mut ActionButton> {
        self.stops
            .iter_mut()
            .filter(move |card| card.stop_id == stop_id)
            .flat_map(|card| card.buttons.iter_mut())
    }
}

fn info_panel(route: &Route) -> InfoPanel {
    InfoPanel {
        status_label: status_label(&route.status).to_string(),
        status_badge: status_badge_variant(&route.status),
        vehicle: route
            .vehicle
            .as_ref()
            .map(|v| v.description())
            .unwrap_or_else(|| UNASSIGNED.to_string()),
        driver: route
            .driver
            .as_ref()
            .map(|d| d.full_name())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNASSIGNED.to_string()),
        total_distance: format_distance(route.total_distance),
        total_demand: format_demand(route.total_demand),
        total_duration: format_duration(route.total_duration),
        stop_count: format!("Durak Sayısı: {} müşteri", route.stops.len()),
        created_at: format_date_time(route.created_at.as_ref()),
    }
}

fn route_controls(current: &Status) -> Vec<ActionButton> {
    [
        (Status::InProgress, "Başlat"),
        (Status::Completed, "Tamamlandı"),
        (Status::Cancelled, "İptal Et"),
    ]
    .into_iter()
    .map(|(status, label)| {
        let enabled = &status != current;
        ActionButton::new(Action::RouteStatus(status), label, enabled)
    })
    .collect()
}

fn stop_card(number: usize, stop: &Stop, route_status: &Status) -> StopCard {
    let status = stop_status_or_pending(stop.status.as_ref());
    let actionable = stop.is_open() && *route_status == Status::InProgress;
    let customer = &stop.customer;

    StopCard {
        stop_id: stop.id,
        number,
        title: format!("{}. {}", number, customer.name),
        address: customer.address.clone(),
        contact: format!(
            "İletişim: {} - {}",
            customer.contact_person.as_deref().unwrap_or("-"),
            customer.contact_phone.as_deref().unwrap_or("-")
        ),
        notes: stop.notes.clone().filter(|n| !n.is_empty()),
        planned_arrival: format_date_time(stop.planned_arrival.as_ref()),
        status_label: status_label(status).to_string(),
        status_badge: status_badge_variant(status),
        buttons: vec![
            ActionButton::new(
                Action::StopStatus {
                    stop_id: stop.id,
                    status: Status::Completed,
                },
                "Tamamlandı",
                actionable,
            ),
            ActionButton::new(
                Action::StopStatus {
                    stop_id: stop.id,
                    status: Status::Failed,
                },
                "Başarısız",
                actionable,
            ),
            ActionButton::new(Action::AddNote { stop_id: stop.id }, "Not Ekle", true),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, Driver, DriverUser};

    fn route(status: Status, stop_status: Option<Status>) -> Route {
        Route {
            id: 7,
            status,
            total_distance: Some(12.345),
            total_demand: Some(3.5),
            total_duration: Some(135),
            warehouse: None,
            stops: vec![Stop {
                id: 1,
                sequence: Some(1),
                customer: Customer {
                    id: None,
                    name: "Market".to_string(),
                    address: None,
                    latitude: Some(40.0),
                    longitude: Some(32.9),
                    contact_person: None,
                    contact_phone: None,
                },
                demand: Some(3.5),
                status: stop_status,
                notes: Some(String::new()),
                planned_arrival: None,
            }],
            driver: None,
            vehicle: None,
            route_geometries: None,
            created_at: None,
        }
    }

    #[test]
    fn test_info_panel_fields_and_fallbacks() {
        let content = ViewContent::from_route(
            &route(Status::Planned, None),
            ViewMode::Plain,
            RenderSummary::default(),
        );
        let panel = content.panel().unwrap();
        assert_eq!(panel.vehicle, UNASSIGNED);
        assert_eq!(panel.driver, UNASSIGNED);
        assert_eq!(panel.total_distance, "12.3 km");
        assert_eq!(panel.total_demand, "3.50");
        assert_eq!(panel.total_duration, "2s 15dk");
        assert_eq!(panel.stop_count, "Durak Sayısı: 1 müşteri");
        assert!(content.stops.is_empty());
        assert!(content.route_controls.is_empty());
    }

    #[test]
    fn test_driver_name_is_joined() {
        let mut route = route(Status::Planned, None);
        route.driver = Some(Driver {
            id: Some(2),
            user: DriverUser {
                first_name: Some("Mehmet".to_string()),
                last_name: Some("Yılmaz".to_string()),
            },
        });
        let content = ViewContent::from_route(&route, ViewMode::Driver, RenderSummary::default());
        assert_eq!(content.panel().unwrap().driver, "Mehmet Yılmaz");
    }

    #[test]
    fn test_route_controls_disable_current_status() {
        let content = ViewContent::from_route(
            &route(Status::InProgress, None),
            ViewMode::Driver,
            RenderSummary::default(),
        );
        let start = content
            .button(&Action::RouteStatus(Status::InProgress))
            .unwrap();
        let cancel = content.button(&Action::RouteStatus(Status::Cancelled)).unwrap();
        assert!(!start.enabled);
        assert!(cancel.enabled);
    }

    #[test]
    fn test_stop_buttons_require_open_stop_and_running_route() {
        let complete = Action::StopStatus {
            stop_id: 1,
            status: Status::Completed,
        };

        let running = ViewContent::from_route(
            &route(Status::InProgress, Some(Status::Pending)),
            ViewMode::Driver,
            RenderSummary::default(),
        );
        assert!(running.button(&complete).unwrap().enabled);
        // Nota vacía no se muestra
        assert_eq!(running.stops[0].notes, None);

        let planned = ViewContent::from_route(
            &route(Status::Planned, Some(Status::Pending)),
            ViewMode::Driver,
            RenderSummary::default(),
        );
        assert!(!planned.button(&complete).unwrap().enabled);

        let done = ViewContent::from_route(
            &route(Status::InProgress, Some(Status::Completed)),
            ViewMode::Driver,
            RenderSummary::default(),
        );
        assert!(!done.button(&complete).unwrap().enabled);
        assert!(done.button(&Action::AddNote { stop_id: 1 }).unwrap().enabled);
    }
}
