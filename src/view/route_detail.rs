//! Vista de detalle de ruta
//!
//! Máquina de estados por modal abierto:
//! `Closed → Loading → Rendered → (Mutating → Loading)* → Closed`.
//!
//! Cada mutación confirmada por el servidor termina en una recarga completa
//! desde `GET /api/route/:id`; nunca se parchea el estado local.

use tracing::{debug, error, info, warn};

use crate::client::RouteApi;
use crate::config::MapConfig;
use crate::map::{MapHandle, MapRenderer};
use crate::models::{Route, Status};
use crate::presentation::status_label;
use crate::utils::errors::{ApiError, ApiResult};

use super::dialogs::Dialogs;
use super::panel::{Action, ViewContent, ViewMode};

pub const DEFAULT_MAP_CONTAINER: &str = "routeMap";
pub const NOTE_PROMPT: &str = "Bu durak için not ekleyin:";
pub const NOTE_SAVED: &str = "Not başarıyla eklendi.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Closed,
    Loading,
    Rendered,
    Mutating,
}

/// Resultado de pulsar un control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutcome {
    /// Mutación aceptada; la vista se volvió a abrir con datos frescos
    Refreshed,
    /// Cambio de estado de la ruta; resincronización completa de la vista
    Reloaded,
    /// Botón deshabilitado u ocupado: no pasa nada
    Ignored,
    /// El usuario canceló el diálogo; no se envió nada
    Cancelled,
    /// Error mostrado al usuario
    Failed(String),
}

/// Identifica una carga en curso; una respuesta con ticket viejo se descarta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    session: u64,
    route_id: i64,
    mode: ViewMode,
}

/// Actualización de parada en curso: los botones de la parada quedan
/// ocupados hasta `finish_stop_update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTicket {
    session: u64,
    route_id: i64,
    stop_id: i64,
    previous: Vec<bool>,
}

impl StopTicket {
    pub fn route_id(&self) -> i64 {
        self.route_id
    }

    pub fn stop_id(&self) -> i64 {
        self.stop_id
    }
}

pub struct RouteDetailView<A, D> {
    api: A,
    dialogs: D,
    renderer: MapRenderer,
    map: MapHandle,
    container: String,
    state: ViewState,
    session: u64,
    mode: ViewMode,
    content: Option<ViewContent>,
}

impl<A: RouteApi, D: Dialogs> RouteDetailView<A, D> {
    pub fn new(api: A, dialogs: D, map: MapHandle, config: MapConfig) -> Self {
        Self {
            api,
            dialogs,
            renderer: MapRenderer::new(config),
            map,
            container: DEFAULT_MAP_CONTAINER.to_string(),
            state: ViewState::Closed,
            session: 0,
            mode: ViewMode::Plain,
            content: None,
        }
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn content(&self) -> Option<&ViewContent> {
        self.content.as_ref()
    }

    pub fn map_is_live(&self) -> bool {
        self.map.is_live()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn dialogs_mut(&mut self) -> &mut D {
        &mut self.dialogs
    }

    /// Abre (o reabre) la vista de una ruta y espera a que quede renderizada
    pub async fn open(&mut self, route_id: i64, mode: ViewMode) {
        let ticket = self.begin_open(route_id, mode);
        let result = self.api.get_route(route_id).await;
        self.complete_open(ticket, result);
    }

    /// Primera mitad de `open`: pasa a `Loading` y emite el ticket de la carga
    pub fn begin_open(&mut self, route_id: i64, mode: ViewMode) -> LoadTicket {
        self.session += 1;
        self.state = ViewState::Loading;
        self.mode = mode;
        info!("🔍 Abriendo ruta {} en modo {:?}", route_id, mode);

        LoadTicket {
            session: self.session,
            route_id,
            mode,
        }
    }

    /// Segunda mitad de `open`. Devuelve `false` si la respuesta llegó tarde
    /// (vista cerrada o reabierta) y se descartó.
    pub fn complete_open(&mut self, ticket: LoadTicket, result: ApiResult<Route>) -> bool {
        if ticket.session != self.session || self.state != ViewState::Loading {
            debug!(
                "⏭️ Respuesta tardía para la ruta {} descartada",
                ticket.route_id
            );
            return false;
        }

        self.content = Some(match result {
            Ok(route) => {
                let summary = self
                    .renderer
                    .render_route(&mut self.map, &self.container, &route);
                if !summary.skipped_stops.is_empty() {
                    warn!(
                        "⚠️ Ruta {}: {} paradas sin coordenadas",
                        route.id,
                        summary.skipped_stops.len()
                    );
                }
                ViewContent::from_route(&route, ticket.mode, summary)
            }
            Err(e) => {
                error!("❌ Error cargando la ruta {}: {}", ticket.route_id, e);
                self.renderer.render_placeholder(&mut self.map, &self.container);
                ViewContent::load_error(ticket.route_id, &e.to_string())
            }
        });
        self.state = ViewState::Rendered;
        true
    }

    /// Cierra el modal y libera el mapa
    pub fn close(&mut self) {
        self.session += 1;
        self.map.dispose();
        self.content = None;
        self.state = ViewState::Closed;
        debug!("🚪 Vista de ruta cerrada");
    }

    pub async fn press(&mut self, action: &Action) -> ViewOutcome {
        match action {
            Action::RouteStatus(status) => self.update_route_status(status).await,
            Action::StopStatus { stop_id, status } => {
                self.update_stop_status(*stop_id, status).await
            }
            Action::AddNote { stop_id } => self.add_stop_note(*stop_id).await,
        }
    }

    /// Ruta sobre la que actuar si el botón existe y está habilitado
    fn actionable(&self, action: &Action) -> Option<i64> {
        if self.state != ViewState::Rendered || self.mode != ViewMode::Driver {
            return None;
        }
        let content = self.content.as_ref()?;
        let button = content.button(action)?;
        if !button.enabled || button.busy {
            debug!("🚫 Botón {:?} deshabilitado, se ignora", action);
            return None;
        }
        Some(content.route_id)
    }

    fn report(&mut self, e: ApiError) -> ViewOutcome {
        error!("❌ {}", e);
        self.state = ViewState::Rendered;
        let message = e.alert_text();
        self.dialogs.alert(&message);
        ViewOutcome::Failed(message)
    }

    pub async fn update_route_status(&mut self, status: &Status) -> ViewOutcome {
        let Some(route_id) = self.actionable(&Action::RouteStatus(status.clone())) else {
            return ViewOutcome::Ignored;
        };

        let question = format!(
            "Rota durumunu \"{}\" olarak güncellemek istediğinizden emin misiniz?",
            status_label(status)
        );
        if !self.dialogs.confirm(&question) {
            return ViewOutcome::Cancelled;
        }

        self.state = ViewState::Mutating;
        match self.api.update_route_status(route_id, status).await {
            Ok(()) => {
                info!("🔄 Ruta {} → {}, resincronizando vista", route_id, status);
                let mode = self.mode;
                self.close();
                self.open(route_id, mode).await;
                ViewOutcome::Reloaded
            }
            Err(e) => self.report(e),
        }
    }

    pub async fn update_stop_status(&mut self, stop_id: i64, status: &Status) -> ViewOutcome {
        let Some(ticket) = self.begin_stop_update(stop_id, status) else {
            return ViewOutcome::Ignored;
        };
        let result = self
            .api
            .update_stop_status(ticket.route_id, stop_id, status)
            .await;
        self.finish_stop_update(ticket, result).await
    }

    /// Primera mitad de `update_stop_status`: deshabilita los botones de la
    /// parada, los marca como ocupados y pasa a `Mutating`.
    pub fn begin_stop_update(&mut self, stop_id: i64, status: &Status) -> Option<StopTicket> {
        let action = Action::StopStatus {
            stop_id,
            status: status.clone(),
        };
        let route_id = self.actionable(&action)?;

        info!(
            "📝 Actualizando parada - Ruta: {}, Parada: {}, Estado: {}",
            route_id, stop_id, status
        );
        let previous = self.mark_stop_busy(stop_id);
        self.state = ViewState::Mutating;

        Some(StopTicket {
            session: self.session,
            route_id,
            stop_id,
            previous,
        })
    }

    /// Segunda mitad de `update_stop_status`. Un resultado que llega con la
    /// vista cerrada o reabierta se ignora.
    pub async fn finish_stop_update(
        &mut self,
        ticket: StopTicket,
        result: ApiResult<()>,
    ) -> ViewOutcome {
        if ticket.session != self.session || self.state != ViewState::Mutating {
            debug!(
                "⏭️ Resultado tardío para la parada {} descartado",
                ticket.stop_id
            );
            return ViewOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                self.open(ticket.route_id, self.mode).await;
                ViewOutcome::Refreshed
            }
            Err(e) => {
                self.restore_stop_buttons(ticket.stop_id, &ticket.previous);
                self.report(e)
            }
        }
    }

    pub async fn add_stop_note(&mut self, stop_id: i64) -> ViewOutcome {
        let Some(route_id) = self.actionable(&Action::AddNote { stop_id }) else {
            return ViewOutcome::Ignored;
        };

        let Some(notes) = self.dialogs.prompt(NOTE_PROMPT) else {
            return ViewOutcome::Cancelled;
        };

        self.state = ViewState::Mutating;
        match self.api.add_stop_note(route_id, stop_id, &notes).await {
            Ok(()) => {
                self.dialogs.alert(NOTE_SAVED);
                self.open(route_id, self.mode).await;
                ViewOutcome::Refreshed
            }
            Err(e) => self.report(e),
        }
    }

    /// Deshabilita todos los botones de la parada y devuelve su estado previo
    fn mark_stop_busy(&mut self, stop_id: i64) -> Vec<bool> {
        let Some(content) = self.content.as_mut() else {
            return Vec::new();
        };
        content
            .stop_buttons_mut(stop_id)
            .map(|button| {
                let was_enabled = button.enabled;
                button.enabled = false;
                button.busy = true;
                was_enabled
            })
            .collect()
    }

    fn restore_stop_buttons(&mut self, stop_id: i64, previous: &[bool]) {
        // El modal pudo cerrarse mientras tanto
        let Some(content) = self.content.as_mut() else {
            return;
        };
        for (button, enabled) in content.stop_buttons_mut(stop_id).zip(previous) {
            button.enabled = *enabled;
            button.busy = false;
        }
    }
}
