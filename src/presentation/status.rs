//! Presentación de estados
//!
//! Funciones puras que traducen un estado a color, etiqueta y variante de
//! badge. Un código desconocido nunca falla: la etiqueta es el código
//! recibido y el color/badge caen al valor por defecto.

use crate::models::Status;

pub const COLOR_SUCCESS: &str = "#198754";
pub const COLOR_DANGER: &str = "#dc3545";
pub const COLOR_SECONDARY: &str = "#6c757d";
pub const COLOR_PRIMARY: &str = "#0d6efd";

/// Variante de badge, en el vocabulario de Bootstrap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Success,
    Warning,
    Danger,
    Secondary,
    Info,
}

impl BadgeVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeVariant::Success => "success",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Danger => "danger",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Info => "info",
        }
    }
}

/// Color del marcador de una parada
pub fn status_color(status: &Status) -> &'static str {
    match status {
        Status::Completed => COLOR_SUCCESS,
        Status::Failed => COLOR_DANGER,
        Status::Skipped => COLOR_SECONDARY,
        _ => COLOR_PRIMARY,
    }
}

/// Etiqueta localizada (turco)
pub fn status_label(status: &Status) -> &str {
    match status {
        Status::Planned => "Planlandı",
        Status::Pending => "Beklemede",
        Status::InProgress => "Devam Ediyor",
        Status::Completed => "Tamamlandı",
        Status::Failed => "Başarısız",
        Status::Skipped => "Atlandı",
        Status::Cancelled => "İptal Edildi",
        Status::Other(code) => code,
    }
}

pub fn status_badge_variant(status: &Status) -> BadgeVariant {
    match status {
        Status::Completed => BadgeVariant::Success,
        Status::InProgress => BadgeVariant::Warning,
        Status::Failed | Status::Cancelled => BadgeVariant::Danger,
        Status::Skipped => BadgeVariant::Secondary,
        _ => BadgeVariant::Info,
    }
}

static PENDING: Status = Status::Pending;

/// Las paradas sin estado se muestran como pendientes
pub fn stop_status_or_pending(status: Option<&Status>) -> &Status {
    status.unwrap_or(&PENDING)
}
