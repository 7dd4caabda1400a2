//! Formato de números, fechas y duraciones para el panel de información

use chrono::NaiveDateTime;

/// Distancia en km con un decimal
pub fn format_distance(km: Option<f64>) -> String {
    match km {
        Some(km) => format!("{:.1} km", km),
        None => "-".to_string(),
    }
}

/// Desi total con dos decimales
pub fn format_demand(demand: Option<f64>) -> String {
    match demand {
        Some(demand) => format!("{:.2}", demand),
        None => "-".to_string(),
    }
}

/// Fecha y hora en formato local turco (`dd.MM.yyyy HH:mm`)
pub fn format_date_time(value: Option<&NaiveDateTime>) -> Option<String> {
    value.map(|dt| dt.format("%d.%m.%Y %H:%M").to_string())
}

/// Duración en minutos como `"{h}s {m}dk"`
pub fn format_duration(minutes: Option<u32>) -> String {
    match minutes {
        Some(minutes) if minutes > 0 => format!("{}s {}dk", minutes / 60, minutes % 60),
        _ => "-".to_string(),
    }
}
