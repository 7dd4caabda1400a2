//! Estados de ruta y de parada
//!
//! El backend envía los estados como códigos en texto plano. Los códigos
//! desconocidos se conservan tal cual para poder mostrarlos sin fallar.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Estado de una ruta o de una parada
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Planned,
    Pending,
    InProgress,
    Completed,
    Failed,
    Skipped,
    Cancelled,
    /// Código no reconocido, tal como llegó del servidor
    Other(String),
}

impl Status {
    pub fn code(&self) -> &str {
        match self {
            Status::Planned => "planned",
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::Cancelled => "cancelled",
            Status::Other(code) => code,
        }
    }

    /// Una parada sin resolver todavía acepta acciones del conductor
    pub fn is_open_stop(&self) -> bool {
        matches!(self, Status::Pending | Status::Planned)
    }
}

impl From<String> for Status {
    fn from(code: String) -> Self {
        match code.as_str() {
            "planned" => Status::Planned,
            "pending" => Status::Pending,
            "in_progress" => Status::InProgress,
            "completed" => Status::Completed,
            "failed" => Status::Failed,
            "skipped" => Status::Skipped,
            "cancelled" => Status::Cancelled,
            _ => Status::Other(code),
        }
    }
}

impl From<&str> for Status {
    fn from(code: &str) -> Self {
        Status::from(code.to_string())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.code().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
