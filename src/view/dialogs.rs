//! Diálogos bloqueantes con el usuario: confirmar, pedir texto, avisar

pub trait Dialogs {
    fn confirm(&mut self, message: &str) -> bool;

    /// `None` si el usuario cancela
    fn prompt(&mut self, message: &str) -> Option<String>;

    fn alert(&mut self, message: &str);
}
