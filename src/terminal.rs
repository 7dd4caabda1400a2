//! Front-end de terminal
//!
//! Diálogos sobre stdin/stdout y impresión del panel y de la lista de
//! paradas con colores.

use std::io::{self, BufRead, Write};

use colored::*;
use tracing::warn;

use crate::presentation::BadgeVariant;
use crate::view::{ActionButton, Dialogs, InfoRegion, ViewContent};

/// Diálogos leídos de stdin
pub struct TerminalDialogs<R> {
    input: R,
}

impl TerminalDialogs<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        Self {
            input: io::BufReader::new(io::stdin()),
        }
    }
}

impl<R: BufRead> TerminalDialogs<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn flush_prompt(&self) {
        if let Err(e) = io::stdout().flush() {
            warn!("⚠️ No se pudo vaciar stdout: {}", e);
        }
    }

    /// `None` en EOF o error de lectura
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Err(e) => {
                warn!("⚠️ Error leyendo la entrada: {}", e);
                None
            }
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead> Dialogs for TerminalDialogs<R> {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{} {} ", message.bright_yellow(), "[e/H]".dimmed());
        self.flush_prompt();
        matches!(
            self.read_line().map(|s| s.trim().to_lowercase()).as_deref(),
            Some("e") | Some("evet") | Some("y") | Some("yes")
        )
    }

    fn prompt(&mut self, message: &str) -> Option<String> {
        println!("{}", message.bright_cyan());
        print!("{}", "> ".bright_cyan());
        self.flush_prompt();
        self.read_line()
    }

    fn alert(&mut self, message: &str) {
        println!("{}", message.bright_red().bold());
    }
}

fn badge(text: &str, variant: BadgeVariant) -> ColoredString {
    let text = format!(" {} ", text);
    match variant {
        BadgeVariant::Success => text.black().on_green(),
        BadgeVariant::Warning => text.black().on_yellow(),
        BadgeVariant::Danger => text.white().on_red(),
        BadgeVariant::Secondary => text.white().on_bright_black(),
        BadgeVariant::Info => text.black().on_cyan(),
    }
}

fn button(index: usize, button: &ActionButton) -> String {
    let caption = format!("[{}] {}", index, button.caption());
    if button.enabled {
        caption.bright_white().to_string()
    } else {
        caption.dimmed().to_string()
    }
}

/// Imprime el contenido y devuelve los controles numerados en el mismo orden
pub fn print_view(content: &ViewContent) -> Vec<ActionButton> {
    let mut numbered = Vec::new();

    println!();
    println!("{}", format!("🚚 Rota #{}", content.route_id).bright_blue().bold());
    println!("{}", "=====================================".bright_blue());

    match &content.info {
        InfoRegion::Error(message) => {
            println!("{}", message.bright_red());
            return numbered;
        }
        InfoRegion::Panel(panel) => {
            println!("{}", "Rota Bilgileri".bold());
            println!("Durum: {}", badge(&panel.status_label, panel.status_badge));
            println!("Şoför: {}", panel.driver);
            println!("Araç: {}", panel.vehicle);
            println!("Toplam Mesafe: {}", panel.total_distance);
            println!("Toplam Desi: {}", panel.total_demand);
            println!("Toplam Süre: {}", panel.total_duration);
            println!("{}", panel.stop_count);
            if let Some(created_at) = &panel.created_at {
                println!("Oluşturulma: {}", created_at);
            }
            if let Some(legend) = content.map.as_ref().and_then(|m| m.path_legend()) {
                println!("Güzergah: {}", legend.dimmed());
            }
        }
    }

    if !content.route_controls.is_empty() {
        println!();
        println!("{}", "Rota Durumu Güncelle".bold());
        let line: Vec<String> = content
            .route_controls
            .iter()
            .map(|b| {
                numbered.push(b.clone());
                button(numbered.len(), b)
            })
            .collect();
        println!("{}", line.join("  "));
    }

    if !content.stops.is_empty() {
        println!();
        println!("{}", "Duraklar".bold());
    }
    for card in &content.stops {
        println!();
        println!(
            "{}  {}",
            card.title.bold(),
            badge(&card.status_label, card.status_badge)
        );
        if let Some(address) = &card.address {
            println!("   {}", address.dimmed());
        }
        println!("   {}", card.contact);
        if let Some(arrival) = &card.planned_arrival {
            println!("   Planlanan varış: {}", arrival);
        }
        if let Some(notes) = &card.notes {
            println!("   {}", format!("📝 Not: {}", notes).cyan());
        }
        let line: Vec<String> = card
            .buttons
            .iter()
            .map(|b| {
                numbered.push(b.clone());
                button(numbered.len(), b)
            })
            .collect();
        println!("   {}", line.join("  "));
    }

    numbered
}

/// Línea de progreso de una parada con los botones en su estado actual
pub fn stop_progress_line(content: &ViewContent, stop_id: i64) -> Option<String> {
    let card = content.stops.iter().find(|card| card.stop_id == stop_id)?;
    let captions: Vec<&str> = card.buttons.iter().map(ActionButton::caption).collect();
    Some(format!("⏳ {}  [{}]", card.title, captions.join(" | ")))
}
