use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use dotenvy::dotenv;
use tracing::{error, info};

use route_viewer::config::EnvironmentConfig;
use route_viewer::map::{scene_to_geojson, MapHandle, SceneBoard, SceneFactory};
use route_viewer::models::Status;
use route_viewer::terminal::{print_view, stop_progress_line, TerminalDialogs};
use route_viewer::view::{Action, Dialogs};
use route_viewer::{RouteApi, RouteApiClient, RouteDetailView, ViewMode, ViewOutcome};

/// Visor de rutas de reparto
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// ID de la ruta a abrir
    route_id: i64,

    /// Modo conductor: permite cambiar estados y agregar notas
    #[arg(short, long)]
    driver: bool,

    /// Escribe el mapa de la ruta como GeoJSON tras cada render
    #[arg(short, long)]
    geojson: Option<PathBuf>,

    /// Logs a nivel DEBUG
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn mode(&self) -> ViewMode {
        if self.driver {
            ViewMode::Driver
        } else {
            ViewMode::Plain
        }
    }
}

fn write_geojson(board: &SceneBoard, path: &Path) -> Result<()> {
    if let Some(scene) = board.live_scene() {
        let body = serde_json::to_string_pretty(&scene_to_geojson(&scene))?;
        std::fs::write(path, body)
            .with_context(|| format!("No se pudo escribir {}", path.display()))?;
        info!("🗺️ Mapa escrito en {}", path.display());
    }
    Ok(())
}

/// Todo stdin pasa por los diálogos para no perder líneas en el buffer
fn read_choice<D: Dialogs>(dialogs: &mut D) -> Option<usize> {
    match dialogs.prompt("Seçiminiz (0 = çıkış):") {
        Some(choice) => choice.trim().parse().ok(),
        None => Some(0),
    }
}

/// Cambio de estado de parada mostrando los botones ocupados mientras
/// la petición está en curso
async fn run_stop_update<A: RouteApi, D: Dialogs>(
    view: &mut RouteDetailView<A, D>,
    stop_id: i64,
    status: &Status,
) -> ViewOutcome {
    let Some(ticket) = view.begin_stop_update(stop_id, status) else {
        return ViewOutcome::Ignored;
    };
    if let Some(line) = view.content().and_then(|c| stop_progress_line(c, stop_id)) {
        println!("{}", line.dimmed());
    }
    let result = view
        .api()
        .update_stop_status(ticket.route_id(), ticket.stop_id(), status)
        .await;
    view.finish_stop_update(ticket, result).await
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(io::stderr)
        .init();

    let config = EnvironmentConfig::from_env()?;
    info!("🚚 Route Viewer - API: {}", config.api_base_url);

    let client = RouteApiClient::from_config(&config)?;
    let board = SceneBoard::new();
    let map = MapHandle::new(Box::new(SceneFactory::new(board.clone())));
    let mut view = RouteDetailView::new(client, TerminalDialogs::stdin(), map, config.map);
    let mode = args.mode();

    view.open(args.route_id, mode).await;

    loop {
        let Some(content) = view.content() else {
            break;
        };
        let controls = print_view(content);

        if let Some(path) = &args.geojson {
            if let Err(e) = write_geojson(&board, path) {
                error!("❌ {}", e);
            }
        }

        if mode == ViewMode::Plain || controls.is_empty() {
            break;
        }

        println!();
        let choice = match read_choice(view.dialogs_mut()) {
            Some(0) => break,
            Some(n) if n <= controls.len() => n,
            _ => {
                println!("{}", "❌ Geçersiz seçim".bright_red());
                continue;
            }
        };

        let outcome = match &controls[choice - 1].action {
            Action::StopStatus { stop_id, status } => {
                run_stop_update(&mut view, *stop_id, status).await
            }
            action => view.press(action).await,
        };
        match outcome {
            ViewOutcome::Ignored => println!("{}", "⏸️ Bu işlem şu anda kullanılamaz".dimmed()),
            ViewOutcome::Cancelled => println!("{}", "İşlem iptal edildi".dimmed()),
            ViewOutcome::Refreshed | ViewOutcome::Reloaded | ViewOutcome::Failed(_) => {}
        }
    }

    view.close();
    info!("👋 Vista cerrada");
    Ok(())
}
