// Main entry point - Dependency injection and the operator console loop
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::application::chat::ChatSession;
use crate::application::fetcher::SnapshotFetcher;
use crate::application::highlight::HighlightCoordinator;
use crate::application::view_model::ViewModelStore;
use crate::infrastructure::api_client::HttpDashboardApi;
use crate::infrastructure::config::load_app_config;
use crate::presentation::feed::{derive_rows, traffic_badge, RowTone, EMPTY_FEED};
use crate::presentation::flow::{derive_markers, Station};
use crate::presentation::graph::{derive_scene, drive_camera, GraphRenderer};

/// Stand-in for the force-layout renderer: camera instructions land in the
/// log instead of a canvas.
struct LoggingRenderer;

impl GraphRenderer for LoggingRenderer {
    fn center_at(&mut self, x: f64, y: f64, duration_ms: u64) {
        tracing::info!("camera center ({x:.0}, {y:.0}) over {duration_ms}ms");
    }

    fn zoom(&mut self, scale: f64, duration_ms: u64) {
        tracing::info!("camera zoom x{scale} over {duration_ms}ms");
    }
}

// Cooperative single-threaded scheduling: every tick, timer and turn is a
// task on one loop.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_app_config()?;
    tracing::info!("facility backend: {}", config.api.base_url);

    let gateway = Arc::new(HttpDashboardApi::new(config.api.base_url));
    let store = ViewModelStore::new();
    let highlights = HighlightCoordinator::new();
    let session = ChatSession::new(gateway.clone(), highlights.clone());

    let fetcher = SnapshotFetcher::new(gateway, store.clone()).spawn();
    let camera = drive_camera(store.clone(), highlights.clone(), LoggingRenderer);

    println!("{}", Station::ALL.map(|s| s.label()).join(" → "));
    for message in session.messages() {
        println!("[AI] {}", message.text);
    }

    let mut snapshots = store.subscribe();
    let mut seen_events = 0usize;
    let mut greeted_feed = false;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();

                let rows = derive_rows(&snapshot);
                if rows.is_empty() && !greeted_feed {
                    println!("{EMPTY_FEED}");
                }
                greeted_feed = true;
                // Events arrive most-recent-first; the new ones are up front.
                for row in rows.iter().take(rows.len().saturating_sub(seen_events)) {
                    let tone = match row.tone {
                        RowTone::Warning => "경고",
                        RowTone::Info => "안내",
                    };
                    println!("[{tone}] {} - {}", row.title, row.desc);
                }
                seen_events = rows.len();
                if let Some(badge) = traffic_badge(&snapshot) {
                    tracing::debug!("{badge} (x{:.1})", snapshot.traffic_level);
                }

                let scene = derive_scene(&snapshot, &highlights.current());
                let markers = derive_markers(&snapshot);
                tracing::trace!(
                    "{} nodes / {} links on graph, {} AGV markers on lane",
                    scene.nodes.len(),
                    scene.links.len(),
                    markers.len()
                );
                for marker in &markers {
                    tracing::trace!("{} @ {}", marker.label, marker.station.label());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                session.send(&line).await;
                if let Some(reply) = session.last_assistant_text() {
                    println!("[AI] {reply}");
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    // Teardown: no orphaned timers acting on stale state.
    fetcher.abort();
    camera.abort();
    highlights.shutdown();

    Ok(())
}
