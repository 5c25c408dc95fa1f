// Graph scene derivation - colors, links, camera focus
use crate::application::highlight::HighlightCoordinator;
use crate::application::view_model::ViewModelStore;
use crate::domain::highlight::HighlightSet;
use crate::domain::snapshot::{DashboardSnapshot, NodeGroup};
use tokio::task::JoinHandle;

pub const HIGHLIGHT_COLOR: &str = "#EF4444";
pub const ZONE_COLOR: &str = "#E5E7EB";
pub const AGV_COLOR: &str = "#3B82F6";
pub const DEFAULT_COLOR: &str = "#9CA3AF";
pub const LINK_COLOR: &str = "#F3F4F6";

pub const FOCUS_ZOOM: f64 = 2.5;
pub const CENTER_MS: u64 = 1000;
pub const ZOOM_MS: u64 = 2000;

/// Render-ready node: id/label plus the resolved color.
#[derive(Debug, Clone)]
pub struct PaintedNode {
    pub id: String,
    pub label: String,
    pub color: &'static str,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct PaintedLink {
    pub source: String,
    pub target: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct GraphScene {
    pub nodes: Vec<PaintedNode>,
    pub links: Vec<PaintedLink>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFocus {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// The force-layout renderer, an external collaborator. It owns positions
/// and motion; this layer only hands it scenes and camera instructions.
pub trait GraphRenderer: Send {
    fn center_at(&mut self, x: f64, y: f64, duration_ms: u64);
    fn zoom(&mut self, scale: f64, duration_ms: u64);
}

/// Color precedence: highlighted beats group coloring, Zone and AGV beat the
/// generic fallback.
pub fn node_color(group: &NodeGroup, id: &str, highlights: &HighlightSet) -> &'static str {
    if highlights.contains(id) {
        return HIGHLIGHT_COLOR;
    }
    match group {
        NodeGroup::Zone => ZONE_COLOR,
        NodeGroup::Agv => AGV_COLOR,
        NodeGroup::Other(_) => DEFAULT_COLOR,
    }
}

/// Pure derivation of the full scene. A highlighted id missing from the
/// snapshot simply paints nothing extra.
pub fn derive_scene(snapshot: &DashboardSnapshot, highlights: &HighlightSet) -> GraphScene {
    let nodes = snapshot
        .graph
        .nodes
        .iter()
        .map(|n| PaintedNode {
            id: n.id.clone(),
            label: n.label.clone(),
            color: node_color(&n.group, &n.id, highlights),
            x: n.x,
            y: n.y,
        })
        .collect();

    let links = snapshot
        .graph
        .links
        .iter()
        .map(|l| PaintedLink {
            source: l.source.clone(),
            target: l.target.clone(),
            color: LINK_COLOR,
        })
        .collect();

    GraphScene { nodes, links }
}

/// Where the camera should travel when a highlight lands: the first
/// highlighted node that exists in the snapshot and carries coordinates.
/// An empty set yields no focus (the camera is never auto-reset).
pub fn focus_target(snapshot: &DashboardSnapshot, highlights: &HighlightSet) -> Option<CameraFocus> {
    highlights.ids().iter().find_map(|id| {
        let node = snapshot.graph.find_node(id)?;
        match (node.x, node.y) {
            (Some(x), Some(y)) => Some(CameraFocus {
                x,
                y,
                zoom: FOCUS_ZOOM,
            }),
            _ => None,
        }
    })
}

/// Watches highlight transitions and steers the renderer on Idle -> Active.
/// Runs until the returned handle is aborted.
pub fn drive_camera(
    store: ViewModelStore,
    highlights: HighlightCoordinator,
    mut renderer: impl GraphRenderer + 'static,
) -> JoinHandle<()> {
    let mut rx = highlights.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let set = rx.borrow_and_update().clone();
            if set.is_empty() {
                continue;
            }
            if let Some(focus) = focus_target(&store.current(), &set) {
                renderer.center_at(focus.x, focus.y, CENTER_MS);
                renderer.zoom(focus.zoom, ZOOM_MS);
            }
        }
    })
}
