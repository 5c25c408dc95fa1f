// Facility snapshot domain model

/// Full dashboard state as delivered by one poll cycle.
/// Replaced wholesale on every successful fetch - never merged or diffed.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub graph: Graph,
    pub events: Vec<FacilityEvent>,
    pub traffic_level: f64,
}

impl DashboardSnapshot {
    /// Pre-first-fetch state: empty graph, no events, baseline traffic.
    pub fn empty() -> Self {
        Self {
            graph: Graph::default(),
            events: Vec::new(),
            traffic_level: 1.0,
        }
    }
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub group: NodeGroup,
    pub status: Option<String>,
    pub battery: Option<i64>,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeGroup {
    Zone,
    Agv,
    /// Other facility entity kinds (orders, injected events, ...).
    Other(String),
}

impl NodeGroup {
    pub fn from_wire(group: &str) -> Self {
        match group {
            "Zone" => NodeGroup::Zone,
            "AGV" => NodeGroup::Agv,
            other => NodeGroup::Other(other.to_string()),
        }
    }
}

/// Directed edge between two nodes, consumed by the graph renderer only.
/// Kinds observed on the wire: CONNECTED_TO, LOCATED_AT, IMPACTS.
#[derive(Debug, Clone)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub kind: String,
}

#[derive(Debug, Clone)]
pub struct FacilityEvent {
    pub title: String,
    pub desc: String,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Info,
    Warning,
}

impl EventKind {
    pub fn from_wire(kind: &str) -> Self {
        match kind {
            "warning" => EventKind::Warning,
            _ => EventKind::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_group_from_wire() {
        assert_eq!(NodeGroup::from_wire("Zone"), NodeGroup::Zone);
        assert_eq!(NodeGroup::from_wire("AGV"), NodeGroup::Agv);
        assert_eq!(
            NodeGroup::from_wire("Order"),
            NodeGroup::Other("Order".to_string())
        );
    }

    #[test]
    fn test_event_kind_defaults_to_info() {
        assert_eq!(EventKind::from_wire("warning"), EventKind::Warning);
        assert_eq!(EventKind::from_wire("info"), EventKind::Info);
        assert_eq!(EventKind::from_wire("unknown"), EventKind::Info);
    }

    #[test]
    fn test_empty_snapshot_baseline() {
        let snapshot = DashboardSnapshot::empty();
        assert!(snapshot.graph.nodes.is_empty());
        assert!(snapshot.events.is_empty());
        assert_eq!(snapshot.traffic_level, 1.0);
    }
}
