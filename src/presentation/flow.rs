// Flow lane derivation - AGV markers along the fixed station line
use crate::domain::snapshot::{DashboardSnapshot, Node, NodeGroup};

pub const LOW_BATTERY_THRESHOLD: i64 = 20;

/// The four fixed stations of the flow lane, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Station {
    Inbound,
    Storage,
    Packing,
    Outbound,
}

impl Station {
    /// Horizontal offset as a fraction of the lane width.
    pub fn offset(self) -> f64 {
        match self {
            Station::Inbound => 0.10,
            Station::Storage => 0.35,
            Station::Packing => 0.60,
            Station::Outbound => 0.85,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Station::Inbound => "입고",
            Station::Storage => "보관",
            Station::Packing => "분류/포장",
            Station::Outbound => "출고",
        }
    }

    pub const ALL: [Station; 4] = [
        Station::Inbound,
        Station::Storage,
        Station::Packing,
        Station::Outbound,
    ];

    fn from_zone(zone_id: &str) -> Option<Station> {
        match zone_id {
            "Inbound" => Some(Station::Inbound),
            "Storage_A" | "Storage_B" => Some(Station::Storage),
            "Packing" => Some(Station::Packing),
            "Outbound" => Some(Station::Outbound),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Normal,
    LowBattery,
}

#[derive(Debug, Clone)]
pub struct AgvMarker {
    pub id: String,
    pub label: String,
    pub station: Station,
    pub style: MarkerStyle,
}

/// Station resolution, deterministic in (zone, status):
/// idle agents wait at Inbound, unloading agents sit at Outbound, everything
/// else stands at the zone its LOCATED_AT link points to. An AGV with no
/// resolvable zone parks at Inbound.
fn station_for(agv: &Node, snapshot: &DashboardSnapshot) -> Station {
    match agv.status.as_deref() {
        Some("IDLE") => return Station::Inbound,
        Some("Unloading...") => return Station::Outbound,
        _ => {}
    }

    snapshot
        .graph
        .links
        .iter()
        .filter(|l| l.kind == "LOCATED_AT" && l.source == agv.id)
        .find_map(|l| Station::from_zone(&l.target))
        .unwrap_or(Station::Inbound)
}

pub fn derive_markers(snapshot: &DashboardSnapshot) -> Vec<AgvMarker> {
    snapshot
        .graph
        .nodes
        .iter()
        .filter(|n| n.group == NodeGroup::Agv)
        .map(|n| AgvMarker {
            id: n.id.clone(),
            label: n.label.clone(),
            station: station_for(n, snapshot),
            style: match n.battery {
                Some(b) if b < LOW_BATTERY_THRESHOLD => MarkerStyle::LowBattery,
                _ => MarkerStyle::Normal,
            },
        })
        .collect()
}
