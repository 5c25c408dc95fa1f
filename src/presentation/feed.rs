// Event feed derivation - styled rows plus the traffic badge
use crate::domain::snapshot::{DashboardSnapshot, EventKind};

pub const EMPTY_FEED: &str = "현재 특이사항 없습니다.";
pub const SURGE_BADGE: &str = "물동량 급증";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct FeedRow {
    pub title: String,
    pub desc: String,
    pub tone: RowTone,
}

/// Rows in the order the server delivered them - the feed never re-sorts.
pub fn derive_rows(snapshot: &DashboardSnapshot) -> Vec<FeedRow> {
    snapshot
        .events
        .iter()
        .map(|e| FeedRow {
            title: e.title.clone(),
            desc: e.desc.clone(),
            tone: match e.kind {
                EventKind::Warning => RowTone::Warning,
                EventKind::Info => RowTone::Info,
            },
        })
        .collect()
}

/// Shown while traffic sits above the 1.0 baseline.
pub fn traffic_badge(snapshot: &DashboardSnapshot) -> Option<&'static str> {
    (snapshot.traffic_level > 1.0).then_some(SURGE_BADGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::FacilityEvent;

    #[test]
    fn test_rows_keep_server_order_and_tone() {
        let snapshot = DashboardSnapshot {
            events: vec![
                FacilityEvent {
                    title: "✅ 세일 종료".to_string(),
                    desc: "물동량 정상화".to_string(),
                    kind: EventKind::Info,
                },
                FacilityEvent {
                    title: "⚡ 깜짝 타임세일 시작!".to_string(),
                    desc: "주문량 300% 폭증 예상".to_string(),
                    kind: EventKind::Warning,
                },
            ],
            ..DashboardSnapshot::empty()
        };

        let rows = derive_rows(&snapshot);
        assert_eq!(rows[0].tone, RowTone::Info);
        assert_eq!(rows[1].tone, RowTone::Warning);
        assert_eq!(rows[1].title, "⚡ 깜짝 타임세일 시작!");
    }

    #[test]
    fn test_traffic_badge_only_above_baseline() {
        let mut snapshot = DashboardSnapshot::empty();
        assert!(traffic_badge(&snapshot).is_none());
        snapshot.traffic_level = 3.0;
        assert_eq!(traffic_badge(&snapshot), Some(SURGE_BADGE));
    }
}
