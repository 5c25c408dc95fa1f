// HTTP client for the facility backend
use crate::application::gateway::{ChatReply, DashboardGateway};
use crate::domain::snapshot::{
    DashboardSnapshot, EventKind, FacilityEvent, Graph, Link, Node, NodeGroup,
};
use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned status {status}")]
    BadStatus {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
}

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    base_url: String,
    client: reqwest::Client,
}

// Wire DTOs. Fields the backend may omit default to empty/None so a sparse
// payload still normalizes instead of failing the whole tick.
#[derive(Debug, Deserialize)]
struct RawDashboard {
    #[serde(default)]
    graph: RawGraph,
    #[serde(default)]
    events: Vec<RawEvent>,
    #[serde(default = "default_traffic")]
    traffic_level: f64,
}

fn default_traffic() -> f64 {
    1.0
}

#[derive(Debug, Deserialize, Default)]
struct RawGraph {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    battery: Option<f64>,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: String,
    target: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    title: String,
    #[serde(default)]
    desc: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct RawChatReply {
    reply: String,
    #[serde(default)]
    related_nodes: Vec<String>,
}

impl HttpDashboardApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn normalize(raw: RawDashboard) -> DashboardSnapshot {
        let nodes = raw
            .graph
            .nodes
            .into_iter()
            .map(|n| Node {
                label: n.label.unwrap_or_else(|| n.id.clone()),
                group: NodeGroup::from_wire(n.group.as_deref().unwrap_or("")),
                status: n.status,
                // The simulator decrements battery in fractional steps.
                battery: n.battery.map(|b| b.round() as i64),
                x: n.x,
                y: n.y,
                id: n.id,
            })
            .collect();

        let links = raw
            .graph
            .links
            .into_iter()
            .map(|l| Link {
                source: l.source,
                target: l.target,
                kind: l.kind.unwrap_or_default(),
            })
            .collect();

        let events = raw
            .events
            .into_iter()
            .map(|e| FacilityEvent {
                title: e.title,
                desc: e.desc,
                kind: EventKind::from_wire(e.kind.as_deref().unwrap_or("info")),
            })
            .collect();

        DashboardSnapshot {
            graph: Graph { nodes, links },
            events,
            traffic_level: raw.traffic_level,
        }
    }
}

#[async_trait]
impl DashboardGateway for HttpDashboardApi {
    async fn fetch_dashboard(&self) -> anyhow::Result<DashboardSnapshot> {
        let response = self
            .client
            .get(self.endpoint("/api/dashboard"))
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: "/api/dashboard",
                source,
            })?;

        if !response.status().is_success() {
            return Err(ApiError::BadStatus {
                endpoint: "/api/dashboard",
                status: response.status(),
            }
            .into());
        }

        let raw = response
            .json::<RawDashboard>()
            .await
            .context("Failed to parse dashboard payload")?;

        Ok(Self::normalize(raw))
    }

    async fn send_chat(&self, message: &str) -> anyhow::Result<ChatReply> {
        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                endpoint: "/api/chat",
                source,
            })?;

        if !response.status().is_success() {
            return Err(ApiError::BadStatus {
                endpoint: "/api/chat",
                status: response.status(),
            }
            .into());
        }

        let raw = response
            .json::<RawChatReply>()
            .await
            .context("Failed to parse chat reply")?;

        Ok(ChatReply {
            reply: raw.reply,
            related_nodes: raw.related_nodes,
        })
    }
}
