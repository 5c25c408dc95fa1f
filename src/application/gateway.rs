// Gateway trait for the remote facility backend
use crate::domain::snapshot::DashboardSnapshot;
use async_trait::async_trait;

/// One assistant turn as returned by the backend.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub related_nodes: Vec<String>,
}

#[async_trait]
pub trait DashboardGateway: Send + Sync {
    /// Pull one full snapshot of facility state.
    async fn fetch_dashboard(&self) -> anyhow::Result<DashboardSnapshot>;

    /// Send one conversational turn. Only the latest user message travels;
    /// any context/history use is the remote side's concern.
    async fn send_chat(&self, message: &str) -> anyhow::Result<ChatReply>;
}
