// Conversation session - serialized turn-taking with the control assistant
use crate::application::gateway::DashboardGateway;
use crate::application::highlight::HighlightCoordinator;
use crate::domain::conversation::{ConversationMessage, GREETING, TURN_FAILED};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Append-only message log plus single-flight turn-taking.
///
/// Only one conversational turn may be outstanding at a time; input arriving
/// while a turn is in flight is dropped, not queued. A failed turn never
/// reaches the caller as an error - it becomes a scripted assistant message
/// so the exchange stays intact.
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    gateway: Arc<dyn DashboardGateway>,
    highlights: HighlightCoordinator,
    messages: Mutex<Vec<ConversationMessage>>,
    in_flight: AtomicBool,
}

impl ChatSession {
    pub fn new(gateway: Arc<dyn DashboardGateway>, highlights: HighlightCoordinator) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                gateway,
                highlights,
                messages: Mutex::new(vec![ConversationMessage::assistant(GREETING)]),
                in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Send one user turn. Blank input and input arriving mid-turn are
    /// silently dropped. On a successful reply carrying related node ids the
    /// highlight coordinator is activated; an empty list leaves it untouched.
    pub async fn send(&self, text: &str) {
        let message = text.trim();
        if message.is_empty() {
            return;
        }
        if self
            .inner
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::debug!("turn already in flight, dropping input");
            return;
        }

        // Optimistic local echo before the request goes out.
        self.push(ConversationMessage::user(message));

        match self.inner.gateway.send_chat(message).await {
            Ok(reply) => {
                self.push(ConversationMessage::assistant(reply.reply));
                if !reply.related_nodes.is_empty() {
                    self.inner.highlights.activate(reply.related_nodes);
                }
            }
            Err(e) => {
                tracing::warn!("chat turn failed: {:#}", e);
                self.push(ConversationMessage::assistant(TURN_FAILED));
            }
        }

        self.inner.in_flight.store(false, Ordering::SeqCst);
    }

    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.inner.messages.lock().unwrap().clone()
    }

    pub fn last_assistant_text(&self) -> Option<String> {
        self.inner
            .messages
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|m| m.role == crate::domain::conversation::Role::Assistant)
            .map(|m| m.text.clone())
    }

    fn push(&self, message: ConversationMessage) {
        self.inner.messages.lock().unwrap().push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::gateway::ChatReply;
    use crate::domain::conversation::Role;
    use crate::domain::snapshot::DashboardSnapshot;
    use async_trait::async_trait;
    use tokio::time::Duration;

    struct ScriptedGateway {
        reply: ChatReply,
        fail: bool,
        delay: Duration,
    }

    impl ScriptedGateway {
        fn replying(reply: &str, related: &[&str]) -> Self {
            Self {
                reply: ChatReply {
                    reply: reply.to_string(),
                    related_nodes: related.iter().map(|s| s.to_string()).collect(),
                },
                fail: false,
                delay: Duration::ZERO,
            }
        }

        fn failing() -> Self {
            Self {
                reply: ChatReply {
                    reply: String::new(),
                    related_nodes: vec![],
                },
                fail: true,
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait]
    impl DashboardGateway for ScriptedGateway {
        async fn fetch_dashboard(&self) -> anyhow::Result<DashboardSnapshot> {
            Ok(DashboardSnapshot::empty())
        }

        async fn send_chat(&self, _message: &str) -> anyhow::Result<ChatReply> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                anyhow::bail!("upstream unavailable");
            }
            Ok(self.reply.clone())
        }
    }

    fn session(gateway: ScriptedGateway) -> (ChatSession, HighlightCoordinator) {
        let highlights = HighlightCoordinator::new();
        (
            ChatSession::new(Arc::new(gateway), highlights.clone()),
            highlights,
        )
    }

    #[tokio::test]
    async fn test_starts_with_greeting() {
        let (session, _) = session(ScriptedGateway::replying("ok", &[]));
        let log = session.messages();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].role, Role::Assistant);
        assert_eq!(log[0].text, GREETING);
    }

    #[tokio::test]
    async fn test_blank_input_leaves_log_unchanged() {
        let (session, _) = session(ScriptedGateway::replying("ok", &[]));
        session.send("").await;
        session.send("   ").await;
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_reply_with_related_nodes_activates_highlight() {
        let (session, highlights) =
            session(ScriptedGateway::replying("3호기는 정상입니다", &["agv3"]));
        session.send("3호기 상태?").await;

        let log = session.messages();
        assert_eq!(log.len(), 3);
        assert_eq!(log[1], ConversationMessage::user("3호기 상태?"));
        assert_eq!(log[2], ConversationMessage::assistant("3호기는 정상입니다"));

        let set = highlights.current();
        assert!(set.contains("agv3"));
        assert!(set.expires_at().is_some());
    }

    #[tokio::test]
    async fn test_empty_related_nodes_leaves_highlight_untouched() {
        let (session, highlights) = session(ScriptedGateway::replying("ok", &[]));
        highlights.activate(vec!["zone1".into()]);

        session.send("status?").await;

        assert!(highlights.current().contains("zone1"));
    }

    #[tokio::test]
    async fn test_failed_turn_becomes_scripted_message() {
        let (session, highlights) = session(ScriptedGateway::failing());
        session.send("상태 알려줘").await;

        let log = session.messages();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2], ConversationMessage::assistant(TURN_FAILED));
        assert!(highlights.current().is_empty());

        // The single-flight lock was released: the next turn still fails
        // over to the scripted message instead of being dropped.
        session.send("다시").await;
        assert_eq!(session.messages().len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_send_is_dropped_not_queued() {
        let (session, _) = session(ScriptedGateway {
            reply: ChatReply {
                reply: "done".to_string(),
                related_nodes: vec![],
            },
            fail: false,
            delay: Duration::from_millis(500),
        });

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.send("first").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.send("second").await;
        first.await.unwrap();

        let log = session.messages();
        // Greeting + first's user/assistant pair; "second" never entered.
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|m| m.text != "second"));
    }
}
