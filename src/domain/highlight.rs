// Highlight domain model
use tokio::time::Instant;

/// Ephemeral attention set pointed at by the assistant.
///
/// Invariant: non-empty `ids` implies a future `expires_at`; when the
/// deadline passes both fields reset together. Ids keep activation order
/// (deduplicated) so "the first highlighted node" is deterministic.
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    ids: Vec<String>,
    expires_at: Option<Instant>,
}

impl HighlightSet {
    pub fn active(ids: Vec<String>, expires_at: Instant) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(ids.len());
        for id in ids {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        Self {
            ids: deduped,
            expires_at: Some(expires_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Duration;

    #[tokio::test]
    async fn test_activation_order_preserved_and_deduped() {
        let deadline = Instant::now() + Duration::from_secs(5);
        let set = HighlightSet::active(
            vec!["b".into(), "a".into(), "b".into()],
            deadline,
        );
        assert_eq!(set.ids(), ["b".to_string(), "a".to_string()]);
        assert!(set.contains("a"));
        assert!(!set.contains("c"));
        assert_eq!(set.expires_at(), Some(deadline));
    }

    #[test]
    fn test_default_is_idle() {
        let set = HighlightSet::default();
        assert!(set.is_empty());
        assert!(set.expires_at().is_none());
    }
}
