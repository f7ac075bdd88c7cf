//! Coalescing of rapid URL edits.
//!
//! Typing into a source node's URL field produces one edit per keystroke.
//! [`UrlEditDebouncer`] keeps only the latest value per node and releases it
//! once the node has been quiet for the configured delay, so the graph sees a
//! single `UpdateSourceUrl` per settled edit.

/// An edit waiting for its quiet period to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUrlEdit {
    pub node_id: String,
    pub url: String,
    /// Clock reading (ms) at which the edit becomes due.
    pub due_at: i64,
}

/// Per-node latest-value-wins debouncer driven by an external clock.
///
/// Not thread-safe; owned by the single editor session.
#[derive(Debug, Clone)]
pub struct UrlEditDebouncer {
    delay_ms: i64,
    pending: Vec<PendingUrlEdit>,
}

impl UrlEditDebouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms: i64::try_from(delay_ms).unwrap_or(i64::MAX),
            pending: Vec::new(),
        }
    }

    /// Record an edit. A pending edit for the same node is superseded and its
    /// timer restarts.
    pub fn push(&mut self, node_id: &str, url: impl Into<String>, now: i64) {
        let due_at = now.saturating_add(self.delay_ms);
        let url = url.into();
        match self.pending.iter_mut().find(|p| p.node_id == node_id) {
            Some(existing) => {
                existing.url = url;
                existing.due_at = due_at;
            }
            None => self.pending.push(PendingUrlEdit {
                node_id: node_id.to_string(),
                url,
                due_at,
            }),
        }
    }

    /// Remove and return every edit due at `now`, earliest first.
    pub fn drain_due(&mut self, now: i64) -> Vec<PendingUrlEdit> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|p| p.due_at <= now);
        self.pending = waiting;
        due.sort_by_key(|p| p.due_at);
        due
    }

    /// Remove and return every pending edit regardless of its timer.
    pub fn flush(&mut self) -> Vec<PendingUrlEdit> {
        let mut all = std::mem::take(&mut self.pending);
        all.sort_by_key(|p| p.due_at);
        all
    }

    /// Drop the pending edit for `node_id`, if any.
    pub fn cancel(&mut self, node_id: &str) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.node_id != node_id);
        self.pending.len() != before
    }

    /// Earliest due time among pending edits.
    pub fn next_due(&self) -> Option<i64> {
        self.pending.iter().map(|p| p.due_at).min()
    }

    pub fn pending(&self, node_id: &str) -> Option<&PendingUrlEdit> {
        self.pending.iter().find(|p| p.node_id == node_id)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_delay() {
        let mut debouncer = UrlEditDebouncer::new(300);
        debouncer.push("s1", "https://x", 1_000);
        assert!(debouncer.drain_due(1_299).is_empty());
        assert_eq!(debouncer.len(), 1);
    }

    #[test]
    fn test_due_after_delay() {
        let mut debouncer = UrlEditDebouncer::new(300);
        debouncer.push("s1", "https://x", 1_000);
        let due = debouncer.drain_due(1_300);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].url, "https://x");
        assert!(debouncer.is_empty());
    }

    #[test]
    fn test_latest_value_wins_and_timer_restarts() {
        let mut debouncer = UrlEditDebouncer::new(300);
        debouncer.push("s1", "h", 0);
        debouncer.push("s1", "ht", 100);
        debouncer.push("s1", "https://x/final", 250);

        assert!(debouncer.drain_due(300).is_empty());
        let due = debouncer.drain_due(550);
        assert_eq!(
            due,
            vec![PendingUrlEdit {
                node_id: "s1".into(),
                url: "https://x/final".into(),
                due_at: 550,
            }]
        );
    }

    #[test]
    fn test_nodes_debounce_independently() {
        let mut debouncer = UrlEditDebouncer::new(300);
        debouncer.push("s2", "b", 50);
        debouncer.push("s1", "a", 0);
        assert_eq!(debouncer.next_due(), Some(300));

        let due = debouncer.drain_due(400);
        let order: Vec<_> = due.iter().map(|p| p.node_id.as_str()).collect();
        assert_eq!(order, vec!["s1", "s2"]);
    }

    #[test]
    fn test_flush_and_cancel() {
        let mut debouncer = UrlEditDebouncer::new(300);
        debouncer.push("s1", "a", 0);
        debouncer.push("s2", "b", 0);
        assert!(debouncer.cancel("s1"));
        assert!(!debouncer.cancel("s1"));
        assert_eq!(debouncer.pending("s2").map(|p| p.url.as_str()), Some("b"));

        let all = debouncer.flush();
        assert_eq!(all.len(), 1);
        assert!(debouncer.is_empty());
        assert_eq!(debouncer.next_due(), None);
    }
}
