//! Editing session sitting between the host UI and the graph core.
//!
//! [`WorkflowEditor`] owns the current snapshot and routes every edit through
//! the mutator. After an accepted edit it publishes the snapshot (persist +
//! re-project) unless a node is mid-drag, in which case transient positions
//! are held back until the drag settles.

use crate::core::config::EditorConfig;
use crate::core::debounce::{PendingUrlEdit, UrlEditDebouncer};
use crate::core::runtime_context::RuntimeContext;
use crate::core::store::SnapshotStore;
use crate::graph::{apply_mutation, is_valid_connection, Connection, Graph, GraphMutation};
use crate::projection::{get_ordered_source_layer_pairs, SourceLayerPair};
use crate::snapshot::{load_snapshot, to_json};

pub struct WorkflowEditor<S: SnapshotStore> {
    graph: Graph,
    pairs: Vec<SourceLayerPair>,
    context: RuntimeContext,
    config: EditorConfig,
    debouncer: UrlEditDebouncer,
    store: S,
}

impl<S: SnapshotStore> WorkflowEditor<S> {
    /// Hydrate from `store` and publish the resulting snapshot.
    ///
    /// Missing or malformed stored data starts an empty graph, which is then
    /// written back so the store always holds a well-formed snapshot.
    pub fn open(store: S, config: EditorConfig, context: RuntimeContext) -> Self {
        let raw = match store.load(&config.snapshot_key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    key = %config.snapshot_key,
                    error = %e,
                    "snapshot load failed, starting empty"
                );
                None
            }
        };
        let mut graph = load_snapshot(raw.as_deref());
        for node in &mut graph.nodes {
            node.dragging = false;
        }
        tracing::info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "workflow editor opened"
        );

        let mut editor = Self {
            graph,
            pairs: Vec::new(),
            debouncer: UrlEditDebouncer::new(config.url_debounce_ms),
            context,
            config,
            store,
        };
        editor.publish();
        editor
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Pairs of the last published (settled) snapshot.
    pub fn pairs(&self) -> &[SourceLayerPair] {
        &self.pairs
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Hover-time check for an in-progress connection drag.
    pub fn is_valid_connection(&self, connection: &Connection) -> bool {
        is_valid_connection(&self.graph, connection)
    }

    /// Apply an edit. Returns `false` if it was a no-op, in which case
    /// nothing is published.
    pub fn apply(&mut self, mutation: GraphMutation) -> bool {
        if let GraphMutation::RemoveNode { node_id } = &mutation {
            self.debouncer.cancel(node_id);
        }
        match apply_mutation(&self.graph, &mutation, self.context.id_generator.as_ref()) {
            Some(next) => {
                self.graph = next;
                self.publish();
                true
            }
            None => false,
        }
    }

    /// Queue a URL edit. It reaches the graph on the first [`tick`](Self::tick)
    /// after the node has been quiet for `url_debounce_ms`.
    ///
    /// Retyping the committed value with nothing pending is ignored.
    pub fn edit_source_url(&mut self, node_id: &str, url: impl Into<String>) {
        let url = url.into();
        let unchanged = self.graph.node(node_id).and_then(|n| n.url()) == Some(url.as_str());
        if unchanged && self.debouncer.pending(node_id).is_none() {
            return;
        }
        let now = self.context.time_provider.now_millis();
        self.debouncer.push(node_id, url, now);
    }

    /// Clock reading at which the next queued URL edit becomes due.
    pub fn next_commit_due(&self) -> Option<i64> {
        self.debouncer.next_due()
    }

    /// Commit URL edits whose quiet period has elapsed. Returns how many
    /// changed the graph.
    pub fn tick(&mut self) -> usize {
        let now = self.context.time_provider.now_millis();
        if !matches!(self.debouncer.next_due(), Some(due) if due <= now) {
            return 0;
        }
        let due = self.debouncer.drain_due(now);
        self.commit_url_edits(due)
    }

    /// Commit every queued URL edit immediately.
    pub fn flush_pending_edits(&mut self) -> usize {
        let all = self.debouncer.flush();
        self.commit_url_edits(all)
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.debouncer.is_empty()
    }

    fn commit_url_edits(&mut self, edits: Vec<PendingUrlEdit>) -> usize {
        edits
            .into_iter()
            .filter(|edit| {
                self.apply(GraphMutation::UpdateSourceUrl {
                    node_id: edit.node_id.clone(),
                    url: edit.url.clone(),
                })
            })
            .count()
    }

    fn publish(&mut self) {
        if !self.graph.is_settled() {
            tracing::debug!("node drag in progress, snapshot not published");
            return;
        }

        self.pairs = get_ordered_source_layer_pairs(&self.graph);

        let raw = match to_json(&self.graph) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot serialization failed");
                return;
            }
        };
        if let Err(e) = self.store.save(&self.config.snapshot_key, &raw) {
            tracing::warn!(key = %self.config.snapshot_key, error = %e, "snapshot save failed");
            return;
        }
        tracing::debug!(pairs = self.pairs.len(), "snapshot published");
    }
}
