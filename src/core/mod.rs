//! Editor boundary: injected collaborators, configuration, URL-edit
//! debouncing, snapshot storage and the [`WorkflowEditor`] session.

pub mod config;
pub mod debounce;
pub mod editor;
pub mod runtime_context;
pub mod store;

pub use config::EditorConfig;
pub use debounce::{PendingUrlEdit, UrlEditDebouncer};
pub use editor::WorkflowEditor;
pub use runtime_context::{
    FakeIdGenerator, FakeTimeProvider, IdGenerator, RealIdGenerator, RealTimeProvider,
    RuntimeContext, TimeProvider,
};
pub use store::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
