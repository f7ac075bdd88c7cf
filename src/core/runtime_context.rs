use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Runtime collaborators injected into the editor: a clock and an id source.
#[derive(Clone)]
pub struct RuntimeContext {
    pub time_provider: Arc<dyn TimeProvider>,
    pub id_generator: Arc<dyn IdGenerator>,
}

impl Default for RuntimeContext {
    fn default() -> Self {
        Self {
            time_provider: Arc::new(RealTimeProvider),
            id_generator: Arc::new(RealIdGenerator),
        }
    }
}

impl RuntimeContext {
    pub fn new(time_provider: Arc<dyn TimeProvider>, id_generator: Arc<dyn IdGenerator>) -> Self {
        Self {
            time_provider,
            id_generator,
        }
    }
}

pub trait TimeProvider: Send + Sync {
    fn now_millis(&self) -> i64;
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Length of the random suffix produced by [`RealIdGenerator`].
pub const ID_SUFFIX_LEN: usize = 12;

// --- Real implementations ---

pub struct RealTimeProvider;

impl TimeProvider for RealTimeProvider {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }
}

/// Random 12-character lowercase hex ids.
pub struct RealIdGenerator;

impl IdGenerator for RealIdGenerator {
    fn next_id(&self) -> String {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(ID_SUFFIX_LEN);
        id
    }
}

// --- Fake implementations ---

/// Manually advanced clock for tests.
pub struct FakeTimeProvider {
    now: AtomicI64,
}

impl FakeTimeProvider {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl TimeProvider for FakeTimeProvider {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub struct FakeIdGenerator {
    pub prefix: String,
    pub counter: AtomicU64,
}

impl FakeIdGenerator {
    pub fn new(prefix: String) -> Self {
        Self {
            prefix,
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for FakeIdGenerator {
    fn next_id(&self) -> String {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, id)
    }
}
