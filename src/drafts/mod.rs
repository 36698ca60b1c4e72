//! Draft store
//!
//! A [`DraftStore`] keeps a bounded, newest-first collection of [`Draft`]s for one
//! namespace key and mirrors every change into an injected [`StorageBackend`].
//!
//! Persistence is best effort. Read faults and corrupted data fall back to an
//! empty collection, write faults (quota, I/O) are logged and remembered as the
//! store's last persistence error, and the in-memory state stays authoritative.
//! None of the core operations return an error to the caller.
//!
//! # Example
//! ```rust,no_run
//! use medfind_drafts::drafts::{DraftKind, DraftStore, DraftStoreOptions};
//! use medfind_drafts::storage::MemoryStorage;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let storage = Arc::new(MemoryStorage::new());
//! let store = DraftStore::open(storage, "reports", DraftStoreOptions::default()).await;
//!
//! let id = store.save(json!({"medicine": "amoxicillin"}), DraftKind::Report, Some("Amoxicillin".into())).await;
//! assert_eq!(store.load(&id).await, Some(json!({"medicine": "amoxicillin"})));
//! # }
//! ```

mod autosave;
mod error;
mod model;
mod transfer;

pub use error::DraftError;
pub use model::{generate_draft_id, is_valid_draft_id, Draft, DraftId, DraftKind};
pub use transfer::{export_file_name, parse_import, ExportBlob};

use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::constants::{
    AUTOSAVE_INTERVAL_MIN_SECS, DEFAULT_AUTOSAVE_INTERVAL_SECS, DEFAULT_MAX_DRAFTS, MAX_DRAFT_TIMESTAMP,
};
use crate::storage::StorageBackend;
use crate::utils::datetime;
use autosave::AutosaveTask;

/// Tuning knobs for a [`DraftStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStoreOptions {
    /// Maximum number of drafts kept; values below 1 are treated as 1
    pub max_drafts: usize,
    /// Start the autosave task when the store is opened
    pub autosave_enabled: bool,
    /// Autosave cadence; values below one second are treated as one second
    pub autosave_interval: Duration,
}

impl Default for DraftStoreOptions {
    fn default() -> Self {
        Self {
            max_drafts: DEFAULT_MAX_DRAFTS,
            autosave_enabled: true,
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL_SECS),
        }
    }
}

/// Read-only diagnostic about the stored collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageInfo {
    pub count: usize,
    /// Size of the serialized collection in bytes
    pub size_bytes: usize,
    pub oldest: Option<i64>,
    pub newest: Option<i64>,
}

#[derive(Debug, Default)]
struct DraftState {
    drafts: Vec<Draft>,
    current: Option<DraftId>,
    last_persist_error: Option<String>,
}

impl DraftState {
    fn position(&self, id: &str) -> Option<usize> {
        self.drafts.iter().position(|d| d.id == id)
    }

    fn current_index(&self) -> Option<usize> {
        self.current.as_deref().and_then(|id| self.position(id))
    }
}

/// State shared between the store handle and its autosave task.
pub(crate) struct StoreInner {
    namespace: String,
    storage: Arc<dyn StorageBackend>,
    state: Mutex<DraftState>,
}

impl StoreInner {
    /// Write the collection to storage. Returns `false` if the write was skipped.
    async fn persist(&self, state: &mut DraftState) -> bool {
        let serialized = match serde_json::to_string(&state.drafts) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize drafts for '{}': {}", self.namespace, e);
                state.last_persist_error = Some(e.to_string());
                return false;
            }
        };

        match self.storage.set(&self.namespace, &serialized).await {
            Ok(()) => {
                state.last_persist_error = None;
                true
            }
            Err(e) => {
                warn!(
                    "Failed to write drafts for '{}' to {} storage: {}",
                    self.namespace,
                    self.storage.name(),
                    e
                );
                state.last_persist_error = Some(e.to_string());
                false
            }
        }
    }

    /// Re-save the current draft with a fresh timestamp.
    ///
    /// Returns `false` without touching storage when no draft is current.
    async fn refresh_current(&self) -> bool {
        let mut state = self.state.lock().await;
        let Some(index) = state.current_index() else {
            return false;
        };

        let draft = &mut state.drafts[index];
        draft.timestamp = next_timestamp(draft.timestamp);
        self.persist(&mut state).await
    }
}

/// Current time, forced strictly past `previous` while it can still advance.
fn next_timestamp(previous: i64) -> i64 {
    datetime::now_millis().max(previous.saturating_add(1)).min(MAX_DRAFT_TIMESTAMP)
}

/// Raise `interval` to the minimum autosave cadence.
fn clamp_autosave_interval(interval: Duration) -> Duration {
    let min = Duration::from_secs(AUTOSAVE_INTERVAL_MIN_SECS);
    if interval < min {
        warn!("Autosave interval {:?} is below the minimum, using {:?}", interval, min);
        min
    } else {
        interval
    }
}

/// Read the persisted collection, falling back to empty on any fault.
async fn read_collection(storage: &dyn StorageBackend, namespace: &str, max_drafts: usize) -> Vec<Draft> {
    let raw = match storage.get(namespace).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!("Failed to read drafts for '{}': {}", namespace, e);
            return Vec::new();
        }
    };

    let parsed = serde_json::from_str::<Vec<Draft>>(&raw)
        .map_err(DraftError::InvalidRecord)
        .and_then(|drafts| transfer::check_collection(&drafts).map(|()| drafts));

    match parsed {
        Ok(mut drafts) => {
            drafts.truncate(max_drafts);
            drafts
        }
        Err(e) => {
            warn!("Stored drafts for '{}' are corrupted, starting empty: {}", namespace, e);
            Vec::new()
        }
    }
}

/// Bounded collection of drafts persisted under one namespace key.
pub struct DraftStore {
    inner: Arc<StoreInner>,
    max_drafts: usize,
    autosave_interval: Duration,
    autosave: Option<AutosaveTask>,
}

impl DraftStore {
    /// Open the store for `namespace`, loading whatever is persisted.
    ///
    /// Starts the autosave task when `options.autosave_enabled` is set, which
    /// requires a running tokio runtime.
    pub async fn open(storage: Arc<dyn StorageBackend>, namespace: impl Into<String>, options: DraftStoreOptions) -> Self {
        let namespace = namespace.into();
        let max_drafts = options.max_drafts.max(1);
        let drafts = read_collection(storage.as_ref(), &namespace, max_drafts).await;

        info!(
            "Opened draft store '{}' on {} storage with {} drafts",
            namespace,
            storage.name(),
            drafts.len()
        );

        let inner = Arc::new(StoreInner {
            namespace,
            storage,
            state: Mutex::new(DraftState {
                drafts,
                ..DraftState::default()
            }),
        });

        let mut store = Self {
            inner,
            max_drafts,
            autosave_interval: clamp_autosave_interval(options.autosave_interval),
            autosave: None,
        };

        if options.autosave_enabled {
            store.enable_autosave();
        }

        store
    }

    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    pub fn max_drafts(&self) -> usize {
        self.max_drafts
    }

    /// Create a draft, make it current and persist the collection.
    ///
    /// The oldest drafts are evicted once the collection exceeds `max_drafts`.
    pub async fn save(&self, data: Value, kind: DraftKind, title: Option<String>) -> DraftId {
        let mut state = self.inner.state.lock().await;

        let timestamp = datetime::now_millis();
        let mut id = generate_draft_id(timestamp);
        while state.position(&id).is_some() {
            id = generate_draft_id(timestamp);
        }

        state.drafts.insert(0, Draft::new(id.clone(), timestamp, data, kind, title));
        if state.drafts.len() > self.max_drafts {
            let evicted = state.drafts.len() - self.max_drafts;
            state.drafts.truncate(self.max_drafts);
            debug!("Evicted {} oldest drafts from '{}'", evicted, self.inner.namespace);
        }
        state.current = Some(id.clone());

        self.inner.persist(&mut state).await;
        debug!("Saved draft {} ({}) in '{}'", id, kind, self.inner.namespace);
        id
    }

    /// Serialize `data` and save it as a new draft.
    pub async fn save_as<T: Serialize>(&self, data: &T, kind: DraftKind, title: Option<String>) -> Result<DraftId, DraftError> {
        let value = serde_json::to_value(data).map_err(DraftError::Serialize)?;
        Ok(self.save(value, kind, title).await)
    }

    /// Return a draft's payload and make it the current draft.
    pub async fn load(&self, id: &str) -> Option<Value> {
        let mut state = self.inner.state.lock().await;
        let index = state.position(id)?;
        state.current = Some(id.to_string());
        Some(state.drafts[index].data.clone())
    }

    /// Load a draft and deserialize its payload.
    ///
    /// `Ok(None)` when the draft does not exist.
    pub async fn load_as<T: DeserializeOwned>(&self, id: &str) -> Result<Option<T>, DraftError> {
        match self.load(id).await {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| DraftError::Payload {
                    id: id.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Replace the current draft's payload and bump its timestamp.
    ///
    /// Returns `false` when no draft is current.
    pub async fn update(&self, data: Value) -> bool {
        let mut state = self.inner.state.lock().await;
        let Some(index) = state.current_index() else {
            debug!("No current draft to update in '{}'", self.inner.namespace);
            return false;
        };

        let draft = &mut state.drafts[index];
        draft.data = data;
        draft.timestamp = next_timestamp(draft.timestamp);

        self.inner.persist(&mut state).await;
        true
    }

    /// Delete a draft. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut state = self.inner.state.lock().await;
        let Some(index) = state.position(id) else {
            return false;
        };

        state.drafts.remove(index);
        if state.current.as_deref() == Some(id) {
            state.current = None;
        }

        self.inner.persist(&mut state).await;
        debug!("Removed draft {} from '{}'", id, self.inner.namespace);
        true
    }

    /// Delete every draft and forget the current draft.
    pub async fn clear(&self) {
        let mut state = self.inner.state.lock().await;
        state.drafts.clear();
        state.current = None;

        match self.inner.storage.remove(&self.inner.namespace).await {
            Ok(_) => state.last_persist_error = None,
            Err(e) => {
                warn!("Failed to clear stored drafts for '{}': {}", self.inner.namespace, e);
                state.last_persist_error = Some(e.to_string());
            }
        }
        info!("Cleared all drafts in '{}'", self.inner.namespace);
    }

    /// All drafts, newest first.
    pub async fn drafts(&self) -> Vec<Draft> {
        self.inner.state.lock().await.drafts.clone()
    }

    pub async fn draft(&self, id: &str) -> Option<Draft> {
        let state = self.inner.state.lock().await;
        state.position(id).map(|i| state.drafts[i].clone())
    }

    pub async fn drafts_by_type(&self, kind: DraftKind) -> Vec<Draft> {
        let state = self.inner.state.lock().await;
        state.drafts.iter().filter(|d| d.kind == kind).cloned().collect()
    }

    /// Up to `limit` drafts ordered by timestamp, newest first.
    pub async fn recent_drafts(&self, limit: usize) -> Vec<Draft> {
        let mut drafts = self.drafts().await;
        drafts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        drafts.truncate(limit);
        drafts
    }

    pub async fn current_draft(&self) -> Option<Draft> {
        let state = self.inner.state.lock().await;
        state.current_index().map(|i| state.drafts[i].clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.state.lock().await.drafts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Message of the last failed write, `None` if the last write succeeded.
    pub async fn last_persist_error(&self) -> Option<String> {
        self.inner.state.lock().await.last_persist_error.clone()
    }

    /// Serialize the whole collection for download.
    pub async fn export(&self) -> ExportBlob {
        let state = self.inner.state.lock().await;
        transfer::export_drafts(&self.inner.namespace, &state.drafts)
    }

    /// Write an export file into `dir` and return its path.
    pub async fn export_to_dir(&self, dir: &Path) -> Result<PathBuf, DraftError> {
        let blob = self.export().await;
        tokio::fs::create_dir_all(dir).await?;

        let path = dir.join(&blob.file_name);
        tokio::fs::write(&path, blob.contents.as_bytes()).await?;
        info!("Exported drafts of '{}' to {}", self.inner.namespace, path.display());
        Ok(path)
    }

    /// Replace the collection with an exported document.
    ///
    /// Returns `false` and leaves the store untouched unless `text` is a JSON
    /// array of draft records. A well-formed array is still rejected when an
    /// element is not a draft record (missing field, unknown `type`), when two
    /// records share an id, or when a timestamp is negative or later than
    /// [`MAX_DRAFT_TIMESTAMP`](crate::constants::MAX_DRAFT_TIMESTAMP).
    pub async fn import_str(&self, text: &str) -> bool {
        let drafts = match parse_import(text, self.max_drafts) {
            Ok(drafts) => drafts,
            Err(e) => {
                warn!("Rejected draft import for '{}': {}", self.inner.namespace, e);
                return false;
            }
        };

        let mut state = self.inner.state.lock().await;
        let count = drafts.len();
        state.drafts = drafts;
        if state.current_index().is_none() {
            state.current = None;
        }

        self.inner.persist(&mut state).await;
        info!("Imported {} drafts into '{}'", count, self.inner.namespace);
        true
    }

    /// Read `path` and import it with the rules of [`DraftStore::import_str`].
    /// File-read failures return `false`.
    pub async fn import_file(&self, path: &Path) -> bool {
        match tokio::fs::read_to_string(path).await {
            Ok(text) => self.import_str(&text).await,
            Err(e) => {
                warn!("Failed to read import file {}: {}", path.display(), e);
                false
            }
        }
    }

    pub async fn storage_info(&self) -> StorageInfo {
        let state = self.inner.state.lock().await;
        let size_bytes = serde_json::to_string(&state.drafts).map(|s| s.len()).unwrap_or(0);

        StorageInfo {
            count: state.drafts.len(),
            size_bytes,
            oldest: state.drafts.iter().map(|d| d.timestamp).min(),
            newest: state.drafts.iter().map(|d| d.timestamp).max(),
        }
    }

    /// Start refreshing the current draft every autosave interval.
    ///
    /// No-op when autosave is already running.
    pub fn enable_autosave(&mut self) {
        if self.autosave.is_some() {
            return;
        }
        self.autosave = Some(AutosaveTask::spawn(self.inner.clone(), self.autosave_interval));
        debug!(
            "Autosave enabled for '{}' every {:?}",
            self.inner.namespace, self.autosave_interval
        );
    }

    /// Stop the autosave task.
    pub fn disable_autosave(&mut self) {
        if self.autosave.take().is_some() {
            debug!("Autosave disabled for '{}'", self.inner.namespace);
        }
    }

    /// Change the autosave cadence, restarting the task if it is running.
    ///
    /// Intervals below one second are raised to one second.
    pub fn set_autosave_interval(&mut self, interval: Duration) {
        let interval = clamp_autosave_interval(interval);
        self.autosave_interval = interval;
        if self.autosave.as_ref().is_some_and(|task| task.interval() != interval) {
            self.disable_autosave();
            self.enable_autosave();
        }
    }

    pub fn is_autosave_enabled(&self) -> bool {
        self.autosave.is_some()
    }
}
