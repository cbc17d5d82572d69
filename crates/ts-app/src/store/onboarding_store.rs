//! Reactive onboarding store.
//!
//! State lives in a `watch` channel. Every committed change is queued for
//! persistence in commit order and published on the message bus under the
//! store name. Changes received from other contexts are applied locally
//! without being persisted or re-published.

use std::sync::{Arc, Mutex, OnceLock, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};
use ts_core::envelope::PERSISTED_STATE_VERSION;
use ts_core::ports::{BusSubscription, CompletionEvaluatorPort, MessageBusPort, StateStoragePort};
use ts_core::{
    BroadcastEnvelope, OnboardingInfo, OnboardingState, OnboardingUpdate, PersistedEnvelope,
    StorageKey, StoreInstanceId,
};

/// Debounce used for the onboarding store's server storage.
pub const PERSIST_DEBOUNCE: Duration = Duration::from_millis(2500);

/// Ports the store talks to.
#[derive(Clone)]
pub struct OnboardingStoreDeps {
    pub storage: Arc<dyn StateStoragePort>,
    pub evaluator: Arc<dyn CompletionEvaluatorPort>,
    pub bus: Arc<dyn MessageBusPort>,
}

#[derive(Debug, Clone)]
pub struct OnboardingStoreOptions {
    /// Storage name, also used as the bus topic.
    pub name: String,
    pub initial_state: OnboardingState,
    /// When false the store rehydrates from storage right after creation.
    pub skip_hydration: bool,
}

impl Default for OnboardingStoreOptions {
    fn default() -> Self {
        Self {
            name: StorageKey::Onboarding.storage_name().to_string(),
            initial_state: OnboardingState::default(),
            skip_hydration: true,
        }
    }
}

impl OnboardingStoreOptions {
    pub fn with_initial_state(initial_state: OnboardingState) -> Self {
        Self {
            initial_state,
            ..Default::default()
        }
    }
}

/// Result of [`OnboardingStore::rehydrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// Persisted state replaced the in-memory state.
    Restored,
    /// Nothing was persisted, or the read failed.
    Empty,
    /// A value was found but could not be used.
    Discarded,
}

/// Handle to one context's onboarding store. Clones share the same state.
///
/// Must be created inside a tokio runtime: the persistence worker and the
/// bus listener are spawned on construction.
#[derive(Clone)]
pub struct OnboardingStore {
    inner: Arc<Inner>,
}

struct Inner {
    name: String,
    instance_id: StoreInstanceId,
    state: watch::Sender<OnboardingState>,
    // serializes mutate, enqueue and publish
    commit_lock: Mutex<()>,
    persist_tx: mpsc::UnboundedSender<String>,
    storage: Arc<dyn StateStoragePort>,
    evaluator: Arc<dyn CompletionEvaluatorPort>,
    bus: Arc<dyn MessageBusPort>,
    listener: OnceLock<AbortHandle>,
}

impl OnboardingStore {
    pub fn new(deps: OnboardingStoreDeps, options: OnboardingStoreOptions) -> Self {
        let OnboardingStoreOptions {
            name,
            initial_state,
            skip_hydration,
        } = options;

        let (state, _) = watch::channel(initial_state);
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        spawn_persist_worker(Arc::clone(&deps.storage), name.clone(), persist_rx);

        let subscription = deps.bus.subscribe(&name);
        let inner = Arc::new(Inner {
            name,
            instance_id: StoreInstanceId::new(),
            state,
            commit_lock: Mutex::new(()),
            persist_tx,
            storage: deps.storage,
            evaluator: deps.evaluator,
            bus: deps.bus,
            listener: OnceLock::new(),
        });
        let listener = spawn_bus_listener(Arc::downgrade(&inner), subscription);
        let _ = inner.listener.set(listener);

        debug!(
            store = %inner.name,
            instance = %inner.instance_id,
            skip_hydration,
            "onboarding store created"
        );

        let store = Self { inner };
        if !skip_hydration {
            let hydrating = store.clone();
            tokio::spawn(async move {
                hydrating.rehydrate().await;
            });
        }
        store
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn instance_id(&self) -> &StoreInstanceId {
        &self.inner.instance_id
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> OnboardingState {
        self.inner.state.borrow().clone()
    }

    pub fn select<T>(&self, selector: impl FnOnce(&OnboardingState) -> T) -> T {
        selector(&*self.inner.state.borrow())
    }

    /// Change stream. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<OnboardingState> {
        self.inner.state.subscribe()
    }

    /// Replace one field, then refresh `is_complete` in the background.
    pub fn set_onboarding_info(&self, update: OnboardingUpdate) {
        let info = self.inner.commit(|state| {
            let before = state.onboarding_info.clone();
            state.onboarding_info.apply(update);
            state.onboarding_info != before
        });

        let store = self.clone();
        tokio::spawn(async move {
            store.evaluate(info.onboarding_info).await;
        });
    }

    pub fn set_is_complete(&self, is_complete: bool) {
        self.inner.commit(|state| {
            let changed = state.is_complete != is_complete;
            state.is_complete = is_complete;
            changed
        });
    }

    /// Back to the default record with `is_complete == false`.
    pub fn reset_onboarding_info(&self) {
        self.inner.commit(|state| {
            let default = OnboardingState::default();
            let changed = *state != default;
            *state = default;
            changed
        });
    }

    /// Ask the evaluator about the current record. On failure `is_complete`
    /// keeps its previous value.
    pub async fn calculate_is_complete(&self) {
        let info = self.state().onboarding_info;
        self.evaluate(info).await;
    }

    async fn evaluate(&self, info: OnboardingInfo) {
        match self.inner.evaluator.is_onboarding_complete(&info).await {
            Ok(is_complete) => self.set_is_complete(is_complete),
            Err(e) => {
                error!(store = %self.inner.name, error = %e, "failed to check if onboarding is complete");
            }
        }
    }

    /// Load persisted state through the storage and replace the in-memory
    /// state with it.
    pub async fn rehydrate(&self) -> HydrationOutcome {
        let Some(raw) = self.inner.storage.get_item(&self.inner.name).await else {
            debug!(store = %self.inner.name, "no persisted state to rehydrate");
            return HydrationOutcome::Empty;
        };

        let envelope = match PersistedEnvelope::from_json(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(store = %self.inner.name, error = %e, "discarding unreadable persisted state");
                return HydrationOutcome::Discarded;
            }
        };
        if envelope.version != PERSISTED_STATE_VERSION {
            warn!(
                store = %self.inner.name,
                version = envelope.version,
                expected = PERSISTED_STATE_VERSION,
                "discarding persisted state with unknown version"
            );
            return HydrationOutcome::Discarded;
        }

        self.inner.restore(envelope.state);
        info!(store = %self.inner.name, "onboarding store rehydrated");

        self.calculate_is_complete().await;
        HydrationOutcome::Restored
    }

    /// Remove the persisted copy. In-memory state is left alone.
    pub async fn clear_persisted(&self) {
        self.inner.storage.remove_item(&self.inner.name).await;
    }
}

impl Inner {
    /// Apply `mutate` and, when it reports a change, persist and publish the
    /// result. Returns the state after the call either way.
    fn commit<F>(&self, mutate: F) -> OnboardingState
    where
        F: FnOnce(&mut OnboardingState) -> bool,
    {
        let _guard = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let changed = self.state.send_if_modified(mutate);
        let snapshot = self.state.borrow().clone();
        if changed {
            self.persist(&snapshot);
            self.publish(&snapshot);
        }
        snapshot
    }

    /// Replace with state read back from storage: published to the other
    /// contexts, not written again.
    fn restore(&self, state: OnboardingState) {
        let _guard = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.publish(&state);
        self.state.send_replace(state);
    }

    /// Local replace that neither persists nor publishes.
    fn replace(&self, state: OnboardingState) {
        let _guard = self.commit_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.state.send_replace(state);
    }

    fn persist(&self, state: &OnboardingState) {
        let raw = match PersistedEnvelope::new(state.clone()).to_json() {
            Ok(raw) => raw,
            Err(e) => {
                error!(store = %self.name, error = %e, "failed to serialize onboarding state");
                return;
            }
        };
        if self.persist_tx.send(raw).is_err() {
            warn!(store = %self.name, "persistence worker stopped, change not persisted");
        }
    }

    fn publish(&self, state: &OnboardingState) {
        let envelope = BroadcastEnvelope {
            source: self.instance_id.clone(),
            state: state.clone(),
        };
        let payload = match serde_json::to_string(&envelope) {
            Ok(payload) => payload,
            Err(e) => {
                error!(store = %self.name, error = %e, "failed to serialize broadcast");
                return;
            }
        };
        if let Err(e) = self.bus.publish(&self.name, &payload) {
            warn!(store = %self.name, error = %e, "failed to broadcast onboarding state");
        }
    }

    fn apply_remote(&self, payload: &str) {
        let envelope: BroadcastEnvelope = match serde_json::from_str(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(store = %self.name, error = %e, "ignoring malformed broadcast");
                return;
            }
        };
        if envelope.source == self.instance_id {
            return;
        }

        debug!(store = %self.name, source = %envelope.source, "applying state from another context");
        self.replace(envelope.state);
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.get() {
            listener.abort();
        }
    }
}

fn spawn_persist_worker(
    storage: Arc<dyn StateStoragePort>,
    name: String,
    mut queue: mpsc::UnboundedReceiver<String>,
) {
    tokio::spawn(async move {
        while let Some(raw) = queue.recv().await {
            storage.set_item(&name, raw).await;
        }
        debug!(store = %name, "persistence queue closed");
    });
}

fn spawn_bus_listener(store: Weak<Inner>, mut subscription: BusSubscription) -> AbortHandle {
    tokio::spawn(async move {
        while let Some(payload) = subscription.recv().await {
            let Some(inner) = store.upgrade() else {
                break;
            };
            inner.apply_remote(&payload);
        }
    })
    .abort_handle()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::time::sleep;
    use ts_core::{ActionError, ActionResult, ActionVerb, Hobby};
    use ts_platform::bus::{InProcessMessageBus, NoopMessageBus};

    #[derive(Default)]
    struct RecordingStorage {
        stored: Mutex<Option<String>>,
        writes: Mutex<Vec<String>>,
        removals: AtomicUsize,
    }

    impl RecordingStorage {
        fn holding(raw: &str) -> Self {
            Self {
                stored: Mutex::new(Some(raw.to_string())),
                ..Default::default()
            }
        }

        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StateStoragePort for RecordingStorage {
        async fn get_item(&self, _name: &str) -> Option<String> {
            self.stored.lock().unwrap().clone()
        }

        async fn set_item(&self, _name: &str, value: String) {
            self.writes.lock().unwrap().push(value);
        }

        async fn remove_item(&self, _name: &str) {
            self.removals.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct FixedEvaluator {
        answer: ActionResult<bool>,
        calls: AtomicUsize,
    }

    impl FixedEvaluator {
        fn answering(answer: ActionResult<bool>) -> Self {
            Self {
                answer,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionEvaluatorPort for FixedEvaluator {
        async fn is_onboarding_complete(&self, _info: &OnboardingInfo) -> ActionResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Ok(answer) => Ok(*answer),
                Err(_) => Err(ActionError::Remote("evaluator offline".to_string())),
            }
        }
    }

    fn store_with(
        storage: Arc<RecordingStorage>,
        evaluator: Arc<FixedEvaluator>,
        bus: Arc<dyn MessageBusPort>,
    ) -> OnboardingStore {
        OnboardingStore::new(
            OnboardingStoreDeps {
                storage,
                evaluator,
                bus,
            },
            OnboardingStoreOptions::default(),
        )
    }

    async fn settle() {
        sleep(Duration::from_millis(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn field_updates_apply_synchronously() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(false)));
        let store = store_with(storage, evaluator, Arc::new(NoopMessageBus));

        store.set_onboarding_info(OnboardingUpdate::Name("A".to_string()));
        assert_eq!(store.state().onboarding_info.name, "A");

        store.set_onboarding_info(OnboardingUpdate::Hobby(Some(Hobby::Food)));
        assert_eq!(
            store.select(|state| state.onboarding_info.hobby),
            Some(Hobby::Food)
        );
        assert_eq!(store.state().onboarding_info.name, "A");
    }

    #[tokio::test(start_paused = true)]
    async fn commits_are_persisted_in_order() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(false)));
        let store = store_with(Arc::clone(&storage), evaluator, Arc::new(NoopMessageBus));

        store.set_onboarding_info(OnboardingUpdate::Name("A".to_string()));
        store.set_onboarding_info(OnboardingUpdate::Name("AB".to_string()));
        store.set_onboarding_info(OnboardingUpdate::Age(4));
        settle().await;

        let names: Vec<(String, i64)> = storage
            .writes()
            .iter()
            .map(|raw| {
                let envelope = PersistedEnvelope::from_json(raw).unwrap();
                (envelope.state.onboarding_info.name, envelope.state.onboarding_info.age)
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("A".to_string(), 0),
                ("AB".to_string(), 0),
                ("AB".to_string(), 4)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn evaluator_result_updates_is_complete() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(true)));
        let store = store_with(storage, Arc::clone(&evaluator), Arc::new(NoopMessageBus));

        store.set_onboarding_info(OnboardingUpdate::Description(Some("hi".to_string())));
        assert!(!store.state().is_complete);
        settle().await;

        assert!(store.state().is_complete);
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn evaluator_failure_keeps_previous_answer() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Err(ActionError::Failed(
            ActionVerb::Get,
        ))));
        let store = store_with(storage, Arc::clone(&evaluator), Arc::new(NoopMessageBus));
        store.set_is_complete(true);

        store.set_onboarding_info(OnboardingUpdate::Name(String::new()));
        settle().await;

        assert!(store.state().is_complete);
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_default_state() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(true)));
        let store = store_with(storage, evaluator, Arc::new(NoopMessageBus));

        store.set_onboarding_info(OnboardingUpdate::Name("Ann".to_string()));
        settle().await;
        assert!(store.state().is_complete);

        store.reset_onboarding_info();

        assert_eq!(store.state(), OnboardingState::default());
        assert!(!store.state().is_complete);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_changes() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(false)));
        let store = store_with(storage, evaluator, Arc::new(NoopMessageBus));
        let mut changes = store.subscribe();

        store.set_onboarding_info(OnboardingUpdate::Age(30));

        changes.changed().await.unwrap();
        assert_eq!(changes.borrow_and_update().onboarding_info.age, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn rehydrate_restores_persisted_state_and_recalculates() {
        let mut persisted = OnboardingState::default();
        persisted.onboarding_info.name = "Stored".to_string();
        let raw = PersistedEnvelope::new(persisted).to_json().unwrap();

        let storage = Arc::new(RecordingStorage::holding(&raw));
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(true)));
        let store = store_with(Arc::clone(&storage), Arc::clone(&evaluator), Arc::new(NoopMessageBus));

        assert_eq!(store.rehydrate().await, HydrationOutcome::Restored);
        assert_eq!(store.state().onboarding_info.name, "Stored");
        assert!(store.state().is_complete);
        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rehydrated_state_reaches_other_contexts_without_a_write() {
        let mut persisted = OnboardingState::default();
        persisted.onboarding_info.name = "Stored".to_string();
        let raw = PersistedEnvelope::new(persisted).to_json().unwrap();

        let bus: Arc<dyn MessageBusPort> = Arc::new(InProcessMessageBus::default());
        let other_storage = Arc::new(RecordingStorage::default());
        let other = store_with(
            Arc::clone(&other_storage),
            Arc::new(FixedEvaluator::answering(Ok(false))),
            Arc::clone(&bus),
        );
        let hydrating_storage = Arc::new(RecordingStorage::holding(&raw));
        let hydrating = store_with(
            Arc::clone(&hydrating_storage),
            Arc::new(FixedEvaluator::answering(Ok(false))),
            bus,
        );

        assert_eq!(hydrating.rehydrate().await, HydrationOutcome::Restored);
        settle().await;

        assert_eq!(hydrating.state().onboarding_info.name, "Stored");
        assert_eq!(other.state().onboarding_info.name, "Stored");
        assert!(hydrating_storage.writes().is_empty());
        assert!(other_storage.writes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rehydrate_keeps_state_without_usable_value() {
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(true)));

        let empty = store_with(
            Arc::new(RecordingStorage::default()),
            Arc::clone(&evaluator),
            Arc::new(NoopMessageBus),
        );
        assert_eq!(empty.rehydrate().await, HydrationOutcome::Empty);
        assert_eq!(empty.state(), OnboardingState::default());

        let garbage = store_with(
            Arc::new(RecordingStorage::holding("not json")),
            Arc::clone(&evaluator),
            Arc::new(NoopMessageBus),
        );
        assert_eq!(garbage.rehydrate().await, HydrationOutcome::Discarded);

        let future_version = r#"{"state":{"onboardingInfo":{"name":"X"},"isComplete":true},"version":7}"#;
        let newer = store_with(
            Arc::new(RecordingStorage::holding(future_version)),
            Arc::clone(&evaluator),
            Arc::new(NoopMessageBus),
        );
        assert_eq!(newer.rehydrate().await, HydrationOutcome::Discarded);
        assert_eq!(newer.state(), OnboardingState::default());

        assert_eq!(evaluator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn hydration_runs_on_creation_when_not_skipped() {
        let mut persisted = OnboardingState::default();
        persisted.onboarding_info.age = 41;
        let raw = PersistedEnvelope::new(persisted).to_json().unwrap();

        let store = OnboardingStore::new(
            OnboardingStoreDeps {
                storage: Arc::new(RecordingStorage::holding(&raw)),
                evaluator: Arc::new(FixedEvaluator::answering(Ok(false))),
                bus: Arc::new(NoopMessageBus),
            },
            OnboardingStoreOptions {
                skip_hydration: false,
                ..Default::default()
            },
        );
        settle().await;

        assert_eq!(store.state().onboarding_info.age, 41);
    }

    #[tokio::test(start_paused = true)]
    async fn own_broadcasts_are_ignored() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(false)));
        let bus = Arc::new(InProcessMessageBus::default());
        let store = store_with(Arc::clone(&storage), evaluator, bus);

        store.set_onboarding_info(OnboardingUpdate::Age(9));
        settle().await;

        assert_eq!(store.state().onboarding_info.age, 9);
        assert_eq!(storage.writes().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_persisted_removes_without_touching_state() {
        let storage = Arc::new(RecordingStorage::default());
        let evaluator = Arc::new(FixedEvaluator::answering(Ok(false)));
        let store = store_with(Arc::clone(&storage), evaluator, Arc::new(NoopMessageBus));
        store.set_onboarding_info(OnboardingUpdate::Name("Keep".to_string()));

        store.clear_persisted().await;

        assert_eq!(storage.removals.load(Ordering::SeqCst), 1);
        assert_eq!(store.state().onboarding_info.name, "Keep");
    }
}
