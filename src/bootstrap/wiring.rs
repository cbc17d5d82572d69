//! # Dependency Injection
//!
//! Turns the loaded [`AppConfig`] into concrete adapters and hands them out
//! behind port traits. This is the only module depending on ts-infra,
//! ts-platform and ts-app at once; it assembles, it does not decide
//! business outcomes.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use ts_app::storage::{create_server_storage, ServerStorageOptions};
use ts_app::store::{OnboardingStore, OnboardingStoreDeps, OnboardingStoreOptions, PERSIST_DEBOUNCE};
use ts_core::config::{AppConfig, StorageBackend};
use ts_core::ports::{
    CompletionEvaluatorPort, DocumentStorePort, MessageBusPort, SessionPort,
    TempCollectionActionsPort,
};
use ts_core::{OnboardingState, Principal};
use ts_infra::{
    FileDocumentStore, InMemoryDocumentStore, RemoteCollectionGateway, ServerActions,
    StaticSessionProvider,
};
use ts_platform::bus::{InProcessMessageBus, DEFAULT_TOPIC_CAPACITY};

/// Principal used when the config names none.
pub const DEFAULT_PRINCIPAL_ID: &str = "local-user";

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Unsupported storage backend: {0}")]
    UnsupportedBackend(String),

    #[error("Document store initialization failed: {0}")]
    DocumentStoreInit(String),
}

/// Everything a context needs, behind ports.
#[derive(Clone)]
pub struct AppDeps {
    pub actions: Arc<dyn TempCollectionActionsPort>,
    pub evaluator: Arc<dyn CompletionEvaluatorPort>,
    pub sessions: Arc<dyn SessionPort>,
    pub bus: Arc<dyn MessageBusPort>,
    pub persist_debounce: Duration,
}

fn create_document_store(config: &AppConfig) -> WiringResult<Arc<dyn DocumentStorePort>> {
    match &config.storage_backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryDocumentStore::new())),
        StorageBackend::File => {
            let store = if config.data_dir.as_os_str().is_empty() {
                FileDocumentStore::with_defaults().ok_or_else(|| {
                    WiringError::DocumentStoreInit(
                        "no data_dir configured and no platform data directory".to_string(),
                    )
                })?
            } else {
                FileDocumentStore::new(&config.data_dir)
            };
            info!(root = %store.root().display(), "using file document store");
            Ok(Arc::new(store))
        }
        StorageBackend::Other(name) => Err(WiringError::UnsupportedBackend(name.clone())),
    }
}

fn create_session(config: &AppConfig) -> StaticSessionProvider {
    let id = if config.principal_id.is_empty() {
        DEFAULT_PRINCIPAL_ID
    } else {
        config.principal_id.as_str()
    };
    let principal = Principal::new(id);
    let principal = if config.display_name.is_empty() {
        principal
    } else {
        principal.with_display_name(config.display_name.clone())
    };
    StaticSessionProvider::signed_in(principal)
}

/// Wire the server side and the shared bus.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let documents = create_document_store(config)?;
    let sessions = Arc::new(create_session(config));
    let gateway = Arc::new(RemoteCollectionGateway::new(documents));
    let server = Arc::new(ServerActions::new(sessions.clone(), gateway));

    let capacity = if config.bus_capacity == 0 {
        DEFAULT_TOPIC_CAPACITY
    } else {
        config.bus_capacity
    };
    let persist_debounce = config
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or(PERSIST_DEBOUNCE);

    Ok(AppDeps {
        actions: server.clone(),
        evaluator: server,
        sessions,
        bus: Arc::new(InProcessMessageBus::new(capacity)),
        persist_debounce,
    })
}

/// Build one context's onboarding store over server storage.
///
/// Must run inside a tokio runtime.
pub fn create_onboarding_store(deps: &AppDeps, initial_state: OnboardingState) -> OnboardingStore {
    let storage = create_server_storage(
        deps.actions.clone(),
        None,
        ServerStorageOptions {
            debounce: Some(deps.persist_debounce),
            ..Default::default()
        },
    );
    OnboardingStore::new(
        OnboardingStoreDeps {
            storage: Arc::new(storage),
            evaluator: deps.evaluator.clone(),
            bus: deps.bus.clone(),
        },
        OnboardingStoreOptions::with_initial_state(initial_state),
    )
}
