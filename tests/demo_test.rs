use std::time::Duration;

use tempfile::TempDir;
use ts_core::config::{AppConfig, StorageBackend};
use ts_core::Hobby;

use tempsync::bootstrap::{load_config, wire_dependencies};
use tempsync::demo;

#[tokio::test(start_paused = true)]
async fn demo_persists_a_complete_record() {
    let mut config = AppConfig::empty();
    config.debounce_ms = Some(100);

    let deps = wire_dependencies(&config).unwrap();
    assert_eq!(deps.persist_debounce, Duration::from_millis(100));

    let state = demo::run(deps).await.unwrap();

    assert!(state.is_complete);
    assert_eq!(state.onboarding_info.name, "Anonymous");
    assert_eq!(state.onboarding_info.hobby, Some(Hobby::Music));
    assert_eq!(state.onboarding_info.age, 28);
}

#[tokio::test]
async fn demo_runs_against_a_file_store_from_config() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!(
            "[session]\nprincipal_id = \"uid-9\"\ndisplay_name = \"Lin\"\n\n[storage]\nbackend = \"file\"\ndata_dir = {:?}\ndebounce_ms = 0\n",
            dir.path().join("data")
        ),
    )
    .unwrap();

    let config = load_config(config_path).unwrap();
    assert_eq!(config.storage_backend, StorageBackend::File);

    let state = demo::run(wire_dependencies(&config).unwrap()).await.unwrap();

    assert_eq!(state.onboarding_info.name, "Lin");
    assert!(dir
        .path()
        .join("data/principals/uid-9/temp/temp-onboarding.json")
        .exists());
}
