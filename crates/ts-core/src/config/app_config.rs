use std::path::PathBuf;

/// Which document store backs the server side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    /// Unrecognised value, kept as written.
    Other(String),
}

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Principal the demo session authenticates as (may be empty)
    pub principal_id: String,

    /// Display name reported for the principal (may be empty)
    pub display_name: String,

    pub storage_backend: StorageBackend,

    /// Root directory of the file document store (path info only)
    pub data_dir: PathBuf,

    /// Debounce interval of the server storage adapter. `Some(0)` is a
    /// written zero, `None` means the key is absent.
    pub debounce_ms: Option<u64>,

    /// Per-topic capacity of the in-process message bus, 0 when unset
    pub bus_capacity: usize,

    /// Directory for log files, empty when file logging is off
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// Missing keys become empty values. Nothing is validated.
    pub fn from_toml(toml_value: &toml::Value) -> Self {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let int_at = |section: &str, key: &str| -> i64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
        };

        let storage_backend = match str_at("storage", "backend").as_str() {
            "" | "memory" => StorageBackend::Memory,
            "file" => StorageBackend::File,
            other => StorageBackend::Other(other.to_string()),
        };

        Self {
            principal_id: str_at("session", "principal_id"),
            display_name: str_at("session", "display_name"),
            storage_backend,
            data_dir: PathBuf::from(str_at("storage", "data_dir")),
            debounce_ms: toml_value
                .get("storage")
                .and_then(|s| s.get("debounce_ms"))
                .and_then(|v| v.as_integer())
                .map(|ms| ms.max(0) as u64),
            bus_capacity: int_at("bus", "capacity").max(0) as usize,
            log_dir: PathBuf::from(str_at("logging", "log_dir")),
        }
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            principal_id: String::new(),
            display_name: String::new(),
            storage_backend: StorageBackend::Memory,
            data_dir: PathBuf::new(),
            debounce_ms: None,
            bus_capacity: 0,
            log_dir: PathBuf::new(),
        }
    }
}
