//! User preferences store.
//!
//! Settings carry what must survive a restart: the API environment, log
//! level, TrueLayer client id and the metadata of linked credentials.
//! Secrets never land here; they stay in the keychain.

use balance_core::{ApiEnvironment, Credential};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::balance_store::BalanceStore;
use crate::error::StoreError;
use crate::persistence::{default_settings_path, load_json_or_default, save_json};

// ============================================================================
// Settings Types
// ============================================================================

/// Persisted preferences and linked bank metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Data API environment.
    pub environment: ApiEnvironment,

    /// Log level.
    pub log_level: LogLevel,

    /// TrueLayer client id. The secret is in the keychain.
    pub truelayer_client_id: Option<String>,

    /// Linked credentials. Tokens are in the keychain.
    pub credentials: Vec<Credential>,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    /// Error level logging.
    Error,
    /// Warning level logging.
    #[default]
    Warn,
    /// Info level logging.
    Info,
    /// Debug level logging.
    Debug,
    /// Trace level logging.
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

// ============================================================================
// Settings Store
// ============================================================================

/// Persistent settings store.
#[derive(Debug)]
pub struct SettingsStore {
    settings: Arc<RwLock<Settings>>,
    path: PathBuf,
}

impl SettingsStore {
    /// Creates a store with default settings, saving to `path`.
    pub fn new(path: PathBuf) -> Self {
        Self::with_settings(path, Settings::default())
    }

    fn with_settings(path: PathBuf, settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            path,
        }
    }

    /// Loads settings from the default path.
    pub async fn load_default() -> Self {
        Self::load(default_settings_path()).await
    }

    /// Loads settings from a path.
    ///
    /// A missing or unreadable file yields the defaults.
    pub async fn load(path: PathBuf) -> Self {
        info!(path = %path.display(), "Loading settings");
        let settings = load_json_or_default(&path).await;
        Self::with_settings(path, settings)
    }

    /// The file settings are saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets a copy of the current settings.
    pub async fn get(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Updates settings in memory.
    pub async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.settings.write().await;
        f(&mut settings);
    }

    /// Saves settings to disk.
    ///
    /// # Errors
    ///
    /// Returns error if settings cannot be written to disk.
    pub async fn save(&self) -> Result<(), StoreError> {
        let settings = self.settings.read().await;
        save_json(&self.path, &*settings).await?;
        info!(path = %self.path.display(), "Settings saved");
        Ok(())
    }

    // ========================================================================
    // Balance Store Sync
    // ========================================================================

    /// Seeds a balance store with the persisted credentials and client id.
    pub async fn hydrate(&self, store: &BalanceStore) {
        let settings = self.get().await;
        debug!(
            credentials = settings.credentials.len(),
            has_client = settings.truelayer_client_id.is_some(),
            "Hydrating balance store"
        );

        store.restore_credentials(settings.credentials).await;
        store
            .restore_truelayer_client(settings.truelayer_client_id)
            .await;
    }

    /// Copies the balance store's credentials and client id into settings.
    ///
    /// Call [`SettingsStore::save`] afterwards to persist them.
    pub async fn capture(&self, store: &BalanceStore) {
        let credentials = store.all_credentials().await.unwrap_or_default();
        let client_id = store.truelayer_client_id().await;

        self.update(|s| {
            s.credentials = credentials;
            s.truelayer_client_id = client_id;
        })
        .await;
    }

    // ========================================================================
    // Convenience Methods
    // ========================================================================

    /// The configured API environment.
    pub async fn environment(&self) -> ApiEnvironment {
        self.settings.read().await.environment
    }

    /// Sets the API environment.
    pub async fn set_environment(&self, environment: ApiEnvironment) {
        self.update(|s| s.environment = environment).await;
    }

    /// The configured log level.
    pub async fn log_level(&self) -> LogLevel {
        self.settings.read().await.log_level
    }
}

// ============================================================================
// Tests
// ============================================================================
