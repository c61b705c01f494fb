//! Bookshelf: debounced book catalog search with pagination and favorites.
//!
//! The crate is the core behind a book search screen:
//! - Keystrokes are debounced into a settled query before anything is fetched
//! - Result pages come from a remote catalog (Google Books by default)
//! - Late responses for superseded queries or pages are never displayed
//! - Favorited book ids persist across restarts in a JSON file

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Rendering layer (main.rs, or any front end)        │  ← Intents in, view model out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Debounce timer                                   │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Storage Layer │   │ Worker Layer  │
//! │ (catalog/)    │   │ (storage/)    │   │ (worker/)     │
//! │ - HTTP client │   │ - JSON file   │   │ - Fetch tasks │
//! │ - Decoding    │   │ - Favorites   │   │ - Generations │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types, books, pagination (domain/)         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! [`Config`] is read from a TOML file and/or `key=value` pairs:
//!
//! ```toml
//! page_size = 6
//! debounce_ms = 500
//! initial_query = "example books"
//! data_dir = "~/.local/share/bookshelf"
//! trace_level = "debug"
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use bookshelf::Config;
//!
//! # async fn demo() -> bookshelf::Result<()> {
//! let config = Config::default();
//! let mut controller = bookshelf::open(&config).await?;
//!
//! controller.set_query("dogs")?;
//! controller.run_until_idle().await?;
//! for book in controller.items() {
//!     println!("{}", book.title.as_deref().unwrap_or("(untitled)"));
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, ControllerOptions, Event, SearchController, SearchState};
pub use domain::{BookSummary, BookshelfError, Result, ResultPage};

use catalog::{GoogleBooksClient, DEFAULT_ENDPOINT, MAX_PAGE_SIZE};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::{FavoritesStore, JsonFileStore, DEFAULT_FAVORITES_KEY};

/// Runtime configuration.
///
/// Every field has a default, so a TOML file or key/value map only needs to
/// name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Catalog search URL.
    pub endpoint: String,

    /// Items per page, `1..=40`. Default: 6
    pub page_size: u32,

    /// Debounce quiet period in milliseconds. Default: 500
    pub debounce_ms: u64,

    /// Query fetched at mount. Default: `"example books"`
    pub initial_query: String,

    /// Storage key holding the favorites array. Default: `"favoriteBooks"`
    pub favorites_key: String,

    /// Directory for `storage.json` and trace files.
    ///
    /// A leading `~` is expanded. Defaults to the platform data directory.
    pub data_dir: Option<String>,

    /// HTTP request timeout in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Transport retries per fetch. Default: 0
    pub fetch_retries: u32,

    /// Tracing level for exported spans.
    ///
    /// Any `EnvFilter` directive. `RUST_LOG` takes precedence. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: 6,
            debounce_ms: 500,
            initial_query: "example books".to_string(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            data_dir: None,
            request_timeout_secs: 30,
            fetch_retries: 0,
            trace_level: None,
        }
    }
}

impl Config {
    /// Builds a configuration from string key/value pairs over the defaults.
    ///
    /// Unknown keys are ignored and unparsable numbers keep their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bookshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "10".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 10);
    /// assert_eq!(config.debounce_ms, 500);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().merge_map(map)
    }

    /// Applies string key/value overrides on top of `self`.
    #[must_use]
    pub fn merge_map(self, map: &BTreeMap<String, String>) -> Self {
        fn parsed<T: std::str::FromStr>(map: &BTreeMap<String, String>, key: &str, current: T) -> T {
            map.get(key)
                .and_then(|s| s.trim().parse::<T>().ok())
                .unwrap_or(current)
        }

        let text = |key: &str, current: String| map.get(key).cloned().unwrap_or(current);

        Self {
            page_size: parsed(map, "page_size", self.page_size),
            debounce_ms: parsed(map, "debounce_ms", self.debounce_ms),
            request_timeout_secs: parsed(map, "request_timeout_secs", self.request_timeout_secs),
            fetch_retries: parsed(map, "fetch_retries", self.fetch_retries),
            endpoint: text("endpoint", self.endpoint),
            initial_query: text("initial_query", self.initial_query),
            favorites_key: text("favorites_key", self.favorites_key),
            data_dir: map.get("data_dir").cloned().or(self.data_dir),
            trace_level: map.get("trace_level").cloned().or(self.trace_level),
        }
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Io`] if the file cannot be read and
    /// [`BookshelfError::Config`] if it is not valid configuration TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| BookshelfError::Config(format!("{}: {e}", path.display())))
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`BookshelfError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(BookshelfError::Config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if self.debounce_ms == 0 {
            return Err(BookshelfError::Config("debounce_ms must be greater than 0".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(BookshelfError::Config("request_timeout_secs must be greater than 0".into()));
        }
        if self.initial_query.trim().is_empty() {
            return Err(BookshelfError::Config("initial_query must not be blank".into()));
        }
        if self.favorites_key.is_empty() {
            return Err(BookshelfError::Config("favorites_key must not be empty".into()));
        }
        reqwest::Url::parse(&self.endpoint)
            .map_err(|e| BookshelfError::Config(format!("endpoint {:?}: {e}", self.endpoint)))?;
        Ok(())
    }

    /// Data directory with `~` expanded.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::resolve_data_dir(self.data_dir.as_deref())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Mount settings derived from this configuration.
    #[must_use]
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            initial_query: self.initial_query.clone(),
            debounce: self.debounce(),
            fetch_retries: self.fetch_retries,
        }
    }
}

/// Builds the production controller for `config`.
///
/// Validates the configuration, opens `storage.json` in the data directory,
/// creates the Google Books client and mounts the controller (which fetches the
/// initial page).
///
/// # Errors
///
/// Fails on invalid configuration, an unusable data directory, or an initial
/// page that cannot be loaded.
pub async fn open(config: &Config) -> Result<SearchController> {
    config.validate()?;

    let data_dir = config.data_dir();
    tracing::debug!(data_dir = %data_dir.display(), "opening bookshelf");

    let backend = JsonFileStore::new(data_dir.join(infrastructure::STORAGE_FILE))?;
    let favorites = FavoritesStore::new(Box::new(backend), config.favorites_key.clone());
    let client = GoogleBooksClient::new(&config.endpoint, config.page_size, config.request_timeout())?;

    SearchController::mount(Arc::new(client), favorites, config.controller_options()).await
}
