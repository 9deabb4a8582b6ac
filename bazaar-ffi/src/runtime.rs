//! Process context: the async runtime, the shared HTTP pool, logging, and
//! the wrapper every boundary call runs inside.

use crate::error::{BoundaryError, BoundaryResult};
use crate::result::{FFIError, FFIResult};
use bazaar_client::{BazaarClient, ClientConfig};
use std::any::Any;
use std::fs::{self, File};
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

static CONTEXT: OnceLock<Context> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());
static STATE: AtomicU8 = AtomicU8::new(Lifecycle::Uninitialized as u8);

/// Where the library is in its one-way bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Lifecycle {
    Uninitialized = 0,
    Initializing = 1,
    Ready = 2,
}

/// Current lifecycle state.
pub fn lifecycle() -> Lifecycle {
    match STATE.load(Ordering::SeqCst) {
        2 => Lifecycle::Ready,
        1 => Lifecycle::Initializing,
        _ => Lifecycle::Uninitialized,
    }
}

pub(crate) struct Context {
    runtime: Runtime,
    http: reqwest::Client,
    config: ClientConfig,
}

impl Context {
    fn build() -> BoundaryResult<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("bazaar-client")
            .build()
            .map_err(|e| BoundaryError::Runtime(e.to_string()))?;
        let config = ClientConfig::default();
        let http = config.build_http()?;
        Ok(Self {
            runtime,
            http,
            config,
        })
    }

    /// A client for one call's endpoint, sharing the process HTTP pool.
    pub(crate) fn client(&self, api_url: &str, api_key: &str) -> BoundaryResult<BazaarClient> {
        Ok(BazaarClient::with_http(
            self.http.clone(),
            api_url,
            api_key,
            self.config.clone(),
        )?)
    }

    /// Blocks the calling thread on `future`.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Brings the library to [`Lifecycle::Ready`]. Idempotent; concurrent first
/// callers wait on one lock and exactly one of them does the work. On
/// failure the state falls back to `Uninitialized` so a later call can
/// retry.
pub(crate) fn initialize() -> BoundaryResult<()> {
    if CONTEXT.get().is_some() {
        return Ok(());
    }
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if CONTEXT.get().is_some() {
        return Ok(());
    }

    STATE.store(Lifecycle::Initializing as u8, Ordering::SeqCst);
    LogConfig::from_env().install();

    match Context::build() {
        Ok(context) => {
            // The lock guarantees nobody else has set it.
            let _ = CONTEXT.set(context);
            STATE.store(Lifecycle::Ready as u8, Ordering::SeqCst);
            info!("bazaar client initialized, version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Err(e) => {
            STATE.store(Lifecycle::Uninitialized as u8, Ordering::SeqCst);
            error!("bazaar client failed to initialize: {e}");
            Err(e)
        }
    }
}

/// Runs one boundary operation against the process context.
///
/// Errors and panics never cross the boundary: both come back as
/// `FFIResult::Err`, a panic always as a network error.
pub(crate) fn boundary<T>(
    operation: &'static str,
    body: impl FnOnce(&Context) -> BoundaryResult<T>,
) -> FFIResult<T> {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        let context = CONTEXT.get().ok_or(BoundaryError::NotInitialized)?;
        body(context)
    }));
    let result =
        outcome.unwrap_or_else(|payload| Err(BoundaryError::Panic(panic_message(payload))));

    match result {
        Ok(value) => {
            info!("{operation} ok");
            FFIResult::Ok(value)
        }
        Err(e) => {
            error!("{operation} failed. {e}");
            FFIResult::Err(FFIError::from(&e))
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ── Logging ──────────────────────────────────────────────────────

/// Log filter and destination, read from the environment once at init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directives, from `BAZAAR_LOG`.
    pub filter: String,
    /// Directory holding the log file; `None` logs to stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: Self::DEFAULT_FILTER.to_string(),
            directory: default_log_dir(),
        }
    }
}

impl LogConfig {
    pub const FILTER_VAR: &'static str = "BAZAAR_LOG";
    pub const DIR_VAR: &'static str = "BAZAAR_LOG_DIR";
    pub const DEFAULT_FILTER: &'static str = "info";
    pub const FILE_NAME: &'static str = "bazaar_client.log";

    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(Self::FILTER_VAR).ok(),
            std::env::var_os(Self::DIR_VAR).map(PathBuf::from),
        )
    }

    /// Builds a config from raw variable values. Empty values count as unset.
    pub fn from_vars(filter: Option<String>, directory: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            filter: filter.filter(|f| !f.trim().is_empty()).unwrap_or(defaults.filter),
            directory: directory
                .filter(|d| !d.as_os_str().is_empty())
                .or(defaults.directory),
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.directory.as_ref().map(|dir| dir.join(Self::FILE_NAME))
    }

    /// Creates (truncating) the log file, making its directory if needed.
    pub fn open_log_file(&self) -> Option<File> {
        let path = self.log_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        File::create(path).ok()
    }

    /// Installs the global subscriber. Returns false if one was already
    /// installed; that is not an error.
    pub fn install(&self) -> bool {
        let filter = EnvFilter::try_new(&self.filter)
            .unwrap_or_else(|_| EnvFilter::new(Self::DEFAULT_FILTER));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_target(false);

        let file = self.open_log_file();
        let to_file = file.is_some();
        let installed = match file {
            Some(file) => builder.with_writer(Mutex::new(file)).try_init().is_ok(),
            None => builder.with_writer(std::io::stderr).try_init().is_ok(),
        };
        if installed && !to_file && self.directory.is_some() {
            warn!("could not open log file, logging to stderr");
        }
        installed
    }
}

fn default_log_dir() -> Option<PathBuf> {
    dirs::document_dir().map(|docs| {
        docs.join("My Games")
            .join("Skyrim Special Edition")
            .join("SKSE")
    })
}
