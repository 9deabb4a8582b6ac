#![allow(dead_code)]

use bazaar_ffi::LogConfig;
use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::slice;
use std::sync::OnceLock;
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

pub const API_KEY: &str = "13e2f39c-033f-4784-9ac4-1f9d5fd7ed4c";

static LOG_DIR: OnceLock<TempDir> = OnceLock::new();

/// Sends this process's log file to a temporary directory. Must run before
/// the first `init()`.
pub fn isolate_logs() {
    LOG_DIR.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        // SAFETY: set once, before the library reads it, under the OnceLock.
        unsafe { std::env::set_var(LogConfig::DIR_VAR, dir.path()) };
        dir
    });
}

/// Where this process's log file is written.
pub fn log_dir() -> &'static Path {
    isolate_logs();
    LOG_DIR.get().unwrap().path()
}

/// Initializes the library with logs kept out of the user's game folder.
pub fn init() -> bool {
    isolate_logs();
    bazaar_ffi::init()
}

/// A mock service driven from synchronous tests.
///
/// The boundary blocks on the library's own runtime, so the mock server is
/// started and configured on a separate, test-owned one.
pub struct MockApi {
    server: MockServer,
    runtime: Runtime,
    pub url: CString,
    pub key: CString,
}

impl MockApi {
    pub fn start() -> Self {
        assert!(init());
        let runtime = Runtime::new().unwrap();
        let server = runtime.block_on(MockServer::start());
        let url = CString::new(server.uri()).unwrap();
        Self {
            server,
            runtime,
            url,
            key: CString::new(API_KEY).unwrap(),
        }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }
}

pub fn c(value: &str) -> CString {
    CString::new(value).unwrap()
}

/// An endpoint nothing listens on.
pub fn unreachable_url() -> CString {
    c("http://127.0.0.1:1")
}

pub unsafe fn read(ptr: *const c_char) -> String {
    assert!(!ptr.is_null(), "string pointer is null");
    unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
}

pub unsafe fn read_keywords(ptr: *const *const c_char, len: usize) -> Vec<String> {
    if len == 0 {
        return Vec::new();
    }
    unsafe { slice::from_raw_parts(ptr, len) }
        .iter()
        .map(|&keyword| unsafe { read(keyword) })
        .collect()
}

/// Host-side keyword array: owns the strings and the pointer table.
pub struct Keywords {
    strings: Vec<CString>,
    pub ptrs: Vec<*const c_char>,
}

impl Keywords {
    pub fn new(values: &[&str]) -> Self {
        let strings: Vec<CString> = values.iter().map(|v| c(v)).collect();
        let ptrs = strings.iter().map(|s| s.as_ptr()).collect();
        Self { strings, ptrs }
    }

    pub fn len(&self) -> usize {
        self.ptrs.len()
    }

    pub fn as_ptr(&self) -> *const *const c_char {
        self.ptrs.as_ptr()
    }

    pub fn as_mut_ptr(&mut self) -> *mut *const c_char {
        self.ptrs.as_mut_ptr()
    }
}

pub fn shop_json(id: i32, name: &str, description: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": description,
        "gold": 100,
        "shop_type": "general_store",
        "vendor_keywords": ["VendorItemKey", "VendorNoSale"],
        "vendor_keywords_exclude": true,
        "owner_id": 1,
        "created_at": "2020-08-18T00:00:00.000",
        "updated_at": "2020-08-18T00:00:00.000"
    })
}
