//! Lifecycle and connectivity exports.

use crate::result::FFIResult;
use crate::runtime::{self, boundary};
use crate::strings::{into_c_string, read_required};
use std::ffi::c_char;
use std::panic::catch_unwind;
use tracing::info;

/// Starts logging, the async runtime and the HTTP pool. Safe to call more
/// than once and from several threads; returns true once the library is
/// ready.
#[unsafe(no_mangle)]
pub extern "C" fn init() -> bool {
    matches!(catch_unwind(runtime::initialize), Ok(Ok(())))
}

/// Checks that the service at `api_url` answers.
///
/// # Safety
/// `api_url` must be a valid null-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn status_check(api_url: *const c_char) -> FFIResult<bool> {
    boundary("status_check", |context| {
        let api_url = unsafe { read_required(api_url, "api_url")? };
        info!("status_check api_url: {api_url:?}");

        let client = context.client(&api_url, "")?;
        context.block_on(client.status_check())?;
        Ok(true)
    })
}

/// Returns a fresh random API key.
///
/// The returned pointer must be freed with `free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn generate_api_key() -> *mut c_char {
    let key = bazaar_client::generate_api_key();
    info!("generate_api_key successful");
    into_c_string(key) as *mut c_char
}
