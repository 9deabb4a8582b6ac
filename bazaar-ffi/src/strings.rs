//! C string transfer in both directions.

use crate::error::{BoundaryError, BoundaryResult};
use crate::ledger;
use std::ffi::{c_char, CStr, CString};

/// Transfers `value` out as a host-owned C string. Interior NUL bytes are
/// dropped.
pub(crate) fn into_c_string(value: impl Into<String>) -> *const c_char {
    let mut bytes = value.into().into_bytes();
    bytes.retain(|&b| b != 0);
    let ptr = CString::new(bytes).unwrap_or_default().into_raw();
    ledger::record(ptr);
    ptr
}

/// Absent values go out as the empty string, never as null.
pub(crate) fn optional_into_c_string(value: Option<String>) -> *const c_char {
    into_c_string(value.unwrap_or_default())
}

/// Frees a string produced by [`into_c_string`]. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or have come from [`into_c_string`].
pub(crate) unsafe fn release_c_string(ptr: *const c_char) {
    if ptr.is_null() || !ledger::release(ptr) {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

/// Reads a required borrowed string. Invalid UTF-8 is replaced lossily.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated string.
pub(crate) unsafe fn read_required(
    ptr: *const c_char,
    name: &'static str,
) -> BoundaryResult<String> {
    if ptr.is_null() {
        return Err(BoundaryError::NullPointer(name));
    }
    Ok(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// Reads an optional borrowed string. Null and empty both mean absent.
///
/// # Safety
/// `ptr` must be null or a valid null-terminated string.
pub(crate) unsafe fn read_optional(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let value = unsafe { CStr::from_ptr(ptr) }.to_string_lossy();
    (!value.is_empty()).then(|| value.into_owned())
}

/// Reads the `(api_url, api_key)` pair every remote call starts with.
///
/// # Safety
/// Both pointers must be null or valid null-terminated strings.
pub(crate) unsafe fn read_endpoint(
    api_url: *const c_char,
    api_key: *const c_char,
) -> BoundaryResult<(String, String)> {
    unsafe {
        Ok((
            read_required(api_url, "api_url")?,
            read_required(api_key, "api_key")?,
        ))
    }
}
