//! Result and error envelopes returned by every boundary call.

use crate::error::BoundaryError;
use crate::strings::{into_c_string, optional_into_c_string, release_c_string};
use bazaar_client::ClientError;
use std::ffi::{c_char, CStr};
use tracing::debug;

/// A failure the service reported in its response.
///
/// `detail` is the empty string when the service sent none.
#[derive(Debug, PartialEq)]
#[repr(C)]
pub struct FFIServerError {
    pub status: u16,
    pub title: *const c_char,
    pub detail: *const c_char,
}

/// Error payload of a failed call.
///
/// `Server` means the service answered with a failure status. `Network`
/// covers every case where no usable answer was obtained, including
/// invalid arguments and a missing runtime.
#[derive(Debug, PartialEq)]
#[repr(C, u8)]
pub enum FFIError {
    Server(FFIServerError),
    Network(*const c_char),
}

/// Outcome of a boundary call. Exactly one variant is populated.
#[derive(Debug, PartialEq)]
#[repr(C, u8)]
pub enum FFIResult<T> {
    Ok(T),
    Err(FFIError),
}

impl<T> FFIResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, FFIResult::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, FFIResult::Err(_))
    }

    /// # Panics
    /// If the result is an error.
    #[track_caller]
    pub fn as_ok(&self) -> &T {
        match self {
            FFIResult::Ok(value) => value,
            FFIResult::Err(_) => panic!("called `FFIResult::as_ok` on an `Err` value"),
        }
    }

    /// # Panics
    /// If the result is a success.
    #[track_caller]
    pub fn as_err(&self) -> &FFIError {
        match self {
            FFIResult::Err(error) => error,
            FFIResult::Ok(_) => panic!("called `FFIResult::as_err` on an `Ok` value"),
        }
    }

    pub fn into_result(self) -> Result<T, FFIError> {
        match self {
            FFIResult::Ok(value) => Ok(value),
            FFIResult::Err(error) => Err(error),
        }
    }
}

impl FFIError {
    pub(crate) fn network(message: impl Into<String>) -> Self {
        FFIError::Network(into_c_string(message))
    }

    pub fn is_server(&self) -> bool {
        matches!(self, FFIError::Server(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, FFIError::Network(_))
    }

    /// Renders the plain-string form: `Server <status> <title>[: <detail>]`
    /// or the network message.
    ///
    /// # Safety
    /// The error must have been produced by this library and not released.
    pub unsafe fn message(&self) -> String {
        unsafe {
            match self {
                FFIError::Server(server) => {
                    let title = lossy(server.title);
                    let detail = lossy(server.detail);
                    if detail.is_empty() {
                        format!("Server {} {}", server.status, title)
                    } else {
                        format!("Server {} {}: {}", server.status, title, detail)
                    }
                }
                FFIError::Network(message) => lossy(*message),
            }
        }
    }
}

unsafe fn lossy(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

impl From<&BoundaryError> for FFIError {
    fn from(error: &BoundaryError) -> Self {
        match error {
            BoundaryError::Client(ClientError::Server(server)) => {
                FFIError::Server(FFIServerError {
                    status: server.status.as_u16(),
                    title: into_c_string(server.title.as_str()),
                    detail: optional_into_c_string(server.detail.clone()),
                })
            }
            other => FFIError::network(other.to_string()),
        }
    }
}

/// Frees the strings carried by an error.
///
/// # Safety
/// `error` must have been returned by this library and not yet released.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_ffi_error(error: FFIError) {
    unsafe {
        match error {
            FFIError::Server(server) => {
                release_c_string(server.title);
                release_c_string(server.detail);
            }
            FFIError::Network(message) => release_c_string(message),
        }
    }
}

/// Renders an error as a single message string. A null `error` yields the
/// empty string.
///
/// # Safety
/// `error` must be null or point to an error returned by this library.
/// The returned pointer must be freed with `free_string`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn error_message(error: *const FFIError) -> *mut c_char {
    let message = match unsafe { error.as_ref() } {
        Some(error) => unsafe { error.message() },
        None => String::new(),
    };
    debug!("error_message: {message}");
    into_c_string(message) as *mut c_char
}
