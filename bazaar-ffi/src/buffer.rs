//! Buffer transfer: growable arrays handed to the host as `(ptr, len, cap)`
//! and keyword arrays nested in mirrors as `(ptr, len)`.

use crate::error::{BoundaryError, BoundaryResult};
use crate::ledger;
use crate::strings::{into_c_string, read_required, release_c_string};
use std::ffi::c_char;
use std::mem::ManuallyDrop;
use std::{ptr, slice};

/// A `Vec<T>` whose ownership has moved to the host.
///
/// `len <= cap` always holds, and `cap` must come back unchanged on release.
/// An empty buffer has a dangling, non-null `ptr` and owns no allocation. A
/// zeroed buffer (null `ptr`) releases as nothing.
#[derive(Debug)]
#[repr(C)]
pub struct RawVec<T> {
    pub ptr: *mut T,
    pub len: usize,
    pub cap: usize,
}

impl<T> From<Vec<T>> for RawVec<T> {
    fn from(vec: Vec<T>) -> Self {
        let mut vec = ManuallyDrop::new(vec);
        let raw = RawVec {
            ptr: vec.as_mut_ptr(),
            len: vec.len(),
            cap: vec.capacity(),
        };
        if raw.cap > 0 {
            ledger::record(raw.ptr);
        }
        raw
    }
}

impl<T> RawVec<T> {
    /// Borrows the elements.
    ///
    /// # Safety
    /// The buffer must have been produced by this library and not released.
    pub unsafe fn as_slice(&self) -> &[T] {
        if self.len == 0 {
            &[]
        } else {
            unsafe { slice::from_raw_parts(self.ptr, self.len) }
        }
    }

    /// Takes the allocation back. Returns `None` for a null (zeroed) buffer or
    /// when the ledger refuses the release.
    unsafe fn into_vec(self) -> Option<Vec<T>> {
        if self.ptr.is_null() {
            return None;
        }
        if self.cap > 0 && !ledger::release(self.ptr) {
            return None;
        }
        Some(unsafe { Vec::from_raw_parts(self.ptr, self.len, self.cap) })
    }
}

impl<T: OwnedMirror> RawVec<T> {
    /// Frees every element's owned fields, then the buffer.
    ///
    /// # Safety
    /// The buffer must have been produced by this library.
    pub(crate) unsafe fn release(self) {
        if let Some(items) = unsafe { self.into_vec() } {
            for item in items {
                unsafe { item.release() };
            }
        }
    }
}

/// A mirror struct holding host-visible allocations of its own.
pub(crate) trait OwnedMirror: Sized {
    /// Frees every allocation the mirror points to.
    ///
    /// # Safety
    /// Every pointer in `self` must have been produced by this library.
    unsafe fn release(self);
}

/// Transfers keywords out as a `(ptr, len)` array of C strings. Capacity
/// always equals length.
pub(crate) fn keywords_into_raw(keywords: Vec<String>) -> (*mut *const c_char, usize) {
    let array: Box<[*const c_char]> = keywords.into_iter().map(into_c_string).collect();
    let len = array.len();
    let ptr = Box::into_raw(array) as *mut *const c_char;
    if len > 0 {
        ledger::record(ptr);
    }
    (ptr, len)
}

/// Frees an array produced by [`keywords_into_raw`] and every string in it.
///
/// # Safety
/// `(ptr, len)` must have come from [`keywords_into_raw`].
pub(crate) unsafe fn release_keywords(ptr: *mut *const c_char, len: usize) {
    if ptr.is_null() || (len > 0 && !ledger::release(ptr)) {
        return;
    }
    let array = unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len)) };
    for &keyword in array.iter() {
        unsafe { release_c_string(keyword) };
    }
}

/// Borrows a host array for the duration of a call. A null pointer is only
/// accepted with length zero.
///
/// # Safety
/// A non-null `ptr` must point to `len` initialized values.
pub(crate) unsafe fn read_slice<'a, T>(
    ptr: *const T,
    len: usize,
    name: &'static str,
) -> BoundaryResult<&'a [T]> {
    if len == 0 {
        Ok(&[])
    } else if ptr.is_null() {
        Err(BoundaryError::NullPointer(name))
    } else {
        Ok(unsafe { slice::from_raw_parts(ptr, len) })
    }
}

/// Copies a host keyword array.
///
/// # Safety
/// As [`read_slice`], and every element must be a valid C string.
pub(crate) unsafe fn read_keywords(
    ptr: *const *const c_char,
    len: usize,
    name: &'static str,
) -> BoundaryResult<Vec<String>> {
    unsafe { read_slice(ptr, len, name)? }
        .iter()
        .map(|&keyword| unsafe { read_required(keyword, name) })
        .collect()
}
