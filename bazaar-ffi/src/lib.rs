//! C ABI for the Bazaar shop-service client.
//!
//! Every exported call takes borrowed arguments, performs one blocking
//! round-trip to the service and returns an [`FFIResult`] by value:
//! - Strings and arrays inside an `Ok` value are owned by the caller and
//!   must be handed back to the matching `free_*` function exactly once.
//! - Errors are never thrown across the boundary. [`FFIError::Server`]
//!   carries the service's status, title and detail; everything else is
//!   [`FFIError::Network`].
//! - [`init`] must succeed before any remote call.
//!
//! # Safety
//!
//! Callers must pass valid null-terminated strings and `(ptr, len)` arrays
//! that stay alive for the duration of the call, and must not release a
//! returned value twice. Debug builds check releases with the
//! [`ledger`].

mod buffer;
mod client;
mod error;
mod interior;
pub mod ledger;
mod merchandise;
mod owner;
mod result;
mod runtime;
mod shop;
mod strings;
mod transaction;

use std::ffi::c_char;

pub use buffer::RawVec;
pub use client::{generate_api_key, init, status_check};
pub use error::{BoundaryError, BoundaryResult};
pub use interior::{
    create_interior_ref_list, free_interior_ref_data, get_interior_ref_list,
    get_interior_ref_list_by_shop_id, update_interior_ref_list, RawInteriorRef,
    RawInteriorRefData, RawInteriorRefVec, RawShelf, RawShelfVec,
};
pub use merchandise::{
    create_merchandise_list, free_merchandise_vec, get_merchandise_list,
    get_merchandise_list_by_shop_id, update_merchandise_list, RawMerchandise,
    RawMerchandiseVec,
};
pub use owner::{create_owner, free_owner, update_owner, RawOwner};
pub use result::{error_message, free_ffi_error, FFIError, FFIResult, FFIServerError};
pub use runtime::{lifecycle, Lifecycle, LogConfig};
pub use shop::{
    create_shop, free_shop, free_shop_vec, get_shop, list_shops, update_shop, RawShop,
    RawShopVec,
};
pub use transaction::{create_transaction, free_transaction, RawTransaction};

/// Frees a string returned by this library. Null is a no-op.
///
/// # Safety
/// `ptr` must be null or a string returned by this library that has not
/// been freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_string(ptr: *mut c_char) {
    unsafe { strings::release_c_string(ptr) };
}
