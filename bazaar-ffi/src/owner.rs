use crate::buffer::OwnedMirror;
use crate::result::FFIResult;
use crate::runtime::boundary;
use crate::strings::{into_c_string, read_endpoint, read_required, release_c_string};
use bazaar_types::Owner;
use std::ffi::c_char;
use tracing::info;

#[derive(Debug)]
#[repr(C)]
pub struct RawOwner {
    pub id: i32,
    pub name: *const c_char,
    pub mod_version: i32,
}

impl From<Owner> for RawOwner {
    fn from(owner: Owner) -> Self {
        RawOwner {
            id: owner.id.unwrap_or_default(),
            name: into_c_string(owner.name),
            mod_version: owner.mod_version,
        }
    }
}

impl OwnedMirror for RawOwner {
    unsafe fn release(self) {
        unsafe { release_c_string(self.name) };
    }
}

/// # Safety
/// `api_url`, `api_key` and `name` must be valid null-terminated strings.
/// An `Ok` owner must be freed with `free_owner`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn create_owner(
    api_url: *const c_char,
    api_key: *const c_char,
    name: *const c_char,
    mod_version: i32,
) -> FFIResult<RawOwner> {
    boundary("create_owner", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let name = unsafe { read_required(name, "name")? };
        info!("create_owner api_url: {api_url:?}, name: {name:?}, mod_version: {mod_version}");

        let client = context.client(&api_url, &api_key)?;
        let owner = context.block_on(client.create_owner(&name, mod_version))?;
        Ok(RawOwner::from(owner))
    })
}

/// # Safety
/// Same as [`create_owner`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn update_owner(
    api_url: *const c_char,
    api_key: *const c_char,
    id: i32,
    name: *const c_char,
    mod_version: i32,
) -> FFIResult<RawOwner> {
    boundary("update_owner", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let name = unsafe { read_required(name, "name")? };
        info!(
            "update_owner api_url: {api_url:?}, id: {id}, name: {name:?}, mod_version: {mod_version}"
        );

        let client = context.client(&api_url, &api_key)?;
        let owner = context.block_on(client.update_owner(id, &name, mod_version))?;
        Ok(RawOwner::from(owner))
    })
}

/// # Safety
/// `owner` must have been returned by this library and not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_owner(owner: RawOwner) {
    unsafe { owner.release() };
}
