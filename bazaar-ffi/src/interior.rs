//! Interior layouts: placed object references plus shelves, stored and
//! replaced as one unit per shop.

use crate::buffer::{read_slice, OwnedMirror, RawVec};
use crate::error::BoundaryResult;
use crate::result::FFIResult;
use crate::runtime::boundary;
use crate::strings::{
    into_c_string, optional_into_c_string, read_endpoint, read_optional, read_required,
    release_c_string,
};
use bazaar_types::{InteriorRef, InteriorRefList, Shelf};
use std::ffi::c_char;
use tracing::info;

/// One placed object. An empty `ref_mod_name` means the reference was
/// created at runtime rather than by a plugin.
#[derive(Debug)]
#[repr(C)]
pub struct RawInteriorRef {
    pub base_mod_name: *const c_char,
    pub base_local_form_id: u32,
    pub ref_mod_name: *const c_char,
    pub ref_local_form_id: u32,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub angle_x: f32,
    pub angle_y: f32,
    pub angle_z: f32,
    pub scale: u16,
}

/// A display fixture. `filter_form_type == 0` disables the form-type
/// filter; an empty `search` or `sort_on` means unset.
#[derive(Debug)]
#[repr(C)]
pub struct RawShelf {
    pub shelf_type: u32,
    pub position_x: f32,
    pub position_y: f32,
    pub position_z: f32,
    pub angle_x: f32,
    pub angle_y: f32,
    pub angle_z: f32,
    pub scale: u16,
    pub page: u32,
    pub filter_form_type: u32,
    pub filter_is_food: bool,
    pub search: *const c_char,
    pub sort_on: *const c_char,
    pub sort_asc: bool,
}

pub type RawInteriorRefVec = RawVec<RawInteriorRef>;
pub type RawShelfVec = RawVec<RawShelf>;

/// A shop's full layout.
#[derive(Debug)]
#[repr(C)]
pub struct RawInteriorRefData {
    pub interior_ref_vec: RawInteriorRefVec,
    pub shelf_vec: RawShelfVec,
}

impl From<InteriorRef> for RawInteriorRef {
    fn from(interior_ref: InteriorRef) -> Self {
        RawInteriorRef {
            base_mod_name: into_c_string(interior_ref.base_mod_name),
            base_local_form_id: interior_ref.base_local_form_id,
            ref_mod_name: optional_into_c_string(interior_ref.ref_mod_name),
            ref_local_form_id: interior_ref.ref_local_form_id,
            position_x: interior_ref.position_x,
            position_y: interior_ref.position_y,
            position_z: interior_ref.position_z,
            angle_x: interior_ref.angle_x,
            angle_y: interior_ref.angle_y,
            angle_z: interior_ref.angle_z,
            scale: interior_ref.scale,
        }
    }
}

impl From<Shelf> for RawShelf {
    fn from(shelf: Shelf) -> Self {
        RawShelf {
            shelf_type: shelf.shelf_type,
            position_x: shelf.position_x,
            position_y: shelf.position_y,
            position_z: shelf.position_z,
            angle_x: shelf.angle_x,
            angle_y: shelf.angle_y,
            angle_z: shelf.angle_z,
            scale: shelf.scale,
            page: shelf.page,
            filter_form_type: shelf.filter_form_type.unwrap_or_default(),
            filter_is_food: shelf.filter_is_food,
            search: optional_into_c_string(shelf.search),
            sort_on: optional_into_c_string(shelf.sort_on),
            sort_asc: shelf.sort_asc,
        }
    }
}

impl From<InteriorRefList> for RawInteriorRefData {
    fn from(list: InteriorRefList) -> Self {
        RawInteriorRefData {
            interior_ref_vec: RawVec::from(
                list.ref_list
                    .into_iter()
                    .map(RawInteriorRef::from)
                    .collect::<Vec<_>>(),
            ),
            shelf_vec: RawVec::from(
                list.shelves
                    .into_iter()
                    .map(RawShelf::from)
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

impl RawInteriorRef {
    unsafe fn read(&self) -> BoundaryResult<InteriorRef> {
        unsafe {
            Ok(InteriorRef {
                base_mod_name: read_required(self.base_mod_name, "base_mod_name")?,
                base_local_form_id: self.base_local_form_id,
                ref_mod_name: read_optional(self.ref_mod_name),
                ref_local_form_id: self.ref_local_form_id,
                position_x: self.position_x,
                position_y: self.position_y,
                position_z: self.position_z,
                angle_x: self.angle_x,
                angle_y: self.angle_y,
                angle_z: self.angle_z,
                scale: self.scale,
            })
        }
    }
}

impl RawShelf {
    unsafe fn read(&self) -> Shelf {
        unsafe {
            Shelf {
                shelf_type: self.shelf_type,
                position_x: self.position_x,
                position_y: self.position_y,
                position_z: self.position_z,
                angle_x: self.angle_x,
                angle_y: self.angle_y,
                angle_z: self.angle_z,
                scale: self.scale,
                page: self.page,
                filter_form_type: (self.filter_form_type != 0).then_some(self.filter_form_type),
                filter_is_food: self.filter_is_food,
                search: read_optional(self.search),
                sort_on: read_optional(self.sort_on),
                sort_asc: self.sort_asc,
            }
        }
    }
}

impl OwnedMirror for RawInteriorRef {
    unsafe fn release(self) {
        unsafe {
            release_c_string(self.base_mod_name);
            release_c_string(self.ref_mod_name);
        }
    }
}

impl OwnedMirror for RawShelf {
    unsafe fn release(self) {
        unsafe {
            release_c_string(self.search);
            release_c_string(self.sort_on);
        }
    }
}

impl OwnedMirror for RawInteriorRefData {
    unsafe fn release(self) {
        unsafe {
            self.interior_ref_vec.release();
            self.shelf_vec.release();
        }
    }
}

unsafe fn read_layout(
    raw_interior_ref_ptr: *const RawInteriorRef,
    raw_interior_ref_len: usize,
    raw_shelf_ptr: *const RawShelf,
    raw_shelf_len: usize,
) -> BoundaryResult<(Vec<InteriorRef>, Vec<Shelf>)> {
    unsafe {
        let refs = read_slice(raw_interior_ref_ptr, raw_interior_ref_len, "interior_refs")?
            .iter()
            .map(|raw| raw.read())
            .collect::<BoundaryResult<Vec<_>>>()?;
        let shelves = read_slice(raw_shelf_ptr, raw_shelf_len, "shelves")?
            .iter()
            .map(|raw| raw.read())
            .collect();
        Ok((refs, shelves))
    }
}

/// Stores a new layout for `shop_id` and returns its id.
///
/// # Safety
/// `api_url` and `api_key` must be valid null-terminated strings. Each array
/// pointer must point to its length of records, or be null with length zero.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn create_interior_ref_list(
    api_url: *const c_char,
    api_key: *const c_char,
    shop_id: i32,
    raw_interior_ref_ptr: *const RawInteriorRef,
    raw_interior_ref_len: usize,
    raw_shelf_ptr: *const RawShelf,
    raw_shelf_len: usize,
) -> FFIResult<i32> {
    boundary("create_interior_ref_list", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let (refs, shelves) = unsafe {
            read_layout(raw_interior_ref_ptr, raw_interior_ref_len, raw_shelf_ptr, raw_shelf_len)?
        };
        info!(
            "create_interior_ref_list api_url: {api_url:?}, shop_id: {shop_id}, refs: {}, shelves: {}",
            refs.len(),
            shelves.len()
        );

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.create_interior_ref_list(shop_id, refs, shelves))?;
        Ok(list.id.unwrap_or_default())
    })
}

/// Replaces the layout of `shop_id` and returns its id. Only that shop's
/// layout changes.
///
/// # Safety
/// Same as [`create_interior_ref_list`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn update_interior_ref_list(
    api_url: *const c_char,
    api_key: *const c_char,
    shop_id: i32,
    raw_interior_ref_ptr: *const RawInteriorRef,
    raw_interior_ref_len: usize,
    raw_shelf_ptr: *const RawShelf,
    raw_shelf_len: usize,
) -> FFIResult<i32> {
    boundary("update_interior_ref_list", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let (refs, shelves) = unsafe {
            read_layout(raw_interior_ref_ptr, raw_interior_ref_len, raw_shelf_ptr, raw_shelf_len)?
        };
        info!(
            "update_interior_ref_list api_url: {api_url:?}, shop_id: {shop_id}, refs: {}, shelves: {}",
            refs.len(),
            shelves.len()
        );

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.update_interior_ref_list(shop_id, refs, shelves))?;
        Ok(list.id.unwrap_or_default())
    })
}

/// # Safety
/// `api_url` and `api_key` must be valid null-terminated strings. An `Ok`
/// layout must be freed with `free_interior_ref_data`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_interior_ref_list(
    api_url: *const c_char,
    api_key: *const c_char,
    interior_ref_list_id: i32,
) -> FFIResult<RawInteriorRefData> {
    boundary("get_interior_ref_list", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        info!("get_interior_ref_list api_url: {api_url:?}, interior_ref_list_id: {interior_ref_list_id}");

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.get_interior_ref_list(interior_ref_list_id))?;
        Ok(RawInteriorRefData::from(list))
    })
}

/// # Safety
/// Same as [`get_interior_ref_list`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_interior_ref_list_by_shop_id(
    api_url: *const c_char,
    api_key: *const c_char,
    shop_id: i32,
) -> FFIResult<RawInteriorRefData> {
    boundary("get_interior_ref_list_by_shop_id", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        info!("get_interior_ref_list_by_shop_id api_url: {api_url:?}, shop_id: {shop_id}");

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.get_interior_ref_list_by_shop_id(shop_id))?;
        Ok(RawInteriorRefData::from(list))
    })
}

/// # Safety
/// `data` must have been returned by this library and not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_interior_ref_data(data: RawInteriorRefData) {
    unsafe { data.release() };
}
