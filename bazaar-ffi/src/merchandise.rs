use crate::buffer::{
    keywords_into_raw, read_keywords, read_slice, release_keywords, OwnedMirror, RawVec,
};
use crate::error::BoundaryResult;
use crate::result::FFIResult;
use crate::runtime::boundary;
use crate::strings::{into_c_string, read_endpoint, read_required, release_c_string};
use bazaar_types::{Merchandise, MerchandiseList};
use std::ffi::c_char;
use tracing::info;

#[derive(Debug)]
#[repr(C)]
pub struct RawMerchandise {
    pub mod_name: *const c_char,
    pub local_form_id: u32,
    pub name: *const c_char,
    pub quantity: u32,
    pub form_type: u32,
    pub is_food: bool,
    pub price: u32,
    pub keywords: *mut *const c_char,
    pub keywords_len: usize,
}

pub type RawMerchandiseVec = RawVec<RawMerchandise>;

impl From<Merchandise> for RawMerchandise {
    fn from(merchandise: Merchandise) -> Self {
        let (keywords, keywords_len) = keywords_into_raw(merchandise.keywords);
        RawMerchandise {
            mod_name: into_c_string(merchandise.mod_name),
            local_form_id: merchandise.local_form_id,
            name: into_c_string(merchandise.name),
            quantity: merchandise.quantity,
            form_type: merchandise.form_type,
            is_food: merchandise.is_food,
            price: merchandise.price,
            keywords,
            keywords_len,
        }
    }
}

impl RawMerchandise {
    /// Copies a host-owned record.
    ///
    /// # Safety
    /// Every pointer must be valid for reads.
    unsafe fn read(&self) -> BoundaryResult<Merchandise> {
        unsafe {
            Ok(Merchandise {
                mod_name: read_required(self.mod_name, "mod_name")?,
                local_form_id: self.local_form_id,
                name: read_required(self.name, "name")?,
                quantity: self.quantity,
                form_type: self.form_type,
                is_food: self.is_food,
                price: self.price,
                keywords: read_keywords(self.keywords, self.keywords_len, "keywords")?,
            })
        }
    }
}

impl OwnedMirror for RawMerchandise {
    unsafe fn release(self) {
        unsafe {
            release_c_string(self.mod_name);
            release_c_string(self.name);
            release_keywords(self.keywords, self.keywords_len);
        }
    }
}

fn into_raw_vec(list: MerchandiseList) -> RawMerchandiseVec {
    RawVec::from(
        list.form_list
            .into_iter()
            .map(RawMerchandise::from)
            .collect::<Vec<_>>(),
    )
}

unsafe fn read_form_list(
    ptr: *const RawMerchandise,
    len: usize,
) -> BoundaryResult<Vec<Merchandise>> {
    unsafe { read_slice(ptr, len, "merchandise")? }
        .iter()
        .map(|raw| unsafe { raw.read() })
        .collect()
}

/// # Safety
/// `api_url` and `api_key` must be valid null-terminated strings and
/// `raw_merchandise_ptr` must point to `raw_merchandise_len` records (or be
/// null with length zero). An `Ok` buffer must be freed with
/// `free_merchandise_vec`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn create_merchandise_list(
    api_url: *const c_char,
    api_key: *const c_char,
    shop_id: i32,
    raw_merchandise_ptr: *const RawMerchandise,
    raw_merchandise_len: usize,
) -> FFIResult<RawMerchandiseVec> {
    boundary("create_merchandise_list", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let form_list = unsafe { read_form_list(raw_merchandise_ptr, raw_merchandise_len)? };
        info!(
            "create_merchandise_list api_url: {api_url:?}, shop_id: {shop_id}, merchandise: {}",
            form_list.len()
        );

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.create_merchandise_list(shop_id, form_list))?;
        Ok(into_raw_vec(list))
    })
}

/// Replaces the whole catalog of `shop_id`.
///
/// # Safety
/// Same as [`create_merchandise_list`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn update_merchandise_list(
    api_url: *const c_char,
    api_key: *const c_char,
    shop_id: i32,
    raw_merchandise_ptr: *const RawMerchandise,
    raw_merchandise_len: usize,
) -> FFIResult<RawMerchandiseVec> {
    boundary("update_merchandise_list", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let form_list = unsafe { read_form_list(raw_merchandise_ptr, raw_merchandise_len)? };
        info!(
            "update_merchandise_list api_url: {api_url:?}, shop_id: {shop_id}, merchandise: {}",
            form_list.len()
        );

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.update_merchandise_list(shop_id, form_list))?;
        Ok(into_raw_vec(list))
    })
}

/// # Safety
/// `api_url` and `api_key` must be valid null-terminated strings. An `Ok`
/// buffer must be freed with `free_merchandise_vec`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_merchandise_list(
    api_url: *const c_char,
    api_key: *const c_char,
    merchandise_list_id: i32,
) -> FFIResult<RawMerchandiseVec> {
    boundary("get_merchandise_list", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        info!("get_merchandise_list api_url: {api_url:?}, merchandise_list_id: {merchandise_list_id}");

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.get_merchandise_list(merchandise_list_id))?;
        Ok(into_raw_vec(list))
    })
}

/// # Safety
/// Same as [`get_merchandise_list`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_merchandise_list_by_shop_id(
    api_url: *const c_char,
    api_key: *const c_char,
    shop_id: i32,
) -> FFIResult<RawMerchandiseVec> {
    boundary("get_merchandise_list_by_shop_id", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        info!("get_merchandise_list_by_shop_id api_url: {api_url:?}, shop_id: {shop_id}");

        let client = context.client(&api_url, &api_key)?;
        let list = context.block_on(client.get_merchandise_list_by_shop_id(shop_id))?;
        Ok(into_raw_vec(list))
    })
}

/// # Safety
/// `merchandise` must have been returned by this library and not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_merchandise_vec(merchandise: RawMerchandiseVec) {
    unsafe { merchandise.release() };
}
