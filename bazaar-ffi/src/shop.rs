use crate::buffer::{keywords_into_raw, read_keywords, release_keywords, OwnedMirror, RawVec};
use crate::result::FFIResult;
use crate::runtime::boundary;
use crate::strings::{
    into_c_string, read_endpoint, read_optional, read_required, release_c_string,
};
use bazaar_client::ShopUpdate;
use bazaar_types::{Shop, DEFAULT_SHOP_TYPE};
use std::ffi::c_char;
use tracing::info;

#[derive(Debug)]
#[repr(C)]
pub struct RawShop {
    pub id: i32,
    pub name: *const c_char,
    pub description: *const c_char,
    pub gold: i32,
    pub shop_type: *const c_char,
    pub vendor_keywords: *mut *const c_char,
    pub vendor_keywords_len: usize,
    pub vendor_keywords_exclude: bool,
}

pub type RawShopVec = RawVec<RawShop>;

impl From<Shop> for RawShop {
    fn from(shop: Shop) -> Self {
        let (vendor_keywords, vendor_keywords_len) = keywords_into_raw(shop.vendor_keywords);
        RawShop {
            id: shop.id.unwrap_or_default(),
            name: into_c_string(shop.name),
            description: into_c_string(shop.description),
            gold: shop.gold,
            shop_type: into_c_string(shop.shop_type),
            vendor_keywords,
            vendor_keywords_len,
            vendor_keywords_exclude: shop.vendor_keywords_exclude,
        }
    }
}

impl OwnedMirror for RawShop {
    unsafe fn release(self) {
        unsafe {
            release_c_string(self.name);
            release_c_string(self.description);
            release_c_string(self.shop_type);
            release_keywords(self.vendor_keywords, self.vendor_keywords_len);
        }
    }
}

/// # Safety
/// All string arguments must be valid null-terminated strings. An `Ok` shop
/// must be freed with `free_shop`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn create_shop(
    api_url: *const c_char,
    api_key: *const c_char,
    name: *const c_char,
    description: *const c_char,
) -> FFIResult<RawShop> {
    boundary("create_shop", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let name = unsafe { read_required(name, "name")? };
        let description = unsafe { read_required(description, "description")? };
        info!("create_shop api_url: {api_url:?}, name: {name:?}, description: {description:?}");

        let client = context.client(&api_url, &api_key)?;
        let shop = context.block_on(client.create_shop(&name, &description))?;
        Ok(RawShop::from(shop))
    })
}

/// Replaces every editable field of shop `id`. A null or empty `shop_type`
/// means the default type.
///
/// # Safety
/// All string arguments must be valid null-terminated strings, and
/// `vendor_keywords` must point to `vendor_keywords_len` of them (or be null
/// with length zero). An `Ok` shop must be freed with `free_shop`.
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn update_shop(
    api_url: *const c_char,
    api_key: *const c_char,
    id: i32,
    name: *const c_char,
    description: *const c_char,
    gold: i32,
    shop_type: *const c_char,
    vendor_keywords: *const *const c_char,
    vendor_keywords_len: usize,
    vendor_keywords_exclude: bool,
) -> FFIResult<RawShop> {
    boundary("update_shop", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let update = unsafe {
            ShopUpdate {
                name: read_required(name, "name")?,
                description: read_required(description, "description")?,
                gold,
                shop_type: read_optional(shop_type)
                    .unwrap_or_else(|| DEFAULT_SHOP_TYPE.to_string()),
                vendor_keywords: read_keywords(
                    vendor_keywords,
                    vendor_keywords_len,
                    "vendor_keywords",
                )?,
                vendor_keywords_exclude,
            }
        };
        info!(
            "update_shop api_url: {api_url:?}, id: {id}, name: {:?}, gold: {gold}, shop_type: {:?}, vendor_keywords: {:?}, vendor_keywords_exclude: {vendor_keywords_exclude}",
            update.name, update.shop_type, update.vendor_keywords
        );

        let client = context.client(&api_url, &api_key)?;
        let shop = context.block_on(client.update_shop(id, update))?;
        Ok(RawShop::from(shop))
    })
}

/// # Safety
/// `api_url` and `api_key` must be valid null-terminated strings. An `Ok`
/// shop must be freed with `free_shop`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn get_shop(
    api_url: *const c_char,
    api_key: *const c_char,
    shop_id: i32,
) -> FFIResult<RawShop> {
    boundary("get_shop", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        info!("get_shop api_url: {api_url:?}, shop_id: {shop_id}");

        let client = context.client(&api_url, &api_key)?;
        let shop = context.block_on(client.get_shop(shop_id))?;
        Ok(RawShop::from(shop))
    })
}

/// # Safety
/// `api_url` and `api_key` must be valid null-terminated strings. An `Ok`
/// buffer must be freed with `free_shop_vec`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn list_shops(
    api_url: *const c_char,
    api_key: *const c_char,
) -> FFIResult<RawShopVec> {
    boundary("list_shops", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        info!("list_shops api_url: {api_url:?}");

        let client = context.client(&api_url, &api_key)?;
        let shops = context.block_on(client.list_shops())?;
        info!("list_shops returned {} shops", shops.len());
        Ok(RawVec::from(
            shops.into_iter().map(RawShop::from).collect::<Vec<_>>(),
        ))
    })
}

/// # Safety
/// `shop` must have been returned by this library and not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_shop(shop: RawShop) {
    unsafe { shop.release() };
}

/// # Safety
/// `shops` must have been returned by this library and not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_shop_vec(shops: RawShopVec) {
    unsafe { shops.release() };
}
