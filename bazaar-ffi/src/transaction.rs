use crate::buffer::{keywords_into_raw, read_keywords, release_keywords, OwnedMirror};
use crate::error::BoundaryResult;
use crate::result::FFIResult;
use crate::runtime::boundary;
use crate::strings::{into_c_string, read_endpoint, read_required, release_c_string};
use bazaar_types::Transaction;
use std::ffi::c_char;
use tracing::info;

/// One buy or sell. `id` is ignored on input and assigned by the service.
#[derive(Debug)]
#[repr(C)]
pub struct RawTransaction {
    pub id: i32,
    pub shop_id: i32,
    pub mod_name: *const c_char,
    pub local_form_id: i32,
    pub name: *const c_char,
    pub form_type: i32,
    pub is_food: bool,
    pub price: i32,
    pub is_sell: bool,
    pub quantity: i32,
    pub amount: i32,
    pub keywords: *mut *const c_char,
    pub keywords_len: usize,
}

impl From<Transaction> for RawTransaction {
    fn from(transaction: Transaction) -> Self {
        let (keywords, keywords_len) = keywords_into_raw(transaction.keywords);
        RawTransaction {
            id: transaction.id.unwrap_or_default(),
            shop_id: transaction.shop_id,
            mod_name: into_c_string(transaction.mod_name),
            local_form_id: transaction.local_form_id,
            name: into_c_string(transaction.name),
            form_type: transaction.form_type,
            is_food: transaction.is_food,
            price: transaction.price,
            is_sell: transaction.is_sell,
            quantity: transaction.quantity,
            amount: transaction.amount,
            keywords,
            keywords_len,
        }
    }
}

impl RawTransaction {
    unsafe fn read(&self) -> BoundaryResult<Transaction> {
        unsafe {
            Ok(Transaction {
                id: None,
                shop_id: self.shop_id,
                mod_name: read_required(self.mod_name, "mod_name")?,
                local_form_id: self.local_form_id,
                name: read_required(self.name, "name")?,
                form_type: self.form_type,
                is_food: self.is_food,
                price: self.price,
                is_sell: self.is_sell,
                quantity: self.quantity,
                amount: self.amount,
                keywords: read_keywords(self.keywords, self.keywords_len, "keywords")?,
            })
        }
    }
}

impl OwnedMirror for RawTransaction {
    unsafe fn release(self) {
        unsafe {
            release_c_string(self.mod_name);
            release_c_string(self.name);
            release_keywords(self.keywords, self.keywords_len);
        }
    }
}

/// Records a transaction. Selling more than the shop stocks is rejected by
/// the service with a server error.
///
/// # Safety
/// `api_url` and `api_key` must be valid null-terminated strings and every
/// pointer in `raw_transaction` must be valid for reads. The host keeps
/// ownership of `raw_transaction`. An `Ok` transaction must be freed with
/// `free_transaction`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn create_transaction(
    api_url: *const c_char,
    api_key: *const c_char,
    raw_transaction: RawTransaction,
) -> FFIResult<RawTransaction> {
    boundary("create_transaction", |context| {
        let (api_url, api_key) = unsafe { read_endpoint(api_url, api_key)? };
        let transaction = unsafe { raw_transaction.read()? };
        let form = transaction.form_key().map_or_else(
            || format!("{}|{}", transaction.mod_name, transaction.local_form_id),
            |key| key.to_string(),
        );
        info!(
            "create_transaction api_url: {api_url:?}, shop_id: {}, form: {form}, is_sell: {}, quantity: {}, amount: {}",
            transaction.shop_id,
            transaction.is_sell,
            transaction.quantity,
            transaction.amount
        );

        let client = context.client(&api_url, &api_key)?;
        let saved = context.block_on(client.create_transaction(&transaction))?;
        Ok(RawTransaction::from(saved))
    })
}

/// # Safety
/// `transaction` must have been returned by this library and not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_transaction(transaction: RawTransaction) {
    unsafe { transaction.release() };
}
