//! Async client for the shop service's `v1` REST API.
//!
//! Every method performs exactly one request. Nothing is cached; a failed
//! request is reported, never retried.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, ServerError};
use bazaar_types::{
    Identified, InteriorRef, InteriorRefList, Merchandise, MerchandiseList, Owner, Shelf, Shop,
    Transaction,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

/// API version prefix joined onto the base URL.
pub const API_VERSION: &str = "v1";

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "Api-Key";

/// Fields of a shop the caller may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopUpdate {
    pub name: String,
    pub description: String,
    pub gold: i32,
    pub shop_type: String,
    pub vendor_keywords: Vec<String>,
    pub vendor_keywords_exclude: bool,
}

impl ShopUpdate {
    fn into_shop(self, id: i32) -> Shop {
        Shop {
            id: Some(id),
            name: self.name,
            description: self.description,
            gold: self.gold,
            shop_type: self.shop_type,
            vendor_keywords: self.vendor_keywords,
            vendor_keywords_exclude: self.vendor_keywords_exclude,
        }
    }
}

/// A client bound to one service endpoint and API key.
///
/// Cheap to build: the pooled [`Client`] is shared by cloning.
#[derive(Debug, Clone)]
pub struct BazaarClient {
    http: Client,
    base_url: Url,
    api_key: String,
    config: ClientConfig,
}

impl BazaarClient {
    /// Creates a client that reuses an existing HTTP pool.
    pub fn with_http(
        http: Client,
        api_url: &str,
        api_key: &str,
        config: ClientConfig,
    ) -> ClientResult<Self> {
        let base_url =
            Url::parse(api_url).map_err(|e| ClientError::Url(format!("{api_url}: {e}")))?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.to_string(),
            config,
        })
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        let url = self
            .base_url
            .join(&format!("{API_VERSION}/{path}"))
            .map_err(|e| ClientError::Url(e.to_string()))?;
        debug!("request url: {url}");
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.header(API_KEY_HEADER, &self.api_key)
        }
    }

    /// Sends a request and returns the raw success body, or the server error
    /// built from a non-success response.
    async fn send_raw(&self, request: RequestBuilder) -> ClientResult<Vec<u8>> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!("response {status}, {} bytes", body.len());
        if status.is_success() {
            Ok(body.to_vec())
        } else {
            let server_error = ServerError::from_response(status, &body);
            error!("{server_error}");
            Err(server_error.into())
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        let body = self.send_raw(request).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    // ── Status ───────────────────────────────────────────────────

    /// Liveness check. Succeeds on any 2xx response.
    pub async fn status_check(&self) -> ClientResult<()> {
        let url = self.url("status")?;
        self.send_raw(self.http.get(url)).await?;
        Ok(())
    }

    // ── Owners ───────────────────────────────────────────────────

    pub async fn create_owner(&self, name: &str, mod_version: i32) -> ClientResult<Owner> {
        let owner = Owner::from_game(name, mod_version);
        let url = self.url("owners")?;
        saved(self.send(self.http.post(url).json(&owner)).await?)
    }

    pub async fn update_owner(&self, id: i32, name: &str, mod_version: i32) -> ClientResult<Owner> {
        let owner = Owner {
            id: Some(id),
            ..Owner::from_game(name, mod_version)
        };
        let url = self.url(&format!("owners/{id}"))?;
        saved(self.send(self.http.patch(url).json(&owner)).await?)
    }

    // ── Shops ────────────────────────────────────────────────────

    pub async fn create_shop(&self, name: &str, description: &str) -> ClientResult<Shop> {
        let shop = Shop::from_game(name, description);
        let url = self.url("shops")?;
        saved(self.send(self.http.post(url).json(&shop)).await?)
    }

    pub async fn update_shop(&self, id: i32, update: ShopUpdate) -> ClientResult<Shop> {
        let shop = update.into_shop(id);
        let url = self.url(&format!("shops/{id}"))?;
        saved(self.send(self.http.patch(url).json(&shop)).await?)
    }

    pub async fn get_shop(&self, id: i32) -> ClientResult<Shop> {
        let url = self.url(&format!("shops/{id}"))?;
        saved(self.send(self.http.get(url)).await?)
    }

    /// Lists shops, up to the configured page size.
    pub async fn list_shops(&self) -> ClientResult<Vec<Shop>> {
        let url = self.url(&format!("shops?limit={}", self.config.list_limit))?;
        let shops: Vec<Shop> = self.send(self.http.get(url)).await?;
        shops.into_iter().map(saved).collect()
    }

    // ── Interior layouts ─────────────────────────────────────────

    /// Stores a new layout for `shop_id` and returns it with its id.
    pub async fn create_interior_ref_list(
        &self,
        shop_id: i32,
        ref_list: Vec<InteriorRef>,
        shelves: Vec<Shelf>,
    ) -> ClientResult<InteriorRefList> {
        let list = InteriorRefList::from_game(shop_id, ref_list, shelves);
        let url = self.url("interior_ref_lists")?;
        saved(self.send(self.http.post(url).json(&list)).await?)
    }

    /// Replaces the whole layout of `shop_id`, references and shelves together.
    pub async fn update_interior_ref_list(
        &self,
        shop_id: i32,
        ref_list: Vec<InteriorRef>,
        shelves: Vec<Shelf>,
    ) -> ClientResult<InteriorRefList> {
        let list = InteriorRefList::from_game(shop_id, ref_list, shelves);
        let url = self.url(&format!("shops/{shop_id}/interior_ref_list"))?;
        saved(self.send(self.http.patch(url).json(&list)).await?)
    }

    pub async fn get_interior_ref_list(&self, id: i32) -> ClientResult<InteriorRefList> {
        let url = self.url(&format!("interior_ref_lists/{id}"))?;
        saved(self.send(self.http.get(url)).await?)
    }

    pub async fn get_interior_ref_list_by_shop_id(
        &self,
        shop_id: i32,
    ) -> ClientResult<InteriorRefList> {
        let url = self.url(&format!("shops/{shop_id}/interior_ref_list"))?;
        saved(self.send(self.http.get(url)).await?)
    }

    // ── Merchandise ──────────────────────────────────────────────

    pub async fn create_merchandise_list(
        &self,
        shop_id: i32,
        form_list: Vec<Merchandise>,
    ) -> ClientResult<MerchandiseList> {
        let list = MerchandiseList::from_game(shop_id, form_list);
        let url = self.url("merchandise_lists")?;
        saved(self.send(self.http.post(url).json(&list)).await?)
    }

    /// Replaces the whole catalog of `shop_id`.
    pub async fn update_merchandise_list(
        &self,
        shop_id: i32,
        form_list: Vec<Merchandise>,
    ) -> ClientResult<MerchandiseList> {
        let list = MerchandiseList::from_game(shop_id, form_list);
        let url = self.url(&format!("shops/{shop_id}/merchandise_list"))?;
        saved(self.send(self.http.patch(url).json(&list)).await?)
    }

    pub async fn get_merchandise_list(&self, id: i32) -> ClientResult<MerchandiseList> {
        let url = self.url(&format!("merchandise_lists/{id}"))?;
        saved(self.send(self.http.get(url)).await?)
    }

    pub async fn get_merchandise_list_by_shop_id(
        &self,
        shop_id: i32,
    ) -> ClientResult<MerchandiseList> {
        let url = self.url(&format!("shops/{shop_id}/merchandise_list"))?;
        saved(self.send(self.http.get(url)).await?)
    }

    // ── Transactions ─────────────────────────────────────────────

    /// Records a buy or sell. The service rejects sells that exceed the
    /// shop's stock with a server error.
    pub async fn create_transaction(&self, transaction: &Transaction) -> ClientResult<Transaction> {
        let url = self.url("transactions")?;
        saved(self.send(self.http.post(url).json(transaction)).await?)
    }
}

/// Rejects responses that lack the remote-assigned id.
fn saved<T: Identified>(entity: T) -> ClientResult<T> {
    if entity.is_saved() {
        Ok(entity)
    } else {
        Err(ClientError::MissingId(T::KIND))
    }
}
