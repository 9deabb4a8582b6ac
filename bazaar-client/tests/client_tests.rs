use bazaar_client::{BazaarClient, ClientConfig, ClientError, ShopUpdate};
use bazaar_types::{InteriorRef, Merchandise, Shelf, Transaction};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "13e2f39c-033f-4784-9ac4-1f9d5fd7ed4c";

fn connect(api_url: &str, api_key: &str) -> Result<BazaarClient, ClientError> {
    let config = ClientConfig::default();
    BazaarClient::with_http(config.build_http()?, api_url, api_key, config)
}

fn client(server: &MockServer) -> BazaarClient {
    connect(&server.uri(), API_KEY).unwrap()
}

fn shop_json(id: i32, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "description": "description",
        "gold": 100,
        "shop_type": "general_store",
        "vendor_keywords": ["VendorItemKey"],
        "vendor_keywords_exclude": true,
        "owner_id": 1,
        "created_at": "2020-08-18T00:00:00.000",
        "updated_at": "2020-08-18T00:00:00.000"
    })
}

fn apple() -> Merchandise {
    Merchandise {
        mod_name: "Skyrim.esm".to_string(),
        local_form_id: 0x64B3D,
        name: "Apple".to_string(),
        quantity: 4,
        form_type: 46,
        is_food: true,
        price: 3,
        keywords: vec!["VendorItemFood".to_string()],
    }
}

// ── Construction ────────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.timeout.as_secs(), 30);
    assert_eq!(config.list_limit, 128);
}

#[test]
fn invalid_url_is_rejected() {
    let err = connect("not a url", API_KEY).unwrap_err();
    assert!(matches!(err, ClientError::Url(_)));
    assert!(!err.is_server());
}

#[test]
fn generated_api_keys_are_unique_uuids() {
    let a = bazaar_client::generate_api_key();
    let b = bazaar_client::generate_api_key();
    assert_ne!(a, b);
    assert_eq!(a.len(), 36);
    assert!(uuid::Uuid::parse_str(&a).is_ok());
}

// ── Status ──────────────────────────────────────────────────────

#[tokio::test]
async fn status_check_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    client.status_check().await.unwrap();
    client.status_check().await.unwrap();
}

#[tokio::test]
async fn status_check_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).status_check().await.unwrap_err();
    assert!(matches!(&err, ClientError::Server(e) if e.status.as_u16() == 503));
    assert_eq!(err.to_string(), "Server 503 Service Unavailable");
}

#[tokio::test]
async fn status_check_unreachable_is_http_error() {
    let client = connect("http://127.0.0.1:1", API_KEY).unwrap();
    let err = client.status_check().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(!err.is_server());
}

// ── Owners ──────────────────────────────────────────────────────

#[tokio::test]
async fn create_owner_sends_key_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/owners"))
        .and(header("Api-Key", API_KEY))
        .and(body_partial_json(json!({ "name": "Lydia", "mod_version": 1 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "name": "Lydia",
            "mod_version": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let owner = client(&server).create_owner("Lydia", 1).await.unwrap();
    assert_eq!(owner.id, Some(1));
    assert_eq!(owner.name, "Lydia");
}

#[tokio::test]
async fn empty_api_key_sends_no_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/owners"))
        .and(header_exists("Api-Key"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/owners"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 2,
            "name": "Lydia",
            "mod_version": 1
        })))
        .mount(&server)
        .await;

    let client = connect(&server.uri(), "").unwrap();
    let owner = client.create_owner("Lydia", 1).await.unwrap();
    assert_eq!(owner.id, Some(2));
}

#[tokio::test]
async fn update_owner_patches_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/owners/7"))
        .and(body_partial_json(json!({ "id": 7, "name": "Aela", "mod_version": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Aela",
            "mod_version": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let owner = client(&server).update_owner(7, "Aela", 2).await.unwrap();
    assert_eq!(owner.mod_version, 2);
}

#[tokio::test]
async fn response_without_id_is_missing_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/owners"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "name": "Lydia",
            "mod_version": 1
        })))
        .mount(&server)
        .await;

    let err = client(&server).create_owner("Lydia", 1).await.unwrap_err();
    assert!(matches!(err, ClientError::MissingId("owner")));
    assert_eq!(err.to_string(), "API did not return a owner with an ID");
}

#[tokio::test]
async fn malformed_body_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/owners"))
        .respond_with(ResponseTemplate::new(201).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client(&server).create_owner("Lydia", 1).await.unwrap_err();
    assert!(matches!(err, ClientError::Serialization(_)));
}

// ── Shops ───────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_get_shop() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/shops"))
        .and(body_partial_json(json!({ "name": "name", "description": "description" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(shop_json(3, "name")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/shops/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(shop_json(3, "name")))
        .mount(&server)
        .await;

    let client = client(&server);
    let created = client.create_shop("name", "description").await.unwrap();
    let fetched = client.get_shop(3).await.unwrap();
    assert_eq!(created, fetched);
    assert_eq!(fetched.vendor_keywords, vec!["VendorItemKey".to_string()]);
    assert!(fetched.vendor_keywords_exclude);
}

#[tokio::test]
async fn update_shop_sends_every_field() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/shops/3"))
        .and(body_partial_json(json!({
            "id": 3,
            "gold": 100,
            "shop_type": "general_store",
            "vendor_keywords": ["VendorItemKey"],
            "vendor_keywords_exclude": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(shop_json(3, "renamed")))
        .expect(1)
        .mount(&server)
        .await;

    let update = ShopUpdate {
        name: "renamed".to_string(),
        description: "description".to_string(),
        gold: 100,
        shop_type: "general_store".to_string(),
        vendor_keywords: vec!["VendorItemKey".to_string()],
        vendor_keywords_exclude: true,
    };
    let shop = client(&server).update_shop(3, update).await.unwrap();
    assert_eq!(shop.name, "renamed");
}

#[tokio::test]
async fn update_unknown_shop_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/shops/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "https://httpstatuses.com/404",
            "title": "Not Found",
            "status": 404,
            "detail": "shop 99 does not exist"
        })))
        .mount(&server)
        .await;

    let update = ShopUpdate {
        name: "name".to_string(),
        description: "description".to_string(),
        gold: 0,
        shop_type: "general_store".to_string(),
        vendor_keywords: vec![],
        vendor_keywords_exclude: false,
    };
    let err = client(&server).update_shop(99, update).await.unwrap_err();
    match err {
        ClientError::Server(e) => {
            assert_eq!(e.status.as_u16(), 404);
            assert_eq!(e.title, "Not Found");
            assert_eq!(e.detail.as_deref(), Some("shop 99 does not exist"));
        }
        other => panic!("expected server error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_shops_uses_page_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/shops"))
        .and(query_param("limit", "128"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([shop_json(1, "first"), shop_json(2, "second")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let shops = client(&server).list_shops().await.unwrap();
    let names: Vec<_> = shops.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[tokio::test]
async fn list_shops_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/shops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(client(&server).list_shops().await.unwrap().is_empty());
}

// ── Interior layouts ────────────────────────────────────────────

fn layout_json(id: i32, shop_id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "shop_id": shop_id,
        "owner_id": 1,
        "ref_list": [],
        "shelves": [{
            "shelf_type": 1,
            "position_x": 1.0,
            "position_y": 2.0,
            "position_z": 3.0,
            "angle_x": 0.0,
            "angle_y": 0.0,
            "angle_z": 0.0,
            "scale": 1,
            "page": 0,
            "filter_form_type": null,
            "filter_is_food": false,
            "search": null,
            "sort_on": null,
            "sort_asc": true
        }]
    })
}

fn shelf() -> Shelf {
    Shelf {
        shelf_type: 1,
        position_x: 1.0,
        position_y: 2.0,
        position_z: 3.0,
        angle_x: 0.0,
        angle_y: 0.0,
        angle_z: 0.0,
        scale: 1,
        page: 0,
        filter_form_type: None,
        filter_is_food: false,
        search: None,
        sort_on: None,
        sort_asc: true,
    }
}

#[tokio::test]
async fn create_interior_ref_list_posts_refs_and_shelves() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/interior_ref_lists"))
        .and(body_partial_json(json!({ "shop_id": 5, "ref_list": [{ "ref_mod_name": null }] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(layout_json(11, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let interior_ref = InteriorRef {
        base_mod_name: "Skyrim.esm".to_string(),
        base_local_form_id: 1,
        ref_mod_name: None,
        ref_local_form_id: 2,
        position_x: 0.0,
        position_y: 0.0,
        position_z: 0.0,
        angle_x: 0.0,
        angle_y: 0.0,
        angle_z: 0.0,
        scale: 1,
    };
    let list = client(&server)
        .create_interior_ref_list(5, vec![interior_ref], vec![shelf()])
        .await
        .unwrap();
    assert_eq!(list.id, Some(11));
}

#[tokio::test]
async fn update_interior_ref_list_targets_shop() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/shops/5/interior_ref_list"))
        .and(body_partial_json(json!({ "shop_id": 5, "ref_list": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(layout_json(11, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let list = client(&server)
        .update_interior_ref_list(5, vec![], vec![shelf()])
        .await
        .unwrap();
    assert!(list.ref_list.is_empty());
    assert_eq!(list.shelves, vec![shelf()]);
}

#[tokio::test]
async fn get_interior_ref_list_by_id_and_shop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/interior_ref_lists/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(layout_json(11, 5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/shops/5/interior_ref_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(layout_json(11, 5)))
        .mount(&server)
        .await;

    let client = client(&server);
    let by_id = client.get_interior_ref_list(11).await.unwrap();
    let by_shop = client.get_interior_ref_list_by_shop_id(5).await.unwrap();
    assert_eq!(by_id, by_shop);
}

// ── Merchandise ─────────────────────────────────────────────────

fn merchandise_json(id: i32, shop_id: i32) -> serde_json::Value {
    json!({
        "id": id,
        "shop_id": shop_id,
        "owner_id": 1,
        "form_list": [{
            "mod_name": "Skyrim.esm",
            "local_form_id": 0x64B3D,
            "name": "Apple",
            "quantity": 4,
            "form_type": 46,
            "is_food": true,
            "price": 3,
            "keywords": ["VendorItemFood"]
        }]
    })
}

#[tokio::test]
async fn create_and_update_merchandise_list() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/merchandise_lists"))
        .and(body_partial_json(json!({ "shop_id": 5 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(merchandise_json(8, 5)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v1/shops/5/merchandise_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(merchandise_json(8, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let created = client.create_merchandise_list(5, vec![apple()]).await.unwrap();
    assert_eq!(created.form_list, vec![apple()]);
    let updated = client.update_merchandise_list(5, vec![apple()]).await.unwrap();
    assert_eq!(updated.id, Some(8));
}

#[tokio::test]
async fn get_merchandise_list_by_id_and_shop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/merchandise_lists/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(merchandise_json(8, 5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/shops/5/merchandise_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(merchandise_json(8, 5)))
        .mount(&server)
        .await;

    let client = client(&server);
    assert_eq!(client.get_merchandise_list(8).await.unwrap().shop_id, 5);
    assert_eq!(
        client.get_merchandise_list_by_shop_id(5).await.unwrap().form_list.len(),
        1
    );
}

// ── Transactions ────────────────────────────────────────────────

fn sell(quantity: i32) -> Transaction {
    Transaction {
        id: None,
        shop_id: 5,
        mod_name: "Skyrim.esm".to_string(),
        local_form_id: 0x64B3D,
        name: "Apple".to_string(),
        form_type: 46,
        is_food: true,
        price: 3,
        is_sell: true,
        quantity,
        amount: 3 * quantity,
        keywords: vec!["VendorItemFood".to_string()],
    }
}

#[tokio::test]
async fn create_transaction_returns_saved_record() {
    let server = MockServer::start().await;
    let mut saved = serde_json::to_value(sell(2)).unwrap();
    saved["id"] = json!(21);
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .and(body_partial_json(json!({ "shop_id": 5, "is_sell": true, "quantity": 2 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(saved))
        .expect(1)
        .mount(&server)
        .await;

    let transaction = client(&server).create_transaction(&sell(2)).await.unwrap();
    assert_eq!(transaction.id, Some(21));
    assert_eq!(transaction.amount, 6);
}

#[tokio::test]
async fn oversold_transaction_is_conflict() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/transactions"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "title": "Conflict",
            "detail": "cannot sell 100 items, only 4 in stock"
        })))
        .mount(&server)
        .await;

    let err = client(&server).create_transaction(&sell(100)).await.unwrap_err();
    assert!(matches!(&err, ClientError::Server(e) if e.status.as_u16() == 409));
    assert_eq!(
        err.to_string(),
        "Server 409 Conflict: cannot sell 100 items, only 4 in stock"
    );
}
