use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, API_PATH};
use serde_json::{json, Value};
use tower::{Service, ServiceExt};

const TOKEN: &str = "test-token";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn api_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(API_PATH)
        .header(http::header::CONTENT_TYPE, "text/plain; charset=UTF-8")
        .body(body.to_string())
        .unwrap()
}

fn envelope(method: &str, params: Value) -> String {
    let mut body = json!({"method": method, "token": TOKEN});
    if let Value::Object(extra) = params {
        body.as_object_mut().unwrap().extend(extra);
    }
    body.to_string()
}

// --- envelope handling ---

#[tokio::test]
async fn balance_returns_ok_status() {
    let resp = app(TOKEN)
        .oneshot(api_request(&envelope("balance", json!({}))))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["result"][0]["currency"], "RUB");
}

#[tokio::test]
async fn wrong_token_is_reported_in_payload() {
    let body = json!({"method": "projects", "token": "wrong"}).to_string();
    let resp = app(TOKEN).oneshot(api_request(&body)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"]["code"], 401);
}

#[tokio::test]
async fn unknown_method_is_reported_in_payload() {
    let resp = app(TOKEN)
        .oneshot(api_request(&envelope("noSuchMethod", json!({}))))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["code"], 404);
}

#[tokio::test]
async fn json_content_type_is_rejected() {
    let req = Request::builder()
        .method("POST")
        .uri(API_PATH)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(envelope("balance", json!({})))
        .unwrap();
    let resp = app(TOKEN).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn non_object_body_returns_400() {
    let resp = app(TOKEN).oneshot(api_request("[1,2,3]")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app(TOKEN).oneshot(api_request("not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_is_not_routed() {
    let resp = app(TOKEN)
        .oneshot(Request::builder().uri(API_PATH).body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- projects ---

#[tokio::test]
async fn create_into_missing_group_fails() {
    let resp = app(TOKEN)
        .oneshot(api_request(&envelope("projectCreate", json!({"name": "Shop", "group_id": 99}))))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["error"]["message"], "group not found");
}

#[tokio::test]
async fn project_lifecycle() {
    let mut app = app(TOKEN).into_service();

    async fn call(
        app: &mut axum::routing::RouterIntoService<String>,
        method: &str,
        params: Value,
    ) -> Value {
        let resp = ServiceExt::ready(app)
            .await
            .unwrap()
            .call(api_request(&envelope(method, params)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        body_json(resp).await
    }

    // create with the unset sentinel for the group
    let created = call(&mut app, "projectCreate", json!({"name": "Shop", "group_id": false})).await;
    assert_eq!(created["status"], "ok");
    let id = created["result"]["id"].as_u64().unwrap();

    // list
    let listed = call(&mut app, "projects", json!({})).await;
    assert_eq!(listed["result"], json!([{"id": id, "name": "Shop", "group_id": null}]));

    // rename
    let renamed = call(&mut app, "projectRename", json!({"project_id": id, "name": "Store"})).await;
    assert_eq!(renamed["result"], true);

    // keywords
    let added = call(
        &mut app,
        "projectKeywordsAdd",
        json!({"project_id": id, "keywords": ["coffee", "tea"], "category_id": false, "skipFailed": false}),
    )
    .await;
    assert_eq!(added["result"]["added"], 2);
    let tea_id = added["result"]["ids"][1].as_u64().unwrap();

    let found = call(
        &mut app,
        "projectKeywords",
        json!({"project_id": id, "search": "TEA", "page": false, "pageSize": false}),
    )
    .await;
    assert_eq!(found["result"]["total"], 1);
    assert_eq!(found["result"]["items"][0]["id"], tea_id);

    let deleted = call(&mut app, "projectKeywordsDelete", json!({"project_id": id, "keyword_ids": [tea_id]})).await;
    assert_eq!(deleted["result"]["deleted"], 1);

    // get
    let fetched = call(&mut app, "project", json!({"project_id": id})).await;
    assert_eq!(fetched["result"]["name"], "Store");
    assert_eq!(fetched["result"]["keywords"], 1);

    // sharing
    let shared = call(&mut app, "projectSharedUrlCreate", json!({"project_id": id})).await;
    let url = shared["result"]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("https://spyserp.com/shared/"));
    let current = call(&mut app, "projectSharedUrlGet", json!({"project_id": id})).await;
    assert_eq!(current["result"]["url"], url.as_str());

    // delete
    let removed = call(&mut app, "projectDelete", json!({"project_id": id})).await;
    assert_eq!(removed["result"], true);
    let missing = call(&mut app, "project", json!({"project_id": id})).await;
    assert_eq!(missing["error"]["code"], 404);
}

// --- groups ---

#[tokio::test]
async fn groups_paginate() {
    let mut app = app(TOKEN).into_service();
    for name in ["A", "B", "C"] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(api_request(&envelope("groupAdd", json!({"group": name}))))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await["status"], "ok");
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(api_request(&envelope("groups", json!({"page": 2, "pageSize": 2}))))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["result"]["total"], 3);
    assert_eq!(body["result"]["items"][0]["name"], "C");
}
