//! End-to-end behaviour of the users API against the seeded in-memory store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use backend::Trace;
use backend::inbound::http::configure;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::{INVALID_NAME_MESSAGE, USER_NOT_FOUND_MESSAGE};
use backend::outbound::memory::InMemoryUserStore;
use rstest::rstest;
use serde_json::{Value, json};

async fn seeded_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store = InMemoryUserStore::seeded().expect("seed users are valid");
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(Arc::new(store))))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
) -> (StatusCode, Vec<u8>) {
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    (status, body.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("JSON body")
}

fn text_body(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).expect("UTF-8 body")
}

async fn all_users(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Value {
    let (status, body) = send(app, test::TestRequest::get().uri("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    json_body(&body)
}

#[actix_web::test]
async fn greeting_is_served_at_root() {
    let app = seeded_app().await;
    let (status, body) = send(&app, test::TestRequest::get().uri("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(text_body(&body), "Hello World");
}

#[actix_web::test]
async fn create_get_delete_scenario() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": "Dave", "age": 14 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "id": 4, "name": "Dave", "age": 14 }));

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/users/4")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "id": 4, "name": "Dave", "age": 14 }));

    let (status, body) = send(&app, test::TestRequest::delete().uri("/api/users/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "id": 2, "name": "John", "age": 12 }));

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/users/2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(text_body(&body), USER_NOT_FOUND_MESSAGE);

    let users = all_users(&app).await;
    assert_eq!(users.as_array().map(Vec::len), Some(3));
}

#[actix_web::test]
async fn short_name_update_leaves_record_untouched() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri("/api/users/1")
            .set_json(json!({ "name": "Al" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text_body(&body), INVALID_NAME_MESSAGE);

    let (status, body) = send(&app, test::TestRequest::get().uri("/api/users/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "id": 1, "name": "Alice", "age": 12 }));
}

#[actix_web::test]
async fn update_of_missing_user_leaves_store_untouched() {
    let app = seeded_app().await;
    let before = all_users(&app).await;

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri("/api/users/9999")
            .set_json(json!({ "name": "Nobody", "age": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(text_body(&body), USER_NOT_FOUND_MESSAGE);
    assert_eq!(all_users(&app).await, before);
}

#[actix_web::test]
async fn update_with_zero_age_applies_it() {
    let app = seeded_app().await;

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri("/api/users/1")
            .set_json(json!({ "name": "Alice", "age": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "id": 1, "name": "Alice", "age": 0 }));

    let (_, body) = send(&app, test::TestRequest::get().uri("/api/users/1")).await;
    assert_eq!(json_body(&body)["age"], json!(0));
}

#[rstest]
#[case(json!({ "name": "Al" }))]
#[case(json!({ "age": 20 }))]
#[case(json!({ "name": "" }))]
#[actix_web::test]
async fn invalid_create_leaves_store_untouched(#[case] payload: Value) {
    let app = seeded_app().await;
    let before = all_users(&app).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post().uri("/api/users").set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(text_body(&body), INVALID_NAME_MESSAGE);
    assert_eq!(all_users(&app).await, before);
}

#[actix_web::test]
async fn created_ids_follow_the_current_maximum() {
    let app = seeded_app().await;

    for expected in 4..=6 {
        let (status, body) = send(
            &app,
            test::TestRequest::post()
                .uri("/api/users")
                .set_json(json!({ "name": format!("User {expected}") })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let created = json_body(&body);
        assert_eq!(created["id"], json!(expected));
        assert_eq!(created["age"], Value::Null);
    }

    let (status, _) = send(&app, test::TestRequest::delete().uri("/api/users/6")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "name": "Reused" })),
    )
    .await;
    assert_eq!(json_body(&body)["id"], json!(6));
}

#[actix_web::test]
async fn delete_of_missing_user_is_not_found() {
    let app = seeded_app().await;

    let (status, body) = send(&app, test::TestRequest::delete().uri("/api/users/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(text_body(&body), USER_NOT_FOUND_MESSAGE);
    assert_eq!(all_users(&app).await.as_array().map(Vec::len), Some(3));
}
