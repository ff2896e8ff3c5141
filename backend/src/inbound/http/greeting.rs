//! Root greeting endpoint.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

/// Fixed body served from `GET /`.
pub const GREETING: &str = "Hello World";

/// Confirm the server is up.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/plain")),
    tags = ["greeting"],
    operation_id = "greeting"
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(GREETING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn index_returns_greeting() {
        let app = test::init_service(App::new().service(index)).await;
        let request = test::TestRequest::get().uri("/").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        assert_eq!(body.as_ref(), GREETING.as_bytes());
    }
}
