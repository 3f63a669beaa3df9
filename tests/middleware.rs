use actix_web::{rt, test, web, App, HttpResponse, HttpServer, Responder};
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::net::TcpListener;

use taskward::auth::{AuthMiddleware, AuthenticatedUserId, Claims, TokenService};

const TEST_SECRET: &str = "middleware-test-secret";

/// Minimal protected handler that echoes the authenticated subject.
/// No database is involved, so the middleware is exercised in isolation.
async fn whoami(user: AuthenticatedUserId) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "user_id": user.0 }))
}

fn expired_token() -> String {
    let exp = chrono::Utc::now()
        .checked_sub_signed(chrono::Duration::hours(1))
        .unwrap()
        .timestamp() as usize;
    encode(
        &Header::default(),
        &Claims { sub: 9, exp },
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Rejection paths produce service-level errors, which only turn into HTTP
/// responses in a running server, so this test drives a real one with
/// reqwest instead of `test::call_service`.
#[actix_rt::test]
async fn test_rejection_paths() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let server_handle = rt::spawn(async move {
        HttpServer::new(move || {
            App::new().service(
                web::scope("/api")
                    .wrap(AuthMiddleware::new(TokenService::new(TEST_SECRET)))
                    .route("/whoami", web::get().to(whoami)),
            )
        })
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/api/whoami", port);
    let valid = TokenService::new(TEST_SECRET).issue(1).unwrap();
    let foreign = TokenService::new("some-other-secret").issue(1).unwrap();

    // (header to send, expected error message, case description)
    let cases: Vec<(Option<String>, &str, &str)> = vec![
        (None, "authorization token required", "no header"),
        (
            Some("Bearer".to_string()),
            "invalid authorization format",
            "scheme only",
        ),
        (
            Some(format!("Bearer {} extra", valid)),
            "invalid authorization format",
            "three parts",
        ),
        (
            Some(format!("Basic {}", valid)),
            "invalid authorization format",
            "wrong scheme",
        ),
        (
            Some(valid.clone()),
            "invalid authorization format",
            "bare token without scheme",
        ),
        (
            Some(format!("Bearer {}", foreign)),
            "invalid token",
            "token signed with another secret",
        ),
        (
            Some("Bearer garbage".to_string()),
            "invalid token",
            "malformed token",
        ),
        (
            Some(format!("Bearer {}", expired_token())),
            "token has expired",
            "expired token",
        ),
    ];

    for (header, expected_error, description) in cases {
        let mut request = client.get(&url);
        if let Some(value) = header {
            request = request.header("Authorization", value);
        }
        let resp = request.send().await.expect("Failed to send request");

        assert_eq!(
            resp.status(),
            reqwest::StatusCode::UNAUTHORIZED,
            "case: {}",
            description
        );
        let body: Value = resp.json().await.expect("error body should be JSON");
        assert_eq!(body["error"], expected_error, "case: {}", description);
    }

    server_handle.abort();
}

#[actix_rt::test]
async fn test_valid_token_reaches_handler_with_subject() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(AuthMiddleware::new(TokenService::new(TEST_SECRET)))
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let token = TokenService::new(TEST_SECRET).issue(123).unwrap();
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user_id"], 123);
}

#[actix_rt::test]
async fn test_bearer_scheme_is_case_insensitive() {
    let app = test::init_service(
        App::new().service(
            web::scope("/api")
                .wrap(AuthMiddleware::new(TokenService::new(TEST_SECRET)))
                .route("/whoami", web::get().to(whoami)),
        ),
    )
    .await;

    let token = TokenService::new(TEST_SECRET).issue(42).unwrap();
    for scheme in ["Bearer", "bearer", "BEARER", "bEaReR"] {
        let req = test::TestRequest::get()
            .uri("/api/whoami")
            .append_header(("Authorization", format!("{} {}", scheme, token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 200, "scheme {:?} should be accepted", scheme);
        let body = test::read_body(resp).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["user_id"], 42);
    }
}
