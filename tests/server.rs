//! The engine behind the HTTP server: live sockets and in-process requests.

use std::fs;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use switchyard::middleware::recovery;
use switchyard::{Context, Engine, HttpServer, ServerConfig};
use tower::ServiceExt;

mod common;

fn demo_engine() -> Engine {
    let mut engine = Engine::new();
    engine.get("/hello/:name", |c: &mut Context| {
        let name = c.param("name").unwrap_or_default().to_string();
        c.string(StatusCode::OK, format!("hello {name}\n"));
    });
    engine.get("/boom", |_: &mut Context| panic!("handler failure"));
    engine.post("/echo", |c: &mut Context| {
        let body = c.body().to_vec();
        c.data(StatusCode::OK, body);
    });
    engine
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_live_requests() {
    let (addr, shutdown) = common::spawn_server(demo_engine(), ServerConfig::default()).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client
        .get(format!("http://{addr}/hello/mini%20gin"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "hello mini gin\n");

    let res = client
        .get(format!("http://{addr}/nowhere"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "404 Not Found - /nowhere\n");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unrecovered_panic_fails_only_that_request() {
    let (addr, shutdown) = common::spawn_server(demo_engine(), ServerConfig::default()).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let res = client.get(format!("http://{addr}/boom")).send().await.unwrap();
    assert_eq!(res.status(), 500);

    let res = client
        .get(format!("http://{addr}/hello/again"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}

#[tokio::test]
async fn test_recovery_middleware_over_http() {
    let mut engine = demo_engine();
    engine.use_middleware([recovery()]);
    let router = HttpServer::new(engine, ServerConfig::default()).router();

    let response = router
        .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Internal Server Error");
}

#[tokio::test]
async fn test_body_limit() {
    let mut config = ServerConfig::default();
    config.limits.max_body_size = 8;
    let router = HttpServer::new(demo_engine(), config).router();

    let small = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .body(Body::from("tiny"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(small.status(), StatusCode::OK);
    assert_eq!(body_text(small).await, "tiny");

    let large = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .body(Body::from("far too large for the limit"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(large.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_static_files_over_http() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("site.css"), "body { margin: 0 }").unwrap();

    let mut engine = Engine::new();
    engine.group("/public").static_files("/", tmp.path());
    let router = HttpServer::new(engine, ServerConfig::default()).router();

    let found = router
        .clone()
        .oneshot(Request::builder().uri("/public/site.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(
        found.headers().get("content-type").unwrap(),
        "text/css"
    );
    assert_eq!(body_text(found).await, "body { margin: 0 }");

    let missing = router
        .oneshot(Request::builder().uri("/public/gone.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
