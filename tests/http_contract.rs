//! Contract tests for the invoke endpoint.

use std::sync::Arc;

use lambda_host::delegate::{delegate_fn, Echo};
use reqwest::Method;
use sdk_rust::HostClient;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn non_post_methods_get_501_with_empty_body() {
    let (addr, shutdown) = common::start_host(Arc::new(Echo)).await;
    let client = common::client();

    for (method, path) in [
        (Method::GET, "/"),
        (Method::PUT, "/some/path"),
        (Method::DELETE, "/x"),
        (Method::PATCH, "/lambda?q=1"),
        (Method::OPTIONS, "/"),
    ] {
        let res = client
            .request(method.clone(), format!("http://{}{}", addr, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 501, "{} should be rejected", method);
        let body = res.bytes().await.unwrap();
        assert!(body.is_empty(), "{} response should have no body", method);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn identity_delegate_echoes_the_payload() {
    let (addr, shutdown) = common::start_host(Arc::new(Echo)).await;
    let client = common::client();

    let res = client
        .post(format!("http://{}/", addr))
        .body(r#"{"a":1}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"a": 1}));

    shutdown.trigger();
}

#[tokio::test]
async fn every_path_reaches_the_delegate() {
    let (addr, shutdown) = common::start_host(Arc::new(Echo)).await;
    let client = common::client();

    for path in ["/", "/invoke", "/deeply/nested/path"] {
        let res = client
            .post(format!("http://{}{}", addr, path))
            .body(r#"[1,2,3]"#)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 200, "path {} should be accepted", path);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body, json!([1, 2, 3]));
    }

    shutdown.trigger();
}

#[tokio::test]
async fn transforming_delegate_result_is_returned() {
    let delegate = delegate_fn(|payload| {
        let n = payload["n"].as_i64().ok_or("missing field n")?;
        Ok(json!({ "doubled": n * 2 }))
    });
    let (addr, shutdown) = common::start_host(Arc::new(delegate)).await;
    let client = common::client();

    let res = client
        .post(format!("http://{}/", addr))
        .body(r#"{"n": 21}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"doubled": 42}));

    shutdown.trigger();
}

#[tokio::test]
async fn concurrent_requests_each_get_their_own_result() {
    let (addr, shutdown) = common::start_host(Arc::new(Echo)).await;
    let client = common::client();

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        let url = format!("http://{}/", addr);
        handles.push(tokio::spawn(async move {
            let payload = json!({ "request": i });
            let res = client.post(&url).json(&payload).send().await.unwrap();
            assert_eq!(res.status(), 200);
            let body: Value = res.json().await.unwrap();
            (payload, body)
        }));
    }

    for handle in handles {
        let (sent, received) = handle.await.unwrap();
        assert_eq!(sent, received, "response must match that request's body");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn sdk_client_round_trips_through_the_host() {
    let (addr, shutdown) = common::start_host(Arc::new(Echo)).await;
    let sdk = HostClient::new(&format!("http://{}/", addr));

    let payload = json!({"message": "hello", "items": [1, 2]});
    let result = sdk.invoke(&payload).await.unwrap();
    assert_eq!(result, payload);

    shutdown.trigger();
}

#[tokio::test]
async fn sdk_client_surfaces_host_errors() {
    let delegate = delegate_fn(|_| Err("quota exceeded".into()));
    let (addr, shutdown) = common::start_host(Arc::new(delegate)).await;
    let sdk = HostClient::new(&format!("http://{}/", addr));

    let err = sdk.invoke(&json!({})).await.unwrap_err();
    assert!(
        err.to_string().contains("quota exceeded"),
        "unexpected error: {}",
        err
    );

    shutdown.trigger();
}
