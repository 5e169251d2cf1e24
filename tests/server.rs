mod common;

use kiosk::routes::{self, ClientIp, ErrorBody};
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[tokio::test]
async fn ip_echoes_the_loopback_peer() {
    let server = common::spawn(routes::app()).await;

    let res = reqwest::get(server.url("/ip")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"ip": "127.0.0.1"}"#);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn ip_prefers_proxy_headers() {
    let server = common::spawn(routes::app()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(server.url("/ip"))
        .header("X-Forwarded-For", "1.2.3.4, 5.6.7.8")
        .header("X-Real-IP", "9.9.9.9")
        .send()
        .await
        .unwrap();
    let body: ClientIp = serde_json::from_slice(&res.bytes().await.unwrap()).unwrap();
    assert_eq!(body.ip, "1.2.3.4");

    let res = client.get(server.url("/ip")).header("X-Real-IP", "9.9.9.9").send().await.unwrap();
    let body: ClientIp = serde_json::from_slice(&res.bytes().await.unwrap()).unwrap();
    assert_eq!(body.ip, "9.9.9.9");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let server = common::spawn(routes::app()).await;

    let res = reqwest::get(server.url("/unknown")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"code": 404, "message": "Recurso /unknown no encontrado"}"#
    );

    server.stop().await.unwrap();
}

#[tokio::test]
async fn query_string_is_part_of_the_path() {
    let server = common::spawn(routes::app()).await;

    let res = reqwest::get(server.url("/ip?x=1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = serde_json::from_slice(&res.bytes().await.unwrap()).unwrap();
    assert_eq!(body.message, "Recurso /ip?x=1 no encontrado");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn absolute_form_target_is_not_routed_to_ip() {
    let server = common::spawn(routes::app()).await;

    let mut stream = TcpStream::connect(server.addr).await.unwrap();
    stream
        .write_all(b"GET http://example.com/ip HTTP/1.1\r\nHost: example.com\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut raw = String::new();
    stream.read_to_string(&mut raw).await.unwrap();

    assert!(raw.starts_with("HTTP/1.1 404"), "{raw}");
    assert!(raw.ends_with(r#"{"code": 404, "message": "Recurso http://example.com/ip no encontrado"}"#), "{raw}");

    server.stop().await.unwrap();
}

#[tokio::test]
async fn other_methods_fall_through() {
    let server = common::spawn(routes::app()).await;

    let res = reqwest::Client::new().post(server.url("/ip")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await.unwrap();
}

#[tokio::test]
async fn keep_alive_connection_serves_several_requests() {
    let server = common::spawn(routes::app()).await;
    let client = reqwest::Client::new();

    for path in ["/ip", "/a", "/ip", "/b"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        let expected = if path == "/ip" { StatusCode::OK } else { StatusCode::NOT_FOUND };
        assert_eq!(res.status(), expected, "{path}");
    }

    server.stop().await.unwrap();
}

#[tokio::test]
async fn shutdown_returns_cleanly_when_idle() {
    let server = common::spawn(routes::app()).await;
    server.stop().await.unwrap();
}
