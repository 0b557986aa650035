//! Live-server tests: real sockets, real shutdown.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

use postal_gateway::config::GatewayConfig;
use postal_gateway::http::{AddressServer, ServerError};
use postal_gateway::lifecycle::{LifecycleState, ServerHandle};
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn serves_all_routes_over_tcp() {
    let server = common::spawn_server(common::test_config(), common::rules()).await;
    let client = common::client();

    assert_eq!(server.handle.state(), LifecycleState::Listening);

    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "OK");

    let res = client
        .post(server.url("/expand"))
        .json(&json!({"query": "123 Main St"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let expansions: Vec<String> = res.json().await.unwrap();
    assert!(!expansions.is_empty());

    let res = client
        .post(server.url("/bulk/parser"))
        .json(&json!({"queries": [
            {"query_id": "a", "query": "1 Infinite Loop"},
            {"query_id": "b", "query": "9 Pine Rd"}
        ]}))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["items"][0]["query_id"], "a");
    assert_eq!(body["items"][1]["query_id"], "b");

    server.handle.shutdown();
    server.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_stops_accepting_connections() {
    let server = common::spawn_server(common::test_config(), common::rules()).await;
    let client = common::client();

    server.handle.shutdown();
    tokio::time::timeout(Duration::from_secs(5), server.task)
        .await
        .expect("run did not return")
        .unwrap()
        .unwrap();

    assert_eq!(server.handle.state(), LifecycleState::Stopped);
    assert!(client.get(format!("http://{}/health", server.addr)).send().await.is_err());
}

#[tokio::test]
async fn in_flight_requests_finish_during_grace_period() {
    let engine = Arc::new(common::SlowEngine(Duration::from_millis(500)));
    let server = common::spawn_server(common::test_config(), engine).await;
    let client = common::client();

    let request = {
        let url = server.url("/expand");
        tokio::spawn(async move { client.post(url).json(&json!({"query": "slow"})).send().await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    server.handle.shutdown();
    assert_eq!(server.handle.state(), LifecycleState::ShuttingDown);

    let res = request.await.unwrap().unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Vec<String>>().await.unwrap(), ["slow"]);

    server.task.await.unwrap().unwrap();
    assert_eq!(server.handle.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn stragglers_are_cut_off_after_grace_period() {
    let config = GatewayConfig {
        shutdown_grace_secs: 1,
        ..common::test_config()
    };
    let engine = Arc::new(common::SlowEngine(Duration::from_secs(3)));
    let server = common::spawn_server(config, engine).await;
    let client = common::client();

    let request = {
        let url = server.url("/parser");
        tokio::spawn(async move { client.post(url).json(&json!({"query": "slow"})).send().await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let started = Instant::now();
    server.handle.shutdown();

    server.task.await.unwrap().unwrap();
    assert!(started.elapsed() < Duration::from_millis(2500));
    assert!(request.await.unwrap().is_err());
}

#[tokio::test]
async fn bind_failure_is_reported() {
    let occupied = TcpListener::bind("127.0.0.1:0").unwrap();
    let config = GatewayConfig {
        listen_port: occupied.local_addr().unwrap().port(),
        ..common::test_config()
    };

    let server = AddressServer::new(config, common::rules());
    let handle = server.handle();
    let result = server.run().await;

    assert!(matches!(result, Err(ServerError::Io(_))));
    assert!(handle.listening().await.is_none());
    assert_eq!(handle.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn missing_tls_files_fail_before_binding() {
    let config = GatewayConfig {
        ssl_cert_file: Some("/nonexistent/cert.pem".into()),
        ssl_key_file: Some("/nonexistent/key.pem".into()),
        ..common::test_config()
    };

    let server = AddressServer::new(config, common::rules());
    let handle = server.handle();
    let result = server.run().await;

    assert!(matches!(result, Err(ServerError::Tls(_))));
    assert_finished(&handle).await;
}

#[tokio::test]
async fn unresolvable_host_marks_the_server_stopped() {
    let config = GatewayConfig {
        listen_host: "host.invalid".into(),
        ..common::test_config()
    };

    let server = AddressServer::new(config, common::rules());
    let handle = server.handle();
    let result = server.run().await;

    assert!(matches!(result, Err(ServerError::Address(_))));
    assert_finished(&handle).await;
}

/// A server whose `run` has returned waits for nothing and refuses a late
/// shutdown.
async fn assert_finished(handle: &ServerHandle) {
    tokio::time::timeout(Duration::from_secs(1), handle.lifecycle().stopped())
        .await
        .expect("lifecycle never reached stopped");
    handle.shutdown();
    assert_eq!(handle.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn serves_tls_when_both_files_are_set() {
    let fixtures = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");
    let config = GatewayConfig {
        ssl_cert_file: Some(format!("{fixtures}/cert.pem")),
        ssl_key_file: Some(format!("{fixtures}/key.pem")),
        ..common::test_config()
    };
    let server = common::spawn_server(config, common::rules()).await;
    assert_eq!(server.handle.state(), LifecycleState::Listening);

    // a plaintext client cannot talk to the TLS listener
    let res = common::client().get(server.url("/health")).send().await;
    assert!(res.map(|r| r.status() != 200).unwrap_or(true));

    server.handle.shutdown();
    server.task.await.unwrap().unwrap();
}

#[tokio::test]
async fn half_configured_tls_serves_plaintext() {
    let config = GatewayConfig {
        ssl_cert_file: Some("/nonexistent/cert.pem".into()),
        ..common::test_config()
    };
    let server = common::spawn_server(config, common::rules()).await;

    let res = common::client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "OK");

    server.handle.shutdown();
    server.task.await.unwrap().unwrap();
}
