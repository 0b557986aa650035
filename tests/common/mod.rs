//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use postal_gateway::config::GatewayConfig;
use postal_gateway::engine::{AddressEngine, EngineError, ParsedComponent, RuleEngine, SharedEngine};
use postal_gateway::http::{AddressServer, ServerError};
use postal_gateway::lifecycle::ServerHandle;
use tokio::task::JoinHandle;

/// Config bound to an ephemeral loopback port.
pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        listen_host: "127.0.0.1".into(),
        listen_port: 0,
        shutdown_grace_secs: 2,
        ..GatewayConfig::default()
    }
}

pub fn rules() -> SharedEngine {
    Arc::new(RuleEngine::new())
}

/// Returns one fixed component per query and the query itself as its only
/// expansion.
pub struct EchoEngine;

impl AddressEngine for EchoEngine {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedComponent>, EngineError> {
        Ok(vec![ParsedComponent::new("road", text)])
    }

    fn expand(&self, text: &str) -> Result<Vec<String>, EngineError> {
        Ok(vec![text.to_string()])
    }
}

/// Fails every call.
pub struct FailingEngine;

impl AddressEngine for FailingEngine {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn parse(&self, _text: &str) -> Result<Vec<ParsedComponent>, EngineError> {
        Err(EngineError::NoResult { operation: "parse" })
    }

    fn expand(&self, _text: &str) -> Result<Vec<String>, EngineError> {
        Err(EngineError::NoResult { operation: "expand" })
    }
}

/// Sleeps before answering, to keep requests in flight.
pub struct SlowEngine(pub Duration);

impl AddressEngine for SlowEngine {
    fn name(&self) -> &'static str {
        "slow"
    }

    fn parse(&self, text: &str) -> Result<Vec<ParsedComponent>, EngineError> {
        std::thread::sleep(self.0);
        EchoEngine.parse(text)
    }

    fn expand(&self, text: &str) -> Result<Vec<String>, EngineError> {
        std::thread::sleep(self.0);
        EchoEngine.expand(text)
    }
}

pub struct RunningServer {
    pub addr: SocketAddr,
    pub handle: ServerHandle,
    pub task: JoinHandle<Result<(), ServerError>>,
}

impl RunningServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server and wait until it is bound.
pub async fn spawn_server(config: GatewayConfig, engine: SharedEngine) -> RunningServer {
    let server = AddressServer::new(config, engine);
    let handle = server.handle();
    let task = tokio::spawn(server.run());

    let addr = tokio::time::timeout(Duration::from_secs(5), handle.listening())
        .await
        .expect("server did not start in time")
        .expect("server failed to bind");

    RunningServer { addr, handle, task }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
