//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use switchyard::{handler, Context, Engine, Handler, HttpServer, ServerConfig, Shutdown};
use tokio::net::TcpListener;

/// Ordered record of what ran, shared between handlers.
pub type Trail = Arc<Mutex<Vec<String>>>;

/// Middleware that records `name>` before and `<name` after the rest of the chain.
pub fn tracer(trail: &Trail, name: &'static str) -> Handler {
    let trail = trail.clone();
    handler(move |c: &mut Context| {
        trail.lock().unwrap().push(format!("{name}>"));
        c.next();
        trail.lock().unwrap().push(format!("<{name}"));
    })
}

pub fn entries(trail: &Trail) -> Vec<String> {
    trail.lock().unwrap().clone()
}

/// Serve `engine` on an ephemeral local port.
///
/// Returns the bound address and the shutdown handle that stops the server.
pub async fn spawn_server(engine: Engine, mut config: ServerConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(engine, config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // The listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}
