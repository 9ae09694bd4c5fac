//! `parrain serve`: the JSON API over `tiny_http`.
//!
//! `tiny_http` blocks on `recv`, so the accept loop runs in `spawn_blocking`
//! and drives each handler to completion with the runtime handle. Requests
//! are served one at a time, which keeps the store single-writer.

mod api;
mod response;

use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::Handle;

use api::Api;
use response::ApiResponse;

use crate::context::AppContext;

/// Bind `addr` and serve until Ctrl-C.
pub async fn run(ctx: AppContext, addr: &str) -> anyhow::Result<()> {
    let api = Api::from_context(ctx)?;
    let server = tiny_http::Server::http(addr)
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;
    let server = Arc::new(server);
    tracing::info!(%addr, "serving parrain API");
    eprintln!("parrain: listening on http://{addr} (Ctrl-C to stop)");

    let handle = Handle::current();
    let worker = {
        let server = Arc::clone(&server);
        tokio::task::spawn_blocking(move || accept_loop(&server, api, &handle))
    };

    tokio::select! {
        joined = worker => {
            joined.context("server worker panicked")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            tracing::info!("shutting down");
            server.unblock();
        }
    }
    Ok(())
}

fn accept_loop(server: &tiny_http::Server, mut api: Api, handle: &Handle) {
    for mut request in server.incoming_requests() {
        // Bodies are never read; drain so keep-alive clients stay in sync.
        let mut sink = Vec::new();
        let _ = std::io::Read::read_to_end(request.as_reader(), &mut sink);

        let method = request.method().as_str().to_string();
        let url = request.url().to_string();
        let response = handle.block_on(api.route(&method, &url));
        tracing::debug!(%method, %url, status = response.status, "handled request");

        if let Err(error) = request.respond(into_tiny(response)) {
            tracing::warn!(%error, %url, "failed to send response");
        }
    }
}

fn into_tiny(response: ApiResponse) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut out = tiny_http::Response::from_data(response.body).with_status_code(response.status);
    let headers = std::iter::once(("Content-Type", response.content_type.to_string()))
        .chain(response.headers);
    for (name, value) in headers {
        match tiny_http::Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => out.add_header(header),
            Err(()) => tracing::warn!(name, %value, "dropped invalid response header"),
        }
    }
    out
}
