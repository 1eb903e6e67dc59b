//! Router-backed server for client and API tests

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::{GatewayClient, Result};

/// A registry router served on an ephemeral loopback port
///
/// Dropping the server closes the shutdown channel, which stops it the same
/// way [`TestServer::shutdown`] does without waiting for it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: GatewayClient,
    stop: oneshot::Sender<()>,
    serving: JoinHandle<()>,
}

impl TestServer {
    /// Serve `router` and connect a client to it
    ///
    /// ```ignore
    /// let server = TestServer::start(create_router(AppState::new(Storage::in_memory()))).await?;
    /// let gateways = server.client.list_gateways().await?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (stop, stopped) = oneshot::channel::<()>();

        let serving = tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = stopped.await;
                })
                .await;
            if let Err(e) = result {
                tracing::warn!(error = %e, "Test server exited with an error");
            }
        });

        let client = GatewayClient::new(&format!("http://{}", addr))?;
        Ok(Self {
            addr,
            client,
            stop,
            serving,
        })
    }

    /// `http://host:port`, without a trailing slash
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting requests and wait for the server task to finish
    pub async fn shutdown(self) {
        let _ = self.stop.send(());
        let _ = self.serving.await;
    }
}
