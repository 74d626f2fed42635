//! Server assembly and accept loop.
//!
//! # Responsibilities
//! - Wire the store, dispatcher, and listener together
//! - Spawn one handler task per accepted connection
//! - Stop accepting when the shutdown signal fires

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::ServerConfig;
use crate::net::{ConnectionHandler, Listener, ListenerError};
use crate::routing::Dispatcher;
use crate::store::CategoryStore;

/// The CJTP server: one shared store, one dispatcher, many connections.
pub struct CjtpServer {
    config: ServerConfig,
    store: Arc<CategoryStore>,
    dispatcher: Arc<Dispatcher>,
}

impl CjtpServer {
    /// Create a server with the stock seeded store.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(CategoryStore::new()))
    }

    /// Create a server around an existing store handle.
    pub fn with_store(config: ServerConfig, store: Arc<CategoryStore>) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&store)));
        Self {
            config,
            store,
            dispatcher,
        }
    }

    /// Handle to the shared store.
    pub fn store(&self) -> &Arc<CategoryStore> {
        &self.store
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accept connections until the shutdown signal fires.
    ///
    /// Each accepted connection runs on its own task; the connection
    /// permit rides along and frees a listener slot when the handler
    /// finishes.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        let read_timeout = self.config.timeouts.read_idle();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer_addr, permit) = accepted?;
                    let handler =
                        ConnectionHandler::new(stream, Arc::clone(&self.dispatcher), read_timeout);
                    tracing::info!(
                        connection_id = %handler.id(),
                        peer_addr = %peer_addr,
                        "Client connected"
                    );
                    tokio::spawn(async move {
                        let _permit = permit;
                        handler.run().await;
                    });
                }
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received, no longer accepting");
                    break;
                }
            }
        }

        Ok(())
    }
}
