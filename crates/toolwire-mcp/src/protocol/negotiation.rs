//! Handshake state.

use crate::types::{InitializeParams, InitializeResult, MCP_VERSION};

/// Handshake progress for one session.
#[derive(Debug, Clone, Default)]
pub struct NegotiatedCapabilities {
    pub initialized: bool,
}

impl NegotiatedCapabilities {
    /// Log the client's handshake and answer with the server descriptor.
    ///
    /// The protocol version is never negotiated down: a mismatch is logged
    /// and the server's version is returned.
    pub fn negotiate(
        &mut self,
        params: InitializeParams,
        server: &InitializeResult,
    ) -> InitializeResult {
        if let Some(requested) = params.protocol_version.as_deref() {
            if requested != MCP_VERSION {
                tracing::warn!(
                    "Client requested protocol version {requested}, server supports {MCP_VERSION}. Proceeding with server version."
                );
            }
        }

        match &params.client_info {
            Some(client) => tracing::info!("Initialized with client: {} v{}", client.name, client.version),
            None => tracing::info!("Initialized with anonymous client"),
        }

        self.initialized = true;
        server.clone()
    }

    pub fn mark_initialized(&mut self) {
        if !self.initialized {
            tracing::info!("Handshake completed by notification");
        }
        self.initialized = true;
    }
}
