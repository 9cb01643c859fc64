use std::net::SocketAddr;

/// Client context for a GraphQL request.
///
/// Attached to every request as schema data so resolvers and logs can name
/// the caller.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClientContext {
    peer: Option<SocketAddr>,
}

impl ClientContext {
    pub fn new(peer: Option<SocketAddr>) -> Self {
        Self { peer }
    }

    pub fn peer(&self) -> Option<SocketAddr> {
        self.peer
    }

    /// Peer IP for logging, or `unknown`.
    pub fn ip(&self) -> String {
        self.peer
            .map(|p| p.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}
