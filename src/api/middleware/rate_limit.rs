//! Per-client rate limiting for the JSON API.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Seconds between token replenishments for each client IP.
pub const API_REPLENISH_INTERVAL_SECS: u64 = 1;

/// Requests a client may burst before being throttled.
pub const API_BURST_SIZE: u32 = 50;

/// Token bucket limiter for `/api/*`, keyed on the socket peer address.
///
/// Requests exceeding the limit receive `429 Too Many Requests`. The server
/// must be served with `ConnectInfo<SocketAddr>` for the key to resolve.
pub fn api_layer()
-> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(API_REPLENISH_INTERVAL_SECS)
            .burst_size(API_BURST_SIZE)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
