//! HTTP request handlers.
//!
//! Each handler module corresponds to one endpoint.

pub mod blocklist;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;
pub mod url;

pub use blocklist::blocklist_check_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
pub use url::url_handler;
