//! Business logic services for the application layer.

pub mod blocklist_service;
pub mod url_service;
pub mod visit_service;

pub use blocklist_service::{BlocklistService, DEFAULT_BLOCKLIST_CACHE_TTL};
pub use url_service::{MAX_SHORT_CODE_GENERATION_ATTEMPTS, UrlService};
pub use visit_service::VisitService;
