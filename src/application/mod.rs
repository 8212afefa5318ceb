//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide the API used by HTTP
//! handlers, the visit worker and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short code generation and resolution
//! - [`services::visit_service::VisitService`] - Visit tracking and statistics
//! - [`services::blocklist_service::BlocklistService`] - Cached hostname blocklist

pub mod services;
