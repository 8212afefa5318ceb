//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage gateway: the only way the core touches
//! persistence. Implementations live in `crate::infrastructure::persistence`;
//! mock implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`UrlRepository`] - Shortened URL creation and lookup
//! - [`VisitRepository`] - Visit tracking and per-URL statistics
//! - [`BlocklistRepository`] - Persistent hostname blocklist
//! - [`CounterRepository`] - Approximate counter reads
//!
//! # Contract
//!
//! Every create path pairs the insert with its counter increment in one
//! transaction. A uniqueness violation surfaces as
//! [`crate::error::AppError::Conflict`] and is the only retryable failure.

pub mod blocklist_repository;
pub mod counter_repository;
pub mod url_repository;
pub mod visit_repository;

pub use blocklist_repository::BlocklistRepository;
pub use counter_repository::CounterRepository;
pub use url_repository::UrlRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use blocklist_repository::MockBlocklistRepository;
#[cfg(test)]
pub use counter_repository::MockCounterRepository;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
