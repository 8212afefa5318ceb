//! Storage gateway implementations.
//!
//! PostgreSQL repositories use SQLx with runtime-checked queries; schema
//! lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Shortened URL storage and lookup
//! - [`PgVisitRepository`] - Visit tracking and per-URL statistics
//! - [`PgBlocklistRepository`] - Persistent hostname blocklist
//! - [`PgCounterRepository`] - Approximate counter reads
//! - [`MemoryStore`] - All of the above in memory

pub mod memory_store;
pub mod pg_blocklist_repository;
pub mod pg_counter_repository;
pub mod pg_url_repository;
pub mod pg_visit_repository;

pub use memory_store::MemoryStore;
pub use pg_blocklist_repository::PgBlocklistRepository;
pub use pg_counter_repository::PgCounterRepository;
pub use pg_url_repository::PgUrlRepository;
pub use pg_visit_repository::PgVisitRepository;
