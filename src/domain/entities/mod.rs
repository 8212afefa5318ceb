//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShortCode`] / [`EncodedKey`] - A short identifier and its storage key
//! - [`ShortenedUrl`] - A persisted short code to long URL mapping
//! - [`Visit`] - A single resolution of a short URL
//! - [`ApproximateCount`] - A best-effort aggregate counter
//!
//! Creation inputs use separate structs (`NewShortenedUrl`).

pub mod counter;
pub mod short_code;
pub mod shortened_url;
pub mod visit;

pub use counter::{ApproximateCount, CounterKind};
pub use short_code::{EncodedKey, ShortCode};
pub use shortened_url::{NewShortenedUrl, ResolvedUrl, ShortenedUrl};
pub use visit::{UrlStats, Visit};
