//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage gateway trait definitions
//! - [`visit_event`] - Visit tracking event model
//! - [`visit_worker`] - Asynchronous visit processing worker
//!
//! # Visit Processing Flow
//!
//! 1. HTTP handler resolves a short code and redirects
//! 2. [`visit_event::VisitEvent`] is sent to a bounded channel
//! 3. [`visit_worker::run_visit_worker`] persists events with retry logic
//! 4. The visit and its counter increment are written via
//!    [`repositories::VisitRepository`]

pub mod entities;
pub mod repositories;
pub mod visit_event;
pub mod visit_worker;
