//! DTOs for hostname blocklist checks.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct BlocklistCheckResponse {
    pub hostname: String,
    pub blocked: bool,
}
