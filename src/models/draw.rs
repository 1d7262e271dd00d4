use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::WinnerResponse;

/// Result of "draw the next pending prize". When every prize has been
/// drawn this carries `all_drawn: true` and no winner; that is a normal
/// end state, not an error.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawNextResponse {
    pub all_drawn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<WinnerResponse>,
}

/// Confirmation payload for the full reset. The operation refuses to run
/// unless `keyword` matches the expected literal exactly.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ResetRequest {
    pub keyword: String,
}

/// Outcome of clearing the winner history
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClearWinnersResponse {
    /// Number of winner records removed
    pub cleared: u64,
}
