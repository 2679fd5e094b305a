//! Lane (column) identifiers.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

/// Status lane a card belongs to.
///
/// The serde representation is the client-side vocabulary (`todo`,
/// `inProgress`, `completed`); `Display`/`FromStr` carry the backend
/// vocabulary (`todo`, `in-progress`, `completed`). Both mappings are
/// total and invert each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display, Default,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "kebab-case")]
pub enum Lane {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl Lane {
    /// All lanes, in column display order.
    pub const ALL: [Lane; 3] = [Lane::Todo, Lane::InProgress, Lane::Completed];
}
