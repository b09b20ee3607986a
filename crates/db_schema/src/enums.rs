use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The category of a forum thread.
#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Hash,
  DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::PostTypeEnum"]
#[DbValueStyle = "verbatim"]
pub enum PostType {
  #[default]
  #[serde(rename = "Bill Suggestion")]
  BillSuggestion,
  #[serde(rename = "Site Suggestion")]
  SiteSuggestion,
  #[serde(rename = "Site Bug")]
  SiteBug,
}

/// A congress member's recorded position within a roll-call vote.
#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, DbEnum,
)]
#[ExistingTypePath = "crate::schema::sql_types::VotePositionEnum"]
#[DbValueStyle = "verbatim"]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum VotePosition {
  Yea,
  Nay,
  Present,
  NotVoting,
}

#[cfg(test)]
mod tests {
  use super::{PostType, VotePosition};
  use pretty_assertions::assert_eq;

  #[test]
  fn test_client_facing_names() {
    assert_eq!(
      "\"Bill Suggestion\"",
      serde_json::to_string(&PostType::BillSuggestion).unwrap_or_default()
    );
    assert_eq!(
      "\"NOT_VOTING\"",
      serde_json::to_string(&VotePosition::NotVoting).unwrap_or_default()
    );
  }
}
