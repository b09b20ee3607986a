use chrono::{DateTime, Utc};
use coolbills_db_schema::{
  newtypes::{BillId, RollCallId},
  source::legislation::{CongressMember, RollCall},
};
use coolbills_db_views::{structs::MemberVoteView, tally::Tally};
use serde::{Deserialize, Serialize};

/// Query string for `GET /api/legislation/search`. `tags` is comma-separated
/// and every tag must match.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchBills {
  pub query: Option<String>,
  pub tags: Option<String>,
  pub policy_area: Option<String>,
  pub congress: Option<i32>,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

/// Query string for `GET /api/congress/vote-search`. `positions` is
/// comma-separated (`YEA,NAY,PRESENT,NOT_VOTING`).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchMemberVotes {
  pub bioguide_id: Option<String>,
  pub search: Option<String>,
  pub positions: Option<String>,
  pub voted_after: Option<DateTime<Utc>>,
  pub voted_before: Option<DateTime<Utc>>,
  pub policy_area: Option<String>,
  #[serde(default)]
  pub favorites_only: bool,
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MemberVoteSearchResponse {
  pub results: Vec<MemberVoteView>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GetTally {
  pub roll_call_id: RollCallId,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TallyResponse {
  pub roll_call: RollCall,
  pub tally: Tally,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BillTalliesResponse {
  pub bill_id: BillId,
  pub tallies: Vec<TallyResponse>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FavoriteMemberRequest {
  pub bioguide_id: String,
  pub favorite: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListFavoritesResponse {
  pub members: Vec<CongressMember>,
}
