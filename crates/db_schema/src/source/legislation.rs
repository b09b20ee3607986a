use crate::{
  enums::VotePosition,
  newtypes::{BillId, RollCallId, UserId},
  schema::{bill, bill_tag, congress_member, favorite_member, member_vote, roll_call},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A piece of federal legislation. Read-only from the application's
/// perspective, rows are sourced from external ingestion.
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = bill)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Bill {
  pub id: BillId,
  pub bill_number: String,
  pub title: String,
  pub policy_area: Option<String>,
  pub congress: i32,
  pub introduced_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = bill)]
pub struct BillInsertForm {
  pub bill_number: String,
  pub title: String,
  pub policy_area: Option<String>,
  pub congress: i32,
  pub introduced_at: Option<DateTime<Utc>>,
}

#[derive(Clone, PartialEq, Eq, Debug, diesel::Queryable, diesel::Selectable, diesel::Insertable)]
#[diesel(table_name = bill_tag)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BillTag {
  pub bill_id: BillId,
  pub tag: String,
}

#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Insertable,
)]
#[diesel(table_name = congress_member)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CongressMember {
  /// Congress.gov-assigned stable identifier for a legislator.
  pub bioguide_id: String,
  pub first_name: String,
  pub last_name: String,
  pub state: String,
  pub party: Option<String>,
}

/// A recorded legislative vote event with its per-position totals.
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = roll_call)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RollCall {
  pub id: RollCallId,
  pub bill_id: BillId,
  pub question: String,
  pub yea: i32,
  pub nay: i32,
  pub present: i32,
  pub not_voting: i32,
  pub voted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = roll_call)]
pub struct RollCallInsertForm {
  pub bill_id: BillId,
  pub question: String,
  pub yea: i32,
  pub nay: i32,
  pub present: i32,
  pub not_voting: i32,
  pub voted_at: DateTime<Utc>,
}

#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Insertable,
)]
#[diesel(table_name = member_vote)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberVote {
  pub roll_call_id: RollCallId,
  pub bioguide_id: String,
  pub position: VotePosition,
}

#[derive(Clone, PartialEq, Eq, Debug, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = favorite_member)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FavoriteMember {
  pub user_id: UserId,
  pub bioguide_id: String,
  pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = favorite_member)]
pub struct FavoriteMemberForm {
  pub user_id: UserId,
  pub bioguide_id: String,
}
