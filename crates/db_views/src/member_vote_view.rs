use crate::structs::MemberVoteView;
use chrono::{DateTime, Utc};
use coolbills_db_schema::{
  enums::VotePosition,
  newtypes::UserId,
  schema::{bill, congress_member, member_vote, roll_call},
  source::legislation::{Bill, CongressMember, FavoriteMember, MemberVote, RollCall},
  utils::{fuzzy_search, get_conn, limit_and_offset, DbPool},
};
use coolbills_utils::error::CoolbillsResult;
use diesel::{
  BoolExpressionMethods,
  ExpressionMethods,
  PgTextExpressionMethods,
  QueryDsl,
  SelectableHelper,
};
use diesel_async::RunQueryDsl;
use std::collections::HashSet;

#[derive(Default, Clone)]
pub struct MemberVoteQuery {
  pub bioguide_id: Option<String>,
  /// Fuzzy-matched against the member's first name, last name or state.
  pub search: Option<String>,
  pub positions: Option<Vec<VotePosition>>,
  pub voted_after: Option<DateTime<Utc>>,
  pub voted_before: Option<DateTime<Utc>>,
  pub policy_area: Option<String>,
  /// Restrict results to the viewer's favorite members. Ignored when the
  /// viewer is anonymous.
  pub favorites_only: bool,
  pub page: Option<i64>,
  pub limit: Option<i64>,
  pub my_user_id: Option<UserId>,
}

impl MemberVoteQuery {
  /// Newest roll calls first. When the viewer is logged in, votes by their
  /// favorite members are moved to the front of the page without disturbing
  /// the relative order of either group.
  pub async fn list(self, pool: &mut DbPool<'_>) -> CoolbillsResult<Vec<MemberVoteView>> {
    let (limit, offset) = limit_and_offset(self.page, self.limit)?;

    let favorites: HashSet<String> = match self.my_user_id {
      Some(me) => FavoriteMember::bioguide_ids_for_user(pool, me)
        .await?
        .into_iter()
        .collect(),
      None => HashSet::new(),
    };

    let mut conn = get_conn(pool).await?;
    let mut query = member_vote::table
      .inner_join(congress_member::table)
      .inner_join(roll_call::table.inner_join(bill::table))
      .select((
        MemberVote::as_select(),
        CongressMember::as_select(),
        RollCall::as_select(),
        Bill::as_select(),
      ))
      .into_boxed();

    if let Some(bioguide_id) = &self.bioguide_id {
      query = query.filter(member_vote::bioguide_id.eq(bioguide_id.clone()));
    }
    if let Some(search) = &self.search {
      let pattern = fuzzy_search(search);
      query = query.filter(
        congress_member::first_name
          .ilike(pattern.clone())
          .or(congress_member::last_name.ilike(pattern.clone()))
          .or(congress_member::state.ilike(pattern)),
      );
    }
    if let Some(positions) = &self.positions {
      query = query.filter(member_vote::position.eq_any(positions.clone()));
    }
    if let Some(voted_after) = self.voted_after {
      query = query.filter(roll_call::voted_at.ge(voted_after));
    }
    if let Some(voted_before) = self.voted_before {
      query = query.filter(roll_call::voted_at.le(voted_before));
    }
    if let Some(policy_area) = &self.policy_area {
      query = query.filter(bill::policy_area.eq(policy_area.clone()));
    }
    if self.favorites_only && self.my_user_id.is_some() {
      let ids: Vec<String> = favorites.iter().cloned().collect();
      query = query.filter(member_vote::bioguide_id.eq_any(ids));
    }

    let rows = query
      .order_by(roll_call::voted_at.desc())
      .then_order_by(member_vote::bioguide_id.asc())
      .limit(limit)
      .offset(offset)
      .load::<(MemberVote, CongressMember, RollCall, Bill)>(&mut *conn)
      .await?;

    let views = rows
      .into_iter()
      .map(|(vote, member, roll_call, bill)| MemberVoteView {
        favorite: favorites.contains(&member.bioguide_id),
        vote,
        member,
        roll_call,
        bill,
      })
      .collect();

    Ok(partition_favorites_first(views))
  }
}

/// Stable partition: favorites keep their order, non-favorites keep theirs.
fn partition_favorites_first(views: Vec<MemberVoteView>) -> Vec<MemberVoteView> {
  let (mut favorites, rest): (Vec<_>, Vec<_>) = views.into_iter().partition(|v| v.favorite);
  favorites.extend(rest);
  favorites
}

#[cfg(test)]
mod tests {
  #![allow(clippy::indexing_slicing)]
  use super::partition_favorites_first;
  use crate::structs::MemberVoteView;
  use chrono::Utc;
  use coolbills_db_schema::{
    enums::VotePosition,
    newtypes::{BillId, RollCallId},
    source::legislation::{Bill, CongressMember, MemberVote, RollCall},
  };
  use pretty_assertions::assert_eq;

  fn view(bioguide_id: &str, favorite: bool) -> MemberVoteView {
    MemberVoteView {
      vote: MemberVote {
        roll_call_id: RollCallId(1),
        bioguide_id: bioguide_id.to_string(),
        position: VotePosition::Yea,
      },
      member: CongressMember {
        bioguide_id: bioguide_id.to_string(),
        first_name: "Pat".to_string(),
        last_name: "Doe".to_string(),
        state: "VT".to_string(),
        party: None,
      },
      roll_call: RollCall {
        id: RollCallId(1),
        bill_id: BillId(1),
        question: "On Passage".to_string(),
        yea: 1,
        nay: 0,
        present: 0,
        not_voting: 0,
        voted_at: Utc::now(),
      },
      bill: Bill {
        id: BillId(1),
        bill_number: "hr-1".to_string(),
        title: "A bill".to_string(),
        policy_area: None,
        congress: 118,
        introduced_at: None,
      },
      favorite,
    }
  }

  #[test]
  fn favorites_move_to_front_stably() {
    let partitioned = partition_favorites_first(vec![
      view("A000001", false),
      view("B000002", true),
      view("C000003", false),
      view("D000004", true),
    ]);
    let ids: Vec<&str> = partitioned
      .iter()
      .map(|v| v.member.bioguide_id.as_str())
      .collect();
    assert_eq!(vec!["B000002", "D000004", "A000001", "C000003"], ids);
  }

  #[test]
  fn no_favorites_keeps_order() {
    let partitioned = partition_favorites_first(vec![
      view("A000001", false),
      view("B000002", false),
    ]);
    let ids: Vec<&str> = partitioned
      .iter()
      .map(|v| v.member.bioguide_id.as_str())
      .collect();
    assert_eq!(vec!["A000001", "B000002"], ids);
  }
}
