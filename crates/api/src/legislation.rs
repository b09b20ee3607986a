use actix_web::web::{Data, Json, Path, Query};
use coolbills_api_common::{
  context::CoolbillsContext,
  forum::SuccessResponse,
  legislation::{
    BillTalliesResponse,
    FavoriteMemberRequest,
    ListFavoritesResponse,
    MemberVoteSearchResponse,
    SearchBills,
    SearchMemberVotes,
    TallyResponse,
  },
};
use coolbills_db_schema::{
  enums::VotePosition,
  newtypes::{BillId, RollCallId},
  source::legislation::{CongressMember, FavoriteMember, FavoriteMemberForm, RollCall},
};
use coolbills_db_views::{
  bill_view::BillQuery,
  member_vote_view::MemberVoteQuery,
  structs::{BillSearchResults, UserView},
  tally::Tally,
};
use coolbills_utils::{
  error::{CoolbillsErrorType, CoolbillsResult},
  rate_limit::RateLimitType,
};
use std::str::FromStr;

fn split_csv(raw: &Option<String>) -> Vec<String> {
  raw
    .as_deref()
    .unwrap_or_default()
    .split(',')
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}

#[tracing::instrument(skip(context))]
pub async fn search_bills(
  data: Query<SearchBills>,
  context: Data<CoolbillsContext>,
  user_view: Option<UserView>,
) -> CoolbillsResult<Json<BillSearchResults>> {
  if let Some(user_view) = &user_view {
    context
      .rate_limit_cell()
      .check(RateLimitType::Search, user_view.user.id.0)?;
  }

  let results = BillQuery {
    search: data.query.clone(),
    tags: split_csv(&data.tags),
    policy_area: data.policy_area.clone(),
    congress: data.congress,
    page: data.page,
    limit: data.limit,
  }
  .search(&mut context.pool())
  .await?;

  Ok(Json(results))
}

#[tracing::instrument(skip(context))]
pub async fn search_member_votes(
  data: Query<SearchMemberVotes>,
  context: Data<CoolbillsContext>,
  user_view: Option<UserView>,
) -> CoolbillsResult<Json<MemberVoteSearchResponse>> {
  if let Some(user_view) = &user_view {
    context
      .rate_limit_cell()
      .check(RateLimitType::Search, user_view.user.id.0)?;
  }

  let positions = match split_csv(&data.positions).as_slice() {
    [] => None,
    raw => Some(
      raw
        .iter()
        .map(|p| {
          VotePosition::from_str(p)
            .map_err(|_| CoolbillsErrorType::InvalidVotePosition.into())
        })
        .collect::<CoolbillsResult<Vec<_>>>()?,
    ),
  };

  let results = MemberVoteQuery {
    bioguide_id: data.bioguide_id.clone(),
    search: data.search.clone(),
    positions,
    voted_after: data.voted_after,
    voted_before: data.voted_before,
    policy_area: data.policy_area.clone(),
    favorites_only: data.favorites_only,
    page: data.page,
    limit: data.limit,
    my_user_id: user_view.map(|u| u.user.id),
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(MemberVoteSearchResponse { results }))
}

#[tracing::instrument(skip(context))]
pub async fn roll_call_tally(
  roll_call_id: Path<RollCallId>,
  context: Data<CoolbillsContext>,
) -> CoolbillsResult<Json<TallyResponse>> {
  let roll_call = RollCall::read(&mut context.pool(), *roll_call_id).await?;
  let tally = Tally::from_roll_call(&roll_call);
  Ok(Json(TallyResponse { roll_call, tally }))
}

/// Every recorded roll call for one bill, newest first, each with its tally.
#[tracing::instrument(skip(context))]
pub async fn bill_tallies(
  bill_id: Path<BillId>,
  context: Data<CoolbillsContext>,
) -> CoolbillsResult<Json<BillTalliesResponse>> {
  let roll_calls = RollCall::for_bill(&mut context.pool(), *bill_id).await?;
  let tallies = roll_calls
    .into_iter()
    .map(|roll_call| TallyResponse {
      tally: Tally::from_roll_call(&roll_call),
      roll_call,
    })
    .collect();
  Ok(Json(BillTalliesResponse {
    bill_id: *bill_id,
    tallies,
  }))
}

#[tracing::instrument(skip(context))]
pub async fn favorite_member(
  data: Json<FavoriteMemberRequest>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<SuccessResponse>> {
  CongressMember::read(&mut context.pool(), &data.bioguide_id).await?;

  let form = FavoriteMemberForm {
    user_id: user_view.user.id,
    bioguide_id: data.bioguide_id.clone(),
  };
  if data.favorite {
    FavoriteMember::create(&mut context.pool(), &form).await?;
  } else {
    FavoriteMember::delete(&mut context.pool(), &form).await?;
  }

  Ok(Json(SuccessResponse { success: true }))
}

#[tracing::instrument(skip(context))]
pub async fn list_favorites(
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<ListFavoritesResponse>> {
  let members =
    CongressMember::favorites_for_user(&mut context.pool(), user_view.user.id).await?;
  Ok(Json(ListFavoritesResponse { members }))
}
