use actix_web::web::{Data, Json};
use coolbills_api_common::{
  context::CoolbillsContext,
  forum::{CommentVote, PostVote, VoteActionType, VoteResponse},
};
use coolbills_db_schema::{
  newtypes::UserId,
  source::{
    forum_comment::{ForumComment, ForumCommentVote, ForumCommentVoteForm},
    forum_post::{ForumPost, ForumPostVote, ForumPostVoteForm},
  },
  traits::{Crud, Voteable},
};
use coolbills_db_views::structs::UserView;
use coolbills_utils::error::{CoolbillsErrorType, CoolbillsResult};
use std::str::FromStr;

fn parse_action(raw: &str) -> CoolbillsResult<VoteActionType> {
  VoteActionType::from_str(raw).map_err(|_| CoolbillsErrorType::InvalidVoteType.into())
}

/// Guard ladder shared by both vote targets. Order matters for the reported
/// error: deleted target, then the post lock, then self-votes. Failing here
/// means no row is written.
fn check_vote_allowed(
  deleted: bool,
  locked: bool,
  creator_id: UserId,
  voter_id: UserId,
) -> CoolbillsResult<()> {
  if deleted {
    Err(CoolbillsErrorType::NotFound)?
  }
  if locked {
    Err(CoolbillsErrorType::Locked)?
  }
  if creator_id == voter_id {
    Err(CoolbillsErrorType::CantVoteOnOwn)?
  }
  Ok(())
}

#[tracing::instrument(skip(context))]
pub async fn post_vote(
  data: Json<PostVote>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<VoteResponse>> {
  let action = parse_action(&data.type_)?;

  let post = ForumPost::read(&mut context.pool(), data.post_id).await?;
  check_vote_allowed(post.deleted, post.locked, post.creator_id, user_view.user.id)?;

  let me = user_view.user.id;
  match action {
    VoteActionType::Upvote => {
      ForumPostVote::vote(&mut context.pool(), &ForumPostVoteForm::new(post.id, me, true)).await?;
    }
    VoteActionType::Downvote => {
      ForumPostVote::vote(&mut context.pool(), &ForumPostVoteForm::new(post.id, me, false))
        .await?;
    }
    VoteActionType::RemoveUpvote => {
      ForumPostVote::remove_vote(&mut context.pool(), me, post.id, true).await?;
    }
    VoteActionType::RemoveDownvote => {
      ForumPostVote::remove_vote(&mut context.pool(), me, post.id, false).await?;
    }
  }

  let (upvotes, downvotes) = ForumPostVote::counts(&mut context.pool(), post.id).await?;
  Ok(Json(VoteResponse {
    success: true,
    upvotes,
    downvotes,
    net_votes: upvotes - downvotes,
    action,
  }))
}

/// Comment votes inherit the lock state of their post.
#[tracing::instrument(skip(context))]
pub async fn comment_vote(
  data: Json<CommentVote>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<VoteResponse>> {
  let action = parse_action(&data.type_)?;

  let comment = ForumComment::read(&mut context.pool(), data.comment_id).await?;
  let post = ForumPost::read(&mut context.pool(), comment.post_id).await?;
  check_vote_allowed(
    comment.deleted,
    post.locked,
    comment.creator_id,
    user_view.user.id,
  )?;

  let me = user_view.user.id;
  match action {
    VoteActionType::Upvote => {
      ForumCommentVote::vote(
        &mut context.pool(),
        &ForumCommentVoteForm::new(comment.id, me, true),
      )
      .await?;
    }
    VoteActionType::Downvote => {
      ForumCommentVote::vote(
        &mut context.pool(),
        &ForumCommentVoteForm::new(comment.id, me, false),
      )
      .await?;
    }
    VoteActionType::RemoveUpvote => {
      ForumCommentVote::remove_vote(&mut context.pool(), me, comment.id, true).await?;
    }
    VoteActionType::RemoveDownvote => {
      ForumCommentVote::remove_vote(&mut context.pool(), me, comment.id, false).await?;
    }
  }

  let (upvotes, downvotes) = ForumCommentVote::counts(&mut context.pool(), comment.id).await?;
  Ok(Json(VoteResponse {
    success: true,
    upvotes,
    downvotes,
    net_votes: upvotes - downvotes,
    action,
  }))
}

#[cfg(test)]
mod tests {
  use super::{check_vote_allowed, parse_action};
  use coolbills_api_common::forum::VoteActionType;
  use coolbills_db_schema::newtypes::UserId;
  use coolbills_utils::error::CoolbillsErrorType;
  use pretty_assertions::assert_eq;

  #[test]
  fn rejects_unknown_actions_with_typed_error() {
    let err = parse_action("upvote-twice").map(|_| ()).map_err(|e| e.error_type);
    assert_eq!(Err(CoolbillsErrorType::InvalidVoteType), err);
  }

  #[test]
  fn guards_reject_in_order_without_writing() {
    let author = UserId(1);
    let voter = UserId(2);

    assert_eq!(
      Err(CoolbillsErrorType::NotFound),
      check_vote_allowed(true, false, author, voter).map_err(|e| e.error_type)
    );
    assert_eq!(
      Err(CoolbillsErrorType::Locked),
      check_vote_allowed(false, true, author, voter).map_err(|e| e.error_type)
    );
    assert_eq!(
      Err(CoolbillsErrorType::CantVoteOnOwn),
      check_vote_allowed(false, false, author, author).map_err(|e| e.error_type)
    );
    // a deleted target wins over the lock in the reported error
    assert_eq!(
      Err(CoolbillsErrorType::NotFound),
      check_vote_allowed(true, true, author, author).map_err(|e| e.error_type)
    );
    assert!(check_vote_allowed(false, false, author, voter).is_ok());
  }

  #[test]
  fn accepts_all_four_actions() {
    assert_eq!(
      Ok(VoteActionType::Upvote),
      parse_action("upvote").map_err(|e| e.error_type)
    );
    assert_eq!(
      Ok(VoteActionType::RemoveDownvote),
      parse_action("remove-downvote").map_err(|e| e.error_type)
    );
  }
}
