use crate::admin::MODERATE_FORUM;
use actix_web::web::{Data, Json};
use chrono::Utc;
use coolbills_api_common::{
  context::CoolbillsContext,
  forum::{CommentResponse, CreateComment, DeleteComment, EditComment, SuccessResponse},
  utils::{check_body, require_permission, MAX_COMMENT_DEPTH},
};
use coolbills_db_schema::{
  source::forum_comment::{ForumComment, ForumCommentInsertForm, ForumCommentUpdateForm},
  source::forum_post::ForumPost,
  traits::Crud,
};
use coolbills_db_views::structs::{ForumCommentView, UserView};
use coolbills_utils::{
  error::{CoolbillsErrorType, CoolbillsResult},
  rate_limit::RateLimitType,
};

#[tracing::instrument(skip(context))]
pub async fn create_comment(
  data: Json<CreateComment>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<CommentResponse>> {
  check_body(&data.body)?;

  let post = ForumPost::read(&mut context.pool(), data.post_id).await?;
  if post.deleted {
    Err(CoolbillsErrorType::NotFound)?
  }
  if post.locked {
    Err(CoolbillsErrorType::Locked)?
  }

  let depth = match data.parent_id {
    Some(parent_id) => {
      let parent = ForumComment::read(&mut context.pool(), parent_id).await?;
      if parent.post_id != data.post_id {
        Err(CoolbillsErrorType::CommentParentMismatch)?
      }
      if parent.depth + 1 >= MAX_COMMENT_DEPTH {
        Err(CoolbillsErrorType::MaxCommentDepthReached)?
      }
      parent.depth + 1
    }
    None => 0,
  };

  context
    .rate_limit_cell()
    .check(RateLimitType::Comment, user_view.user.id.0)?;

  let form = ForumCommentInsertForm {
    post_id: data.post_id,
    creator_id: user_view.user.id,
    parent_id: data.parent_id,
    body: data.body.trim().to_string(),
    depth,
  };
  let comment = ForumComment::create(&mut context.pool(), &form).await?;

  Ok(Json(CommentResponse {
    comment_view: fresh_view(comment, &user_view),
  }))
}

/// Only the author may edit, and only while the comment is live.
#[tracing::instrument(skip(context))]
pub async fn edit_comment(
  data: Json<EditComment>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<CommentResponse>> {
  check_body(&data.body)?;

  let comment = ForumComment::read(&mut context.pool(), data.comment_id).await?;
  if comment.creator_id != user_view.user.id || comment.deleted {
    Err(CoolbillsErrorType::NoCommentEditAllowed)?
  }

  // Resubmitting the same text is not an edit.
  let changed = body_changed(&comment.body, &data.body);
  let form = ForumCommentUpdateForm {
    body: Some(data.body.trim().to_string()),
    edited: changed.then_some(true),
    updated_at: changed.then(|| Some(Utc::now())),
    ..Default::default()
  };
  ForumComment::update(&mut context.pool(), data.comment_id, &form).await?;
  let comment_view =
    ForumCommentView::read(&mut context.pool(), data.comment_id, Some(user_view.user.id)).await?;

  Ok(Json(CommentResponse { comment_view }))
}

#[tracing::instrument(skip(context))]
pub async fn delete_comment(
  data: Json<DeleteComment>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<SuccessResponse>> {
  let comment = ForumComment::read(&mut context.pool(), data.comment_id).await?;
  if comment.creator_id != user_view.user.id {
    require_permission(&user_view, &mut context.pool(), MODERATE_FORUM).await?;
  }

  let form = ForumCommentUpdateForm {
    deleted: Some(true),
    updated_at: Some(Some(Utc::now())),
    ..Default::default()
  };
  ForumComment::update(&mut context.pool(), data.comment_id, &form).await?;

  Ok(Json(SuccessResponse { success: true }))
}

/// A just-written comment has no votes yet, so the view can be assembled
/// without going back to the database.
fn fresh_view(comment: ForumComment, user_view: &UserView) -> ForumCommentView {
  ForumCommentView {
    comment,
    creator_name: user_view.user.name.clone(),
    creator_username: user_view.user.username.clone(),
    upvotes: 0,
    downvotes: 0,
    my_vote: None,
  }
}

fn body_changed(current: &str, submitted: &str) -> bool {
  current != submitted.trim()
}

#[cfg(test)]
mod tests {
  use super::body_changed;

  #[test]
  fn resubmitting_identical_body_is_not_an_edit() {
    assert!(!body_changed("fine as written", "fine as written"));
    assert!(!body_changed("fine as written", "  fine as written  "));
    assert!(body_changed("fine as written", "now with corrections"));
  }
}
