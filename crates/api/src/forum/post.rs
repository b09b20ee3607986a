use crate::admin::MODERATE_FORUM;
use actix_web::web::{Data, Json, Path, Query};
use chrono::Utc;
use coolbills_api_common::{
  context::CoolbillsContext,
  forum::{
    BookmarkPost,
    CreatePost,
    DeletePost,
    GetPostResponse,
    ListPosts,
    ListPostsResponse,
    LockPost,
    PinPost,
    PostResponse,
    SuccessResponse,
  },
  utils::{check_body, check_post_title, require_permission},
};
use coolbills_db_schema::{
  newtypes::ForumPostId,
  source::forum_post::{
    ForumPost,
    ForumPostBookmark,
    ForumPostBookmarkForm,
    ForumPostInsertForm,
    ForumPostUpdateForm,
  },
  traits::Crud,
};
use coolbills_db_views::{
  forum_comment_view::build_comment_tree,
  forum_post_view::ForumPostQuery,
  structs::{ForumCommentView, ForumPostView, UserView},
};
use coolbills_utils::{error::CoolbillsResult, rate_limit::RateLimitType};

#[tracing::instrument(skip(context))]
pub async fn create_post(
  data: Json<CreatePost>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<PostResponse>> {
  check_post_title(&data.title)?;
  check_body(&data.body)?;
  context
    .rate_limit_cell()
    .check(RateLimitType::Post, user_view.user.id.0)?;

  let form = ForumPostInsertForm {
    title: data.title.trim().to_string(),
    body: data.body.trim().to_string(),
    post_type: data.post_type,
    creator_id: user_view.user.id,
  };
  let post = ForumPost::create(&mut context.pool(), &form).await?;
  let post_view =
    ForumPostView::read(&mut context.pool(), post.id, Some(user_view.user.id)).await?;

  Ok(Json(PostResponse { post_view }))
}

/// Reading a post counts a view, then returns the post plus its full comment
/// tree.
#[tracing::instrument(skip(context))]
pub async fn get_post(
  post_id: Path<ForumPostId>,
  context: Data<CoolbillsContext>,
  user_view: Option<UserView>,
) -> CoolbillsResult<Json<GetPostResponse>> {
  let my_user_id = user_view.map(|u| u.user.id);

  ForumPost::increment_views(&mut context.pool(), *post_id).await?;
  let post_view = ForumPostView::read(&mut context.pool(), *post_id, my_user_id).await?;
  let comment_views =
    ForumCommentView::for_post(&mut context.pool(), *post_id, my_user_id).await?;

  Ok(Json(GetPostResponse {
    post_view,
    comments: build_comment_tree(comment_views),
  }))
}

#[tracing::instrument(skip(context))]
pub async fn list_posts(
  data: Query<ListPosts>,
  context: Data<CoolbillsContext>,
  user_view: Option<UserView>,
) -> CoolbillsResult<Json<ListPostsResponse>> {
  let posts = ForumPostQuery {
    page: data.page,
    limit: data.limit,
    my_user_id: user_view.map(|u| u.user.id),
  }
  .list(&mut context.pool())
  .await?;

  Ok(Json(ListPostsResponse { posts }))
}

/// Authors may delete their own posts; moderators may delete any.
#[tracing::instrument(skip(context))]
pub async fn delete_post(
  data: Json<DeletePost>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<SuccessResponse>> {
  let post = ForumPost::read(&mut context.pool(), data.post_id).await?;
  if post.creator_id != user_view.user.id {
    require_permission(&user_view, &mut context.pool(), MODERATE_FORUM).await?;
  }

  let form = ForumPostUpdateForm {
    deleted: Some(true),
    updated_at: Some(Some(Utc::now())),
    ..Default::default()
  };
  ForumPost::update(&mut context.pool(), data.post_id, &form).await?;

  Ok(Json(SuccessResponse { success: true }))
}

#[tracing::instrument(skip(context))]
pub async fn lock_post(
  data: Json<LockPost>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<PostResponse>> {
  require_permission(&user_view, &mut context.pool(), MODERATE_FORUM).await?;

  ForumPost::read(&mut context.pool(), data.post_id).await?;
  let form = ForumPostUpdateForm {
    locked: Some(data.locked),
    ..Default::default()
  };
  ForumPost::update(&mut context.pool(), data.post_id, &form).await?;
  let post_view =
    ForumPostView::read(&mut context.pool(), data.post_id, Some(user_view.user.id)).await?;

  Ok(Json(PostResponse { post_view }))
}

#[tracing::instrument(skip(context))]
pub async fn pin_post(
  data: Json<PinPost>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<PostResponse>> {
  require_permission(&user_view, &mut context.pool(), MODERATE_FORUM).await?;

  ForumPost::read(&mut context.pool(), data.post_id).await?;
  let form = ForumPostUpdateForm {
    pinned: Some(data.pinned),
    ..Default::default()
  };
  ForumPost::update(&mut context.pool(), data.post_id, &form).await?;
  let post_view =
    ForumPostView::read(&mut context.pool(), data.post_id, Some(user_view.user.id)).await?;

  Ok(Json(PostResponse { post_view }))
}

#[tracing::instrument(skip(context))]
pub async fn bookmark_post(
  data: Json<BookmarkPost>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<SuccessResponse>> {
  ForumPost::read(&mut context.pool(), data.post_id).await?;

  let form = ForumPostBookmarkForm {
    post_id: data.post_id,
    user_id: user_view.user.id,
  };
  if data.bookmarked {
    ForumPostBookmark::create(&mut context.pool(), &form).await?;
  } else {
    ForumPostBookmark::delete(&mut context.pool(), &form).await?;
  }

  Ok(Json(SuccessResponse { success: true }))
}
