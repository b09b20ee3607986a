use crate::{
  enums::PostType,
  newtypes::{ForumPostId, UserId},
  schema::{forum_post, forum_post_bookmark, forum_post_vote},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discussion thread. Deletion is a soft flag, the row is never removed.
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = forum_post)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ForumPost {
  pub id: ForumPostId,
  pub title: String,
  pub body: String,
  pub post_type: PostType,
  pub creator_id: UserId,
  /// Locked posts reject votes and new comments.
  pub locked: bool,
  pub pinned: bool,
  pub deleted: bool,
  pub views: i32,
  pub published_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = forum_post)]
pub struct ForumPostInsertForm {
  pub title: String,
  pub body: String,
  pub post_type: PostType,
  pub creator_id: UserId,
}

#[derive(Debug, Clone, Default, diesel::AsChangeset)]
#[diesel(table_name = forum_post)]
pub struct ForumPostUpdateForm {
  pub title: Option<String>,
  pub body: Option<String>,
  pub locked: Option<bool>,
  pub pinned: Option<bool>,
  pub deleted: Option<bool>,
  pub updated_at: Option<Option<DateTime<Utc>>>,
}

/// One user's directional vote on a post. The composite primary key on
/// (post_id, user_id) is what makes the "at most one of {upvote, downvote}"
/// invariant structural rather than best-effort.
#[derive(Clone, PartialEq, Eq, Debug, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = forum_post_vote)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ForumPostVote {
  pub post_id: ForumPostId,
  pub user_id: UserId,
  pub upvote: bool,
  pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, diesel::Insertable, diesel::AsChangeset)]
#[diesel(table_name = forum_post_vote)]
pub struct ForumPostVoteForm {
  pub post_id: ForumPostId,
  pub user_id: UserId,
  pub upvote: bool,
}

impl ForumPostVoteForm {
  pub fn new(post_id: ForumPostId, user_id: UserId, upvote: bool) -> Self {
    ForumPostVoteForm {
      post_id,
      user_id,
      upvote,
    }
  }
}

#[derive(Clone, PartialEq, Eq, Debug, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = forum_post_bookmark)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ForumPostBookmark {
  pub post_id: ForumPostId,
  pub user_id: UserId,
  pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = forum_post_bookmark)]
pub struct ForumPostBookmarkForm {
  pub post_id: ForumPostId,
  pub user_id: UserId,
}
