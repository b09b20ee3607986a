use crate::{
  newtypes::{ForumCommentId, ForumPostId, UserId},
  schema::{forum_comment, forum_comment_vote},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reply to a post or to another comment. `parent_id == None` marks a root
/// comment; `depth` is always the parent's depth plus one.
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = forum_comment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ForumComment {
  pub id: ForumCommentId,
  pub post_id: ForumPostId,
  pub creator_id: UserId,
  pub parent_id: Option<ForumCommentId>,
  pub body: String,
  pub depth: i32,
  pub deleted: bool,
  pub edited: bool,
  pub published_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = forum_comment)]
pub struct ForumCommentInsertForm {
  pub post_id: ForumPostId,
  pub creator_id: UserId,
  pub parent_id: Option<ForumCommentId>,
  pub body: String,
  pub depth: i32,
}

#[derive(Debug, Clone, Default, diesel::AsChangeset)]
#[diesel(table_name = forum_comment)]
pub struct ForumCommentUpdateForm {
  pub body: Option<String>,
  pub deleted: Option<bool>,
  pub edited: Option<bool>,
  pub updated_at: Option<Option<DateTime<Utc>>>,
}

#[derive(Clone, PartialEq, Eq, Debug, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = forum_comment_vote)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ForumCommentVote {
  pub comment_id: ForumCommentId,
  pub user_id: UserId,
  pub upvote: bool,
  pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, diesel::Insertable, diesel::AsChangeset)]
#[diesel(table_name = forum_comment_vote)]
pub struct ForumCommentVoteForm {
  pub comment_id: ForumCommentId,
  pub user_id: UserId,
  pub upvote: bool,
}

impl ForumCommentVoteForm {
  pub fn new(comment_id: ForumCommentId, user_id: UserId, upvote: bool) -> Self {
    ForumCommentVoteForm {
      comment_id,
      user_id,
      upvote,
    }
  }
}
