use coolbills_db_schema::{
  enums::PostType,
  newtypes::{ForumCommentId, ForumPostId},
};
use coolbills_db_views::structs::{ForumCommentNode, ForumCommentView, ForumPostView};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The four client-facing vote actions. Request bodies carry them as a plain
/// string so an unknown value can be rejected with a typed error instead of
/// a generic deserialization failure.
#[derive(
  EnumString, Display, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VoteActionType {
  Upvote,
  Downvote,
  RemoveUpvote,
  RemoveDownvote,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreatePost {
  pub title: String,
  pub body: String,
  #[serde(default)]
  pub post_type: PostType,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeletePost {
  pub post_id: ForumPostId,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LockPost {
  pub post_id: ForumPostId,
  pub locked: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PinPost {
  pub post_id: ForumPostId,
  pub pinned: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BookmarkPost {
  pub post_id: ForumPostId,
  pub bookmarked: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostVote {
  pub post_id: ForumPostId,
  #[serde(rename = "type")]
  pub type_: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommentVote {
  pub comment_id: ForumCommentId,
  #[serde(rename = "type")]
  pub type_: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateComment {
  pub post_id: ForumPostId,
  pub parent_id: Option<ForumCommentId>,
  pub body: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditComment {
  pub comment_id: ForumCommentId,
  pub body: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeleteComment {
  pub comment_id: ForumCommentId,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ListPosts {
  pub page: Option<i64>,
  pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PostResponse {
  pub post_view: ForumPostView,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListPostsResponse {
  pub posts: Vec<ForumPostView>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GetPostResponse {
  pub post_view: ForumPostView,
  pub comments: Vec<ForumCommentNode>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommentResponse {
  pub comment_view: ForumCommentView,
}

/// Vote endpoints always answer with the recount so clients never have to
/// guess at the new totals.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoteResponse {
  pub success: bool,
  pub upvotes: i64,
  pub downvotes: i64,
  pub net_votes: i64,
  pub action: VoteActionType,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SuccessResponse {
  pub success: bool,
}

#[cfg(test)]
mod tests {
  use super::VoteActionType;
  use pretty_assertions::assert_eq;
  use std::str::FromStr;

  #[test]
  fn parses_kebab_case_actions() {
    assert_eq!(
      Ok(VoteActionType::RemoveUpvote),
      VoteActionType::from_str("remove-upvote")
    );
    assert_eq!(Ok(VoteActionType::Downvote), VoteActionType::from_str("downvote"));
    assert!(VoteActionType::from_str("sideways").is_err());
  }

  #[test]
  fn serializes_kebab_case() {
    assert_eq!(
      "\"remove-downvote\"",
      serde_json::to_string(&VoteActionType::RemoveDownvote).unwrap_or_default()
    );
  }
}
