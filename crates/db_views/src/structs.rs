use coolbills_db_schema::source::{
  forum_comment::ForumComment,
  forum_post::ForumPost,
  legislation::{Bill, CongressMember, MemberVote, RollCall},
  permission::Permission,
  role::Role,
  user::User,
};
use serde::{Deserialize, Serialize};

/// The authenticated user together with their role, loaded once per request
/// by the session middleware and handed to handlers through extensions.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserView {
  pub user: User,
  pub role: Option<Role>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoleView {
  pub role: Role,
  pub permissions: Vec<Permission>,
}

/// A forum post with its vote totals and the viewer's own relation to it.
/// `my_vote` is `Some(true)` for an upvote, `Some(false)` for a downvote and
/// `None` when the viewer hasn't voted or isn't logged in.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForumPostView {
  pub post: ForumPost,
  pub creator_name: String,
  pub creator_username: Option<String>,
  pub upvotes: i64,
  pub downvotes: i64,
  pub net_votes: i64,
  pub comment_count: i64,
  pub my_vote: Option<bool>,
  pub bookmarked: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForumCommentView {
  pub comment: ForumComment,
  pub creator_name: String,
  pub creator_username: Option<String>,
  pub upvotes: i64,
  pub downvotes: i64,
  pub my_vote: Option<bool>,
}

/// One node of the reply tree. Deleted comments keep their place with a
/// tombstone body so descendants stay reachable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForumCommentNode {
  #[serde(flatten)]
  pub view: ForumCommentView,
  pub children: Vec<ForumCommentNode>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BillView {
  pub bill: Bill,
  pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BillSearchResults {
  pub results: Vec<BillView>,
  pub total: i64,
  pub total_pages: i64,
}

/// One legislator's position on one roll call, joined out to the member and
/// the bill the vote was held on.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MemberVoteView {
  pub vote: MemberVote,
  pub member: CongressMember,
  pub roll_call: RollCall,
  pub bill: Bill,
  pub favorite: bool,
}
