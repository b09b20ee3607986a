use crate::structs::{ForumCommentNode, ForumCommentView};
use coolbills_db_schema::{
  newtypes::{ForumCommentId, ForumPostId, UserId},
  schema::{forum_comment, forum_comment_vote, users},
  source::forum_comment::ForumComment,
  utils::{get_conn, DbPool, DELETED_REPLACEMENT_TEXT},
};
use coolbills_utils::error::CoolbillsResult;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;
use std::collections::HashMap;

impl ForumCommentView {
  pub async fn read(
    pool: &mut DbPool<'_>,
    comment_id: ForumCommentId,
    my_user_id: Option<UserId>,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    let (mut comment, creator_name, creator_username) = forum_comment::table
      .inner_join(users::table)
      .filter(forum_comment::id.eq(comment_id))
      .select((ForumComment::as_select(), users::name, users::username))
      .first::<(ForumComment, String, Option<String>)>(&mut *conn)
      .await?;

    let votes = forum_comment_vote::table
      .filter(forum_comment_vote::comment_id.eq(comment_id))
      .select((forum_comment_vote::user_id, forum_comment_vote::upvote))
      .load::<(UserId, bool)>(&mut *conn)
      .await?;

    let upvotes = votes.iter().filter(|(_, up)| *up).count() as i64;
    let downvotes = votes.len() as i64 - upvotes;
    let my_vote = my_user_id
      .and_then(|me| votes.iter().find(|(voter, _)| *voter == me))
      .map(|(_, up)| *up);

    if comment.deleted {
      comment.body = DELETED_REPLACEMENT_TEXT.to_string();
    }
    Ok(ForumCommentView {
      comment,
      creator_name,
      creator_username,
      upvotes,
      downvotes,
      my_vote,
    })
  }

  /// Loads every comment on a post, oldest first, with vote totals attached.
  /// Deleted comments are kept but their body is replaced with a tombstone.
  pub async fn for_post(
    pool: &mut DbPool<'_>,
    post_id: ForumPostId,
    my_user_id: Option<UserId>,
  ) -> CoolbillsResult<Vec<Self>> {
    let mut conn = get_conn(pool).await?;
    let rows = forum_comment::table
      .inner_join(users::table)
      .filter(forum_comment::post_id.eq(post_id))
      .order_by(forum_comment::published_at.asc())
      .select((ForumComment::as_select(), users::name, users::username))
      .load::<(ForumComment, String, Option<String>)>(&mut *conn)
      .await?;

    let ids: Vec<ForumCommentId> = rows.iter().map(|(c, _, _)| c.id).collect();
    let votes = forum_comment_vote::table
      .filter(forum_comment_vote::comment_id.eq_any(&ids))
      .select((
        forum_comment_vote::comment_id,
        forum_comment_vote::user_id,
        forum_comment_vote::upvote,
      ))
      .load::<(ForumCommentId, UserId, bool)>(&mut *conn)
      .await?;

    let mut upvotes: HashMap<ForumCommentId, i64> = HashMap::new();
    let mut downvotes: HashMap<ForumCommentId, i64> = HashMap::new();
    let mut my_votes: HashMap<ForumCommentId, bool> = HashMap::new();
    for (comment_id, user_id, upvote) in votes {
      if upvote {
        *upvotes.entry(comment_id).or_default() += 1;
      } else {
        *downvotes.entry(comment_id).or_default() += 1;
      }
      if Some(user_id) == my_user_id {
        my_votes.insert(comment_id, upvote);
      }
    }

    Ok(
      rows
        .into_iter()
        .map(|(mut comment, creator_name, creator_username)| {
          if comment.deleted {
            comment.body = DELETED_REPLACEMENT_TEXT.to_string();
          }
          ForumCommentView {
            upvotes: upvotes.get(&comment.id).copied().unwrap_or_default(),
            downvotes: downvotes.get(&comment.id).copied().unwrap_or_default(),
            my_vote: my_votes.get(&comment.id).copied(),
            comment,
            creator_name,
            creator_username,
          }
        })
        .collect(),
    )
  }
}

/// Assembles a flat comment list into a reply tree in a single pass over the
/// input: group by parent, then stitch groups together starting from the
/// roots. Input order (oldest first) is preserved among siblings.
pub fn build_comment_tree(views: Vec<ForumCommentView>) -> Vec<ForumCommentNode> {
  let mut children_of: HashMap<Option<ForumCommentId>, Vec<ForumCommentView>> = HashMap::new();
  for view in views {
    children_of
      .entry(view.comment.parent_id)
      .or_default()
      .push(view);
  }
  attach(None, &mut children_of)
}

fn attach(
  parent: Option<ForumCommentId>,
  children_of: &mut HashMap<Option<ForumCommentId>, Vec<ForumCommentView>>,
) -> Vec<ForumCommentNode> {
  children_of
    .remove(&parent)
    .unwrap_or_default()
    .into_iter()
    .map(|view| ForumCommentNode {
      children: attach(Some(view.comment.id), children_of),
      view,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  #![allow(clippy::indexing_slicing)]
  use super::build_comment_tree;
  use crate::structs::ForumCommentView;
  use chrono::Utc;
  use coolbills_db_schema::{
    newtypes::{ForumCommentId, ForumPostId, UserId},
    source::forum_comment::ForumComment,
  };
  use pretty_assertions::assert_eq;

  fn view(id: i32, parent_id: Option<i32>, depth: i32) -> ForumCommentView {
    ForumCommentView {
      comment: ForumComment {
        id: ForumCommentId(id),
        post_id: ForumPostId(1),
        creator_id: UserId(1),
        parent_id: parent_id.map(ForumCommentId),
        body: format!("comment {id}"),
        depth,
        deleted: false,
        edited: false,
        published_at: Utc::now(),
        updated_at: None,
      },
      creator_name: "Jess".to_string(),
      creator_username: Some("jess".to_string()),
      upvotes: 0,
      downvotes: 0,
      my_vote: None,
    }
  }

  #[test]
  fn builds_nested_tree() {
    // 1
    // ├── 2
    // │   └── 4
    // └── 3
    // 5
    let tree = build_comment_tree(vec![
      view(1, None, 0),
      view(2, Some(1), 1),
      view(3, Some(1), 1),
      view(4, Some(2), 2),
      view(5, None, 0),
    ]);

    assert_eq!(2, tree.len());
    assert_eq!(ForumCommentId(1), tree[0].view.comment.id);
    assert_eq!(ForumCommentId(5), tree[1].view.comment.id);
    assert_eq!(2, tree[0].children.len());
    assert_eq!(ForumCommentId(2), tree[0].children[0].view.comment.id);
    assert_eq!(ForumCommentId(3), tree[0].children[1].view.comment.id);
    assert_eq!(
      ForumCommentId(4),
      tree[0].children[0].children[0].view.comment.id
    );
    assert!(tree[1].children.is_empty());
  }

  #[test]
  fn empty_input_builds_empty_tree() {
    assert!(build_comment_tree(vec![]).is_empty());
  }

  #[test]
  fn preserves_sibling_order() {
    let tree = build_comment_tree(vec![
      view(10, None, 0),
      view(11, None, 0),
      view(12, None, 0),
    ]);
    let ids: Vec<i32> = tree.iter().map(|n| n.view.comment.id.0).collect();
    assert_eq!(vec![10, 11, 12], ids);
  }
}
