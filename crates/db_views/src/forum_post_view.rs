use crate::structs::ForumPostView;
use coolbills_db_schema::{
  newtypes::{ForumPostId, UserId},
  schema::{forum_comment, forum_post, forum_post_bookmark, forum_post_vote, users},
  source::forum_post::ForumPost,
  utils::{get_conn, limit_and_offset, DbPool},
};
use coolbills_utils::error::{CoolbillsErrorType, CoolbillsResult};
use diesel::{dsl::count, ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use std::collections::{HashMap, HashSet};

impl ForumPostView {
  pub async fn read(
    pool: &mut DbPool<'_>,
    post_id: ForumPostId,
    my_user_id: Option<UserId>,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    let row = forum_post::table
      .inner_join(users::table)
      .filter(forum_post::id.eq(post_id))
      .filter(forum_post::deleted.eq(false))
      .select((ForumPost::as_select(), users::name, users::username))
      .first::<(ForumPost, String, Option<String>)>(&mut *conn)
      .await?;
    assemble(&mut conn, vec![row], my_user_id)
      .await?
      .pop()
      .ok_or_else(|| CoolbillsErrorType::NotFound.into())
  }
}

#[derive(Default)]
pub struct ForumPostQuery {
  pub page: Option<i64>,
  pub limit: Option<i64>,
  pub my_user_id: Option<UserId>,
}

impl ForumPostQuery {
  /// Pinned posts sort above everything else, newest first within each group.
  /// Soft-deleted posts never appear in listings.
  pub async fn list(self, pool: &mut DbPool<'_>) -> CoolbillsResult<Vec<ForumPostView>> {
    let (limit, offset) = limit_and_offset(self.page, self.limit)?;
    let mut conn = get_conn(pool).await?;
    let rows = forum_post::table
      .inner_join(users::table)
      .filter(forum_post::deleted.eq(false))
      .order_by(forum_post::pinned.desc())
      .then_order_by(forum_post::published_at.desc())
      .limit(limit)
      .offset(offset)
      .select((ForumPost::as_select(), users::name, users::username))
      .load::<(ForumPost, String, Option<String>)>(&mut *conn)
      .await?;
    assemble(&mut conn, rows, self.my_user_id).await
  }
}

/// Batch-loads votes, bookmarks and comment counts for a page of posts, so
/// listing stays at a fixed number of queries regardless of page size.
async fn assemble(
  conn: &mut AsyncPgConnection,
  rows: Vec<(ForumPost, String, Option<String>)>,
  my_user_id: Option<UserId>,
) -> CoolbillsResult<Vec<ForumPostView>> {
  let ids: Vec<ForumPostId> = rows.iter().map(|(p, _, _)| p.id).collect();

  let votes = forum_post_vote::table
    .filter(forum_post_vote::post_id.eq_any(&ids))
    .select((
      forum_post_vote::post_id,
      forum_post_vote::user_id,
      forum_post_vote::upvote,
    ))
    .load::<(ForumPostId, UserId, bool)>(conn)
    .await?;

  let comment_counts: HashMap<ForumPostId, i64> = forum_comment::table
    .filter(forum_comment::post_id.eq_any(&ids))
    .group_by(forum_comment::post_id)
    .select((forum_comment::post_id, count(forum_comment::id)))
    .load::<(ForumPostId, i64)>(conn)
    .await?
    .into_iter()
    .collect();

  let bookmarked: HashSet<ForumPostId> = match my_user_id {
    Some(me) => forum_post_bookmark::table
      .filter(forum_post_bookmark::post_id.eq_any(&ids))
      .filter(forum_post_bookmark::user_id.eq(me))
      .select(forum_post_bookmark::post_id)
      .load::<ForumPostId>(conn)
      .await?
      .into_iter()
      .collect(),
    None => HashSet::new(),
  };

  let mut upvotes: HashMap<ForumPostId, i64> = HashMap::new();
  let mut downvotes: HashMap<ForumPostId, i64> = HashMap::new();
  let mut my_votes: HashMap<ForumPostId, bool> = HashMap::new();
  for (post_id, user_id, upvote) in votes {
    if upvote {
      *upvotes.entry(post_id).or_default() += 1;
    } else {
      *downvotes.entry(post_id).or_default() += 1;
    }
    if Some(user_id) == my_user_id {
      my_votes.insert(post_id, upvote);
    }
  }

  Ok(
    rows
      .into_iter()
      .map(|(post, creator_name, creator_username)| {
        let up = upvotes.get(&post.id).copied().unwrap_or_default();
        let down = downvotes.get(&post.id).copied().unwrap_or_default();
        ForumPostView {
          my_vote: my_votes.get(&post.id).copied(),
          bookmarked: bookmarked.contains(&post.id),
          comment_count: comment_counts.get(&post.id).copied().unwrap_or_default(),
          upvotes: up,
          downvotes: down,
          net_votes: up - down,
          creator_name,
          creator_username,
          post,
        }
      })
      .collect(),
  )
}
