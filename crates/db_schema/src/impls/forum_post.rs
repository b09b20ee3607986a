use crate::{
  newtypes::{ForumPostId, UserId},
  schema::{forum_post, forum_post_bookmark, forum_post_vote},
  source::forum_post::{
    ForumPost,
    ForumPostBookmark,
    ForumPostBookmarkForm,
    ForumPostInsertForm,
    ForumPostUpdateForm,
    ForumPostVote,
    ForumPostVoteForm,
  },
  traits::{Crud, Voteable},
  utils::{get_conn, DbPool},
};
use coolbills_utils::error::CoolbillsResult;
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

impl Crud for ForumPost {
  type InsertForm = ForumPostInsertForm;
  type UpdateForm = ForumPostUpdateForm;
  type IdType = ForumPostId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(forum_post::table)
        .values(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }

  async fn read(pool: &mut DbPool<'_>, post_id: ForumPostId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(forum_post::table.find(post_id).first(&mut *conn).await?)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    post_id: ForumPostId,
    form: &Self::UpdateForm,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::update(forum_post::table.find(post_id))
        .set(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }
}

impl ForumPost {
  /// Bumps the view counter in the database rather than read-modify-write, so
  /// concurrent reads don't lose increments.
  pub async fn increment_views(pool: &mut DbPool<'_>, post_id: ForumPostId) -> CoolbillsResult<()> {
    let mut conn = get_conn(pool).await?;
    diesel::update(forum_post::table.find(post_id))
      .set(forum_post::views.eq(forum_post::views + 1))
      .execute(&mut *conn)
      .await?;
    Ok(())
  }
}

impl Voteable for ForumPostVote {
  type Form = ForumPostVoteForm;
  type IdType = ForumPostId;

  async fn vote(pool: &mut DbPool<'_>, form: &Self::Form) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(forum_post_vote::table)
        .values(form)
        .on_conflict((forum_post_vote::post_id, forum_post_vote::user_id))
        .do_update()
        .set(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }

  async fn remove_vote(
    pool: &mut DbPool<'_>,
    user_id: UserId,
    post_id: ForumPostId,
    upvote: bool,
  ) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::delete(
        forum_post_vote::table
          .filter(forum_post_vote::post_id.eq(post_id))
          .filter(forum_post_vote::user_id.eq(user_id))
          .filter(forum_post_vote::upvote.eq(upvote)),
      )
      .execute(&mut *conn)
      .await?,
    )
  }
}

impl ForumPostVote {
  pub async fn counts(pool: &mut DbPool<'_>, post_id: ForumPostId) -> CoolbillsResult<(i64, i64)> {
    let mut conn = get_conn(pool).await?;
    let upvotes = forum_post_vote::table
      .filter(forum_post_vote::post_id.eq(post_id))
      .filter(forum_post_vote::upvote.eq(true))
      .count()
      .get_result::<i64>(&mut *conn)
      .await?;
    let downvotes = forum_post_vote::table
      .filter(forum_post_vote::post_id.eq(post_id))
      .filter(forum_post_vote::upvote.eq(false))
      .count()
      .get_result::<i64>(&mut *conn)
      .await?;
    Ok((upvotes, downvotes))
  }
}

impl ForumPostBookmark {
  pub async fn create(pool: &mut DbPool<'_>, form: &ForumPostBookmarkForm) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(forum_post_bookmark::table)
        .values(form)
        .on_conflict_do_nothing()
        .execute(&mut *conn)
        .await?,
    )
  }

  pub async fn delete(pool: &mut DbPool<'_>, form: &ForumPostBookmarkForm) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::delete(
        forum_post_bookmark::table
          .filter(forum_post_bookmark::post_id.eq(form.post_id))
          .filter(forum_post_bookmark::user_id.eq(form.user_id)),
      )
      .execute(&mut *conn)
      .await?,
    )
  }
}
