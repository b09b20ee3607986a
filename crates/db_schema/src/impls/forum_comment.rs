use crate::{
  newtypes::{ForumCommentId, UserId},
  schema::{forum_comment, forum_comment_vote},
  source::forum_comment::{
    ForumComment,
    ForumCommentInsertForm,
    ForumCommentUpdateForm,
    ForumCommentVote,
    ForumCommentVoteForm,
  },
  traits::{Crud, Voteable},
  utils::{get_conn, DbPool},
};
use coolbills_utils::error::CoolbillsResult;
use diesel::{ExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;

impl Crud for ForumComment {
  type InsertForm = ForumCommentInsertForm;
  type UpdateForm = ForumCommentUpdateForm;
  type IdType = ForumCommentId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(forum_comment::table)
        .values(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }

  async fn read(pool: &mut DbPool<'_>, comment_id: ForumCommentId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      forum_comment::table
        .find(comment_id)
        .first(&mut *conn)
        .await?,
    )
  }

  async fn update(
    pool: &mut DbPool<'_>,
    comment_id: ForumCommentId,
    form: &Self::UpdateForm,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::update(forum_comment::table.find(comment_id))
        .set(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }
}

impl Voteable for ForumCommentVote {
  type Form = ForumCommentVoteForm;
  type IdType = ForumCommentId;

  async fn vote(pool: &mut DbPool<'_>, form: &Self::Form) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(forum_comment_vote::table)
        .values(form)
        .on_conflict((
          forum_comment_vote::comment_id,
          forum_comment_vote::user_id,
        ))
        .do_update()
        .set(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }

  async fn remove_vote(
    pool: &mut DbPool<'_>,
    user_id: UserId,
    comment_id: ForumCommentId,
    upvote: bool,
  ) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::delete(
        forum_comment_vote::table
          .filter(forum_comment_vote::comment_id.eq(comment_id))
          .filter(forum_comment_vote::user_id.eq(user_id))
          .filter(forum_comment_vote::upvote.eq(upvote)),
      )
      .execute(&mut *conn)
      .await?,
    )
  }
}

impl ForumCommentVote {
  pub async fn counts(
    pool: &mut DbPool<'_>,
    comment_id: ForumCommentId,
  ) -> CoolbillsResult<(i64, i64)> {
    let mut conn = get_conn(pool).await?;
    let upvotes = forum_comment_vote::table
      .filter(forum_comment_vote::comment_id.eq(comment_id))
      .filter(forum_comment_vote::upvote.eq(true))
      .count()
      .get_result::<i64>(&mut *conn)
      .await?;
    let downvotes = forum_comment_vote::table
      .filter(forum_comment_vote::comment_id.eq(comment_id))
      .filter(forum_comment_vote::upvote.eq(false))
      .count()
      .get_result::<i64>(&mut *conn)
      .await?;
    Ok((upvotes, downvotes))
  }
}
