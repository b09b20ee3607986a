use crate::{
  newtypes::UserId,
  schema::user_preference,
  source::user_preference::{UserPreference, UserPreferenceForm},
  utils::{get_conn, DbPool},
};
use chrono::Utc;
use coolbills_utils::error::CoolbillsResult;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;

impl UserPreference {
  /// Writing the same name twice overwrites the old value in place.
  pub async fn upsert(pool: &mut DbPool<'_>, form: &UserPreferenceForm) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(user_preference::table)
        .values(form)
        .on_conflict((user_preference::user_id, user_preference::name))
        .do_update()
        .set((
          user_preference::value.eq(&form.value),
          user_preference::updated_at.eq(Utc::now()),
        ))
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }

  pub async fn read(
    pool: &mut DbPool<'_>,
    user_id: UserId,
    name: &str,
  ) -> CoolbillsResult<Option<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      user_preference::table
        .filter(user_preference::user_id.eq(user_id))
        .filter(user_preference::name.eq(name))
        .first(&mut *conn)
        .await
        .optional()?,
    )
  }

  pub async fn list_for_user(pool: &mut DbPool<'_>, user_id: UserId) -> CoolbillsResult<Vec<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      user_preference::table
        .filter(user_preference::user_id.eq(user_id))
        .order_by(user_preference::name.asc())
        .load::<Self>(&mut *conn)
        .await?,
    )
  }

  pub async fn delete(pool: &mut DbPool<'_>, user_id: UserId, name: &str) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::delete(
        user_preference::table
          .filter(user_preference::user_id.eq(user_id))
          .filter(user_preference::name.eq(name)),
      )
      .execute(&mut *conn)
      .await?,
    )
  }
}
