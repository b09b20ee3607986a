use crate::{
  newtypes::{RoleId, UserId},
  schema::{permission, role_permission, users},
  source::user::{User, UserInsertForm, UserUpdateForm},
  traits::Crud,
  utils::{get_conn, DbPool},
};
use chrono::Utc;
use coolbills_utils::error::{
  is_unique_violation,
  CoolbillsConflictExt,
  CoolbillsErrorType,
  CoolbillsResult,
};
use diesel::{dsl::exists, select, ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;

impl Crud for User {
  type InsertForm = UserInsertForm;
  type UpdateForm = UserUpdateForm;
  type IdType = UserId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(users::table)
        .values(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }

  async fn read(pool: &mut DbPool<'_>, user_id: UserId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(users::table.find(user_id).first(&mut *conn).await?)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    user_id: UserId,
    form: &Self::UpdateForm,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::update(users::table.find(user_id))
        .set(form)
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }
}

impl User {
  pub async fn read_by_email(pool: &mut DbPool<'_>, email: &str) -> CoolbillsResult<Option<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      users::table
        .filter(users::email.eq(email))
        .first(&mut *conn)
        .await
        .optional()?,
    )
  }

  /// Insert for a first sign-in. When two first logins with the same address
  /// race, the loser of the `users.email` unique index reads the winner's row
  /// instead of failing.
  pub async fn create_or_read_by_email(
    pool: &mut DbPool<'_>,
    form: &UserInsertForm,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    match diesel::insert_into(users::table)
      .values(form)
      .get_result::<Self>(&mut *conn)
      .await
    {
      Err(e) if is_unique_violation(&e) => Ok(
        users::table
          .filter(users::email.eq(&form.email))
          .first(&mut *conn)
          .await?,
      ),
      other => Ok(other?),
    }
  }

  /// Claims a username. A unique index on `users.username` arbitrates racing
  /// claims, so exactly one of two concurrent requests gets the name and the
  /// other receives a conflict.
  pub async fn set_username(
    pool: &mut DbPool<'_>,
    user_id: UserId,
    username: &str,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    diesel::update(users::table.find(user_id))
      .set((
        users::username.eq(username),
        users::updated_at.eq(Utc::now()),
      ))
      .get_result::<Self>(&mut *conn)
      .await
      .with_conflict_type(CoolbillsErrorType::UsernameAlreadyExists)
  }

  pub async fn set_role(
    pool: &mut DbPool<'_>,
    user_id: UserId,
    role_id: Option<RoleId>,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::update(users::table.find(user_id))
        .set((
          users::role_id.eq(role_id),
          users::updated_at.eq(Utc::now()),
        ))
        .get_result::<Self>(&mut *conn)
        .await?,
    )
  }

  /// A user with no role holds no permissions; the check short-circuits
  /// without touching the database.
  pub async fn has_permission(
    &self,
    pool: &mut DbPool<'_>,
    permission_name: &str,
  ) -> CoolbillsResult<bool> {
    let Some(role_id) = self.role_id else {
      return Ok(false);
    };
    let mut conn = get_conn(pool).await?;
    Ok(
      select(exists(
        role_permission::table
          .inner_join(permission::table)
          .filter(role_permission::role_id.eq(role_id))
          .filter(permission::name.eq(permission_name)),
      ))
      .get_result::<bool>(&mut *conn)
      .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used)]
  use super::*;
  use crate::utils::ActualDbPool;
  use diesel_async::{
    pooled_connection::{deadpool::Pool, AsyncDieselConnectionManager},
    AsyncPgConnection,
  };

  // Never connected; the role-less path must not reach for a connection.
  fn unconnected_pool() -> ActualDbPool {
    let manager =
      AsyncDieselConnectionManager::<AsyncPgConnection>::new("postgres://unused@localhost/unused");
    Pool::builder(manager).build().unwrap()
  }

  #[tokio::test]
  async fn test_no_role_means_no_permissions() {
    let actual = unconnected_pool();
    let mut pool = DbPool::Pool(&actual);
    let user = User {
      id: UserId(1),
      name: "Pat".to_string(),
      username: None,
      email: "pat@example.com".to_string(),
      state: None,
      district: None,
      role_id: None,
      published_at: Utc::now(),
      updated_at: None,
    };

    assert!(!user.has_permission(&mut pool, "Manage Roles").await.unwrap());
  }
}
