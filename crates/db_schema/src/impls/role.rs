use crate::{
  newtypes::RoleId,
  schema::{role, role_permission},
  source::role::{Role, RoleForm, RolePermission, RolePermissionForm},
  traits::Crud,
  utils::{get_conn, DbPool},
};
use coolbills_utils::error::{CoolbillsConflictExt, CoolbillsErrorType, CoolbillsResult};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;

impl Crud for Role {
  type InsertForm = RoleForm;
  type UpdateForm = RoleForm;
  type IdType = RoleId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    diesel::insert_into(role::table)
      .values(form)
      .get_result::<Self>(&mut *conn)
      .await
      .with_conflict_type(CoolbillsErrorType::RoleAlreadyExists)
  }

  async fn read(pool: &mut DbPool<'_>, role_id: RoleId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(role::table.find(role_id).first(&mut *conn).await?)
  }

  async fn update(
    pool: &mut DbPool<'_>,
    role_id: RoleId,
    form: &Self::UpdateForm,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    diesel::update(role::table.find(role_id))
      .set(form)
      .get_result::<Self>(&mut *conn)
      .await
      .with_conflict_type(CoolbillsErrorType::RoleAlreadyExists)
  }
}

impl Role {
  pub async fn read_by_name(pool: &mut DbPool<'_>, name: &str) -> CoolbillsResult<Option<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      role::table
        .filter(role::name.eq(name))
        .first(&mut *conn)
        .await
        .optional()?,
    )
  }

  pub async fn list(pool: &mut DbPool<'_>) -> CoolbillsResult<Vec<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      role::table
        .order_by(role::name.asc())
        .load::<Self>(&mut *conn)
        .await?,
    )
  }
}

impl RolePermission {
  /// Idempotent: re-assigning an already held permission is a no-op rather
  /// than an error, the composite primary key absorbs the duplicate.
  pub async fn assign(pool: &mut DbPool<'_>, form: &RolePermissionForm) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::insert_into(role_permission::table)
        .values(form)
        .on_conflict_do_nothing()
        .execute(&mut *conn)
        .await?,
    )
  }

  pub async fn unassign(pool: &mut DbPool<'_>, form: &RolePermissionForm) -> CoolbillsResult<usize> {
    let mut conn = get_conn(pool).await?;
    Ok(
      diesel::delete(
        role_permission::table
          .filter(role_permission::role_id.eq(form.role_id))
          .filter(role_permission::permission_id.eq(form.permission_id)),
      )
      .execute(&mut *conn)
      .await?,
    )
  }
}
