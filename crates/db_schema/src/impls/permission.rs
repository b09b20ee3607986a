use crate::{
  newtypes::PermissionId,
  schema::permission,
  source::permission::{Permission, PermissionForm},
  traits::Crud,
  utils::{get_conn, DbPool},
};
use coolbills_utils::error::{CoolbillsConflictExt, CoolbillsErrorType, CoolbillsResult};
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl};
use diesel_async::RunQueryDsl;

impl Crud for Permission {
  type InsertForm = PermissionForm;
  type UpdateForm = PermissionForm;
  type IdType = PermissionId;

  async fn create(pool: &mut DbPool<'_>, form: &Self::InsertForm) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    diesel::insert_into(permission::table)
      .values(form)
      .get_result::<Self>(&mut *conn)
      .await
      .with_conflict_type(CoolbillsErrorType::PermissionAlreadyExists)
  }

  async fn read(pool: &mut DbPool<'_>, permission_id: PermissionId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    Ok(
      permission::table
        .find(permission_id)
        .first(&mut *conn)
        .await?,
    )
  }

  async fn update(
    pool: &mut DbPool<'_>,
    permission_id: PermissionId,
    form: &Self::UpdateForm,
  ) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    diesel::update(permission::table.find(permission_id))
      .set(form)
      .get_result::<Self>(&mut *conn)
      .await
      .with_conflict_type(CoolbillsErrorType::PermissionAlreadyExists)
  }
}

impl Permission {
  pub async fn read_by_name(pool: &mut DbPool<'_>, name: &str) -> CoolbillsResult<Option<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      permission::table
        .filter(permission::name.eq(name))
        .first(&mut *conn)
        .await
        .optional()?,
    )
  }

  pub async fn list(pool: &mut DbPool<'_>) -> CoolbillsResult<Vec<Self>> {
    let mut conn = get_conn(pool).await?;
    Ok(
      permission::table
        .order_by(permission::name.asc())
        .load::<Self>(&mut *conn)
        .await?,
    )
  }
}
