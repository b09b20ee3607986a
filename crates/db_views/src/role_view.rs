use crate::structs::RoleView;
use coolbills_db_schema::{
  newtypes::RoleId,
  schema::{permission, role, role_permission},
  source::{permission::Permission, role::Role},
  utils::{get_conn, DbPool},
};
use coolbills_utils::error::CoolbillsResult;
use diesel::{ExpressionMethods, QueryDsl, SelectableHelper};
use diesel_async::RunQueryDsl;

impl RoleView {
  pub async fn read(pool: &mut DbPool<'_>, role_id: RoleId) -> CoolbillsResult<Self> {
    let mut conn = get_conn(pool).await?;
    let role = role::table.find(role_id).first::<Role>(&mut *conn).await?;
    let permissions = role_permission::table
      .inner_join(permission::table)
      .filter(role_permission::role_id.eq(role_id))
      .select(Permission::as_select())
      .order_by(permission::name.asc())
      .load::<Permission>(&mut *conn)
      .await?;
    Ok(RoleView { role, permissions })
  }

  pub async fn list_all(pool: &mut DbPool<'_>) -> CoolbillsResult<Vec<Self>> {
    let mut conn = get_conn(pool).await?;
    let roles = role::table
      .order_by(role::name.asc())
      .load::<Role>(&mut *conn)
      .await?;
    let grants = role_permission::table
      .inner_join(permission::table)
      .order_by(permission::name.asc())
      .select((role_permission::role_id, Permission::as_select()))
      .load::<(RoleId, Permission)>(&mut *conn)
      .await?;
    Ok(
      roles
        .into_iter()
        .map(|role| {
          let permissions = grants
            .iter()
            .filter(|(role_id, _)| *role_id == role.id)
            .map(|(_, p)| p.clone())
            .collect();
          RoleView { role, permissions }
        })
        .collect(),
    )
  }
}
