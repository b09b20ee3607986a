use crate::{
  newtypes::{PermissionId, RoleId},
  schema::{role, role_permission},
};
use serde::{Deserialize, Serialize};

/// A named permission bundle. Each user holds at most one role.
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = role)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Role {
  pub id: RoleId,
  pub name: String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, diesel::Insertable, diesel::AsChangeset)]
#[diesel(table_name = role)]
pub struct RoleForm {
  pub name: String,
  pub description: Option<String>,
}

/// Join row associating one role with one permission. The composite primary
/// key makes duplicate associations impossible.
#[derive(Clone, PartialEq, Eq, Debug, diesel::Queryable, diesel::Selectable)]
#[diesel(table_name = role_permission)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RolePermission {
  pub role_id: RoleId,
  pub permission_id: PermissionId,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = role_permission)]
pub struct RolePermissionForm {
  pub role_id: RoleId,
  pub permission_id: PermissionId,
}
