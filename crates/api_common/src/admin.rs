use coolbills_db_schema::{
  newtypes::{PermissionId, RoleId, UserId},
  source::{permission::Permission, user::User},
};
use coolbills_db_views::structs::RoleView;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateRole {
  pub name: String,
  pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreatePermission {
  pub name: String,
  pub description: Option<String>,
}

/// Grants or revokes one permission on one role. Granting an already granted
/// permission is a no-op.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UpdateRolePermission {
  pub role_id: RoleId,
  pub permission_id: PermissionId,
  pub granted: bool,
}

/// `role_id: None` strips the user's role.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssignUserRole {
  pub user_id: UserId,
  pub role_id: Option<RoleId>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoleResponse {
  pub role_view: RoleView,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListRolesResponse {
  pub roles: Vec<RoleView>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PermissionResponse {
  pub permission: Permission,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListPermissionsResponse {
  pub permissions: Vec<Permission>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserResponse {
  pub user: User,
}
