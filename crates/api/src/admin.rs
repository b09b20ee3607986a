use actix_web::web::{Data, Json, Path};
use coolbills_api_common::{
  admin::{
    AssignUserRole,
    CreatePermission,
    CreateRole,
    ListPermissionsResponse,
    ListRolesResponse,
    PermissionResponse,
    RoleResponse,
    UpdateRolePermission,
    UserResponse,
  },
  context::CoolbillsContext,
  utils::require_permission,
};
use coolbills_db_schema::{
  newtypes::RoleId,
  source::{
    permission::{Permission, PermissionForm},
    role::{Role, RoleForm, RolePermission, RolePermissionForm},
    user::User,
  },
  traits::Crud,
};
use coolbills_db_views::structs::{RoleView, UserView};
use coolbills_utils::error::{CoolbillsErrorType, CoolbillsResult};

pub const MANAGE_ROLES: &str = "Manage Roles";
pub const UPDATE_USER_ROLE: &str = "Update User Role";
pub const MODERATE_FORUM: &str = "Moderate Forum";

/// The name pre-check gives a friendly conflict on the common path; the
/// unique index on `role.name` settles concurrent creates.
#[tracing::instrument(skip(context))]
pub async fn create_role(
  data: Json<CreateRole>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<RoleResponse>> {
  require_permission(&user_view, &mut context.pool(), MANAGE_ROLES).await?;

  if Role::read_by_name(&mut context.pool(), &data.name)
    .await?
    .is_some()
  {
    Err(CoolbillsErrorType::RoleAlreadyExists)?
  }

  let form = RoleForm {
    name: data.name.clone(),
    description: data.description.clone(),
  };
  let role = Role::create(&mut context.pool(), &form).await?;
  let role_view = RoleView::read(&mut context.pool(), role.id).await?;

  Ok(Json(RoleResponse { role_view }))
}

#[tracing::instrument(skip(context))]
pub async fn create_permission(
  data: Json<CreatePermission>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<PermissionResponse>> {
  require_permission(&user_view, &mut context.pool(), MANAGE_ROLES).await?;

  if Permission::read_by_name(&mut context.pool(), &data.name)
    .await?
    .is_some()
  {
    Err(CoolbillsErrorType::PermissionAlreadyExists)?
  }

  let form = PermissionForm {
    name: data.name.clone(),
    description: data.description.clone(),
  };
  let permission = Permission::create(&mut context.pool(), &form).await?;

  Ok(Json(PermissionResponse { permission }))
}

/// Grants or revokes a permission on a role. Both directions are idempotent.
#[tracing::instrument(skip(context))]
pub async fn update_role_permission(
  data: Json<UpdateRolePermission>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<RoleResponse>> {
  require_permission(&user_view, &mut context.pool(), MANAGE_ROLES).await?;

  // 404 for dangling ids before touching the join table
  Role::read(&mut context.pool(), data.role_id).await?;
  Permission::read(&mut context.pool(), data.permission_id).await?;

  let form = RolePermissionForm {
    role_id: data.role_id,
    permission_id: data.permission_id,
  };
  if data.granted {
    RolePermission::assign(&mut context.pool(), &form).await?;
  } else {
    RolePermission::unassign(&mut context.pool(), &form).await?;
  }
  let role_view = RoleView::read(&mut context.pool(), data.role_id).await?;

  Ok(Json(RoleResponse { role_view }))
}

#[tracing::instrument(skip(context))]
pub async fn assign_user_role(
  data: Json<AssignUserRole>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<UserResponse>> {
  require_permission(&user_view, &mut context.pool(), UPDATE_USER_ROLE).await?;

  if let Some(role_id) = data.role_id {
    Role::read(&mut context.pool(), role_id).await?;
  }
  User::read(&mut context.pool(), data.user_id).await?;
  let user = User::set_role(&mut context.pool(), data.user_id, data.role_id).await?;

  Ok(Json(UserResponse { user }))
}

#[tracing::instrument(skip(context))]
pub async fn get_role(
  role_id: Path<RoleId>,
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<RoleResponse>> {
  require_permission(&user_view, &mut context.pool(), MANAGE_ROLES).await?;
  let role_view = RoleView::read(&mut context.pool(), *role_id).await?;
  Ok(Json(RoleResponse { role_view }))
}

#[tracing::instrument(skip(context))]
pub async fn list_roles(
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<ListRolesResponse>> {
  require_permission(&user_view, &mut context.pool(), MANAGE_ROLES).await?;
  let roles = RoleView::list_all(&mut context.pool()).await?;
  Ok(Json(ListRolesResponse { roles }))
}

#[tracing::instrument(skip(context))]
pub async fn list_permissions(
  context: Data<CoolbillsContext>,
  user_view: UserView,
) -> CoolbillsResult<Json<ListPermissionsResponse>> {
  require_permission(&user_view, &mut context.pool(), MANAGE_ROLES).await?;
  let permissions = Permission::list(&mut context.pool()).await?;
  Ok(Json(ListPermissionsResponse { permissions }))
}
