use crate::{newtypes::PermissionId, schema::permission};
use serde::{Deserialize, Serialize};

/// A named capability, granted to users through their role.
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = permission)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Permission {
  pub id: PermissionId,
  pub name: String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, diesel::Insertable, diesel::AsChangeset)]
#[diesel(table_name = permission)]
pub struct PermissionForm {
  pub name: String,
  pub description: Option<String>,
}
