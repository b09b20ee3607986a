use crate::{
  newtypes::{RoleId, UserId},
  schema::users,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A site user. Created on first sign-in.
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
  pub id: UserId,
  pub name: String,
  /// Public handle, chosen by the user after sign-up. Unique when set.
  pub username: Option<String>,
  pub email: String,
  /// Two letter state code used for district matching.
  pub state: Option<String>,
  pub district: Option<String>,
  /// `None` means no role assigned, which is a valid state carrying no
  /// permissions.
  pub role_id: Option<RoleId>,
  pub published_at: DateTime<Utc>,
  pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, diesel::Insertable)]
#[diesel(table_name = users)]
pub struct UserInsertForm {
  pub name: String,
  pub email: String,
  pub username: Option<String>,
  pub state: Option<String>,
  pub district: Option<String>,
  pub role_id: Option<RoleId>,
}

impl UserInsertForm {
  pub fn new(name: &str, email: &str) -> Self {
    UserInsertForm {
      name: name.to_string(),
      email: email.to_string(),
      username: None,
      state: None,
      district: None,
      role_id: None,
    }
  }
}

#[derive(Debug, Clone, Default, diesel::AsChangeset)]
#[diesel(table_name = users)]
pub struct UserUpdateForm {
  pub name: Option<String>,
  pub username: Option<Option<String>>,
  pub state: Option<Option<String>>,
  pub district: Option<Option<String>>,
  pub role_id: Option<Option<RoleId>>,
  pub updated_at: Option<Option<DateTime<Utc>>>,
}
