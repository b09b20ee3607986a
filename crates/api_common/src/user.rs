use coolbills_db_schema::source::{user::User, user_preference::UserPreference};
use serde::{Deserialize, Serialize};

/// Sign-in by email. The account is created on first sight; in production an
/// upstream identity provider has already vouched for the address.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Login {
  pub email: String,
  pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoginResponse {
  pub jwt: String,
  pub user: User,
  /// False until the user has picked a username.
  pub registered: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SetUsername {
  pub username: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SetPreference {
  pub name: String,
  pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeletePreference {
  pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreferencesResponse {
  pub preferences: Vec<UserPreference>,
}
