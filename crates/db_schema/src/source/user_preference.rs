use crate::{
  newtypes::{UserId, UserPreferenceId},
  schema::user_preference,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Arbitrary key/value pair scoped to a user, unique on (user_id, name).
#[derive(
  Clone, PartialEq, Eq, Debug, Serialize, Deserialize, diesel::Queryable, diesel::Selectable,
  diesel::Identifiable,
)]
#[diesel(table_name = user_preference)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserPreference {
  pub id: UserPreferenceId,
  pub user_id: UserId,
  pub name: String,
  pub value: String,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, diesel::Insertable, diesel::AsChangeset)]
#[diesel(table_name = user_preference)]
pub struct UserPreferenceForm {
  pub user_id: UserId,
  pub name: String,
  pub value: String,
}
