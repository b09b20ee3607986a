use coolbills_db_schema::utils::DbPool;
use coolbills_db_views::structs::UserView;
use coolbills_utils::error::{CoolbillsErrorType, CoolbillsResult};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_BODY_LENGTH: usize = 10_000;
pub const MAX_COMMENT_DEPTH: i32 = 10;

#[allow(clippy::expect_used)]
static VALID_USERNAME_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{3,30}$").expect("compile username regex"));

#[allow(clippy::expect_used)]
static VALID_PREFERENCE_NAME_REGEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.-]{1,64}$").expect("compile preference name regex"));

/// Fails with a 403 naming the missing permission, so clients can show which
/// capability the action needed.
pub async fn require_permission(
  user_view: &UserView,
  pool: &mut DbPool<'_>,
  permission_name: &str,
) -> CoolbillsResult<()> {
  if user_view.user.has_permission(pool, permission_name).await? {
    Ok(())
  } else {
    Err(CoolbillsErrorType::MissingPermission(permission_name.to_string()).into())
  }
}

pub fn check_username(username: &str) -> CoolbillsResult<()> {
  if VALID_USERNAME_REGEX.is_match(username) {
    Ok(())
  } else {
    Err(CoolbillsErrorType::InvalidUsername.into())
  }
}

pub fn check_post_title(title: &str) -> CoolbillsResult<()> {
  let trimmed = title.trim();
  if trimmed.is_empty() || trimmed.len() > MAX_TITLE_LENGTH {
    Err(CoolbillsErrorType::InvalidPostTitle.into())
  } else {
    Ok(())
  }
}

pub fn check_body(body: &str) -> CoolbillsResult<()> {
  let trimmed = body.trim();
  if trimmed.is_empty() || trimmed.len() > MAX_BODY_LENGTH {
    Err(CoolbillsErrorType::InvalidBodyField.into())
  } else {
    Ok(())
  }
}

pub fn check_preference_name(name: &str) -> CoolbillsResult<()> {
  if VALID_PREFERENCE_NAME_REGEX.is_match(name) {
    Ok(())
  } else {
    Err(CoolbillsErrorType::InvalidPreferenceName.into())
  }
}

#[cfg(test)]
mod tests {
  use super::{check_body, check_post_title, check_preference_name, check_username};

  #[test]
  fn test_valid_usernames() {
    assert!(check_username("tina_r").is_ok());
    assert!(check_username("Ada99").is_ok());
    assert!(check_username("ab").is_err());
    assert!(check_username("has space").is_err());
    assert!(check_username("way_too_long_for_a_username_by_far").is_err());
    assert!(check_username("").is_err());
  }

  #[test]
  fn test_title_bounds() {
    assert!(check_post_title("Fix the pothole bill").is_ok());
    assert!(check_post_title("   ").is_err());
    assert!(check_post_title(&"x".repeat(201)).is_err());
  }

  #[test]
  fn test_body_bounds() {
    assert!(check_body("some text").is_ok());
    assert!(check_body("").is_err());
    assert!(check_body(&"x".repeat(10_001)).is_err());
  }

  #[test]
  fn test_preference_names() {
    assert!(check_preference_name("theme").is_ok());
    assert!(check_preference_name("email.digest-weekly").is_ok());
    assert!(check_preference_name("bad name").is_err());
    assert!(check_preference_name("").is_err());
  }
}
