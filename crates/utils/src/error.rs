use serde::{Deserialize, Serialize};
use std::{backtrace::Backtrace, fmt, fmt::Debug};
use strum::{Display, EnumIter};

pub type CoolbillsResult<T> = Result<T, CoolbillsError>;

/// Every failure the API distinguishes for clients. The serialized form is
/// `{"error": "...", "message": "..."}` so clients can switch on the kind
/// instead of parsing prose.
#[derive(Display, Debug, Serialize, Deserialize, Clone, PartialEq, Eq, EnumIter, Hash)]
#[serde(tag = "error", content = "message", rename_all = "snake_case")]
#[non_exhaustive]
pub enum CoolbillsErrorType {
  NotLoggedIn,
  IncorrectLogin,
  MissingPermission(String),
  CantVoteOnOwn,
  Locked,
  NoCommentEditAllowed,
  NotFound,
  RateLimited,
  UsernameAlreadyExists,
  RoleAlreadyExists,
  PermissionAlreadyExists,
  InvalidUsername,
  InvalidVoteType,
  InvalidVotePosition,
  InvalidPostTitle,
  InvalidBodyField,
  InvalidPreferenceName,
  MaxCommentDepthReached,
  CommentParentMismatch,
  CouldntCreate,
  CouldntUpdate,
  Unknown(String),
}

pub struct CoolbillsError {
  pub error_type: CoolbillsErrorType,
  pub inner: anyhow::Error,
  pub context: Backtrace,
}

impl<T> From<T> for CoolbillsError
where
  T: Into<anyhow::Error>,
{
  fn from(t: T) -> Self {
    let cause = t.into();
    let error_type = match cause.downcast_ref::<diesel::result::Error>() {
      Some(&diesel::NotFound) => CoolbillsErrorType::NotFound,
      _ => CoolbillsErrorType::Unknown(format!("{}", &cause)),
    };
    CoolbillsError {
      error_type,
      inner: cause,
      context: Backtrace::capture(),
    }
  }
}

impl Debug for CoolbillsError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CoolbillsError")
      .field("message", &self.error_type)
      .field("inner", &self.inner)
      .field("context", &self.context)
      .finish()
  }
}

impl fmt::Display for CoolbillsError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{}", self.inner)?;
    fmt::Display::fmt(&self.context, f)
  }
}

impl actix_web::error::ResponseError for CoolbillsError {
  fn status_code(&self) -> actix_web::http::StatusCode {
    use actix_web::http::StatusCode;
    match self.error_type {
      CoolbillsErrorType::NotLoggedIn | CoolbillsErrorType::IncorrectLogin => {
        StatusCode::UNAUTHORIZED
      }
      CoolbillsErrorType::MissingPermission(_)
      | CoolbillsErrorType::CantVoteOnOwn
      | CoolbillsErrorType::Locked
      | CoolbillsErrorType::NoCommentEditAllowed => StatusCode::FORBIDDEN,
      CoolbillsErrorType::NotFound => StatusCode::NOT_FOUND,
      CoolbillsErrorType::UsernameAlreadyExists
      | CoolbillsErrorType::RoleAlreadyExists
      | CoolbillsErrorType::PermissionAlreadyExists => StatusCode::CONFLICT,
      CoolbillsErrorType::RateLimited => StatusCode::TOO_MANY_REQUESTS,
      CoolbillsErrorType::CouldntCreate
      | CoolbillsErrorType::CouldntUpdate
      | CoolbillsErrorType::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
      _ => StatusCode::BAD_REQUEST,
    }
  }

  fn error_response(&self) -> actix_web::HttpResponse {
    actix_web::HttpResponse::build(self.status_code()).json(&self.error_type)
  }
}

impl From<CoolbillsErrorType> for CoolbillsError {
  fn from(error_type: CoolbillsErrorType) -> Self {
    let inner = anyhow::anyhow!("{}", error_type);
    CoolbillsError {
      error_type,
      inner,
      context: Backtrace::capture(),
    }
  }
}

pub trait CoolbillsErrorExt<T, E: Into<anyhow::Error>> {
  fn with_error_type(self, error_type: CoolbillsErrorType) -> CoolbillsResult<T>;
}

impl<T, E: Into<anyhow::Error>> CoolbillsErrorExt<T, E> for Result<T, E> {
  fn with_error_type(self, error_type: CoolbillsErrorType) -> CoolbillsResult<T> {
    self.map_err(|error| CoolbillsError {
      error_type,
      inner: error.into(),
      context: Backtrace::capture(),
    })
  }
}

pub trait CoolbillsErrorExt2<T> {
  fn with_error_type(self, error_type: CoolbillsErrorType) -> CoolbillsResult<T>;
  fn into_anyhow(self) -> Result<T, anyhow::Error>;
}

impl<T> CoolbillsErrorExt2<T> for CoolbillsResult<T> {
  fn with_error_type(self, error_type: CoolbillsErrorType) -> CoolbillsResult<T> {
    self.map_err(|mut e| {
      e.error_type = error_type;
      e
    })
  }

  // can't be a From impl because it would conflict with the broad Into<> one
  fn into_anyhow(self) -> Result<T, anyhow::Error> {
    self.map_err(|e| e.inner)
  }
}

/// True for the database error produced by losing a race on a unique index.
pub fn is_unique_violation(e: &diesel::result::Error) -> bool {
  matches!(
    e,
    diesel::result::Error::DatabaseError(diesel::result::DatabaseErrorKind::UniqueViolation, _)
  )
}

/// Maps a unique constraint violation to the given conflict error, so that
/// racing inserts (duplicate usernames, role names, ...) surface as 409
/// instead of an internal error.
pub trait CoolbillsConflictExt<T> {
  fn with_conflict_type(self, conflict: CoolbillsErrorType) -> CoolbillsResult<T>;
}

impl<T> CoolbillsConflictExt<T> for Result<T, diesel::result::Error> {
  fn with_conflict_type(self, conflict: CoolbillsErrorType) -> CoolbillsResult<T> {
    self.map_err(|e| {
      if is_unique_violation(&e) {
        conflict.into()
      } else {
        e.into()
      }
    })
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::indexing_slicing)]
  #![allow(clippy::unwrap_used)]
  use super::*;
  use actix_web::{body::MessageBody, ResponseError};
  use pretty_assertions::assert_eq;

  #[test]
  fn deserializes_no_message() -> CoolbillsResult<()> {
    let err = CoolbillsError::from(CoolbillsErrorType::RateLimited).error_response();
    let json = String::from_utf8(err.into_body().try_into_bytes().unwrap_or_default().to_vec())?;
    assert_eq!(&json, "{\"error\":\"rate_limited\"}");

    Ok(())
  }

  #[test]
  fn deserializes_with_message() -> CoolbillsResult<()> {
    let missing = CoolbillsErrorType::MissingPermission(String::from("Update User Role"));
    let err = CoolbillsError::from(missing).error_response();
    let json = String::from_utf8(err.into_body().try_into_bytes().unwrap_or_default().to_vec())?;
    assert_eq!(
      &json,
      "{\"error\":\"missing_permission\",\"message\":\"Update User Role\"}"
    );

    Ok(())
  }

  #[test]
  fn test_status_codes() {
    assert_eq!(
      401,
      CoolbillsError::from(CoolbillsErrorType::NotLoggedIn)
        .status_code()
        .as_u16()
    );
    assert_eq!(
      403,
      CoolbillsError::from(CoolbillsErrorType::Locked)
        .status_code()
        .as_u16()
    );
    assert_eq!(
      409,
      CoolbillsError::from(CoolbillsErrorType::UsernameAlreadyExists)
        .status_code()
        .as_u16()
    );
    assert_eq!(
      429,
      CoolbillsError::from(CoolbillsErrorType::RateLimited)
        .status_code()
        .as_u16()
    );
  }

  #[test]
  fn test_convert_diesel_errors() {
    let not_found_error = CoolbillsError::from(diesel::NotFound);
    assert_eq!(CoolbillsErrorType::NotFound, not_found_error.error_type);
    assert_eq!(404, not_found_error.status_code().as_u16());

    let other_error = CoolbillsError::from(diesel::result::Error::NotInTransaction);
    assert!(matches!(
      other_error.error_type,
      CoolbillsErrorType::Unknown { .. }
    ));
    assert_eq!(500, other_error.status_code().as_u16());
  }

  #[test]
  fn test_unique_violation_detection() {
    let unique = diesel::result::Error::DatabaseError(
      diesel::result::DatabaseErrorKind::UniqueViolation,
      Box::new(String::from("duplicate key")),
    );
    assert!(is_unique_violation(&unique));
    assert!(!is_unique_violation(&diesel::NotFound));
  }

  #[test]
  fn test_conflict_mapping() {
    let unique: Result<(), diesel::result::Error> = Err(diesel::result::Error::DatabaseError(
      diesel::result::DatabaseErrorKind::UniqueViolation,
      Box::new(String::from("duplicate key")),
    ));
    let mapped = unique.with_conflict_type(CoolbillsErrorType::UsernameAlreadyExists);
    assert_eq!(
      CoolbillsErrorType::UsernameAlreadyExists,
      mapped.unwrap_err().error_type
    );

    let other: Result<(), diesel::result::Error> = Err(diesel::NotFound);
    let mapped = other.with_conflict_type(CoolbillsErrorType::UsernameAlreadyExists);
    assert_eq!(CoolbillsErrorType::NotFound, mapped.unwrap_err().error_type);
  }
}
