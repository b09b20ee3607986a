use crate::error::{CoolbillsErrorExt, CoolbillsErrorType, CoolbillsResult};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

type Jwt = String;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
  /// User id, standard claim by RFC 7519.
  pub sub: i32,
  pub iss: String,
  /// Time when this token was issued as UNIX-timestamp in seconds
  pub iat: i64,
}

impl Claims {
  pub fn decode(jwt: &str, jwt_secret: &str) -> CoolbillsResult<Claims> {
    // Sessions don't expire, so don't require or validate `exp`
    let mut validation = Validation::default();
    validation.validate_exp = false;
    validation.required_spec_claims.remove("exp");

    let key = DecodingKey::from_secret(jwt_secret.as_ref());
    Ok(
      decode::<Claims>(jwt, &key, &validation)
        .with_error_type(CoolbillsErrorType::NotLoggedIn)?
        .claims,
    )
  }

  pub fn jwt(user_id: i32, jwt_secret: &str, hostname: &str) -> CoolbillsResult<Jwt> {
    let my_claims = Claims {
      sub: user_id,
      iss: hostname.to_string(),
      iat: Utc::now().timestamp(),
    };
    let key = EncodingKey::from_secret(jwt_secret.as_ref());
    Ok(encode(&Header::default(), &my_claims, &key)?)
  }
}

#[cfg(test)]
mod tests {
  use super::Claims;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_round_trip() {
    let jwt = Claims::jwt(42, "secret", "coolbills.example");
    assert!(jwt.is_ok());
    let claims = jwt.and_then(|j| Claims::decode(&j, "secret"));
    assert_eq!(42, claims.map(|c| c.sub).unwrap_or(-1));
  }

  #[test]
  fn test_wrong_secret_rejected() {
    let jwt = Claims::jwt(42, "secret", "coolbills.example");
    let claims = jwt.and_then(|j| Claims::decode(&j, "other"));
    assert!(claims.is_err());
  }
}
