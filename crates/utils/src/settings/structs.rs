use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Settings {
  /// Settings related to the postgresql database
  pub database: DatabaseConfig,
  /// The domain name of the instance
  pub hostname: String,
  /// Address where the server should listen for incoming requests
  pub bind: IpAddr,
  /// Port where the server should listen for incoming requests
  pub port: u16,
  /// Secret used to sign session tokens
  pub jwt_secret: String,
  pub rate_limit: RateLimitConfig,
  /// Congress.gov API access, only used by the external ingestion jobs
  pub congress: Option<CongressConfig>,
  /// SMTP credentials for transactional email, not consumed by this server
  pub email: Option<EmailConfig>,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      database: DatabaseConfig::default(),
      hostname: "localhost".into(),
      bind: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
      port: 8536,
      jwt_secret: "changeme".into(),
      rate_limit: RateLimitConfig::default(),
      congress: None,
      email: None,
    }
  }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
  pub user: String,
  pub password: String,
  pub host: String,
  pub port: u16,
  pub database: String,
  pub pool_size: u32,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    DatabaseConfig {
      user: "coolbills".into(),
      password: "password".into(),
      host: "localhost".into(),
      port: 5432,
      database: "coolbills".into(),
      pool_size: 5,
    }
  }
}

/// Capacity / refill pairs for the leaky buckets. `*_per_second` is the
/// number of seconds it takes to refill the full capacity.
#[derive(Debug, Deserialize, Serialize, Clone, Copy)]
#[serde(default)]
pub struct RateLimitConfig {
  /// Maximum number of forum posts inside `post_per_second`
  pub post: i32,
  pub post_per_second: i32,
  pub comment: i32,
  pub comment_per_second: i32,
  pub search: i32,
  pub search_per_second: i32,
}

impl Default for RateLimitConfig {
  fn default() -> Self {
    RateLimitConfig {
      // one new thread per author per three hours
      post: 1,
      post_per_second: 10800,
      comment: 30,
      comment_per_second: 600,
      search: 60,
      search_per_second: 600,
    }
  }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct CongressConfig {
  pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct EmailConfig {
  pub smtp_server: String,
  pub smtp_login: Option<String>,
  pub smtp_password: Option<String>,
  pub smtp_from_address: String,
  pub use_tls: bool,
}
