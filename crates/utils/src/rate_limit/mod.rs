use crate::{
  error::{CoolbillsErrorType, CoolbillsResult},
  settings::structs::RateLimitConfig,
};
use enum_map::{enum_map, EnumMap};
use rate_limiter::{BucketConfig, InstantSecs, RateLimitStorage};
use std::sync::{Arc, Mutex};

pub mod rate_limiter;

pub use rate_limiter::RateLimitType;

/// Single instance of rate limit config and buckets, shared across all
/// server threads.
#[derive(Clone)]
pub struct RateLimitCell {
  config: EnumMap<RateLimitType, BucketConfig>,
  storage: Arc<Mutex<RateLimitStorage>>,
}

impl RateLimitCell {
  pub fn new(config: RateLimitConfig) -> Self {
    let config = enum_map! {
      RateLimitType::Post => (config.post, config.post_per_second),
      RateLimitType::Comment => (config.comment, config.comment_per_second),
      RateLimitType::Search => (config.search, config.search_per_second),
    }
    .map(|_, t| BucketConfig {
      capacity: t.0,
      secs_to_refill: t.1,
    });

    RateLimitCell {
      config,
      storage: Arc::new(Mutex::new(RateLimitStorage::default())),
    }
  }

  /// Consumes one token from the user's bucket, or fails with the typed
  /// `RateLimited` error so callers never have to inspect message text.
  pub fn check(&self, type_: RateLimitType, user_id: i32) -> CoolbillsResult<()> {
    let passed = self
      .storage
      .lock()
      .map(|mut storage| storage.check(type_, user_id, InstantSecs::now(), self.config[type_]))
      .unwrap_or(true);

    if passed {
      Ok(())
    } else {
      Err(CoolbillsErrorType::RateLimited.into())
    }
  }

  /// Drops buckets that have refilled to capacity. A bucket still cooling
  /// down is never touched, so sweeping often is safe.
  pub fn remove_full_buckets(&self) {
    if let Ok(mut storage) = self.storage.lock() {
      storage.remove_full_buckets(InstantSecs::now(), self.config);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::RateLimitCell;
  use crate::{error::CoolbillsErrorType, settings::structs::RateLimitConfig};

  #[test]
  fn test_post_bucket_yields_typed_error() {
    let cell = RateLimitCell::new(RateLimitConfig::default());

    assert!(cell.check(super::RateLimitType::Post, 7).is_ok());
    let second = cell.check(super::RateLimitType::Post, 7);
    assert!(matches!(
      second.map_err(|e| e.error_type),
      Err(CoolbillsErrorType::RateLimited)
    ));
  }
}
