use enum_map::EnumMap;
use once_cell::sync::Lazy;
use std::{collections::HashMap, time::Instant};
use tracing::debug;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Smaller than `std::time::Instant` because it uses a smaller integer for
/// seconds and doesn't store nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstantSecs {
  secs: u32,
}

impl InstantSecs {
  pub fn now() -> Self {
    InstantSecs {
      secs: u32::try_from(START_TIME.elapsed().as_secs()).unwrap_or(u32::MAX),
    }
  }

  #[cfg(test)]
  pub(crate) fn from_secs(secs: u32) -> Self {
    InstantSecs { secs }
  }

  fn secs_since(self, earlier: Self) -> u32 {
    self.secs.saturating_sub(earlier.secs)
  }
}

#[derive(Debug, Clone, Copy)]
pub struct BucketConfig {
  pub capacity: i32,
  pub secs_to_refill: i32,
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
  last_checked: InstantSecs,
  /// Amount of tokens that were present at `last_checked`. Tokens refill
  /// steadily up to the bucket's capacity; performing the rate-limited
  /// action consumes 1 token.
  tokens: f32,
}

impl Bucket {
  fn full(now: InstantSecs, capacity: i32) -> Self {
    Bucket {
      last_checked: now,
      tokens: capacity as f32,
    }
  }

  fn check(&mut self, now: InstantSecs, config: BucketConfig) -> bool {
    let capacity = config.capacity as f32;
    let secs_to_refill = config.secs_to_refill as f32;

    let secs_since_last_checked = now.secs_since(self.last_checked) as f32;
    self.last_checked = now;

    // For `secs_since_last_checked` seconds, increase `tokens` by `capacity`
    // every `secs_to_refill` seconds
    self.tokens += secs_since_last_checked * (capacity / secs_to_refill);

    if self.tokens > capacity {
      self.tokens = capacity;
    }

    if self.tokens < 1.0 {
      debug!(
        "Rate limited, time passed: {}, allowance: {}",
        secs_since_last_checked, self.tokens
      );
      false
    } else {
      self.tokens -= 1.0;
      true
    }
  }
}

#[derive(Debug, enum_map::Enum, Copy, Clone, strum::AsRefStr)]
pub enum RateLimitType {
  Post,
  Comment,
  Search,
}

/// Rate limiting based on action type and acting user. Buckets are keyed by
/// user id, since everything rate-limited here requires a session.
#[derive(Debug, Default)]
pub struct RateLimitStorage {
  buckets: HashMap<i32, EnumMap<RateLimitType, Option<Bucket>>>,
}

impl RateLimitStorage {
  /// Returns true if the request passed the rate limit, false if it failed
  /// and should be rejected.
  pub(super) fn check(
    &mut self,
    type_: RateLimitType,
    user_id: i32,
    now: InstantSecs,
    config: BucketConfig,
  ) -> bool {
    let group = self.buckets.entry(user_id).or_default();
    let bucket = group[type_].get_or_insert_with(|| Bucket::full(now, config.capacity));

    let result = bucket.check(now, config);
    if !result {
      debug!("Rate limited user: {user_id}, type: {}", type_.as_ref());
    }
    result
  }

  /// Drops buckets that have been idle for at least their own refill window.
  /// Those are full again and carry no information; anything still cooling
  /// down is kept, no matter how long the sweep interval is.
  pub(super) fn remove_full_buckets(
    &mut self,
    now: InstantSecs,
    configs: EnumMap<RateLimitType, BucketConfig>,
  ) {
    self.buckets.retain(|_, group| {
      for (type_, slot) in group.iter_mut() {
        let refill_window = u32::try_from(configs[type_].secs_to_refill).unwrap_or(u32::MAX);
        let refilled =
          (*slot).is_some_and(|bucket| now.secs_since(bucket.last_checked) >= refill_window);
        if refilled {
          *slot = None;
        }
      }
      group.values().any(Option::is_some)
    });
  }
}

#[cfg(test)]
mod tests {
  use super::{BucketConfig, InstantSecs, RateLimitStorage, RateLimitType};
  use enum_map::{enum_map, EnumMap};

  const POST_CONFIG: BucketConfig = BucketConfig {
    capacity: 1,
    secs_to_refill: 10800,
  };

  fn configs() -> EnumMap<RateLimitType, BucketConfig> {
    enum_map! {
      RateLimitType::Post => POST_CONFIG,
      RateLimitType::Comment => BucketConfig {
        capacity: 30,
        secs_to_refill: 600,
      },
      RateLimitType::Search => BucketConfig {
        capacity: 60,
        secs_to_refill: 600,
      },
    }
  }

  #[test]
  fn test_cooldown_blocks_second_post() {
    let mut storage = RateLimitStorage::default();
    let now = InstantSecs::from_secs(1);

    assert!(storage.check(RateLimitType::Post, 1, now, POST_CONFIG));
    // immediate retry by the same user fails
    assert!(!storage.check(RateLimitType::Post, 1, now, POST_CONFIG));
    // a different user is unaffected
    assert!(storage.check(RateLimitType::Post, 2, now, POST_CONFIG));
  }

  #[test]
  fn test_refill_after_cooldown() {
    let mut storage = RateLimitStorage::default();
    let now = InstantSecs::from_secs(1);

    assert!(storage.check(RateLimitType::Post, 1, now, POST_CONFIG));
    let halfway = InstantSecs::from_secs(1 + 5400);
    assert!(!storage.check(RateLimitType::Post, 1, halfway, POST_CONFIG));
    let after_cooldown = InstantSecs::from_secs(1 + 10800);
    assert!(storage.check(RateLimitType::Post, 1, after_cooldown, POST_CONFIG));
  }

  #[test]
  fn test_sweep_keeps_buckets_inside_cooldown() {
    let mut storage = RateLimitStorage::default();
    let now = InstantSecs::from_secs(1);
    assert!(storage.check(RateLimitType::Post, 7, now, POST_CONFIG));

    // well inside the three hour post cooldown
    let later = InstantSecs::from_secs(1 + 200);
    storage.remove_full_buckets(later, configs());
    assert!(!storage.check(RateLimitType::Post, 7, later, POST_CONFIG));
  }

  #[test]
  fn test_sweep_drops_refilled_buckets() {
    let mut storage = RateLimitStorage::default();
    let now = InstantSecs::from_secs(1);
    assert!(storage.check(RateLimitType::Post, 7, now, POST_CONFIG));

    let after_refill = InstantSecs::from_secs(1 + 10800);
    storage.remove_full_buckets(after_refill, configs());
    assert!(storage.buckets.is_empty());
  }

  #[test]
  fn test_types_are_independent() {
    let mut storage = RateLimitStorage::default();
    let now = InstantSecs::from_secs(1);

    assert!(storage.check(RateLimitType::Post, 1, now, POST_CONFIG));
    let search_config = BucketConfig {
      capacity: 60,
      secs_to_refill: 600,
    };
    assert!(storage.check(RateLimitType::Search, 1, now, search_config));
  }
}
