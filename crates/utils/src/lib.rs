pub mod claims;
pub mod error;
pub mod rate_limit;
pub mod settings;

use error::CoolbillsResult;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Calculate how many pages a result set spans for page-based clients.
pub fn total_pages(total: i64, limit: i64) -> CoolbillsResult<i64> {
  if limit <= 0 {
    Err(anyhow::anyhow!("page limit must be positive"))?
  }
  Ok((total + limit - 1) / limit)
}

#[cfg(test)]
mod tests {
  use super::total_pages;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_total_pages() {
    assert_eq!(0, total_pages(0, 10).unwrap_or(-1));
    assert_eq!(1, total_pages(10, 10).unwrap_or(-1));
    assert_eq!(2, total_pages(11, 10).unwrap_or(-1));
    assert!(total_pages(5, 0).is_err());
  }
}
