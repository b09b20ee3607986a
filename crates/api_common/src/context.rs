use coolbills_db_schema::utils::{ActualDbPool, DbPool};
use coolbills_utils::{
  rate_limit::RateLimitCell,
  settings::{structs::Settings, SETTINGS},
};

/// Shared server state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct CoolbillsContext {
  pool: ActualDbPool,
  rate_limit_cell: RateLimitCell,
}

impl CoolbillsContext {
  pub fn create(pool: ActualDbPool, rate_limit_cell: RateLimitCell) -> CoolbillsContext {
    CoolbillsContext {
      pool,
      rate_limit_cell,
    }
  }

  pub fn pool(&self) -> DbPool<'_> {
    DbPool::Pool(&self.pool)
  }

  pub fn inner_pool(&self) -> &ActualDbPool {
    &self.pool
  }

  pub fn rate_limit_cell(&self) -> &RateLimitCell {
    &self.rate_limit_cell
  }

  pub fn settings(&self) -> &'static Settings {
    &SETTINGS
  }
}
