use coolbills_utils::{error::CoolbillsResult, settings::structs::Settings};
use diesel::result::Error::{self as DieselError, QueryBuilderError};
use diesel_async::{
  pg::AsyncPgConnection,
  pooled_connection::{
    deadpool::{Object as PooledConnection, Pool},
    AsyncDieselConnectionManager,
  },
};
use std::ops::{Deref, DerefMut};

pub const FETCH_LIMIT_DEFAULT: i64 = 10;
pub const FETCH_LIMIT_MAX: i64 = 50;

/// Shown in place of the body of a deleted comment, so the reply tree keeps
/// its shape.
pub const DELETED_REPLACEMENT_TEXT: &str = "*deleted by creator*";

pub type ActualDbPool = Pool<AsyncPgConnection>;

/// References a pool or connection. Functions must take `&mut DbPool<'_>` to
/// allow implicit reborrowing.
pub enum DbPool<'a> {
  Pool(&'a ActualDbPool),
  Conn(&'a mut AsyncPgConnection),
}

pub enum DbConn<'a> {
  Pool(PooledConnection<AsyncPgConnection>),
  Conn(&'a mut AsyncPgConnection),
}

pub async fn get_conn<'a, 'b: 'a>(pool: &'a mut DbPool<'b>) -> Result<DbConn<'a>, DieselError> {
  Ok(match pool {
    DbPool::Pool(pool) => DbConn::Pool(pool.get().await.map_err(|e| QueryBuilderError(e.into()))?),
    DbPool::Conn(conn) => DbConn::Conn(conn),
  })
}

impl Deref for DbConn<'_> {
  type Target = AsyncPgConnection;

  fn deref(&self) -> &Self::Target {
    match self {
      DbConn::Pool(conn) => conn.deref(),
      DbConn::Conn(conn) => conn.deref(),
    }
  }
}

impl DerefMut for DbConn<'_> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    match self {
      DbConn::Pool(conn) => conn.deref_mut(),
      DbConn::Conn(conn) => conn.deref_mut(),
    }
  }
}

impl<'a> From<&'a mut AsyncPgConnection> for DbPool<'a> {
  fn from(value: &'a mut AsyncPgConnection) -> Self {
    DbPool::Conn(value)
  }
}

impl<'a, 'b: 'a> From<&'a mut DbConn<'b>> for DbPool<'a> {
  fn from(value: &'a mut DbConn<'b>) -> Self {
    DbPool::Conn(value.deref_mut())
  }
}

impl<'a> From<&'a ActualDbPool> for DbPool<'a> {
  fn from(value: &'a ActualDbPool) -> Self {
    DbPool::Pool(value)
  }
}

pub async fn build_db_pool(settings: &Settings) -> CoolbillsResult<ActualDbPool> {
  let db_url = settings.get_database_url();
  let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&db_url);
  let pool = Pool::builder(manager)
    .max_size(settings.database.pool_size as usize)
    .build()?;
  Ok(pool)
}

/// Escapes LIKE wildcards and turns spaces into wildcards, for
/// case-insensitive substring search.
pub fn fuzzy_search(q: &str) -> String {
  let replaced = q
    .replace('\\', "\\\\")
    .replace('%', "\\%")
    .replace('_', "\\_")
    .replace(' ', "%");
  format!("%{replaced}%")
}

pub fn limit_and_offset(page: Option<i64>, limit: Option<i64>) -> Result<(i64, i64), DieselError> {
  let limit = limit.unwrap_or(FETCH_LIMIT_DEFAULT);
  if !(1..=FETCH_LIMIT_MAX).contains(&limit) {
    return Err(QueryBuilderError(
      format!("Fetch limit is > {FETCH_LIMIT_MAX} or < 1").into(),
    ));
  }
  let page = page.unwrap_or(1);
  if page < 1 {
    return Err(QueryBuilderError("Page is < 1".into()));
  }
  let offset = limit * (page - 1);
  Ok((limit, offset))
}

#[cfg(test)]
mod tests {
  use super::{fuzzy_search, limit_and_offset};
  use pretty_assertions::assert_eq;

  #[test]
  fn test_fuzzy_search() {
    let test = "This %is% _a_ fuzzy search";
    assert_eq!(
      fuzzy_search(test),
      "%This%\\%is\\%%\\_a\\_%fuzzy%search%".to_string()
    );
  }

  #[test]
  fn test_limit_and_offset() {
    assert_eq!((10, 0), limit_and_offset(None, None).unwrap_or((-1, -1)));
    assert_eq!(
      (25, 50),
      limit_and_offset(Some(3), Some(25)).unwrap_or((-1, -1))
    );
    assert!(limit_and_offset(Some(0), None).is_err());
    assert!(limit_and_offset(None, Some(100)).is_err());
  }
}
