use crate::{
  error::{CoolbillsError, CoolbillsResult},
  settings::structs::Settings,
};
use once_cell::sync::Lazy;
use std::{env, fs};

pub mod structs;

static CONFIG_FILE: &str = "config/config.hjson";

pub static SETTINGS: Lazy<Settings> = Lazy::new(|| {
  Settings::init().unwrap_or_else(|e| {
    tracing::warn!("Couldn't load settings file, using defaults: {e}");
    Settings::default()
  })
});

impl Settings {
  /// Reads the config from the hjson file if present, otherwise falls back
  /// to defaults. `COOLBILLS_CONFIG_LOCATION` overrides the file path and
  /// `COOLBILLS_DATABASE_URL` overrides the assembled database url.
  fn init() -> CoolbillsResult<Self> {
    let config = deser_hjson::from_str::<Settings>(&Self::read_config_file()?)?;
    Ok(config)
  }

  pub fn get() -> Settings {
    SETTINGS.clone()
  }

  pub fn get_database_url(&self) -> String {
    if let Ok(url) = env::var("COOLBILLS_DATABASE_URL") {
      return url;
    }
    let conf = &self.database;
    format!(
      "postgres://{}:{}@{}:{}/{}",
      conf.user, conf.password, conf.host, conf.port, conf.database,
    )
  }

  pub fn get_config_location() -> String {
    env::var("COOLBILLS_CONFIG_LOCATION").unwrap_or_else(|_| CONFIG_FILE.to_string())
  }

  fn read_config_file() -> Result<String, CoolbillsError> {
    Ok(fs::read_to_string(Self::get_config_location())?)
  }
}

#[cfg(test)]
mod tests {
  use super::structs::Settings;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_defaults() {
    let settings = Settings::default();
    assert_eq!(8536, settings.port);
    assert_eq!(1, settings.rate_limit.post);
    assert_eq!(10800, settings.rate_limit.post_per_second);
  }

  #[test]
  fn test_partial_config_parses() {
    let settings = deser_hjson::from_str::<Settings>(
      r#"{
        hostname: "coolbills.example"
        port: 1234
        database: {
          host: "db"
        }
      }"#,
    )
    .unwrap_or_default();
    assert_eq!("coolbills.example", settings.hostname);
    assert_eq!(1234, settings.port);
    assert_eq!("db", settings.database.host);
    // untouched sections keep their defaults
    assert_eq!(5432, settings.database.port);
  }
}
