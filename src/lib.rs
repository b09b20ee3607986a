pub mod api_routes_http;
pub mod session_middleware;

use crate::session_middleware::SessionMiddleware;
use actix_web::{web::Data, App, HttpServer};
use clap::Parser;
use coolbills_api_common::context::CoolbillsContext;
use coolbills_db_schema::{schema_setup, utils::build_db_pool};
use coolbills_utils::{
  error::CoolbillsResult,
  rate_limit::RateLimitCell,
  settings::SETTINGS,
  VERSION,
};
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// How often the refilled rate-limit buckets are swept. The sweep only drops
/// buckets that are full again, so the interval can be shorter than the
/// longest cooldown.
const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(120);

#[derive(Parser, Debug)]
#[command(version = VERSION)]
pub struct CmdArgs {
  /// Skip running embedded database migrations on startup
  #[arg(long, default_value_t = false)]
  pub disable_migrations: bool,
}

pub async fn start_coolbills_server(args: CmdArgs) -> CoolbillsResult<()> {
  let settings = SETTINGS.to_owned();

  if !args.disable_migrations {
    schema_setup::run(&settings.get_database_url())?;
  }

  let pool = build_db_pool(&settings).await?;
  let rate_limit_cell = RateLimitCell::new(settings.rate_limit);

  let cleanup_cell = rate_limit_cell.clone();
  tokio::spawn(async move {
    let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
    loop {
      interval.tick().await;
      cleanup_cell.remove_full_buckets();
    }
  });

  let context = CoolbillsContext::create(pool, rate_limit_cell);

  info!(
    "Starting HTTP server at {}:{} (version {})",
    settings.bind, settings.port, VERSION
  );
  HttpServer::new(move || {
    App::new()
      .wrap(TracingLogger::default())
      .wrap(SessionMiddleware::new(context.clone()))
      .app_data(Data::new(context.clone()))
      .configure(api_routes_http::config)
  })
  .bind((settings.bind, settings.port))?
  .run()
  .await?;

  Ok(())
}
