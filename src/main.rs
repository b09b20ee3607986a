use clap::Parser;
use coolbills_server::{start_coolbills_server, CmdArgs};
use coolbills_utils::error::CoolbillsResult;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
pub async fn main() -> CoolbillsResult<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(LevelFilter::INFO.into())
    .from_env_lossy();
  tracing_subscriber::fmt().with_env_filter(filter).init();

  let args = CmdArgs::parse();

  start_coolbills_server(args).await?;
  Ok(())
}
