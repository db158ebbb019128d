//! Entry point for the Leave Engine binary.
//!
//! Running this binary starts an HTTP server that exposes the leave
//! distribution calculator.  Configuration comes from `LEAVE_*`
//! environment variables; see [`leave_engine::config`].

use anyhow::Context;
use leave_engine::config::{LogFormat, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter: {}", settings.log_filter))?;
    match settings.log_format {
        LogFormat::Json => tracing_subscriber::fmt().json().with_env_filter(filter).init(),
        LogFormat::Pretty => tracing_subscriber::fmt().pretty().with_env_filter(filter).init(),
    }

    tracing::info!(
        bind_addr = %settings.bind_addr,
        log_filter = %settings.log_filter,
        "leave engine starting"
    );

    leave_engine::api::serve(settings.bind_addr, settings.policy).await
}
