mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use args::Args;
use chrono::Utc;
use clap::Parser as _;
use desk_display::{
    metrics::MetricSampler,
    scheduler::run_loop,
    session::Session,
    transport::{SerialTransport, discover},
    weather::OpenWeatherMap,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();

    let weather = OpenWeatherMap::new(args.api_key.clone(), args.http_timeout())
        .context("failed to initialize weather client")?;

    let port_name = discover(&args.device).context("failed to find display")?;
    let transport = SerialTransport::open(&port_name, args.baud_rate)
        .context("failed to connect to display")?;

    let mut sampler = MetricSampler::new();
    let timezone = args.timezone;
    let session = Session::new(
        transport,
        Utc::now().with_timezone(&timezone),
        args.weather_interval(),
    );

    info!(port = %port_name, baud_rate = args.baud_rate, "starting communication");

    let interrupted = async {
        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for interrupt")
    };

    run_loop(
        session,
        &weather,
        &args.location,
        args.tick(),
        || Utc::now().with_timezone(&timezone),
        || sampler.sample(),
        interrupted,
    )
    .await?;

    Ok(())
}
