mod arcade;
mod pilot;
mod surface;

use std::time::{Duration, Instant};

use anyhow::Result;
use arcade::Arcade;
use pilot::{Pilot, TICK_PERIOD};
use tracing::info;

const SESSION_REPORT_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clicker_pilot=info".parse()?),
        )
        .init();

    banner();

    let mut arcade = Arcade::new();
    let mut pilot = Pilot::new();
    pilot.start();

    let mut ticker = tokio::time::interval(TICK_PERIOD);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);
    let mut reporter = tokio::time::interval_at(
        tokio::time::Instant::now() + SESSION_REPORT_INTERVAL,
        SESSION_REPORT_INTERVAL,
    );
    let mut last_tick = Instant::now();

    while pilot.is_running() {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                arcade.advance(now - last_tick);
                last_tick = now;
                pilot.tick(&mut arcade, now);
            }
            _ = reporter.tick() => {
                pilot.report_elapsed_time();
                info!(
                    stimulation = arcade.stimulation().floor(),
                    per_second = arcade.per_second(),
                    "arcade standing",
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown requested");
                pilot.stop();
            }
        }
    }

    Ok(())
}

fn banner() {
    info!("========================================");
    info!("clicker pilot loaded");
    info!("the pilot starts now and plays until Ctrl-C stops it");
    info!("session time is reported every minute and on shutdown");
    info!("set RUST_LOG=clicker_pilot=debug to watch per-tick decisions");
    info!("========================================");
}
