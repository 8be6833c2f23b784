//! # crsf-softtx
//!
//! Demo transmitter: drives the software UART against a simulated signal
//! line, sweeping one channel across the full range while the rest stay
//! centered.
//!
//! The simulated line stands in for a GPIO on hosts that have none; on real
//! hardware the same [`RcLink`] runs against a `HalPin` and a platform
//! critical section. The bit timing is real either way — the transmitter
//! spin-waits on the monotonic clock exactly as it would on hardware.

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use crsf_softtx::channels::{map_value_clamped, ChannelStore};
use crsf_softtx::config::Config;
use crsf_softtx::crsf::protocol::{CRSF_CHANNEL_VALUE_MAX, CRSF_CHANNEL_VALUE_MIN};
use crsf_softtx::link::RcLink;
use crsf_softtx::softuart::clock::SpinClock;
use crsf_softtx::softuart::section::UnmaskedSection;
use crsf_softtx::softuart::sim::SimulatedLine;
use crsf_softtx::softuart::SoftUartTx;

/// Default configuration file path
const CONFIG_PATH: &str = "config/default.toml";

/// Poll period for the rate-gated link driver (1 kHz)
const POLL_INTERVAL_MS: u64 = 1;

/// Number of frames between status log messages (~5 seconds at 50Hz)
const LOG_INTERVAL_FRAMES: u64 = 250;

/// Triangle sweep between the protocol minimum and maximum with the given
/// period: min at phase 0, max at the half-period, back to min.
fn sweep_value(elapsed_ms: u64, period_ms: u64) -> u16 {
    let phase = (elapsed_ms % period_ms) as i64;
    let half = (period_ms / 2) as i64;
    let pos = if phase <= half {
        phase
    } else {
        period_ms as i64 - phase
    };
    map_value_clamped(
        pos as i32,
        0,
        half as i32,
        CRSF_CHANNEL_VALUE_MIN as i32,
        CRSF_CHANNEL_VALUE_MAX as i32,
    ) as u16
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("crsf-softtx v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match Config::load(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}. Using defaults", CONFIG_PATH, e);
            Config::default()
        }
    };

    let store = ChannelStore::new();
    let clock = SpinClock::new();
    let line = SimulatedLine::new(clock);
    let uart = SoftUartTx::new(
        line.clone(),
        clock,
        UnmaskedSection::new(),
        config.link.baud_rate,
    )
    .with_preamble(config.preamble_gap());
    let mut link = RcLink::new(uart, clock, store.clone(), config.update_interval());

    info!(
        "Transmitting on simulated line: {} baud, {} ms frame interval, preamble {}",
        config.link.baud_rate,
        config.link.update_interval_ms,
        if config.preamble.enabled { "on" } else { "off" },
    );
    info!(
        "Sweeping channel {} over [{}, {}] every {} ms",
        config.demo.sweep_channel,
        CRSF_CHANNEL_VALUE_MIN,
        CRSF_CHANNEL_VALUE_MAX,
        config.demo.sweep_period_ms,
    );
    info!("Press Ctrl+C to exit");

    let mut poll = interval(Duration::from_millis(POLL_INTERVAL_MS));
    let started = std::time::Instant::now();
    let mut last_log: u64 = 0;

    loop {
        tokio::select! {
            _ = poll.tick() => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                store.set(
                    config.demo.sweep_channel,
                    sweep_value(elapsed_ms, config.demo.sweep_period_ms),
                );

                if link.tick() && link.frames_sent() - last_log >= LOG_INTERVAL_FRAMES {
                    info!(
                        "Sent {} frames ({} wire edges since last report)",
                        link.frames_sent(),
                        line.edge_count(),
                    );
                    line.clear();
                    last_log = link.frames_sent();
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                info!("Total frames sent: {}", link.frames_sent());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crsf_softtx::crsf::protocol::CRSF_CHANNEL_VALUE_CENTER;

    #[test]
    fn test_poll_runs_faster_than_frame_interval() {
        // The link is rate-gated, so polling must outpace the 20 ms default
        // frame interval for the gate to be the limiting factor
        assert!(POLL_INTERVAL_MS < 20);
    }

    #[test]
    fn test_sweep_endpoints() {
        assert_eq!(sweep_value(0, 2000), CRSF_CHANNEL_VALUE_MIN);
        assert_eq!(sweep_value(1000, 2000), CRSF_CHANNEL_VALUE_MAX);
    }

    #[test]
    fn test_sweep_crosses_center() {
        assert_eq!(sweep_value(500, 2000), CRSF_CHANNEL_VALUE_CENTER);
        assert_eq!(sweep_value(1500, 2000), CRSF_CHANNEL_VALUE_CENTER);
    }

    #[test]
    fn test_sweep_is_periodic() {
        assert_eq!(sweep_value(300, 2000), sweep_value(2300, 2000));
    }

    #[test]
    fn test_sweep_stays_in_protocol_range() {
        for ms in (0..4000).step_by(37) {
            let value = sweep_value(ms, 2000);
            assert!((CRSF_CHANNEL_VALUE_MIN..=CRSF_CHANNEL_VALUE_MAX).contains(&value));
        }
    }
}
