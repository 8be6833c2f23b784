//! # RC Link Driver
//!
//! Ties the frame encoder to the software UART and paces transmissions.
//!
//! The driver is polled: the outer loop calls [`RcLink::tick`] as often as
//! it likes and the link transmits only when the update interval has
//! elapsed since the previous frame. Polling faster than the interval is a
//! no-op; polling slower just delays the next frame. Missed deadlines are
//! never made up for with catch-up bursts.

use std::time::{Duration, Instant};

use tracing::trace;

use crate::channels::ChannelStore;
use crate::crsf::frame::build_rc_channels_frame;
use crate::crsf::protocol::RcChannels;
use crate::softuart::clock::Clock;
use crate::softuart::pin::TxPin;
use crate::softuart::section::CriticalSection;
use crate::softuart::SoftUartTx;

/// Default spacing between frame transmissions (50 Hz).
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_millis(20);

/// Rate-gated RC channels transmitter.
///
/// Reads one [`ChannelStore`] snapshot per frame, so a producer updating
/// channels mid-frame can never tear the transmitted values.
///
/// The clock passed in must share the transmitter's timeline (clone the
/// same clock for both).
#[derive(Debug)]
pub struct RcLink<P, C, S> {
    uart: SoftUartTx<P, C, S>,
    clock: C,
    store: ChannelStore,
    interval: Duration,
    last_sent: Option<Instant>,
    frames_sent: u64,
}

impl<P, C, S> RcLink<P, C, S>
where
    P: TxPin,
    C: Clock,
    S: CriticalSection,
{
    pub fn new(uart: SoftUartTx<P, C, S>, clock: C, store: ChannelStore, interval: Duration) -> Self {
        Self {
            uart,
            clock,
            store,
            interval,
            last_sent: None,
            frames_sent: 0,
        }
    }

    /// Non-blocking entry point for the outer control loop.
    ///
    /// Transmits one frame and returns `true` when the update interval has
    /// elapsed since the previous frame (the first call always transmits);
    /// otherwise returns `false` without touching the line. The elapsed
    /// time is re-evaluated independently on every call.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        let due = match self.last_sent {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if !due {
            return false;
        }

        let snapshot = self.store.snapshot();
        self.send_now(&snapshot);
        true
    }

    /// Builds a frame from `channels` and transmits it, blocking until the
    /// line is idle again. Resets the rate gate's reference time.
    pub fn send_now(&mut self, channels: &RcChannels) {
        let started = self.clock.now();
        let frame = build_rc_channels_frame(channels);
        self.uart.send_frame(&frame);

        self.last_sent = Some(started);
        self.frames_sent += 1;
        trace!(frames = self.frames_sent, "transmitted RC channels frame");
    }

    /// Total frames transmitted since construction.
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Configured spacing between frames.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
