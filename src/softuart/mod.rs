//! # Software UART Transmitter
//!
//! Serializes byte buffers onto a single signal line with software-timed
//! bit transitions. No serial peripheral is involved: every bit is a GPIO
//! write followed by a busy-wait against a monotonic clock.
//!
//! This module handles:
//! - Inverted 8N1 framing (start bit, 8 data bits LSB first, stop bit)
//! - Cycle-accurate per-bit timing with accumulated deadlines
//! - The synchronization preamble and post-preamble gap
//! - Critical-section protection of each byte's bit sequence
//! - Idle-state restoration after every transmission
//!
//! The wire convention is inverted: the line level is the complement of the
//! logical bit, so the line idles electrically low and a start bit drives
//! it high.
//!
//! A transmission walks IDLE → PREAMBLE → BYTE(0..n) → IDLE and always runs
//! to completion; there is no cancellation path.

pub mod clock;
pub mod pin;
pub mod section;
pub mod sim;

use std::time::Duration;

use clock::Clock;
use pin::TxPin;
use section::CriticalSection;

/// Default CRSF link baud rate.
pub const DEFAULT_BAUD_RATE: u32 = 420_000;

/// Synchronization preamble driven before each frame: alternating all-ones /
/// all-zeros bytes wiggle the line to help the receiver lock on.
pub const SYNC_PREAMBLE: [u8; 4] = [0xFF, 0x00, 0xFF, 0x00];

/// Default gap between the preamble and the first frame byte.
pub const DEFAULT_PREAMBLE_GAP: Duration = Duration::from_micros(100);

/// Duration of one bit at `baud_rate`.
pub fn bit_period(baud_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / baud_rate as u64)
}

/// Bit-banging UART transmitter.
///
/// Generic over the three hardware seams: the output pin, the timing
/// source, and the critical-section provider. Production wiring is
/// `HalPin` + [`SpinClock`](clock::SpinClock) + a platform IRQ lock; tests
/// substitute the doubles from [`sim`].
///
/// # Examples
///
/// ```
/// use crsf_softtx::softuart::{SoftUartTx, DEFAULT_BAUD_RATE};
/// use crsf_softtx::softuart::clock::ManualClock;
/// use crsf_softtx::softuart::section::UnmaskedSection;
/// use crsf_softtx::softuart::sim::SimulatedLine;
///
/// let clock = ManualClock::new();
/// let line = SimulatedLine::new(clock.clone());
/// let mut uart = SoftUartTx::new(line, clock, UnmaskedSection::new(), DEFAULT_BAUD_RATE);
/// uart.send_frame(&[0xEE, 0x18, 0x16]);
/// ```
#[derive(Debug)]
pub struct SoftUartTx<P, C, S> {
    pin: P,
    clock: C,
    section: S,
    bit_period: Duration,
    preamble_gap: Option<Duration>,
}

impl<P, C, S> SoftUartTx<P, C, S>
where
    P: TxPin,
    C: Clock,
    S: CriticalSection,
{
    /// Creates a transmitter with the preamble enabled at the default gap.
    pub fn new(pin: P, clock: C, section: S, baud_rate: u32) -> Self {
        Self {
            pin,
            clock,
            section,
            bit_period: bit_period(baud_rate),
            preamble_gap: Some(DEFAULT_PREAMBLE_GAP),
        }
    }

    /// Reconfigures the preamble: `Some(gap)` enables it with the given
    /// post-preamble gap, `None` disables it entirely.
    ///
    /// The preamble is a compatibility aid for receivers that need help
    /// re-synchronizing on a half-duplex line, not part of the base
    /// protocol.
    pub fn with_preamble(mut self, preamble_gap: Option<Duration>) -> Self {
        self.preamble_gap = preamble_gap;
        self
    }

    /// Duration of one bit on this link.
    pub fn bit_period(&self) -> Duration {
        self.bit_period
    }

    /// Transmits `frame`, blocking until the line is idle again.
    ///
    /// Blocks for the full preamble + frame duration (about 850 µs for a
    /// 26-byte frame at 420k baud). Once started the transmission always
    /// runs to completion.
    pub fn send_frame(&mut self, frame: &[u8]) {
        if let Some(gap) = self.preamble_gap {
            for byte in SYNC_PREAMBLE {
                self.send_byte(byte);
            }
            self.clock.busy_wait(gap);
        }

        for &byte in frame {
            self.send_byte(byte);
        }

        // Stop bits already left the line low; make the idle level
        // unconditional anyway.
        self.pin.set_low();
    }

    /// Shifts out one byte: start bit, 8 data bits LSB first, stop bit,
    /// then half a bit of spacing before the next start edge.
    ///
    /// The whole sequence runs inside one critical section. Deadlines
    /// accumulate from the byte start so per-bit rounding never compounds.
    fn send_byte(&mut self, byte: u8) {
        let bit = self.bit_period;
        let Self {
            pin,
            clock,
            section,
            ..
        } = self;

        section.with(|| {
            let mut deadline = clock.now();
            let mut send_bit = |logical: bool, duration: Duration| {
                // Inverted line: logical 0 drives high, logical 1 drives low
                if logical {
                    pin.set_low();
                } else {
                    pin.set_high();
                }
                deadline += duration;
                clock.busy_wait_until(deadline);
            };

            send_bit(false, bit); // start bit
            for i in 0..8 {
                send_bit((byte >> i) & 1 == 1, bit);
            }
            send_bit(true, bit); // stop bit
            send_bit(true, bit / 2); // inter-byte spacing
        });
    }
}
