//! # Transmit Pin Abstraction
//!
//! The signal line is a single general-purpose output. [`TxPin`] is the
//! seam between the bit-level transmitter and whatever actually drives the
//! line: a GPIO on hardware (via [`HalPin`]) or a recording double in tests
//! (via [`SimulatedLine`](super::sim::SimulatedLine)).
//!
//! Driving the pin is infallible by contract: a byte's bit sequence cannot
//! be aborted halfway through, so there is no meaningful way to surface a
//! mid-byte error. Fallible GPIO backends are excluded at the type level.

use core::convert::Infallible;
use embedded_hal::digital::OutputPin;

/// Electrical level of the signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    Low,
    High,
}

/// Output line driven by the transmitter.
pub trait TxPin {
    /// Drives the line to `level`.
    fn set_level(&mut self, level: LineLevel);

    fn set_high(&mut self) {
        self.set_level(LineLevel::High);
    }

    fn set_low(&mut self) {
        self.set_level(LineLevel::Low);
    }
}

/// Adapter exposing an infallible `embedded-hal` output pin as a [`TxPin`].
///
/// # Examples
///
/// ```ignore
/// let gpio = /* platform pin implementing OutputPin<Error = Infallible> */;
/// let pin = HalPin::new(gpio);
/// ```
#[derive(Debug)]
pub struct HalPin<P> {
    inner: P,
}

impl<P> HalPin<P>
where
    P: OutputPin<Error = Infallible>,
{
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Releases the wrapped pin.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P> TxPin for HalPin<P>
where
    P: OutputPin<Error = Infallible>,
{
    fn set_level(&mut self, level: LineLevel) {
        let result = match level {
            LineLevel::High => self.inner.set_high(),
            LineLevel::Low => self.inner.set_low(),
        };
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }
}
