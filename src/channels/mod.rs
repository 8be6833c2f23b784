//! # Channel Store
//!
//! Holds the 16 RC channel values the transmitter snapshots once per frame.
//!
//! This module handles:
//! - Center initialization and reset of all channels
//! - Clamping written values into the protocol range
//! - Consistent snapshots (no torn reads when a producer thread writes
//!   while the transmit thread reads)
//! - Range mapping from raw input scales to channel values
//!
//! The store is the producer side of the range contract: the packer
//! truncates blindly, so everything that enters the store is clamped into
//! [172, 1811] here.

use std::sync::{Arc, RwLock};

use crate::crsf::protocol::{
    RcChannels, CRSF_CHANNEL_VALUE_CENTER, CRSF_CHANNEL_VALUE_MAX, CRSF_CHANNEL_VALUE_MIN,
    CRSF_NUM_CHANNELS,
};

/// Shared, internally consistent source of RC channel values.
///
/// Clones share the same underlying channels, so a producer (input mapping,
/// a demo sweep, a failsafe handler) and the transmit loop can hold handles
/// to one store.
///
/// # Examples
///
/// ```
/// use crsf_softtx::channels::ChannelStore;
///
/// let store = ChannelStore::new();
/// store.set(0, 1500);
/// assert_eq!(store.get(0), 1500);
/// assert_eq!(store.get(1), 991); // untouched channels stay centered
/// ```
#[derive(Debug, Clone)]
pub struct ChannelStore {
    channels: Arc<RwLock<RcChannels>>,
}

impl ChannelStore {
    /// Creates a store with every channel at the center value.
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new([CRSF_CHANNEL_VALUE_CENTER; CRSF_NUM_CHANNELS])),
        }
    }

    /// Sets channel `index` to `value`, clamped into the protocol range.
    /// Writes to nonexistent channels are ignored.
    pub fn set(&self, index: usize, value: u16) {
        if index >= CRSF_NUM_CHANNELS {
            return;
        }
        let mut channels = self.channels.write().unwrap();
        channels[index] = value.clamp(CRSF_CHANNEL_VALUE_MIN, CRSF_CHANNEL_VALUE_MAX);
    }

    /// Current value of channel `index`; the center value for nonexistent
    /// channels.
    pub fn get(&self, index: usize) -> u16 {
        let channels = self.channels.read().unwrap();
        channels
            .get(index)
            .copied()
            .unwrap_or(CRSF_CHANNEL_VALUE_CENTER)
    }

    /// Returns a consistent copy of all 16 channels.
    pub fn snapshot(&self) -> RcChannels {
        *self.channels.read().unwrap()
    }

    /// Returns every channel to the center position.
    pub fn reset(&self) {
        let mut channels = self.channels.write().unwrap();
        *channels = [CRSF_CHANNEL_VALUE_CENTER; CRSF_NUM_CHANNELS];
    }
}

impl Default for ChannelStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps `value` from one range to another, clamping at both ends.
///
/// Producers use this to turn raw input scales (stick axes, sweep
/// counters) into channel values:
///
/// ```
/// use crsf_softtx::channels::map_value_clamped;
///
/// // 8-bit axis to the CRSF channel range
/// assert_eq!(map_value_clamped(0, 0, 255, 172, 1811), 172);
/// assert_eq!(map_value_clamped(255, 0, 255, 172, 1811), 1811);
/// ```
pub fn map_value_clamped(value: i32, from_min: i32, from_max: i32, to_min: i32, to_max: i32) -> i32 {
    let value = value.clamp(from_min, from_max);
    let mapped = (value - from_min) * (to_max - to_min) / (from_max - from_min) + to_min;
    // The target range may run in either direction
    let (lo, hi) = if to_min <= to_max {
        (to_min, to_max)
    } else {
        (to_max, to_min)
    };
    mapped.clamp(lo, hi)
}
