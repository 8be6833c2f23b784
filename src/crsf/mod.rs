//! # CRSF Protocol Module
//!
//! Encoding for the Crossfire (CRSF) RC channels downlink.
//!
//! This module handles:
//! - RC channels payload packing (16 channels, 11-bit resolution)
//! - Frame assembly (address, length, type, payload, checksum)
//! - CRC8/DVB-S2 checksum calculation

pub mod channels;
pub mod crc;
pub mod frame;
pub mod protocol;
