//! # RC Channels Frame Assembly
//!
//! Builds the complete 26-byte frame transmitted on the wire:
//!
//! | offset | field | value |
//! |--------|-------|-------|
//! | 0      | destination address | 0xEE |
//! | 1      | length | 24 |
//! | 2      | frame type | 0x16 |
//! | 3..25  | payload | 16 x 11-bit packed channels |
//! | 25     | checksum | CRC8 over bytes 2..=24 |

use super::channels::pack_channels;
use super::crc::crc8;
use super::protocol::{
    RcChannels, RcChannelsFrame, CRSF_ADDRESS_TRANSMITTER_MODULE, CRSF_FRAMETYPE_RC_CHANNELS_PACKED,
    CRSF_RC_CHANNELS_FRAME_LENGTH,
};

/// Builds a complete RC channels frame from a channel snapshot.
///
/// Always succeeds: the snapshot is fixed-size and packing truncates rather
/// than rejects. Callers with fewer than 16 live channels pad the snapshot
/// with [`CRSF_CHANNEL_VALUE_CENTER`](super::protocol::CRSF_CHANNEL_VALUE_CENTER)
/// before calling.
///
/// # Examples
///
/// ```
/// use crsf_softtx::crsf::frame::build_rc_channels_frame;
/// use crsf_softtx::crsf::protocol::CRSF_CHANNEL_VALUE_CENTER;
///
/// let frame = build_rc_channels_frame(&[CRSF_CHANNEL_VALUE_CENTER; 16]);
/// assert_eq!(frame.len(), 26);
/// assert_eq!(frame[1], 24);
/// ```
pub fn build_rc_channels_frame(channels: &RcChannels) -> RcChannelsFrame {
    let mut frame = [0u8; 26];

    frame[0] = CRSF_ADDRESS_TRANSMITTER_MODULE;
    frame[1] = CRSF_RC_CHANNELS_FRAME_LENGTH;
    frame[2] = CRSF_FRAMETYPE_RC_CHANNELS_PACKED;
    frame[3..25].copy_from_slice(&pack_channels(channels));
    frame[25] = crc8(&frame[2..25]);

    frame
}
