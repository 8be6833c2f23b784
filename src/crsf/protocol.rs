//! # CRSF Protocol Constants and Types
//!
//! Wire-level definitions for the RC-channels downlink.
//!
//! The transmitter emits exactly one frame kind (RC channels packed), so
//! only the constants that frame needs live here. All of them must match
//! the receiving endpoint byte-for-byte.

/// Destination address of the external transmitter module (frame byte 0).
pub const CRSF_ADDRESS_TRANSMITTER_MODULE: u8 = 0xEE;

/// Destination address of a CRSF receiver.
///
/// Not used by the default frame but kept alongside the module address so
/// integrators targeting a receiver directly have the right constant.
pub const CRSF_ADDRESS_RECEIVER: u8 = 0xEC;

/// RC Channels Packed frame type (frame byte 2).
pub const CRSF_FRAMETYPE_RC_CHANNELS_PACKED: u8 = 0x16;

/// Length byte for the RC channels frame: type + payload + crc = 1 + 22 + 1.
pub const CRSF_RC_CHANNELS_FRAME_LENGTH: u8 = 24;

/// Total RC channels frame size: address + length + type + payload + crc.
pub const CRSF_FRAME_SIZE: usize = 26;

/// RC channels payload size (16 channels x 11 bits = 176 bits = 22 bytes).
pub const CRSF_RC_CHANNELS_PAYLOAD_SIZE: usize = 22;

/// Number of RC channels carried per frame.
pub const CRSF_NUM_CHANNELS: usize = 16;

/// Lowest channel value the protocol defines (-100% stick).
pub const CRSF_CHANNEL_VALUE_MIN: u16 = 172;

/// Highest channel value the protocol defines (+100% stick).
pub const CRSF_CHANNEL_VALUE_MAX: u16 = 1811;

/// Center/neutral channel value.
pub const CRSF_CHANNEL_VALUE_CENTER: u16 = (CRSF_CHANNEL_VALUE_MIN + CRSF_CHANNEL_VALUE_MAX) / 2;

/// Mask selecting the 11 bits of a channel value that go on the wire.
pub const CRSF_CHANNEL_VALUE_MASK: u16 = 0x07FF;

/// One RC channel snapshot: 16 values, 11 significant bits each.
pub type RcChannels = [u16; CRSF_NUM_CHANNELS];

/// Packed RC channels payload.
pub type ChannelsPayload = [u8; CRSF_RC_CHANNELS_PAYLOAD_SIZE];

/// Complete RC channels frame as transmitted.
pub type RcChannelsFrame = [u8; CRSF_FRAME_SIZE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_value_range() {
        assert_eq!(CRSF_CHANNEL_VALUE_MIN, 172);
        assert_eq!(CRSF_CHANNEL_VALUE_MAX, 1811);
        assert_eq!(CRSF_CHANNEL_VALUE_CENTER, 991);
    }

    #[test]
    fn test_frame_constants() {
        assert_eq!(CRSF_ADDRESS_TRANSMITTER_MODULE, 0xEE);
        assert_eq!(CRSF_FRAMETYPE_RC_CHANNELS_PACKED, 0x16);
        assert_eq!(CRSF_RC_CHANNELS_FRAME_LENGTH, 24);
        assert_eq!(CRSF_FRAME_SIZE, 26);
    }

    #[test]
    fn test_payload_holds_all_channel_bits() {
        // 16 channels of 11 bits fill the payload exactly, no padding
        assert_eq!(CRSF_NUM_CHANNELS * 11, CRSF_RC_CHANNELS_PAYLOAD_SIZE * 8);
    }
}
