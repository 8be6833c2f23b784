//! End-to-end wire tests.
//!
//! Build a frame from a channel snapshot, transmit it through the software
//! UART on virtual time, then play the receiver: decode the recorded edge
//! stream back into bytes and check everything a real endpoint would.

use std::time::Duration;

use crsf_softtx::channels::ChannelStore;
use crsf_softtx::crsf::channels::unpack_channels;
use crsf_softtx::crsf::crc::crc8;
use crsf_softtx::crsf::frame::build_rc_channels_frame;
use crsf_softtx::crsf::protocol::{
    CRSF_ADDRESS_TRANSMITTER_MODULE, CRSF_FRAMETYPE_RC_CHANNELS_PACKED,
    CRSF_RC_CHANNELS_FRAME_LENGTH,
};
use crsf_softtx::link::{RcLink, DEFAULT_UPDATE_INTERVAL};
use crsf_softtx::softuart::clock::{Clock, ManualClock};
use crsf_softtx::softuart::pin::LineLevel;
use crsf_softtx::softuart::section::UnmaskedSection;
use crsf_softtx::softuart::sim::{decode_uart, SimulatedLine};
use crsf_softtx::softuart::{bit_period, SoftUartTx, DEFAULT_BAUD_RATE, SYNC_PREAMBLE};

type VirtualLink = RcLink<SimulatedLine<ManualClock>, ManualClock, UnmaskedSection>;

fn virtual_link(
    store: ChannelStore,
    preamble_gap: Option<Duration>,
) -> (ManualClock, SimulatedLine<ManualClock>, VirtualLink) {
    let clock = ManualClock::new();
    let line = SimulatedLine::new(clock.clone());
    let uart = SoftUartTx::new(
        line.clone(),
        clock.clone(),
        UnmaskedSection::new(),
        DEFAULT_BAUD_RATE,
    )
    .with_preamble(preamble_gap);
    let link = RcLink::new(uart, clock.clone(), store, DEFAULT_UPDATE_INTERVAL);
    (clock, line, link)
}

#[test]
fn full_frame_survives_the_wire() {
    let store = ChannelStore::new();
    store.set(0, 172);
    store.set(1, 1811);
    store.set(2, 992);
    store.set(3, 1500);
    let (_, line, mut link) = virtual_link(store.clone(), Some(Duration::from_micros(100)));

    assert!(link.tick());

    let decoded = decode_uart(&line.events(), DEFAULT_BAUD_RATE);
    assert_eq!(decoded.len(), SYNC_PREAMBLE.len() + 26);
    assert_eq!(decoded[..4], SYNC_PREAMBLE);

    let frame = &decoded[4..];
    assert_eq!(frame, &build_rc_channels_frame(&store.snapshot()));
    assert_eq!(frame[0], CRSF_ADDRESS_TRANSMITTER_MODULE);
    assert_eq!(frame[1], CRSF_RC_CHANNELS_FRAME_LENGTH);
    assert_eq!(frame[2], CRSF_FRAMETYPE_RC_CHANNELS_PACKED);
    // The checksum the receiver recomputes over type + payload matches
    assert_eq!(frame[25], crc8(&frame[2..25]));
}

#[test]
fn receiver_recovers_channel_values() {
    let store = ChannelStore::new();
    for (i, value) in [300u16, 600, 900, 1200, 1500, 1800, 172, 1811]
        .iter()
        .enumerate()
    {
        store.set(i, *value);
    }
    let (_, line, mut link) = virtual_link(store.clone(), None);

    assert!(link.tick());

    let decoded = decode_uart(&line.events(), DEFAULT_BAUD_RATE);
    assert_eq!(decoded.len(), 26);

    let mut payload = [0u8; 22];
    payload.copy_from_slice(&decoded[3..25]);
    assert_eq!(unpack_channels(&payload), store.snapshot());
}

#[test]
fn cadence_is_fifty_hz_under_fast_polling() {
    let (clock, _, mut link) = virtual_link(ChannelStore::new(), Some(Duration::from_micros(100)));
    let mut sent = 0;

    for ms in 0..200u64 {
        clock.advance_to(Duration::from_millis(ms));
        if link.tick() {
            sent += 1;
        }
    }

    assert_eq!(sent, 10);
    assert_eq!(link.frames_sent(), 10);
}

#[test]
fn line_is_idle_low_after_every_frame() {
    let (clock, line, mut link) = virtual_link(ChannelStore::new(), Some(Duration::from_micros(100)));

    for ms in (0..100u64).step_by(20) {
        clock.advance_to(Duration::from_millis(ms));
        assert!(link.tick());
        assert_eq!(line.level(), LineLevel::Low);
    }
}

#[test]
fn preamble_can_be_disabled() {
    let (_, line, mut link) = virtual_link(ChannelStore::new(), None);

    assert!(link.tick());

    let decoded = decode_uart(&line.events(), DEFAULT_BAUD_RATE);
    assert_eq!(decoded.len(), 26);
    assert_eq!(decoded[0], CRSF_ADDRESS_TRANSMITTER_MODULE);
}

#[test]
fn every_edge_lands_on_a_half_bit_boundary() {
    // With the preamble off, every transition falls a whole number of bit
    // slots past some byte start, and byte starts are spaced 10.5 bits
    // apart; all edge offsets are therefore half-bit multiples.
    let (clock, line, mut link) = virtual_link(ChannelStore::new(), None);
    let half_bit = bit_period(DEFAULT_BAUD_RATE).as_nanos() / 2;
    let t0 = clock.now();

    assert!(link.tick());

    for event in line.events() {
        let offset = (event.at - t0).as_nanos();
        assert_eq!(
            offset % half_bit,
            0,
            "edge at +{} ns is off the {} ns grid",
            offset,
            half_bit
        );
    }
}
