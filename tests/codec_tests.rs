//! Integration tests for the decimal and colour payload codecs.

use myrtio_ha_light::color::{RGB_PAYLOAD_MAX_LEN, RGBW_PAYLOAD_MAX_LEN};
use myrtio_ha_light::numeric::Numeric;
use myrtio_ha_light::{RgbColor, RgbwColor};

// -----------------------------------------------------------------------------
// Numeric
// -----------------------------------------------------------------------------

#[test]
fn numeric_parses_plain_decimal() {
    let value = Numeric::parse(b"370").unwrap();

    assert_eq!(value.value(), 370);
    assert_eq!(value.as_u16(), Some(370));
    assert_eq!(value.as_u8(), None);
}

#[test]
fn numeric_reports_u8_range() {
    assert_eq!(Numeric::parse(b"0").and_then(|n| n.as_u8()), Some(0));
    assert_eq!(Numeric::parse(b"255").and_then(|n| n.as_u8()), Some(255));
    assert_eq!(Numeric::parse(b"256").and_then(|n| n.as_u8()), None);
    assert_eq!(Numeric::parse(b"-1").and_then(|n| n.as_u8()), None);
}

#[test]
fn numeric_reports_u16_range() {
    assert_eq!(Numeric::parse(b"65535").and_then(|n| n.as_u16()), Some(u16::MAX));
    assert_eq!(Numeric::parse(b"65536").and_then(|n| n.as_u16()), None);
}

#[test]
fn numeric_accepts_negative_values() {
    assert_eq!(Numeric::parse(b"-42").map(|n| n.value()), Some(-42));
}

#[test]
fn numeric_rejects_malformed_input() {
    assert_eq!(Numeric::parse(b""), None);
    assert_eq!(Numeric::parse(b"-"), None);
    assert_eq!(Numeric::parse(b"+1"), None);
    assert_eq!(Numeric::parse(b" 1"), None);
    assert_eq!(Numeric::parse(b"1 "), None);
    assert_eq!(Numeric::parse(b"1.5"), None);
    assert_eq!(Numeric::parse(b"12a"), None);
}

#[test]
fn unsigned_parse_rejects_any_sign() {
    assert_eq!(Numeric::parse_unsigned(b"-0"), None);
    assert_eq!(Numeric::parse_unsigned(b"-5"), None);
    assert_eq!(Numeric::parse_unsigned(b"+5"), None);
    assert_eq!(Numeric::parse_unsigned(b"0").map(|n| n.value()), Some(0));
    assert_eq!(Numeric::parse_unsigned(b"255").and_then(|n| n.as_u8()), Some(255));
}

#[test]
fn numeric_rejects_overflow() {
    assert_eq!(Numeric::parse(b"99999999999999999999"), None);
    assert_eq!(Numeric::parse(b"123456789012345678901"), None);
}

#[test]
fn numeric_formats_without_padding() {
    let text = Numeric::from(7u8).to_str::<3>().unwrap();
    assert_eq!(text.as_str(), "7");

    let text = Numeric::from(65535u16).to_str::<5>().unwrap();
    assert_eq!(text.as_str(), "65535");
}

#[test]
fn numeric_format_fails_when_buffer_too_small() {
    assert_eq!(Numeric::from(1000u16).to_str::<3>(), None);
}

// -----------------------------------------------------------------------------
// RGB
// -----------------------------------------------------------------------------

#[test]
fn rgb_decodes_valid_payload() {
    assert_eq!(
        RgbColor::from_payload(b"255,128,0"),
        Some(RgbColor::new(255, 128, 0))
    );
    assert_eq!(RgbColor::from_payload(b"0,0,0"), Some(RgbColor::new(0, 0, 0)));
}

#[test]
fn rgb_encodes_without_whitespace() {
    let color = RgbColor::new(10, 200, 3);

    assert_eq!(color.to_payload().as_str(), "10,200,3");
    assert_eq!(RgbColor::from_payload(color.to_payload().as_bytes()), Some(color));
}

#[test]
fn rgb_display_matches_payload() {
    assert_eq!(RgbColor::new(1, 2, 3).to_string(), "1,2,3");
}

#[test]
fn rgb_rejects_missing_separator() {
    assert_eq!(RgbColor::from_payload(b"1,2"), None);
    assert_eq!(RgbColor::from_payload(b"123"), None);
}

#[test]
fn rgb_rejects_empty_fields() {
    assert_eq!(RgbColor::from_payload(b""), None);
    assert_eq!(RgbColor::from_payload(b",2,3"), None);
    assert_eq!(RgbColor::from_payload(b"1,,3"), None);
    assert_eq!(RgbColor::from_payload(b"1,2,"), None);
}

#[test]
fn rgb_rejects_out_of_range_channel() {
    assert_eq!(RgbColor::from_payload(b"10,20,300"), None);
    assert_eq!(RgbColor::from_payload(b"256,0,0"), None);
}

#[test]
fn rgb_rejects_extra_fields() {
    // The third field swallows the trailing comma and fails to parse.
    assert_eq!(RgbColor::from_payload(b"1,2,3,4"), None);
}

#[test]
fn rgb_rejects_whitespace_and_signs() {
    assert_eq!(RgbColor::from_payload(b"1, 2,3"), None);
    assert_eq!(RgbColor::from_payload(b"+1,2,3"), None);
    assert_eq!(RgbColor::from_payload(b"-1,2,3"), None);
    assert_eq!(RgbColor::from_payload(b"-0,1,2"), None);
    assert_eq!(RgbColor::from_payload(b"1,-0,2"), None);
    assert_eq!(RgbColor::from_payload(b"1,2,-0"), None);
}

#[test]
fn rgb_rejects_oversized_buffer() {
    let payload = b"0255,255,255";
    assert!(payload.len() > RGB_PAYLOAD_MAX_LEN);
    assert_eq!(RgbColor::from_payload(payload), None);
}

// -----------------------------------------------------------------------------
// RGBW
// -----------------------------------------------------------------------------

#[test]
fn rgbw_decodes_valid_payload() {
    assert_eq!(
        RgbwColor::from_payload(b"255,255,255,255"),
        Some(RgbwColor::new(255, 255, 255, 255))
    );
    assert_eq!(
        RgbwColor::from_payload(b"1,2,3,4"),
        Some(RgbwColor::new(1, 2, 3, 4))
    );
}

#[test]
fn rgbw_encodes_all_channels() {
    let color = RgbwColor::new(0, 10, 100, 255);

    assert_eq!(color.to_payload().as_str(), "0,10,100,255");
    assert_eq!(RgbwColor::from_payload(color.to_payload().as_bytes()), Some(color));
}

#[test]
fn rgbw_rejects_rgb_payload() {
    assert_eq!(RgbwColor::from_payload(b"1,2,3"), None);
}

#[test]
fn rgbw_rejects_malformed_payloads() {
    assert_eq!(RgbwColor::from_payload(b",1,2,3"), None);
    assert_eq!(RgbwColor::from_payload(b"1,2,3,256"), None);
    assert_eq!(RgbwColor::from_payload(b"1,2,3,x"), None);
    assert_eq!(RgbwColor::from_payload(b"1,2,3,-0"), None);
}

#[test]
fn rgbw_rejects_oversized_buffer() {
    let payload = b"255,255,255,2550";
    assert!(payload.len() > RGBW_PAYLOAD_MAX_LEN);
    assert_eq!(RgbwColor::from_payload(payload), None);
}

// -----------------------------------------------------------------------------
// Channel sweep
// -----------------------------------------------------------------------------

const EDGE_VALUES: [u8; 6] = [0, 9, 10, 99, 100, 255];

#[test]
fn rgb_payload_survives_every_channel_value() {
    for value in 0..=u8::MAX {
        for edge in EDGE_VALUES {
            for color in [
                RgbColor::new(value, edge, edge),
                RgbColor::new(edge, value, edge),
                RgbColor::new(edge, edge, value),
            ] {
                let payload = color.to_payload();
                assert!(payload.len() <= RGB_PAYLOAD_MAX_LEN);
                assert_eq!(RgbColor::from_payload(payload.as_bytes()), Some(color));
            }
        }
    }
}

#[test]
fn rgbw_payload_survives_every_channel_value() {
    for value in 0..=u8::MAX {
        for edge in EDGE_VALUES {
            for color in [
                RgbwColor::new(value, edge, edge, edge),
                RgbwColor::new(edge, value, edge, edge),
                RgbwColor::new(edge, edge, value, edge),
                RgbwColor::new(edge, edge, edge, value),
            ] {
                let payload = color.to_payload();
                assert!(payload.len() <= RGBW_PAYLOAD_MAX_LEN);
                assert_eq!(RgbwColor::from_payload(payload.as_bytes()), Some(color));
            }
        }
    }
}
