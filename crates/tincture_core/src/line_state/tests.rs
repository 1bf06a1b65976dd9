use super::*;
use proptest::prelude::*;

#[test]
fn layout_matches_documented_bits() {
    let state = LineState::new(LineFlags::COMMENT | LineFlags::CLOSE_BRACE, 3, 8);
    assert_eq!(state.encode(), 0x12 | 3 << 8 | 8 << 16);
}

#[test]
fn default_encodes_to_zero() {
    assert_eq!(LineState::default().encode(), 0);
    assert_eq!(LineState::decode(0), LineState::default());
}

#[test]
fn new_clamps_out_of_range() {
    let state = LineState::new(LineFlags::empty(), 1_000, 100_000);
    assert_eq!(u32::from(state.comment_depth), LineState::MAX_COMMENT_DEPTH);
    assert_eq!(u32::from(state.indent), LineState::MAX_INDENT);
}

#[test]
fn decode_ignores_unknown_flag_bits() {
    let state = LineState::decode(0xC0 | u32::from(LineFlags::NESTED.bits()));
    assert_eq!(state.flags, LineFlags::NESTED);
    assert!(state.is_nested());
    assert!(!state.is_blank());
}

#[test]
fn accessors() {
    let state = LineState::new(
        LineFlags::BLANK | LineFlags::MULTILINE_STRING,
        0,
        0,
    );
    assert!(state.is_blank());
    assert!(state.is_multiline_string());
    assert!(!state.is_comment());
    assert!(!state.starts_with_closer());
}

#[test]
fn heading_level_reads_the_depth_byte() {
    let heading = LineState::new(LineFlags::HEADING, 2, 0);
    assert_eq!(heading.heading_level(), Some(2));
    assert_eq!(LineState::decode(heading.encode()).heading_level(), Some(2));
    assert_eq!(LineState::new(LineFlags::COMMENT, 2, 0).heading_level(), None);
}

#[test]
fn u32_conversions_agree_with_codec() {
    let state = LineState::new(LineFlags::NESTED, 2, 4);
    let raw: u32 = state.into();
    assert_eq!(LineState::from(raw), state);
}

fn arb_flags() -> impl Strategy<Value = LineFlags> {
    any::<u8>().prop_map(LineFlags::from_bits_truncate)
}

proptest! {
    #[test]
    fn roundtrip(flags in arb_flags(), depth in 0u32..=255, indent in 0usize..=65_535) {
        let state = LineState::new(flags, depth, indent);
        prop_assert_eq!(LineState::decode(state.encode()), state);
    }

    #[test]
    fn distinct_states_encode_distinctly(
        a in (arb_flags(), 0u32..=255, 0usize..=65_535),
        b in (arb_flags(), 0u32..=255, 0usize..=65_535),
    ) {
        let sa = LineState::new(a.0, a.1, a.2);
        let sb = LineState::new(b.0, b.1, b.2);
        prop_assert_eq!(sa == sb, sa.encode() == sb.encode());
    }

    #[test]
    fn decode_is_total(raw in any::<u32>()) {
        let state = LineState::decode(raw);
        prop_assert_eq!(state.encode() & !0xC0, raw & !0xC0);
    }
}
