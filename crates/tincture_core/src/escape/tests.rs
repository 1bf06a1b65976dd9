use super::*;

/// Feed `rest` (the bytes after the introducer) and return how many were
/// consumed before the escape ended.
fn consumed(seq: &mut EscapeSequence<u8>, rest: &[u8]) -> usize {
    rest.iter().take_while(|&&b| !seq.at_end(b)).count()
}

#[test]
fn single_character_escape() {
    let mut seq = EscapeSequence::new(0u8);
    seq.start(7, b'n', &EscapeSyntax::UNICODE);
    assert_eq!(consumed(&mut seq, b"abc"), 0);
    assert_eq!(seq.outer(), 7);
}

#[test]
fn unicode_expects_four_digits() {
    let mut seq = EscapeSequence::new(0u8);
    seq.start(1, b'u', &EscapeSyntax::UNICODE);
    assert_eq!(consumed(&mut seq, b"00e9zz"), 4);
}

#[test]
fn unicode_stops_at_non_hex() {
    let mut seq = EscapeSequence::new(0u8);
    seq.start(1, b'u', &EscapeSyntax::UNICODE);
    assert_eq!(consumed(&mut seq, b"0g12"), 1);
}

#[test]
fn hex_byte_only_where_supported() {
    let mut seq = EscapeSequence::new(0u8);
    seq.start(1, b'x', &EscapeSyntax::HEX_AND_BRACED_UNICODE);
    assert_eq!(consumed(&mut seq, b"41ff"), 2);

    seq.start(1, b'x', &EscapeSyntax::UNICODE);
    assert_eq!(consumed(&mut seq, b"41ff"), 0);
}

#[test]
fn braced_unicode_runs_to_closing_brace() {
    let mut seq = EscapeSequence::new(0u8);
    seq.start(1, b'u', &EscapeSyntax::HEX_AND_BRACED_UNICODE);
    seq.open_brace();
    assert!(seq.is_braced());
    // `{1F600}`: brace and digits are consumed, the closer ends it.
    let rest = b"1F600}";
    assert_eq!(consumed(&mut seq, rest), 5);
}

#[test]
fn single_resets_brace() {
    let mut seq = EscapeSequence::new(0u8);
    seq.open_brace();
    seq.start_single(3);
    assert!(!seq.is_braced());
    assert_eq!(consumed(&mut seq, b"$"), 0);
}

#[test]
fn long_unicode_expects_eight_digits() {
    let mut seq = EscapeSequence::new(0u8);
    seq.start(1, b'U', &EscapeSyntax::HEX_AND_LONG_UNICODE);
    assert_eq!(consumed(&mut seq, b"0001F600z"), 8);

    seq.start(1, b'U', &EscapeSyntax::UNICODE);
    assert_eq!(consumed(&mut seq, b"0001F600z"), 0);
}
