use super::*;

#[test]
fn class_table_covers_ascii_groups() {
    assert_eq!(CharClass::of(b' '), CharClass::Space);
    assert_eq!(CharClass::of(b'\t'), CharClass::Space);
    assert_eq!(CharClass::of(b'\n'), CharClass::LineEnd);
    assert_eq!(CharClass::of(b'\r'), CharClass::LineEnd);
    assert_eq!(CharClass::of(b'7'), CharClass::Digit);
    assert_eq!(CharClass::of(b'q'), CharClass::IdentStart);
    assert_eq!(CharClass::of(b'_'), CharClass::IdentStart);
    assert_eq!(CharClass::of(b'{'), CharClass::Punct);
    assert_eq!(CharClass::of(b'$'), CharClass::Punct);
    assert_eq!(CharClass::of(0), CharClass::Control);
    assert_eq!(CharClass::of(0x7F), CharClass::Control);
}

#[test]
fn non_ascii_bytes_are_identifier_bytes() {
    for b in "éλ名".bytes() {
        assert!(is_ident_start(b), "{b:#x}");
        assert!(is_ident_char(b), "{b:#x}");
    }
}

#[test]
fn digits_continue_but_do_not_start_identifiers() {
    assert!(!is_ident_start(b'3'));
    assert!(is_ident_char(b'3'));
}

#[test]
fn number_start() {
    assert!(is_number_start(b'4', b'x'));
    assert!(is_number_start(b'.', b'5'));
    assert!(!is_number_start(b'.', b'a'));
}

#[test]
fn decimal_number_continuation() {
    // 0x1F, 10L
    assert!(is_decimal_number(b'0', b'x', b'1'));
    assert!(is_decimal_number(b'0', b'L', 0));
    // 1.5
    assert!(is_decimal_number(b'1', b'.', b'5'));
    assert!(!is_decimal_number(b'1', b'.', b'a'));
    // 1e-3, 0x1p+4
    assert!(is_decimal_number(b'e', b'-', b'3'));
    assert!(is_decimal_number(b'p', b'+', b'4'));
    assert!(!is_decimal_number(b'1', b'-', b'3'));
}

#[test]
fn graphic_excludes_space_and_control() {
    assert!(is_graphic(b'+'));
    assert!(is_graphic(b'~'));
    assert!(!is_graphic(b' '));
    assert!(!is_graphic(b'\n'));
    assert!(!is_graphic(0x7F));
}

#[test]
fn comment_tag_prev() {
    assert!(is_comment_tag_prev(b' '));
    assert!(is_comment_tag_prev(b'*'));
    assert!(!is_comment_tag_prev(b'a'));
}
