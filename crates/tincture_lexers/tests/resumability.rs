//! Property-based tests for incremental rescans.
//!
//! A document is generated from fragments that exercise every nested
//! construct the grammars know about, highlighted once in a single pass, and
//! then highlighted again in two pieces: a raw scan up to some line, followed
//! by a restyle from that line. Both runs must agree on every byte's category
//! and every line's packed state.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tincture_core::{Grammar, Highlighter, LineIndex};
use tincture_lexers::{
    scala, toml, zig, Interpolation, ScalaConfig, ScalaLexer, TomlLexer, ZigLexer,
};

// -- Document strategies --

const SCALA_FRAGMENTS: &[&str] = &[
    "val", "def", "class", "end", "return", " ", "  ", "\t", "\n", "\n", "\n", "x", "Foo", "f(",
    "(", ")", "{", "}", "[", "]", "=", "<", ">", "+", "++", ".", ":", "1.5", "0x1F", "\"",
    "\"\"\"", "s\"", "s\"\"\"", "${", "$x", "$$", "\\n", "\\u0041", "/*", "/**", "*/", "//", "@a",
    "'c'", "'sym", "`b`", "<a>", "</a>", "<b/>", "<c d=\"e\">", "#!",
];

const ZIG_FRAGMENTS: &[&str] = &[
    "const", "fn", "try", "u8", " ", "    ", "\n", "\n", "\n", "x", "f(", "(", ")", "{", "}",
    "{{", "}}", "{d}", "{0:>8}", "{s", ":", "=", ";", "1.5", "\"", "'", "\\\\", "\\x41",
    "\\u{1F}", "//", "///", "//!", "@import", ".",
];

const TOML_FRAGMENTS: &[&str] = &[
    "[", "[[", "]", "]]", "a", "b-c", "x.y", "=", ",", ".", "-", " ", "\n", "\n", "\n", "{", "}",
    "\"", "'", "\"\"\"", "'''", "\\u00E9", "\\n", "#", "1", "1979-05-27", "07:32", "true", "+inf",
    "\u{e9}",
];

fn document(fragments: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(fragments), 0..60).prop_map(|parts| parts.concat())
}

// -- Helpers --

/// Split at every line and compare against a single pass.
fn assert_resumable<G, F>(text: &str, make: F)
where
    G: Grammar,
    F: Fn() -> G,
{
    let bytes = text.as_bytes();
    let mut reference = Highlighter::new(make());
    reference.highlight(bytes).unwrap();

    let lines = LineIndex::new(bytes);
    for split_line in 1..lines.line_count() {
        let split = lines.line_start(split_line).unwrap();
        let mut split_pass = Highlighter::new(make());
        split_pass.scan_range(bytes, 0, split).unwrap();
        split_pass.restyle(bytes, split_line).unwrap();

        assert_eq!(
            split_pass.styles(),
            reference.styles(),
            "categories differ when split at line {split_line} of {text:?}"
        );
        assert_eq!(
            split_pass.line_states(),
            reference.line_states(),
            "line states differ when split at line {split_line} of {text:?}"
        );
    }
}

fn scala_words() -> &'static tincture_core::KeywordSets {
    Box::leak(Box::new(scala::default_keywords()))
}

fn zig_words() -> &'static tincture_core::KeywordSets {
    Box::leak(Box::new(zig::default_keywords()))
}

fn toml_words() -> &'static tincture_core::KeywordSets {
    Box::leak(Box::new(toml::default_keywords()))
}

// -- Fixed documents --

#[test]
fn scala_interpolation_across_lines() {
    let words = scala_words();
    assert_resumable("val a = s\"\"\"x ${\n  f(1) +\n  s\"${y}\"\n} z\"\"\"\nb", || {
        ScalaLexer::new(words)
    });
}

#[test]
fn scala_markup_across_lines() {
    let words = scala_words();
    assert_resumable(
        "val x =\n  <a href={h}>\n    text {\n      y\n    }\n  </a>\nz < 1",
        || ScalaLexer::new(words),
    );
}

#[test]
fn scala_nested_comments_across_lines() {
    let words = scala_words();
    assert_resumable("/* a\n /* b\n */ c\n */ d\n// e\nf", || {
        ScalaLexer::new(words)
    });
}

#[test]
fn zig_mixed_document() {
    let words = zig_words();
    assert_resumable(
        "//! top\nconst std = @import(\"std\");\n\npub fn main() void {\n    const s =\n        \\\\ {d} a\n    ;\n    std.debug.print(\"{s:>4}\\n\", .{s});\n}\n",
        || ZigLexer::new(words),
    );
}

#[test]
fn toml_arrays_and_strings_across_lines() {
    let words = toml_words();
    assert_resumable(
        "# c\n[a.b]\nx = [\n  1,\n  { k = \"\"\"\n v\n\"\"\" },\n]\ny.z = 'q'\n\n[[c]]\n",
        || TomlLexer::new(words),
    );
}

#[test]
fn highlighting_is_deterministic() {
    let words = scala_words();
    let text = "s\"${<a>{1}</a>}\" /* x */".as_bytes();
    let mut first = Highlighter::new(ScalaLexer::new(words));
    let mut second = Highlighter::new(ScalaLexer::new(words));
    first.highlight(text).unwrap();
    second.highlight(text).unwrap();
    second.highlight(text).unwrap();
    assert_eq!(first.styles(), second.styles());
    assert_eq!(first.line_states(), second.line_states());
}

#[test]
fn empty_document() {
    let words = scala_words();
    let mut h = Highlighter::new(ScalaLexer::new(words));
    let outcome = h.highlight(b"").unwrap();
    assert!(outcome.runs.is_empty());
    assert!(outcome.lines.is_empty());
    assert!(h.fold_levels(b"").iter().all(|f| f.start == 0));
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scala_split_scans_match_single_pass(text in document(SCALA_FRAGMENTS)) {
        let words = scala_words();
        assert_resumable(&text, || ScalaLexer::new(words));
    }

    #[test]
    fn scala_always_interpolating_split_scans_match(text in document(SCALA_FRAGMENTS)) {
        let words = scala_words();
        let config = ScalaConfig::default()
            .with_interpolation(Interpolation::Always)
            .with_max_context_depth(2);
        assert_resumable(&text, || ScalaLexer::new(words).with_config(config.clone()));
    }

    #[test]
    fn zig_split_scans_match_single_pass(text in document(ZIG_FRAGMENTS)) {
        let words = zig_words();
        assert_resumable(&text, || ZigLexer::new(words));
    }

    #[test]
    fn toml_split_scans_match_single_pass(text in document(TOML_FRAGMENTS)) {
        let words = toml_words();
        assert_resumable(&text, || TomlLexer::new(words));
    }

    #[test]
    fn toml_outline_covers_every_line(text in document(TOML_FRAGMENTS)) {
        let words = toml_words();
        let mut h = Highlighter::new(TomlLexer::new(words));
        h.highlight(text.as_bytes()).unwrap();
        let levels = h.fold_levels(text.as_bytes());
        prop_assert_eq!(levels.len(), LineIndex::new(text.as_bytes()).line_count());
    }

    #[test]
    fn every_byte_gets_a_category(text in document(SCALA_FRAGMENTS)) {
        let words = scala_words();
        let mut h = Highlighter::new(ScalaLexer::new(words));
        let outcome = h.highlight(text.as_bytes()).unwrap();
        let covered: usize = outcome.runs.iter().map(|run| run.len).sum();
        prop_assert_eq!(covered, text.len());
        for pair in outcome.runs.windows(2) {
            prop_assert_eq!(pair[0].end(), pair[1].start);
            prop_assert!(pair[0].style != pair[1].style);
        }
    }

    #[test]
    fn fold_levels_cover_every_line(text in document(ZIG_FRAGMENTS)) {
        let words = zig_words();
        let mut h = Highlighter::new(ZigLexer::new(words));
        h.highlight(text.as_bytes()).unwrap();
        let levels = h.fold_levels(text.as_bytes());
        prop_assert_eq!(levels.len(), LineIndex::new(text.as_bytes()).line_count());
    }
}
