//! Highlighting grammars for the `tincture_core` engine.
//!
//! Each grammar pairs a category enum with a lexer that borrows its word
//! lists:
//!
//! ```ignore
//! let words = tincture_lexers::scala::default_keywords();
//! let mut highlighter = Highlighter::new(ScalaLexer::new(&words));
//! highlighter.highlight(source)?;
//! ```

pub mod placeholder;
pub mod scala;
pub mod toml;
pub mod zig;

pub use scala::{Interpolation, ScalaConfig, ScalaLexer, ScalaStyle};
pub use toml::{TomlLexer, TomlStyle};
pub use zig::{ZigConfig, ZigLexer, ZigStyle};
