//! Identifier classification.
//!
//! Exact-match word lists decide keywords and well-known class, trait and
//! type names. Whatever is left goes through two cheap positional
//! heuristics:
//!
//! - a name right after a declaring keyword (`class Foo`, `def bar`) takes
//!   the category that keyword announced;
//! - a name followed by `(` is a function, and a *definition* if the byte
//!   before it was an identifier byte or `]` (a return type such as
//!   `int foo(` or `List[T] foo(`).
//!
//! Both are cosmetic guesses and will misfire on some inputs.

use rustc_hash::FxHashSet;

use crate::chars::{is_ident_char, is_ident_start};

/// Exact-match word set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordList {
    words: FxHashSet<Box<[u8]>>,
}

impl WordList {
    /// Build from whitespace-separated words.
    pub fn parse(list: &str) -> Self {
        Self::from_words(list.split_ascii_whitespace())
    }

    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[u8]>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| Box::<[u8]>::from(w.as_ref()))
                .collect(),
        }
    }

    #[inline]
    pub fn contains(&self, word: &[u8]) -> bool {
        self.words.contains(word)
    }
}

/// The word lists a grammar consults, owned by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordSets {
    pub keywords: WordList,
    pub classes: WordList,
    pub traits: WordList,
    pub types: WordList,
}

impl KeywordSets {
    #[must_use]
    pub fn with_keywords(mut self, list: &str) -> Self {
        self.keywords = WordList::parse(list);
        self
    }

    #[must_use]
    pub fn with_classes(mut self, list: &str) -> Self {
        self.classes = WordList::parse(list);
        self
    }

    #[must_use]
    pub fn with_traits(mut self, list: &str) -> Self {
        self.traits = WordList::parse(list);
        self
    }

    #[must_use]
    pub fn with_types(mut self, list: &str) -> Self {
        self.types = WordList::parse(list);
        self
    }
}

/// Category announced by the last keyword, waiting for the next name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pending {
    #[default]
    None,
    Class,
    Trait,
    Enum,
    Function,
    /// Control-flow word: the next name is a value, never a definition.
    Return,
}

impl Pending {
    /// Pending categories that name a declaration.
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            Pending::Class | Pending::Trait | Pending::Enum | Pending::Function
        )
    }
}

/// Result of classifying one identifier run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WordClass {
    Keyword,
    Class,
    Trait,
    Enum,
    Type,
    FunctionDefinition,
    Function,
    /// Nothing matched; stays an identifier.
    Identifier,
}

/// One finished identifier and what surrounds it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IdentifierRun<'a> {
    pub text: &'a [u8],
    /// Byte right after the run.
    pub next: u8,
    /// First non-blank byte after the run on the same line, `0` if none.
    pub line_next: u8,
    /// Last visible byte before the run started.
    pub before: u8,
}

/// Maps a keyword to the category it announces.
pub type Introducer = fn(&[u8]) -> Pending;

/// Keyword lookups plus the positional heuristics.
#[derive(Clone, Debug)]
pub struct KeywordClassifier<'k> {
    sets: &'k KeywordSets,
    introducer: Introducer,
}

impl<'k> KeywordClassifier<'k> {
    pub fn new(sets: &'k KeywordSets, introducer: Introducer) -> Self {
        Self { sets, introducer }
    }

    /// Classify `run`, updating `pending` for the next identifier.
    pub fn classify(&self, run: &IdentifierRun<'_>, pending: &mut Pending) -> WordClass {
        if self.sets.keywords.contains(run.text) {
            *pending = (self.introducer)(run.text);
            if pending.is_declaration() && !is_ident_start(run.line_next) {
                *pending = Pending::None;
            }
            return WordClass::Keyword;
        }

        let class = if self.sets.classes.contains(run.text) {
            WordClass::Class
        } else if self.sets.traits.contains(run.text) {
            WordClass::Trait
        } else if self.sets.types.contains(run.text) {
            WordClass::Type
        } else if run.next == b'.' {
            // Qualifier of a longer path; the pending category waits for the
            // last segment.
            return WordClass::Identifier;
        } else if let Some(class) = pending_class(*pending) {
            class
        } else if run.line_next == b'(' {
            if *pending != Pending::Return && (is_ident_char(run.before) || run.before == b']') {
                WordClass::FunctionDefinition
            } else {
                WordClass::Function
            }
        } else {
            WordClass::Identifier
        };

        if run.next != b'.' {
            *pending = Pending::None;
        }
        class
    }
}

fn pending_class(pending: Pending) -> Option<WordClass> {
    match pending {
        Pending::Class => Some(WordClass::Class),
        Pending::Trait => Some(WordClass::Trait),
        Pending::Enum => Some(WordClass::Enum),
        Pending::Function => Some(WordClass::FunctionDefinition),
        Pending::None | Pending::Return => None,
    }
}
