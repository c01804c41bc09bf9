//! Alphabets: the symbol sets identifiers are drawn from.
//!
//! Any type implementing [`CustomAlphabet`] can be validated into an
//! [`Alphabet`]. Validation checks, in order: at least one letter, at most
//! 255 letters, and coherence (the alphabet permits its own letters).

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest letters a valid alphabet may hold.
pub const MIN_LETTERS: usize = 1;
/// Most letters a valid alphabet may hold.
pub const MAX_LETTERS: usize = 255;

/// Errors that can occur while validating an alphabet.
///
/// Every variant carries the letters that were rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Alphabet too small: must contain at least 1 letter")]
    TooSmall { letters: String },
    #[error("Alphabet too large: {count} letters, at most 255 allowed")]
    TooLarge { letters: String, count: usize },
    #[error("Incoherent alphabet: {letters:?} does not permit its own letters")]
    Incoherent { letters: String },
}

impl AlphabetError {
    /// The offending letters.
    pub fn letters(&self) -> &str {
        match self {
            Self::TooSmall { letters }
            | Self::TooLarge { letters, .. }
            | Self::Incoherent { letters } => letters,
        }
    }

    pub fn is_too_small(&self) -> bool {
        matches!(self, Self::TooSmall { .. })
    }

    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::TooLarge { .. })
    }

    pub fn is_incoherent(&self) -> bool {
        matches!(self, Self::Incoherent { .. })
    }
}

/// A set of letters together with a membership test.
///
/// Implement this to bring your own alphabet. An implementation is coherent
/// when `will_permit(letters())` holds; [`Alphabet::validate`] rejects any
/// that are not.
pub trait CustomAlphabet {
    /// The letters identifiers are built from, in order.
    fn letters(&self) -> &str;

    /// Whether every character of `value` belongs to this alphabet.
    fn will_permit(&self, value: &str) -> bool;
}

impl CustomAlphabet for str {
    fn letters(&self) -> &str {
        self
    }

    fn will_permit(&self, value: &str) -> bool {
        value.chars().all(|c| self.contains(c))
    }
}

impl CustomAlphabet for String {
    fn letters(&self) -> &str {
        self
    }

    fn will_permit(&self, value: &str) -> bool {
        self.as_str().will_permit(value)
    }
}

/// A validated, immutable alphabet.
///
/// Cloning is cheap: clones share the same letters.
#[derive(Clone)]
pub struct Alphabet {
    letters: Arc<str>,
    symbols: Arc<[char]>,
}

impl Alphabet {
    /// Validate plain letters as an alphabet.
    pub fn new(letters: &str) -> Result<Self, AlphabetError> {
        Self::validate(letters)
    }

    /// Validate any [`CustomAlphabet`].
    ///
    /// Checks run in order (too small, too large, incoherent) and the first
    /// failure is reported.
    pub fn validate<A: CustomAlphabet + ?Sized>(source: &A) -> Result<Self, AlphabetError> {
        let letters = source.letters();
        let count = letters.chars().count();

        let error = if count < MIN_LETTERS {
            AlphabetError::TooSmall {
                letters: letters.to_string(),
            }
        } else if count > MAX_LETTERS {
            AlphabetError::TooLarge {
                letters: letters.to_string(),
                count,
            }
        } else if !source.will_permit(letters) {
            AlphabetError::Incoherent {
                letters: letters.to_string(),
            }
        } else {
            return Ok(Self::from_trusted(letters));
        };

        tracing::debug!(count, %error, "rejected alphabet");
        Err(error)
    }

    /// Like [`Alphabet::new`], but panics on invalid letters.
    ///
    /// # Panics
    ///
    /// Panics with the [`AlphabetError`] message when validation fails.
    #[track_caller]
    pub fn new_strict(letters: &str) -> Self {
        Self::validate_strict(letters)
    }

    /// Like [`Alphabet::validate`], but panics on an invalid alphabet.
    ///
    /// # Panics
    ///
    /// Panics with the [`AlphabetError`] message when validation fails.
    #[track_caller]
    pub fn validate_strict<A: CustomAlphabet + ?Sized>(source: &A) -> Self {
        match Self::validate(source) {
            Ok(alphabet) => alphabet,
            Err(error) => panic!("{error} (letters: {:?})", error.letters()),
        }
    }

    pub(crate) fn from_trusted(letters: &str) -> Self {
        Self {
            letters: Arc::from(letters),
            symbols: letters.chars().collect(),
        }
    }

    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// Number of letters (duplicates included).
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; a validated alphabet has at least one letter.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Whether every character of `value` is one of this alphabet's letters.
    pub fn will_permit(&self, value: &str) -> bool {
        value.chars().all(|c| self.contains(c))
    }

    pub(crate) fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl CustomAlphabet for Alphabet {
    fn letters(&self) -> &str {
        Alphabet::letters(self)
    }

    fn will_permit(&self, value: &str) -> bool {
        Alphabet::will_permit(self, value)
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.letters, &other.letters) || self.letters == other.letters
    }
}

impl Eq for Alphabet {}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&&*self.letters).finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.letters)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        KnownAlphabet::UrlSafe.alphabet().clone()
    }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Alphabet {
    type Error = AlphabetError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Predefined alphabets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownAlphabet {
    /// `0-9`, `A-Z`, `a-z`.
    Alphanumeric,
    HexadecimalLowercase,
    HexadecimalUppercase,
    Lowercase,
    /// Letters and digits minus those easily mistaken for one another.
    NoLookalikes,
    /// [`KnownAlphabet::NoLookalikes`] without vowels, so no words appear.
    NoLookalikesSafe,
    Numbers,
    Uppercase,
    /// `A-Z`, `a-z`, `0-9`, `_` and `-`: 64 letters.
    #[default]
    UrlSafe,
}

impl KnownAlphabet {
    pub const ALL: [Self; 9] = [
        Self::Alphanumeric,
        Self::HexadecimalLowercase,
        Self::HexadecimalUppercase,
        Self::Lowercase,
        Self::NoLookalikes,
        Self::NoLookalikesSafe,
        Self::Numbers,
        Self::Uppercase,
        Self::UrlSafe,
    ];

    pub fn letters(self) -> &'static str {
        match self {
            Self::Alphanumeric => "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
            Self::HexadecimalLowercase => "0123456789abcdef",
            Self::HexadecimalUppercase => "0123456789ABCDEF",
            Self::Lowercase => "abcdefghijklmnopqrstuvwxyz",
            Self::NoLookalikes => "346789ABCDEFGHJKLMNPQRTUVWXYabcdefghijkmnpqrtwxyz",
            Self::NoLookalikesSafe => "6789BCDFGHJKLMNPQRTWbcdfghjkmnpqrtwz",
            Self::Numbers => "0123456789",
            Self::Uppercase => "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            Self::UrlSafe => "_-0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alphanumeric => "alphanumeric",
            Self::HexadecimalLowercase => "hexadecimal_lowercase",
            Self::HexadecimalUppercase => "hexadecimal_uppercase",
            Self::Lowercase => "lowercase",
            Self::NoLookalikes => "no_lookalikes",
            Self::NoLookalikesSafe => "no_lookalikes_safe",
            Self::Numbers => "numbers",
            Self::Uppercase => "uppercase",
            Self::UrlSafe => "url_safe",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|known| known.as_str() == s)
    }

    /// The shared, validated alphabet for this preset.
    pub fn alphabet(self) -> &'static Alphabet {
        &KNOWN_ALPHABETS[self.index()]
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for KnownAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static KNOWN_ALPHABETS: Lazy<[Alphabet; 9]> =
    Lazy::new(|| KnownAlphabet::ALL.map(|known| Alphabet::from_trusted(known.letters())));
