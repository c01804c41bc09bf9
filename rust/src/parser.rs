//! Turning untrusted strings back into [`NanoId`] values.
//!
//! Parsing never fails loudly: input that does not fit the alphabet (or the
//! expected size) simply yields `None`.

use once_cell::sync::Lazy;

use crate::alphabet::{Alphabet, AlphabetError, CustomAlphabet, KnownAlphabet};
use crate::nanoid::NanoId;
use crate::options::NanoIdOptions;

/// Checks candidate strings against an alphabet and, optionally, a size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NanoIdParser {
    alphabet: Alphabet,
    size: Option<usize>,
}

impl NanoIdParser {
    /// A parser accepting input of any length drawn from `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            size: None,
        }
    }

    /// Validate `source` and build a parser from it.
    pub fn of<A: CustomAlphabet + ?Sized>(source: &A) -> Result<Self, AlphabetError> {
        Alphabet::validate(source).map(Self::new)
    }

    /// A parser that also requires non-empty input to be exactly
    /// `options.size()` letters long.
    pub fn from_options(options: &NanoIdOptions) -> Self {
        Self {
            alphabet: options.alphabet().clone(),
            size: Some(options.size()),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The required length, if this parser was built from options.
    pub fn size(&self) -> Option<usize> {
        self.size
    }

    /// Parse `input`, treating the empty string as the empty id.
    pub fn try_parse(&self, input: &str) -> Option<NanoId> {
        if input.is_empty() {
            return Some(NanoId::EMPTY);
        }
        self.parse_letters(input)
    }

    /// Parse `input`, rejecting the empty string.
    pub fn try_parse_non_empty(&self, input: &str) -> Option<NanoId> {
        if input.is_empty() {
            tracing::trace!("rejected empty input");
            return None;
        }
        self.parse_letters(input)
    }

    fn parse_letters(&self, input: &str) -> Option<NanoId> {
        if let Some(size) = self.size {
            let len = input.chars().count();
            if len != size {
                tracing::trace!(len, size, "rejected input of wrong length");
                return None;
            }
        }
        if !self.alphabet.will_permit(input) {
            tracing::trace!(input, "rejected input outside alphabet");
            return None;
        }
        Some(NanoId::from_trusted(input.to_string()))
    }
}

impl From<&NanoIdOptions> for NanoIdParser {
    fn from(options: &NanoIdOptions) -> Self {
        Self::from_options(options)
    }
}

impl From<NanoIdOptions> for NanoIdParser {
    fn from(options: NanoIdOptions) -> Self {
        let (alphabet, size) = options.into_parts();
        Self {
            alphabet,
            size: Some(size),
        }
    }
}

impl From<Alphabet> for NanoIdParser {
    fn from(alphabet: Alphabet) -> Self {
        Self::new(alphabet)
    }
}

impl KnownAlphabet {
    /// Shared parser for this preset, accepting any length.
    pub fn parser(self) -> &'static NanoIdParser {
        &KNOWN_PARSERS[self.index()]
    }
}

static KNOWN_PARSERS: Lazy<[NanoIdParser; 9]> =
    Lazy::new(|| KnownAlphabet::ALL.map(|known| NanoIdParser::new(known.alphabet().clone())));
