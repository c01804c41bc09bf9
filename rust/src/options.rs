//! Validated (alphabet, size) pairs for repeated generation.

use once_cell::sync::Lazy;

use crate::alphabet::{Alphabet, AlphabetError, CustomAlphabet, KnownAlphabet};
use crate::nanoid::{DEFAULT_SIZE, NanoId};

/// Clamp a signed size to zero.
pub(crate) fn normalize_size(size: i64) -> usize {
    usize::try_from(size.max(0)).unwrap_or(usize::MAX)
}

/// An alphabet paired with the number of letters to generate.
///
/// The alphabet is validated once, when the options are created; resizing
/// reuses it as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NanoIdOptions {
    alphabet: Alphabet,
    size: usize,
}

impl NanoIdOptions {
    /// Pair an already validated alphabet with a size. Negative sizes
    /// become zero.
    pub fn new(alphabet: Alphabet, size: i64) -> Self {
        Self::sized(alphabet, normalize_size(size))
    }

    /// Validate `source` and pair it with a size.
    pub fn of<A: CustomAlphabet + ?Sized>(source: &A, size: i64) -> Result<Self, AlphabetError> {
        Ok(Self::new(Alphabet::validate(source)?, size))
    }

    fn sized(alphabet: Alphabet, size: usize) -> Self {
        Self { alphabet, size }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Same alphabet, new size.
    pub fn resize(&self, size: i64) -> Self {
        Self::sized(self.alphabet.clone(), normalize_size(size))
    }

    pub fn into_parts(self) -> (Alphabet, usize) {
        (self.alphabet, self.size)
    }

    pub fn generate(&self) -> NanoId {
        NanoId::generate_with(self)
    }
}

impl Default for NanoIdOptions {
    fn default() -> Self {
        KnownAlphabet::UrlSafe.options().clone()
    }
}

impl From<NanoIdOptions> for (Alphabet, usize) {
    fn from(options: NanoIdOptions) -> Self {
        options.into_parts()
    }
}

impl KnownAlphabet {
    /// Shared options for this preset, sized [`DEFAULT_SIZE`].
    pub fn options(self) -> &'static NanoIdOptions {
        &KNOWN_OPTIONS[self.index()]
    }
}

static KNOWN_OPTIONS: Lazy<[NanoIdOptions; 9]> = Lazy::new(|| {
    KnownAlphabet::ALL.map(|known| NanoIdOptions::sized(known.alphabet().clone(), DEFAULT_SIZE))
});
