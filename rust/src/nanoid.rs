//! Nano ID values and their generation.
//!
//! Generation draws random bytes, masks each down to the smallest power of
//! two covering the alphabet, and discards indices that fall outside it.
//! Every letter is therefore equally likely, whatever the alphabet size.

use std::fmt;
use std::str::FromStr;

use rand::CryptoRng;
use serde::Serialize;
use thiserror::Error;

use crate::alphabet::{Alphabet, AlphabetError, CustomAlphabet, KnownAlphabet};
use crate::options::{NanoIdOptions, normalize_size};

/// Size used when none is given.
pub const DEFAULT_SIZE: usize = 21;

/// Upper bound on the random bytes requested per refill.
const MAX_STEP: usize = 4096;

/// A fixed-length identifier whose letters all come from one alphabet.
///
/// The default value is the empty id; every empty id equals every other.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NanoId(String);

/// Returned by [`NanoId::from_str`] for input outside the URL-safe alphabet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid Nano ID: {0:?}")]
pub struct ParseNanoIdError(pub String);

impl NanoId {
    pub const EMPTY: Self = Self(String::new());

    /// Generate a URL-safe id of [`DEFAULT_SIZE`] letters.
    pub fn generate() -> Self {
        KnownAlphabet::UrlSafe
            .alphabet()
            .make_nanoid(DEFAULT_SIZE as i64)
    }

    /// Generate an id from the alphabet and size in `options`.
    pub fn generate_with(options: &NanoIdOptions) -> Self {
        Self(generate(options.alphabet(), options.size(), &mut rand::rng()))
    }

    pub(crate) fn from_trusted(value: String) -> Self {
        Self(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NanoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NanoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<NanoId> for String {
    fn from(id: NanoId) -> Self {
        id.0
    }
}

impl PartialEq<str> for NanoId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NanoId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Parses against the URL-safe alphabet, accepting any length.
impl FromStr for NanoId {
    type Err = ParseNanoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownAlphabet::UrlSafe
            .parser()
            .try_parse(s)
            .ok_or_else(|| ParseNanoIdError(s.to_string()))
    }
}

impl Alphabet {
    /// Generate an id of `size` letters. Sizes of zero or less give the
    /// empty id.
    pub fn make_nanoid(&self, size: i64) -> NanoId {
        self.make_nanoid_with(size, &mut rand::rng())
    }

    /// Like [`Alphabet::make_nanoid`], drawing from the given random source.
    pub fn make_nanoid_with<R: CryptoRng + ?Sized>(&self, size: i64, rng: &mut R) -> NanoId {
        NanoId(generate(self, normalize_size(size), rng))
    }

    /// Bind this alphabet now and choose the size later.
    pub fn factory(&self) -> impl Fn(i64) -> NanoId + Send + Sync + use<> {
        let alphabet = self.clone();
        move |size| alphabet.make_nanoid(size)
    }
}

/// Validate `source`, then bind it for repeated generation.
pub fn factory_for<A: CustomAlphabet + ?Sized>(
    source: &A,
) -> Result<impl Fn(i64) -> NanoId + Send + Sync + use<A>, AlphabetError> {
    Alphabet::validate(source).map(|alphabet| alphabet.factory())
}

/// Generate a URL-safe id of [`DEFAULT_SIZE`] letters.
pub fn nanoid() -> NanoId {
    NanoId::generate()
}

/// Generate a raw id string from plain `letters`.
///
/// Sizes of zero or less give the empty string.
///
/// # Panics
///
/// Panics when `letters` is empty or longer than 255 letters.
#[track_caller]
pub fn nanoid_with(letters: &str, size: i64) -> String {
    let alphabet = Alphabet::new_strict(letters);
    generate(&alphabet, normalize_size(size), &mut rand::rng())
}

pub(crate) fn generate<R: CryptoRng + ?Sized>(
    alphabet: &Alphabet,
    size: usize,
    rng: &mut R,
) -> String {
    if size == 0 {
        return String::new();
    }

    let symbols = alphabet.symbols();
    let mask = mask_for(symbols.len());
    let step = step_for(mask, symbols.len(), size);

    let mut bytes = vec![0u8; step];
    let mut id = String::with_capacity(size);
    let mut count = 0;

    loop {
        rng.fill_bytes(&mut bytes);
        for &byte in &bytes {
            if let Some(&symbol) = symbols.get(usize::from(byte) & mask) {
                id.push(symbol);
                count += 1;
                if count == size {
                    return id;
                }
            }
        }
    }
}

/// Smallest `2^k - 1` covering every index of an alphabet of `len` letters.
fn mask_for(len: usize) -> usize {
    let highest = (len - 1) | 1;
    let bits = usize::BITS - highest.leading_zeros();
    (1 << bits) - 1
}

/// Bytes to request per refill: enough, on average, to finish in one pass.
fn step_for(mask: usize, len: usize, size: usize) -> usize {
    (16 * mask)
        .saturating_mul(size)
        .div_ceil(10 * len)
        .clamp(1, MAX_STEP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Replays a fixed byte sequence and counts how many bytes were drawn.
    struct Replay {
        bytes: Vec<u8>,
        cursor: usize,
    }

    impl Replay {
        fn new(bytes: &[u8]) -> Self {
            Self {
                bytes: bytes.to_vec(),
                cursor: 0,
            }
        }
    }

    impl RngCore for Replay {
        fn next_u32(&mut self) -> u32 {
            let mut buf = [0u8; 4];
            self.fill_bytes(&mut buf);
            u32::from_le_bytes(buf)
        }

        fn next_u64(&mut self) -> u64 {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf);
            u64::from_le_bytes(buf)
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for b in dst {
                *b = self.bytes[self.cursor % self.bytes.len()];
                self.cursor += 1;
            }
        }
    }

    impl CryptoRng for Replay {}

    #[test]
    fn test_mask_covers_alphabet() {
        assert_eq!(mask_for(1), 1);
        assert_eq!(mask_for(2), 1);
        assert_eq!(mask_for(9), 15);
        assert_eq!(mask_for(10), 15);
        assert_eq!(mask_for(16), 15);
        assert_eq!(mask_for(17), 31);
        assert_eq!(mask_for(64), 63);
        assert_eq!(mask_for(255), 255);
    }

    #[test]
    fn test_step_is_bounded() {
        assert!(step_for(63, 64, 21) >= 21);
        assert_eq!(step_for(255, 255, usize::MAX), MAX_STEP);
        assert_eq!(step_for(1, 2, 1), 1);
    }

    #[test]
    fn test_default_shape() {
        let id = nanoid();
        assert_eq!(id.len(), DEFAULT_SIZE);
        assert!(KnownAlphabet::UrlSafe.alphabet().will_permit(id.as_str()));
    }

    #[test]
    fn test_out_of_range_indices_are_redrawn() {
        // Numbers has 10 letters and mask 15: 10..=15 must be skipped.
        let numbers = KnownAlphabet::Numbers.alphabet();
        let mut rng = Replay::new(&[10, 11, 12, 13, 14, 15, 3, 0x29, 9]);
        let id = numbers.make_nanoid_with(3, &mut rng);
        // 0x29 & 15 == 9
        assert_eq!(id, "399");
    }

    #[test]
    fn test_high_bits_are_masked_off() {
        let hex = KnownAlphabet::HexadecimalLowercase.alphabet();
        let mut rng = Replay::new(&[0xf0, 0x1a, 0xff]);
        let id = hex.make_nanoid_with(3, &mut rng);
        assert_eq!(id, "0af");
    }

    #[test]
    fn test_non_positive_size_draws_nothing() {
        let alphabet = KnownAlphabet::Lowercase.alphabet();
        let mut rng = Replay::new(&[0]);
        assert_eq!(alphabet.make_nanoid_with(-3, &mut rng), NanoId::EMPTY);
        assert_eq!(alphabet.make_nanoid_with(0, &mut rng), NanoId::default());
        assert_eq!(rng.cursor, 0);
    }

    #[test]
    fn test_single_letter_alphabet() {
        let alphabet = Alphabet::new("z").unwrap();
        assert_eq!(alphabet.make_nanoid(5), "zzzzz");
    }

    #[test]
    fn test_non_ascii_letters() {
        let alphabet = Alphabet::new("αβγδ").unwrap();
        let id = alphabet.make_nanoid(12);
        assert_eq!(id.len(), 12);
        assert!(alphabet.will_permit(id.as_str()));
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        // 10 letters with mask 15: naive modulo would favor 0..=5.
        let numbers = KnownAlphabet::Numbers.alphabet();
        let id = numbers.make_nanoid(100_000);
        let mut counts = [0usize; 10];
        for c in id.as_str().chars() {
            counts[c.to_digit(10).unwrap() as usize] += 1;
        }
        for count in counts {
            assert!((9_000..11_000).contains(&count), "{counts:?}");
        }
    }

    #[test]
    fn test_primitive_entry_point() {
        assert_eq!(nanoid_with("0123456789", 128).len(), 128);
        assert_eq!(nanoid_with("abcdefghijklmnopqrstuvwxyz", -3), "");
    }

    #[test]
    #[should_panic(expected = "Alphabet too small")]
    fn test_primitive_rejects_empty_alphabet() {
        let _ = nanoid_with("", 21);
    }

    #[test]
    #[should_panic(expected = "Alphabet too large")]
    fn test_primitive_rejects_large_alphabet() {
        let _ = nanoid_with(&"!".repeat(1024), 21);
    }

    #[test]
    fn test_factory_defers_size() {
        let make = KnownAlphabet::UrlSafe.alphabet().factory();
        assert_eq!(make(7).len(), 7);
        assert_eq!(make(40).len(), 40);
        assert!(make(-1).is_empty());
    }

    #[test]
    fn test_factory_for_validates() {
        let make = factory_for("qwerty123").unwrap();
        assert!(Alphabet::new("qwerty123").unwrap().will_permit(make(30).as_str()));
        assert!(factory_for("").is_err());
    }

    #[test]
    fn test_empty_ids_are_equal() {
        let empties = [
            NanoId::default(),
            NanoId::EMPTY,
            KnownAlphabet::Numbers.alphabet().make_nanoid(0),
            KnownAlphabet::UrlSafe.alphabet().make_nanoid(-10),
        ];
        for id in &empties {
            assert!(id.is_empty());
            assert_eq!(id.len(), 0);
            assert_eq!(id.to_string(), "");
            assert_eq!(id, &NanoId::EMPTY);
        }
    }

    #[test]
    fn test_string_conversions() {
        let id = nanoid();
        let text = id.to_string();
        assert_eq!(id.as_str(), text);
        assert_eq!(text.parse::<NanoId>().unwrap(), id);
        assert_eq!(String::from(id.clone()), text);
        assert!("not a nanoid!".parse::<NanoId>().is_err());
    }
}
