//! ananoid: Nano ID generation and parsing.
//!
//! A Nano ID is a short random string drawn uniformly from an alphabet,
//! using a cryptographically secure random source.
//!
//! # Example
//!
//! ```
//! use ananoid::{KnownAlphabet, NanoIdOptions, NanoIdParser, nanoid};
//!
//! let id = nanoid(); // 21 URL-safe letters
//! assert_eq!(id.len(), 21);
//!
//! let options = NanoIdOptions::of("qwerty123", 6).expect("coherent alphabet");
//! let id = options.generate();
//! assert!(NanoIdParser::from(&options).try_parse(id.as_str()).is_some());
//! assert!(KnownAlphabet::Numbers.parser().try_parse("qwe123").is_none());
//! ```

mod alphabet;
mod config;
mod nanoid;
mod options;
mod parser;

pub use alphabet::{
    Alphabet, AlphabetError, CustomAlphabet, KnownAlphabet, MAX_LETTERS, MIN_LETTERS,
};
pub use config::{AlphabetConfig, OptionsConfig};
pub use nanoid::{DEFAULT_SIZE, NanoId, ParseNanoIdError, factory_for, nanoid, nanoid_with};
pub use options::NanoIdOptions;
pub use parser::NanoIdParser;
