use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Address too long: {length} chars, max {max}")]
    TooLong { length: usize, max: usize },

    #[error("Address missing '{expected}' prefix: {address}")]
    BadPrefix { address: String, expected: String },

    #[error("Address contains invalid character {character:?}: {address}")]
    BadCharacter { address: String, character: char },

    #[error("Address data part too short: {address}")]
    TooShort { address: String },
}
