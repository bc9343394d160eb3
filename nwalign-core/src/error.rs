//! Error types shared by every alignment entry point

use thiserror::Error;

/// Errors that can occur while configuring or running an alignment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    #[error("Unknown symbol '{}'{}", symbol_char(.symbol), position_suffix(.position))]
    UnknownSymbol {
        symbol: u8,
        /// Offset of the symbol in its sequence, when known
        position: Option<usize>,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid alignment: {0}")]
    InvalidAlignment(String),
}

fn symbol_char(symbol: &u8) -> char {
    *symbol as char
}

fn position_suffix(position: &Option<usize>) -> String {
    match position {
        Some(pos) => format!(" at position {}", pos),
        None => String::new(),
    }
}

impl AlignError {
    pub fn unknown_symbol(symbol: u8) -> Self {
        Self::UnknownSymbol { symbol, position: None }
    }

    pub fn invalid_configuration<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfiguration(message.into())
    }

    pub fn invalid_alignment<S: Into<String>>(message: S) -> Self {
        Self::InvalidAlignment(message.into())
    }
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;
