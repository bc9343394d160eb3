//! Command implementations for the nwalign CLI

pub mod input;
pub mod align;
pub mod generate;
pub mod compare;
