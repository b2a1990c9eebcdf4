//! Type definitions for farmstand

mod error;
mod market;

pub use error::*;
pub use market::*;
