#[macro_use]
mod par;

pub mod align;
pub mod error;
pub mod matrix;
pub mod score;

pub use error::{DpError, DpResult};
