//! cellcore core types
//!
//! - `Number`: exact decimal used by the unit algebra
//! - `CoreError`: the error taxonomy every crate reports through

mod error;
mod number;

pub use error::{CoreError, Result};
pub use number::{Number, NumberError};
