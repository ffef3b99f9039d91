//! Foundation types for Chainlog.
//!
//! Every other Chainlog crate depends on `chainlog-types`. It holds the
//! [`Commitment`] digest that links blocks together and the [`TypeError`]
//! raised when a commitment is parsed from untrusted text.

pub mod commitment;
pub mod error;

pub use commitment::{Commitment, COMMITMENT_LEN};
pub use error::TypeError;
