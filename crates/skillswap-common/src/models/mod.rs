//! Core domain models mirrored from the hosted backend.
//!
//! The backend owns these tables; the types here only describe the rows the
//! client reads, using the backend's column names on the wire.

pub mod profile;
pub mod skill;
pub mod swap;

pub use profile::*;
pub use skill::*;
pub use swap::*;
