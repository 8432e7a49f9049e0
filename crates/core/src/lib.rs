//! Domain logic for the video library.
//!
//! Zero internal dependencies and no I/O, so the repository layer, the HTTP
//! server and any future tooling can share it.

pub mod error;
pub mod media;
pub mod range;
pub mod search;
pub mod types;
