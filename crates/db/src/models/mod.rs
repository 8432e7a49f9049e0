//! Domain model structs and DTOs.
//!
//! Entity structs derive `FromRow` + `Serialize` and match a database row
//! (or a computed query row); create DTOs derive `Deserialize`.

pub mod search;
pub mod video;
