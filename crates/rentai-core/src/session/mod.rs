//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `UserProfile` and the persisted snapshot
//! - `store`: the `SessionStore` trait
//! - `token`: display-only token payload decoding

mod model;
mod store;
pub mod token;

pub use model::{AuthSnapshot, Session, UserProfile};
pub use store::SessionStore;
