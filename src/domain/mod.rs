//! Domain layer - Core business entities
//!
//! Contains the core domain models that represent business concepts
//! independent of infrastructure concerns.

pub mod user;

pub use user::{User, UserId, UserInput, UserView};
