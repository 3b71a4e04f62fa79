//! SeaORM database entities.

pub mod user;
