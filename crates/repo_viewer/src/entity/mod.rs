//! SeaORM entity definitions for the local favorites store.

pub mod favorite_repository;
pub mod prelude;
