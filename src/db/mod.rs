//! # Database Module
//!
//! A fluent single-table query builder, an explicit connection handle, and
//! a base-model trait over both.
//!
//! The actual driver stays with the host: anything implementing
//! [`Connection`] plugs in, and tests run against an in-memory fake. SQL
//! text generation targets the common `?`-placeholder prepared-statement
//! form; dialect specifics beyond that are out of scope.

mod builder;
mod database;
mod model;

pub use builder::{Builder, Order};
pub use database::{Connection, Database, DbConfig, Row};
pub use model::Model;
