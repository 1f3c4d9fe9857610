//! # Repositories
//!
//! One repository per record kind. Repositories execute queries and map rows;
//! the transition rules they persist live in stampcard-core.

pub mod admin;
pub mod customer;
