//! Route handlers

pub mod collection;
pub mod health;
