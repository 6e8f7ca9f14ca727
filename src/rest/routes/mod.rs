//! Route handlers for the wizard server.

pub mod health;
pub mod pages;
pub mod provision;
pub mod queries;
pub mod session;
pub mod tables;
