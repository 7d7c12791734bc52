//! Request handlers

pub mod health;
pub mod movement;
pub mod portfolio;
