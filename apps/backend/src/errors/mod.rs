//! Error handling for the Pictionary backend.

pub mod domain;

pub use domain::GameError;
