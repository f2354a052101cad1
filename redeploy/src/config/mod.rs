//! Configuration sourced from the environment

pub mod env;
pub mod settings;
