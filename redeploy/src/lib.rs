//! Stack Redeploy Library
//!
//! Resolves a redeploy profile from the environment and triggers a
//! Portainer git redeploy with it.

pub mod app;
pub mod config;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod profile;
pub mod utils;
