//! Portainer HTTP API

pub mod client;
pub mod stacks;
