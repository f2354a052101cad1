//! Request models

pub mod redeploy;
