//! GitLab API Integration
//!
//! GitLab REST API (v4) との統合

pub mod client;
pub mod status;
