//! # Data Transfer Objects

pub mod uploader_config;
