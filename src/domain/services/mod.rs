//! # Domain Services

pub mod remote_naming;
