//! Utilities shared by the wscat binaries.

pub mod logger;
