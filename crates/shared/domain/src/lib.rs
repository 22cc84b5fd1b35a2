//! # Domain Models
//!
//! This crate contains the configuration schema and shared constants with a single
//! dependency (`serde`). Keep it lean: no I/O, networking, or cryptography, just data
//! and simple helpers.

pub mod config;
pub mod constants;
