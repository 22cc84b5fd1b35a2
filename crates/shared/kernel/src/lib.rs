//! Kernel utilities shared across slices.
//! Keep this crate lightweight: configuration loading and the clock abstraction used by
//! time-sensitive components.
//!
//! ## Config loading
//! ```rust,no_run
//! use jobchat_kernel::config::load_app_config;
//!
//! let cfg = load_app_config(Some("jobchat.toml")).unwrap();
//! assert!(cfg.throttle.max_requests > 0);
//! ```
pub mod config;
pub mod time;

pub use jobchat_domain as domain;
