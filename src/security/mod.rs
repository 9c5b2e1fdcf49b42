//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Outgoing response:
//!     → headers.rs (X-XSS-Protection, X-Frame-Options)
//!
//! Incoming asset request:
//!     → headers.rs (no_index: reject directory paths)
//!     → static file service
//! ```

pub mod headers;
