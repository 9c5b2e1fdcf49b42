//! Typed helpers for the partial-page update protocol.
//!
//! Clients that enhance plain HTML with partial swaps send a few extra
//! request headers and understand a few extra response headers. This module
//! wraps the `http` request and response types so handlers can read and
//! write those headers by name.
//!
//! # Data Flow
//! ```text
//! axum Request<Body>
//!     → handler.rs (htmx adapter)
//!     → request.rs (HxRequest: header predicates)
//!     → your handler
//!     → response.rs (HxResponse: header setters, buffered component write)
//!     → trigger.rs (event encoding for the trigger headers)
//!     → axum Response<Body>
//! ```

pub mod error;
pub mod handler;
pub mod headers;
pub mod request;
pub mod response;
pub mod trigger;

pub use error::HxError;
pub use handler::{htmx, HxHandler};
pub use request::HxRequest;
pub use response::{BoxError, Component, ComponentFn, HxResponse, RENDER_ERROR_BODY};
pub use trigger::TriggerEvents;
