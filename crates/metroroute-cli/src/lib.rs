//! metroroute CLI library.
//!
//! Presentation helpers for the `metroroute` binary: output formats, route
//! rendering and translation of library errors into user-facing messages.

pub mod messages;
pub mod output;
