//! Gates HTTPS navigations on the verdict of an external trust management
//! service, on top of the browser's own TLS validation.

pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod navigation;
pub mod overrides;
pub mod router;
pub mod stub;
pub mod trust;

pub use errors::GateError;
