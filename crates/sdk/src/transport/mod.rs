//! Transport layer for the Vnstock SDK.

pub mod http;

pub use http::{HttpTransport, LOGIN_ENDPOINT};
