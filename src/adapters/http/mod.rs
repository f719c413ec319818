//! HTTP Adapter
//!
//! `HttpTransport` implementation on top of reqwest, shared by all provider clients.

mod transport;

pub use transport::ReqwestTransport;
