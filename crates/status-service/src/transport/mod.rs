//! Transports that deliver status requests to the chat server

mod http;

pub use http::HttpStatusTransport;
