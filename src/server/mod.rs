//! # Server Module
//!
//! The request accessor and the response sink: the two collaborators the
//! dispatcher consumes and produces. Listening sockets and connection
//! handling stay with the host HTTP runtime: it builds a [`Request`] from
//! whatever it parsed off the wire and supplies a [`ResponseWriter`] for
//! the flush.

pub mod request;
pub mod response;

pub use request::Request;
pub use response::{HttpWriter, Response, ResponseWriter};
