//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod http_accord_gateway;

pub use http_accord_gateway::HttpAccordGateway;
