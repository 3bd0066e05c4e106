//! HTTP server: handlers, hypermedia, content negotiation and routing

pub mod binders;
pub mod builder;
pub mod handlers;
pub mod host;
pub mod links;
pub mod negotiation;
pub mod router;

pub use builder::ServerBuilder;
pub use host::AppState;
pub use negotiation::OutputFormat;
pub use router::build_routes;
