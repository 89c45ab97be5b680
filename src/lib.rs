//! Hello world HTTP fixture with SIGTERM-driven graceful shutdown
//!
//! Used by integration harnesses that check a container shuts down
//! cleanly: it answers `hello world` to everything and, on the first
//! SIGTERM, logs `echo from SIGTERM handler` and closes its listener.

pub mod config;
pub mod server;
