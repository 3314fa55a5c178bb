//! Client sessions over UDP.

mod server;

pub use server::Server;
