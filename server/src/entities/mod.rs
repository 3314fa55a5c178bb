//! Server-side entity definitions.

mod avatar;

pub use avatar::Avatar;
