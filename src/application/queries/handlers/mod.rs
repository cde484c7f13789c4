//! Query Handlers 实现

mod session_handlers;

pub use session_handlers::*;
