// Public API for integration tests and potential library usage

pub mod config;
pub mod device;
pub mod emitter;
pub mod hub;
pub mod protocol;
pub mod registry;
pub mod state;
pub mod ws;
