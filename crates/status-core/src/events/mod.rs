//! Server events consumed by the status store

mod server_event;

pub use server_event::{ServerEvent, UserStatusEvent};
