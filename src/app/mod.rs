//! Application orchestration — state management, event loop, and input handling.

pub mod animation;
pub mod event;
pub mod handler;
pub mod notification;
pub mod settings;
pub mod state;
