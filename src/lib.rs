pub mod api;
pub mod app;
pub mod chat;
pub mod clock;
pub mod config;
pub mod dom;
pub mod errors;
pub mod filter;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod notifier;
pub mod poller;
pub mod render;
pub mod scheduler;
pub mod state;
pub mod ui;
pub mod view;

#[cfg(test)]
mod testing;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use view::{SharedView, View};
