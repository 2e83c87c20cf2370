//! Development server with live reload for the style guide.
//!
//! Renders the page on request, watches the catalogue, site config and public files, and
//! tells connected pages to reload over a WebSocket.

pub mod server;
pub mod watcher;
pub mod websocket;

pub use server::{ConfigLoader, ConfigSource, DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
pub use websocket::{HmrHub, HmrMessage};
