//! WebSocket live reload.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Path of the live reload WebSocket endpoint.
pub const HMR_PATH: &str = "/__hmr";

/// Path of the live reload client script.
pub const HMR_SCRIPT_PATH: &str = "/__hmr.js";

/// Messages sent to connected pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HmrMessage {
    /// Full page reload
    Reload,

    /// The catalogue no longer validates; the page shows the problem
    CatalogueError {
        /// Validation or parse error
        message: String,
    },

    /// Connection established
    Connected,
}

/// Hub for broadcasting reload messages to all connected pages.
#[derive(Debug, Clone)]
pub struct HmrHub {
    sender: broadcast::Sender<HmrMessage>,
}

impl HmrHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    /// Send a message to all connected pages.
    pub fn send(&self, msg: HmrMessage) {
        // No receivers is fine
        let _ = self.sender.send(msg);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HmrMessage> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for HmrHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the client-side live reload script.
///
/// The socket URL is derived from the page's own host, so the script works
/// whatever address the server is bound to.
pub fn hmr_client_script(ws_path: &str) -> String {
    format!(
        r#"
(function() {{
  'use strict';

  const scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  let retries = 0;

  function showError(message) {{
    let banner = document.getElementById('stylebook-error');
    if (!banner) {{
      banner = document.createElement('pre');
      banner.id = 'stylebook-error';
      banner.style.cssText = 'position:fixed;left:16px;right:16px;bottom:16px;z-index:9999;' +
        'padding:12px 16px;border-radius:8px;background:#0F172A;color:#FECACA;' +
        'font:13px/1.5 ui-monospace,monospace;white-space:pre-wrap';
      document.body.appendChild(banner);
    }}
    banner.textContent = message;
  }}

  function connect() {{
    const ws = new WebSocket(scheme + location.host + '{}');

    ws.onopen = function() {{
      retries = 0;
    }};

    ws.onmessage = function(event) {{
      const msg = JSON.parse(event.data);

      switch (msg.type) {{
        case 'reload':
          location.reload();
          break;
        case 'catalogue_error':
          showError(msg.message);
          break;
        case 'connected':
          console.debug('[stylebook] live reload connected');
          break;
      }}
    }};

    ws.onclose = function() {{
      if (retries < 10) {{
        retries++;
        setTimeout(connect, 500 * retries);
      }}
    }};
  }}

  connect();
}})();
"#,
        ws_path
    )
}
