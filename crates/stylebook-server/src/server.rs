//! Development server implementation.

use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Request, State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::sync::{broadcast::error::RecvError, RwLock};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use stylebook_static::{BuildConfig, StaticBuilder};
use stylebook_tokens::Catalogue;

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{hmr_client_script, HmrHub, HmrMessage, HMR_PATH, HMR_SCRIPT_PATH};

/// Re-reads builder settings from the site config.
pub type ConfigLoader = Arc<dyn Fn() -> Result<BuildConfig, String> + Send + Sync>;

/// Site config file the server reloads when it changes.
#[derive(Clone)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub load: ConfigLoader,
}

impl ConfigSource {
    pub fn new<F>(path: impl Into<PathBuf>, load: F) -> Self
    where
        F: Fn() -> Result<BuildConfig, String> + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            load: Arc::new(load),
        }
    }

    fn is(&self, path: &Path) -> bool {
        if self.path == path {
            return true;
        }
        match (self.path.canonicalize(), path.canonicalize()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Catalogue, hero and public directory settings
    pub build: BuildConfig,

    /// Site config to watch and reload builder settings from
    pub config: Option<ConfigSource>,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            config: None,
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

impl DevServerConfig {
    /// Paths the watcher follows: the catalogue, the public directory and
    /// the site config.
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        watch_paths(&self.build, self.config.as_ref())
    }
}

fn watch_paths(build: &BuildConfig, config: Option<&ConfigSource>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = build
        .tokens
        .iter()
        .chain(build.public_dir.iter())
        .chain(config.map(|c| &c.path))
        .cloned()
        .collect();
    paths.sort();
    paths.dedup();
    paths
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),
}

/// Shared server state.
struct ServerState {
    builder: StaticBuilder,
    hmr: HmrHub,
    /// Last loaded catalogue, or the reason it failed to load
    catalogue: Result<Catalogue, String>,
    config: Option<ConfigSource>,
}

/// Builder for development: pages served from the root with the reload client.
fn dev_builder(mut build: BuildConfig) -> StaticBuilder {
    build.base_url = "/".to_string();
    if !build.scripts.iter().any(|s| s == HMR_SCRIPT_PATH) {
        build.scripts.push(HMR_SCRIPT_PATH.to_string());
    }
    StaticBuilder::new(build)
}

impl ServerState {
    fn new(build: BuildConfig, config: Option<ConfigSource>) -> Self {
        let builder = dev_builder(build);
        let catalogue = builder.load_catalogue().map_err(|e| e.to_string());

        Self {
            builder,
            hmr: HmrHub::new(),
            catalogue,
            config,
        }
    }

    fn is_config_file(&self, path: &Path) -> bool {
        self.config.as_ref().is_some_and(|c| c.is(path))
    }

    /// Reload the site config, rebuild the builder, then the catalogue.
    fn reload_config(&mut self) -> HmrMessage {
        let Some(source) = &self.config else {
            return self.refresh();
        };

        match (source.load)() {
            Ok(build) => {
                self.builder = dev_builder(build);
                self.refresh()
            }
            Err(message) => {
                tracing::warn!("{}", message);
                self.catalogue = Err(message.clone());
                HmrMessage::CatalogueError { message }
            }
        }
    }

    fn watch_paths(&self) -> Vec<PathBuf> {
        watch_paths(self.builder.config(), self.config.as_ref())
    }

    /// Reload the catalogue and pick the message for connected pages.
    fn refresh(&mut self) -> HmrMessage {
        self.catalogue = self.builder.load_catalogue().map_err(|e| e.to_string());

        match &self.catalogue {
            Ok(_) => HmrMessage::Reload,
            Err(message) => {
                tracing::warn!("{}", message);
                HmrMessage::CatalogueError {
                    message: message.clone(),
                }
            }
        }
    }

    /// The style guide page, or an error page when the catalogue is invalid.
    fn index(&self) -> (StatusCode, String) {
        let rendered = match &self.catalogue {
            Ok(catalogue) => self
                .builder
                .render_page(catalogue)
                .map(|html| (StatusCode::OK, html)),
            Err(message) => self
                .builder
                .render_error_page(message)
                .map(|html| (StatusCode::UNPROCESSABLE_ENTITY, html)),
        };

        rendered.unwrap_or_else(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
    }

    /// Stylesheet for the current catalogue; built-in tokens while it is invalid.
    fn stylesheet(&self) -> String {
        match &self.catalogue {
            Ok(catalogue) => self.builder.stylesheet(catalogue),
            Err(_) => self.builder.stylesheet(&Catalogue::default()),
        }
    }

    fn tokens_json(&self) -> Result<String, String> {
        match &self.catalogue {
            Ok(catalogue) => catalogue.to_json().map_err(|e| e.to_string()),
            Err(message) => Err(message.clone()),
        }
    }
}

type SharedState = Arc<RwLock<ServerState>>;

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let address = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = address
            .parse()
            .map_err(|_| ServerError::InvalidAddress(address.clone()))?;

        let state = Arc::new(RwLock::new(ServerState::new(
            self.config.build.clone(),
            self.config.config.clone(),
        )));

        if let Err(message) = &state.read().await.catalogue {
            tracing::warn!("Catalogue is invalid, serving error page: {}", message);
        }

        let (mut watcher, mut rx) = FileWatcher::new(&self.config.watch_paths())
            .map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;

                // A reloaded config may point at a new catalogue or public dir
                let paths = state_clone.read().await.watch_paths();
                if let Err(e) = watcher.watch_new(&paths) {
                    tracing::warn!("Failed to watch new paths: {}", e);
                }
            }
        });

        let app = Router::new()
            .route("/", get(index_handler))
            .route("/index.html", get(index_handler))
            .route("/assets/main.css", get(css_handler))
            .route("/tokens.json", get(tokens_handler))
            .route(HMR_PATH, get(ws_handler))
            .route(HMR_SCRIPT_PATH, get(hmr_script_handler))
            .fallback(public_handler)
            .layer(CorsLayer::permissive())
            .with_state(state);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::debug!("Could not open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    let touches_catalogue = matches!(event, WatchEvent::CatalogueModified(_))
        || event.path().extension().is_some_and(|ext| ext == "toml");

    let mut state = state.write().await;

    let msg = if state.is_config_file(event.path()) {
        tracing::info!("Config changed: {}", event.path().display());
        state.reload_config()
    } else if touches_catalogue {
        tracing::info!("Catalogue changed: {}", event.path().display());
        state.refresh()
    } else {
        tracing::info!("File changed: {}", event.path().display());
        HmrMessage::Reload
    };

    tracing::debug!("Notifying {} connected pages", state.hmr.subscriber_count());
    state.hmr.send(msg);
}

async fn index_handler(State(state): State<SharedState>) -> Response {
    let (status, html) = state.read().await.index();
    (status, Html(html)).into_response()
}

async fn css_handler(State(state): State<SharedState>) -> Response {
    let css = state.read().await.stylesheet();
    ([(header::CONTENT_TYPE, "text/css")], css).into_response()
}

async fn tokens_handler(State(state): State<SharedState>) -> Response {
    match state.read().await.tokens_json() {
        Ok(json) => ([(header::CONTENT_TYPE, "application/json")], json).into_response(),
        Err(message) => (StatusCode::UNPROCESSABLE_ENTITY, message).into_response(),
    }
}

/// Files under the currently configured public directory.
async fn public_handler(State(state): State<SharedState>, req: Request) -> Response {
    let Some(public_dir) = state.read().await.builder.config().public_dir.clone() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match ServeDir::new(public_dir).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// Handler for the live reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Forward hub messages to one connected page.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = state.read().await.hmr.subscribe();

    if !send_message(&mut socket, &HmrMessage::Connected).await {
        return;
    }

    loop {
        match rx.recv().await {
            Ok(msg) => {
                if !send_message(&mut socket, &msg).await {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!("Live reload client skipped {} messages", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn send_message(socket: &mut WebSocket, msg: &HmrMessage) -> bool {
    let Ok(json) = serde_json::to_string(msg) else {
        return false;
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

/// Handler for the live reload client script.
async fn hmr_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        hmr_client_script(HMR_PATH),
    )
}
