//! Development server: serves the output tree and reloads open pages after
//! each successful rebuild

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::commands::generate::rebuild_on_change;
use crate::Folio;

/// Path of the live reload websocket
pub const LIVE_RELOAD_PATH: &str = "/__livereload";

/// Appended to every served page while live reload is on. The page reloads
/// on a `reload` message and polls until the server is back after a restart.
const LIVE_RELOAD_SNIPPET: &str = r#"<script data-folio-live-reload>
(function () {
  function connect() {
    var socket = new WebSocket('ws://' + location.host + '/__livereload');
    socket.onmessage = function (event) {
      if (event.data === 'reload') location.reload();
    };
    socket.onclose = function () { setTimeout(connect, 1000); };
  }
  connect();
})();
</script>
"#;

/// Fan-out of "the site was rebuilt" to every open page
#[derive(Clone)]
struct Reloader {
    tx: broadcast::Sender<()>,
}

impl Reloader {
    fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    fn notify(&self) {
        // No open pages is not an error
        let receivers = self.tx.send(()).unwrap_or(0);
        tracing::debug!("Reload sent to {} page(s)", receivers);
    }
}

struct AppState {
    public_dir: PathBuf,
    /// `None` in static mode
    reloader: Option<Reloader>,
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let reloader = watch.then(Reloader::new);
    let state = Arc::new(AppState {
        public_dir: folio.public_dir.clone(),
        reloader: reloader.clone(),
    });

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;
    let url = format!("http://{}:{}", ip, port);

    if let Some(reloader) = reloader {
        let folio = folio.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = rebuild_on_change(&folio, |_| reloader.notify()) {
                tracing::error!("File watcher error: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Serving {:?} at {}", folio.public_dir, url);
    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }
    axum::serve(listener, router(state)).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(LIVE_RELOAD_PATH, get(live_reload_socket))
        .fallback(serve_output)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn live_reload_socket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    match &state.reloader {
        Some(reloader) => {
            let rebuilt = reloader.tx.subscribe();
            ws.on_upgrade(move |socket| forward_reloads(socket, rebuilt))
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Send `reload` after each rebuild until the page goes away
async fn forward_reloads(mut socket: WebSocket, mut rebuilt: broadcast::Receiver<()>) {
    loop {
        tokio::select! {
            signal = rebuilt.recv() => match signal {
                // A lagging page only needs one reload
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    if socket.send(Message::Text("reload".into())).await.is_err() {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                Some(Ok(_)) => {}
            },
        }
    }
}

/// Serve the output tree; HTML pages get the live reload snippet
async fn serve_output(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    let Some(file) = resolve_file(&state.public_dir, request.uri().path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let is_html = file.extension().is_some_and(|ext| ext == "html");
    if is_html && state.reloader.is_some() {
        return match tokio::fs::read_to_string(&file).await {
            Ok(page) => Html(with_live_reload(&page)).into_response(),
            Err(_) => StatusCode::NOT_FOUND.into_response(),
        };
    }

    match ServeDir::new(&state.public_dir)
        .append_index_html_on_directories(true)
        .try_call(request)
        .await
    {
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Failed to serve {:?}: {}", file, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Map a request path to a file under the output tree.
///
/// `/photos` and `/photos/` both resolve to `photos/index.html`. Paths that
/// climb out of the output tree resolve to nothing.
fn resolve_file(public_dir: &Path, path: &str) -> Option<PathBuf> {
    let clean_path = path.trim_start_matches('/');
    let relative = Path::new(clean_path);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let candidate = public_dir.join(relative);
    if clean_path.is_empty() || candidate.is_dir() {
        return Some(candidate.join("index.html"));
    }
    if candidate.exists() {
        return Some(candidate);
    }
    let with_html = public_dir.join(format!("{}.html", clean_path));
    if with_html.exists() {
        Some(with_html)
    } else {
        Some(candidate)
    }
}

/// Insert the live reload snippet before the last `</body>`, or append it
fn with_live_reload(page: &str) -> String {
    match page.rfind("</body>") {
        Some(at) => format!("{}{}{}", &page[..at], LIVE_RELOAD_SNIPPET, &page[at..]),
        None => format!("{}{}", page, LIVE_RELOAD_SNIPPET),
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_routes() {
        let dir = tempfile::tempdir().unwrap();
        let public = dir.path();
        fs::create_dir_all(public.join("photos")).unwrap();
        fs::write(public.join("photos/index.html"), "gallery").unwrap();
        fs::write(public.join("feed.xml"), "feed").unwrap();

        assert_eq!(resolve_file(public, "/"), Some(public.join("index.html")));
        assert_eq!(resolve_file(public, "/photos"), Some(public.join("photos/index.html")));
        assert_eq!(resolve_file(public, "/photos/"), Some(public.join("photos/index.html")));
        assert_eq!(resolve_file(public, "/feed.xml"), Some(public.join("feed.xml")));
        assert_eq!(resolve_file(public, "/../secret"), None);
    }

    #[test]
    fn test_live_reload_snippet_placement() {
        let page = with_live_reload("<html><body><p>x</p></body></html>");
        assert!(page.contains(LIVE_RELOAD_PATH));
        assert!(page.ends_with("</script>\n</body></html>"));
        assert_eq!(page.matches("</body>").count(), 1);

        let bare = with_live_reload("<p>x</p>");
        assert!(bare.starts_with("<p>x</p><script data-folio-live-reload>"));
    }

    #[test]
    fn test_reload_without_open_pages() {
        let reloader = Reloader::new();
        reloader.notify();

        let mut page = reloader.tx.subscribe();
        reloader.notify();
        assert!(page.try_recv().is_ok());
    }
}
