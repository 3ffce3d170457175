//! HTTP server with streamed page sections

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use futures::StreamExt;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::fetcher::ContentFetcher;
use crate::helpers::url_for;
use crate::render::{ContentDispatcher, PageKind, PageRenderer, PostStatus};
use crate::Folio;

/// Server state
struct ServerState {
    renderer: Arc<PageRenderer>,
    fetcher: ContentFetcher,
    dispatcher: ContentDispatcher,
    render_drafts: bool,
}

/// Build the site router
pub fn router(folio: &Folio) -> Result<Router> {
    let state = Arc::new(ServerState {
        renderer: Arc::new(folio.renderer()?),
        fetcher: folio.fetcher(),
        dispatcher: folio.dispatcher(),
        render_drafts: folio.config.render_drafts,
    });

    let assets_route = if folio.config.assets_url.starts_with('/') {
        folio.config.assets_url.trim_end_matches('/').to_string()
    } else {
        "/assets".to_string()
    };

    let about = url_for(&folio.config, PageKind::About.path());
    let pages = Router::new()
        .route(
            "/",
            get(move || {
                let target = about.clone();
                async move { Redirect::to(&target) }
            }),
        )
        .route("/about", get(about_page))
        .route("/work", get(work_page))
        .route("/blog", get(blog_page))
        .route("/blog/:slug", get(post_page));

    // Page links carry the configured root; attachment URLs are absolute
    let root = folio.config.root.trim_matches('/');
    let app = if root.is_empty() {
        pages
    } else {
        Router::new().nest(&format!("/{}", root), pages)
    };

    Ok(app
        .nest_service(&assets_route, ServeDir::new(&folio.assets_dir))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(folio)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn about_page(State(state): State<Arc<ServerState>>) -> Response {
    stream_page(&state, PageKind::About)
}

async fn work_page(State(state): State<Arc<ServerState>>) -> Response {
    stream_page(&state, PageKind::Work)
}

async fn blog_page(State(state): State<Arc<ServerState>>) -> Response {
    stream_page(&state, PageKind::Blog)
}

/// Respond with the shell at once and sections as they settle
fn stream_page(state: &ServerState, page: PageKind) -> Response {
    match Arc::clone(&state.renderer).stream_page(page, state.fetcher.clone()) {
        Ok(chunks) => (
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            Body::from_stream(chunks.map(Ok::<_, Infallible>)),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to render {} page: {}", page.path(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn post_page(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    let page = state
        .renderer
        .render_post(&slug, &state.fetcher, &state.dispatcher, state.render_drafts)
        .await;

    match page {
        Ok(page) => {
            let status = match page.status {
                PostStatus::Found => StatusCode::OK,
                PostStatus::NotFound => StatusCode::NOT_FOUND,
                PostStatus::Error => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Html(page.html)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to render post {}: {}", slug, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

async fn not_found(State(state): State<Arc<ServerState>>) -> Response {
    match state.renderer.render_not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render not-found page: {}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
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
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const RECORDS: &str = r#"
work_experience:
  - company: Second
    title: Engineer
    order: 2
  - company: First
    title: Intern
    order: 1
posts:
  - title: Stored Post
    slug: stored
    published_at: 1700000000000
    is_published: true
    body: "Stored *content*."
    source: database-stored
  - title: Lost File
    slug: hello-world
    published_at: 1600000000000
    is_published: true
    source: externally-authored-file
"#;

    fn site() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("records.yml"), RECORDS).unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/logo.svg"), "<svg/>").unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let app = router(&folio).unwrap();
        (dir, app)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_root_redirects_to_about() {
        let (_dir, app) = site();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/about");
    }

    #[tokio::test]
    async fn test_work_page_streams_sections() {
        let (_dir, app) = site();
        let (status, body) = get(app, "/work").await;

        assert_eq!(status, StatusCode::OK);
        let shell_end = body.find(r#"<template data-section="#).unwrap();
        assert!(body[..shell_end].contains(r#"data-state="loading""#));
        assert!(body.contains(r#"folioSwap("section-work")"#));
        assert!(body.contains("No projects yet."));
        assert!(body.find("First").unwrap() < body.find("Second").unwrap());
        assert!(body.trim_end().ends_with("</html>"));
    }

    #[tokio::test]
    async fn test_post_pages() {
        let (_dir, app) = site();

        let (status, body) = get(app.clone(), "/blog/stored").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<em>content</em>"));

        let (status, body) = get(app.clone(), "/blog/unknown").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Post not found."));

        let (status, body) = get(app, "/blog/hello-world").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Error loading post."));
    }

    #[tokio::test]
    async fn test_routes_follow_configured_root() {
        let (dir, _) = site();
        fs::write(dir.path().join("_config.yml"), "root: /site/\n").unwrap();
        let app = router(&Folio::new(dir.path()).unwrap()).unwrap();

        let (status, body) = get(app.clone(), "/site/blog").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"href="/site/work""#));
        assert!(body.contains(r#"href="/site/blog/stored""#));

        let (status, body) = get(app.clone(), "/site/blog/stored").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<em>content</em>"));

        let (status, _) = get(app.clone(), "/blog/stored").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = get(app, "/assets/logo.svg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<svg/>");
    }

    #[tokio::test]
    async fn test_assets_and_fallback() {
        let (_dir, app) = site();

        let (status, body) = get(app.clone(), "/assets/logo.svg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<svg/>");

        let (status, body) = get(app, "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page not found."));
    }
}
