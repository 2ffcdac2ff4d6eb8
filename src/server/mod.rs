//! HTTP server: portfolio page, contact endpoint and seed endpoints

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::cms::ContentStore;
use crate::config::SiteConfig;
use crate::contact::{self, ContactError};
use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::seed::{self, SeedSet};
use crate::Folio;

/// Shared server state
pub struct AppState {
    pub config: SiteConfig,
    pub store: Arc<dyn ContentStore>,
    pub static_dir: PathBuf,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/contact", post(contact_handler))
        .route("/api/seed-projects", get(seed_projects_handler))
        .route("/api/seed-profile-skills", get(seed_profile_skills_handler))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(AppState {
        config: folio.config.clone(),
        store: folio.store()?,
        static_dir: folio.static_dir.clone(),
    });
    let app = router(state);

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

/// Render the portfolio page from the current store contents
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    let content = ContentLoader::new(state.store.clone(), &state.config)
        .load_all()
        .await;
    Html(Generator::new(&state.config).render_page(&content))
}

/// Accept a contact-form submission
async fn contact_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match contact::submit(state.store.as_ref(), &body).await {
        Ok(receipt) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Message sent successfully", "id": receipt.id })),
        )
            .into_response(),
        Err(e @ ContactError::Validation(_)) => {
            tracing::debug!(kind = e.kind(), "Rejected contact message: {}", e);
            message(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), "Error saving message: {}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error saving message")
        }
    }
}

async fn seed_projects_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    seed_with(&state, &headers, SeedSet::Projects).await
}

async fn seed_profile_skills_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    seed_with(&state, &headers, SeedSet::ProfileAndSkills).await
}

/// Check the bearer token, then write one seed set
async fn seed_with(state: &AppState, headers: &HeaderMap, set: SeedSet) -> Response {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if !seed::authorized(header, state.config.seed_token.as_deref()) {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    match seed::run(state.store.as_ref(), &state.config, set).await {
        Ok(ids) => {
            tracing::info!("Seeded {} documents", ids.len());
            let text = match set {
                SeedSet::Projects => "Projects seeded successfully",
                SeedSet::ProfileAndSkills => "Profile and skills seeded successfully",
            };
            message(StatusCode::OK, text)
        }
        Err(e) => {
            tracing::error!("Seeding failed: {:#}", e);
            message(StatusCode::INTERNAL_SERVER_ERROR, "Error seeding data")
        }
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
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
    use crate::cms::{DisconnectedStore, MemoryStore};
    use crate::content::DocumentKind;
    use axum::http::HeaderValue;
    use serde_json::Value;
    use std::sync::atomic::Ordering;

    fn state_with(store: Arc<dyn ContentStore>, seed_token: Option<&str>) -> Arc<AppState> {
        let mut config = SiteConfig::default();
        config.seed_token = seed_token.map(str::to_string);
        Arc::new(AppState {
            config,
            store,
            static_dir: PathBuf::from("static"),
        })
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_contact_created() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone(), None);
        let body = Bytes::from_static(br#"{"name":"Ann","email":"ann@example.com","message":"Hi"}"#);

        let response = contact_handler(State(state), body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Message sent successfully");
        assert!(!json["id"].as_str().unwrap().is_empty());

        let stored = store.fetch(DocumentKind::Contact).await.unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_missing_field_is_bad_request() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone(), None);
        let body = Bytes::from_static(br#"{"name":"Ann","email":"","message":"Hi"}"#);

        let response = contact_handler(State(state), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], contact::REQUIRED_FIELDS_MESSAGE);
        assert_eq!(store.create_calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_contact_store_failure_is_server_error() {
        let store = Arc::new(MemoryStore::new());
        store.fail_writes.store(true, Ordering::Relaxed);
        let state = state_with(store, None);
        let body = Bytes::from_static(br#"{"name":"Ann","email":"ann@example.com","message":"Hi"}"#);

        let response = contact_handler(State(state), body).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["message"], "Error saving message");
    }

    #[tokio::test]
    async fn test_seed_requires_token() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone(), Some("s3cret"));

        let response = seed_projects_handler(State(state), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(store.create_calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_seed_with_token() {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone(), Some("s3cret"));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"));

        let response = seed_profile_skills_handler(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await["message"],
            "Profile and skills seeded successfully"
        );
        assert!(store.fetch(DocumentKind::Profile).await.unwrap().is_object());
    }

    #[tokio::test]
    async fn test_index_renders_fallback_when_disconnected() {
        let state = state_with(Arc::new(DisconnectedStore), None);
        let Html(page) = index_handler(State(state)).await;
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains("id=\"contact-form\""));
    }
}
