mod pages;
mod proxy;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;

pub use proxy::ProxyError;

const STYLES_CSS: &str = include_str!("../../web/css/styles.css");
const MAIN_JS: &str = include_str!("../../web/js/main.js");
const API_SERVICE_JS: &str = include_str!("../../web/js/apiService.js");
const DEFAULT_NEWS_SVG: &str = include_str!("../../web/images/default-news.svg");

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("failed to build upstream HTTP client")?;
        Ok(Self { config, client })
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new();
    for page in pages::STATIC_PAGES {
        app = app.route(page.path, get(move || async move { pages::render(page) }));
    }

    app.route("/faq", get(pages::faq_handler))
        .route("/css/styles.css", get(styles_handler))
        .route("/js/main.js", get(main_js_handler))
        .route("/js/apiService.js", get(api_service_js_handler))
        .route("/images/default-news.svg", get(default_news_image_handler))
        .route("/api/news", get(proxy::news_handler))
        .route("/api/testimonials", get(proxy::testimonials_handler))
        .route("/healthz", get(|| async { "OK" }))
        .fallback(not_found_handler)
        .with_state(state)
}

pub async fn run_http_server(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    if config.news_api_key.is_none() {
        tracing::warn!("NEWS_API_KEY is not set; /api/news will answer with an error");
    }

    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "PAMM site listening");
    info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, app).await.context("server error")
}

async fn styles_handler() -> Response {
    asset_response("text/css; charset=utf-8", STYLES_CSS)
}

async fn main_js_handler() -> Response {
    asset_response("application/javascript; charset=utf-8", MAIN_JS)
}

async fn api_service_js_handler() -> Response {
    asset_response("application/javascript; charset=utf-8", API_SERVICE_JS)
}

async fn default_news_image_handler() -> Response {
    asset_response("image/svg+xml", DEFAULT_NEWS_SVG)
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn asset_response(content_type: &'static str, body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, content_type)], body).into_response()
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}


#[cfg(test)]
mod tests {
    use super::test_support::body_string;
    use super::*;

    #[tokio::test]
    async fn error_response_is_json_and_not_cached() {
        let response = error_response(StatusCode::NOT_FOUND, "Not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            "no-store"
        );
        let body = body_string(response).await;
        assert_eq!(body, r#"{"error":"Not found"}"#);
    }

    #[tokio::test]
    async fn assets_carry_their_content_type() {
        let css = styles_handler().await;
        assert_eq!(
            css.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );
        assert!(body_string(css).await.contains(".text-gain"));

        let js = main_js_handler().await;
        assert_eq!(
            js.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/javascript; charset=utf-8"
        );
        assert!(body_string(js).await.contains("simulator-form"));
    }

    #[tokio::test]
    async fn router_serves_every_route_and_falls_back_to_json_404() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let app = router(Arc::new(AppState::new(config).expect("client builds")));

        let pages = [
            ("/", "Home"),
            ("/what-is-pamm", "What is PAMM?"),
            ("/benefits", "Benefits"),
            ("/how-it-works", "How It Works"),
            ("/faq", "FAQ"),
            ("/contact", "Contact Us"),
        ];
        for (path, title) in pages {
            let request = Request::get(path).body(Body::empty()).expect("request");
            let response = app.clone().oneshot(request).await.expect("infallible");
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            let body = body_string(response).await;
            assert!(body.contains(&format!("<title>{title} | PAMM</title>")), "{path}");
        }

        let assets = [
            ("/css/styles.css", "text/css; charset=utf-8"),
            ("/js/main.js", "application/javascript; charset=utf-8"),
            ("/js/apiService.js", "application/javascript; charset=utf-8"),
            ("/images/default-news.svg", "image/svg+xml"),
        ];
        for (path, content_type) in assets {
            let request = Request::get(path).body(Body::empty()).expect("request");
            let response = app.clone().oneshot(request).await.expect("infallible");
            assert_eq!(response.status(), StatusCode::OK, "{path}");
            assert_eq!(
                response.headers().get(header::CONTENT_TYPE).unwrap(),
                content_type,
                "{path}"
            );
        }

        let request = Request::get("/healthz").body(Body::empty()).expect("request");
        let response = app.clone().oneshot(request).await.expect("infallible");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");

        let request = Request::get("/nope").body(Body::empty()).expect("request");
        let response = app.oneshot(request).await.expect("infallible");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, r#"{"error":"Not found"}"#);
    }
}
