use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use super::{AppState, error_response, json_response};
use crate::config::Config;

const NEWS_QUERY: &str = "fintech";
const TESTIMONIAL_LIMIT: &str = "3";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("NEWS_API_KEY is not configured")]
    MissingApiKey,
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream responded with status {0}")]
    UpstreamStatus(reqwest::StatusCode),
    #[error("upstream body could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct NewsEnvelope {
    articles: Vec<Value>,
}

/// Latest fintech articles, newest first.
pub async fn fetch_news(client: &reqwest::Client, config: &Config) -> Result<Value, ProxyError> {
    let api_key = config
        .news_api_key
        .as_deref()
        .ok_or(ProxyError::MissingApiKey)?;
    let url = format!("{}/v2/everything", config.news_base_url);
    debug!(%url, query = NEWS_QUERY, "fetching news");

    let request = client.get(&url).query(&[
        ("q", NEWS_QUERY),
        ("sortBy", "publishedAt"),
        ("language", "en"),
        ("apiKey", api_key),
    ]);
    let body = send_checked(request).await?;
    let envelope: NewsEnvelope = serde_json::from_slice(&body)?;
    Ok(Value::Array(envelope.articles))
}

pub async fn fetch_testimonials(
    client: &reqwest::Client,
    config: &Config,
) -> Result<Value, ProxyError> {
    let url = format!("{}/posts", config.testimonials_base_url);
    debug!(%url, "fetching testimonials");

    let request = client.get(&url).query(&[("_limit", TESTIMONIAL_LIMIT)]);
    let body = send_checked(request).await?;
    Ok(serde_json::from_slice(&body)?)
}

async fn send_checked(request: reqwest::RequestBuilder) -> Result<Vec<u8>, ProxyError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProxyError::UpstreamStatus(status));
    }
    Ok(response.bytes().await?.to_vec())
}

pub async fn news_handler(State(state): State<Arc<AppState>>) -> Response {
    match fetch_news(&state.client, &state.config).await {
        Ok(articles) => json_response(StatusCode::OK, articles),
        Err(err) => {
            error!(error = %err, "error fetching news");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch news")
        }
    }
}

pub async fn testimonials_handler(State(state): State<Arc<AppState>>) -> Response {
    match fetch_testimonials(&state.client, &state.config).await {
        Ok(testimonials) => json_response(StatusCode::OK, testimonials),
        Err(err) => {
            error!(error = %err, "error fetching testimonials");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch testimonials",
            )
        }
    }
}
