use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Response},
};
use serde::Deserialize;
use tracing::{debug, error};

use super::{AppState, with_cache_control};

const LAYOUT_HTML: &str = include_str!("../../web/templates/layout.html");
const HOME_HTML: &str = include_str!("../../web/templates/index.html");
const WHAT_IS_PAMM_HTML: &str = include_str!("../../web/templates/what-is-pamm.html");
const BENEFITS_HTML: &str = include_str!("../../web/templates/benefits.html");
const HOW_IT_WORKS_HTML: &str = include_str!("../../web/templates/how-it-works.html");
const FAQ_HTML: &str = include_str!("../../web/templates/faq.html");
const CONTACT_HTML: &str = include_str!("../../web/templates/contact.html");

const FAQ_ITEMS_SLOT: &str = "{{faq_items}}";

#[derive(Debug)]
pub struct Page {
    pub path: &'static str,
    pub title: &'static str,
    body: &'static str,
}

pub const STATIC_PAGES: &[Page] = &[
    Page {
        path: "/",
        title: "Home",
        body: HOME_HTML,
    },
    Page {
        path: "/what-is-pamm",
        title: "What is PAMM?",
        body: WHAT_IS_PAMM_HTML,
    },
    Page {
        path: "/benefits",
        title: "Benefits",
        body: BENEFITS_HTML,
    },
    Page {
        path: "/how-it-works",
        title: "How It Works",
        body: HOW_IT_WORKS_HTML,
    },
    Page {
        path: "/contact",
        title: "Contact Us",
        body: CONTACT_HTML,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

pub fn render(page: &Page) -> Response {
    html_page(page.title, page.body)
}

pub async fn faq_handler(State(state): State<Arc<AppState>>) -> Response {
    let faqs = load_faqs(&state.config.faq_path()).await;
    html_page("FAQ", &FAQ_HTML.replace(FAQ_ITEMS_SLOT, &render_faq_items(&faqs)))
}

/// Reads the FAQ list, degrading to an empty list on any failure.
pub async fn load_faqs(path: &Path) -> Vec<FaqEntry> {
    let data = match tokio::fs::read_to_string(path).await {
        Ok(data) => data,
        Err(err) => {
            error!(path = %path.display(), error = %err, "could not read FAQ file");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<FaqEntry>>(&data) {
        Ok(faqs) => {
            debug!(count = faqs.len(), "loaded FAQ entries");
            faqs
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "could not parse FAQ JSON");
            Vec::new()
        }
    }
}

fn render_faq_items(faqs: &[FaqEntry]) -> String {
    if faqs.is_empty() {
        return r#"<p class="faq-empty">No questions available right now.</p>"#.to_string();
    }

    faqs.iter()
        .map(|faq| {
            format!(
                "<details class=\"faq-item\">\n  <summary>{}</summary>\n  <p>{}</p>\n</details>",
                escape_html(&faq.question),
                escape_html(&faq.answer)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn html_page(title: &str, content: &str) -> Response {
    let html = LAYOUT_HTML
        .replace("{{title}}", &escape_html(title))
        .replace("{{content}}", content);
    with_cache_control(Html(html))
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
