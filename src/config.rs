use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_TESTIMONIALS_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Server settings, each overridable from the environment.
#[derive(Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,
    #[arg(
        long,
        env = "PAMM_DATA_DIR",
        default_value = "data",
        help = "Directory holding faq.json"
    )]
    pub data_dir: PathBuf,
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub news_api_key: Option<String>,
    #[arg(long, env = "NEWS_API_BASE_URL", default_value = DEFAULT_NEWS_BASE_URL)]
    pub news_base_url: String,
    #[arg(long, env = "TESTIMONIALS_BASE_URL", default_value = DEFAULT_TESTIMONIALS_BASE_URL)]
    pub testimonials_base_url: String,
    #[arg(
        long,
        env = "UPSTREAM_TIMEOUT_SECS",
        default_value_t = 10,
        help = "Timeout in seconds for news and testimonial upstream calls"
    )]
    pub upstream_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub news_api_key: Option<String>,
    pub news_base_url: String,
    pub testimonials_base_url: String,
    pub upstream_timeout: Duration,
}

impl Config {
    pub fn from_args(args: ServerArgs) -> Result<Self, String> {
        if args.upstream_timeout_secs == 0 {
            return Err("--upstream-timeout-secs must be > 0".to_string());
        }

        Ok(Self {
            port: args.port,
            data_dir: args.data_dir,
            news_api_key: args.news_api_key.filter(|key| !key.trim().is_empty()),
            news_base_url: trim_base_url(&args.news_base_url)?,
            testimonials_base_url: trim_base_url(&args.testimonials_base_url)?,
            upstream_timeout: Duration::from_secs(args.upstream_timeout_secs),
        })
    }

    pub fn faq_path(&self) -> PathBuf {
        self.data_dir.join("faq.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("data"),
            news_api_key: None,
            news_base_url: DEFAULT_NEWS_BASE_URL.to_string(),
            testimonials_base_url: DEFAULT_TESTIMONIALS_BASE_URL.to_string(),
            upstream_timeout: Duration::from_secs(10),
        }
    }
}

fn trim_base_url(url: &str) -> Result<String, String> {
    let trimmed = url.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!("base URL must start with http:// or https://: {url}"));
    }
    Ok(trimmed.to_string())
}
