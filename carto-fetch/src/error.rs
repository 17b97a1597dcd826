use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("not a sitemap document: {0}")]
    NotASitemap(String),

    #[error("gzip decode error: {0}")]
    Gzip(std::io::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;
