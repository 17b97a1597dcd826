pub mod error;
pub mod sitemap;

pub use error::{FetchError, Result};
pub use sitemap::{FetchProgressCallback, SitemapClient, SitemapDocument, parse_document};
