use crate::error::{FetchError, Result};
use flate2::read::GzDecoder;
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Callback for reporting fetch progress while walking a sitemap index
pub type FetchProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// A parsed sitemap XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// A leaf sitemap: the `<loc>` entries are page URLs.
    UrlSet(Vec<String>),
    /// A sitemap index: the `<loc>` entries point at further sitemap files.
    Index(Vec<String>),
}

/// Fetches a sitemap (or sitemap index) and extracts its flat URL list.
pub struct SitemapClient {
    client: Client,
    direct: bool,
    progress_callback: Option<FetchProgressCallback>,
}

impl SitemapClient {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("carto/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            direct: false,
            progress_callback: None,
        }
    }

    /// Treat the source as a leaf sitemap even when its root element says
    /// it is an index.
    pub fn with_direct(mut self, direct: bool) -> Self {
        self.direct = direct;
        self
    }

    pub fn with_progress_callback(mut self, callback: FetchProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Fetch the flat URL list for a sitemap or sitemap index.
    ///
    /// A sitemap index is resolved by fetching each child sitemap in
    /// document order and concatenating their URL lists. Gzip-compressed
    /// sitemap files (`.xml.gz`) are decompressed transparently.
    pub async fn fetch_url_list(&self, sitemap_url: &str) -> Result<Vec<String>> {
        Url::parse(sitemap_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{sitemap_url}: {e}")))?;

        let document = self.fetch_document(sitemap_url).await?;

        match parse_document(&document)? {
            SitemapDocument::UrlSet(urls) => {
                info!("Found {} URLs in {}", urls.len(), sitemap_url);
                Ok(urls)
            }
            SitemapDocument::Index(children) if self.direct => {
                // Caller insists this is a leaf sitemap; hand back its
                // entries as-is.
                Ok(children)
            }
            SitemapDocument::Index(children) => {
                info!("Sitemap index lists {} child sitemaps", children.len());

                let mut urls = Vec::new();
                for (i, child) in children.iter().enumerate() {
                    if let Some(ref callback) = self.progress_callback {
                        callback(format!(
                            "Searching sitemap {}/{}: {}",
                            i + 1,
                            children.len(),
                            child
                        ));
                    }

                    let document = self.fetch_document(child).await?;
                    match parse_document(&document)? {
                        SitemapDocument::UrlSet(mut child_urls) => {
                            if child_urls.is_empty() {
                                warn!("Child sitemap {} lists no URLs", child);
                            }
                            urls.append(&mut child_urls);
                        }
                        SitemapDocument::Index(_) => {
                            return Err(FetchError::NotASitemap(format!(
                                "nested sitemap index at {child}"
                            )));
                        }
                    }
                }

                info!("Found {} URLs across {} sitemaps", urls.len(), children.len());
                Ok(urls)
            }
        }
    }

    async fn fetch_document(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;

        // Sitemap files are often stored gzipped; reqwest only undoes
        // transport-level compression, so check the payload itself.
        if url.ends_with(".gz") || bytes.starts_with(&[0x1f, 0x8b]) {
            let mut decoder = GzDecoder::new(bytes.as_ref());
            let mut xml = String::new();
            decoder.read_to_string(&mut xml).map_err(FetchError::Gzip)?;
            Ok(xml)
        } else {
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

impl Default for SitemapClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a sitemap XML document, collecting its `<loc>` entries.
///
/// The root element decides the document kind: `<urlset>` is a leaf
/// sitemap, `<sitemapindex>` an index of further sitemaps. Anything else
/// is rejected.
pub fn parse_document(xml: &str) -> Result<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut root: Option<String> = None;
    let mut in_loc = false;
    let mut locations = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                if root.is_none() {
                    root = Some(name.clone());
                }
                in_loc = name == "loc";
            }
            Event::Text(ref e) if in_loc => {
                let text = e.unescape().unwrap_or_default().trim().to_string();
                if !text.is_empty() {
                    locations.push(text);
                }
            }
            Event::End(_) => in_loc = false,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    match root.as_deref() {
        Some("urlset") => Ok(SitemapDocument::UrlSet(locations)),
        Some("sitemapindex") => Ok(SitemapDocument::Index(locations)),
        Some(other) => Err(FetchError::NotASitemap(format!(
            "unexpected root element `{other}`"
        ))),
        None => Err(FetchError::NotASitemap("empty document".to_string())),
    }
}
