//! Fetch-and-extract operations and the in-memory site crawl

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{FetchError, FetchProfile, Fetcher};
use crate::crawler::frontier::Frontier;
use crate::extract::{extract, ExtractionResult};
use crate::url::{canonicalize, domain_of, same_domain};
use crate::Result;

/// The fetched and extracted homepage
#[derive(Debug, Clone)]
pub struct SeedPage {
    /// Canonical URL the seed resolved to after redirects; links are
    /// classified against this host
    pub base_url: String,
    pub extraction: ExtractionResult,
}

/// How a single page fetch ended
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome {
    Scraped(ExtractionResult),
    /// The URL, or where it redirected to, is not on the crawled site
    CrossOrigin,
    Failed(FetchError),
}

impl PageOutcome {
    pub fn into_extraction(self) -> Option<ExtractionResult> {
        match self {
            Self::Scraped(extraction) => Some(extraction),
            Self::CrossOrigin | Self::Failed(_) => None,
        }
    }
}

/// One page visited by [`Scraper::crawl`]
#[derive(Debug, Clone)]
pub struct CrawledPage {
    pub url: String,
    pub depth: u32,
    pub outcome: PageOutcome,
}

/// Fetches pages and runs the extractor on them
#[derive(Debug, Clone)]
pub struct Scraper {
    fetcher: Fetcher,
    config: CrawlerConfig,
}

impl Scraper {
    pub fn new(fetcher: Fetcher, config: CrawlerConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Fetches and extracts the homepage with the seed profile
    ///
    /// Transport errors and non-2xx responses are returned as errors.
    pub async fn scrape_seed(&self, url: &str) -> Result<ExtractionResult> {
        Ok(self.fetch_seed(url).await?.extraction)
    }

    /// Like [`Scraper::scrape_seed`] but also reports where the seed landed
    pub async fn fetch_seed(&self, url: &str) -> Result<SeedPage> {
        let doc = self
            .fetcher
            .get(url, FetchProfile::seed(&self.config))
            .await?;

        let extraction = extract(&doc.body, &doc.final_url);
        let base_url = canonicalize(&doc.final_url).unwrap_or_else(|| doc.final_url.clone());

        tracing::debug!(
            "Seed {} -> {} ({} internal links)",
            url,
            base_url,
            extraction.internal_links.len()
        );

        Ok(SeedPage {
            base_url,
            extraction,
        })
    }

    /// Fetches and extracts one page of the site rooted at `base_url`
    ///
    /// Returns `None` for cross-domain URLs and for any failure.
    pub async fn scrape_page(&self, url: &str, base_url: &str) -> Option<ExtractionResult> {
        self.fetch_page_outcome(url, base_url).await.into_extraction()
    }

    /// Fetches one page and keeps the reason when it fails
    pub async fn fetch_page_outcome(&self, url: &str, base_url: &str) -> PageOutcome {
        if !same_domain(url, base_url) {
            tracing::debug!("Skipping cross-origin URL {}", url);
            return PageOutcome::CrossOrigin;
        }

        match self.fetcher.get(url, FetchProfile::page(&self.config)).await {
            Ok(doc) => {
                if domain_of(&doc.final_url) != domain_of(base_url) {
                    tracing::debug!("{} redirected off-site to {}", url, doc.final_url);
                    return PageOutcome::CrossOrigin;
                }
                PageOutcome::Scraped(extract(&doc.body, &doc.final_url))
            }
            Err(e) => PageOutcome::Failed(e),
        }
    }

    /// Crawls a site breadth-first without persisting anything
    ///
    /// The seed is returned first at depth 0, followed by every page fetched
    /// in visit order. Fails only when the seed itself cannot be fetched.
    pub async fn crawl(&self, seed: &str) -> Result<Vec<CrawledPage>> {
        let seed_page = self.fetch_seed(seed).await?;
        let base = seed_page.base_url.clone();

        let mut frontier = Frontier::new(&base, self.config.max_depth, self.config.max_pages);
        frontier.admit(&seed_page.extraction.internal_links, 1);

        let mut pages = vec![CrawledPage {
            url: base.clone(),
            depth: 0,
            outcome: PageOutcome::Scraped(seed_page.extraction),
        }];

        while let Some(entry) = frontier.next() {
            tokio::time::sleep(self.config.politeness_delay()).await;

            let outcome = self.fetch_page_outcome(&entry.url, &base).await;
            frontier.record_resolved();

            match &outcome {
                PageOutcome::Scraped(extraction) => {
                    if frontier.can_expand(entry.depth) {
                        frontier.admit(&extraction.internal_links, entry.depth + 1);
                    }
                }
                PageOutcome::Failed(e) => tracing::warn!("Failed to fetch {}: {}", entry.url, e),
                PageOutcome::CrossOrigin => {}
            }

            pages.push(CrawledPage {
                url: entry.url,
                depth: entry.depth,
                outcome,
            });
        }

        tracing::info!(
            "Crawled {}: {} pages visited, {} admitted",
            base,
            frontier.resolved(),
            frontier.admitted()
        );

        Ok(pages)
    }
}
