//! Documentation fetching: sitemap expansion and page text extraction.

use anyhow::Context;
use regex::Regex;
use tracing::debug;

/// A fetched documentation page, reduced to title and readable text.
pub struct Page {
    pub url: String,
    pub title: Option<String>,
    pub text: String,
}

/// Extracts page URLs from a sitemap XML body (`<loc>` entries).
pub fn parse_sitemap(xml: &str) -> anyhow::Result<Vec<String>> {
    let loc = Regex::new(r"<loc>\s*([^<]+?)\s*</loc>").context("sitemap pattern")?;
    Ok(loc
        .captures_iter(xml)
        .map(|c| c[1].to_string())
        .collect())
}

/// Fetches a sitemap and returns the listed page URLs.
pub async fn fetch_sitemap_urls(
    http: &reqwest::Client,
    sitemap_url: &str,
) -> anyhow::Result<Vec<String>> {
    let xml = http
        .get(sitemap_url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("fetch sitemap {}", sitemap_url))?
        .text()
        .await?;
    let urls = parse_sitemap(&xml)?;
    debug!(count = urls.len(), "sitemap parsed");
    Ok(urls)
}

/// Fetches one page and extracts its title and markdown-ish text.
pub async fn fetch_page(http: &reqwest::Client, url: &str) -> anyhow::Result<Page> {
    let html = http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("fetch page {}", url))?
        .text()
        .await?;
    let (title, text) = extract_content(&html);
    Ok(Page {
        url: url.to_string(),
        title,
        text,
    })
}

/// Title from `<title>`, body converted to markdown text.
fn extract_content(html: &str) -> (Option<String>, String) {
    let title = scraper::Selector::parse("title").ok().and_then(|selector| {
        let document = scraper::Html::parse_document(html);
        document
            .select(&selector)
            .next()
            .map(|t| t.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    });
    let text = html2md::parse_html(html);
    (title, text)
}
