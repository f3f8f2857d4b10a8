//! Document helpers shared by the source adapters.
//!
//! `scraper::Html` is not `Send`, so every function that parses returns owned
//! data and is never held across an `.await`.

use crate::domain::ports::{FetchedPage, Fetcher};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// One candidate report block: its visible text and the first link in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub link: Option<String>,
}

#[derive(Debug, Default)]
pub struct Selection {
    pub fragments: Vec<Fragment>,
    /// Name of the selector that matched, or `"whole-text"`.
    pub matched_by: Option<String>,
    pub diagnostics: Vec<String>,
}

/// Try `urls` in order and return the first usable page. Every skipped URL
/// leaves a diagnostic. Consecutive attempts are spaced by `delay`.
pub async fn fetch_first_usable(
    fetcher: &dyn Fetcher,
    urls: &[String],
    min_body_length: usize,
    delay: Duration,
    diagnostics: &mut Vec<String>,
) -> Option<FetchedPage> {
    for (i, url) in urls.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match fetcher.fetch(url).await {
            Ok(page) if page.is_usable(min_body_length) => {
                debug!("📄 Using {} ({} bytes)", url, page.body.len());
                return Some(page);
            }
            Ok(page) => {
                let reason = format!(
                    "{}: unusable response (status {}, {} bytes)",
                    url,
                    page.status,
                    page.body.len()
                );
                warn!("⚠️ {}", reason);
                diagnostics.push(reason);
            }
            Err(e) => {
                warn!("⚠️ {}: {}", url, e);
                diagnostics.push(format!("{}: {}", url, e));
            }
        }
    }
    None
}

/// Visible text of an element, whitespace-trimmed pieces joined by spaces.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Absolute form of `href` relative to the page it was found on.
pub fn resolve_link(base_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    match Url::parse(href) {
        Ok(absolute) => Some(absolute.to_string()),
        Err(_) => Url::parse(base_url)
            .and_then(|base| base.join(href))
            .ok()
            .map(|u| u.to_string()),
    }
}

fn first_link(element: ElementRef<'_>, base_url: &str, anchor: &Selector) -> Option<String> {
    if element.value().name() == "a" {
        if let Some(href) = element.value().attr("href") {
            return resolve_link(base_url, href);
        }
    }
    element
        .select(anchor)
        .filter_map(|a| a.value().attr("href"))
        .find_map(|href| resolve_link(base_url, href))
}

/// Select report fragments. Selectors are tried in order and the first one
/// with any match wins; at most `limit` fragments are returned. Invalid
/// selectors are skipped with a diagnostic. With `whole_text_fallback` a page
/// where nothing matches becomes a single fragment.
pub fn select_fragments(
    html: &str,
    base_url: &str,
    selectors: &[String],
    limit: usize,
    whole_text_fallback: bool,
) -> Selection {
    let document = Html::parse_document(html);
    let mut selection = Selection::default();
    let anchor = Selector::parse("a[href]").ok();

    for raw in selectors {
        let selector = match Selector::parse(raw) {
            Ok(selector) => selector,
            Err(e) => {
                selection
                    .diagnostics
                    .push(format!("invalid selector '{}': {}", raw, e));
                continue;
            }
        };

        let fragments: Vec<Fragment> = document
            .select(&selector)
            .map(|element| Fragment {
                text: element_text(element),
                link: anchor
                    .as_ref()
                    .and_then(|a| first_link(element, base_url, a)),
            })
            .filter(|f| !f.text.is_empty())
            .take(limit)
            .collect();

        if !fragments.is_empty() {
            selection.fragments = fragments;
            selection.matched_by = Some(raw.clone());
            return selection;
        }
    }

    if whole_text_fallback {
        let text = element_text(document.root_element());
        if !text.is_empty() {
            selection.fragments.push(Fragment { text, link: None });
            selection.matched_by = Some("whole-text".to_string());
        }
    } else {
        selection
            .diagnostics
            .push(format!("no selector matched on {}", base_url));
    }

    selection
}

/// Text of the first element matched by any of `selectors`, tried in order.
pub fn first_text(html: &str, selectors: &[String]) -> Option<String> {
    let document = Html::parse_document(html);
    selectors
        .iter()
        .filter_map(|raw| Selector::parse(raw).ok())
        .find_map(|selector| {
            document
                .select(&selector)
                .map(element_text)
                .find(|text| !text.is_empty())
        })
}
