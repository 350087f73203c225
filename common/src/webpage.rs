use lazy_static::lazy_static;
use scraper::{Html, Selector};
use url::Url;

use crate::words::extract_words;

pub type Depth = u32;

lazy_static! {
    static ref SEL_A: Selector = Selector::parse("a[href]").expect("valid selector");
}

/// A fetched (or reloaded) web page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub depth: Depth,
    pub html: String,
}

impl Page {
    pub fn new(url: impl Into<String>, depth: Depth, html: impl Into<String>) -> Self {
        Self { url: url.into(), depth, html: html.into() }
    }

    /// Byte length of the stored html.
    pub fn html_len(&self) -> usize { self.html.len() }

    /// Absolute http(s) links of the page in document order, fragments removed.
    /// Relative hrefs are resolved against the page URL; anything that does not
    /// resolve is skipped.
    pub fn urls(&self) -> impl Iterator<Item = String> {
        let base = Url::parse(&self.url).ok();
        let doc = Html::parse_document(&self.html);
        let mut links = Vec::new();
        for a in doc.select(&SEL_A) {
            let Some(href) = a.value().attr("href") else { continue };
            let resolved = Url::parse(href).or_else(|e| match &base {
                Some(b) => b.join(href),
                None => Err(e),
            });
            if let Ok(u) = resolved {
                if u.scheme() == "http" || u.scheme() == "https" {
                    links.push(normalize_url(&u));
                }
            }
        }
        links.into_iter()
    }

    /// Raw word candidates from the visible text of the page.
    pub fn words(&self) -> impl Iterator<Item = String> {
        let doc = Html::parse_document(&self.html);
        let text = doc.root_element().text().collect::<Vec<_>>().join(" ");
        extract_words(&text).into_iter()
    }
}

/// Canonical string form used for seen-set keys.
pub fn normalize_url(u: &Url) -> String {
    let mut s = u.clone();
    s.set_fragment(None);
    s.to_string()
}
