//! Page scraping: fetch a URL and reduce it to its visible text.

use super::remote::RemoteClient;
use crate::error::FetchResult;

/// Elements whose content is never visible
const HIDDEN_ELEMENTS: [&str; 5] = ["head", "script", "style", "noscript", "template"];

/// Elements that start a new line of text
const BLOCK_ELEMENTS: [&str; 22] = [
    "address", "article", "br", "div", "dd", "dt", "footer", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "p", "section", "table", "tr",
];

/// Source of visible page text
#[allow(async_fn_in_trait)]
pub trait PageScraper {
    async fn visible_text(&self, url: &str) -> FetchResult<String>;
}

/// Fetches server-rendered HTML; no script execution
#[derive(Debug, Clone)]
pub struct StaticPageScraper {
    client: RemoteClient,
}

impl StaticPageScraper {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

impl PageScraper for StaticPageScraper {
    async fn visible_text(&self, url: &str) -> FetchResult<String> {
        let html = self.client.get_text(url).await?;
        let text = visible_text(&html);
        tracing::debug!(url, chars = text.len(), "scraped page text");
        Ok(text)
    }
}

/// Reduce an HTML document to its visible text, one block per line
pub fn visible_text(html: &str) -> String {
    let shown = remove_hidden(html);
    let flat = flatten_tags(&shown);
    let decoded = decode_entities(&flat);

    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop `<tag ...> ... </tag>` for every hidden element (ASCII case-insensitive)
fn remove_hidden(html: &str) -> String {
    let mut out = html.to_string();
    for tag in HIDDEN_ELEMENTS {
        let open = format!("<{}", tag);
        let close = format!("</{}", tag);
        loop {
            // ASCII lowercasing keeps byte offsets aligned with `out`
            let lower = out.to_ascii_lowercase();
            let Some(start) = find_open_tag(&lower, &open) else {
                break;
            };
            let end = lower[start..]
                .find(&close)
                .and_then(|rel| {
                    let close_at = start + rel;
                    lower[close_at..].find('>').map(|gt| close_at + gt + 1)
                })
                .unwrap_or(out.len());
            out.replace_range(start..end, "\n");
        }
    }
    out
}

/// Position of `<tag` followed by a delimiter, so `<header` is not taken for `<head`
fn find_open_tag(lower: &str, open: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = lower[from..].find(open) {
        let at = from + rel;
        match lower[at + open.len()..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_ascii_whitespace() => return Some(at),
            None => return Some(at),
            _ => from = at + open.len(),
        }
    }
    None
}

/// Strip tags; block-level tags become line breaks
fn flatten_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let after = &rest[lt + 1..];
        let Some(gt) = after.find('>') else {
            rest = "";
            break;
        };
        let name: String = after[..gt]
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if BLOCK_ELEMENTS.contains(&name.as_str()) {
            out.push('\n');
        }
        rest = &after[gt + 1..];
    }
    out.push_str(rest);
    out
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
