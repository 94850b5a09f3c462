//! Template rendering and display-name resolution.

use super::remote::JsonFetcher;
use crate::domain::{ItemRecord, Slug};
use crate::error::RunError;
use std::path::Path;

pub const SLUG_PLACEHOLDER: &str = "{{SLUG}}";
pub const NAME_PLACEHOLDER: &str = "{{NAME}}";

/// Page template with literal placeholders
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a template file; a missing file is fatal for the run
    pub fn load(path: &Path) -> Result<Self, RunError> {
        if !path.is_file() {
            return Err(RunError::TemplateNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| RunError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { text })
    }

    /// Whether rendering needs a display name at all
    pub fn needs_name(&self) -> bool {
        self.text.contains(NAME_PLACEHOLDER)
    }

    /// Substitute `{{SLUG}}`, then `{{NAME}}`. Other placeholders stay verbatim.
    ///
    /// Without a resolved name the slug-derived fallback is used.
    pub fn render(&self, slug: &Slug, name: Option<&str>) -> String {
        let html = self.text.replace(SLUG_PLACEHOLDER, slug.as_str());
        if !html.contains(NAME_PLACEHOLDER) {
            return html;
        }
        let fallback;
        let name = match name {
            Some(name) => name,
            None => {
                fallback = slug.display_name();
                &fallback
            }
        };
        html.replace(NAME_PLACEHOLDER, name)
    }
}

/// Resolve the `{{NAME}}` value for a slug.
///
/// Probes the detail record when a detail URL is given; any fetch or shape
/// problem degrades to the slug-derived name and is logged, never returned.
pub async fn resolve_display_name<F: JsonFetcher>(
    fetcher: &F,
    detail_url: Option<&str>,
    slug: &Slug,
) -> String {
    let Some(url) = detail_url else {
        return slug.display_name();
    };

    match fetcher.get_json(url, &[]).await {
        Ok(document) => match ItemRecord::from_document(&document).and_then(|r| r.display_name()) {
            Some(name) => name,
            None => {
                tracing::debug!(slug = %slug, "detail record has no name field");
                slug.display_name()
            }
        },
        Err(e) => {
            tracing::warn!(
                slug = %slug,
                error = %e,
                "detail lookup failed, using slug-derived name"
            );
            slug.display_name()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slugify;
    use crate::error::{FetchError, FetchResult};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tempfile::TempDir;

    struct MapFetcher(HashMap<String, Value>);

    impl JsonFetcher for MapFetcher {
        async fn get_json(&self, url: &str, _params: &[(&str, &str)]) -> FetchResult<Value> {
            self.0.get(url).cloned().ok_or_else(|| FetchError::Decode {
                url: url.to_string(),
                reason: "unreachable".to_string(),
            })
        }
    }

    #[test]
    fn test_render_slug_and_name() {
        let template = Template::new("<h1>{{NAME}}</h1><a href=\"/drugs/{{SLUG}}/\">{{SLUG}}</a>");
        let html = template.render(&slugify("Drug A"), Some("Brand X"));
        insta::assert_snapshot!(html, @r#"<h1>Brand X</h1><a href="/drugs/drug-a/">drug-a</a>"#);
    }

    #[test]
    fn test_render_fallback_name() {
        let template = Template::new("<title>{{NAME}} savings</title>");
        let html = template.render(&slugify("insulin-lispro"), None);
        insta::assert_snapshot!(html, @"<title>Insulin Lispro savings</title>");
    }

    #[test]
    fn test_unknown_placeholders_left_verbatim() {
        let template = Template::new("{{SLUG}} {{PRICE}} {{ NAME }}");
        assert_eq!(template.render(&slugify("a"), None), "a {{PRICE}} {{ NAME }}");
        assert!(!template.needs_name());
    }

    #[test]
    fn test_load_missing_template() {
        let temp = TempDir::new().unwrap();
        let err = Template::load(&temp.path().join("index.html")).unwrap_err();
        assert!(matches!(err, RunError::TemplateNotFound(_)));
    }

    #[test]
    fn test_load_template() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.html");
        std::fs::write(&path, "{{NAME}}").unwrap();
        assert!(Template::load(&path).unwrap().needs_name());
    }

    #[tokio::test]
    async fn test_resolve_prefers_brand() {
        let url = "https://details.test/drug-a";
        let fetcher = MapFetcher(HashMap::from([(
            url.to_string(),
            json!({"item": {"title": "Y", "brand": "X"}}),
        )]));

        let name = resolve_display_name(&fetcher, Some(url), &slugify("drug-a")).await;
        assert_eq!(name, "X");
    }

    #[tokio::test]
    async fn test_resolve_degrades_on_failure() {
        let fetcher = MapFetcher(HashMap::new());
        let name =
            resolve_display_name(&fetcher, Some("https://details.test/gone"), &slugify("drug-b"))
                .await;
        assert_eq!(name, "Drug B");
    }

    #[tokio::test]
    async fn test_resolve_without_detail_source() {
        let fetcher = MapFetcher(HashMap::new());
        let name = resolve_display_name(&fetcher, None, &slugify("drug-c")).await;
        assert_eq!(name, "Drug C");
    }
}
