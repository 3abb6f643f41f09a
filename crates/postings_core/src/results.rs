use url::Url;

/// Placeholder the ranking backend writes for missing metadata.
const MISSING_PLACEHOLDER: &str = "N/A";

/// One search hit, in the order the backend ranked it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RankedResult {
    pub id: Option<String>,
    pub title: String,
    pub snippet: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub display_url: Option<String>,
}

impl RankedResult {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLink {
    pub href: String,
    pub label: String,
}

/// Display row for one ranked result. Rows carry no interactive state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub excerpt: String,
    pub link: Option<ResultLink>,
}

/// Maps results to rows, one per result, in the same order.
pub fn result_rows(results: &[RankedResult]) -> Vec<ResultRow> {
    results.iter().map(result_row).collect()
}

pub fn result_row(result: &RankedResult) -> ResultRow {
    let title = present(Some(result.title.as_str()))
        .unwrap_or("Untitled posting")
        .to_string();
    let excerpt = present(result.snippet.as_deref())
        .or_else(|| present(result.description.as_deref()))
        .unwrap_or_default()
        .to_string();
    ResultRow {
        title,
        excerpt,
        link: result_link(result),
    }
}

fn result_link(result: &RankedResult) -> Option<ResultLink> {
    let href = present(result.url.as_deref())?;
    let parsed = Url::parse(href).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }
    let label = present(result.display_url.as_deref())
        .map(str::to_string)
        .or_else(|| parsed.host_str().map(|host| host.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| href.to_string());
    Some(ResultLink {
        href: href.to_string(),
        label,
    })
}

fn present(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != MISSING_PLACEHOLDER)
}
