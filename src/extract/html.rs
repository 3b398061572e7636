//! Regex-level HTML helpers. Good enough for article bodies; not a DOM parser.

use std::sync::LazyLock;

use regex::Regex;

/// Elements removed together with their content before text extraction.
pub const NOISE_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "figure", "figcaption", "form",
    "button", "select", "noscript", "iframe", "svg",
];

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]+>").ok());
static COMMENT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").ok());
static NUMERIC_ENTITY: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").ok());
static NOISE_BLOCKS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    NOISE_TAGS
        .iter()
        .filter_map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).ok())
        .collect()
});
static META: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").ok());
static ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?i)([a-z:_-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).ok()
});

/// Replaces every tag with a space.
pub fn strip_tags(html: &str) -> String {
    match TAG.as_ref() {
        Some(re) => re.replace_all(html, " ").into_owned(),
        None => html.to_string(),
    }
}

/// Decodes the named entities common in news markup plus numeric references.
pub fn decode_entities(text: &str) -> String {
    let decoded = match NUMERIC_ENTITY.as_ref() {
        Some(re) => re
            .replace_all(text, |caps: &regex::Captures| {
                let raw = &caps[1];
                let code = match raw.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => raw.parse::<u32>().ok(),
                };
                code.and_then(char::from_u32)
                    .map(String::from)
                    .unwrap_or_default()
            })
            .into_owned(),
        None => text.to_string(),
    };

    decoded
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&rsquo;", "'")
        .replace("&lsquo;", "'")
        .replace("&rdquo;", "\"")
        .replace("&ldquo;", "\"")
        .replace("&mdash;", "-")
        .replace("&ndash;", "-")
        .replace("&hellip;", "...")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Removes comments and [`NOISE_TAGS`] blocks including their content.
pub fn drop_noise(html: &str) -> String {
    let mut out = match COMMENT.as_ref() {
        Some(re) => re.replace_all(html, " ").into_owned(),
        None => html.to_string(),
    };
    for re in NOISE_BLOCKS.iter() {
        out = re.replace_all(&out, " ").into_owned();
    }
    out
}

/// Inner HTML of every `<tag>` element (non-nested, case-insensitive).
pub fn elements<'a>(html: &'a str, tag: &str) -> Vec<&'a str> {
    let Ok(re) = Regex::new(&format!(r"(?is)<{tag}\b[^>]*>(.*?)</{tag}\s*>")) else {
        return Vec::new();
    };
    re.captures_iter(html)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Visible text: tags stripped, entities decoded, whitespace collapsed.
pub fn text_of(html: &str) -> String {
    collapse_whitespace(&decode_entities(&strip_tags(html)))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `og:title`, `og:description`, and `description` meta contents, then `<title>`,
/// deduplicated in that order.
pub fn meta_text(html: &str) -> String {
    let mut wanted: [(&str, Option<String>); 3] = [
        ("og:title", None),
        ("og:description", None),
        ("description", None),
    ];

    if let (Some(meta), Some(attr)) = (META.as_ref(), ATTR.as_ref()) {
        for tag in meta.find_iter(html) {
            let mut key = None;
            let mut content = None;
            for caps in attr.captures_iter(tag.as_str()) {
                let name = caps[1].to_ascii_lowercase();
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().to_string());
                match name.as_str() {
                    "property" | "name" => key = value.map(|v| v.to_ascii_lowercase()),
                    "content" => content = value,
                    _ => {}
                }
            }
            if let (Some(key), Some(content)) = (key, content) {
                for (wanted_key, slot) in wanted.iter_mut() {
                    if *wanted_key == key && slot.is_none() {
                        *slot = Some(content.clone());
                    }
                }
            }
        }
    }

    let title = elements(html, "title").first().map(|t| t.to_string());
    let mut parts: Vec<String> = Vec::new();
    for value in wanted.into_iter().map(|(_, v)| v).chain([title]).flatten() {
        let value = text_of(&value);
        if !value.is_empty() && !parts.contains(&value) {
            parts.push(value);
        }
    }
    parts.join(" ")
}
