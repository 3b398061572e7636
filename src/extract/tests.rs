use super::html::*;
use super::*;

const ARTICLE: &str = r#"<!doctype html>
<html><head>
  <title>DOH confirms free vaccines | Inquirer</title>
  <meta property="og:title" content="DOH confirms free vaccines">
  <meta name="description" content='Health department says jabs are free &amp; available'>
  <script>var tracking = "<p>not article text</p>";</script>
  <style>p { color: red }</style>
</head><body>
  <nav><p>Home | News | Sports | Entertainment | Lifestyle | Opinion | Business | Technology</p></nav>
  <article>
    <h1>DOH confirms free vaccines</h1>
    <p>The Department of Health on Monday said that vaccines are free for all Filipinos.</p>
    <p>Health Secretary said walk-in vaccination is available at all &quot;health centers&quot;.</p>
  </article>
  <footer><p>Copyright Inquirer</p></footer>
</body></html>"#;

#[test]
fn test_strip_and_decode() {
    assert_eq!(text_of("<b>Hello</b>&nbsp;<i>world</i> &amp; co"), "Hello world & co");
    assert_eq!(decode_entities("&#72;&#x69;&#39;"), "Hi'");
    assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
}

#[test]
fn test_drop_noise_removes_blocks() {
    let cleaned = drop_noise(ARTICLE);
    assert!(!cleaned.contains("tracking"));
    assert!(!cleaned.contains("Copyright"));
    assert!(!cleaned.contains("Sports"));
    assert!(cleaned.contains("Department of Health"));
}

#[test]
fn test_article_paragraphs_are_extracted() {
    let text = extract_article_text(ARTICLE);
    assert!(text.starts_with("The Department of Health on Monday"));
    assert!(text.contains("\"health centers\""));
    assert!(!text.contains("not article text"));
    assert!(!text.contains("Copyright"));
}

#[test]
fn test_thin_page_prefers_metadata() {
    let html = r#"<html><head><title>Short</title>
        <meta property="og:title" content="Typhoon signal no. 3 raised over Metro Manila">
        <meta property="og:description" content="PAGASA raised signal no. 3 as the typhoon nears">
        </head><body><div id="app"></div></body></html>"#;
    let text = extract_article_text(html);
    assert_eq!(
        text,
        "Typhoon signal no. 3 raised over Metro Manila PAGASA raised signal no. 3 as the typhoon nears Short"
    );
}

#[test]
fn test_meta_text_dedupes() {
    let html = r#"<title>Same</title><meta property="og:title" content="Same">"#;
    assert_eq!(meta_text(html), "Same");
}

#[test]
fn test_slug_to_text() {
    assert_eq!(
        slug_to_text("https://www.inquirer.net/123/live-updates-duterte-icc/"),
        "live updates duterte icc from inquirer.net"
    );
    assert_eq!(slug_to_text("https://rappler.com/12345"), "rappler.com");
}

#[tokio::test]
async fn test_scraper_rejects_non_http_urls() {
    let scraper = UrlScraper::default();
    let err = scraper.extract("ftp://example.com/file").await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidUrl { .. }));

    let err = scraper.extract("https://").await.unwrap_err();
    assert!(matches!(err, ExtractError::InvalidUrl { .. }));
}
