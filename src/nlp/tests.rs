use super::*;
use crate::scoring::Language;

#[test]
fn test_clean_strips_markup_links_and_mentions() {
    let p = Preprocessor::new();
    let cleaned = p.clean("<b>GRABE</b> @juan tingnan https://bit.ly/x #Balita 😱 ngayon");
    assert_eq!(cleaned, "grabe tingnan balita ngayon");
}

#[test]
fn test_normalize_squeezes_repeats_and_punctuation() {
    let p = Preprocessor::new();
    assert_eq!(p.normalize("graaaabe!!! totoo???"), "graabe totoo");
    assert_eq!(p.normalize("'di ba, talaga."), "'di ba talaga");
}

#[test]
fn test_preprocess_tokens_and_stopwords() {
    let result = Preprocessor::new().preprocess("Ang DOH ay nagbigay ng libreng bakuna sa Manila");

    assert_eq!(
        result.tokens,
        vec!["ang", "doh", "ay", "nagbigay", "ng", "libreng", "bakuna", "sa", "manila"]
    );
    assert_eq!(
        result.filtered_tokens,
        vec!["doh", "nagbigay", "libreng", "bakuna", "manila"]
    );
    assert_eq!(result.word_count, 9);
}

#[test]
fn test_single_char_tokens_dropped() {
    let tokens = Preprocessor::new().tokenize("a b cd e fg");
    assert_eq!(tokens, vec!["cd", "fg"]);
}

#[test]
fn test_language_tagalog() {
    let result = LanguageDetector::new().detect("Ang mga tao sa barangay ay hindi pa nabakunahan");
    assert_eq!(result.language, Language::Tagalog);
    assert!(result.confidence >= 0.25);
}

#[test]
fn test_language_english() {
    let result = LanguageDetector::new()
        .detect("The government said that the vaccines are free and they will be available");
    assert_eq!(result.language, Language::English);
}

#[test]
fn test_language_taglish() {
    let result = LanguageDetector::new()
        .detect("Grabe ang traffic sa EDSA, the government should fix this na talaga");
    assert_eq!(result.language, Language::Taglish);
    assert!(result.tagalog_ratio >= 0.10);
    assert!(result.english_ratio >= 0.10);
}

#[test]
fn test_language_short_text_unknown() {
    let result = LanguageDetector::new().detect("  ok ");
    assert_eq!(result.language, Language::Unknown);
    assert_eq!(result.confidence, 0.0);
}

#[test]
fn test_language_without_markers_is_uncertain_taglish() {
    let result = LanguageDetector::new().detect("Typhoon Carina damage Isabela province");
    assert_eq!(result.language, Language::Taglish);
    assert_eq!(result.confidence, 0.4);
}

#[test]
fn test_entities_hints_and_dates() {
    let entities = EntityExtractor::new().extract(
        "Marcos and the DOH met in Quezon City on January 5, 2025; Marcos later flew to Cebu on 2025-01-07",
    );

    assert_eq!(entities.persons, vec!["Marcos"]);
    assert_eq!(entities.organizations, vec!["DOH"]);
    assert_eq!(entities.locations, vec!["Quezon City", "Cebu"]);
    assert_eq!(entities.dates, vec!["January 5, 2025", "2025-01-07"]);
}

#[test]
fn test_entities_match_whole_words_only() {
    let entities = EntityExtractor::new().extract("Paano ba ito gawin sa Manila?");
    assert!(entities.persons.is_empty());
    assert_eq!(entities.locations, vec!["Manila"]);
}

#[test]
fn test_sentiment_high_negative_and_anger() {
    let result = SentimentAnalyzer::new().analyze("fake hoax scam nakakagalit");
    assert_eq!(result.sentiment, Sentiment::HighNegative);
    assert_eq!(result.sentiment_score, -1.0);
    assert_eq!(result.emotion, Emotion::Anger);
    assert!(result.emotion_score > 0.0 && result.emotion_score <= 1.0);
}

#[test]
fn test_sentiment_positive_joy() {
    let result = SentimentAnalyzer::new().analyze("salamat sa maayos na tulong ng barangay");
    assert_eq!(result.sentiment, Sentiment::HighPositive);
    assert_eq!(result.emotion, Emotion::Joy);
}

#[test]
fn test_sentiment_neutral_without_lexicon_hits() {
    let result = SentimentAnalyzer::new().analyze("the senate convened this afternoon");
    assert_eq!(result.sentiment, Sentiment::Neutral);
    assert_eq!(result.emotion, Emotion::Neutral);
    assert_eq!(result.emotion_score, 0.0);
}

#[test]
fn test_sentiment_serializes_display_form() {
    let json = serde_json::to_string(&Sentiment::HighNegative).unwrap();
    assert_eq!(json, "\"high negative\"");
}

#[test]
fn test_clickbait_fires_on_caps_and_phrases() {
    let result = ClickbaitDetector::new().detect("SHOCKING!!! You won't believe what DOH did");

    assert!(result.is_clickbait);
    assert!(result.score >= CLICKBAIT_THRESHOLD);
    assert!(result.triggered_patterns.iter().any(|p| p.starts_with("all_caps_words")));
    assert!(result.triggered_patterns.contains(&"excessive_punctuation".to_string()));
    assert!(
        result
            .triggered_patterns
            .iter()
            .any(|p| p.starts_with("clickbait_phrase"))
    );
}

#[test]
fn test_clickbait_plain_headline_is_not_clickbait() {
    let result = ClickbaitDetector::new()
        .detect("Senate passes revised budget bill on third reading after long debate");
    assert!(!result.is_clickbait);
    assert_eq!(result.score, 0.0);
}

#[test]
fn test_clickbait_score_capped_at_one() {
    let result = ClickbaitDetector::new().detect(
        "SHOCKING VIRAL BREAKING!!! 5 reasons bakit secret exposed scandal hoax trending?",
    );
    assert_eq!(result.score, 1.0);
}

#[test]
fn test_claim_passthrough_for_short_text() {
    let result = ClaimExtractor::new().extract("  libreng kuryente ");
    assert_eq!(result.claim, "libreng kuryente");
    assert_eq!(result.method, ClaimMethod::Passthrough);
}

#[test]
fn test_claim_takes_first_two_long_sentences() {
    let text = "Wow. The DOH announced free vaccines for all seniors. Distribution starts Monday in Manila. Details follow later today.";
    let result = ClaimExtractor::new().extract(text);
    assert_eq!(
        result.claim,
        "The DOH announced free vaccines for all seniors. Distribution starts Monday in Manila."
    );
    assert_eq!(result.method, ClaimMethod::SentenceHeuristic);
}

#[test]
fn test_claim_falls_back_to_prefix() {
    let text = "Short. Tiny! Small? ".repeat(20);
    let result = ClaimExtractor::new().extract(&text);
    assert!(result.claim.chars().count() <= 200);
    assert!(result.claim.starts_with("Short. Tiny!"));
}

#[test]
fn test_analyzer_uses_cleaned_text_for_claim() {
    let analysis = NlpAnalyzer::new()
        .analyze("BREAKING: Marcos says libreng kuryente simula bukas! https://fake.example/post");

    assert_eq!(analysis.entities.persons, vec!["Marcos"]);
    assert!(!analysis.claim.claim.contains("https://"));
    assert_eq!(analysis.claim.claim, analysis.claim.claim.to_lowercase());
    assert!(analysis.clickbait.triggered_patterns.iter().any(|p| p.contains("BREAKING")));
}
