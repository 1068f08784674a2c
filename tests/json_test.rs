//! JSON output of parsed articles.

#![allow(clippy::expect_used)] // expect() is appropriate in tests for clear panic messages

mod common;

use common::{article_with, ScriptedTransport, NEWS_PAGE};
use rs_newspaper::{Article, ArticleJson, Error, Options, DEFAULT_JSON_FIELDS};
use serde_json::{json, Value};

const URL: &str = "https://news.example.com/2024/03/01/harbor-bridge-reopens";

fn parsed_with(options: Options) -> Article {
    let transport = ScriptedTransport::new().shared();
    let mut article = article_with(URL, &transport, options);
    article.download_html(NEWS_PAGE).expect("download");
    article.parse().expect("parse");
    article.nlp().expect("nlp");
    article
}

#[test]
fn json_requires_parse() {
    let article = Article::new(URL).expect("article");
    assert!(matches!(article.to_json(), Err(Error::NotParsed)));
    assert!(matches!(article.to_json_value(), Err(Error::NotParsed)));
}

#[test]
fn default_whitelist_emits_every_field() {
    let article = parsed_with(Options::default());
    let value = article.to_json_value().expect("json");

    let object = value.as_object().expect("object");
    assert_eq!(object.len(), DEFAULT_JSON_FIELDS.len());
    for field in DEFAULT_JSON_FIELDS {
        assert!(object.contains_key(*field), "missing {field}");
    }
    assert_eq!(value["title"], "Harbor bridge reopens after two years of repairs");
    assert_eq!(value["language"], "en");
    assert_eq!(value["authors"], json!(["Maria Lopez"]));
    assert_eq!(value["read_more_link"], "");
}

#[test]
fn publish_date_is_iso8601() {
    let article = parsed_with(Options::default());
    let value = article.to_json_value().expect("json");

    let date = value["publish_date"].as_str().expect("date string");
    assert!(date.starts_with("2024-03-01T"), "{date}");
    assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
}

#[test]
fn round_trip_reproduces_values() {
    let article = parsed_with(Options::default());
    let text = article.to_json().expect("json");

    let mut restored: ArticleJson = serde_json::from_str(&text).expect("deserialize");
    let mut original = ArticleJson::from(&article);
    assert_eq!(restored.publish_date, article.publish_date);

    // Scores are floats; compare them within tolerance, everything else exactly.
    let restored_scores = std::mem::take(&mut restored.keyword_scores);
    let original_scores = std::mem::take(&mut original.keyword_scores);
    assert_eq!(
        restored_scores.keys().collect::<Vec<_>>(),
        original_scores.keys().collect::<Vec<_>>()
    );
    for (word, score) in &original_scores {
        assert!((restored_scores[word] - score).abs() < 1e-12, "{word}");
    }
    assert_eq!(restored, original);
}

#[test]
fn custom_whitelist_and_additional_data() {
    let options = Options {
        json_fields: vec!["title".into(), "section".into(), "nonexistent".into()],
        ..Options::default()
    };
    let mut article = parsed_with(options);
    article.additional_data.insert("section".into(), json!("Local"));

    let value = article.to_json_value().expect("json");

    assert_eq!(
        value,
        json!({
            "title": "Harbor bridge reopens after two years of repairs",
            "section": "Local",
            "nonexistent": Value::Null,
        })
    );
}

#[test]
fn pretty_output_is_valid_json() {
    let article = parsed_with(Options::default());
    let text = article.to_json().expect("json");

    assert!(text.contains('\n'));
    let reparsed: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(reparsed["title"], article.title());
    assert_eq!(reparsed["links"], Value::Null);
    assert_eq!(reparsed.as_object().map(serde_json::Map::len), Some(DEFAULT_JSON_FIELDS.len()));
}
