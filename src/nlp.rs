//! Keyword ranking, title/body keyword merging and extractive summaries.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

/// Ranked `(keyword, score)` pairs, best first.
pub type KeywordScores = Vec<(String, f64)>;

/// Sentence boundary: terminal punctuation followed by whitespace.
#[allow(clippy::expect_used)]
static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.!?]+["')\]]*\s+"#).expect("valid regex"));

/// Sentences shorter than this (characters) are not summary candidates.
const MIN_SENTENCE_LEN: usize = 10;

/// Sentence length (in words) that scores best.
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

/// Lowercase word tokens of `text`, punctuation stripped.
#[must_use]
pub fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric() || *c == '\'')
                .collect::<String>()
                .trim_matches('\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Split `text` into sentences, dropping fragments too short to matter.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for m in SENTENCE_END_RE.find_iter(text) {
        let end = m.start() + m.as_str().trim_end().len();
        sentences.push(text[start..end].trim().to_string());
        start = m.end();
    }
    if start < text.len() {
        sentences.push(text[start..].trim().to_string());
    }
    sentences
        .into_iter()
        .map(|s| s.replace('\n', " "))
        .filter(|s| s.chars().count() > MIN_SENTENCE_LEN)
        .collect()
}

/// Rank the most frequent non-stopword terms of `text`.
///
/// Terms are ordered by frequency, ties by the term itself (both
/// descending); the top `limit` are scored `freq / total_words * 1.5 + 1`.
#[must_use]
pub fn keywords(text: &str, stopwords: &HashSet<&str>, limit: usize) -> KeywordScores {
    let words = split_words(text);
    if words.is_empty() {
        return Vec::new();
    }
    let total = words.len() as f64;

    let mut freq: HashMap<String, usize> = HashMap::new();
    for word in words {
        if !stopwords.contains(word.as_str()) {
            *freq.entry(word).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(word, count)| {
            let score = count as f64 / total * 1.5 + 1.0;
            (word, score)
        })
        .collect()
}

/// Merge body and title keyword rankings.
///
/// Terms present in both get the mean of their two scores; terms present in
/// one ranking keep their score. The result is sorted by descending score
/// (stable, so ties keep body order, then title order) and cut to `limit`.
#[must_use]
pub fn merge_keywords(body: KeywordScores, title: KeywordScores, limit: usize) -> KeywordScores {
    let mut merged = body;
    for (word, score) in title {
        match merged.iter_mut().find(|(w, _)| *w == word) {
            Some((_, existing)) => *existing = (*existing + score) / 2.0,
            None => merged.push((word, score)),
        }
    }
    merged.sort_by(|a, b| b.1.total_cmp(&a.1));
    merged.truncate(limit);
    merged
}

/// Pick the `max_sentences` best sentences of `text`, in original order.
#[must_use]
pub fn summarize(title: &str, text: &str, stopwords: &HashSet<&str>, max_sentences: usize) -> Vec<String> {
    if text.trim().is_empty() || max_sentences == 0 {
        return Vec::new();
    }

    let sentences = split_sentences(text);
    let keys: HashMap<String, f64> = keywords(text, stopwords, 10).into_iter().collect();
    let title_words: Vec<String> = split_words(title)
        .into_iter()
        .filter(|w| !stopwords.contains(w.as_str()))
        .collect();

    let count = sentences.len();
    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(i, sentence)| {
            let words = split_words(sentence);
            let title_feature = title_score(&title_words, &words, stopwords);
            let length = length_score(words.len());
            let position = sentence_position(i + 1, count);
            let frequency = (sbs(&words, &keys) + dbs(&words, &keys)) / 2.0 * 10.0;
            let total = (title_feature * 1.5 + frequency * 2.0 + length + position) / 4.0;
            (i, total)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(max_sentences);
    ranked.sort_by_key(|(i, _)| *i);

    ranked
        .into_iter()
        .filter_map(|(i, _)| sentences.get(i).cloned())
        .collect()
}

fn title_score(title_words: &[String], words: &[String], stopwords: &HashSet<&str>) -> f64 {
    if title_words.is_empty() {
        return 0.0;
    }
    let hits = words
        .iter()
        .filter(|w| !stopwords.contains(w.as_str()) && title_words.contains(w))
        .count();
    hits as f64 / title_words.len() as f64
}

fn length_score(words: usize) -> f64 {
    1.0 - (IDEAL_SENTENCE_WORDS - words as f64).abs() / IDEAL_SENTENCE_WORDS
}

/// Position weight; opening and closing sentences weigh most.
fn sentence_position(i: usize, size: usize) -> f64 {
    let normalized = i as f64 / size.max(1) as f64;
    match normalized {
        n if n > 1.0 => 0.0,
        n if n > 0.9 => 0.15,
        n if n > 0.8 => 0.04,
        n if n > 0.7 => 0.04,
        n if n > 0.6 => 0.06,
        n if n > 0.5 => 0.04,
        n if n > 0.4 => 0.05,
        n if n > 0.3 => 0.08,
        n if n > 0.2 => 0.14,
        n if n > 0.1 => 0.23,
        n if n > 0.0 => 0.17,
        _ => 0.0,
    }
}

/// Summation-based keyword density.
fn sbs(words: &[String], keys: &HashMap<String, f64>) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let score: f64 = words.iter().filter_map(|w| keys.get(w)).sum();
    score / words.len() as f64 / 10.0
}

/// Density-based keyword score: rewards keywords that appear close together.
fn dbs(words: &[String], keys: &HashMap<String, f64>) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    let mut previous: Option<(usize, f64)> = None;
    for (i, word) in words.iter().enumerate() {
        let Some(&score) = keys.get(word) else {
            continue;
        };
        if let Some((j, prev_score)) = previous {
            let gap = (i - j) as f64;
            sum += score * prev_score / (gap * gap);
        }
        previous = Some((i, score));
    }
    let distinct: HashSet<&String> = words.iter().filter(|w| keys.contains_key(*w)).collect();
    let k = distinct.len() as f64 + 1.0;
    sum / (k * (k + 1.0))
}
