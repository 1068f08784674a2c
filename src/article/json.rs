//! JSON rendering of a parsed article.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Article;
use crate::error::Result;

/// Serializable snapshot of the public fields of an [`Article`].
///
/// `publish_date` is written as ISO-8601. Every field defaults when absent,
/// so a whitelisted subset deserializes too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleJson {
    pub url: String,
    pub read_more_link: String,
    pub language: String,
    pub title: String,
    pub top_image: String,
    pub meta_img: String,
    pub images: Vec<String>,
    pub movies: Vec<String>,
    pub keywords: Vec<String>,
    pub keyword_scores: BTreeMap<String, f64>,
    pub meta_keywords: Vec<String>,
    pub tags: BTreeSet<String>,
    pub authors: Vec<String>,
    pub publish_date: Option<DateTime<Utc>>,
    pub summary: String,
    pub meta_description: String,
    pub meta_lang: String,
    pub meta_favicon: String,
    pub meta_site_name: String,
    pub canonical_link: String,
    pub text: String,
}

impl From<&Article> for ArticleJson {
    fn from(article: &Article) -> Self {
        Self {
            url: article.url.clone(),
            read_more_link: article.read_more_link.clone(),
            language: article.language().to_string(),
            title: article.title.clone(),
            top_image: article.top_image.clone(),
            meta_img: article.meta_img.clone(),
            images: article.images.clone(),
            movies: article.movies.clone(),
            keywords: article.keywords.clone(),
            keyword_scores: article.keyword_scores.clone(),
            meta_keywords: article.meta_keywords.clone(),
            tags: article.tags.clone(),
            authors: article.authors.clone(),
            publish_date: article.publish_date,
            summary: article.summary.clone(),
            meta_description: article.meta_description.clone(),
            meta_lang: article.meta_lang.clone(),
            meta_favicon: article.meta_favicon.clone(),
            meta_site_name: article.meta_site_name.clone(),
            canonical_link: article.canonical_link.clone(),
            text: article.text.clone(),
        }
    }
}

impl Article {
    /// Whitelisted fields (`Options::json_fields`) as a JSON object.
    ///
    /// Names that are not article fields are looked up in
    /// [`Article::additional_data`]; unknown names map to `null`.
    pub fn to_json_value(&self) -> Result<Value> {
        self.ensure_parsed()?;

        let Value::Object(all) = serde_json::to_value(ArticleJson::from(self))? else {
            return Ok(Value::Null);
        };
        let selected: Map<String, Value> = self
            .options
            .json_fields
            .iter()
            .map(|field| {
                let value = all
                    .get(field)
                    .or_else(|| self.additional_data.get(field))
                    .cloned()
                    .unwrap_or(Value::Null);
                (field.clone(), value)
            })
            .collect();
        Ok(Value::Object(selected))
    }

    /// [`Article::to_json_value`] rendered as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_value()?)?)
    }
}
