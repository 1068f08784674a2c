//! Parse orchestration and the nlp pass.

use tracing::{debug, info};

use super::Article;
use crate::cleaner::DocumentCleaner;
use crate::dom;
use crate::error::Result;
use crate::extractors::LinkExtractor;
use crate::formatter::OutputFormatter;
use crate::hash;
use crate::nlp;
use crate::stopwords;

impl Article {
    /// Extract everything from the downloaded content.
    ///
    /// Always ends with [`Article::is_parsed`] set, even when the page has no
    /// recognizable article body; missing parts are left empty.
    pub fn parse(&mut self) -> Result<&mut Self> {
        self.ensure_downloaded()?;

        let content = (!self.html.is_empty()).then_some(self.html.as_str());
        self.link_hash = Some(hash::link_hash(&self.url, content));

        let Some(doc) = dom::parse(&self.html) else {
            debug!(url = %self.url, "empty document");
            self.is_parsed = true;
            return Ok(self);
        };
        let clean_doc = dom::clone_document(&doc);

        let title = self.extractor.title(&clean_doc);
        if !title.is_empty() {
            self.set_title(&title);
        }

        let mut authors = self.extractor.authors(&clean_doc);
        authors.truncate(self.options.max_authors);
        self.authors = authors;

        let metadata = self.extractor.metadata(&self.url, &clean_doc);
        if let Some(lang) = metadata.language.as_deref().filter(|l| stopwords::is_supported(l)) {
            self.meta_lang = lang.to_string();
            if self.options.use_meta_language && lang != self.extractor.language() {
                debug!(url = %self.url, language = lang, "switching to declared language");
                self.extractor.set_language(lang);
            }
        }
        self.meta_site_name = metadata.site_name.unwrap_or_default();
        self.meta_description = metadata.description.unwrap_or_default();
        self.canonical_link = metadata.canonical_link.unwrap_or_default();
        self.meta_keywords = metadata.keywords;
        self.meta_keywords.truncate(self.options.max_keywords);
        self.tags = metadata.tags;
        self.meta_data = metadata.data;
        self.meta_type = metadata.page_type;

        self.publish_date = self.extractor.publish_date(&self.original_url, &clean_doc);

        let cleaner = DocumentCleaner::new();
        cleaner.clean(&clean_doc);

        let (top_id, clean_top_id) = {
            let top = self.extractor.best_node(&doc);
            let clean_top = self.extractor.best_node(&clean_doc);

            self.movies = self
                .extractor
                .videos(&doc, top.as_ref())
                .into_iter()
                .map(|v| v.src)
                .collect();

            if let Some(top) = top.as_ref() {
                let complemented = self.extractor.complemented_node(top);
                cleaner.clean(&complemented);
                let root = dom::fragment_root(&complemented).unwrap_or_else(|| complemented.select("body"));
                let (text, html) = OutputFormatter::new().format(&root, &self.title);
                self.set_text(&text);
                self.article_html = html;

                if let Some(clean_top) = clean_top.as_ref() {
                    let (cleaned, _) = OutputFormatter::new().format(clean_top, &self.title);
                    self.text_cleaned = super::truncate_chars(&cleaned, self.options.max_text);
                }
            }

            let mut links = LinkExtractor::new();
            links.parse(top.as_ref(), &self.url);
            self.links = links.into_links();

            let images = self.extractor.images(&self.url, &clean_doc, clean_top.as_ref());
            self.meta_img = images.meta_image.unwrap_or_default();
            self.top_image = images.top_image.unwrap_or_default();
            self.images = images.images;
            self.meta_favicon = images.favicon.unwrap_or_default();

            (
                top.as_ref().and_then(dom::node_id),
                clean_top.as_ref().and_then(dom::node_id),
            )
        };

        self.top_node = top_id;
        self.clean_top_node = clean_top_id;
        self.doc = Some(doc);
        self.clean_doc = Some(clean_doc);
        self.is_parsed = true;

        info!(
            url = %self.url,
            title = %self.title,
            words = self.text.split_whitespace().count(),
            has_body = top_id.is_some(),
            "article parsed"
        );
        Ok(self)
    }

    /// Compute keywords and a summary from the parsed title and text.
    pub fn nlp(&mut self) -> Result<&mut Self> {
        self.ensure_downloaded()?;
        self.ensure_parsed()?;

        let stopwords = stopwords::for_language(self.extractor.language());
        let limit = self.options.max_keywords;

        let body = nlp::keywords(&self.text, stopwords, limit);
        let title = nlp::keywords(&self.title, stopwords, limit);
        let merged = nlp::merge_keywords(body, title, limit);

        self.keyword_scores = merged.iter().cloned().collect();
        self.keywords = merged.into_iter().map(|(word, _)| word).collect();

        let sentences = nlp::summarize(&self.title, &self.text, stopwords, self.options.max_summary_sent);
        self.set_summary(&sentences.join("\n"));
        Ok(self)
    }
}
