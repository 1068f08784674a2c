//! Best-content node scoring and sibling complementing.
//!
//! Paragraph-like nodes with enough stopwords (a cheap signal for running
//! prose) vote for their parent with their stopword count and for their
//! grandparent with half of it. The highest-voted element wins.

use std::collections::{HashMap, HashSet};

use dom_query::NodeRef;

use crate::dom::{self, Document, NodeId, Selection};
use crate::nlp;

/// Nodes whose text votes for their ancestors.
const CANDIDATE_SELECTOR: &str = "p, pre, td";

/// A candidate needs more stopwords than this to vote.
const MIN_STOPWORDS: usize = 2;

/// Share of the top node's average paragraph score a preceding sibling
/// paragraph must reach to be pulled in.
const SIBLING_THRESHOLD: f64 = 0.3;

/// Number of stopwords in `text`.
#[must_use]
pub fn stopword_count(text: &str, stopwords: &HashSet<&str>) -> usize {
    nlp::split_words(text)
        .iter()
        .filter(|w| stopwords.contains(w.as_str()))
        .count()
}

/// Mostly-links check: link word share times link count above 1.
#[must_use]
pub fn is_high_link_density(sel: &Selection) -> bool {
    let links = sel.select("a");
    if links.is_empty() {
        return false;
    }
    let words = sel.text().split_whitespace().count();
    if words == 0 {
        return true;
    }
    let link_words = links.text().split_whitespace().count();
    let ratio = link_words as f64 / words as f64;
    ratio * links.length() as f64 > 1.0
}

/// The element most likely to hold the article body.
#[must_use]
pub fn best_node<'a>(doc: &'a Document, stopwords: &HashSet<&str>) -> Option<Selection<'a>> {
    let mut order: Vec<NodeRef<'a>> = Vec::new();
    let mut scores: HashMap<NodeId, f64> = HashMap::new();

    for node in doc.select(CANDIDATE_SELECTOR).nodes() {
        let sel = Selection::from(*node);
        let count = stopword_count(&sel.text(), stopwords);
        if count <= MIN_STOPWORDS || is_high_link_density(&sel) {
            continue;
        }
        let score = count as f64;

        let Some(parent) = node.parent().filter(NodeRef::is_element) else {
            continue;
        };
        vote(&mut order, &mut scores, parent, score);

        if let Some(grandparent) = parent.parent().filter(NodeRef::is_element) {
            vote(&mut order, &mut scores, grandparent, score / 2.0);
        }
    }

    let mut best: Option<(NodeRef<'a>, f64)> = None;
    for node in order {
        let score = scores.get(&node.id).copied().unwrap_or_default();
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((node, score));
        }
    }
    best.map(|(node, _)| Selection::from(node))
}

fn vote<'a>(order: &mut Vec<NodeRef<'a>>, scores: &mut HashMap<NodeId, f64>, node: NodeRef<'a>, score: f64) {
    let entry = scores.entry(node.id).or_insert_with(|| {
        order.push(node);
        0.0
    });
    *entry += score;
}

/// Detached copy of `node`, preceded by earlier sibling paragraphs that
/// read like article text.
///
/// Siblings are taken in document order. Without qualifying siblings the
/// result is a plain copy of `node`.
#[must_use]
pub fn complemented_node(node: &Selection, stopwords: &HashSet<&str>) -> Document {
    let Some(first) = node.nodes().first().copied() else {
        return Document::from("");
    };

    let threshold = baseline_score(node, stopwords) * SIBLING_THRESHOLD;
    let mut prefix: Vec<String> = Vec::new();

    let mut sibling = first.prev_sibling();
    while let Some(current) = sibling {
        if current.is_element() {
            let sel = Selection::from(current);
            let paragraphs: Vec<Selection> = if dom::tag_name(&sel).as_deref() == Some("p") {
                vec![sel]
            } else {
                sel.select("p").nodes().iter().map(|n| Selection::from(*n)).collect()
            };
            // Walking backwards; reversed again below.
            for p in paragraphs.into_iter().rev() {
                let text = p.text();
                if !text.trim().is_empty()
                    && stopword_count(&text, stopwords) as f64 > threshold
                    && !is_high_link_density(&p)
                {
                    prefix.push(format!("<p>{}</p>", p.inner_html()));
                }
            }
        }
        sibling = current.prev_sibling();
    }

    if prefix.is_empty() {
        return dom::clone_element(node);
    }
    prefix.reverse();
    Document::from(format!("<div>{}{}</div>", prefix.concat(), dom::standalone_html(node)))
}

/// Average stopword count of the voting paragraphs inside `node`.
fn baseline_score(node: &Selection, stopwords: &HashSet<&str>) -> f64 {
    let scores: Vec<usize> = node
        .select("p")
        .nodes()
        .iter()
        .map(|n| Selection::from(*n))
        .filter(|p| !is_high_link_density(p))
        .map(|p| stopword_count(&p.text(), stopwords))
        .filter(|c| *c > MIN_STOPWORDS)
        .collect();
    if scores.is_empty() {
        return 100_000.0;
    }
    scores.iter().sum::<usize>() as f64 / scores.len() as f64
}
