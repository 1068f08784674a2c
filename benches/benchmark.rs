//! Performance benchmarks for rs-newspaper.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic news page for the parse and nlp steps
//! - Synthetic pages of growing body size for throughput

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_newspaper::Article;

const URL: &str = "https://news.example.com/2024/03/01/sample-article";

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article | Example News</title>
    <meta name="author" content="John Doe">
    <meta name="description" content="A sample article for benchmarking.">
    <meta property="og:type" content="article">
    <meta property="og:image" content="/img/lead.jpg">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <article>
        <h1>Sample Article</h1>
        <p class="byline">By John Doe</p>
        <div class="story">
            <p>This is the first paragraph of the article. It contains some meaningful
            content that should be picked as the body of the article by the scorer.</p>
            <p>Here is a second paragraph with more content. The parse step should
            keep the text while it drops the navigation and the other boilerplate.</p>
            <p>A third paragraph ensures we have enough content for a meaningful
            benchmark of the <a href="/related">parse</a> performance.</p>
        </div>
    </article>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li>Related article 1</li>
            <li>Related article 2</li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

fn parse(html: &str, nlp: bool) -> Option<Article> {
    let mut article = Article::new(URL).ok()?;
    article.download_html(html).ok()?;
    article.parse().ok()?;
    if nlp {
        article.nlp().ok()?;
    }
    Some(article)
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| parse(black_box(SAMPLE_HTML), false));
    });
}

fn bench_parse_and_nlp(c: &mut Criterion) {
    c.bench_function("parse_and_nlp", |b| {
        b.iter(|| parse(black_box(SAMPLE_HTML), true));
    });
}

/// Pages whose story holds `paragraphs` copies of a prose paragraph.
fn bench_body_size(c: &mut Criterion) {
    let paragraph = "<p>The council met again on Tuesday evening and the members argued for hours \
        about the budget, which was finally approved by a narrow margin after midnight.</p>";

    let mut group = c.benchmark_group("body_size");

    for paragraphs in [10, 100, 1000] {
        let html = SAMPLE_HTML.replace(
            r#"<div class="story">"#,
            &format!(r#"<div class="story">{}"#, paragraph.repeat(paragraphs)),
        );
        let size_kb = html.len() / 1024;
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse", format!("{paragraphs} paragraphs ({size_kb}KB)")),
            &html,
            |b, html| {
                b.iter(|| parse(black_box(html), false));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_parse_and_nlp, bench_body_size);
criterion_main!(benches);
