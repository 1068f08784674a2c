//! Shared fixtures for integration tests.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rs_newspaper::{
    Article, ArticleBuilder, FetchResponse, Options, RequestOptions, Transport, TransportError,
};

enum Scripted {
    Response(FetchResponse),
    Error(String),
}

/// In-memory transport answering from a fixed URL table and logging every request.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: HashMap<String, Scripted>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, url: &str, body: &str) -> Self {
        self.status(url, 200, body)
    }

    pub fn status(self, url: &str, status: u16, body: &str) -> Self {
        self.redirected(url, status, body, &[])
    }

    pub fn redirected(mut self, url: &str, status: u16, body: &str, history: &[&str]) -> Self {
        self.routes.insert(
            url.to_string(),
            Scripted::Response(FetchResponse {
                body: body.to_string(),
                status,
                history: history.iter().map(|s| (*s).to_string()).collect(),
            }),
        );
        self
    }

    pub fn error(mut self, url: &str, message: &str) -> Self {
        self.routes.insert(url.to_string(), Scripted::Error(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, url: &str, _options: &RequestOptions) -> Result<FetchResponse, TransportError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }
        match self.routes.get(url) {
            Some(Scripted::Response(resp)) => Ok(resp.clone()),
            Some(Scripted::Error(msg)) => Err(TransportError::Request(msg.clone())),
            None => Err(TransportError::Request(format!("connection refused: {url}"))),
        }
    }
}

/// Article on `url` served by `transport`.
pub fn article_with(url: &str, transport: &Arc<ScriptedTransport>, options: Options) -> Article {
    ArticleBuilder::new(url)
        .transport(transport.clone())
        .options(Arc::new(options))
        .build()
        .expect("valid article url")
}

/// A news page with a byline, dates, metadata, media and a multi-paragraph body.
pub const NEWS_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Harbor bridge reopens after two years of repairs | Coastal Daily</title>
    <meta property="og:title" content="Harbor bridge reopens after two years of repairs">
    <meta property="og:type" content="article">
    <meta property="og:site_name" content="Coastal Daily">
    <meta property="og:image" content="/img/bridge-large.jpg">
    <meta name="description" content="The harbor bridge is open to traffic again.">
    <meta name="keywords" content="bridge, harbor, traffic">
    <meta property="article:published_time" content="2024-03-01T08:30:00Z">
    <meta property="article:tag" content="Infrastructure">
    <meta name="author" content="Maria Lopez">
    <link rel="canonical" href="https://news.example.com/2024/03/01/harbor-bridge-reopens">
    <link rel="icon" href="/favicon.ico">
</head>
<body>
    <nav class="main-nav"><a href="/">Home</a><a href="/local">Local</a></nav>
    <div class="share-buttons"><a href="https://social.example/share">Share</a></div>
    <article>
        <h1>Harbor bridge reopens after two years of repairs</h1>
        <div id="story">
            <p>The harbor bridge reopened to traffic on Friday morning after more than two years of repairs, and the first drivers crossed it just after dawn.</p>
            <p>City engineers said the work was finished ahead of the schedule that had been set when the project was started, and that the final cost was below the budget.</p>
            <p>Residents who live on the other side of the water had been forced to take a long detour for the whole time that the bridge was closed to cars.</p>
            <p>According to <a href="/2023/05/02/bridge-closure">the original closure notice</a>, the repairs were needed because of corrosion in the steel cables of the deck.</p>
            <p>The mayor said that the city would hold a small ceremony at the bridge on Sunday, and that all of the people who worked on it would be invited.</p>
            <iframe src="https://www.youtube.com/embed/abc123" width="560" height="315"></iframe>
            <img src="/img/bridge-traffic.jpg" alt="Cars on the bridge">
        </div>
    </article>
    <footer><p>Copyright Coastal Daily</p></footer>
</body>
</html>"#;
