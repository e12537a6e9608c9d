//! Full-article extraction from web pages, plus recovery of feed summaries that carry markup.

use crate::nlp;
use crate::types::{AggregatorError, Result};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// What could be recovered from an article page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedArticle {
    pub full_content: String,
    pub text: String,
    pub top_image: Option<String>,
    pub images: Vec<String>,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
    pub summary: String,
}

/// Plain rendering of a feed summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryContent {
    pub text: String,
    pub images: Vec<String>,
    /// Raw markup when the summary contained any.
    pub full_content: Option<String>,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| AggregatorError::General(format!("Bad selector {}: {:?}", css, e)))
}

/// Parse an article page. A page without any paragraph text is an extraction failure.
pub fn extract_article(html: &str, page_url: &str, title: &str) -> Result<ExtractedArticle> {
    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(html);

    let article_sel = selector("article")?;
    let body_sel = selector("body")?;
    let root = document
        .select(&article_sel)
        .next()
        .or_else(|| document.select(&body_sel).next());

    let Some(root) = root else {
        return Err(AggregatorError::Extraction {
            url: page_url.to_string(),
            reason: "page has no body".to_string(),
        });
    };

    let paragraph_sel = selector("p")?;
    let paragraphs: Vec<String> = root
        .select(&paragraph_sel)
        .map(|p| normalize_whitespace(&element_text(&p)))
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return Err(AggregatorError::Extraction {
            url: page_url.to_string(),
            reason: "no paragraph text found".to_string(),
        });
    }
    let text = paragraphs.join("\n");

    let images = collect_images(root, base.as_ref())?;
    let top_image = meta_content(&document, &["og:image", "twitter:image"])?
        .and_then(|src| resolve(base.as_ref(), &src))
        .or_else(|| images.first().cloned());

    let authors = collect_authors(&document)?;

    let keywords = nlp::extract_keywords(&format!("{}\n{}", title, text), nlp::MAX_KEYWORDS);
    let summary = nlp::summarize(&text, &keywords, nlp::SUMMARY_SENTENCES);

    Ok(ExtractedArticle {
        full_content: root.html(),
        text,
        top_image,
        images,
        authors,
        keywords,
        summary,
    })
}

/// Render a feed summary as text, recovering embedded images when it contains markup.
pub fn summary_content(summary: &str) -> Result<SummaryContent> {
    if !looks_like_markup(summary) {
        return Ok(SummaryContent {
            text: summary.to_string(),
            images: Vec::new(),
            full_content: None,
        });
    }

    let fragment = Html::parse_fragment(summary);
    let root = fragment.root_element();
    let images = collect_images(root, None)?;
    let text = normalize_whitespace(&element_text(&root));

    Ok(SummaryContent {
        text,
        images,
        full_content: Some(summary.to_string()),
    })
}

pub fn looks_like_markup(text: &str) -> bool {
    match text.find('<') {
        Some(open) => text[open..].contains('>'),
        None => false,
    }
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_images(root: ElementRef, base: Option<&Url>) -> Result<Vec<String>> {
    let img_sel = selector("img[src]")?;
    let mut images: Vec<String> = Vec::new();

    for img in root.select(&img_sel) {
        if let Some(src) = img.value().attr("src").and_then(|src| resolve(base, src)) {
            if !images.contains(&src) {
                images.push(src);
            }
        }
    }

    Ok(images)
}

fn resolve(base: Option<&Url>, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    match base {
        Some(base) => base.join(src).ok().map(|u| u.to_string()),
        None => Some(src.to_string()),
    }
}

fn meta_content(document: &Html, names: &[&str]) -> Result<Option<String>> {
    let meta_sel = selector("meta[content]")?;

    for name in names {
        for meta in document.select(&meta_sel) {
            let key = meta
                .value()
                .attr("property")
                .or_else(|| meta.value().attr("name"))
                .unwrap_or("");
            if key.eq_ignore_ascii_case(name) {
                if let Some(content) = meta.value().attr("content") {
                    if !content.trim().is_empty() {
                        return Ok(Some(content.trim().to_string()));
                    }
                }
            }
        }
    }

    Ok(None)
}

fn collect_authors(document: &Html) -> Result<Vec<String>> {
    let mut authors: Vec<String> = Vec::new();
    let mut push = |name: String| {
        let name = normalize_whitespace(&name);
        let name = name.strip_prefix("By ").unwrap_or(&name).to_string();
        if !name.is_empty() && !name.starts_with("http") && !authors.contains(&name) {
            authors.push(name);
        }
    };

    let meta_sel = selector(r#"meta[name="author"], meta[property="article:author"]"#)?;
    for meta in document.select(&meta_sel) {
        if let Some(content) = meta.value().attr("content") {
            for name in content.split(',') {
                push(name.to_string());
            }
        }
    }

    let element_sel = selector(r#"[rel="author"], [itemprop="author"]"#)?;
    for element in document.select(&element_sel) {
        if element.value().name() == "meta" || element.value().name() == "link" {
            continue;
        }
        push(element_text(&element));
    }

    Ok(authors)
}
