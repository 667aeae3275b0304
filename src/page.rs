use std::cell::RefCell;
use std::time::Duration;

use html5ever::tendril::TendrilSink;
use html5ever::{Attribute, LocalName, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::config::CONFIG;
use crate::error::Result;
use crate::text::truncate_chars;

/// Hard cap on the assembled page text handed to the pipeline.
pub const MAX_PAGE_TEXT: usize = 2000;
/// Paragraphs shorter than this are boilerplate, not body text.
const MIN_PARAGRAPH_LEN: usize = 50;
/// Body paragraphs taken after the title/abstract.
const MAX_PARAGRAPHS: usize = 5;
/// Characters kept from an "abstract" anchor onward.
const ABSTRACT_WINDOW: usize = 500;

/// Fetches a paper page and reduces it to bounded plain text.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Result<PageFetcher> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CONFIG.http_timeout_secs))
            .user_agent(concat!("paperscout/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(PageFetcher { client })
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(extract_page_text(&html))
    }
}

#[derive(Clone, Default, Debug)]
struct ExtractedPage {
    title: String,
    blocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Copy)]
enum Context {
    Title,
    Block,
}

fn get_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut std::io::Cursor::new(html))
        .unwrap()
}

fn has_boilerplate_class_or_id(attrs: &RefCell<Vec<Attribute>>) -> bool {
    const MARKERS: &[&str] = &[
        "nav", "menu", "sidebar", "footer", "header", "cookie", "banner", "promo", "ads", "badge",
    ];
    attrs.borrow().iter().any(|attr| {
        let value = attr.value.to_string().to_lowercase();
        MARKERS.iter().any(|marker| value.contains(marker))
    })
}

fn is_block_like(local: &LocalName) -> bool {
    matches!(
        &**local,
        "p" | "div" | "section" | "article" | "li" | "ul" | "ol"
    )
}

fn walk(handle: &Handle, ctx: Context, out: &mut ExtractedPage) {
    let node = handle;
    match &node.data {
        NodeData::Text { contents } => {
            let s = contents.borrow();
            let s = s.trim();
            if s.is_empty() {
                return;
            }
            match ctx {
                Context::Title => {
                    if !out.title.is_empty() {
                        out.title.push(' ');
                    }
                    out.title.push_str(s);
                }
                Context::Block => {
                    if let Some(last) = out.blocks.last_mut() {
                        if !last.is_empty() {
                            last.push(' ');
                        }
                        last.push_str(s);
                    } else {
                        out.blocks.push(s.to_string());
                    }
                }
            }
        }
        NodeData::Element { name, attrs, .. } => {
            let local = &name.local;

            if &**local == "script" || &**local == "style" || &**local == "noscript" {
                return;
            }
            if has_boilerplate_class_or_id(attrs) {
                return;
            }

            let new_ctx = if &**local == "title" {
                Context::Title
            } else {
                if is_block_like(local) {
                    out.blocks.push(String::new());
                }
                Context::Block
            };

            for child in node.children.borrow().iter() {
                walk(child, new_ctx, out);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                walk(child, ctx, out);
            }
        }
    }
}

/// Reduces raw HTML to the bounded text the pipeline analyzes: page title,
/// then a window starting at the first "abstract" mention if one exists,
/// then the first substantial paragraphs.
pub fn extract_page_text(html: &str) -> String {
    let dom = get_dom(html);
    let mut page = ExtractedPage::default();
    walk(&dom.document, Context::Block, &mut page);

    let blocks: Vec<&str> = page
        .blocks
        .iter()
        .map(|block| block.trim())
        .filter(|block| !block.is_empty())
        .collect();

    let mut content = String::new();
    if !page.title.is_empty() {
        content.push_str(page.title.trim());
        content.push_str("\n\n");
    }

    let body = blocks.join("\n").to_lowercase();
    if let Some(idx) = body.find("abstract") {
        content.push_str(truncate_chars(&body[idx..], ABSTRACT_WINDOW));
        content.push_str("\n\n");
    }

    let mut added = 0;
    for block in &blocks {
        if block.chars().count() <= MIN_PARAGRAPH_LEN {
            continue;
        }
        content.push_str(block);
        content.push('\n');
        added += 1;
        if added == MAX_PARAGRAPHS {
            break;
        }
    }

    truncate_chars(&content, MAX_PAGE_TEXT).to_string()
}
