use std::collections::HashMap;
use html2md::{Handle, StructuredPrinter, TagHandler, TagHandlerFactory};
use regex::Regex;
use crate::error::Result;
use crate::service::traits::i_service::HtmlServiceTrait;

/// 移除圖片的標籤處理器：不輸出任何內容，也不處理子節點
struct ImageRemover;

impl TagHandler for ImageRemover {
    fn handle(&mut self, _tag: &Handle, _printer: &mut StructuredPrinter) {}

    fn after_handle(&mut self, _printer: &mut StructuredPrinter) {}

    fn skip_descendants(&self) -> bool {
        true
    }
}

struct ImageRemoverFactory;

impl TagHandlerFactory for ImageRemoverFactory {
    fn instantiate(&self) -> Box<dyn TagHandler> {
        Box::new(ImageRemover)
    }
}

/// HTML 服務，將 HTML 轉為 Markdown，並移除所有圖片
pub struct HtmlService {
    blank_lines: Regex,
}

impl HtmlService {
    pub fn new() -> Self {
        HtmlService {
            blank_lines: Regex::new(r"\n[ \t]*(\n[ \t]*)+\n").expect("blank line pattern is valid"),
        }
    }

    fn rules() -> HashMap<String, Box<dyn TagHandlerFactory>> {
        let mut rules: HashMap<String, Box<dyn TagHandlerFactory>> = HashMap::new();
        rules.insert("img".to_string(), Box::new(ImageRemoverFactory));
        rules
    }
}

impl Default for HtmlService {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlServiceTrait for HtmlService {
    fn render_markdown(&self, html: &str) -> Result<String> {
        let markdown = html2md::parse_html_custom(html, &Self::rules());
        let markdown = self.blank_lines.replace_all(&markdown, "\n\n");
        Ok(markdown.trim().to_string())
    }
}
