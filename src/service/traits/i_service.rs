use std::path::{Path, PathBuf};
use crate::error::Result;

// Office 轉換程式接口，負責以外部程式轉換文件格式
pub trait OfficeConverterTrait: Send + Sync {
    /// 將來源檔轉換為指定格式並輸出到目錄
    /// # 參數
    /// - source: 來源檔案路徑
    /// - target_format: 目標格式，例如 `docx`
    /// - out_dir: 輸出目錄
    /// # 回傳
    /// - 成功時返回轉換後檔案的預期路徑
    fn convert(&self, source: &Path, target_format: &str, out_dir: &Path) -> Result<PathBuf>;
}

// DOCX 服務接口，負責將 DOCX 內容擷取為 HTML
pub trait DocxServiceTrait: Send + Sync {
    fn extract_html(&self, path: &Path) -> Result<String>;
}

// HTML 服務接口，負責將 HTML 渲染為 Markdown
pub trait HtmlServiceTrait: Send + Sync {
    fn render_markdown(&self, html: &str) -> Result<String>;
}

// PDF 服務接口，負責擷取 PDF 純文字
pub trait PdfServiceTrait: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

// Markdown 服務接口，依格式將文件轉為 Markdown
pub trait MarkdownServiceTrait: Send + Sync {
    /// 將文件轉為 Markdown 文字
    /// # 參數
    /// - path: 文件路徑，格式由副檔名判斷
    /// # 回傳
    /// - 成功時返回 Markdown 字串，不支援的格式返回 UnsupportedFormat
    fn convert(&self, path: &Path) -> Result<String>;
}
