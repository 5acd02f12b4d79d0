use std::path::Path;
use crate::error::{ConvertError, Result};

/// 可轉換的副檔名，大小寫需完全相符（`.Docx` 不在清單內）
pub const SUPPORTED_EXTENSIONS: [&str; 6] = [".docx", ".DOCX", ".doc", ".DOC", ".pdf", ".PDF"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Docx,
    Doc,
    Pdf,
}

impl DocumentFormat {
    /// 依副檔名（轉小寫後）判斷文件格式
    pub fn detect(path: &Path) -> Result<Self> {
        let ext = extension_of(path).map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some(".docx") => Ok(DocumentFormat::Docx),
            Some(".doc") => Ok(DocumentFormat::Doc),
            Some(".pdf") => Ok(DocumentFormat::Pdf),
            _ => Err(ConvertError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// 取得含點號的副檔名，例如 `.docx`
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

pub fn is_supported(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}
