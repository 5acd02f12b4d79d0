use std::panic::{self, AssertUnwindSafe};
use crate::error::{ConvertError, Result};
use crate::service::traits::i_service::PdfServiceTrait;

/// PDF 服務，從記憶體中的 PDF 擷取純文字
pub struct PdfService;

impl PdfService {
    pub fn new() -> Self {
        PdfService
    }
}

impl Default for PdfService {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfServiceTrait for PdfService {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract 遇到部分損毀檔案會 panic
        match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ConvertError::Pdf(e.to_string())),
            Err(_) => Err(ConvertError::Pdf("解析器異常終止".to_string())),
        }
    }
}

/// 將擷取的文字整理為 Markdown：去除空白行、修剪每行，並以空行分隔
pub fn reformat_text(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reformat_drops_blank_lines() {
        assert_eq!(reformat_text("Line A\n\n  \nLine B  \n"), "Line A\n\nLine B");
    }

    #[test]
    fn test_reformat_handles_crlf_and_indent() {
        assert_eq!(reformat_text("  Title\r\n\r\n\tBody text\r\n"), "Title\n\nBody text");
    }

    #[test]
    fn test_reformat_empty() {
        assert_eq!(reformat_text(" \n\n"), "");
    }

    #[test]
    fn test_corrupted_pdf_is_error() {
        let err = PdfService::new().extract_text(b"this is not a pdf").unwrap_err();
        assert!(matches!(err, ConvertError::Pdf(_)));
    }
}
