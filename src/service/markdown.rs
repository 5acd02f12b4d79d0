use std::fs;
use std::path::Path;
use std::time::Duration;
use log::{info, warn};
use crate::error::Result;
use crate::models::format::DocumentFormat;
use crate::service::docx::DocxService;
use crate::service::html::HtmlService;
use crate::service::office::{SofficeConverter, TempConversionArtifact};
use crate::service::pdf::{reformat_text, PdfService};
use crate::service::traits::i_service::{
    DocxServiceTrait, HtmlServiceTrait, MarkdownServiceTrait, OfficeConverterTrait, PdfServiceTrait,
};

/// Markdown 服務，依文件格式選擇轉換流程
pub struct MarkdownService {
    office: Box<dyn OfficeConverterTrait>,
    docx_service: Box<dyn DocxServiceTrait>,
    html_service: Box<dyn HtmlServiceTrait>,
    pdf_service: Box<dyn PdfServiceTrait>,
}

impl MarkdownService {
    pub fn new(
        office: Box<dyn OfficeConverterTrait>,
        docx_service: Box<dyn DocxServiceTrait>,
        html_service: Box<dyn HtmlServiceTrait>,
        pdf_service: Box<dyn PdfServiceTrait>,
    ) -> Self {
        MarkdownService {
            office,
            docx_service,
            html_service,
            pdf_service,
        }
    }

    /// 使用 LibreOffice 與內建 DOCX、HTML、PDF 服務
    pub fn with_soffice(program: &str, timeout: Option<Duration>) -> Self {
        Self::with_office(Box::new(SofficeConverter::new(program, timeout)))
    }

    pub fn with_office(office: Box<dyn OfficeConverterTrait>) -> Self {
        Self::new(
            office,
            Box::new(DocxService::new()),
            Box::new(HtmlService::new()),
            Box::new(PdfService::new()),
        )
    }

    fn convert_docx(&self, path: &Path) -> Result<String> {
        let html = self.docx_service.extract_html(path)?;
        self.html_service.render_markdown(&html)
    }

    fn convert_doc(&self, path: &Path) -> Result<String> {
        let artifact = TempConversionArtifact::acquire(self.office.as_ref(), path)?;
        info!("已產生暫存 DOCX：{}", artifact.docx_path().display());
        let result = self.convert_docx(artifact.docx_path());
        let dir = artifact.dir_path().to_path_buf();
        if let Err(e) = artifact.cleanup() {
            warn!("清除暫存目錄 {} 失敗：{}", dir.display(), e);
        }
        result
    }

    fn convert_pdf(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let text = self.pdf_service.extract_text(&bytes)?;
        Ok(reformat_text(&text))
    }
}

impl MarkdownServiceTrait for MarkdownService {
    fn convert(&self, path: &Path) -> Result<String> {
        match DocumentFormat::detect(path)? {
            DocumentFormat::Docx => self.convert_docx(path),
            DocumentFormat::Doc => self.convert_doc(path),
            DocumentFormat::Pdf => self.convert_pdf(path),
        }
    }
}
