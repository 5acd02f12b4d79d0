#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use doc_to_markdown::error::{ConvertError, Result};
use doc_to_markdown::facade::conversion_facade::ConversionFacade;
use doc_to_markdown::facade::ports::facade_ports::ConversionObserver;
use doc_to_markdown::models::conversion::SkipReason;
use doc_to_markdown::service::traits::i_service::MarkdownServiceTrait;
use zip::write::SimpleFileOptions;

/// 回傳固定內容的 Markdown 服務，檔名含 `broken` 時失敗
pub struct FakeMarkdownService {
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl MarkdownServiceTrait for FakeMarkdownService {
    fn convert(&self, path: &Path) -> Result<String> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        if name.contains("broken") {
            return Err(ConvertError::Pdf(format!("{} is corrupted", name)));
        }
        Ok(format!("# {}", name))
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl ConversionObserver for RecordingObserver {
    fn on_converted(&self, input: &Path, _output: &Path) {
        self.events.lock().unwrap().push(format!("converted {}", file_name(input)));
    }

    fn on_skipped(&self, input: &Path, _output: &Path, _reason: &SkipReason) {
        self.events.lock().unwrap().push(format!("skipped {}", file_name(input)));
    }

    fn on_failed(&self, input: &Path, _error: &ConvertError) {
        self.events.lock().unwrap().push(format!("failed {}", file_name(input)));
    }

    fn on_empty(&self, _input_dir: &Path) {
        self.events.lock().unwrap().push("empty".to_string());
    }
}

pub struct Harness {
    pub facade: ConversionFacade,
    pub calls: Arc<Mutex<Vec<PathBuf>>>,
    pub events: Arc<Mutex<Vec<String>>>,
}

pub fn fake_facade() -> Harness {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let facade = ConversionFacade::new(
        Box::new(FakeMarkdownService { calls: calls.clone() }),
        Box::new(RecordingObserver { events: events.clone() }),
        true,
    );
    Harness { facade, calls, events }
}

pub fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().to_string()
}

pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"content").unwrap();
    path
}

/// 建立只含 document.xml 的最小 DOCX
pub fn write_docx(path: &Path, body: &str) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    zip.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"><w:body>{}</w:body></w:document>"#,
        body
    )
    .unwrap();
    zip.start_file("word/_rels/document.xml.rels", SimpleFileOptions::default()).unwrap();
    write!(
        zip,
        r#"<?xml version="1.0" encoding="UTF-8"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/image1.png"/></Relationships>"#
    )
    .unwrap();
    zip.finish().unwrap();
}

pub fn paragraph(text: &str) -> String {
    format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", text)
}

pub fn image_paragraph() -> String {
    r#"<w:p><w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture 1" descr="headshot"/><a:graphic><a:graphicData><a:blip r:embed="rId5"/></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#
        .to_string()
}
