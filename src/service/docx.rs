use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use html_escape::{encode_double_quoted_attribute, encode_text};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;
use crate::error::{ConvertError, Result};
use crate::service::traits::i_service::DocxServiceTrait;

const DOCUMENT_XML: &str = "word/document.xml";
const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";

/// DOCX 服務，將 word/document.xml 轉為簡單 HTML
pub struct DocxService;

impl DocxService {
    pub fn new() -> Self {
        DocxService
    }
}

impl Default for DocxService {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxServiceTrait for DocxService {
    fn extract_html(&self, path: &Path) -> Result<String> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| ConvertError::Docx(format!("{}：{}", path.display(), e)))?;
        let document = read_zip_entry(&mut archive, DOCUMENT_XML)?
            .ok_or_else(|| ConvertError::Docx(format!("{} 缺少 {}", path.display(), DOCUMENT_XML)))?;
        let rels = match read_zip_entry(&mut archive, DOCUMENT_RELS)? {
            Some(xml) => parse_relationships(&xml)?,
            None => HashMap::new(),
        };
        document_to_html(&document, &rels)
    }
}

fn read_zip_entry(archive: &mut ZipArchive<File>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(ConvertError::Docx(e.to_string())),
    };
    let mut buffer = Vec::new();
    entry.read_to_end(&mut buffer)?;
    Ok(Some(String::from_utf8_lossy(&buffer).to_string()))
}

fn attr_value(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.local_name().as_ref() == local {
            attr.unescape_value().ok().map(|v| v.to_string())
        } else {
            None
        }
    })
}

/// 解析關聯檔，回傳 Id 到 Target 的對應
pub fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut rels = HashMap::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.local_name().as_ref() == b"Relationship" {
                    if let (Some(id), Some(target)) = (attr_value(e, b"Id"), attr_value(e, b"Target")) {
                        rels.insert(id, target);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ConvertError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(rels)
}

/// 從段落樣式名稱判斷標題層級，例如 `Heading2` 或 `heading 2`
fn heading_level(style: &str) -> Option<usize> {
    let normalized: String = style.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect();
    if normalized == "title" {
        return Some(1);
    }
    let level = normalized.strip_prefix("heading")?.parse::<usize>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn is_toggle_on(e: &BytesStart) -> bool {
    !matches!(attr_value(e, b"val").as_deref(), Some("0") | Some("false") | Some("off"))
}

/// 外層段落在遇到巢狀段落（文字方塊）時保存的狀態
struct ParagraphFrame {
    para: String,
    para_style: Option<String>,
    para_is_list: bool,
    run: String,
    run_bold: bool,
    run_italic: bool,
}

#[derive(Default)]
struct HtmlBuilder<'a> {
    rels: Option<&'a HashMap<String, String>>,
    out: String,

    para_open: bool,
    frames: Vec<ParagraphFrame>,
    para: String,
    para_style: Option<String>,
    para_is_list: bool,
    in_ppr: bool,

    run: String,
    run_bold: bool,
    run_italic: bool,
    in_text: bool,
    pending_alt: Option<String>,

    list_items: Vec<String>,

    table_depth: usize,
    cell: Option<String>,
    row: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl<'a> HtmlBuilder<'a> {
    fn start(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"p" => {
                if self.para_open {
                    self.frames.push(ParagraphFrame {
                        para: std::mem::take(&mut self.para),
                        para_style: self.para_style.take(),
                        para_is_list: self.para_is_list,
                        run: std::mem::take(&mut self.run),
                        run_bold: self.run_bold,
                        run_italic: self.run_italic,
                    });
                }
                self.para_open = true;
                self.para.clear();
                self.para_style = None;
                self.para_is_list = false;
            }
            b"pPr" => self.in_ppr = true,
            b"numPr" if self.in_ppr => self.para_is_list = true,
            b"r" => {
                self.run.clear();
                self.run_bold = false;
                self.run_italic = false;
            }
            b"t" => self.in_text = true,
            b"tbl" => {
                if self.table_depth == 0 {
                    self.flush_list();
                    self.rows.clear();
                }
                self.table_depth += 1;
            }
            b"tr" if self.table_depth == 1 => self.row.clear(),
            b"tc" if self.table_depth == 1 => self.cell = Some(String::new()),
            _ => self.element(e),
        }
    }

    // 可能以自閉合或成對標籤出現的元素
    fn element(&mut self, e: &BytesStart) {
        match e.local_name().as_ref() {
            b"pStyle" if self.in_ppr => self.para_style = attr_value(e, b"val"),
            b"numPr" if self.in_ppr => self.para_is_list = true,
            b"b" if !self.in_ppr => self.run_bold = is_toggle_on(e),
            b"i" if !self.in_ppr => self.run_italic = is_toggle_on(e),
            b"tab" if !self.in_ppr => self.run.push(' '),
            b"br" | b"cr" => self.run.push_str("<br/>"),
            b"docPr" => self.pending_alt = attr_value(e, b"descr").or_else(|| attr_value(e, b"title")),
            b"blip" => {
                if let Some(id) = attr_value(e, b"embed") {
                    self.image(&id);
                }
            }
            b"imagedata" => {
                if let Some(id) = attr_value(e, b"id") {
                    self.image(&id);
                }
            }
            _ => {}
        }
    }

    fn image(&mut self, id: &str) {
        let src = self
            .rels
            .and_then(|rels| rels.get(id))
            .map(|target| format!("word/{}", target.trim_start_matches('/')))
            .unwrap_or_else(|| id.to_string());
        let alt = self.pending_alt.take().unwrap_or_default();
        self.run.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\"/>",
            encode_double_quoted_attribute(&src),
            encode_double_quoted_attribute(&alt)
        ));
    }

    fn text(&mut self, text: &str) {
        if self.in_text {
            self.run.push_str(&encode_text(text));
        }
    }

    fn end(&mut self, local: &[u8]) {
        match local {
            b"t" => self.in_text = false,
            b"pPr" => self.in_ppr = false,
            b"r" => self.close_run(),
            b"p" => match self.frames.pop() {
                Some(frame) => self.close_nested_paragraph(frame),
                None => {
                    self.para_open = false;
                    self.close_paragraph();
                }
            },
            b"tc" if self.table_depth == 1 => {
                if let Some(cell) = self.cell.take() {
                    self.row.push(cell.trim().to_string());
                }
            }
            b"tr" if self.table_depth == 1 => {
                let row = std::mem::take(&mut self.row);
                self.rows.push(row);
            }
            b"tbl" => {
                self.table_depth = self.table_depth.saturating_sub(1);
                if self.table_depth == 0 {
                    self.close_table();
                }
            }
            _ => {}
        }
    }

    fn close_run(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let mut html = std::mem::take(&mut self.run);
        if self.run_italic {
            html = format!("<em>{}</em>", html);
        }
        if self.run_bold {
            html = format!("<strong>{}</strong>", html);
        }
        self.para.push_str(&html);
    }

    /// 文字方塊內的段落併入外層段落，以換行分隔
    fn close_nested_paragraph(&mut self, frame: ParagraphFrame) {
        let content = std::mem::take(&mut self.para);
        self.para = frame.para;
        self.para_style = frame.para_style;
        self.para_is_list = frame.para_is_list;
        self.run = frame.run;
        self.run_bold = frame.run_bold;
        self.run_italic = frame.run_italic;
        if content.trim().is_empty() {
            return;
        }
        self.close_run();
        if !self.para.is_empty() {
            self.para.push_str("<br/>");
        }
        self.para.push_str(&content);
    }

    fn close_paragraph(&mut self) {
        let content = std::mem::take(&mut self.para);
        if content.trim().is_empty() {
            return;
        }
        if let Some(cell) = self.cell.as_mut() {
            if !cell.is_empty() {
                cell.push_str("<br/>");
            }
            cell.push_str(&content);
            return;
        }
        if self.para_is_list {
            self.list_items.push(content);
            return;
        }
        self.flush_list();
        match self.para_style.as_deref().and_then(heading_level) {
            Some(level) => self.out.push_str(&format!("<h{0}>{1}</h{0}>\n", level, content)),
            None => self.out.push_str(&format!("<p>{}</p>\n", content)),
        }
    }

    fn flush_list(&mut self) {
        if self.list_items.is_empty() {
            return;
        }
        self.out.push_str("<ul>\n");
        for item in self.list_items.drain(..) {
            self.out.push_str(&format!("<li>{}</li>\n", item));
        }
        self.out.push_str("</ul>\n");
    }

    fn close_table(&mut self) {
        let rows = std::mem::take(&mut self.rows);
        if rows.is_empty() {
            return;
        }
        self.out.push_str("<table>\n");
        for (i, row) in rows.iter().enumerate() {
            let tag = if i == 0 { "th" } else { "td" };
            self.out.push_str("<tr>");
            for cell in row {
                self.out.push_str(&format!("<{0}>{1}</{0}>", tag, cell));
            }
            self.out.push_str("</tr>\n");
        }
        self.out.push_str("</table>\n");
    }

    fn finish(mut self) -> String {
        self.flush_list();
        self.out
    }
}

/// 將 document.xml 轉為 HTML 片段
pub fn document_to_html(xml: &str, rels: &HashMap<String, String>) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);
    let mut buf = Vec::new();
    let mut builder = HtmlBuilder { rels: Some(rels), ..Default::default() };
    // mc:Fallback 與 mc:Choice 內容相同，只讀 Choice
    let mut fallback_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"Fallback" => fallback_depth += 1,
            Ok(Event::End(ref e)) if e.local_name().as_ref() == b"Fallback" => {
                fallback_depth = fallback_depth.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ConvertError::Docx(format!(
                    "XML 解析錯誤（位置 {}）：{}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ if fallback_depth > 0 => {}
            Ok(Event::Start(ref e)) => builder.start(e),
            Ok(Event::Empty(ref e)) => builder.element(e),
            Ok(Event::Text(ref t)) => {
                let text = t.unescape().map_err(|e| ConvertError::Docx(e.to_string()))?;
                builder.text(&text);
            }
            Ok(Event::End(ref e)) => builder.end(e.local_name().as_ref()),
            _ => {}
        }
        buf.clear();
    }

    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("Heading1"), Some(1));
        assert_eq!(heading_level("heading 3"), Some(3));
        assert_eq!(heading_level("Title"), Some(1));
        assert_eq!(heading_level("Heading9"), None);
        assert_eq!(heading_level("Normal"), None);
    }

    #[test]
    fn test_paragraph_heading_and_formatting() {
        let xml = wrap(
            r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Jane Doe</w:t></w:r></w:p>
<w:p><w:r><w:rPr><w:b/></w:rPr><w:t>Skills</w:t></w:r><w:r><w:t xml:space="preserve"> &amp; tools</w:t></w:r></w:p>
<w:p><w:r><w:rPr><w:i w:val="0"/></w:rPr><w:t>plain</w:t></w:r></w:p>"#,
        );
        let html = document_to_html(&xml, &HashMap::new()).unwrap();
        assert!(html.contains("<h1>Jane Doe</h1>"));
        assert!(html.contains("<p><strong>Skills</strong> &amp; tools</p>"));
        assert!(html.contains("<p>plain</p>"));
    }

    #[test]
    fn test_list_and_table() {
        let xml = wrap(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/></w:numPr></w:pPr><w:r><w:t>Rust</w:t></w:r></w:p>
<w:p><w:pPr><w:numPr><w:ilvl w:val="0"/></w:numPr></w:pPr><w:r><w:t>Go</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Year</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Role</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:t>2020</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Engineer</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        let html = document_to_html(&xml, &HashMap::new()).unwrap();
        assert!(html.contains("<ul>\n<li>Rust</li>\n<li>Go</li>\n</ul>"));
        assert!(html.contains("<tr><th>Year</th><th>Role</th></tr>"));
        assert!(html.contains("<tr><td>2020</td><td>Engineer</td></tr>"));
    }

    #[test]
    fn test_image_uses_relationship_target() {
        let xml = wrap(
            r#"<w:p><w:r><w:drawing><wp:inline><wp:docPr id="1" name="Picture 1" descr="photo"/><a:graphic><a:graphicData><a:blip r:embed="rId5"/></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
        );
        let rels = parse_relationships(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId5" Type="image" Target="media/image1.png"/></Relationships>"#,
        )
        .unwrap();
        let html = document_to_html(&xml, &rels).unwrap();
        assert!(html.contains(r#"<img src="word/media/image1.png" alt="photo"/>"#));
    }

    #[test]
    fn test_text_box_keeps_outer_paragraph_once() {
        let xml = format!(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:mc="http://schemas.openxmlformats.org/markup-compatibility/2006" xmlns:wps="http://schemas.microsoft.com/office/word/2010/wordprocessingShape" xmlns:v="urn:schemas-microsoft-com:vml"><w:body>{}</w:body></w:document>"#,
            r#"<w:p><w:r><w:t>Jane Doe</w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wps:txbx><w:txbxContent><w:p><w:r><w:t>Box text</w:t></w:r></w:p></w:txbxContent></wps:txbx></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox><w:txbxContent><w:p><w:r><w:t>Box text</w:t></w:r></w:p></w:txbxContent></v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:t xml:space="preserve"> Engineer</w:t></w:r></w:p><w:p><w:r><w:t>Next</w:t></w:r></w:p>"#
        );
        let html = document_to_html(&xml, &HashMap::new()).unwrap();
        assert!(html.contains("<p>Jane Doe<br/>Box text Engineer</p>"), "{}", html);
        assert_eq!(html.matches("Box text").count(), 1);
        assert!(html.contains("<p>Next</p>"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DocxService::new()
            .extract_html(Path::new("/nonexistent/cv.docx"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
