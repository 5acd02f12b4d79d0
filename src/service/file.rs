use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use crate::models::format::is_supported;

/// 列出目錄下（不含子目錄）副檔名受支援的一般檔案，順序依檔案系統列舉
pub fn collect_supported_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && is_supported(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// 目錄模式下的輸出路徑：`<output_dir>/<檔名去副檔名>.md`
pub fn markdown_target(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(input.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".md");
    output_dir.join(name)
}

/// 將 Markdown 完整寫入暫存檔後再取代目標，失敗時不留下不完整的檔案
pub fn write_markdown_file(path: &Path, markdown: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(parent)?;
    let mut writer = BufWriter::new(temp);
    writer.write_all(markdown.as_bytes())?;
    writer.flush()?;
    let temp = writer.into_inner().map_err(|e| e.into_error())?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// 刪除檔案，不存在時視為成功
pub fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// 遞迴刪除目錄，不存在時視為成功
pub fn remove_dir_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// 解析為真實路徑；尚未存在的尾段接在最近一個存在的上層目錄之後
pub fn canonicalize_existing(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        match fs::canonicalize(existing) {
            Ok(real) => {
                let mut resolved = real;
                for component in rest.iter().rev() {
                    match component {
                        Component::ParentDir => {
                            resolved.pop();
                        }
                        Component::CurDir => {}
                        other => resolved.push(other.as_os_str()),
                    }
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let last = existing.components().next_back();
                match (existing.parent(), last) {
                    (Some(parent), Some(component)) => {
                        rest.push(component);
                        existing = parent;
                    }
                    _ => return Err(e),
                }
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_existing_resolves_parent_and_missing_tail() {
        let dir = tempfile::tempdir().unwrap();
        let real = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();

        let dotted = dir.path().join("docs").join("..");
        assert_eq!(canonicalize_existing(&dotted).unwrap(), real);

        let missing = dir.path().join("docs").join("new").join("md");
        assert_eq!(canonicalize_existing(&missing).unwrap(), real.join("docs").join("new").join("md"));
    }

    #[test]
    fn test_collect_filters_extensions_and_dirs() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.docx", "b.PDF", "c.Docx", "d.txt", "e.doc"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdf")).unwrap();
        fs::write(dir.path().join("nested.pdf").join("inner.pdf"), b"x").unwrap();

        let mut names: Vec<String> = collect_supported_files(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a.docx", "b.PDF", "e.doc"]);
    }

    #[test]
    fn test_collect_missing_dir_is_error() {
        assert!(collect_supported_files(Path::new("/nonexistent/dir/xyz")).is_err());
    }

    #[test]
    fn test_markdown_target() {
        assert_eq!(
            markdown_target(Path::new("/out"), Path::new("/in/cv.v2.DOCX")),
            PathBuf::from("/out/cv.v2.md")
        );
    }

    #[test]
    fn test_write_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.md");
        fs::write(&path, "old content that is longer").unwrap();
        write_markdown_file(&path, "新內容 ✓").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "新內容 ✓");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        remove_file_if_exists(&dir.path().join("nope.md")).unwrap();
        remove_dir_if_exists(&dir.path().join("nope")).unwrap();
    }
}
