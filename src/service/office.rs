use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use log::{info, warn};
use tempfile::TempDir;
use crate::error::{ConvertError, Result};
use crate::service::traits::i_service::OfficeConverterTrait;

/// 暫存目錄的固定前綴
pub const TEMP_DIR_PREFIX: &str = "doc-to-markdown-";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// 以無介面模式呼叫 LibreOffice 進行格式轉換
pub struct SofficeConverter {
    program: String,
    timeout: Option<Duration>,
}

impl SofficeConverter {
    pub fn new(program: impl Into<String>, timeout: Option<Duration>) -> Self {
        SofficeConverter { program: program.into(), timeout }
    }

    fn wait(&self, child: &mut std::process::Child) -> Result<ExitStatus> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait()?);
        };
        let start = Instant::now();
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if start.elapsed() > timeout {
                warn!("轉換程式 {} 超過 {:?} 未結束，強制終止", self.program, timeout);
                let _ = child.kill();
                let _ = child.wait();
                return Err(ConvertError::SubprocessTimeout {
                    program: self.program.clone(),
                    seconds: timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn check_status(&self, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        if let Some(code) = status.code() {
            return Err(ConvertError::SubprocessExit { program: self.program.clone(), code });
        }
        Err(ConvertError::SubprocessSignal {
            program: self.program.clone(),
            signal: signal_description(status),
        })
    }
}

impl OfficeConverterTrait for SofficeConverter {
    fn convert(&self, source: &Path, target_format: &str, out_dir: &Path) -> Result<PathBuf> {
        info!("呼叫 {} 轉換 {} 為 {}", self.program, source.display(), target_format);
        let mut child = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg(target_format)
            .arg("--outdir")
            .arg(out_dir)
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ConvertError::SubprocessSpawn {
                program: self.program.clone(),
                source,
            })?;

        let status = self.wait(&mut child)?;
        self.check_status(status)?;
        Ok(converted_path(source, target_format, out_dir))
    }
}

/// 轉換程式產出的檔案路徑：與來源同名，副檔名換成目標格式
pub fn converted_path(source: &Path, target_format: &str, out_dir: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or(source.as_os_str());
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(target_format);
    out_dir.join(name)
}

#[cfg(unix)]
fn signal_description(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(1) => "SIGHUP".to_string(),
        Some(2) => "SIGINT".to_string(),
        Some(6) => "SIGABRT".to_string(),
        Some(9) => "SIGKILL".to_string(),
        Some(11) => "SIGSEGV".to_string(),
        Some(15) => "SIGTERM".to_string(),
        Some(sig) => format!("signal {}", sig),
        None => "unknown".to_string(),
    }
}

#[cfg(not(unix))]
fn signal_description(_status: ExitStatus) -> String {
    "unknown".to_string()
}

/// DOC 轉 DOCX 過程中的暫存產物，擁有暫存目錄
///
/// 呼叫 `cleanup` 或被 drop 時遞迴刪除整個目錄。
#[derive(Debug)]
pub struct TempConversionArtifact {
    dir: TempDir,
    docx_path: PathBuf,
}

impl TempConversionArtifact {
    /// 建立新的暫存目錄並呼叫轉換程式產出 DOCX
    pub fn acquire(converter: &dyn OfficeConverterTrait, source: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(TEMP_DIR_PREFIX).tempdir()?;
        let docx_path = converter.convert(source, "docx", dir.path())?;
        if !docx_path.is_file() {
            return Err(ConvertError::MissingArtifact(docx_path));
        }
        Ok(TempConversionArtifact { dir, docx_path })
    }

    pub fn docx_path(&self) -> &Path {
        &self.docx_path
    }

    pub fn dir_path(&self) -> &Path {
        self.dir.path()
    }

    pub fn cleanup(self) -> Result<()> {
        self.dir.close()?;
        Ok(())
    }
}
