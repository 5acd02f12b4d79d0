use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 轉換流程的錯誤類型
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 命令列參數無效
    #[error("參數錯誤：{0}")]
    Argument(String),

    /// 副檔名不在支援清單內
    #[error("不支援的檔案類型：{}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// 無法啟動外部轉換程式
    #[error("無法啟動轉換程式 '{program}'：{source}")]
    SubprocessSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// 外部轉換程式以非零代碼結束
    #[error("轉換程式 '{program}' 結束代碼 {code}")]
    SubprocessExit { program: String, code: i32 },

    /// 外部轉換程式被訊號終止
    #[error("轉換程式 '{program}' 被訊號 {signal} 終止")]
    SubprocessSignal { program: String, signal: String },

    /// 外部轉換程式超過等待時間
    #[error("轉換程式 '{program}' 超過 {seconds} 秒未結束，已強制終止")]
    SubprocessTimeout { program: String, seconds: u64 },

    /// 轉換程式回報成功但找不到產出檔案
    #[error("找不到轉換後的檔案：{}", .0.display())]
    MissingArtifact(PathBuf),

    /// 預期寫入檔案的位置已是目錄
    #[error("輸出路徑衝突：{}", .0.display())]
    OutputConflict(PathBuf),

    #[error("輸入路徑必須是檔案或目錄：{}", .0.display())]
    InvalidInput(PathBuf),

    #[error("DOCX 解析失敗：{0}")]
    Docx(String),

    #[error("PDF 文字擷取失敗：{0}")]
    Pdf(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// 是否為「檔案不存在」類型的 IO 錯誤
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConvertError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}
