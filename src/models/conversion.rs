use std::path::PathBuf;
use crate::error::ConvertError;

/// 一次執行的轉換請求，啟動後不再變動
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionInput {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub clear_output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 輸出檔已存在且未要求清除
    OutputExists,
    /// 無法確認輸出檔狀態
    ProbeFailed(String),
}

/// 單一檔案的處理結果
#[derive(Debug)]
pub enum ConversionOutcome {
    Converted(PathBuf),
    Skipped(SkipReason),
    Failed(ConvertError),
}

impl ConversionOutcome {
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ConversionOutcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ConversionOutcome::Failed(_))
    }
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub output_path: PathBuf,
    pub outcomes: Vec<(PathBuf, ConversionOutcome)>,
}

impl ConversionOutput {
    pub fn converted(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_converted()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_failed()).count()
    }
}
