use std::path::Path;
use log::{error, info, warn};
use crate::error::ConvertError;
use crate::models::conversion::SkipReason;

// 轉換進度觀察者，取代直接輸出到終端
pub trait ConversionObserver: Send + Sync {
    fn on_converted(&self, input: &Path, output: &Path);
    fn on_skipped(&self, input: &Path, output: &Path, reason: &SkipReason);
    fn on_failed(&self, input: &Path, error: &ConvertError);
    fn on_empty(&self, input_dir: &Path);
}

/// 以日誌輸出進度的預設觀察者
pub struct LogObserver;

impl ConversionObserver for LogObserver {
    fn on_converted(&self, input: &Path, output: &Path) {
        info!("✔ 已轉換：{} -> {}", input.display(), output.display());
    }

    fn on_skipped(&self, input: &Path, output: &Path, reason: &SkipReason) {
        match reason {
            SkipReason::OutputExists => {
                info!("跳過 {}：輸出檔已存在 {}", input.display(), output.display())
            }
            SkipReason::ProbeFailed(e) => {
                warn!("跳過 {}：無法檢查輸出檔 {}：{}", input.display(), output.display(), e)
            }
        }
    }

    fn on_failed(&self, input: &Path, err: &ConvertError) {
        error!("✘ 轉換失敗：{}，錯誤：{}", input.display(), err);
    }

    fn on_empty(&self, input_dir: &Path) {
        warn!("目錄 {} 中沒有可轉換的檔案（.doc、.docx、.pdf）", input_dir.display());
    }
}
