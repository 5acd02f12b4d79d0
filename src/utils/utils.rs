use std::io::{self, Write};
use std::path::{Path, PathBuf};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};

pub fn setup_logging(log_level: &str) {
    let log_level_filter = match log_level {
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Info,
    };
    // 重複初始化（例如測試中）時忽略
    let _ = env_logger::Builder::new()
        .filter_level(log_level_filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .try_init();
}

/// 以目前工作目錄為基準解析為絕對路徑
pub fn resolve_absolute(path: impl AsRef<Path>) -> io::Result<PathBuf> {
    std::path::absolute(path.as_ref())
}

pub struct ProgressManager {
    pb: ProgressBar,
    no_progress: bool,
}

impl ProgressManager {
    pub fn new(total: u64, no_progress: bool) -> Self {
        let pb = if no_progress || total == 0 {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            let style = ProgressStyle::default_bar()
                .template("{msg} [{bar:40}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-");
            pb.set_style(style);
            pb
        };
        ProgressManager { pb, no_progress }
    }

    pub fn update(&self, index: usize, total: usize, file_path: &Path) {
        if self.no_progress {
            return;
        }
        self.pb.set_message(format!("處理檔案 {}/{}：{}", index + 1, total, file_name(file_path)));
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn finish(&self, converted: usize, skipped: usize, failed: usize) {
        if self.no_progress {
            return;
        }
        self.pb.finish_with_message(format!(
            "完成，轉換 {} 個，跳過 {} 個，失敗 {} 個",
            converted, skipped, failed
        ));
    }
}

pub fn create_progress_bar(total: u64, no_progress: bool) -> ProgressManager {
    ProgressManager::new(total, no_progress)
}

/// 取得檔名供日誌顯示
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
