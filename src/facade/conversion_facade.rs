use std::fs;
use std::io;
use std::path::Path;
use log::{info, warn};
use crate::error::{ConvertError, Result};
use crate::facade::ports::facade_ports::ConversionObserver;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionInput, ConversionOutcome, ConversionOutput, SkipReason};
use crate::models::format::is_supported;
use crate::service::file::{
    canonicalize_existing, collect_supported_files, markdown_target, remove_dir_if_exists,
    remove_file_if_exists, write_markdown_file,
};
use crate::service::traits::i_service::MarkdownServiceTrait;
use crate::utils::utils::create_progress_bar;

pub struct ConversionFacade {
    markdown_service: Box<dyn MarkdownServiceTrait>,
    observer: Box<dyn ConversionObserver>,
    no_progress: bool,
}

impl ConversionFacade {
    pub fn new(
        markdown_service: Box<dyn MarkdownServiceTrait>,
        observer: Box<dyn ConversionObserver>,
        no_progress: bool,
    ) -> Self {
        ConversionFacade {
            markdown_service,
            observer,
            no_progress,
        }
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, input: &ConversionInput) -> Result<ConversionOutput> {
        let metadata = fs::metadata(&input.input_path).map_err(|e| {
            warn!("無法讀取輸入路徑 {}：{}", input.input_path.display(), e);
            ConvertError::InvalidInput(input.input_path.clone())
        })?;

        if metadata.is_file() {
            info!("開始單檔轉換，輸入檔案：{}，輸出檔案：{}",
                  input.input_path.display(), input.output_path.display());
            let outcome = self.convert_file(&input.input_path, &input.output_path, input.clear_output)?;
            Ok(ConversionOutput {
                output_path: input.output_path.clone(),
                outcomes: vec![(input.input_path.clone(), outcome)],
            })
        } else if metadata.is_dir() {
            info!("開始目錄轉換，輸入目錄：{}，輸出目錄：{}",
                  input.input_path.display(), input.output_path.display());
            self.convert_directory(&input.input_path, &input.output_path, input.clear_output)
        } else {
            Err(ConvertError::InvalidInput(input.input_path.clone()))
        }
    }

    fn convert_file(&self, input: &Path, output: &Path, clear_output: bool) -> Result<ConversionOutcome> {
        if !is_supported(input) {
            return Err(ConvertError::UnsupportedFormat(input.to_path_buf()));
        }
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }

        match fs::metadata(output) {
            Ok(meta) if meta.is_dir() => {
                return Err(ConvertError::OutputConflict(output.to_path_buf()));
            }
            Ok(_) if clear_output => {
                fs::remove_file(output)?;
                info!("已刪除既有輸出檔：{}", output.display());
            }
            Ok(_) => {
                let reason = SkipReason::OutputExists;
                self.observer.on_skipped(input, output, &reason);
                return Ok(ConversionOutcome::Skipped(reason));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let markdown = self.markdown_service.convert(input)?;
        write_markdown_file(output, &markdown)?;
        self.observer.on_converted(input, output);
        Ok(ConversionOutcome::Converted(output.to_path_buf()))
    }

    fn convert_directory(&self, input_dir: &Path, output_dir: &Path, clear_output: bool) -> Result<ConversionOutput> {
        if clear_output {
            // 清除輸出目錄不可波及輸入檔案；比較前先解析 `..` 與符號連結
            let input_real = fs::canonicalize(input_dir)?;
            let output_real = canonicalize_existing(output_dir)?;
            if input_real.starts_with(&output_real) {
                return Err(ConvertError::OutputConflict(output_dir.to_path_buf()));
            }
            remove_dir_if_exists(output_dir)?;
            info!("已清除輸出目錄：{}", output_dir.display());
        }
        fs::create_dir_all(output_dir)?;

        let files = collect_supported_files(input_dir)?;
        let total_files = files.len();
        if total_files == 0 {
            self.observer.on_empty(input_dir);
            return Ok(ConversionOutput {
                output_path: output_dir.to_path_buf(),
                outcomes: Vec::new(),
            });
        }
        info!("正在處理 {} 個檔案", total_files);

        let pm = create_progress_bar(total_files as u64, self.no_progress);
        let mut outcomes = Vec::with_capacity(total_files);
        for (i, file_path) in files.iter().enumerate() {
            pm.update(i, total_files, file_path);
            let target = markdown_target(output_dir, file_path);
            let outcome = self.convert_entry(file_path, &target, clear_output);
            pm.inc();
            outcomes.push((file_path.clone(), outcome));
        }

        let output = ConversionOutput {
            output_path: output_dir.to_path_buf(),
            outcomes,
        };
        pm.finish(output.converted(), output.skipped(), output.failed());
        info!("目錄轉換完成：轉換 {} 個，跳過 {} 個，失敗 {} 個",
              output.converted(), output.skipped(), output.failed());
        Ok(output)
    }
}

impl ConversionFacade {
    /// 目錄模式下處理單一檔案，所有錯誤都轉為結果而不向上傳遞
    fn convert_entry(&self, input: &Path, target: &Path, clear_output: bool) -> ConversionOutcome {
        if clear_output {
            if let Err(e) = remove_file_if_exists(target) {
                warn!("刪除既有輸出檔 {} 失敗：{}", target.display(), e);
            }
        } else {
            match fs::metadata(target) {
                Ok(_) => {
                    let reason = SkipReason::OutputExists;
                    self.observer.on_skipped(input, target, &reason);
                    return ConversionOutcome::Skipped(reason);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    let reason = SkipReason::ProbeFailed(e.to_string());
                    self.observer.on_skipped(input, target, &reason);
                    return ConversionOutcome::Skipped(reason);
                }
            }
        }

        let result = self
            .markdown_service
            .convert(input)
            .and_then(|markdown| write_markdown_file(target, &markdown).map_err(Into::into));
        match result {
            Ok(()) => {
                self.observer.on_converted(input, target);
                ConversionOutcome::Converted(target.to_path_buf())
            }
            Err(e) => {
                self.observer.on_failed(input, &e);
                ConversionOutcome::Failed(e)
            }
        }
    }
}
