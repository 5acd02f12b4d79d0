use clap::Parser;
use crate::error::{ConvertError, Result};

#[derive(Parser, Clone, Debug)]
#[command(
    name = "doc_to_markdown",
    about = "將 .doc、.docx、.pdf 文件轉換為 Markdown",
    long_about = "一個將文件轉換為 Markdown 的工具，支援單一檔案或整個目錄。\n輸入為檔案時 --output 為輸出檔案路徑，輸入為目錄時 --output 為輸出目錄。\n已存在的輸出檔預設會跳過，使用 --clear-output 清除後重新轉換。\n.doc 檔需要系統上可執行的 LibreOffice（soffice）。"
)]
pub struct Cli {
    /// 輸入檔案或目錄
    #[arg(long)]
    pub input: String,
    /// 輸出檔案或目錄
    #[arg(long)]
    pub output: String,
    /// 轉換前清除既有輸出
    #[arg(long, default_value_t = false)]
    pub clear_output: bool,
    #[arg(long, default_value = "info", value_parser = ["info", "warn", "error"])]
    pub log_level: String,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    /// 用於 .doc 轉 .docx 的 LibreOffice 執行檔
    #[arg(long, default_value = "soffice")]
    pub soffice: String,
    /// 等待 LibreOffice 的最長秒數，未指定則無限等待
    #[arg(long)]
    pub timeout: Option<u64>,
}

pub fn validate_cli_args(cli: &Cli) -> Result<()> {
    if cli.input.trim().is_empty() {
        return Err(ConvertError::Argument("--input 不可為空".to_string()));
    }
    if cli.output.trim().is_empty() {
        return Err(ConvertError::Argument("--output 不可為空".to_string()));
    }
    if cli.soffice.trim().is_empty() {
        return Err(ConvertError::Argument("--soffice 不可為空".to_string()));
    }
    if cli.timeout == Some(0) {
        return Err(ConvertError::Argument("--timeout 必須大於 0".to_string()));
    }
    Ok(())
}
