use std::path::PathBuf;
use std::time::Duration;
use crate::error::Result;
use crate::models::conversion::ConversionInput;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub clear_output: bool,
    pub log_level: String,
    pub no_progress: bool,
    pub soffice: String,
    pub timeout: Option<Duration>,
}

impl AppConfig {
    pub fn request(&self) -> ConversionInput {
        ConversionInput {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            clear_output: self.clear_output,
        }
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> Result<AppConfig>;
}
