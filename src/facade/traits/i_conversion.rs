use std::path::Path;
use crate::error::Result;
use crate::models::conversion::{ConversionInput, ConversionOutcome, ConversionOutput};

// Facade 接口，負責協調檔案轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 依輸入路徑類型執行單檔或目錄轉換
    /// # 參數
    /// - input: 轉換請求，路徑須為絕對路徑
    /// # 回傳
    /// - 成功時返回每個檔案的處理結果；單檔模式的錯誤與目錄層級錯誤直接返回
    fn execute_conversion(&self, input: &ConversionInput) -> Result<ConversionOutput>;

    /// 轉換單一檔案，任何錯誤都會返回給呼叫者
    fn convert_file(&self, input: &Path, output: &Path, clear_output: bool) -> Result<ConversionOutcome>;

    /// 轉換目錄中的所有受支援檔案，單一檔案失敗不影響其他檔案
    fn convert_directory(&self, input_dir: &Path, output_dir: &Path, clear_output: bool) -> Result<ConversionOutput>;
}
