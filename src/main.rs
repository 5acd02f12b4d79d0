use std::process::ExitCode;

use doc_to_markdown::action::cli::process_args;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    match process_args(args) {
        Ok(output) => {
            log::info!("程式執行完成，輸出位置：{}", output.output_path.display());
            println!("轉換完成！輸出位於：{}", output.output_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("轉換失敗：{}", e);
            eprintln!("轉換失敗：{}", e);
            ExitCode::FAILURE
        }
    }
}
