use clap::Parser;
use crate::config::config::Cli;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::ports::facade_ports::LogObserver;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::ConversionOutput;
use crate::service::config_service::{CliConfigAdapter, ConfigService};
use crate::service::markdown::MarkdownService;
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> Result<ConversionOutput> {
    // 參數錯誤時 clap 會顯示用法並以非零代碼結束
    let cli = Cli::parse_from(args);

    let config_port: Box<dyn ConfigPort> = Box::new(CliConfigAdapter::new(cli));
    let config_service = ConfigService::new(config_port);
    let config = config_service.get_config()?;
    setup_logging(&config.log_level);
    run(&config)
}

pub fn run(config: &AppConfig) -> Result<ConversionOutput> {
    let facade = ConversionFacade::new(
        Box::new(MarkdownService::with_soffice(&config.soffice, config.timeout)),
        Box::new(LogObserver),
        config.no_progress,
    );
    facade.execute_conversion(&config.request())
}
