use std::time::Duration;
use crate::config::config::{validate_cli_args, Cli};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::error::Result;
use crate::utils::utils::resolve_absolute;

// 配置服務，負責選擇適當的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> Result<AppConfig> {
        self.config_port.get_config()
    }
}

// CLI 配置適配器，將路徑解析為絕對路徑
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> Result<AppConfig> {
        validate_cli_args(&self.cli)?;
        Ok(AppConfig {
            input: resolve_absolute(&self.cli.input)?,
            output: resolve_absolute(&self.cli.output)?,
            clear_output: self.cli.clear_output,
            log_level: self.cli.log_level.clone(),
            no_progress: self.cli.no_progress,
            soffice: self.cli.soffice.clone(),
            timeout: self.cli.timeout.map(Duration::from_secs),
        })
    }
}
