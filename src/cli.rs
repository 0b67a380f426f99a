use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Single-user to-do list web app")]
pub struct Cli {
    /// TOML config file
    #[arg(short, long, env = "TASKLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000
    #[arg(short, long, env = "TASKLIST_BIND")]
    pub bind: Option<String>,

    /// Directory holding tasks.json and categories.json
    #[arg(short, long, env = "TASKLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    /// Config file (or defaults) with any flags layered on top.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::load_optional(self.config.as_deref())?;
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        Ok(config)
    }
}
