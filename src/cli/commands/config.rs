//! Config command implementation
//!
//! This module implements the `config` subcommands for reading and
//! changing the deployment configuration.

use crate::adapters::database::factory::create_control_store;
use crate::config::keys;
use crate::config::settings::load_settings;
use crate::control::ConfigStore;
use clap::{Args, Subcommand};

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the current configuration as YAML
    Show {
        /// Print credential values instead of masking them
        #[arg(long)]
        unredacted: bool,
    },

    /// Read a single configuration key
    Get {
        /// Dotted key path, e.g. pitr.enabled
        key: String,
    },

    /// Set a single configuration key
    Set {
        /// Dotted key path, e.g. pitr.enabled
        key: String,

        /// New value
        value: String,
    },

    /// Replace the whole configuration from a YAML file
    Import {
        /// Path to the YAML configuration file
        file: String,
    },

    /// List the settable configuration keys
    Keys,
}

impl ConfigArgs {
    /// Execute the config command
    pub async fn execute(&self, settings_path: &str) -> anyhow::Result<i32> {
        // Keys is purely informational and needs no database
        if let ConfigCommand::Keys = self.command {
            for key in keys::valid_keys() {
                println!("{}", key);
            }
            return Ok(0);
        }

        let settings = match load_settings(settings_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to load settings file: {}", e);
                return Ok(2);
            }
        };

        let control = match create_control_store(&settings.database).await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to connect to the control database: {}", e);
                return Ok(4);
            }
        };
        let store = ConfigStore::new(control);

        match &self.command {
            ConfigCommand::Show { unredacted } => {
                let yaml = store.get_config_yaml(!unredacted).await?;
                print!("{}", yaml);
            }
            ConfigCommand::Get { key } => {
                let value = store.get_config_var(key).await?;
                println!("{}", value);
            }
            ConfigCommand::Set { key, value } => {
                store.set_config_var(key, value).await?;
                let current = store.get_config_var(key).await?;
                println!("[{}={}]", key, current);
            }
            ConfigCommand::Import { file } => {
                let buf = tokio::fs::read(file).await?;
                store.set_config_yaml(&buf).await?;
                println!("Configuration applied from {}", file);
            }
            ConfigCommand::Keys => unreachable!(),
        }

        Ok(0)
    }
}
