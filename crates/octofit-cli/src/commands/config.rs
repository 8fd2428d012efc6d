use std::path::Path;

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use octofit::{Config, Resource};

use crate::error::CliResult;
use crate::output::OutputFormat;

#[derive(Parser)]
pub struct ConfigCommand {
    #[clap(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    #[clap(about = "Show the effective configuration")]
    Show,
}

impl ConfigCommand {
    pub fn execute(
        &self,
        config: &Config,
        config_path: Option<&Path>,
        format: OutputFormat,
    ) -> CliResult<()> {
        match &self.command {
            ConfigSubcommand::Show => {
                println!("{}", Self::render(config, config_path, format)?);
                Ok(())
            }
        }
    }

    /// Effective settings plus the API root and endpoints they resolve to
    pub fn render(
        config: &Config,
        config_path: Option<&Path>,
        format: OutputFormat,
    ) -> CliResult<String> {
        let api = &config.api;
        let resolved = api.resolve_base_url();

        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "api": {
                        "base_url": api.base_url,
                        "codespace_name": api.codespace_name,
                        "port": api.port,
                        "domain_suffix": api.domain_suffix,
                        "scheme": api.scheme,
                        "timeout_secs": api.timeout_secs,
                        "max_retries": api.max_retries,
                        "initial_backoff_ms": api.initial_backoff_ms,
                    },
                    "resolved_base_url": resolved.as_ref().ok().map(|u| u.to_string()),
                    "endpoints": Resource::ALL
                        .iter()
                        .filter_map(|r| resolved.as_ref().ok().and_then(|u| u.join(&r.path()).ok()))
                        .map(|u| u.to_string())
                        .collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&output)?)
            }
            OutputFormat::Table => {
                let mut out = match config_path {
                    Some(path) => format!("Configuration from: {}\n", path.display()),
                    None => "Configuration: (defaults and discovered files)\n".to_string(),
                };
                out.push_str("==============================\n\n");

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Setting", "Value"]);

                table.add_row(["base_url", api.base_url.as_deref().unwrap_or("(not set)")]);
                table.add_row([
                    "codespace_name",
                    api.codespace_name.as_deref().unwrap_or("(not set)"),
                ]);
                table.add_row(["port", &api.port.to_string()]);
                table.add_row(["domain_suffix", &api.domain_suffix]);
                table.add_row(["scheme", &api.scheme]);
                table.add_row([
                    "timeout_secs",
                    &api
                        .timeout_secs
                        .map(|t| t.to_string())
                        .unwrap_or_else(|| "(none)".to_string()),
                ]);
                table.add_row(["max_retries", &api.max_retries.to_string()]);
                table.add_row(["initial_backoff_ms", &api.initial_backoff_ms.to_string()]);

                out.push_str(&format!("[API]\n{table}\n\n"));
                match resolved {
                    Ok(url) => out.push_str(&format!("Resolved API root: {url}")),
                    Err(e) => out.push_str(&format!("Resolved API root: unavailable ({e})")),
                }
                Ok(out)
            }
        }
    }
}
