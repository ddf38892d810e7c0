use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;
use watchlist_config::{Config, PathManager};

pub fn run_config(cmd: ConfigCommands, config: &Config, config_file: &Path, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config, config_file, paths, output),
        ConfigCommands::Init { force } => init_config(config_file, paths, force, output),
    }
}

fn show_config(config: &Config, config_file: &Path, paths: &PathManager, output: &Output) -> Result<()> {
    let data_file = config.data_file(paths);
    let log_file = config.log_file(paths);

    match output.format() {
        OutputFormat::Human => {
            if !config_file.exists() {
                output.warn(format!(
                    "Configuration file not found at {}; showing defaults",
                    config_file.display()
                ));
            }

            let mut paths_table = Table::new();
            paths_table.set_header(vec![
                Cell::new("Paths").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            ]);
            paths_table.add_row(vec![Cell::new("Config File"), Cell::new(config_file.display().to_string())]);
            paths_table.add_row(vec![Cell::new("Data File"), Cell::new(data_file.display().to_string())]);
            paths_table.add_row(vec![
                Cell::new("Log File"),
                Cell::new(
                    log_file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "stderr".to_string()),
                ),
            ]);
            paths_table.load_preset(comfy_table::presets::UTF8_FULL);
            paths_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            let mut server_table = Table::new();
            server_table.set_header(vec![
                Cell::new("Server").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            ]);
            server_table.add_row(vec![Cell::new("Address"), Cell::new(config.server.address())]);
            server_table.add_row(vec![
                Cell::new("Static Dir"),
                Cell::new(
                    config
                        .server
                        .static_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]);
            server_table.add_row(vec![
                Cell::new("CORS"),
                Cell::new(if config.server.cors { "✓".green().to_string() } else { "✗".red().to_string() }),
            ]);
            server_table.add_row(vec![Cell::new("Max Body Bytes"), Cell::new(config.server.max_body_bytes)]);
            server_table.load_preset(comfy_table::presets::UTF8_FULL);
            server_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            let mut defaults_table = Table::new();
            defaults_table.set_header(vec![
                Cell::new("Defaults").fg(comfy_table::Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
            ]);
            defaults_table.add_row(vec![Cell::new("Genre"), Cell::new(&config.defaults.genre)]);
            defaults_table.add_row(vec![Cell::new("Director"), Cell::new(&config.defaults.director)]);
            defaults_table.add_row(vec![Cell::new("Page Size"), Cell::new(config.defaults.page_size)]);
            defaults_table.add_row(vec![Cell::new("Log Level"), Cell::new(&config.logging.level)]);
            defaults_table.load_preset(comfy_table::presets::UTF8_FULL);
            defaults_table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

            output.info(paths_table.to_string());
            output.info(server_table.to_string());
            output.info(defaults_table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file,
                "config_file_exists": config_file.exists(),
                "data_file": data_file,
                "log_file": log_file,
                "config": config,
            }));
        }
    }

    Ok(())
}

fn init_config(config_file: &Path, paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration file already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;

    Config::default()
        .save_to_file(config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
