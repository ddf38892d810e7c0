use crate::output::{Output, OutputFormat};
use clap::Args;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use std::path::PathBuf;
use watchlist_config::{Config, PathManager};
use watchlist_core::{JsonStore, MovieService};
use watchlist_models::{ListQuery, MoviePage, SortField, SortOrder};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Movies per page (defaults to defaults.page_size)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Field to sort by (e.g. addedDate, title, rating, year, priority)
    #[arg(long, default_value = "addedDate")]
    pub sort_by: String,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "desc", value_parser = ["asc", "desc"])]
    pub order: String,

    /// JSON file holding the movie collection (overrides storage.data_file)
    #[arg(long, value_name = "PATH", env = "WATCHLIST_DATA_FILE")]
    pub data_file: Option<PathBuf>,
}

pub fn run_list(args: ListArgs, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let data_file = args.data_file.clone().unwrap_or_else(|| config.data_file(paths));
    let service = MovieService::new(JsonStore::new(&data_file), config.movie_defaults());

    let sort_by = SortField::from_name(&args.sort_by)
        .ok_or_else(|| eyre!("Unknown sort field: {}", args.sort_by))?;
    let query = ListQuery {
        page: args.page.max(1),
        limit: args.limit.unwrap_or(config.defaults.page_size).max(1),
        sort_by,
        order: SortOrder::parse(Some(&args.order)),
    };

    let page = service.list(&query);

    match output.format() {
        OutputFormat::Human => print_table(&page, &data_file, output),
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let value = serde_json::to_value(&page).wrap_err("Failed to serialize movies")?;
            output.json(&value);
        }
    }

    Ok(())
}

fn print_table(page: &MoviePage, data_file: &std::path::Path, output: &Output) {
    if page.pagination.total_items == 0 {
        output.warn(format!("No movies in {}", data_file.display()));
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Genre").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Director").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Watched").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("ID").add_attribute(comfy_table::Attribute::Bold),
    ]);
    for movie in &page.movies {
        table.add_row(vec![
            Cell::new(movie.priority),
            Cell::new(&movie.title),
            Cell::new(movie.year),
            Cell::new(&movie.genre),
            Cell::new(&movie.director),
            Cell::new(format!("{}/10", movie.rating)),
            if movie.watched {
                Cell::new("✓").fg(comfy_table::Color::Green)
            } else {
                Cell::new("")
            },
            Cell::new(&movie.id).fg(comfy_table::Color::DarkGrey),
        ]);
    }
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    output.info(table.to_string());
    output.info(format!(
        "Page {} of {} ({} movies)",
        page.pagination.page,
        page.pagination.total_pages.max(1),
        page.pagination.total_items
    ));
}
