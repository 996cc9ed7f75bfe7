//! The search run: gather inputs, search every point and category, merge,
//! then export.

use std::path::{Path, PathBuf};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use looker_core::{
    parse_selection, AppConfig, Category, GeoPoint, PacingConfig, PlaceRecord, SearchQuery,
};
use looker_places::{dedup_by_place_id, Aggregator, GooglePlacesClient, PlacesApi};

use crate::naming::OutputPaths;
use crate::{export, map, prompt, SearchArgs};

/// What an export produced.
#[derive(Debug)]
pub(crate) struct ExportSummary {
    pub spreadsheet: PathBuf,
    pub map: Option<PathBuf>,
    pub places: usize,
}

pub(crate) async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let selected = match args.categories.as_deref() {
        Some(raw) => parse_selection(raw),
        None => prompt::prompt_categories()?,
    };
    if selected.is_empty() {
        anyhow::bail!("no valid category selected");
    }

    let radius = match args.radius {
        Some(radius) => radius,
        None => prompt::prompt_radius()?,
    };

    let points = if args.points.is_empty() {
        prompt::prompt_points()?
    } else {
        args.points
    };
    if points.is_empty() {
        anyhow::bail!("no search points entered");
    }

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| config.output_dir.clone());
    let client = GooglePlacesClient::from_config(config)?;

    tracing::info!(
        points = points.len(),
        categories = selected.len(),
        radius,
        "starting search"
    );

    let progress = points_progress(points.len());
    let records =
        collect_places(&client, config.pacing, &points, &selected, radius, &progress).await;
    progress.finish_and_clear();

    match export_results(&output_dir, &selected, radius, records)? {
        Some(summary) => {
            println!(
                "Saved {} unique places to {}",
                summary.places,
                summary.spreadsheet.display()
            );
            match summary.map {
                Some(path) => println!("Map saved to {}", path.display()),
                None => println!("No coordinates available; map not created"),
            }
        }
        None => println!("No results found."),
    }
    Ok(())
}

/// Search every point for every selected category, in that nesting order.
///
/// Records are concatenated unmerged; the same place may appear more than
/// once.
pub(crate) async fn collect_places<A: PlacesApi + ?Sized>(
    api: &A,
    pacing: PacingConfig,
    points: &[GeoPoint],
    selected: &[&Category],
    radius: u32,
    progress: &ProgressBar,
) -> Vec<PlaceRecord> {
    let aggregator = Aggregator::new(api, pacing);
    let mut all = Vec::new();
    for point in points {
        for category in selected {
            let query = SearchQuery::for_category(*point, radius, category);
            all.extend(aggregator.search(&query).await);
        }
        progress.inc(1);
    }
    all
}

/// Merge `records` and write the spreadsheet and map under `output_dir`.
///
/// Returns `None`, writing nothing, when there are no records.
pub(crate) fn export_results(
    output_dir: &Path,
    selected: &[&Category],
    radius: u32,
    records: Vec<PlaceRecord>,
) -> anyhow::Result<Option<ExportSummary>> {
    if records.is_empty() {
        return Ok(None);
    }
    let merged = dedup_by_place_id(records);

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    let paths = OutputPaths::new(output_dir, selected, radius);

    export::write_spreadsheet(&paths.spreadsheet, &merged)?;
    let map_written = map::write_map(&paths.map, &merged)?;

    tracing::info!(
        places = merged.len(),
        spreadsheet = %paths.spreadsheet.display(),
        map_written,
        "export complete"
    );

    Ok(Some(ExportSummary {
        spreadsheet: paths.spreadsheet,
        map: map_written.then_some(paths.map),
        places: merged.len(),
    }))
}

fn points_progress(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
        pb.set_style(style);
    }
    pb.set_message("Searching points");
    pb
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
