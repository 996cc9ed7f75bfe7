//! Interactive prompts for search inputs not given on the command line.

use std::fmt::Write as _;

use dialoguer::Input;
use looker_core::{categories, parse_selection, Category, GeoPoint};

const DONE: &str = "done";

/// The numbered category menu, one category per line.
pub(crate) fn category_menu() -> String {
    let mut menu = String::from("Available categories:\n");
    for category in categories() {
        let _ = writeln!(menu, "  {}. {}", category.key, category.label);
    }
    menu
}

pub(crate) fn prompt_categories() -> anyhow::Result<Vec<&'static Category>> {
    print!("{}", category_menu());
    let raw: String = Input::new()
        .with_prompt("Categories (comma-separated keys, e.g. 1,3,5)")
        .allow_empty(true)
        .interact_text()?;
    Ok(parse_selection(&raw))
}

pub(crate) fn prompt_radius() -> anyhow::Result<u32> {
    let raw: String = Input::new()
        .with_prompt("Search radius in meters")
        .interact_text()?;
    Ok(looker_core::parse_radius(&raw)?)
}

/// Collect points until `done` is entered at either prompt. Invalid pairs
/// are reported and the user is asked again.
pub(crate) fn prompt_points() -> anyhow::Result<Vec<GeoPoint>> {
    println!("Enter search points. Type '{DONE}' at either prompt to finish.");
    let mut points = Vec::new();
    loop {
        let lat: String = Input::new().with_prompt("Latitude").interact_text()?;
        if is_done(&lat) {
            break;
        }
        let lng: String = Input::new().with_prompt("Longitude").interact_text()?;
        if is_done(&lng) {
            break;
        }
        match parse_point(&lat, &lng) {
            Ok(point) => {
                println!("Added point {point}");
                points.push(point);
            }
            Err(msg) => println!("Invalid point: {msg}. Try again."),
        }
    }
    Ok(points)
}

pub(crate) fn is_done(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(DONE)
}

/// Parse separately entered latitude and longitude strings.
pub(crate) fn parse_point(lat: &str, lng: &str) -> Result<GeoPoint, String> {
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("latitude '{}' is not a number", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("longitude '{}' is not a number", lng.trim()))?;
    GeoPoint::new(lat, lng).map_err(|e| e.to_string())
}
