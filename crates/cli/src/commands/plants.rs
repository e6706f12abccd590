//! Catalog commands.

use std::io::Write;

use urvann_core::storage::KeyValueStore;
use urvann_storefront::catalog::{CatalogQuery, CatalogSummary, Plant, PlantForm};
use urvann_storefront::state::AppState;

use super::CliError;

/// List plants matching `query`.
pub async fn list<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    query: &CatalogQuery,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let plants = state.catalog().list_plants(query).await?;
    write_listing(&plants, query, out)
}

fn write_listing(
    plants: &[Plant],
    query: &CatalogQuery,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if plants.is_empty() {
        writeln!(out, "No plants found.")?;
        if !query.is_default() {
            writeln!(out, "Try clearing the search or filters.")?;
        }
        return Ok(());
    }

    let summary = CatalogSummary::of(plants);
    write!(
        out,
        "{} plants, {} in stock, sorted by {}",
        summary.count, summary.available, query.sort
    )?;
    if let Some((min, max)) = summary.price_range {
        write!(out, " ({min} - {max})")?;
    }
    writeln!(out)?;

    for plant in plants {
        write_plant(plant, out)?;
    }
    Ok(())
}

fn write_plant(plant: &Plant, out: &mut impl Write) -> Result<(), CliError> {
    let stock = if plant.availability {
        format!("{} in stock", plant.stock_count)
    } else {
        "out of stock".to_string()
    };
    writeln!(
        out,
        "  {:<26} {:<24} {:>10}  {stock}",
        plant.id.as_str(),
        plant.name,
        plant.price.to_string(),
    )?;
    if !plant.categories.is_empty() {
        writeln!(out, "  {:<26} {}", "", plant.categories.join(", "))?;
    }
    Ok(())
}

/// List category labels.
pub async fn categories<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for category in state.catalog().list_categories().await {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

/// Validate and submit a new plant.
pub async fn add<S: KeyValueStore + Clone>(
    state: &AppState<S>,
    form: &PlantForm,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let plant = state.submit_plant(form).await?;
    writeln!(out, "Added plant {} ({})", plant.name, plant.price)?;
    Ok(())
}
