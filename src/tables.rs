use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    battery::{BatteryCalculationInput, BatteryCalculationResult, Chemistry},
    catalog::{Category, Product},
    images::{UploadOutcome, UploadResult},
    probe::{Check, CheckStatus},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_calculation_table(
    input: &BatteryCalculationInput,
    result: &BatteryCalculationResult,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Load", "Backup", "Chemistry", "System voltage", "DoD", "Capacity"]);
    table.add_row(vec![
        Cell::new(input.load).set_alignment(CellAlignment::Right),
        Cell::new(input.backup).set_alignment(CellAlignment::Right),
        Cell::new(input.chemistry).fg(if input.chemistry == Chemistry::Lithium {
            Color::Green
        } else {
            Color::DarkYellow
        }),
        Cell::new(result.voltage).set_alignment(CellAlignment::Right),
        Cell::new(result.depth_of_discharge).set_alignment(CellAlignment::Right),
        Cell::new(result.capacity)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);
    table
}

fn category_color(category: &str) -> Color {
    match Category::from_label(category) {
        Some(Category::SolarPanels) => Color::Yellow,
        Some(Category::Batteries) => Color::Green,
        Some(Category::Controllers) => Color::Blue,
        Some(Category::Inverters) => Color::Magenta,
        None => Color::Grey,
    }
}

#[must_use]
pub fn build_products_table<'a>(products: impl IntoIterator<Item = &'a Product>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Name", "Category", "Voltage", "Features"]);
    for product in products {
        table.add_row(vec![
            Cell::new(product.id).add_attribute(Attribute::Dim),
            Cell::new(&product.name).add_attribute(Attribute::Bold),
            Cell::new(&product.category).fg(category_color(&product.category)),
            Cell::new(&product.voltage),
            Cell::new(product.features.iter().join(", ")),
        ]);
    }
    table
}

#[must_use]
pub fn build_upload_table(results: &[UploadResult<'_>]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Image", "Category", "Result"]);
    for result in results {
        let outcome = match &result.outcome {
            UploadOutcome::Uploaded { url: Some(url) } => Cell::new(url).fg(Color::Green),
            UploadOutcome::Uploaded { url: None } => {
                Cell::new("uploaded, URL not provided").fg(Color::Green)
            }
            UploadOutcome::Failed { error } => Cell::new(error).fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(result.image.file_name),
            Cell::new(result.image.category).add_attribute(Attribute::Dim),
            outcome,
        ]);
    }
    table
}

#[must_use]
pub fn build_probe_table(checks: &[Check]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Check", "Status"]);
    for check in checks {
        let color = match check.status {
            CheckStatus::Ok(_) => Color::Green,
            CheckStatus::Status(_) => Color::DarkYellow,
            CheckStatus::Unavailable(_) => Color::Red,
        };
        table.add_row(vec![Cell::new(check.name), Cell::new(&check.status).fg(color)]);
    }
    table
}
