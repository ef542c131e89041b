use crate::config::FillConfig;
use crate::error::{FillError, FillResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::fill::{fill_sheet, FillReport};
use colored::Colorize;
use tracing::info;

/// Read, fill and (unless `dry_run`) write the workbook described by `config`.
pub fn process(config: &FillConfig, dry_run: bool) -> FillResult<FillReport> {
    config.validate()?;

    let mut workbook = ExcelImporter::new(&config.input_path).import()?;
    let sheet = workbook
        .first_sheet_mut()
        .ok_or_else(|| FillError::EmptyWorkbook(config.input_path.clone()))?;

    info!(
        sheet = %sheet.name,
        rows = sheet.rows.len(),
        variant = ?config.variant,
        "filling first worksheet"
    );
    let report = fill_sheet(sheet, &config.policy(), config.columns);

    if dry_run {
        info!("dry run, skipping write");
    } else {
        ExcelExporter::new(&workbook).export(&config.output_path)?;
    }

    Ok(report)
}

/// Execute a fill run and print its log
pub fn fill(config: &FillConfig, dry_run: bool) -> FillResult<()> {
    let report = process(config, dry_run)?;

    if dry_run {
        println!("{}", "Dry run: no file written.".bold().yellow());
    } else {
        println!("{}", "File processed and saved successfully!".bold().green());
    }

    for line in report.lines() {
        println!("{}", line);
    }

    println!("Total modified records: {}", report.count());
    Ok(())
}
