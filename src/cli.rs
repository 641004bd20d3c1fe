//! CLI helper functions

use crate::{
    config::Config,
    etl::{Extractor, Pipeline, PipelineReport, Transformer},
    model::Snapshot,
    storage::{CsvReader, SqlFileWriter},
    transform::{InspectionTransformer, TransformStats},
};
use eyre::Result;
use owo_colors::OwoColorize;

/// Run the full pipeline and write the SQL scripts
///
/// Pipeline: CsvReader → InspectionTransformer → SqlFileWriter
pub fn load_inspections(config: &Config) -> Result<PipelineReport> {
    log::info!(
        "Loading {} into {}",
        config.source.display().bright_black(),
        config.output_dir.display().bright_black()
    );

    let pipeline = Pipeline::new(
        CsvReader::new(&config.source),
        InspectionTransformer::new(&config.city, &config.state),
        SqlFileWriter::new(&config.output_dir),
    );
    let report = pipeline.run()?;

    log::info!(
        "✓ Wrote {} statement(s) from {} record(s)",
        report.loaded.cyan(),
        report.records.cyan()
    );
    Ok(report)
}

/// Run extract and transform only, returning the snapshot and statistics
pub fn inspection_stats(config: &Config) -> Result<(Snapshot, TransformStats)> {
    log::info!("Scanning {}", config.source.display().bright_black());

    let reader = CsvReader::new(&config.source);
    let mut transformer = InspectionTransformer::new(&config.city, &config.state);
    transformer.transform_all(reader.extract()?)?;

    let stats = transformer.stats();
    Ok((transformer.finalize(), stats))
}

/// Print entity counts and transform statistics to stdout
pub fn print_stats(snapshot: &Snapshot, stats: &TransformStats) {
    println!("{}", "Entities".bold());
    for (table, count) in snapshot.table_counts() {
        println!("  {:<16} {:>8}", table.name(), count.cyan());
    }

    println!("{}", "Records".bold());
    println!("  {:<24} {:>8}", "processed", stats.records);
    println!("  {:<24} {:>8}", "without restaurant", stats.without_restaurant);
    println!("  {:<24} {:>8}", "without inspection", stats.without_inspection);
    println!("  {:<24} {:>8}", "violations dropped", stats.violations_dropped.yellow());
}
