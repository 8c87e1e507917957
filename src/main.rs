// ==========================================
// Station Registry - command-line entry point
// ==========================================
// Thin wrapper over the library for operators:
//   station-registry init
//   station-registry import <file.csv|file.xlsx>
//   station-registry report
//   station-registry log [YYYY-MM-DD]
// ==========================================

use chrono::{Local, NaiveDate};
use std::error::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

use station_registry::domain::types::RegionFilter;
use station_registry::report::MaintenanceAggregator;
use station_registry::repository::{MaintenanceRepository, StationRepository};
use station_registry::{logging, RegistryConfig, StationImporter};

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    tracing::info!("{} v{}", station_registry::APP_NAME, station_registry::VERSION);

    let config = RegistryConfig::from_env();
    config.ensure_dirs()?;
    let db_path = config.db_path();
    tracing::info!(db = %db_path.display(), "using database");

    let conn = station_registry::db::open_registry_db(&db_path)?;
    let conn = Arc::new(Mutex::new(conn));

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "report".to_string());

    match command.as_str() {
        "init" => {
            // open_registry_db above already created the schema
            println!("initialized registry at {}", db_path.display());
        }
        "import" => {
            let file = args.next().ok_or("usage: station-registry import <file>")?;
            let importer = StationImporter::new(StationRepository::from_connection(conn));
            let summary = importer.import_file(Path::new(&file))?;
            println!(
                "import finished: {} imported, {} skipped, {} errors",
                summary.imported, summary.skipped, summary.errors
            );
        }
        "report" => {
            let report_api =
                station_registry::ReportApi::new(StationRepository::from_connection(conn));
            let overview = report_api.overview()?;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }
        "log" => {
            let date = match args.next() {
                Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")?,
                None => Local::now().date_naive(),
            };
            let aggregator = MaintenanceAggregator::new(
                MaintenanceRepository::from_connection(conn.clone()),
                StationRepository::from_connection(conn),
            );
            for entry in aggregator.records_for(Some(date), &RegionFilter::All, None)? {
                println!(
                    "{} {:>8} {:<20} {} ({})",
                    entry.record.date,
                    entry.record.record_type,
                    entry.station_label(),
                    entry.record.notes,
                    entry.record.user_label,
                );
            }
            let stats = aggregator.daily_stats(date)?;
            println!(
                "{date}: {} stations serviced, {} repairs, {} services",
                stats.stations_serviced, stats.repair_count, stats.service_count
            );
        }
        other => {
            return Err(format!(
                "unknown command: {other} (expected init | import | report | log)"
            )
            .into());
        }
    }

    Ok(())
}
