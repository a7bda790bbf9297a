use clap::Parser;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use youthwell::{classify, read_bulk, AssessmentReport, Catalog, Error, CATALOG};

/// Score every respondent in a CSV file
#[derive(Parser)]
struct Args {
    path: PathBuf,
    /// Load questions and content from this JSON catalog instead of the built-in one
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Print one JSON report per line
    #[arg(long)]
    json: bool,
}

/// One line of `--json` output
#[derive(Serialize)]
struct BulkLine<'a> {
    id: &'a str,
    report: AssessmentReport,
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let loaded;
    let catalog: &Catalog = match args.catalog {
        Some(ref path) => {
            loaded = Catalog::from_path(path)?;
            &loaded
        }
        None => &*CATALOG,
    };

    let reader = BufReader::new(File::open(&args.path)?);
    for row in read_bulk(reader, catalog)? {
        let (id, responses) = match row {
            Ok(row) => row,
            Err(e) => {
                log::warn!("skipping row: {}", e);
                continue;
            }
        };
        match classify(&responses, catalog) {
            Ok(result) if args.json => {
                let line = BulkLine {
                    id: &id,
                    report: AssessmentReport::now(&result, &responses),
                };
                println!("{}", serde_json::to_string(&line)?);
            }
            Ok(result) => {
                println!(
                    "id = {}, tier = {}, percentage = {:.1}, insights = {:?}",
                    id, result.tier, result.percentage, result.insights
                );
            }
            Err(e) => {
                log::warn!("skipping {}: {}", id, e);
            }
        }
    }
    Ok(())
}
