use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fhirbridge")]
#[command(about = "Convert tabular clinical data to FHIR Bundles and back")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, env = "FHIRBRIDGE_LOG", default_value = "warn")]
    pub log: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CSV file into a FHIR Bundle
    Convert(ConvertArgs),
    /// Fetch a patient's $everything Bundle and flatten it to CSV
    Export(ExportArgs),
    /// Summarize a Bundle JSON file
    View(ViewArgs),
}

#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Path to the CSV input file
    pub input: PathBuf,

    /// Where to write the assembled Bundle
    #[arg(long, default_value = "fhir_bundle.json")]
    pub bundle_out: PathBuf,

    /// Also write one JSON file per resource into this directory
    #[arg(long)]
    pub split_dir: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ExportArgs {
    /// FHIR server base URL
    #[arg(short, long, env = "FHIRBRIDGE_SERVER")]
    pub server: String,

    /// Patient id to fetch $everything for
    #[arg(short, long)]
    pub patient: String,

    /// Output CSV path (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ViewArgs {
    /// Path to a Bundle JSON file
    pub bundle: PathBuf,

    /// How many leading resources to list
    #[arg(long, default_value_t = 5)]
    pub limit: usize,
}
