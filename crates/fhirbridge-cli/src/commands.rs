use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};

use fhirbridge_client::FhirClient;
use fhirbridge_convert::{convert_reader, write_bundle, write_resources};
use fhirbridge_core::Bundle;
use fhirbridge_tabular::bundle_to_csv;

use crate::cli::{ConvertArgs, ExportArgs, ViewArgs};

pub fn convert(args: &ConvertArgs) -> Result<()> {
    let file = File::open(&args.input)
        .with_context(|| format!("opening input file {}", args.input.display()))?;
    let conversion = convert_reader(BufReader::new(file)).context("converting CSV input")?;

    for warning in &conversion.warnings {
        eprintln!("warning: {warning}");
    }

    print_summary(&conversion.bundle);

    write_bundle(&conversion.bundle, &args.bundle_out)
        .with_context(|| format!("writing Bundle to {}", args.bundle_out.display()))?;
    println!("Bundle written to {}", args.bundle_out.display());

    if let Some(dir) = &args.split_dir {
        let paths = write_resources(&conversion.bundle, dir)
            .with_context(|| format!("writing resources to {}", dir.display()))?;
        println!("{} resource files written to {}", paths.len(), dir.display());
    }

    Ok(())
}

pub async fn export(args: &ExportArgs) -> Result<()> {
    let client = FhirClient::new(&args.server);
    let bundle = client
        .everything(&args.patient)
        .await
        .context("fetching Bundle")?;

    let csv = bundle_to_csv(&bundle).context("rendering CSV")?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, &csv)
                .with_context(|| format!("writing CSV to {}", path.display()))?;
            println!(
                "Exported {} entries to {}",
                bundle.len(),
                path.display()
            );
        }
        None => print!("{csv}"),
    }

    Ok(())
}

pub fn view(args: &ViewArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.bundle)
        .with_context(|| format!("reading {}", args.bundle.display()))?;
    let bundle: Bundle = serde_json::from_str(&raw).context("parsing Bundle JSON")?;

    println!("Bundle: {}", bundle.id.as_deref().unwrap_or("(no id)"));
    println!("Type: {}", bundle.bundle_type.as_deref().unwrap_or("(none)"));
    println!(
        "Timestamp: {}",
        bundle.timestamp.as_deref().unwrap_or("(none)")
    );
    println!("Entries: {}", bundle.len());

    for (i, resource) in bundle.resources().take(args.limit).enumerate() {
        let kind = resource
            .get("resourceType")
            .and_then(|v| v.as_str())
            .unwrap_or("(unknown)");
        let id = resource.get("id").and_then(|v| v.as_str()).unwrap_or("-");
        println!("{}. {} (ID: {})", i + 1, kind, id);
    }

    Ok(())
}

fn print_summary(bundle: &Bundle) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for resource in bundle.resources() {
        let kind = resource
            .get("resourceType")
            .and_then(|v| v.as_str())
            .unwrap_or("(unknown)");
        *counts.entry(kind).or_insert(0) += 1;
    }

    println!("Generated {} resources:", bundle.len());
    for (kind, count) in counts {
        println!("  {kind}: {count}");
    }
}
