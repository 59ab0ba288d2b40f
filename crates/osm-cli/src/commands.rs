use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info_span;

use osm_cli::config::CleanConfig;
use osm_cli::pipeline::{ProcessOptions, process, reconcile, write_ledger_json};
use osm_cli::summary::{print_details, print_fields, print_reconcile, print_summary};

use crate::cli::{ProcessArgs, ReconcileArgs};

pub fn run_process(args: &ProcessArgs) -> Result<()> {
    let _span = info_span!("command", name = "process").entered();
    let config = CleanConfig::load_or_default(args.config.as_deref())?;
    let options = ProcessOptions {
        input: args.input.clone(),
        output_dir: output_dir(args.output_dir.as_deref()),
        file_names: config.output,
        validate: config.validate && !args.no_validate,
        dry_run: args.dry_run,
        transform: config.transform,
        progress: true,
    };
    let result = process(&options)?;
    if let Some(path) = &args.ledger_json {
        write_ledger_json(&result, path)?;
    }
    print_summary(&result);
    if args.details {
        print_details(&result.ledger);
    }
    Ok(())
}

pub fn run_reconcile(args: &ReconcileArgs) -> Result<()> {
    let _span = info_span!("command", name = "reconcile").entered();
    let config = CleanConfig::load_or_default(args.config.as_deref())?;
    let result = reconcile(
        &args.input,
        &output_dir(args.output_dir.as_deref()),
        &config.output,
    )?;
    print_reconcile(&result);
    Ok(())
}

pub fn run_fields() -> Result<()> {
    print_fields();
    Ok(())
}

fn output_dir(dir: Option<&Path>) -> PathBuf {
    dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
