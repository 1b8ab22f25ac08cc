//! Validate command - check a file against the upload rules.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use tally_core::upload::{FileInfo, FileValidator};

use super::{file_name, load_config};

/// Arguments for the validate command.
#[derive(Args)]
pub struct ValidateArgs {
    /// File to check
    #[arg(required = true)]
    input: PathBuf,

    /// Which upload path the file is meant for
    #[arg(short, long, value_enum)]
    kind: UploadKind,

    /// MIME type (default: guessed from the extension)
    #[arg(long)]
    mime: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum UploadKind {
    /// Supplier invoice image
    Invoice,
    /// POS sales export
    Sales,
}

pub async fn run(args: ValidateArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let metadata = fs::metadata(&args.input)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", args.input.display(), e))?;
    let mime_type = args.mime.clone().unwrap_or_else(|| {
        mime_guess::from_path(&args.input)
            .first_or_octet_stream()
            .to_string()
    });
    let info = FileInfo::new(file_name(&args.input), mime_type, metadata.len());

    let policy = match args.kind {
        UploadKind::Invoice => config.uploads.invoice,
        UploadKind::Sales => config.uploads.sales,
    };

    match FileValidator::new(policy).validate(&info) {
        Some(rejection) => anyhow::bail!("{}", rejection),
        None => {
            println!("{} {} OK", style("✓").green(), info.name);
            Ok(())
        }
    }
}
