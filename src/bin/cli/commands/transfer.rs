use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use anyhow::{Context, Result};

use remora_lib::flashcards::TransferFormat;

use crate::app::App;
use crate::FileFormat;

impl From<FileFormat> for TransferFormat {
    fn from(format: FileFormat) -> Self {
        match format {
            FileFormat::Csv => TransferFormat::Csv,
            FileFormat::Json => TransferFormat::Json,
            FileFormat::Text => TransferFormat::Text,
        }
    }
}

/// Pick the import format: explicit flag, then file extension, then text
fn resolve_format(file: &Path, format: Option<FileFormat>) -> TransferFormat {
    format
        .map(TransferFormat::from)
        .or_else(|| {
            file.extension()
                .and_then(|ext| ext.to_str())
                .and_then(TransferFormat::from_extension)
        })
        .unwrap_or(TransferFormat::Text)
}

pub fn run_import(
    app: &App,
    name: &str,
    file: &Path,
    format: Option<FileFormat>,
    term_delimiter: &str,
    line_delimiter: &str,
) -> Result<()> {
    let format = resolve_format(file, format);

    let reader: Box<dyn Read> = if file == Path::new("-") {
        Box::new(std::io::stdin().lock())
    } else {
        let f = File::open(file)
            .with_context(|| format!("Failed to open {}", file.display()))?;
        Box::new(BufReader::new(f))
    };

    let set = app.controller
        .import_cards(name, reader, format, term_delimiter, line_delimiter)
        .with_context(|| format!("Failed to import cards into '{}'", name))?;

    println!("Imported into '{}' ({} cards total)", set.set_name, set.cards.len());
    Ok(())
}

pub fn run_export(app: &App, name: &str, format: FileFormat, output: Option<&Path>) -> Result<()> {
    let set = app.find_set(name)?;
    let format = TransferFormat::from(format);

    match output {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            app.controller.export_set(&set.set_name, BufWriter::new(f), format)
                .context("Failed to export set")?;
            eprintln!("Exported {} cards to {}", set.cards.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            app.controller.export_set(&set.set_name, stdout.lock(), format)
                .context("Failed to export set")?;
        }
    }

    Ok(())
}
