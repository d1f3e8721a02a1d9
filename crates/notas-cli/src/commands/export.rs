//! Export command - write a student's transcript to a PDF file.

use std::path::PathBuf;

use colored::Colorize;
use notas::{GradeLookup, NotasError};

pub fn run(
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    query: String,
    name: Option<String>,
    output: Option<PathBuf>,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config, data, strict)?;
    let lookup = GradeLookup::new(&config);

    let pdf = match lookup.export_pdf(&query, name.as_deref()) {
        Ok(pdf) => pdf,
        Err(NotasError::MultipleStudents { count }) => {
            let book = lookup.dataset().get()?;
            let names: Vec<String> = lookup
                .resolver()
                .resolve_as(&book, &query, name.as_deref())
                .map(|resolution| notas::resolve::distinct_names(resolution.records()))
                .unwrap_or_default();

            return Err(format!(
                "'{}' matches {} students: {}\nRe-run with --name to choose one.",
                query.trim(),
                count,
                names.join(", ")
            )
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    let output_path = output.unwrap_or_else(|| PathBuf::from(&pdf.file_name));
    std::fs::write(&output_path, &pdf.bytes)?;

    println!(
        "{} {} ({} bytes)",
        "Exported".green().bold(),
        output_path.display().to_string().white(),
        pdf.bytes.len()
    );

    Ok(())
}
