//! Status command - show the grade dataset behind the lookup.

use std::path::PathBuf;

use colored::Colorize;
use notas::GradeLookup;

pub fn run(
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config, data, false)?;
    let lookup = GradeLookup::new(&config);
    let summary = lookup.summary()?;

    if json_output {
        let status = serde_json::json!({
            "dataset": summary,
            "institution": config.institution.name,
            "logo": config.institution.logo_if_present(),
            "background": config.institution.background_if_present(),
            "server": {
                "host": config.server.host,
                "port": config.server.port,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Grade dataset".cyan().bold(),
        summary.path.white()
    );
    println!();

    let format = match (&summary.format, &summary.sheet) {
        (Some(format), Some(sheet)) => format!("{format} (sheet '{sheet}')"),
        (Some(format), None) => format.clone(),
        (None, _) => "in memory".to_string(),
    };
    println!("  Format:   {}", format);
    println!("  Records:  {}", summary.records.to_string().white().bold());
    println!("  Students: {}", summary.students.to_string().white().bold());
    println!("  Matching: {}", summary.match_mode);
    if let Some(hash) = &summary.hash {
        println!("  Hash:     {}", hash.dimmed());
    }
    println!();

    println!("{}", "Institution:".yellow().bold());
    println!("  Name:       {}", config.institution.name);
    println!(
        "  Logo:       {}",
        match config.institution.logo_if_present() {
            Some(path) => path.display().to_string().green(),
            None => "placeholder".yellow(),
        }
    );
    println!(
        "  Background: {}",
        match config.institution.background_if_present() {
            Some(path) => path.display().to_string().green(),
            None => "none".yellow(),
        }
    );

    Ok(())
}
