//! Lookup command - print a student's grades in the terminal.

use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use notas::render::{BLANK, Level, SearchView};
use notas::{GradeLookup, Status, Transcript};

pub fn run(
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    query: String,
    name: Option<String>,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config, data, strict)?;
    let lookup = GradeLookup::new(&config);
    // Surface load failures with their cause instead of the page message.
    lookup.dataset().get()?;

    let view = lookup.search(&query, name.as_deref());

    if json_output {
        println!("{}", view.to_json()?);
    } else {
        print_view(&view);
    }

    Ok(())
}

fn print_view(view: &SearchView) {
    if let Some(message) = &view.message {
        let text = match message.level {
            Level::Success => message.text.green(),
            Level::Info => message.text.cyan(),
            Level::Warning => message.text.yellow(),
            Level::Error => message.text.red(),
        };
        println!("{text}");
        println!();
    }

    if !view.candidates.is_empty() {
        for candidate in &view.candidates {
            println!("  • {}", candidate.white().bold());
        }
        println!();
        println!(
            "Repeat with {} to choose one.",
            "--name \"<Nombres y Apellidos>\"".yellow()
        );
        return;
    }

    for transcript in &view.transcripts {
        print_transcript(transcript);
    }
}

fn print_transcript(transcript: &Transcript) {
    let student = &transcript.student;
    println!(
        "{} {}",
        student.student_name.cyan().bold(),
        format!("({})", student.student_id).white()
    );
    println!("  Carrera: {}", student.program);
    println!(
        "  Año {} · Ciclo {} · {}",
        student.year, student.term, student.regime
    );
    println!();

    for row in &transcript.rows {
        let classification = &row.classification;
        let grade = if classification.final_grade.trim().is_empty() {
            BLANK
        } else {
            classification.final_grade.as_str()
        };

        print!(
            "  {:<36} {:>6}  {}",
            row.record.subject,
            grade,
            status_label(classification.status)
        );
        if let Some(special) = &classification.special_grade {
            print!("  (Nota Especial: {special})");
        }
        println!();
    }

    let summary = &transcript.summary;
    println!();
    println!(
        "  {} aprobadas, {} examen especial, {} reprobadas, {} sin derecho, {} sin determinar",
        summary.passed.to_string().green(),
        summary.special_eligible.to_string().yellow(),
        summary.failed.to_string().red(),
        summary.no_rights.to_string().magenta(),
        summary.undetermined.to_string().dimmed()
    );
    println!();
}

fn status_label(status: Status) -> ColoredString {
    let label = status.label();
    match status {
        Status::Passed => label.green(),
        Status::SpecialEligible => label.yellow(),
        Status::Failed => label.red(),
        Status::NoRights => label.magenta().bold(),
        Status::Undetermined => label.dimmed(),
    }
}
