// Thin command surface over the tracking pipeline: load two workbook
// directories, print or export the joined table.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use golftrack::{CsvWorkbook, GolfTracker, ScorecardColumns, TrackerOptions};

#[derive(Debug, Parser)]
#[command(name = "golftrack", version, about = "Golf round tracking pipeline")]
struct Cli {
    /// Directory holding the courses workbook (Courses.csv + one CSV per course)
    #[arg(long)]
    courses: PathBuf,

    /// Directory holding the rounds workbook (Rounds.csv + one CSV per round)
    #[arg(long)]
    rounds: PathBuf,

    /// Skip the derived stat columns
    #[arg(long)]
    no_derive: bool,

    /// Scorecard sheets use the older long column names
    #[arg(long)]
    legacy_columns: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: Format,

    /// Write output to a file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let courses = CsvWorkbook::new(&cli.courses);
    let rounds = CsvWorkbook::new(&cli.rounds);
    let options = TrackerOptions {
        derive: !cli.no_derive,
        columns: if cli.legacy_columns {
            ScorecardColumns::legacy()
        } else {
            ScorecardColumns::canonical()
        },
    };

    let tracker =
        GolfTracker::load(&courses, &rounds, &options).context("failed to load workbooks")?;

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };

    match cli.format {
        Format::Table => print_summary(&tracker, &mut out)?,
        Format::Csv => write_csv(&tracker, &mut out)?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &tracker.records())?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_summary(tracker: &GolfTracker, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "Loaded {} courses, {} rounds, {} tracked holes",
        tracker.courses().courses().len(),
        tracker.rounds().rounds().len(),
        tracker.rows().len()
    )?;

    for round in tracker.rounds().rounds() {
        let rows: Vec<_> = tracker.round_rows(&round.round_id).collect();
        let score: i64 = rows.iter().map(|r| r.score).sum();
        let par: i64 = rows.iter().filter_map(|r| r.par).sum();
        let course = rows
            .first()
            .and_then(|r| r.course_name.as_deref())
            .unwrap_or(round.course_id.as_str());

        writeln!(
            out,
            "  {} {} at {}: {} holes, {} strokes (par {})",
            round.round_id,
            round.date,
            course,
            rows.len(),
            score,
            par
        )?;
    }
    Ok(())
}

fn write_csv(tracker: &GolfTracker, out: &mut dyn Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut headers = vec![
        "Round Code",
        "Hole",
        "Course Code",
        "Course Name",
        "Score",
        "TFH",
        "NTFH",
        "Chips",
        "Putts",
        "Yardage",
        "Par",
        "Handicap",
    ];
    let derived = tracker.derived().is_some();
    if derived {
        headers.extend(["Outcome", "GIR", "STG", "NTFA", "FH"]);
    }
    writer.write_record(&headers)?;

    for record in tracker.records() {
        let row = record.row;
        let mut fields = vec![
            row.round_id.clone(),
            row.hole_number.to_string(),
            row.course_id.clone(),
            row.course_name.clone().unwrap_or_default(),
            row.score.to_string(),
            match row.tee_fairway_hit {
                Some(true) => "Yes".to_string(),
                Some(false) => "No".to_string(),
                None => String::new(),
            },
            opt(row.non_tee_fairway_hits),
            opt(row.chips),
            row.putts.to_string(),
            opt(row.yardage),
            opt(row.par),
            opt(row.handicap),
        ];
        if let Some(stats) = record.derived {
            fields.push(stats.outcome.to_string());
            fields.push(
                stats
                    .gir
                    .map(|g| g.to_string())
                    .unwrap_or_default(),
            );
            fields.push(stats.shots_to_green.to_string());
            fields.push(opt(stats.non_tee_fairway_attempts));
            fields.push(opt(stats.fairway_hits));
        }
        writer.write_record(&fields)?;
    }
    writer.flush()?;
    Ok(())
}

fn opt(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
