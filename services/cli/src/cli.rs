use std::fs;
use std::io;
use std::path::PathBuf;

use bonus_engine::bonus::{
    pillar_overview, BonusEngine, EditError, EditScope, EmployeeId, SheetReport,
};
use bonus_engine::config::AppConfig;
use bonus_engine::error::AppError;
use bonus_engine::telemetry;
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::render::{render_pillar_overview, render_report_table};

#[derive(Parser, Debug)]
#[command(
    name = "bonus-sheet",
    about = "Score employees and compute capped bonus payouts from a bonus sheet",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute payouts for every employee (or one) on the sheet
    Payouts(PayoutArgs),
    /// Repair a stored sheet and write it back in the current shape
    Sanitize(SanitizeArgs),
    /// Show the pillars active for a department or employee scope
    Pillars(PillarArgs),
}

#[derive(Args, Debug)]
struct PayoutArgs {
    /// Bonus sheet JSON document
    #[arg(long)]
    state: PathBuf,
    /// Restrict output to one employee id
    #[arg(long)]
    employee: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct SanitizeArgs {
    /// Bonus sheet JSON document
    #[arg(long)]
    state: PathBuf,
    /// Destination file (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PillarArgs {
    /// Bonus sheet JSON document
    #[arg(long)]
    state: PathBuf,
    /// Scope key, e.g. `dept:RL` or `emp:42`
    #[arg(long)]
    scope: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let engine = BonusEngine::from_config(&config.engine);
    info!(?config.environment, "bonus sheet tool ready");

    match cli.command {
        Command::Payouts(args) => run_payouts(&engine, args),
        Command::Sanitize(args) => run_sanitize(&engine, args),
        Command::Pillars(args) => run_pillars(&engine, args),
    }
}

fn run_payouts(engine: &BonusEngine, args: PayoutArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.state)?;
    let state = engine.load(&raw)?;

    let mut report = SheetReport::build(&state, engine);
    if let Some(id) = args.employee {
        let id = EmployeeId::new(id);
        if report.row(&id).is_none() {
            return Err(EditError::UnknownEmployee(id).into());
        }
        report.rows.retain(|row| row.employee_id == id);
        report.department_totals.retain(|dept, _| {
            report.rows.iter().any(|row| row.department == *dept)
        });
    }
    info!(employees = report.rows.len(), "payouts computed");

    match args.format {
        OutputFormat::Table => {
            let today = Local::now().date_naive();
            print!("{}", render_report_table(&report, today));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report.summary())?);
        }
        OutputFormat::Csv => report.write_csv(io::stdout().lock())?,
    }

    Ok(())
}

fn run_sanitize(engine: &BonusEngine, args: SanitizeArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.state)?;
    let state = engine.load(&raw)?;
    let rendered = state.to_json_pretty()?;

    match args.output {
        Some(path) => {
            fs::write(&path, rendered)?;
            info!(path = %path.display(), "sanitized sheet written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn run_pillars(engine: &BonusEngine, args: PillarArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.state)?;
    let state = engine.load(&raw)?;
    let scope = EditScope::parse(&args.scope)?;

    let overview = pillar_overview(&state, &scope).ok_or_else(|| match &scope {
        EditScope::Employee(id) => EditError::UnknownEmployee(id.clone()),
        EditScope::Department(_) => EditError::InvalidScope(scope.key()),
    })?;

    print!("{}", render_pillar_overview(&scope, &overview));
    Ok(())
}
