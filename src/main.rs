use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use edlign::{
    align::{format_alignment, Alignment},
    cigar::{to_cigar, CigarFormat},
    config::AlignConfig,
    equal::EqualityPair,
    mode::AlignMode,
    task::AlignTask,
};

/// Bit-parallel edit-distance alignment.
#[derive(Debug, Parser)]
#[command(name = "align-cli", version, about)]
struct Args {
    /// Query sequence, given directly on the command line.
    query: Option<String>,
    /// Target sequence, given directly on the command line.
    target: Option<String>,

    /// Read the query from a FASTA file instead of the command line.
    #[arg(long, conflicts_with = "query")]
    query_fasta: Option<std::path::PathBuf>,
    /// Read the target from a FASTA file instead of the command line.
    #[arg(long, conflicts_with = "target")]
    target_fasta: Option<std::path::PathBuf>,

    /// Alignment mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Global)]
    mode: ModeArg,

    /// How much of the result to compute.
    #[arg(long, value_enum, default_value_t = TaskArg::Distance)]
    task: TaskArg,

    /// Maximum edit distance to search for. Auto-expands if omitted.
    #[arg(short = 'k', long)]
    max_distance: Option<usize>,

    /// Additional equal-character pair, `a=b`. May be repeated.
    #[arg(long = "equal", value_parser = parse_equality)]
    equalities: Vec<EqualityPair>,

    /// CIGAR flavor to print when `--task path`.
    #[arg(long, value_enum, default_value_t = CigarArg::Extended)]
    cigar: CigarArg,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatArg::Human)]
    format: FormatArg,

    /// Emit debug/trace logging to stderr.
    #[arg(long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Global,
    Prefix,
    Infix,
}

impl From<ModeArg> for AlignMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Global => AlignMode::NW,
            ModeArg::Prefix => AlignMode::SHW,
            ModeArg::Infix => AlignMode::HW,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TaskArg {
    Distance,
    Loc,
    Path,
}

impl From<TaskArg> for AlignTask {
    fn from(task: TaskArg) -> Self {
        match task {
            TaskArg::Distance => AlignTask::Distance,
            TaskArg::Loc => AlignTask::Loc,
            TaskArg::Path => AlignTask::Path,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CigarArg {
    Extended,
    Standard,
}

impl From<CigarArg> for CigarFormat {
    fn from(format: CigarArg) -> Self {
        match format {
            CigarArg::Extended => CigarFormat::Extended,
            CigarArg::Standard => CigarFormat::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Human,
    Json,
}

fn parse_equality(s: &str) -> Result<EqualityPair, String> {
    let (first, second) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `a=b`, got `{s}`"))?;
    let mut first_chars = first.chars();
    let mut second_chars = second.chars();
    match (
        first_chars.next(),
        first_chars.next(),
        second_chars.next(),
        second_chars.next(),
    ) {
        (Some(a), None, Some(b), None) => Ok(EqualityPair::new(a, b)),
        _ => Err(format!("expected two single characters, got `{s}`")),
    }
}

#[derive(serde::Serialize)]
struct JsonOutput {
    edit_distance: Option<usize>,
    end_locations: Option<Vec<isize>>,
    start_locations: Option<Vec<isize>>,
    cigar: Option<String>,
}

fn sequence(direct: Option<String>, fasta: Option<std::path::PathBuf>, which: &str) -> anyhow::Result<String> {
    match (direct, fasta) {
        (Some(seq), None) => Ok(seq),
        (None, Some(path)) => Ok(edlign::fasta::read_single_sequence(path)?),
        (None, None) => anyhow::bail!("missing {which} sequence: pass it directly or via --{which}-fasta"),
        (Some(_), Some(_)) => unreachable!("clap enforces conflicts_with"),
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if args.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "edlign=debug".parse().expect("static directive parses"),
            ))
            .init();
    }

    let query = sequence(args.query, args.query_fasta, "query")?;
    let target = sequence(args.target, args.target_fasta, "target")?;

    let config = AlignConfig {
        k: args.max_distance,
        mode: args.mode.into(),
        task: args.task.into(),
        added_equalities: args.equalities,
    };

    let result = Alignment::run(config, &query, &target)?;

    let cigar = result.alignment.as_ref().map(|ops| to_cigar(ops, args.cigar.into()));

    match args.format {
        FormatArg::Json => {
            let output = JsonOutput {
                edit_distance: result.edit_distance,
                end_locations: result.end_locations.clone(),
                start_locations: result.start_locations.clone(),
                cigar: cigar.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        FormatArg::Human => {
            match result.edit_distance {
                Some(d) => println!("edit distance: {d}"),
                None => println!("edit distance: not found within k"),
            }
            if let Some(ends) = &result.end_locations {
                println!("end locations: {ends:?}");
            }
            if let Some(starts) = &result.start_locations {
                println!("start locations: {starts:?}");
            }
            if let Some(cigar) = &cigar {
                println!("cigar: {cigar}");
            }
            if let (Some(ops), Some(starts)) = (&result.alignment, &result.start_locations) {
                let start = starts.first().copied().unwrap_or(0).max(0) as usize;
                println!("{}", format_alignment(&query, &target, ops, 0, start));
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
