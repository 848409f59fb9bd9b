//! `crewplan` command line

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use crewplan_model::estimate::parse_days;
use crewplan_parser::{AllocationParser, ParserConfig};
use crewplan_release::segment;
use crewplan_store::{PlanDocument, PlanStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit status when the input held no phase headers
const EXIT_NO_PHASES: i32 = 2;

fn cli() -> Command {
    let path_arg = |name: &'static str, help: &'static str| {
        Arg::new(name)
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help(help)
    };
    let json_flag = Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print JSON instead of text");

    Command::new("crewplan")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse LLM allocation plans and split them into release phases")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level unless RUST_LOG is set"),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse an allocation plan written in markdown")
                .arg(path_arg("markdown", "Markdown file produced by the planning step"))
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write the parsed plan to this JSON file"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_parser(value_parser!(PathBuf))
                        .help("Label synonyms and placeholders (.yaml, .yml or .toml)"),
                )
                .arg(json_flag.clone()),
        )
        .subcommand(
            Command::new("segment")
                .about("Group tasks from a hand-off file by phase")
                .arg(path_arg("file", "Hand-off JSON file (flat or nested)"))
                .arg(json_flag.clone()),
        )
        .subcommand(
            Command::new("render")
                .about("Render a nested plan back to markdown")
                .arg(path_arg("file", "Hand-off JSON file holding phases")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Show task counts and estimated days")
                .arg(path_arg("file", "Hand-off JSON file (flat or nested)")),
        )
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn path<'a>(args: &'a ArgMatches, name: &str) -> Result<&'a PathBuf> {
    args.get_one::<PathBuf>(name)
        .with_context(|| format!("missing argument <{name}>"))
}

fn run_parse(args: &ArgMatches) -> Result<i32> {
    let markdown = path(args, "markdown")?;
    let config = match args.get_one::<PathBuf>("config") {
        Some(file) => ParserConfig::from_path(file)
            .with_context(|| format!("loading parser config {}", file.display()))?,
        None => ParserConfig::default(),
    };
    let text = std::fs::read_to_string(markdown)
        .with_context(|| format!("reading {}", markdown.display()))?;

    let plan = AllocationParser::new(&config).parse(&text);

    if let Some(out) = args.get_one::<PathBuf>("out") {
        PlanStore::new(out)
            .save_plan(&plan)
            .with_context(|| format!("writing {}", out.display()))?;
    }

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("Phases: {}", plan.phases.len());
        println!("Tasks: {}", plan.task_count());
        for phase in &plan.phases {
            println!("  {} ({} tasks)", phase.label(), phase.tasks.len());
        }
    }

    if plan.is_empty() {
        eprintln!("No phases found in {}", markdown.display());
        return Ok(EXIT_NO_PHASES);
    }
    Ok(0)
}

fn run_segment(args: &ArgMatches) -> Result<i32> {
    let file = path(args, "file")?;
    let tasks = PlanStore::new(file)
        .load_tasks()
        .with_context(|| format!("loading {}", file.display()))?;
    tracing::debug!("Segmenting {} tasks from {}", tasks.len(), file.display());
    let buckets = segment(tasks);

    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
        return Ok(0);
    }

    for (key, tasks) in buckets.into_sorted() {
        println!("Phase {key}:");
        for task in tasks {
            println!(
                "  - {} [{}] ({})",
                task.task_name, task.assigned_to, task.duration
            );
        }
    }
    Ok(0)
}

fn run_render(args: &ArgMatches) -> Result<i32> {
    let file = path(args, "file")?;
    let document = PlanStore::new(file)
        .load()
        .with_context(|| format!("loading {}", file.display()))?;
    let PlanDocument::Nested(mut plan) = document else {
        bail!("{} holds flat tasks; render needs a nested plan", file.display());
    };
    plan.normalize();
    print!("{}", plan.to_markdown());
    Ok(0)
}

fn run_inspect(args: &ArgMatches) -> Result<i32> {
    let file = path(args, "file")?;
    let document = PlanStore::new(file)
        .load()
        .with_context(|| format!("loading {}", file.display()))?;

    match document {
        PlanDocument::Nested(plan) => {
            println!("Shape: nested");
            println!("Phases: {}", plan.phases.len());
            println!("Tasks: {}", plan.task_count());
            for phase in plan.sorted_phases() {
                println!(
                    "  {}: {} tasks, {:.1} days",
                    phase.label(),
                    phase.tasks.len(),
                    phase.total_days()
                );
            }
            println!("Estimated days: {:.1}", plan.total_days());
        }
        PlanDocument::Flat(tasks) => {
            let days: f64 = tasks.iter().filter_map(|t| parse_days(&t.duration)).sum();
            let buckets = segment(tasks);
            println!("Shape: flat");
            println!("Phases: {}", buckets.len());
            println!("Tasks: {}", buckets.task_count());
            println!("Estimated days: {days:.1}");
        }
    }
    Ok(0)
}

fn run(matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some(("parse", args)) => run_parse(args),
        Some(("segment", args)) => run_segment(args),
        Some(("render", args)) => run_render(args),
        Some(("inspect", args)) => run_inspect(args),
        Some((other, _)) => bail!("unknown command '{other}'"),
        None => bail!("no command given"),
    }
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let code = match run(&matches) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            1
        }
    };
    std::process::exit(code);
}
