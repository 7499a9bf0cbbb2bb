//! SheetGrid - A spreadsheet grid with a formula bar, driven from the terminal

mod commands;
mod render;

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use sheetgrid_core::{Config, Document, load_config};
use sheetgrid_engine::engine::evaluate;

use commands::{Command, Outcome};

fn print_usage() {
    eprintln!("Usage: sheetgrid [OPTIONS]");
    eprintln!();
    eprintln!("Reads commands from stdin (type 'help' for the list).");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c, --command <FORMULA>   Evaluate one formula on a blank sheet and exit");
    eprintln!("  --rows <N>                Number of rows (default: 10)");
    eprintln!("  --cols <N>                Number of columns (default: 5)");
    eprintln!("  --config <FILE>           Load settings from a TOML file");
    eprintln!("  --no-config               Ignore the user config file");
    eprintln!("  -h, --help                Print help");
}

struct Args {
    command: Option<String>,
    rows: Option<usize>,
    cols: Option<usize>,
    config_file: Option<PathBuf>,
    no_config: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        command: None,
        rows: None,
        cols: None,
        config_file: None,
        no_config: false,
    };

    let value_for = |i: usize, flag: &str| -> String {
        match args.get(i) {
            Some(v) => v.clone(),
            None => {
                eprintln!("Error: {} requires a value", flag);
                std::process::exit(1);
            }
        }
    };
    let count_for = |i: usize, flag: &str| -> usize {
        let raw = value_for(i, flag);
        match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {} expects a number, got {:?}", flag, raw);
                std::process::exit(1);
            }
        }
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "-c" | "--command" => {
                i += 1;
                parsed.command = Some(value_for(i, "--command"));
            }
            "--rows" => {
                i += 1;
                parsed.rows = Some(count_for(i, "--rows"));
            }
            "--cols" => {
                i += 1;
                parsed.cols = Some(count_for(i, "--cols"));
            }
            "--config" => {
                i += 1;
                parsed.config_file = Some(PathBuf::from(value_for(i, "--config")));
            }
            "--no-config" => parsed.no_config = true,
            arg => {
                eprintln!("Error: Unexpected argument: {}", arg);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn run_commands(doc: &mut Document) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout();

    let prompt = |stdout: &mut io::Stdout| -> io::Result<()> {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }
        Ok(())
    };

    prompt(&mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            prompt(&mut stdout)?;
            continue;
        }
        match Command::parse(&line).and_then(|cmd| commands::execute(doc, cmd)) {
            Ok(Outcome::Output(text)) => writeln!(stdout, "{}", text)?,
            Ok(Outcome::Silent) => {}
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("Error: {}", e),
        }
        prompt(&mut stdout)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args();

    let config = if args.no_config {
        Config::default()
    } else {
        let (config, warnings) = load_config(args.config_file.as_deref());
        for warning in warnings {
            eprintln!("Warning: {}", warning);
        }
        config
    };
    let config = config.with_overrides(args.rows, args.cols);
    let mut doc = Document::from_config(&config)?;
    info!("{}x{} grid", doc.rows(), doc.cols());

    if let Some(formula) = args.command {
        println!("{}", evaluate(&formula, doc.sheet()));
        return Ok(());
    }

    run_commands(&mut doc)
}
