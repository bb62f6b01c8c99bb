//! Parlance CLI entry point.

use parlance_runtime::{Repl, logging};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    files: Vec<PathBuf>,
    batch_mode: bool,
    show_help: bool,
    show_version: bool,
    trace: bool,
    list_commands: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    for arg in args.into_iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-b" | "--batch" => config.batch_mode = true,
            "--trace" => config.trace = true,
            "--list-commands" => config.list_commands = true,
            flag if flag.starts_with('-') => {
                return Err(format!("unknown option: {flag}").into());
            }
            path => config.files.push(PathBuf::from(path)),
        }
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("parlance {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(config.trace);

    let mut repl = Repl::new()?;

    for file in &config.files {
        for line in repl.eval_file(file)? {
            println!("{line}");
        }
    }

    if config.list_commands {
        for usage in repl.session().available_commands() {
            println!("{usage}");
        }
    }

    if config.batch_mode {
        return Ok(());
    }

    // A script already set the scene.
    if !config.files.is_empty() {
        repl = repl.without_banner();
    }

    repl.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mParlance\x1b[0m - Command grammar and dispatch playground

\x1b[1mUSAGE:\x1b[0m
    parlance [OPTIONS] [FILES...]

\x1b[1mARGUMENTS:\x1b[0m
    [FILES...]    Scripts of player input to run before starting the REPL

\x1b[1mOPTIONS:\x1b[0m
    -h, --help          Print help information
    -V, --version       Print version information
    -b, --batch         Run scripts and exit (no REPL)
    --trace             Log dispatch decisions to stderr
    --list-commands     Print the usage of every command in reach

\x1b[1mENVIRONMENT:\x1b[0m
    PARLANCE_LOG        Log filter, e.g. parlance_dispatch=trace

\x1b[1mEXAMPLES:\x1b[0m
    parlance                     Start in the demo world
    parlance -b walk.txt         Run walk.txt and exit
    parlance --trace walk.txt    Run walk.txt with dispatch logging, then play

\x1b[1mREPL COMMANDS:\x1b[0m
    @help                Show the commands you can use
    @save <path>         Save world state to file
    @load <path>         Load world state from file
    @quit                Leave
    Ctrl+D               Exit REPL"
    );
}
