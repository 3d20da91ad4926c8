//! Clap command tree definition.

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("sympathy")
        .about("Measure how file access strategies and memory traversal orders interact with the hardware")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Settings file (default: ./sympathy.toml if present)")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Emit one JSON object per result on stdout")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(build_io())
        .subcommand(build_memory())
        .subcommand(build_env())
        .subcommand(build_init())
}

/// Flags shared by both experiment families.
fn experiment_args(cmd: Command, size_help: &'static str, chunk_help: &'static str) -> Command {
    cmd.arg(Arg::new("size").long("size").help(size_help))
        .arg(Arg::new("chunk").long("chunk").help(chunk_help))
        .arg(
            Arg::new("trials")
                .long("trials")
                .short('n')
                .value_parser(clap::value_parser!(u32))
                .help("Trials per strategy"),
        )
        .arg(
            Arg::new("strategy")
                .long("strategy")
                .short('s')
                .action(ArgAction::Append)
                .help("Strategy to run; repeat to run several in order"),
        )
}

fn build_io() -> Command {
    let cmd = Command::new("io")
        .about("Write and read back a backing file with each file access strategy");
    experiment_args(
        cmd,
        "Backing file size, e.g. 400M",
        "Chunk size, e.g. 4K",
    )
    .arg(Arg::new("file").long("file").short('f').help("Backing file path"))
    .arg(
        Arg::new("window")
            .long("window")
            .help("Largest span mapped at once, a multiple of 64K"),
    )
    .arg(
        Arg::new("no-settle")
            .long("no-settle")
            .action(ArgAction::SetTrue)
            .help("Do not sync the backing file before each phase"),
    )
}

fn build_memory() -> Command {
    let cmd = Command::new("memory").about("Walk a word region in each traversal order");
    experiment_args(cmd, "Region size, e.g. 2G", "Page size, e.g. 2M").arg(
        Arg::new("increment")
            .long("increment")
            .value_parser(clap::value_parser!(usize))
            .help("Stride of the random walks"),
    )
}

fn build_env() -> Command {
    Command::new("env").about("Print the host environment the results depend on")
}

fn build_init() -> Command {
    Command::new("init")
        .about("Write a commented default settings file")
        .arg(
            Arg::new("path")
                .help("Where to write it (default: ./sympathy.toml)")
                .index(1),
        )
}
