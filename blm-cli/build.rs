use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the views from src/inspect.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_VIEWS: &[&str] = &["treeviz", "events", "json"];

fn path_arg(help: &'static str) -> Arg {
    Arg::new("path")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("blm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting BLM rich-text files")
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to a blm.toml configuration file")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log decoder diagnostics to stderr")
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a BLM file decodes")
                .arg(path_arg("Path to the BLM file"))
                .arg(
                    Arg::new("view")
                        .help("View to render")
                        .value_parser(clap::builder::PossibleValuesParser::new(AVAILABLE_VIEWS))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats")
                .arg(path_arg("Input file path"))
                .arg(Arg::new("from").long("from").help("Source format"))
                .arg(Arg::new("to").long("to").help("Target format").required(true))
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Verify that a file is readable BLM")
                .arg(path_arg("Path to the BLM file")),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "blm", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "blm", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "blm", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
