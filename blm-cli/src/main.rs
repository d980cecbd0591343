// Command-line interface for blm
//
// This binary converts between BLM and the other registered formats, checks BLM files and
// renders debug views of how a file decodes.
//
// Converting:
//
// The conversion needs a to and from pair. The from is auto-detected from the file extension,
// then from the content itself, while being overwrittable by an explicit --from flag.
// Usage:
//  blm <input> --to <format> [--from <format>] [--output <file>]  - Convert between formats (default)
//  blm convert <input> --to <format> [--from <format>] [--output <file>]  - Same as above (explicit)
//  blm inspect <path> [<view>]           - Render a debug view (defaults to "treeviz")
//  blm check <path>                      - Verify that a file is readable BLM
//  blm --list-formats                    - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format/view.
// Example:
//  blm inspect file.blm --extra-max-label-width 0

use blm_cli::{inspect, logging};

use blm_babel::formats::text::TextFormat;
use blm_babel::formats::treeviz::{TreevizFormat, TreevizOptions};
use blm_babel::{BlmReader, Cursor, Document, FormatRegistry};
use blm_config::{BlmConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("blm")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for converting and inspecting BLM rich-text files")
        .long_about(
            "blm is a command-line tool for working with BLM rich-text markup files.\n\n\
            Commands:\n  \
            - convert: Transform between document formats (blm, text, json, treeviz)\n  \
            - inspect: View how a BLM file decodes (tree, builder events, JSON)\n  \
            - check:   Verify that a file is readable BLM\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            blm inspect file.blm                          # Tree visualization\n  \
            blm inspect file.blm events                   # Decoder builder calls\n  \
            blm notes.txt --to blm -o notes.blm           # Plain text to BLM\n  \
            blm file.blm --to text --extra-blank-line-between-blocks",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a blm.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log decoder diagnostics to stderr (overridden by RUST_LOG)")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect how a BLM file decodes")
                .long_about(
                    "Render a BLM file through one of the debug views.\n\n\
                    Views:\n  \
                    - treeviz: document tree with block and run attributes (default)\n  \
                    - events:  the builder calls the decoder makes\n  \
                    - json:    the decoded document model\n\n\
                    Extra Parameters (treeviz):\n  \
                    --extra-show-styles <bool>      Show attribute lists\n  \
                    --extra-max-label-width <n>     Truncate labels (0 = never)\n\n\
                    Examples:\n  \
                    blm inspect file.blm                           # Tree visualization (default)\n  \
                    blm inspect file.blm events                    # Builder event log\n  \
                    blm inspect file.blm --extra-show-styles false # Tree without attributes",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the BLM file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("view")
                        .help("View to render. Defaults to 'treeviz'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            inspect::AVAILABLE_VIEWS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between different formats.\n\n\
                    Supported formats:\n  \
                    - blm:     BLM rich-text markup (.blm)\n  \
                    - text:    Plain text, formatting dropped (.txt)\n  \
                    - json:    Document model as JSON (.json)\n  \
                    - treeviz: Tree visualization, output only (.tree)\n\n\
                    The source format is auto-detected from the file extension, or from the\n\
                    content when the extension is unknown.\n\
                    Output goes to stdout by default, or use -o to specify a file.\n\n\
                    Examples:\n  \
                    blm convert notes.txt --to blm -o notes.blm  # Plain text to BLM\n  \
                    blm convert doc.blm --to json               # Dump the model\n  \
                    blm doc.blm --to text                       # 'convert' is optional",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Verify that a file is readable BLM")
                .long_about(
                    "Check the BLM header and decode the file.\n\n\
                    Prints a one-line summary and exits with status 0 when the file is\n\
                    readable BLM, or prints the error and exits with status 1.\n\
                    Malformed markup inside the file is not an error: it decodes as text.",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the BLM file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
}

fn main() {
    // Try to parse args. If no subcommand is provided, inject "convert"
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            if should_inject_convert(&cleaned_args) {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    if let Err(err) = logging::init(level) {
        eprintln!("Failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("inspect", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            let view = sub_matches
                .get_one::<String>("view")
                .map(|s| s.as_str())
                .unwrap_or("treeviz");
            handle_inspect_command(path, view, &extra_params, &config);
        }
        Some(("convert", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            let from = sub_matches.get_one::<String>("from").map(|s| s.as_str());
            let to = sub_matches.get_one::<String>("to").expect("to is required");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, from, to, output, &extra_params, &config);
        }
        Some(("check", sub_matches)) => {
            let path = sub_matches
                .get_one::<String>("path")
                .expect("path is required");
            handle_check_command(path);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// The first argument looks like a file rather than a subcommand or flag.
fn should_inject_convert(args: &[String]) -> bool {
    args.len() > 1
        && !args[1].starts_with('-')
        && !matches!(args[1].as_str(), "inspect" | "convert" | "check" | "help")
}

/// Registry whose configurable formats follow the loaded configuration.
fn build_registry(config: &BlmConfig) -> FormatRegistry {
    let mut registry = FormatRegistry::with_defaults();
    registry.register(TextFormat::from(&config.convert.text));
    registry.register(TreevizFormat::from(&config.inspect.treeviz));
    registry
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    view: &str,
    extra_params: &HashMap<String, String>,
    config: &BlmConfig,
) {
    let source = read_input(path);

    let params = build_inspect_params(view, config, extra_params);

    let output = inspect::execute_view(&source, view, &params).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    print!("{output}");
}

/// Resolve the source format: explicit flag, then extension, then content.
fn detect_source_format(
    registry: &FormatRegistry,
    input: &str,
    source: &str,
    explicit: Option<&str>,
) -> Option<String> {
    if let Some(from) = explicit {
        return Some(from.to_string());
    }
    registry
        .detect_format_from_filename(input)
        .or_else(|| registry.detect_format_from_source(source))
}

/// Handle the convert command
fn handle_convert_command(
    input: &str,
    from: Option<&str>,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &BlmConfig,
) {
    let registry = build_registry(config);

    if !registry.has(to) {
        eprintln!("Error: Unknown target format '{to}'");
        eprintln!("Available formats: {}", registry.list_formats().join(", "));
        std::process::exit(1);
    }

    let source = read_input(input);

    let from = detect_source_format(&registry, input, &source, from).unwrap_or_else(|| {
        eprintln!("Error: Could not detect format of '{input}'");
        eprintln!("Please specify --from explicitly");
        std::process::exit(1);
    });
    tracing::debug!(%from, %to, input, "converting");

    let doc = registry.parse(&source, &from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let result = registry
        .serialize_with_options(&doc, to, extra_params)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match output {
        Some(path) => {
            fs::write(path, result).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        None => print!("{result}"),
    }
}

/// Handle the check command
fn handle_check_command(path: &str) {
    let source = read_input(path);

    let mut doc = Document::new();
    let mut cursor = Cursor::new(&mut doc);
    if let Err(e) = BlmReader::read(source.as_bytes(), &mut cursor) {
        eprintln!("{path}: {e}");
        std::process::exit(1);
    }

    let blocks = doc.blocks.len();
    let headings = doc
        .blocks
        .iter()
        .filter(|block| block.format.heading > 0)
        .count();
    let page_breaks = doc
        .blocks
        .iter()
        .filter(|block| block.format.page_break_before)
        .count();
    println!("{path}: ok ({blocks} blocks, {headings} headings, {page_breaks} page breaks)");
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &BlmConfig) {
    let registry = build_registry(config);

    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let direction = match (format.supports_parsing(), format.supports_serialization()) {
                (true, true) => "read/write",
                (true, false) => "read",
                (false, true) => "write",
                (false, false) => "-",
            };
            println!(
                "  {:<8} {:<10} {} (.{})",
                name,
                direction,
                format.description(),
                format.file_extensions().join(", .")
            );
        }
    }

    println!("\nInspect views:");
    for view in inspect::AVAILABLE_VIEWS {
        println!("  {view}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> BlmConfig {
    let loader = Loader::new().with_optional_file("blm.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Moves extras that mirror configuration keys into the configuration.
///
/// Whatever is left is passed to the target format, which rejects what it
/// does not understand.
fn apply_config_overrides(config: &mut BlmConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("blank-line-between-blocks") {
        config.convert.text.blank_line_between_blocks =
            parse_bool_arg("blank-line-between-blocks", &raw);
    }
    if let Some(raw) = extra_params.remove("show-styles") {
        config.inspect.treeviz.show_styles = parse_bool_arg("show-styles", &raw);
    }
    if let Some(raw) = extra_params.remove("max-label-width") {
        config.inspect.treeviz.max_label_width = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid number '{raw}' for --extra-max-label-width");
            std::process::exit(1);
        });
    }
}

fn build_inspect_params(
    view: &str,
    config: &BlmConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut params = if view == "treeviz" {
        inspect::treeviz_params(&TreevizOptions::from(&config.inspect.treeviz))
    } else {
        HashMap::new()
    };

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    params
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
