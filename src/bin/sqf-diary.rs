//! Command-line interface for sqf-diary
//! Reads an editor delta (JSON or YAML) and prints the matching `createDiaryRecord` command.
//!
//! Usage:
//!   sqf-diary `<path>` --name `<name>`        - Convert a delta file
//!   sqf-diary --name `<name>` < delta.json    - Convert a delta read from stdin
//!   sqf-diary `<path>` --name `<name>` --config `<file>` --subject Intel

use clap::{Arg, ArgAction, ArgMatches, Command};
use sqf_diary::settings::Loader;
use sqf_diary::{Document, InputFormat, SqfError, SqfSerializer};
use std::io::Read;
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("sqf-diary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert rich-text editor deltas into SQF diary record commands")
        .arg(
            Arg::new("path")
                .help("Path to the delta file ('-' or omitted reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .short('n')
                .help("Title of the diary record")
                .required(true),
        )
        .arg(
            Arg::new("input-format")
                .long("input-format")
                .short('i')
                .help("Delta encoding: auto, json or yaml (auto uses the file extension)")
                .default_value("auto"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .help("Object the record is created on (default: player)"),
        )
        .arg(
            Arg::new("subject")
                .long("subject")
                .help("Diary subject the record is filed under (default: Diary)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(sqf) => println!("{}", sqf),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // An explicit RUST_LOG wins over -v
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(format!("sqf_diary={level}")),
    )
    .init();
}

fn run(matches: &ArgMatches) -> Result<String, SqfError> {
    let name = matches
        .get_one::<String>("name")
        .expect("name is a required argument");
    let path = matches
        .get_one::<String>("path")
        .filter(|p| p.as_str() != "-")
        .map(PathBuf::from);
    let format = match matches.get_one::<String>("input-format").map(String::as_str) {
        None | Some("auto") => None,
        Some(explicit) => Some(explicit.parse::<InputFormat>()?),
    };

    let mut loader = Loader::new();
    if let Some(config) = matches.get_one::<String>("config") {
        loader = loader.with_file(config);
    }
    if let Some(target) = matches.get_one::<String>("target") {
        loader = loader.set_override("record.target", target.as_str())?;
    }
    if let Some(subject) = matches.get_one::<String>("subject") {
        loader = loader.set_override("record.subject", subject.as_str())?;
    }
    let config = loader.build()?;

    let doc = match path {
        Some(path) => Document::load(&path, format)?,
        None => read_stdin(format)?,
    };

    let serializer = SqfSerializer::new(config.serializer_options());
    Ok(serializer.serialize(name, &doc))
}

fn read_stdin(format: Option<InputFormat>) -> Result<Document, SqfError> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .map_err(|source| SqfError::Io {
            path: Path::new("<stdin>").to_path_buf(),
            source,
        })?;
    Document::parse(&source, format.unwrap_or(InputFormat::Json))
}
