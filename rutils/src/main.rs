//! # rutils
//!
//! Command-line front end for rutilslib's bot helpers.
//!
//! ## Usage
//!
//! ```bash
//! # Render a JSON array of objects as a bordered table
//! rutils table --input prices.json --column name=Coin --column price=Price
//! echo '[{"a":1}]' | rutils table
//!
//! # Split long text into chunks of at most 2000 chars
//! rutils chunk --max-length 2000 "$(cat report.txt)"
//!
//! # Format currency
//! rutils currency 1234.5            # $1,234.50
//! rutils currency -5 --no-prefix --postfix " EUR"
//!
//! # Capitalise
//! rutils capitalize "hello"
//!
//! # Print a default-styled embed as JSON
//! rutils embed --name PriceBot --avatar-url https://cdn.example/a.png --title Prices
//! ```
//!
//! Logs go to stderr. Use `-v`/`-vv` or `RUST_LOG` to see them.

use std::io::Read;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rutilslib::{
    first_char_to_upper, format_currency, render_table_with_style, Chunker, Color, Column,
    EmbedDefaults, EmbedFactory, Identity, TableStyle,
};
use serde_json::{Map, Value};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Record = Map<String, Value>;

/// A table column requested on the command line as `KEY` or `KEY=TITLE`
#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnSpec {
    key: String,
    title: String,
}

fn parse_column_spec(spec: &str) -> Result<ColumnSpec, anyhow::Error> {
    let (key, title) = match spec.split_once('=') {
        Some((key, title)) => (key, title),
        None => (spec, spec),
    };
    if key.is_empty() {
        bail!("invalid column '{}': key must not be empty", spec);
    }
    Ok(ColumnSpec {
        key: key.to_string(),
        title: title.to_string(),
    })
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("rutils")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Text tables, message chunking, currency strings and embeds for chat bots")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log more detail to stderr (repeat for trace output)"),
        )
        .subcommand(
            Command::new("table")
                .about("Render a JSON array of objects as a bordered text table")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("JSON file to read (defaults to stdin)"),
                )
                .arg(
                    Arg::new("column")
                        .short('c')
                        .long("column")
                        .action(ArgAction::Append)
                        .help("Column as KEY or KEY=TITLE (defaults to every key of the first record)"),
                )
                .arg(
                    Arg::new("vertical")
                        .long("vertical")
                        .value_parser(value_parser!(char))
                        .default_value("|")
                        .help("Vertical separator"),
                )
                .arg(
                    Arg::new("horizontal")
                        .long("horizontal")
                        .value_parser(value_parser!(char))
                        .default_value("-")
                        .help("Horizontal separator"),
                )
                .arg(
                    Arg::new("padding")
                        .long("padding")
                        .value_parser(value_parser!(char))
                        .default_value(" ")
                        .help("Padding character"),
                ),
        )
        .subcommand(
            Command::new("chunk")
                .about("Split text into delimiter-respecting chunks")
                .arg(Arg::new("text").help("Text to split (defaults to stdin)"))
                .arg(
                    Arg::new("max-length")
                        .short('m')
                        .long("max-length")
                        .required(true)
                        .value_parser(value_parser!(usize))
                        .help("Maximum chunk length in characters"),
                )
                .arg(
                    Arg::new("split")
                        .long("split")
                        .default_value(" ")
                        .help("Delimiter used to split the text (\\n and \\t are unescaped)"),
                )
                .arg(
                    Arg::new("join")
                        .long("join")
                        .default_value("\\n")
                        .help("Delimiter placed between chunks (\\n and \\t are unescaped)"),
                ),
        )
        .subcommand(
            Command::new("currency")
                .about("Format an amount as a currency string")
                .arg(
                    Arg::new("amount")
                        .required(true)
                        .allow_negative_numbers(true)
                        .value_parser(value_parser!(f64))
                        .help("Amount to format"),
                )
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .default_value("$")
                        .help("Text before the number"),
                )
                .arg(
                    Arg::new("no-prefix")
                        .long("no-prefix")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("prefix")
                        .help("Omit the prefix"),
                )
                .arg(
                    Arg::new("postfix")
                        .long("postfix")
                        .help("Text after the number"),
                )
                .arg(
                    Arg::new("locale")
                        .long("locale")
                        .default_value("en-US")
                        .help("Locale (grouping is always en-US)"),
                ),
        )
        .subcommand(
            Command::new("capitalize")
                .about("Uppercase the first character of the text")
                .arg(Arg::new("text").required(true).help("Text to capitalise")),
        )
        .subcommand(
            Command::new("embed")
                .about("Print a default-styled embed as JSON")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Bot display name for the footer"),
                )
                .arg(
                    Arg::new("avatar-url")
                        .long("avatar-url")
                        .requires("name")
                        .help("Bot avatar URL for the footer icon"),
                )
                .arg(
                    Arg::new("color")
                        .long("color")
                        .value_parser(|s: &str| s.parse::<Color>())
                        .help("Embed color as #rrggbb"),
                )
                .arg(
                    Arg::new("no-timestamp")
                        .long("no-timestamp")
                        .action(ArgAction::SetTrue)
                        .help("Do not stamp the current time"),
                )
                .arg(
                    Arg::new("no-footer")
                        .long("no-footer")
                        .action(ArgAction::SetTrue)
                        .help("Do not add the identity footer"),
                )
                .arg(Arg::new("title").long("title").help("Embed title"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .help("Embed description"),
                ),
        )
}

/// Install a stderr subscriber; `RUST_LOG` wins over `-v`.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&String>) -> Result<String, anyhow::Error> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file '{}'", path)),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Turn `\n` and `\t` escapes typed on the command line into the real characters
fn unescape(delimiter: &str) -> String {
    delimiter.replace("\\n", "\n").replace("\\t", "\t")
}

/// Cell text for a JSON value: strings verbatim, missing and null empty
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Handler for table command
fn table_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let input = read_input(matches.get_one::<String>("input"))?;
    let records: Vec<Record> =
        serde_json::from_str(&input).context("input must be a JSON array of objects")?;

    let specs: Vec<ColumnSpec> = match matches.get_many::<String>("column") {
        Some(values) => values
            .map(|s| parse_column_spec(s))
            .collect::<Result<_, _>>()?,
        None => records
            .first()
            .map(|first| {
                first
                    .keys()
                    .map(|key| ColumnSpec {
                        key: key.clone(),
                        title: key.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    };
    debug!(records = records.len(), columns = specs.len(), "parsed table input");

    let columns: Vec<Column<Record>> = specs
        .into_iter()
        .map(|spec| {
            let key = spec.key;
            Column::new(spec.title, move |record: &Record| cell_text(record.get(&key)))
        })
        .collect();

    let style = TableStyle::new()
        .with_vertical(*matches.get_one::<char>("vertical").unwrap_or(&'|'))
        .with_horizontal(*matches.get_one::<char>("horizontal").unwrap_or(&'-'))
        .with_padding(*matches.get_one::<char>("padding").unwrap_or(&' '));

    Ok(render_table_with_style(&records, &columns, style))
}

/// Handler for chunk command
fn chunk_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let text = match matches.get_one::<String>("text") {
        Some(text) => text.clone(),
        None => strip_line_ending(read_input(None)?),
    };
    let max_length = *matches
        .get_one::<usize>("max-length")
        .ok_or_else(|| anyhow!("--max-length is required"))?;
    let split = matches
        .get_one::<String>("split")
        .map(|s| unescape(s))
        .unwrap_or_else(|| " ".to_string());
    let join = matches
        .get_one::<String>("join")
        .map(|s| unescape(s))
        .unwrap_or_else(|| "\n".to_string());

    let chunker = Chunker::new(max_length)
        .with_split_delimiter(split)
        .with_join_delimiter(join);
    Ok(format!("{}\n", chunker.split(&text)))
}

/// Drop the single line ending a shell pipe adds; anything before it is content
fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}

/// Handler for currency command
fn currency_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let amount = *matches
        .get_one::<f64>("amount")
        .ok_or_else(|| anyhow!("amount is required"))?;
    let prefix = if matches.get_flag("no-prefix") {
        None
    } else {
        matches.get_one::<String>("prefix").map(|s| s.as_str())
    };
    let postfix = matches.get_one::<String>("postfix").map(|s| s.as_str());
    let locale = matches
        .get_one::<String>("locale")
        .map(|s| s.as_str())
        .unwrap_or("en-US");

    Ok(format!(
        "{}\n",
        format_currency(amount, prefix, postfix, locale)
    ))
}

/// Handler for capitalize command
fn capitalize_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let text = matches
        .get_one::<String>("text")
        .map(|s| s.as_str())
        .unwrap_or_default();
    Ok(format!("{}\n", first_char_to_upper(text)?))
}

/// Handler for embed command
fn embed_handler(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    let mut defaults = EmbedDefaults::new()
        .with_timestamp(!matches.get_flag("no-timestamp"))
        .with_footer(!matches.get_flag("no-footer"));
    if let Some(color) = matches.get_one::<Color>("color") {
        defaults = defaults.with_color(*color);
    }

    let identity = matches.get_one::<String>("name").map(|name| {
        let avatar_url = matches
            .get_one::<String>("avatar-url")
            .cloned()
            .unwrap_or_default();
        Identity::new(name.clone(), avatar_url)
    });

    let mut embed = EmbedFactory::new(defaults).create_builder(identity.as_ref());
    if let Some(title) = matches.get_one::<String>("title") {
        embed = embed.with_title(title.clone());
    }
    if let Some(description) = matches.get_one::<String>("description") {
        embed = embed.with_description(description.clone());
    }

    Ok(format!("{}\n", serde_json::to_string_pretty(&embed)?))
}

fn run(matches: &ArgMatches) -> Result<String, anyhow::Error> {
    match matches.subcommand() {
        Some(("table", sub)) => table_handler(sub),
        Some(("chunk", sub)) => chunk_handler(sub),
        Some(("currency", sub)) => currency_handler(sub),
        Some(("capitalize", sub)) => capitalize_handler(sub),
        Some(("embed", sub)) => embed_handler(sub),
        Some((name, _)) => Err(anyhow!("unknown command '{}'", name)),
        None => Err(anyhow!("no command given")),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_parse_column_spec() {
        assert_eq!(
            parse_column_spec("price=Price").unwrap(),
            ColumnSpec {
                key: "price".to_string(),
                title: "Price".to_string()
            }
        );
        assert_eq!(parse_column_spec("name").unwrap().title, "name");
        assert_eq!(parse_column_spec("a=b=c").unwrap().title, "b=c");
        assert!(parse_column_spec("=Title").is_err());
    }

    #[test]
    fn test_cell_text() {
        let record = json!({ "s": "text", "n": 12, "b": true, "z": null });
        let record = record.as_object().unwrap();
        assert_eq!(cell_text(record.get("s")), "text");
        assert_eq!(cell_text(record.get("n")), "12");
        assert_eq!(cell_text(record.get("b")), "true");
        assert_eq!(cell_text(record.get("z")), "");
        assert_eq!(cell_text(record.get("missing")), "");
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape("\\n"), "\n");
        assert_eq!(unescape("a\\tb"), "a\tb");
        assert_eq!(unescape(","), ",");
    }

    #[test]
    fn test_currency_handler_no_prefix() {
        let matches = build_command()
            .try_get_matches_from(["rutils", "currency", "-5", "--no-prefix", "--postfix", " EUR"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(currency_handler(sub).unwrap(), "-5 EUR\n");
    }

    #[test]
    fn test_chunk_handler() {
        let matches = build_command()
            .try_get_matches_from(["rutils", "chunk", "a b c", "--max-length", "3"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(chunk_handler(sub).unwrap(), "a b\nc\n");
    }

    #[test]
    fn test_chunk_handler_keeps_trailing_newlines_in_argument() {
        let matches = build_command()
            .try_get_matches_from([
                "rutils",
                "chunk",
                "a b\n\n",
                "--max-length",
                "1",
                "--split",
                "b",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(chunk_handler(sub).unwrap(), "a \n\n\n\n");
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("abc\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc\r\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc\n\n".to_string()), "abc\n");
        assert_eq!(strip_line_ending("abc".to_string()), "abc");
        assert_eq!(strip_line_ending(String::new()), "");
    }

    #[test]
    fn test_embed_handler_footer() {
        let matches = build_command()
            .try_get_matches_from([
                "rutils",
                "embed",
                "--name",
                "PriceBot",
                "--color",
                "#ff0000",
                "--no-timestamp",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let output: Value = serde_json::from_str(&embed_handler(sub).unwrap()).unwrap();
        assert_eq!(output["color"], 0xff0000);
        assert_eq!(output["footer"]["text"], "PriceBot");
        assert!(output["footer"].get("icon_url").is_none());
        assert!(output.get("timestamp").is_none());
    }
}
