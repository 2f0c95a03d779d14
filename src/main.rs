use clap::{Parser, Subcommand};
use hugo_matter::{check, codec, config, document, logger, output, value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "hugo-matter")]
#[command(about = "Read and write Hugo TOML front matter")]
#[command(long_about = "\
Read and write Hugo TOML front matter

Content files start with a +++ delimited block of key = value lines:

  +++
  title = \"Night Walk\"          # string
  weight = 10                   # number
  draft = false                 # boolean
  tags = [\"film\", \"city\"]       # array of strings/numbers
  +++
  Markdown body...

Lines that are not key = value pairs are skipped, and unquoted values that
are not numbers or booleans are kept as raw text. Use 'check' to list the
lines that would be skipped, or set codec.strict = true to fail on them.
'set' always refuses files with such lines rather than dropping them.

Run 'hugo-matter gen-config' to generate a documented hugo-matter.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Directory containing hugo-matter.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored log output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a content file's front matter as JSON
    Decode {
        file: PathBuf,
    },
    /// Encode a JSON object as front matter (reads stdin when no file or "-")
    Encode {
        input: Option<PathBuf>,
    },
    /// Print one front-matter value as JSON
    Get {
        file: PathBuf,
        key: String,
    },
    /// Set one front-matter value, typed the same way decode would type it
    Set {
        file: PathBuf,
        key: String,
        value: String,
    },
    /// Strictly validate one content file or every content file in a directory
    Check {
        #[arg(default_value = "content")]
        path: PathBuf,
    },
    /// Print a stock hugo-matter.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet, cli.no_color);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config_dir)?;
    debug!(?cfg, "resolved config");

    match cli.command {
        Command::Decode { file } => {
            let content = document::read_content_file(&file, &cfg)?;
            println!(
                "{}",
                output::format_json(&content.front_matter, cfg.output.pretty)?
            );
        }
        Command::Encode { input } => {
            let text = read_input(input.as_deref())?;
            let json: serde_json::Value = serde_json::from_str(&text)?;
            let front_matter =
                value::front_matter_from_json(json).ok_or("encode input must be a JSON object")?;
            let encoded = if cfg.codec.strict {
                codec::encode_strict(&front_matter)?
            } else {
                codec::encode(&front_matter)
            };
            println!("{encoded}");
        }
        Command::Get { file, key } => {
            let content = document::read_content_file(&file, &cfg)?;
            let found = content
                .front_matter
                .get(&key)
                .ok_or_else(|| format!("key not found: {key}"))?;
            println!("{}", output::format_json(found, cfg.output.pretty)?);
        }
        Command::Set { file, key, value } => {
            let typed = codec::infer_value(value.trim());
            document::set_value(&file, &key, typed.clone(), &cfg)?;
            println!("{}", output::format_set_result(&file, &key, &typed));
        }
        Command::Check { path } => {
            let report = check::check(&path, &cfg)?;
            output::print_check_report(&report);
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Command::GenConfig => unreachable!("handled before config loading"),
    }

    Ok(())
}

/// Read from a file, or stdin when `path` is absent or `-`.
fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
