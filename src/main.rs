//! CLI entry point for `msgextract`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};

use msgextract::config::Config;
use msgextract::export::attachment::{save_all, SaveOptions};
use msgextract::extract::locate::payload_range;
use msgextract::extract::{extract_file, ExtractOptions};
use msgextract::mime::MimeRegistry;
use msgextract::model::attachment::Attachment;

#[derive(Parser)]
#[command(
    name = "msgextract",
    version,
    about = "Extract attachments from Outlook .msg files"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// .msg file to extract attachments from
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output directory (defaults to the current directory)
    #[arg(short, long, global = true, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Keep saving the remaining attachments when one fails
    #[arg(long, global = true)]
    keep_going: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract all attachments from a .msg file
    Extract {
        path: PathBuf,
    },
    /// List recovered attachments without writing anything
    List {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the known MIME types in lookup order
    Types {
        #[arg(long)]
        json: bool,
    },
    /// Show the configuration file path, or write the defaults to it
    Config {
        #[arg(long)]
        init: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = msgextract::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    let mut save_options = config.save_options();
    save_options.keep_going |= cli.keep_going;
    let output = cli
        .out
        .clone()
        .or_else(|| config.export.default_output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Some(Commands::Extract { path }) => {
            cmd_extract(&path, &output, &config.extract_options(), &save_options)
        }
        None => match cli.file {
            Some(path) => cmd_extract(&path, &output, &config.extract_options(), &save_options),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
        Some(Commands::List { path, json }) => cmd_list(&path, json, &config.extract_options()),
        Some(Commands::Types { json }) => cmd_types(json),
        Some(Commands::Config { init }) => cmd_config(init, &config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = msgextract::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "msgextract.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Extract every recoverable attachment into `output`.
fn cmd_extract(
    path: &Path,
    output: &Path,
    extract_options: &ExtractOptions,
    save_options: &SaveOptions,
) -> anyhow::Result<()> {
    let attachments = extract_file(path, extract_options)?;
    println!("Found {} attached file(s).", attachments.len());

    std::fs::create_dir_all(output)?;
    let paths = save_all(&attachments, output, save_options, &|saved| {
        println!("Saved file {}", saved.display());
    })?;

    tracing::info!(
        saved = paths.len(),
        output = %output.display(),
        "Extraction complete"
    );
    Ok(())
}

/// Print what would be extracted, without touching the filesystem.
fn cmd_list(path: &Path, json: bool, options: &ExtractOptions) -> anyhow::Result<()> {
    let attachments = extract_file(path, options)?;
    if json {
        print_list_json(&attachments)
    } else {
        print_list_table(&attachments);
        Ok(())
    }
}

fn print_list_table(attachments: &[Attachment]) {
    use humansize::{format_size, BINARY};

    let registry = MimeRegistry::standard();

    println!();
    println!("  {} attachment(s)", attachments.len());
    println!();
    if attachments.is_empty() {
        return;
    }

    println!(
        "  {:<4} {:<40} {:<30} {:>10}  Kind",
        "#", "Name", "Type", "Size"
    );
    println!("  {}", "-".repeat(100));

    for (i, att) in attachments.iter().enumerate() {
        let name: String = att.file_name().unwrap_or("-").chars().take(39).collect();
        let mime: String = att.mime().chars().take(29).collect();
        let size = match payload_range(att) {
            Ok(range) => format_size(range.len(), BINARY),
            Err(_) => "?".to_string(),
        };
        let kind = registry.description_for(att.mime()).unwrap_or("");
        println!(
            "  {:<4} {:<40} {:<30} {:>10}  {}",
            i + 1,
            name,
            mime,
            size,
            kind
        );
    }
    println!();
}

fn print_list_json(attachments: &[Attachment]) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = attachments
        .iter()
        .enumerate()
        .map(|(index, att)| {
            let range = payload_range(att).ok();
            serde_json::json!({
                "index": index,
                "file_name": att.file_name(),
                "mime": att.mime(),
                "raw_size": att.raw().len(),
                "payload": range.map(|r| serde_json::json!({
                    "start": r.start,
                    "end": r.end,
                })),
            })
        })
        .collect();

    let output = serde_json::json!({
        "count": attachments.len(),
        "attachments": items,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print the MIME registry in the order the resolver tries it.
fn cmd_types(json: bool) -> anyhow::Result<()> {
    let registry = MimeRegistry::standard();
    if json {
        println!("{}", serde_json::to_string_pretty(registry.entries())?);
        return Ok(());
    }
    for entry in registry.entries() {
        println!(
            "  {:<8} {:<75} {}",
            entry.extension, entry.mime_type, entry.description
        );
    }
    Ok(())
}

fn cmd_config(init: bool, config: &Config) -> anyhow::Result<()> {
    if init {
        let path = msgextract::config::save_config(config)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }
    match msgextract::config::config_file_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("No configuration directory available"),
    }
    println!("Log file: {}", msgextract::config::log_file_path(config).display());
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "msgextract", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
