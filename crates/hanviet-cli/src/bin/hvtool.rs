use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use hanviet_cli::commands::{annotate_ops, config_ops, sentence_ops, table_ops};
use hanviet_cli::source::SentenceFilter;
use hanviet_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "hvtool", about = "Han Viet reading table tool")]
struct Cli {
    /// Custom settings TOML, applied before the command runs
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Directory for JSON trace output (requires --features trace)
    #[arg(long, global = true)]
    trace_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show reading table info (CSV or compiled, auto-detected by magic bytes)
    Info {
        /// Reading table file
        file: String,
    },
    /// Compile a reading table CSV into the binary form
    Compile {
        /// Input CSV file
        input_csv: String,
        /// Output file
        output_file: String,
    },
    /// Look up the readings of a word or sentence
    Lookup {
        /// Reading table file
        table_file: String,
        /// Text to look up
        text: String,
    },
    /// Add readings to a JSON vocabulary list
    Annotate {
        /// Reading table file
        table_file: String,
        /// Vocabulary JSON (array of objects)
        vocab_file: String,
        /// Output JSON file
        output_file: String,
    },
    /// Build enriched sentence records from a sentence CSV
    Sentences {
        /// Reading table file
        table_file: String,
        /// Sentence CSV file
        input_csv: String,
        /// Output JSON file
        output_file: String,
        /// Keep only rows of this TOCFL level
        #[arg(long)]
        tocfl_level: Option<String>,
        /// Maximum number of rows to keep
        #[arg(long)]
        max_rows: Option<usize>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(file) = &cli.settings {
        let content = fs::read_to_string(file).unwrap_or_else(|e| {
            eprintln!("Error reading {file}: {e}");
            process::exit(1);
        });
        if let Err(e) = hanviet_core::settings::init_custom(content) {
            eprintln!("Error in settings {file}: {e}");
            process::exit(1);
        }
    }

    let _trace = cli.trace_dir.as_deref().map(init_tracing);

    match cli.command {
        Command::Info { file } => table_ops::info(&file),
        Command::Compile {
            input_csv,
            output_file,
        } => table_ops::compile(&input_csv, &output_file),
        Command::Lookup { table_file, text } => table_ops::lookup(&table_file, &text),
        Command::Annotate {
            table_file,
            vocab_file,
            output_file,
        } => annotate_ops::annotate(&table_file, &vocab_file, &output_file),
        Command::Sentences {
            table_file,
            input_csv,
            output_file,
            tocfl_level,
            max_rows,
        } => {
            let filter = SentenceFilter {
                tocfl_level,
                max_rows,
            };
            sentence_ops::sentences(&table_file, &input_csv, &output_file, &filter);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
