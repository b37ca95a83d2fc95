use clap::{Parser, Subcommand};

use seqdict_cli::commands::match_ops::{ClosestArgs, MatchMode};
use seqdict_cli::commands::{config_ops, dict_ops, match_ops};
use seqdict_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "seqtool", about = "Token-sequence dictionary lookup and matching")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log search diagnostics to stderr (filter with RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show word list statistics
    Info {
        /// Word list file (key tokens, optional TAB value)
        dict_file: String,
    },
    /// Look up a key (exact match)
    Lookup {
        /// Word list file
        dict_file: String,
        /// Key text, whitespace-separated tokens
        key: String,
    },
    /// List keys starting with a token prefix
    Prefix {
        /// Word list file
        dict_file: String,
        /// Prefix text, whitespace-separated tokens
        prefix: String,
        /// Maximum number of keys to list
        #[arg(short, long, default_value = "20")]
        n: usize,
    },
    /// Find exact occurrences of stored keys in a text
    Match {
        /// Word list file
        dict_file: String,
        /// Input text, whitespace-separated tokens
        text: String,
        /// Scan mode
        #[arg(long, value_enum, default_value = "all")]
        mode: MatchMode,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Find the k closest approximate matches of a text
    Closest {
        /// Word list file
        dict_file: String,
        /// Input text, whitespace-separated tokens
        text: String,
        /// Number of results
        #[arg(short, default_value = "5")]
        k: usize,
        /// Combine several entries to cover the text
        #[arg(long)]
        combine: bool,
        /// Collapse covers spelling the same key sequence at the same cost
        #[arg(long)]
        collapse: bool,
        /// Discard results costing more than this
        #[arg(long)]
        max_cost: Option<u32>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
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
    if cli.verbose {
        init_tracing();
    }
    if let Some(ref path) = cli.settings {
        config_ops::settings_load(path);
    }

    match cli.command {
        Command::Info { dict_file } => dict_ops::info(&dict_file),
        Command::Lookup { dict_file, key } => dict_ops::lookup(&dict_file, &key),
        Command::Prefix {
            dict_file,
            prefix,
            n,
        } => dict_ops::prefix(&dict_file, &prefix, n),
        Command::Match {
            dict_file,
            text,
            mode,
            json,
        } => match_ops::match_cmd(&dict_file, &text, mode, json),
        Command::Closest {
            dict_file,
            text,
            k,
            combine,
            collapse,
            max_cost,
            json,
        } => match_ops::closest_cmd(
            &dict_file,
            &text,
            &ClosestArgs {
                k,
                combine,
                collapse,
                max_cost,
                json,
            },
        ),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
