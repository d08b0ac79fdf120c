//! CLI command implementations

use clap::Subcommand;

pub mod analyze;
pub mod generate_config;
pub mod list;
pub mod phonemize;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Transcribe Portuguese text into IPA
    Phonemize(phonemize::PhonemizeArgs),

    /// Export the token features of a sentence as JSON
    Analyze(analyze::AnalyzeArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Validate preset, dialect or lexicon files
    Validate(validate::ValidateArgs),

    /// Generate a dialect configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListCommands {
    /// List embedded dialects
    Dialects,

    /// List built-in regional presets
    Presets,

    /// List registered IPA rewrite rules
    Rules,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Phonemize(args) => args.execute(),
            Commands::Analyze(args) => args.execute(),
            Commands::List { subcommand } => list::execute(*subcommand),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Initialize logging from the verbosity count
///
/// `RUST_LOG` takes precedence over the flags. Quiet runs only report
/// errors.
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    // A second initialization (tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_commands_debug_format() {
        let list_cmd = Commands::List {
            subcommand: ListCommands::Presets,
        };
        let debug_str = format!("{:?}", list_cmd);
        assert!(debug_str.contains("List"));
        assert!(debug_str.contains("Presets"));
    }

    #[test]
    fn test_list_commands_execute() {
        for subcommand in [
            ListCommands::Dialects,
            ListCommands::Presets,
            ListCommands::Rules,
            ListCommands::Formats,
        ] {
            assert!(Commands::List { subcommand }.execute().is_ok());
        }
    }

    #[test]
    fn test_logging_initializes_twice() {
        init_logging(2, false);
        init_logging(0, true);
    }
}
