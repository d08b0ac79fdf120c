//! Command-line entry point for tugaphone

use clap::Parser;
use tugaphone_cli::commands::Commands;
use tugaphone_cli::CliResult;

/// Dialect-aware Portuguese to IPA transcription
#[derive(Debug, Parser)]
#[command(name = "tugaphone", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_phonemize() {
        let cli = Cli::try_parse_from([
            "tugaphone", "phonemize", "-t", "Olá", "-d", "PT-BR", "-p", "sao-paulo", "-f", "json",
        ])
        .unwrap();
        let Commands::Phonemize(args) = cli.command else {
            panic!("expected phonemize");
        };
        assert_eq!(args.text.as_deref(), Some("Olá"));
        assert_eq!(args.preset.as_deref(), Some("sao-paulo"));
    }

    #[test]
    fn test_phonemize_requires_input() {
        assert!(Cli::try_parse_from(["tugaphone", "phonemize"]).is_err());
        assert!(Cli::try_parse_from(["tugaphone", "phonemize", "-t", "a", "-i", "b.txt"]).is_err());
    }

    #[test]
    fn test_validate_requires_a_file() {
        assert!(Cli::try_parse_from(["tugaphone", "validate"]).is_err());
        assert!(Cli::try_parse_from(["tugaphone", "validate", "-l", "lex.csv"]).is_ok());
    }
}
