//! # kennitala-cli: Command-Line Interface
//!
//! Provides the `kt` binary, a thin shell over `kennitala-core`.
//!
//! ## Subcommands
//!
//! - `validate`: check one or more identifiers; exit 1 if any is invalid.
//! - `inspect`: print everything decodable from one identifier.
//! - `generate`: build the identifier for a given date.
//! - `random`: build identifiers for random dates in a range.
//!
//! ```bash
//! kt validate 140543-3229 1203753509
//! kt inspect 140543-3229 --format json
//! kt generate --date 1975-03-12 --organization
//! kt --century-policy registry random --start 1850-01-01 --end 1899-12-31 --count 5
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers, which take their output
//!   stream as a parameter.
//! - Handlers delegate to `kennitala-core`; no codec logic lives here.
//! - Handlers return the process exit code.

pub mod generate;
pub mod validate;

use clap::ValueEnum;

/// Exit code for success.
pub const EXIT_OK: u8 = 0;

/// Exit code when at least one identifier failed validation, or on error.
pub const EXIT_FAILURE: u8 = 1;

/// Output format for structured reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned `key: value` lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML document.
    Yaml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(EXIT_OK, EXIT_FAILURE);
    }

    #[test]
    fn output_format_default_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn output_format_parses_from_cli_names() {
        assert_eq!(OutputFormat::from_str("json", true), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("YAML", true), Ok(OutputFormat::Yaml));
        assert!(OutputFormat::from_str("xml", true).is_err());
    }

    #[test]
    fn public_modules_are_accessible() {
        let _ = std::any::type_name::<generate::GenerateArgs>();
        let _ = std::any::type_name::<generate::RandomArgs>();
        let _ = std::any::type_name::<validate::ValidateArgs>();
        let _ = std::any::type_name::<validate::InspectArgs>();
    }
}
