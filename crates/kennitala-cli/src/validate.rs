//! # Validate and Inspect Subcommands
//!
//! `kt validate` checks identifiers in bulk and reports one line each.
//! `kt inspect` decodes a single identifier into a structured report.
//!
//! Invalid input is never an error here: it is reported, logged at `warn`,
//! and reflected in the exit code.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use kennitala_core::{CenturyPolicy, EntityType, Kennitala};

use crate::{OutputFormat, EXIT_FAILURE, EXIT_OK};

/// Column at which values start in the text report.
const KEY_WIDTH: usize = 16;

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Identifiers to check, with or without separator.
    #[arg(value_name = "KENNITALA", required = true)]
    pub ids: Vec<String>,

    /// Print nothing; report through the exit code only.
    #[arg(long, short)]
    pub quiet: bool,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Identifier to decode.
    #[arg(value_name = "KENNITALA")]
    pub id: String,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Everything decodable from one identifier.
///
/// Derived fields are omitted when the identifier does not validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    /// The text as given on the command line.
    pub input: String,
    /// Whether the identifier validates under `century_policy`.
    pub valid: bool,
    /// Policy used to read the century marker.
    pub century_policy: CenturyPolicy,
    /// The ten digits without separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digits: Option<String>,
    /// Canonical dashed form, `DDMMYY-SSCM`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    /// Birth or registration date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    /// Person or organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<EntityType>,
    /// Check digit at position 8.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_digit: Option<u8>,
}

impl InspectReport {
    /// Build the report for `kt`.
    pub fn new(kt: &Kennitala) -> Self {
        Self {
            input: kt.as_raw().to_string(),
            valid: kt.validate(),
            century_policy: kt.century_policy(),
            digits: kt.digits_only().ok(),
            formatted: kt.with_separator().ok(),
            birth_date: kt.birth_date().ok(),
            entity_type: kt.entity_type().ok(),
            check_digit: kt.check_digit().ok(),
        }
    }

    /// Render the report in `format`.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(self).context("failed to render report as JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(self).context("failed to render report as YAML")
            }
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut rows: Vec<(&str, String)> = vec![
            ("input", self.input.clone()),
            ("valid", self.valid.to_string()),
            ("century policy", self.century_policy.to_string()),
        ];
        if let Some(formatted) = &self.formatted {
            rows.push(("formatted", formatted.clone()));
        }
        if let Some(digits) = &self.digits {
            rows.push(("digits", digits.clone()));
        }
        if let Some(date) = self.birth_date {
            rows.push(("birth date", date.to_string()));
        }
        if let Some(kind) = self.entity_type {
            rows.push(("entity type", kind.to_string()));
        }
        if let Some(check) = self.check_digit {
            rows.push(("check digit", check.to_string()));
        }

        use std::fmt::Write as _;

        let mut out = String::new();
        for (key, value) in rows {
            let pad = KEY_WIDTH.saturating_sub(key.len() + 1);
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{key}:{:pad$}{value}", "");
        }
        out
    }
}

/// Execute the validate subcommand.
pub fn run_validate<W: Write>(
    args: &ValidateArgs,
    policy: CenturyPolicy,
    out: &mut W,
) -> Result<u8> {
    let mut invalid = 0usize;

    for raw in &args.ids {
        let kt = Kennitala::with_policy(raw.as_str(), policy);
        let valid = kt.validate();
        tracing::debug!(input = %raw, valid, "validated kennitala");

        if valid {
            if !args.quiet {
                writeln!(out, "OK: {kt}")?;
            }
        } else {
            invalid += 1;
            tracing::warn!(input = %raw, "invalid kennitala");
            if !args.quiet {
                writeln!(out, "INVALID: {raw}")?;
            }
        }
    }

    tracing::info!(total = args.ids.len(), invalid, "validation finished");
    Ok(if invalid == 0 { EXIT_OK } else { EXIT_FAILURE })
}

/// Execute the inspect subcommand.
pub fn run_inspect<W: Write>(args: &InspectArgs, policy: CenturyPolicy, out: &mut W) -> Result<u8> {
    let kt = Kennitala::with_policy(args.id.as_str(), policy);
    let report = InspectReport::new(&kt);
    tracing::debug!(input = %args.id, valid = report.valid, "inspected kennitala");
    if !report.valid {
        tracing::warn!(input = %args.id, "invalid kennitala");
    }

    let rendered = report.render(args.format)?;
    out.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        writeln!(out)?;
    }

    Ok(if report.valid { EXIT_OK } else { EXIT_FAILURE })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(ids: &[&str], quiet: bool, policy: CenturyPolicy) -> (u8, String) {
        let args = ValidateArgs {
            ids: ids.iter().map(|s| s.to_string()).collect(),
            quiet,
        };
        let mut out = Vec::new();
        let code = run_validate(&args, policy, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    fn inspect(id: &str, format: OutputFormat) -> (u8, String) {
        let args = InspectArgs {
            id: id.to_string(),
            format,
        };
        let mut out = Vec::new();
        let code = run_inspect(&args, CenturyPolicy::Reference, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    // -- validate --

    #[test]
    fn validate_all_valid() {
        let (code, out) = validate(&["1405433229", "120375-3509"], false, CenturyPolicy::Reference);
        assert_eq!(code, EXIT_OK);
        assert_eq!(out, "OK: 140543-3229\nOK: 120375-3509\n");
    }

    #[test]
    fn validate_reports_invalid_with_raw_text() {
        let (code, out) = validate(&["1405433229", "550376"], false, CenturyPolicy::Reference);
        assert_eq!(code, EXIT_FAILURE);
        assert_eq!(out, "OK: 140543-3229\nINVALID: 550376\n");
    }

    #[test]
    fn validate_quiet_prints_nothing() {
        let (code, out) = validate(&["1234567890"], true, CenturyPolicy::Reference);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
    }

    #[test]
    fn validate_respects_policy() {
        let (reference, _) = validate(&["0101992048"], true, CenturyPolicy::Reference);
        let (registry, _) = validate(&["0101992048"], true, CenturyPolicy::Registry);
        assert_eq!(reference, EXIT_FAILURE);
        assert_eq!(registry, EXIT_OK);
    }

    // -- inspect --

    #[test]
    fn report_for_valid_identifier() {
        let report = InspectReport::new(&Kennitala::new("1203753509"));
        assert!(report.valid);
        assert_eq!(report.formatted.as_deref(), Some("120375-3509"));
        assert_eq!(report.digits.as_deref(), Some("1203753509"));
        assert_eq!(report.birth_date, NaiveDate::from_ymd_opt(1975, 3, 12));
        assert_eq!(report.entity_type, Some(EntityType::Person));
        assert_eq!(report.check_digit, Some(0));
    }

    #[test]
    fn report_for_invalid_identifier_has_no_derived_fields() {
        let report = InspectReport::new(&Kennitala::new("2513760649"));
        assert!(!report.valid);
        assert_eq!(report.digits, None);
        assert_eq!(report.formatted, None);
        assert_eq!(report.birth_date, None);
        assert_eq!(report.entity_type, None);
        assert_eq!(report.check_digit, None);
    }

    #[test]
    fn inspect_text() {
        let (code, out) = inspect("140543-3229", OutputFormat::Text);
        assert_eq!(code, EXIT_OK);
        assert!(out.contains("valid:          true\n"));
        assert!(out.contains("birth date:     1943-05-14\n"));
        assert!(out.contains("entity type:    person\n"));
        assert!(out.contains("century policy: reference\n"));
    }

    #[test]
    fn text_report_aligns_values() {
        let text = InspectReport::new(&Kennitala::new("120375-7099")).render_text();
        assert_eq!(text.lines().count(), 8);
        for line in text.lines() {
            let (key, _) = line.split_once(':').unwrap();
            assert!(line[key.len() + 1..KEY_WIDTH].chars().all(|c| c == ' '), "{line}");
            assert_ne!(line.as_bytes()[KEY_WIDTH], b' ', "{line}");
        }
        assert!(text.ends_with("check digit:    9\n"));
    }

    #[test]
    fn inspect_json() {
        let (code, out) = inspect("120375-7099", OutputFormat::Json);
        assert_eq!(code, EXIT_OK);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["birth_date"], "1975-03-12");
        assert_eq!(value["entity_type"], "organization");
        assert_eq!(value["century_policy"], "reference");
        assert_eq!(value["check_digit"], 9);
    }

    #[test]
    fn inspect_json_invalid_omits_derived_fields() {
        let (code, out) = inspect("garbage", OutputFormat::Json);
        assert_eq!(code, EXIT_FAILURE);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["input"], "garbage");
        assert!(value.get("birth_date").is_none());
    }

    #[test]
    fn inspect_yaml() {
        let (code, out) = inspect("1203753509", OutputFormat::Yaml);
        assert_eq!(code, EXIT_OK);
        let value: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(value["formatted"].as_str(), Some("120375-3509"));
        assert_eq!(value["valid"].as_bool(), Some(true));
    }
}
