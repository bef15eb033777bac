//! Output formatting for parsed arguments and check reports.

use serde::Serialize;
use sigparse::{ArgumentDeclaration, Arguments, Value};

/// Formats accepted by `check`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats accepted by `run`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ValueFormat {
    Json,
    Yaml,
}

/// Compilation outcome for one signature file.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentDeclaration>,
}

/// Formats the arguments handed to the callable.
pub fn format_arguments(arguments: &Arguments, format: ValueFormat) -> Result<String, String> {
    match format {
        ValueFormat::Json => serde_json::to_string_pretty(arguments)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        ValueFormat::Yaml => {
            serde_yaml::to_string(arguments).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// Formats check reports in the requested output format.
pub fn format_reports(reports: &[CheckReport], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(reports)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(reports).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(reports.iter().map(report_to_markdown).collect::<Vec<_>>().join("\n")),
        OutputFormat::Table => Ok(reports.iter().map(report_to_table).collect()),
    }
}

fn default_text(decl: &ArgumentDeclaration) -> String {
    match &decl.default {
        Some(Value::List(items)) if items.is_empty() => "[]".to_string(),
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

fn report_to_markdown(report: &CheckReport) -> String {
    let mut out = String::new();

    let title = report.command.as_deref().unwrap_or(&report.file);
    out.push_str(&format!("# {title}\n\n"));
    out.push_str(&format!("- **File:** {}\n", report.file));
    out.push_str(&format!("- **Status:** {}\n", if report.ok { "ok" } else { "failed" }));
    if let Some(ref err) = report.error {
        out.push_str(&format!("- **Error:** {err}\n"));
    }

    if !report.arguments.is_empty() {
        out.push_str("\n## Arguments\n\n");
        out.push_str("| Argument | Kind | Arity | Required | Default | Help |\n");
        out.push_str("|----------|------|-------|----------|---------|------|\n");
        for decl in &report.arguments {
            out.push_str(&format!(
                "| `{}` | {} | {} | {} | {} | {} |\n",
                decl.display_name(),
                decl.kind.label(),
                decl.arity.marker(),
                if decl.required { "yes" } else { "no" },
                default_text(decl),
                decl.help.replace('|', "\\|"),
            ));
        }
    }

    out
}

fn report_to_table(report: &CheckReport) -> String {
    let mut out = String::new();
    let status = if report.ok { "OK" } else { "FAIL" };
    out.push_str(&format!(
        "{:<20} {:<6} {}",
        report.command.as_deref().unwrap_or("-"),
        status,
        report.file
    ));
    if let Some(ref err) = report.error {
        out.push_str(&format!("\n  {err}"));
    }
    out.push('\n');

    let width = report
        .arguments
        .iter()
        .map(|decl| decl.display_name().len())
        .max()
        .unwrap_or(4);
    for decl in &report.arguments {
        out.push_str(&format!(
            "  {:<width$}  {:<9} {:<2} {:<9} {}\n",
            decl.display_name(),
            decl.kind.label(),
            decl.arity.marker(),
            if decl.required { "required" } else { "optional" },
            default_text(decl),
            width = width
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigparse::{ParameterSpec, ParserOptions, RaisingParser, Signature, as_arg_parser};

    fn sample_report() -> CheckReport {
        let signature = Signature::new("pets")
            .param(ParameterSpec::typed::<String>("name"))
            .param(ParameterSpec::typed::<bool>("loves_rust").with_default(false));
        let parser = as_arg_parser(
            signature,
            |args| args,
            ParserOptions::default().with_parser_type(RaisingParser),
        )
        .unwrap();
        CheckReport {
            file: "pets.yaml".into(),
            command: Some("pets".into()),
            ok: true,
            error: None,
            arguments: parser.declarations().to_vec(),
        }
    }

    fn failed_report() -> CheckReport {
        CheckReport {
            file: "broken.yaml".into(),
            command: Some("broken".into()),
            ok: false,
            error: Some("parameter `x` has no type annotation".into()),
            arguments: Vec::new(),
        }
    }

    #[test]
    fn test_format_arguments_json() {
        let args: Arguments = [("name", Value::from("Johnny")), ("age", Value::Int(33))]
            .into_iter()
            .collect();
        let out = format_arguments(&args, ValueFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["name"], "Johnny");
        assert_eq!(parsed["age"], 33);
    }

    #[test]
    fn test_format_arguments_yaml() {
        let args: Arguments = [("pets", Value::None)].into_iter().collect();
        let out = format_arguments(&args, ValueFormat::Yaml).unwrap();
        assert!(out.contains("pets: null"), "{out}");
    }

    #[test]
    fn test_format_reports_json() {
        let out = format_reports(&[sample_report()], OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["command"], "pets");
        assert_eq!(parsed[0]["arguments"][0]["name"], "name");
        assert_eq!(parsed[0]["arguments"][1]["required"], false);
    }

    #[test]
    fn test_format_reports_markdown() {
        let out = format_reports(&[sample_report()], OutputFormat::Markdown).unwrap();
        assert!(out.contains("# pets"));
        assert!(out.contains("| `--loves-rust` | boolean |"), "{out}");
    }

    #[test]
    fn test_format_reports_markdown_with_failure() {
        let out = format_reports(&[failed_report()], OutputFormat::Markdown).unwrap();
        assert!(out.contains("**Status:** failed"));
        assert!(out.contains("no type annotation"));
        assert!(!out.contains("## Arguments"));
    }

    #[test]
    fn test_format_reports_table() {
        let out = format_reports(&[sample_report(), failed_report()], OutputFormat::Table).unwrap();
        assert!(out.contains("pets"));
        assert!(out.contains("OK"));
        assert!(out.contains("FAIL"));
        assert!(out.contains("--loves-rust"));
        assert!(out.contains("required"));
    }
}
