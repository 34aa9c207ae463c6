//! Error rendering using ariadne
//!
//! Errors raised while compiling a type expression point back into that
//! expression. This module renders them with the offending span underlined;
//! other errors are printed as a single line.

use crate::{Error, ParseError};
use ariadne::{Color, Label, Report, ReportKind, Source};
use std::io::Write;

const SOURCE_ID: &str = "<type>";

/// Render an error against the type expression it came from, to stderr
///
/// # Example
/// ```no_run
/// use sable::{RegistryBuilder, render_error};
/// use sable::legacy::LegacyTypes;
///
/// let types = LegacyTypes::new();
/// let mut builder = RegistryBuilder::new(&types);
///
/// let source = "Vec<u8";
/// if let Err(e) = builder.use_type(source) {
///     render_error(source, &e);
/// }
/// ```
pub fn render_error(source: &str, error: &Error) {
    render_error_to_writer(source, error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(source: &str, error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(source, error, writer, true)
}

/// Render an error to a String
pub fn render_error_to_string(source: &str, error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(source: &str, error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(source, error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    source: &str,
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::TypeParse(parse) => render_parse_error(source, parse, writer, use_color),
        Error::UnknownType { name } | Error::RecursiveAlias { name } => {
            // Names are reported after path collapsing, so `T::Balance`
            // shows up as `Balance`; label the first occurrence if any.
            match source.find(name.as_str()) {
                Some(start) => render_report(
                    source,
                    start..start + name.len(),
                    &error.to_string(),
                    None,
                    writer,
                    use_color,
                ),
                None => writeln!(writer, "error: {error}"),
            }
        }
        _ => writeln!(writer, "error: {error}"),
    }
}

fn render_parse_error(
    source: &str,
    error: &ParseError,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let span = error.span().range();
    // End-of-input errors point one past the source; ariadne wants a char.
    let span = if span.start >= source.len() {
        source.len()..source.len()
    } else {
        span
    };
    render_report(
        source,
        span,
        &error.to_string(),
        Some(error.code()),
        writer,
        use_color,
    )
}

fn render_report(
    source: &str,
    span: std::ops::Range<usize>,
    message: &str,
    code: Option<&str>,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut report = Report::build(ReportKind::Error, (SOURCE_ID, span.clone()))
        .with_message(message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = code {
        report = report.with_code(code);
    }

    report = report.with_label(
        Label::new((SOURCE_ID, span))
            .with_message(message)
            .with_color(Color::Red),
    );

    report
        .finish()
        .write((SOURCE_ID, Source::from(source)), &mut *writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryBuilder;
    use crate::legacy::LegacyTypes;

    fn compile_error(source: &str) -> Error {
        let types = LegacyTypes::new();
        let mut builder = RegistryBuilder::new(&types);
        match builder.use_type(source) {
            Err(e) => e,
            Ok(id) => panic!("{source} compiled to {id}"),
        }
    }

    #[test]
    fn test_render_parse_error() {
        let source = "Vec<u8";
        let output = render_error_to_string_no_color(source, &compile_error(source));

        assert!(output.contains("Error"));
        assert!(output.contains("P003"));
        assert!(output.contains("Vec<u8"));
    }

    #[test]
    fn test_render_unexpected_char() {
        let source = "Vec<u8 $>";
        let output = render_error_to_string_no_color(source, &compile_error(source));

        assert!(output.contains("P001"));
        assert!(output.contains("unexpected character '$'"));
        assert!(output.lines().count() > 1);
    }

    #[test]
    fn test_render_unknown_type_labels_name() {
        let source = "Vec<T::Mystery>";
        let output = render_error_to_string_no_color(source, &compile_error(source));

        assert!(output.contains("Mystery"));
        assert!(output.contains("Vec<T::Mystery>"));
    }

    #[test]
    fn test_render_plain_error() {
        let error = Error::TrailingBytes { remaining: 3 };
        let output = render_error_to_string_no_color("", &error);
        assert_eq!(output, format!("error: {error}\n"));
    }
}
