//! Error adapter for converting ScenicError to miette diagnostics.
//!
//! This module bridges the library's error types and miette's report
//! rendering used in the CLI.
//!
//! # Multi-Error Support
//!
//! A [`scenic_parser::error::ParseError`] usually carries one diagnostic per
//! broken element; each is rendered independently. Syntax errors carry a
//! source span and are shown with a snippet of the document, validation
//! errors name the offending JSON pointer instead. Validation warnings of
//! a successful parse go through the same adapter.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, SourceSpan};

use scenic::ScenicError;
use scenic_parser::{Severity, error::Diagnostic};

/// Adapter for a single parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Document source for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())?;
        if let Some(path) = self.diag.path() {
            write!(f, " (at {path})")?;
        }
        Ok(())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        // Only spanned diagnostics point into the source
        if self.diag.labels().is_empty() {
            return None;
        }
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            LabeledSpan::new_primary_with_span(
                Some(label.message().to_string()),
                span_to_miette(label.span()),
            )
        })))
    }
}

/// Adapter for [`ScenicError`] variants without diagnostics.
pub struct ErrorAdapter<'a>(pub &'a ScenicError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ScenicError::Io(_) => "scenic::io",
            ScenicError::Parse { .. } => return None,
            ScenicError::Render(err) if err.is_reference_error() => "scenic::render::reference",
            ScenicError::Render(_) => "scenic::render",
            ScenicError::Serialize(_) => "scenic::serialize",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ScenicError::Render(err) if err.is_reference_error() => Some(Box::new(
                "arrow refs and style names must match an id or preset defined in the document",
            ) as Box<dyn fmt::Display>),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parser diagnostic, possibly with a source location.
    Diagnostic(DiagnosticAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: scenic_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`ScenicError`] into a list of reportable errors.
///
/// A parse error yields one [`Reportable`] per diagnostic; every other
/// variant yields exactly one.
pub fn to_reportables(err: &ScenicError) -> Vec<Reportable<'_>> {
    match err {
        ScenicError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// Convert validation warnings into reportables over `src`.
pub fn warnings_to_reportables<'a>(
    warnings: &'a [Diagnostic],
    src: &'a str,
) -> Vec<Reportable<'a>> {
    warnings
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
        .collect()
}

/// Render a reportable with miette's graphical handler.
///
/// Falls back to a single plain line if rendering fails.
pub fn render_report(reportable: &Reportable<'_>) -> String {
    let mut rendered = String::new();
    if GraphicalReportHandler::new()
        .render_report(&mut rendered, reportable)
        .is_err()
    {
        let severity = match reportable.severity() {
            Some(miette::Severity::Warning) => "warning",
            _ => "error",
        };
        rendered = format!("{severity}: {reportable}\n");
    }
    rendered
}

#[cfg(test)]
mod tests {
    use scenic::RenderError;
    use scenic_parser::{
        Span,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_syntax_diagnostic_has_source() {
        let diag = Diagnostic::error("invalid JSON: trailing comma")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(12..13), "invalid JSON here");
        let err = ScenicError::new_parse_error(ParseError::from(diag), "{\"elements\":,}");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let reportable = &reportables[0];
        assert_eq!(reportable.to_string(), "invalid JSON: trailing comma");
        assert_eq!(reportable.code().unwrap().to_string(), "E001");
        assert!(reportable.source_code().is_some());
        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].offset(), 12);
    }

    #[test]
    fn test_validation_diagnostics_show_path() {
        let diags = vec![
            Diagnostic::error("missing required field `h`")
                .with_code(ErrorCode::E203)
                .with_path("/elements/0/h")
                .with_help("box elements require numeric `x`, `y`, `w` and `h`"),
            Diagnostic::error("unsupported element type `star`")
                .with_code(ErrorCode::E202)
                .with_path("/elements/1/type"),
        ];
        let err = ScenicError::new_parse_error(ParseError::from(diags), "{}");

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 2);
        assert_eq!(
            reportables[0].to_string(),
            "missing required field `h` (at /elements/0/h)"
        );
        assert_eq!(
            reportables[1].to_string(),
            "unsupported element type `star` (at /elements/1/type)"
        );
        assert!(reportables[0].help().is_some());
        assert!(reportables[0].source_code().is_none());
        assert!(reportables[0].labels().is_none());
    }

    #[test]
    fn test_warnings_keep_warning_severity() {
        let warnings = vec![
            Diagnostic::warning("style preset `broken` is not an object and is ignored")
                .with_path("/styles/broken"),
        ];

        let reportables = warnings_to_reportables(&warnings, "{}");

        assert_eq!(reportables.len(), 1);
        assert_eq!(reportables[0].severity(), Some(miette::Severity::Warning));
        assert_eq!(
            reportables[0].to_string(),
            "style preset `broken` is not an object and is ignored (at /styles/broken)"
        );
        assert!(reportables[0].code().is_none());
        assert!(render_report(&reportables[0]).contains("/styles/broken"));
    }

    #[test]
    fn test_errors_keep_error_severity() {
        let diag = Diagnostic::error("each element must be an object").with_path("/elements/0");
        let err = ScenicError::new_parse_error(ParseError::from(diag), "{}");

        let reportables = to_reportables(&err);

        assert_eq!(reportables[0].severity(), Some(miette::Severity::Error));
    }

    #[test]
    fn test_render_error() {
        let err = ScenicError::Render(RenderError::UnresolvedReference {
            arrow: "arrow-3".to_string(),
            target: "ghost".to_string(),
        });

        let reportables = to_reportables(&err);

        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "Render error: arrow `arrow-3` refs must point to existing elements: `ghost` not found"
                );
                assert_eq!(e.code().unwrap().to_string(), "scenic::render::reference");
                assert!(e.help().is_some());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }

    #[test]
    fn test_io_error_code() {
        let err = ScenicError::Io(std::io::Error::other("disk full"));

        let reportables = to_reportables(&err);

        assert_eq!(reportables[0].code().unwrap().to_string(), "scenic::io");
        assert!(reportables[0].help().is_none());
    }
}
