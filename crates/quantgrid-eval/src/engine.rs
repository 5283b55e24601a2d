//! Document model and the full top-down recompute pass.

use quantgrid_common::Quantity;
use quantgrid_parse::{
    classify_line, normalize_text, parse_restricted, parse_tokens, tokenize, LineKind,
    RestrictedParse, Stmt,
};

use crate::format::format_quantity;
use crate::interpreter::Interpreter;
use crate::namespace::Namespace;
use crate::traits::CellResolver;

/// One line of input plus its derived outputs. `id` is a stable key used
/// for namespace ownership; it survives edits to `raw_text`.
#[derive(Debug, Clone, Default)]
pub struct Line {
    pub id: String,
    pub raw_text: String,
    pub kind: LineKind,
    pub result: Option<Quantity>,
    pub formatted: Option<String>,
    pub error: Option<String>,
}

impl Line {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Line {
            id: id.into(),
            raw_text: raw_text.into(),
            ..Line::default()
        }
    }

    /// Borrowed view of the derived outputs, for host display code.
    pub fn outcome(&self) -> LineOutcome<'_> {
        LineOutcome {
            kind: self.kind,
            result: self.result.as_ref(),
            formatted: self.formatted.as_deref(),
            error: self.error.as_deref(),
        }
    }

    fn clear_outputs(&mut self) {
        self.result = None;
        self.formatted = None;
        self.error = None;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LineOutcome<'a> {
    pub kind: LineKind,
    pub result: Option<&'a Quantity>,
    pub formatted: Option<&'a str>,
    pub error: Option<&'a str>,
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub lines: Vec<Line>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    pub fn push_line(&mut self, id: impl Into<String>, raw_text: impl Into<String>) -> &mut Line {
        let idx = self.lines.len();
        self.lines.push(Line::new(id, raw_text));
        &mut self.lines[idx]
    }
}

/// Re-derive every line's outputs from scratch, top to bottom.
///
/// A full pass is the consistency mechanism: definitions owned by each line
/// are cleared up front, then rebuilt in document order, so stale names can
/// never survive an edit and ordering sensitivity falls out naturally (a
/// use before its definition sees an unknown identifier).
///
/// Per line: classify, and for non-text lines normalize, try the restricted
/// quantity grammar first, and fall back to the unified grammar when the
/// fast path declines or fails. Evaluation errors land on the line; this
/// function itself never fails.
pub fn recompute(doc: &mut Document, namespace: &mut Namespace, resolver: &dyn CellResolver) {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("recompute", lines = doc.lines.len()).entered();

    for line in &doc.lines {
        namespace.clear_cell(&line.id);
    }

    for line in &mut doc.lines {
        line.kind = classify_line(&line.raw_text);
        if line.kind == LineKind::Text {
            line.clear_outputs();
            continue;
        }

        let normalized = normalize_text(&line.raw_text);
        let tokens = tokenize(&normalized);
        let parsed: Result<Stmt, _> = match parse_restricted(&tokens) {
            RestrictedParse::Parsed(stmt) => Ok(stmt),
            // Anything the fast path cannot express gets a second chance in
            // the full grammar, whose diagnostic is the one worth keeping.
            RestrictedParse::NeedsFullGrammar | RestrictedParse::Failed(_) => {
                parse_tokens(&tokens)
            }
        };

        let stmt = match parsed {
            Ok(stmt) => stmt,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(line = %line.id, %err, "parse failed");
                line.clear_outputs();
                line.error = Some(err.to_string());
                continue;
            }
        };

        let evaluated = Interpreter::new(namespace, resolver).evaluate_stmt(&stmt);
        match evaluated {
            Ok(value) => {
                line.formatted = Some(format_quantity(&value, None));
                line.result = Some(value.clone());
                line.error = None;
                if let Some(name) = stmt.defined_name() {
                    namespace.define(name, value, line.id.clone());
                }
            }
            Err(err) => {
                line.clear_outputs();
                line.error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::EmptyGrid;

    fn doc_of(texts: &[&str]) -> Document {
        let mut doc = Document::new();
        for (i, text) in texts.iter().enumerate() {
            doc.push_line(format!("line-{i}"), *text);
        }
        doc
    }

    #[test]
    fn definitions_flow_downward() {
        let mut doc = doc_of(&["A = 5 in", "A + 1 in"]);
        let mut ns = Namespace::new();
        recompute(&mut doc, &mut ns, &EmptyGrid);

        assert_eq!(doc.lines[1].formatted.as_deref(), Some("6\u{2009}in"));
        assert!(doc.lines[1].error.is_none());
    }

    #[test]
    fn use_before_definition_fails() {
        let mut doc = doc_of(&["B + 1 in", "B = 3 in"]);
        let mut ns = Namespace::new();
        recompute(&mut doc, &mut ns, &EmptyGrid);

        assert!(doc.lines[0]
            .error
            .as_deref()
            .unwrap()
            .contains("unknown identifier"));
        assert!(doc.lines[1].error.is_none());
    }

    #[test]
    fn text_lines_carry_no_outputs() {
        let mut doc = doc_of(&["notes about the beam", "A = 1 in"]);
        let mut ns = Namespace::new();
        recompute(&mut doc, &mut ns, &EmptyGrid);

        assert_eq!(doc.lines[0].kind, LineKind::Text);
        assert!(doc.lines[0].result.is_none());
        assert!(doc.lines[0].error.is_none());
        assert_eq!(doc.lines[1].kind, LineKind::Definition);
    }

    #[test]
    fn redefining_a_name_elsewhere_invalidates_the_old_owner() {
        let mut doc = doc_of(&["C = 2 in", "C + 1 in"]);
        let mut ns = Namespace::new();
        recompute(&mut doc, &mut ns, &EmptyGrid);
        assert!(doc.lines[1].error.is_none());

        // Edit line 0 so it no longer defines C; the stale binding must not
        // survive into the next pass.
        doc.lines[0].raw_text = "D = 2 in".to_string();
        recompute(&mut doc, &mut ns, &EmptyGrid);
        assert!(doc.lines[1]
            .error
            .as_deref()
            .unwrap()
            .contains("unknown identifier"));
    }

    #[test]
    fn parse_errors_attach_to_the_line() {
        let mut doc = doc_of(&["5 + * 2"]);
        let mut ns = Namespace::new();
        recompute(&mut doc, &mut ns, &EmptyGrid);

        assert!(doc.lines[0].error.is_some());
        assert!(doc.lines[0].result.is_none());
    }
}
