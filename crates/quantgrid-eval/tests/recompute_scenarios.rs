//! End-to-end document recompute scenarios driven through the public API.

use quantgrid_common::{CellAddress, Quantity};
use quantgrid_eval::{recompute, Document, EmptyGrid, LineKind, Namespace};

fn run(texts: &[&str]) -> Document {
    let mut doc = Document::new();
    for (i, text) in texts.iter().enumerate() {
        doc.push_line(format!("line-{i}"), *text);
    }
    let mut ns = Namespace::new();
    recompute(&mut doc, &mut ns, &EmptyGrid);
    doc
}

#[test]
fn definitions_then_uses() {
    let doc = run(&["A = 5 in", "B = 2 in", "A + B", "A + 10 kN"]);

    assert_eq!(doc.lines[0].formatted.as_deref(), Some("5\u{2009}in"));
    assert_eq!(doc.lines[1].formatted.as_deref(), Some("2\u{2009}in"));
    assert_eq!(doc.lines[2].formatted.as_deref(), Some("7\u{2009}in"));

    let out = doc.lines[3].outcome();
    assert!(out.error.unwrap().contains("unit mismatch"));
    assert!(out.result.is_none());
}

#[test]
fn mixed_units_of_one_dimension_convert() {
    let doc = run(&["span = 5 in + 1 ft"]);
    // 5 in + 1 ft = 17 in, carried in the left operand's unit.
    assert_eq!(doc.lines[0].formatted.as_deref(), Some("17\u{2009}in"));
}

#[test]
fn full_grammar_lines_evaluate() {
    let doc = run(&[
        "w = 2 kip/ft",
        "L = 12 ft",
        "M = w * L * L / 8",
        "M / (1 ft)",
    ]);

    assert!(doc.lines.iter().all(|l| l.error.is_none()));
    let m = doc.lines[2].result.as_ref().unwrap();
    // 2 kip/ft * (12 ft)^2 / 8 = 36 kip-ft.
    let kip_ft = Quantity::from_unit(1.0, "kip").unwrap().magnitude_si * 0.3048;
    assert!((m.magnitude_si - 36.0 * kip_ft).abs() < 1e-6);
}

#[test]
fn ordering_is_significant() {
    let doc = run(&["B + 1 in", "B = 3 in"]);
    assert!(doc.lines[0]
        .error
        .as_deref()
        .unwrap()
        .contains("unknown identifier 'B'"));
    assert!(doc.lines[1].error.is_none());
}

#[test]
fn editing_the_defining_line_invalidates_dependents() {
    let texts = ["C = 4 in", "C * 2"];
    let mut doc = Document::new();
    for (i, text) in texts.iter().enumerate() {
        doc.push_line(format!("line-{i}"), *text);
    }
    let mut ns = Namespace::new();

    recompute(&mut doc, &mut ns, &EmptyGrid);
    assert_eq!(doc.lines[1].formatted.as_deref(), Some("8\u{2009}in"));

    doc.lines[0].raw_text = "just a note now".to_string();
    recompute(&mut doc, &mut ns, &EmptyGrid);
    assert_eq!(doc.lines[0].kind, LineKind::Text);
    assert!(doc.lines[1]
        .error
        .as_deref()
        .unwrap()
        .contains("unknown identifier"));
}

#[test]
fn cell_references_pull_text_from_the_grid() {
    let grid = |addr: CellAddress| match (addr.row, addr.col) {
        (0, 0) => "10 mm".to_string(),
        (1, 0) => "5 mm".to_string(),
        _ => String::new(),
    };

    let mut doc = Document::new();
    doc.push_line("line-0", "A1 + A2");
    doc.push_line("line-1", "A1 + Z99");
    let mut ns = Namespace::new();
    recompute(&mut doc, &mut ns, &grid);

    assert_eq!(doc.lines[0].formatted.as_deref(), Some("15\u{2009}mm"));
    assert!(doc.lines[1]
        .error
        .as_deref()
        .unwrap()
        .contains("unresolved cell reference Z99"));
}

#[test]
fn self_referential_grid_content_lands_as_a_line_error() {
    // A cell whose text references itself must resolve to an error on the
    // line, not hang or crash the pass.
    let grid = |addr: CellAddress| {
        if addr == CellAddress::new(0, 0) {
            "A1 + 1".to_string()
        } else {
            String::new()
        }
    };

    let mut doc = Document::new();
    doc.push_line("line-0", "A1 + 2");
    let mut ns = Namespace::new();
    recompute(&mut doc, &mut ns, &grid);

    assert!(doc.lines[0]
        .error
        .as_deref()
        .unwrap()
        .contains("unresolved cell reference A1"));
}

#[test]
fn small_magnitudes_render_in_scientific_notation() {
    let doc = run(&["0.3 mm + 0 mm"]);
    // 0.3 mm carries its own unit, so it stays fixed-point in mm.
    assert_eq!(doc.lines[0].formatted.as_deref(), Some("0.3\u{2009}mm"));

    let doc = run(&["0.0003 m + 0 m"]);
    assert_eq!(doc.lines[0].formatted.as_deref(), Some("3.000e-4\u{2009}m"));
}

#[test]
fn division_by_zero_is_reported() {
    let doc = run(&["1 / 0"]);
    assert_eq!(doc.lines[0].error.as_deref(), Some("division by zero"));
}

#[test]
fn plain_arithmetic_is_dimensionless() {
    let doc = run(&["2 + 3 * 4"]);
    assert_eq!(doc.lines[0].formatted.as_deref(), Some("14"));
    assert!(doc.lines[0].result.as_ref().unwrap().is_dimensionless());
}
