use quantgrid_parse::{
    LineKind, RestrictedParse, classify_line, normalize_text, parse_restricted, parse_unified,
    tokenize,
};

/// Any statement containing `*` or `/` must be answered by the unified
/// grammar, and the restricted parser must have signalled fallback rather
/// than producing a tree.
#[test]
fn fallback_routing_for_mul_div() {
    let cases = [
        "2 + 3 * 4",
        "6 / 2",
        "x = 2 * 3",
        "(1 + 2) / 3",
        "5 m * 2",
    ];
    for text in cases {
        assert_eq!(
            parse_restricted(&tokenize(text)),
            RestrictedParse::NeedsFullGrammar,
            "restricted grammar must refuse {text:?}"
        );
        parse_unified(text).unwrap_or_else(|e| panic!("unified grammar rejects {text:?}: {e}"));
    }
}

/// Input the fast path can answer must parse to the same statement the full
/// grammar produces, so routing never changes the result.
#[test]
fn fast_path_agrees_with_full_grammar() {
    let cases = ["5 in + 4 in", "A = 5 in", "1 + 2 - 3", "x = 2 kip/ft + 1 kip/ft"];
    for text in cases {
        let RestrictedParse::Parsed(fast) = parse_restricted(&tokenize(text)) else {
            panic!("restricted grammar should handle {text:?}");
        };
        let full = parse_unified(text).expect("unified parse");
        assert_eq!(fast, full, "grammars disagree on {text:?}");
    }
}

#[test]
fn normalized_punctuation_reaches_the_grammar() {
    // Unicode minus and multiplication sign fold before lexing.
    let text = normalize_text("7 \u{2212} 2 \u{00D7} 3");
    let stmt = parse_unified(&text).expect("parse normalized text");
    assert_eq!(stmt.to_string(), "(7 - (2 * 3))");
}

#[test]
fn classifier_is_independent_of_parse_outcome() {
    // Classified as Expression, yet unparseable: the classifier only sniffs.
    let text = "C3 + +";
    assert_eq!(classify_line(text), LineKind::Expression);
    assert!(parse_unified(text).is_err());
}

#[test]
fn malformed_lines_produce_one_positioned_error() {
    for text in ["2 +", "* 3", "(1 + 2", "2 § 2"] {
        let err = parse_unified(text).expect_err(&format!("{text:?} should fail"));
        assert!(!err.message.is_empty());
    }
}
