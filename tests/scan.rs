use weft::scanner::{ScanState, Scanner};
use weft::{build, build_with, ByteSpan, Delims, DiagnosticKind, Position, Region};

const TEMPLATE: &str = r#"<html>
<body>
  <h1>{% title.to_uppercase() %}</h1>
  {% if user.is_admin { badge("admin") } %}
  <p>escaped: {% "literal %} inside string" %}</p>
  <ul>{% for item in items { render(item) } %}</ul>
</body>
</html>
"#;

fn spans(tree: &weft::SyntaxTree) -> Vec<(usize, usize)> {
    tree.regions()
        .iter()
        .map(|r| (r.span().start, r.span().end))
        .collect()
}

#[test]
fn plain_text_is_one_region() {
    let tree = build("plain text");
    assert_eq!(spans(&tree), vec![(0, 10)]);
    assert!(tree.regions()[0].is_text());
    assert!(tree.diagnostics().next().is_none());
}

#[test]
fn empty_document_has_no_regions() {
    let tree = build("");
    assert!(tree.is_empty());
    assert!(tree.regions().is_empty());
    assert!(tree.region_at(0).is_none());
}

#[test]
fn string_literal_hides_close_delimiter() {
    let doc = r#"{% let s = "%}"; %}"#;
    let tree = build(doc);
    assert_eq!(spans(&tree), vec![(0, doc.len())]);
    assert!(!tree.regions()[0].is_error());
}

#[test]
fn empty_expression_has_zero_length_content() {
    let tree = build("{%%}");
    assert_eq!(spans(&tree), vec![(0, 4)]);
    let content = tree.regions()[0].content().unwrap();
    assert_eq!(content, ByteSpan::new(2, 2));
    assert!(content.is_empty());
}

#[test]
fn adjacent_expressions_have_no_text_between() {
    let tree = build("{%a%}{%b%}");
    assert_eq!(spans(&tree), vec![(0, 5), (5, 10)]);
    assert!(tree.regions().iter().all(|r| r.is_expression()));
}

#[test]
fn unterminated_expression_is_an_error_node_to_eof() {
    let doc = "{% foo(bar { %}";
    let tree = build(doc);
    assert_eq!(spans(&tree), vec![(0, doc.len())]);
    let region = &tree.regions()[0];
    assert!(region.is_error());
    assert_eq!(
        region.diagnostics()[0].kind,
        DiagnosticKind::UnterminatedExpression
    );
    assert_eq!(region.diagnostics()[0].position, Position::start());
}

#[test]
fn nested_braces_do_not_split_the_region() {
    let doc = "{% if x { y } %}";
    let tree = build(doc);
    assert_eq!(spans(&tree), vec![(0, doc.len())]);
    assert!(!tree.regions()[0].is_error());
}

#[test]
fn comments_hide_close_delimiters() {
    let line = "{% x // %} }\n %}";
    assert_eq!(spans(&build(line)), vec![(0, line.len())]);

    let block = "{% x /* %} { */ %}";
    assert_eq!(spans(&build(block)), vec![(0, block.len())]);
}

#[test]
fn char_literal_hides_brace_but_lifetime_does_not_confuse() {
    let tree = build("{% '}' %}");
    assert_eq!(spans(&tree), vec![(0, 9)]);
    assert!(!tree.regions()[0].is_error());

    let tree = build("{% f::<'a>() %}");
    assert_eq!(spans(&tree), vec![(0, 15)]);
    assert!(!tree.regions()[0].is_error());
}

#[test]
fn stray_bracket_is_diagnosed_and_scanning_continues() {
    let tree = build("{% ) %} after");
    assert_eq!(spans(&tree), vec![(0, 7), (7, 13)]);
    let region = &tree.regions()[0];
    assert!(region.is_error());
    assert_eq!(
        region.diagnostics()[0].kind,
        DiagnosticKind::UnbalancedBracket { found: ')' }
    );
    assert!(tree.regions()[1].is_text());
}

#[test]
fn template_regions_and_content_handoff() {
    let tree = build(TEMPLATE);
    assert_eq!(tree.len(), TEMPLATE.len());
    assert_eq!(tree.reconstruct(TEMPLATE), TEMPLATE);
    assert!(tree.diagnostics().next().is_none());

    let contents: Vec<&str> = tree
        .regions()
        .iter()
        .filter_map(|r| r.content())
        .map(|c| c.slice(TEMPLATE))
        .collect();
    assert_eq!(
        contents,
        vec![
            " title.to_uppercase() ",
            r#" if user.is_admin { badge("admin") } "#,
            r#" "literal %} inside string" "#,
            " for item in items { render(item) } ",
        ]
    );

    // regions tile the document
    let mut at = 0;
    for region in tree.regions() {
        assert_eq!(region.span().start, at);
        at = region.span().end;
    }
    assert_eq!(at, TEMPLATE.len());
}

#[test]
fn region_at_locates_the_cursor() {
    let doc = "ab{% x %}cd";
    let tree = build(doc);
    assert!(tree.region_at(0).unwrap().is_text());
    assert!(tree.region_at(1).unwrap().is_text());
    assert!(tree.region_at(2).unwrap().is_expression());
    assert!(tree.region_at(8).unwrap().is_expression());
    assert!(tree.region_at(9).unwrap().is_text());
    assert!(tree.region_at(11).is_none());
}

#[test]
fn custom_delimiters_scan_equivalently() {
    let doc = r#"a << "s = >>"; >> b"#;
    let tree = build_with(doc, Delims::new("<<", ">>"));
    assert_eq!(spans(&tree), vec![(0, 2), (2, 17), (17, 19)]);
    assert!(!tree.regions()[1].is_error());
}

#[test]
fn line_and_column_positions_in_diagnostics() {
    let doc = "line one\nline two {% )";
    let tree = build(doc);
    let diags: Vec<_> = tree.diagnostics().collect();
    // stray bracket first, then the unterminated region itself
    assert_eq!(
        diags[0].kind,
        DiagnosticKind::UnbalancedBracket { found: ')' }
    );
    assert_eq!(diags[0].position.line, 2);
    assert_eq!(diags[0].position.column, 12);
    assert_eq!(diags[1].kind, DiagnosticKind::UnterminatedExpression);
    assert_eq!(diags[1].position, Position::locate(doc, 18));
}

#[test]
fn scanner_resume_reproduces_the_suffix() {
    let full: Vec<(Region, ScanState)> = Scanner::new(TEMPLATE, Delims::default()).collect();
    assert!(full.len() > 3);

    // resume at every emitted boundary and compare the remainder
    for i in 0..full.len() - 1 {
        let at = full[i].0.span().end;
        let resumed: Vec<(Region, ScanState)> = Scanner::resume(
            TEMPLATE,
            Delims::default(),
            Position::locate(TEMPLATE, at),
            full[i].1.clone(),
        )
        .collect();
        assert_eq!(resumed, full[i + 1..], "resume at byte {at}");
    }
}

#[cfg(feature = "serde")]
#[test]
fn tree_serializes_and_round_trips() {
    let tree = build("a{% x %}b{% ) %}");
    let json = serde_json::to_string(&tree).unwrap();
    let back: weft::SyntaxTree = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tree);
}
