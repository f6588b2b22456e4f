use std::fs;
use std::path::{Path, PathBuf};

use expect_test::{Expect, expect, expect_file};
use verdant_errors::{ErrorCode, ErrorParameter, Severity};
use verdant_yellow::ast::{self, Node as _};
use verdant_yellow::{SyntaxKind, SyntaxTree, TextRange};

use crate::{parse, parse_with_max_depth};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "json" {
                    let expected = path.with_extension("tree");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

fn render(tree: &SyntaxTree) -> String {
    let mut actual = tree.root().debug_dump();
    if !tree.diagnostics().is_empty() {
        actual.push('\n');
        for diagnostic in tree.diagnostics() {
            actual.push_str(&format!("{diagnostic}\n"));
        }
    }
    actual
}

fn check(text: &str, expect: Expect) {
    expect.assert_eq(&render(&parse(text)));
}

fn check_diagnostics(text: &str, expect: Expect) {
    let tree = parse(text);
    let actual = tree.diagnostics().iter().map(|d| format!("{d}\n")).collect::<String>();
    expect.assert_eq(&actual);
}

fn root_value(tree: &SyntaxTree) -> ast::Value<'_> {
    ast::MultiValue::cast(tree.root()).unwrap().value()
}

#[test]
fn parse_test_data() {
    let cases = TestCase::list();
    assert!(!cases.is_empty());

    for case in cases {
        let tree = parse(&case.text);
        assert_eq!(tree.root().text(), case.text, "{}", case.input.display());
        expect_file![&case.expected].assert_eq(&render(&tree));
    }
}

#[test]
fn empty_input() {
    let tree = parse("");
    assert!(tree.diagnostics().is_empty());
    assert!(root_value(&tree).is_missing());
    check(
        "",
        expect![[r#"
            MULTI_VALUE@0..0
              VALUE_WITH_BACKGROUND@0..0
                BACKGROUND_LIST@0..0
                MISSING_VALUE@0..0
              BACKGROUND_LIST@0..0
        "#]],
    );
}

#[test]
fn empty_map() {
    let tree = parse("{}");
    assert!(tree.diagnostics().is_empty());

    let ast::Value::Map(map) = root_value(&tree) else { panic!("expected a map") };
    assert!(map.is_closed());
    let key_values = map.key_values().collect::<Vec<_>>();
    assert_eq!(key_values.len(), 1);
    assert!(key_values[0].key().value().is_missing());
    assert!(key_values[0].value().is_none());
    assert_eq!(key_values[0].valid_key(), None);
}

#[test]
fn trailing_comma_in_list() {
    let tree = parse("[1,2,]");
    assert!(tree.diagnostics().is_empty());

    let ast::Value::List(list) = root_value(&tree) else { panic!("expected a list") };
    let items = list.items().map(|item| item.value()).collect::<Vec<_>>();
    assert_eq!(items.len(), 3);
    assert!(matches!(items[0], ast::Value::Integer(value) if *value.value() == 1.into()));
    assert!(matches!(items[1], ast::Value::Integer(value) if *value.value() == 2.into()));
    assert!(items[2].is_missing());
}

#[test]
fn trailing_comma_in_map() {
    let tree = parse(r#"{"a":1,}"#);
    assert!(tree.diagnostics().is_empty());

    let ast::Value::Map(map) = root_value(&tree) else { panic!("expected a map") };
    assert_eq!(map.key_values().count(), 2);

    let member = map.get("a").unwrap();
    let ast::Value::Integer(value) = member.value().unwrap().value() else {
        panic!("expected an integer")
    };
    assert_eq!(*value.value(), 1.into());

    let trailing = map.key_values().nth(1).unwrap();
    assert!(trailing.key().value().is_missing());
}

#[test]
fn multiple_values() {
    let tree = parse("[1 2]");
    let [diagnostic] = tree.diagnostics() else { panic!("{:?}", tree.diagnostics()) };
    assert_eq!(diagnostic.code(), ErrorCode::MultipleValues);
    assert_eq!(diagnostic.range(), TextRange::new(3.into(), 4.into()));
    assert_eq!(diagnostic.severity(), Severity::Error);
}

#[test]
fn unrecognized_escape_sequence() {
    let tree = parse(r#""\q""#);
    let [diagnostic] = tree.diagnostics() else { panic!("{:?}", tree.diagnostics()) };
    assert_eq!(diagnostic.code(), ErrorCode::UnrecognizedEscapeSequence);
    assert_eq!(diagnostic.parameters(), [ErrorParameter::from("\\q")]);
    assert!(matches!(root_value(&tree), ast::Value::ErrorString(_)));
}

#[test]
fn too_deep() {
    let text = "[".repeat(41);
    let tree = parse(&text);
    let [diagnostic] = tree.diagnostics() else { panic!("{:?}", tree.diagnostics()) };
    assert_eq!(diagnostic.code(), ErrorCode::ParseTreeTooDeep);
    assert_eq!(diagnostic.range(), TextRange::new(40.into(), 41.into()));

    let root = tree.root();
    let background = ast::MultiValue::cast(root).unwrap().values().next().unwrap().background();
    let nodes = background.nodes().collect::<Vec<_>>();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), SyntaxKind::WHITESPACE);
    assert_eq!(nodes[0].text(), text);
    assert!(root_value(&tree).is_missing());
}

fn is_too_deep(tree: &SyntaxTree) -> bool {
    tree.diagnostics().iter().any(|d| d.code() == ErrorCode::ParseTreeTooDeep)
}

#[test]
fn depth_limit_is_inclusive() {
    let text = format!("{}{}", "[".repeat(40), "]".repeat(40));
    assert!(parse(&text).diagnostics().is_empty());

    for (open, too_deep) in [(39, false), (40, false), (41, true)] {
        assert_eq!(is_too_deep(&parse(&"[".repeat(open))), too_deep, "{open}");
    }

    assert!(parse_with_max_depth("1", 1).diagnostics().is_empty());
    assert!(parse_with_max_depth("[1]", 1).diagnostics().is_empty());

    let tree = parse_with_max_depth("[[1]]", 1);
    assert_eq!(tree.diagnostics().len(), 1);
    assert_eq!(tree.diagnostics()[0].code(), ErrorCode::ParseTreeTooDeep);

    let tree = parse_with_max_depth(r#"{"a": [1]}"#, 2);
    assert!(tree.diagnostics().is_empty());
}

#[test]
#[should_panic(expected = "maximum nesting depth must be at least 1")]
fn zero_max_depth() {
    parse_with_max_depth("[]", 0);
}

#[test]
fn list_recovery() {
    check_diagnostics(
        "[,1,,2 : 3",
        expect![[r#"
            error@1..2: missing value
            error@4..5: missing value
            error@7..8: ':' is not allowed in an array, expected ',' or ']'
            error@7..8: unexpected ':', expected end of input
            error@9..10: expected end of input
        "#]],
    );
    check_diagnostics(
        "[1, {]",
        expect![[r#"
            error@5..6: ']' is not allowed in an object, expected ',' or '}'
        "#]],
    );
}

#[test]
fn map_recovery() {
    check_diagnostics(
        r#"{,}"#,
        expect![[r#"
            error@1..2: missing property key
            error@1..2: missing value
        "#]],
    );
    check_diagnostics(
        r#"{"a"}"#,
        expect![[r#"
            error@4..5: missing value
        "#]],
    );
    check_diagnostics(
        r#"{: 1}"#,
        expect![[r#"
            error@4..5: missing property key
        "#]],
    );
    check_diagnostics(
        r#"{ true: 1, "b": 2"#,
        expect![[r#"
            error@2..6: property keys must be strings
            error@17..17: unexpected end of input, expected '}'
        "#]],
    );
}

#[test]
fn unassigned_code_points_separate_values() {
    check(
        "1\u{378}2",
        expect![[r#"
            MULTI_VALUE@0..4
              VALUE_WITH_BACKGROUND@0..1
                BACKGROUND_LIST@0..0
                INTEGER@0..1 "1"
              VALUE_WITH_BACKGROUND@1..4
                BACKGROUND_LIST@1..3
                  WHITESPACE@1..3 "\u{378}"
                INTEGER@3..4 "2"
              BACKGROUND_LIST@4..4

            error@3..4: expected end of input
        "#]],
    );
    check_diagnostics("[1,\u{e0080}2]", expect![""]);
    check_diagnostics(
        "\u{24b6}",
        expect![[r#"
            error@0..3: unexpected symbol 'Ⓐ'
        "#]],
    );
}

#[test]
fn unterminated_comment_is_a_warning() {
    let tree = parse("1 /* no end");
    let [diagnostic] = tree.diagnostics() else { panic!("{:?}", tree.diagnostics()) };
    assert_eq!(diagnostic.severity(), Severity::Warning);
    assert!(!tree.has_errors());
}

#[test]
fn diagnostics_are_sorted() {
    let tree = parse(r#"[null, "\x", 1 2, ="#);
    let starts = tree.diagnostics().iter().map(|d| d.start()).collect::<Vec<_>>();
    let mut sorted = starts.clone();
    sorted.sort();
    assert_eq!(starts, sorted);
    assert!(tree.diagnostics().len() >= 4);
}
