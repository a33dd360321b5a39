//! Integration tests for resolving cursor positions to YAML paths.

use rstest::rstest;
use yamlpath_copier::diagnostics::RecordingSink;
use yamlpath_copier::yamlpath::{find_yaml_path, find_yaml_path_with, PathSegment, Position};
use yamlpath_copier::Error;

fn resolve(text: &str, line: usize, character: usize) -> Option<String> {
    find_yaml_path(text, Position::new(line, character))
        .unwrap()
        .map(|path| path.to_string())
}

#[rstest]
#[case::scalar_in_nested_mapping("{a: {b: 1}}", 0, 8, Some("a.b"))]
#[case::right_after_scalar("{a: {b: 1}}", 0, 9, Some("a.b"))]
#[case::flow_sequence_item("{a: [10, 20, 30]}", 0, 9, Some("a[1]"))]
#[case::inside_flow_sequence_item("{a: [10, 20, 30]}", 0, 10, Some("a[1]"))]
#[case::mapping_inside_sequence("{a: [ {b: 1}, {b: 2} ]}", 0, 18, Some("a[1].b"))]
#[case::top_level_sequence("- x\n- y", 1, 2, Some("[1]"))]
#[case::nested_top_level_sequences("- [a, b]\n- [c, d]", 1, 6, Some("[1][1]"))]
#[case::key_of_block_mapping("server:\n  port: 8080", 1, 3, Some("server.port"))]
#[case::outer_key("server:\n  port: 8080", 0, 2, Some("server"))]
#[case::value_of_block_mapping("server:\n  port: 8080", 1, 9, Some("server.port"))]
#[case::quoted_key("\"my key\": 1", 0, 10, Some("my key"))]
#[case::block_scalar_body("script: |\n  echo hi\nnext: 1\n", 1, 4, Some("script"))]
#[case::literal_block_second_line("a: |\n  one\n  two\nb: 1", 2, 3, Some("a"))]
#[case::folded_block_later_line("a: >-\n  folded\n  text\nb: 1", 2, 3, Some("a"))]
#[case::block_scalar_header("a: |\n  one\nb: 1", 0, 3, Some("a"))]
#[case::key_after_block_scalar("a: |\n  one\n  two\nb: 1", 3, 0, Some("b"))]
#[case::key_after_empty_block_scalar("a: |\nb: 1", 1, 3, Some("b"))]
#[case::first_key_of_block_mapping("a: 1\nb: two", 0, 0, Some("a"))]
#[case::first_key_in_sequence_item("- a: 1\n  b: 2\n", 0, 2, Some("[0].a"))]
#[case::key_of_tagged_value("a: !!str 5", 0, 0, Some("a"))]
#[case::tagged_value("a: !!str 5", 0, 9, Some("a"))]
#[case::alias_value("base: &b 1\nref: *b", 1, 6, Some("ref"))]
#[case::key_without_value("a:\nb: 1", 0, 1, Some("a"))]
#[case::gap_between_key_and_value("a: 1", 0, 2, None)]
#[case::past_end_of_document("a: 1\n\n\n", 2, 0, None)]
#[case::bare_scalar_document("hello", 0, 2, None)]
#[case::empty_document("", 0, 0, None)]
#[case::on_sequence_dash("- x\n- y", 1, 0, None)]
fn test_resolves(
    #[case] text: &str,
    #[case] line: usize,
    #[case] character: usize,
    #[case] expected: Option<&str>,
) {
    assert_eq!(resolve(text, line, character).as_deref(), expected);
}

#[test]
fn test_compose_file_port() {
    let text = "\
version: '3'
services:
  web:
    image: nginx
    ports:
      - \"80:80\"
      - \"443:443\"
  db:
    image: postgres
";
    assert_eq!(resolve(text, 5, 9).as_deref(), Some("services.web.ports[0]"));
    assert_eq!(resolve(text, 6, 10).as_deref(), Some("services.web.ports[1]"));
    assert_eq!(resolve(text, 8, 13).as_deref(), Some("services.db.image"));
    assert_eq!(resolve(text, 7, 2).as_deref(), Some("services.db"));
    assert_eq!(resolve(text, 0, 10).as_deref(), Some("version"));
}

#[test]
fn test_sequence_of_block_mappings() {
    let text = "steps:\n  - name: build\n    run: make\n  - name: test\n    run: make test\n";
    assert_eq!(resolve(text, 2, 10).as_deref(), Some("steps[0].run"));
    assert_eq!(resolve(text, 3, 5).as_deref(), Some("steps[1].name"));
    assert_eq!(resolve(text, 4, 12).as_deref(), Some("steps[1].run"));
}

#[test]
fn test_crlf_line_endings() {
    let text = "a:\r\n  b: 1\r\n  c: 2\r\n";
    assert_eq!(resolve(text, 1, 5).as_deref(), Some("a.b"));
    assert_eq!(resolve(text, 2, 5).as_deref(), Some("a.c"));
}

#[test]
fn test_multibyte_text_before_cursor() {
    let text = "名前: 値\nkey: value";
    assert_eq!(resolve(text, 1, 6).as_deref(), Some("key"));
}

#[test]
fn test_segments_are_typed() {
    let path = find_yaml_path("a: [x, y]", Position::new(0, 7))
        .unwrap()
        .unwrap();
    assert_eq!(
        path.segments(),
        &[PathSegment::key("a"), PathSegment::Index(1)]
    );
}

#[test]
fn test_resolution_is_deterministic() {
    let text = "a:\n  - b: 1\n  - b: 2\n";
    let position = Position::new(2, 7);
    let first = find_yaml_path(text, position).unwrap();
    let second = find_yaml_path(text, position).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.unwrap().to_string(), "a[1].b");
}

#[test]
fn test_malformed_yaml_reports_parse_failure() {
    let result = find_yaml_path("a: [1, 2\nb: {", Position::new(0, 1));
    assert!(matches!(result, Err(Error::Parse { .. })));
}

#[test]
fn test_stale_position_is_reported() {
    let result = find_yaml_path("a: 1\n", Position::new(5, 0));
    assert_eq!(
        result,
        Err(Error::StalePosition {
            line: 5,
            character: 0
        })
    );

    let result = find_yaml_path("a: 1\n", Position::new(0, 40));
    assert!(matches!(result, Err(Error::StalePosition { .. })));
}

#[test]
fn test_trace_goes_to_injected_sink() {
    let sink = RecordingSink::new();
    let path = find_yaml_path_with("a: {b: 1}", Position::new(0, 7), &sink)
        .unwrap()
        .unwrap();
    assert_eq!(path.to_string(), "a.b");

    let lines = sink.lines();
    assert_eq!(lines[0], "Offset: 7");
    assert!(lines.contains(&"  Found value for key: b".to_string()));
    assert_eq!(lines.last().map(String::as_str), Some("Final path: a.b"));
}
