use synthax::rule::capture;
use synthax::tree::DigStep;
use synthax::{apply_tree, ApplyOptions, Rule};

#[test]
fn nested_captures_stay_within_parent_span() {
    let inner = capture(Rule::from_string("bc"), "inner");
    let outer = capture(Rule::from_char('a').then(inner).then(Rule::from_char('d')), "outer");

    let tree = apply_tree(
        "abcd",
        &outer,
        &ApplyOptions {
            exact: true,
            ..Default::default()
        },
    )
    .unwrap();

    let outer_node = &tree.children()[0];
    let inner_node = &outer_node.children()[0];
    assert!(outer_node.begin() <= inner_node.begin());
    assert!(inner_node.end() <= outer_node.end());
}

#[test]
fn custom_root_id_is_honored() {
    let opts = ApplyOptions {
        root_id: "document".to_string(),
        ..Default::default()
    };
    let tree = apply_tree("x", &Rule::from_char('x'), &opts).unwrap();
    assert_eq!(tree.id(), "document");
}

#[test]
fn offset_option_shifts_begin() {
    let opts = ApplyOptions {
        offset: 3,
        ..Default::default()
    };
    let tree = apply_tree("---abc", &Rule::from_string("abc"), &opts).unwrap();
    assert_eq!(tree.begin(), 3);
    assert_eq!(tree.end(), 6);
}

#[test]
fn dig_navigates_mixed_id_and_index_steps() {
    let inner = capture(Rule::from_string("bc"), "inner");
    let outer = capture(Rule::from_char('a').then(inner).then(Rule::from_char('d')), "outer");
    let tree = apply_tree(
        "abcd",
        &outer,
        &ApplyOptions {
            exact: true,
            ..Default::default()
        },
    )
    .unwrap();

    let steps = vec![DigStep::from(0usize), DigStep::from("inner")];
    let found = tree.dig(&steps).unwrap();
    assert_eq!(found.id(), "inner");
}

#[test]
fn inspect_renders_id_and_span_header() {
    let rule = capture(Rule::from_string("ab"), "pair");
    let tree = apply_tree("ab", &rule, &ApplyOptions::default()).unwrap();
    let rendered = tree.inspect();
    assert!(rendered.contains("root"));
    assert!(rendered.contains("pair"));
}
