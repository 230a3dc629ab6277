//! A JSON-consumer grammar, demonstrating recursive `ahead` definitions,
//! `keep` for primitive values, and a reduction fold (root -> first child;
//! number/string -> primitive; object -> merged map of pair children;
//! array -> children).

use std::collections::HashMap;

use synthax::rule::{ahead, capture, keep, tourney};
use synthax::wrappers::{many, maybe, sep, some};
use synthax::{apply_tree, ApplyOptions, Rule, Tree};

fn ws() -> Rule {
    let one = Rule::from_char(' ')
        .or(Rule::from_char('\t'))
        .or(Rule::from_char('\n'))
        .or(Rule::from_char('\r'));
    some(one)
}

fn digits() -> Rule {
    many(Rule::from_range('0', '9', false))
}

fn number() -> Rule {
    let sign = maybe(Rule::from_char('-'));
    let int_part = digits();
    let frac = maybe(Rule::from_char('.').then(digits()));
    let exp = maybe(
        (Rule::from_char('e').or(Rule::from_char('E')))
            .then(maybe(Rule::from_char('+').or(Rule::from_char('-'))))
            .then(digits()),
    );
    capture(keep(sign.then(int_part).then(frac).then(exp), "value"), "number")
}

fn string_body() -> Rule {
    let escape = Rule::from_char('\\').then(Rule::from_range('\u{0}', '\u{10ffff}', false));
    let plain = Rule::from_range('\u{20}', '\u{10ffff}', false).refusing(Rule::from_char('"'));
    some(escape.or(plain))
}

fn string() -> Rule {
    capture(
        Rule::from_char('"')
            .then(keep(string_body(), "value"))
            .then(Rule::from_char('"')),
        "string",
    )
}

/// Build the JSON grammar. Returns the top-level `value` rule.
pub fn grammar() -> Rule {
    let value = ahead();

    let pair = capture(
        ws()
            .then(string())
            .then(ws())
            .then(Rule::from_char(':'))
            .then(ws())
            .then(value.clone())
            .then(ws()),
        "pair",
    );
    let object = capture(
        Rule::from_char('{')
            .then(ws())
            .then(maybe(sep(pair, Rule::from_char(','))))
            .then(ws())
            .then(Rule::from_char('}')),
        "object",
    );

    let array = capture(
        Rule::from_char('[')
            .then(ws())
            .then(maybe(sep(
                ws().then(value.clone()).then(ws()),
                Rule::from_char(','),
            )))
            .then(ws())
            .then(Rule::from_char(']')),
        "array",
    );

    let boolean = tourney(vec![
        capture(Rule::from_string("true"), "true"),
        capture(Rule::from_string("false"), "false"),
    ]);
    let null = capture(Rule::from_string("null"), "null");

    value.put(
        number()
            .or(string())
            .or(object)
            .or(array)
            .or(boolean)
            .or(null),
    );

    value
}

/// A reduced JSON value, produced by folding the parse tree bottom-up.
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Json>),
    Object(HashMap<String, Json>),
}

/// root -> first child; number/string -> primitive; object -> merged map
/// of pair children; array -> children.
pub fn reduce(tree: &Tree) -> Json {
    match tree.id() {
        "root" => reduce(&tree.children()[0]),
        "number" => Json::Number(tree.getattr("value").parse().expect("keep() guarantees a numeral")),
        "string" => Json::String(tree.getattr("value").to_string()),
        "true" => Json::Bool(true),
        "false" => Json::Bool(false),
        "null" => Json::Null,
        "array" => Json::Array(tree.children().iter().map(reduce).collect()),
        "object" => {
            let mut map = HashMap::new();
            for pair in tree.children() {
                let key_tree = &pair.children()[0];
                let key = key_tree.getattr("value").to_string();
                let value_tree = &pair.children()[1];
                map.insert(key, reduce(value_tree));
            }
            Json::Object(map)
        }
        other => panic!("unexpected node in json tree: {other:?}"),
    }
}

pub fn parse(input: &str) -> Result<Json, String> {
    let tree = apply_tree(
        input,
        &grammar(),
        &ApplyOptions {
            exact: true,
            ..Default::default()
        },
    )
    .ok_or_else(|| format!("invalid JSON: {input:?}"))?;
    Ok(reduce(&tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitives() {
        assert_eq!(parse("null").unwrap(), Json::Null);
        assert_eq!(parse("true").unwrap(), Json::Bool(true));
        assert_eq!(parse("-12.5e+3").unwrap(), Json::Number(-12500.0));
        assert_eq!(parse("\"hi\"").unwrap(), Json::String("hi".to_string()));
    }

    #[test]
    fn parses_a_string_value_containing_a_space() {
        assert_eq!(
            parse("\"hello world\"").unwrap(),
            Json::String("hello world".to_string())
        );
    }

    #[test]
    fn parses_array_and_object() {
        assert_eq!(
            parse("[1, 2, 3]").unwrap(),
            Json::Array(vec![Json::Number(1.0), Json::Number(2.0), Json::Number(3.0)])
        );
        let obj = parse(r#"{"a": 1, "b": true}"#).unwrap();
        match obj {
            Json::Object(map) => {
                assert_eq!(map.get("a"), Some(&Json::Number(1.0)));
                assert_eq!(map.get("b"), Some(&Json::Bool(true)));
            }
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse("{").is_err());
        assert!(parse("[1, ]").is_err());
    }

    #[test]
    fn tolerates_whitespace_between_tokens() {
        let input = indoc::indoc! {r#"
            {
                "a": 1,
                "b": [true, false, null]
            }
        "#};
        let obj = parse(input.trim()).unwrap();
        match obj {
            Json::Object(map) => {
                assert_eq!(map.get("a"), Some(&Json::Number(1.0)));
                assert_eq!(
                    map.get("b"),
                    Some(&Json::Array(vec![Json::Bool(true), Json::Bool(false), Json::Null]))
                );
            }
            other => panic!("expected object, got {other:?}"),
        }
    }
}
