//! Human-readable error rendering with a source-line readout. Not part of
//! the core contract — built entirely on [`MatchError`]'s public
//! `progress`/`char`/`line_and_column`.

use crate::context::MatchError;

/// Render `error` against `input` as a caret-annotated source excerpt,
/// e.g.:
/// ```text
/// parse error at line 2, column 5: unexpected 'x'
///   foo = "a", "b".
///       ^
/// ```
pub fn render(input: &str, error: &MatchError) -> String {
    let (line, col) = error.line_and_column(input);
    let source_line = input.lines().nth(line - 1).unwrap_or("");
    let caret = " ".repeat(col.saturating_sub(1)) + "^";
    let ch = error.char();
    format!(
        "parse error at line {line}, column {col}: unexpected {ch:?}\n  {source_line}\n  {caret}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::{apply, ApplyOptions};
    use crate::rule::Rule;

    #[test]
    fn renders_caret_at_failure_column() {
        let input = "a\nbx";
        let opts = ApplyOptions {
            exact: true,
            ..Default::default()
        };
        let rule = Rule::from_string("a\nbc");
        let err = apply(input, &rule, &opts).unwrap_err();
        let rendered = render(input, &err);
        assert!(rendered.contains("line 2, column 2"));
        assert!(rendered.contains("bx"));
    }
}
