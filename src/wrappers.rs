//! Convenience shorthand built entirely on the core's public operations.
//! Not part of the core algebra — these are collaborators, and every one
//! of them could be written by a grammar author without touching
//! [`crate::rule`] internals.

use smol_str::SmolStr;

use crate::rule::{capture, Rule};

/// `r?` — zero or one.
pub fn maybe(r: Rule) -> Rule {
    r.times(0, Some(1), true)
}

/// `r*` — zero or more.
pub fn some(r: Rule) -> Rule {
    r.times(0, None, false)
}

/// `r+` — one or more.
pub fn many(r: Rule) -> Rule {
    r.times(1, None, false)
}

/// `r++by` — one or more `r`, separated by `by`.
pub fn sep(r: Rule, by: Rule) -> Rule {
    r.clone().then(some(by.then(r)))
}

/// A literal string, captured under its own text as the node id — the
/// shorthand for "match this exact string and remember that I did".
pub fn lit(s: &str) -> Rule {
    capture(Rule::from_string(s), SmolStr::new(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::{apply_tree, ApplyOptions};
    use crate::context::Context;
    use crate::cursor::Cursor;
    use crate::tree::Tree;

    fn ctx(input: &str) -> Context {
        Context::new(Cursor::new(input, 0), Tree::new("root", 0))
    }

    #[test]
    fn maybe_matches_zero_or_one() {
        let r = maybe(Rule::from_char('a'));
        assert_eq!(r.evaluate(&ctx("")).unwrap().progress(), 0);
        assert_eq!(r.evaluate(&ctx("a")).unwrap().progress(), 1);
        assert_eq!(r.evaluate(&ctx("aa")).unwrap().progress(), 1);
    }

    #[test]
    fn some_allows_zero() {
        let r = some(Rule::from_char('a'));
        assert_eq!(r.evaluate(&ctx("")).unwrap().progress(), 0);
        assert_eq!(r.evaluate(&ctx("aaa")).unwrap().progress(), 3);
    }

    #[test]
    fn many_requires_at_least_one() {
        let r = many(Rule::from_char('a'));
        assert!(r.evaluate(&ctx("")).is_err());
        assert_eq!(r.evaluate(&ctx("aaa")).unwrap().progress(), 3);
    }

    #[test]
    fn sep_requires_separator_between_items() {
        let r = sep(Rule::from_char('a'), Rule::from_char(','));
        assert_eq!(r.evaluate(&ctx("a,a,a")).unwrap().progress(), 5);
        assert_eq!(r.evaluate(&ctx("a")).unwrap().progress(), 1);
    }

    #[test]
    fn lit_captures_its_own_text_as_id() {
        let tree = apply_tree("true", &lit("true"), &ApplyOptions::default()).unwrap();
        assert!(tree.getattr_opt("true").is_none());
        assert_eq!(tree.children()[0].id(), "true");
        assert_eq!(tree.children()[0].begin(), 0);
        assert_eq!(tree.children()[0].end(), 4);
    }
}
