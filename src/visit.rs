//! A single explicit visitor fold over a [`Tree`], in place of a
//! reflection-based dispatch over class hierarchies: callers supply the
//! per-node function directly rather than relying on naming conventions.

use crate::tree::Tree;

/// Fold `tree` bottom-up: `f` receives each node and the already-folded
/// results of its children, in order.
pub fn map<T>(tree: &Tree, f: &mut impl FnMut(&Tree, Vec<T>) -> T) -> T {
    let children: Vec<T> = tree.children().iter().map(|c| map(c, f)).collect();
    f(tree, children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::capture;
    use crate::apply::{apply_tree, ApplyOptions};
    use crate::rule::Rule;

    #[test]
    fn folds_bottom_up() {
        let digit = || capture(Rule::from_range('0', '9', false), "digit");
        let rule = digit().then(digit()).then(digit());
        let tree = apply_tree("123", &rule, &ApplyOptions::default()).unwrap();

        let count = map(&tree, &mut |_node, children: Vec<usize>| {
            1 + children.into_iter().sum::<usize>()
        });
        // root + 3 digit nodes
        assert_eq!(count, 4);
    }
}
