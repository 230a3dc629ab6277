//! The persistent parse tree.
//!
//! A [`Tree`] is immutable once observed: every mutating-looking operation
//! (`adopt`, `setattr`, `terminate`) returns a new value and leaves prior
//! references untouched. Children and attributes live behind `Rc` so a
//! copy only pays for the one changed slot, not the whole subtree.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;
use smol_str::SmolStr;

/// An immutable, labeled span of the input with ordered children and
/// string attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    id: SmolStr,
    begin: usize,
    span: usize,
    children: Rc<Vec<Tree>>,
    attributes: Rc<HashMap<SmolStr, String>>,
}

impl Tree {
    /// A fresh, empty-span node with no children or attributes.
    pub fn new(id: impl Into<SmolStr>, begin: usize) -> Self {
        Self {
            id: id.into(),
            begin,
            span: 0,
            children: Rc::new(Vec::new()),
            attributes: Rc::new(HashMap::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn span(&self) -> usize {
        self.span
    }

    pub fn end(&self) -> usize {
        self.begin + self.span
    }

    /// Append `child` as the next child, returning a new tree.
    pub fn adopt(&self, child: Tree) -> Self {
        let mut children = (*self.children).clone();
        children.push(child);
        Self {
            children: Rc::new(children),
            ..self.clone()
        }
    }

    /// Insert or overwrite an attribute, returning a new tree.
    pub fn setattr(&self, name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        let mut attributes = (*self.attributes).clone();
        attributes.insert(name.into(), value.into());
        Self {
            attributes: Rc::new(attributes),
            ..self.clone()
        }
    }

    /// Fix this node's span so that it ends at character index `at`.
    ///
    /// Fatal (a programmer error) if `at` precedes `begin`: a node can
    /// never have a negative span once terminated.
    pub fn terminate(&self, at: usize) -> Self {
        assert!(
            at >= self.begin,
            "terminate({at}) precedes begin({}) for node {:?}",
            self.begin,
            self.id
        );
        Self {
            span: at - self.begin,
            ..self.clone()
        }
    }

    /// Required attribute lookup. Fatal if absent — grammars that read an
    /// attribute they didn't `keep` are buggy, not merely unlucky.
    pub fn getattr(&self, name: &str) -> &str {
        self.attributes
            .get(name)
            .unwrap_or_else(|| panic!("no such attribute {name:?} on node {:?}", self.id))
    }

    pub fn getattr_opt(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    /// Navigate by a mix of child ids (first matching child) and indices.
    pub fn dig(&self, steps: &[DigStep]) -> Option<&Tree> {
        let mut cur = self;
        for step in steps {
            cur = match step {
                DigStep::Id(name) => cur.children.iter().find(|c| c.id() == name.as_str())?,
                DigStep::Index(i) => cur.children.get(*i)?,
            };
        }
        Some(cur)
    }

    /// Required `dig`. Fatal if the path doesn't resolve.
    pub fn dig_or(&self, steps: &[DigStep]) -> &Tree {
        self.dig(steps)
            .unwrap_or_else(|| panic!("dig path {steps:?} did not resolve on node {:?}", self.id))
    }

    /// Multi-line indented rendering: `id ⸢begin-end⸥` headers with
    /// `key="value"` attribute pairs, children indented beneath.
    pub fn inspect(&self) -> String {
        let mut out = string_builder::Builder::default();
        self.inspect_into(&mut out, 0);
        out.string().unwrap_or_default()
    }

    fn inspect_into(&self, out: &mut string_builder::Builder, depth: usize) {
        let indent = "  ".repeat(depth);
        out.append(indent.clone());
        out.append(self.id.to_string());
        out.append(format!(" \u{2e22}{}-{}\u{2e25}", self.begin, self.end()));
        for (k, v) in self.attributes.iter().sorted_by_key(|(k, _)| k.as_str()) {
            out.append(format!(" {k}=\"{v}\""));
        }
        out.append("\n");
        for child in self.children.iter() {
            child.inspect_into(out, depth + 1);
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

/// A single step in a [`Tree::dig`] path.
#[derive(Clone, Debug)]
pub enum DigStep {
    Id(SmolStr),
    Index(usize),
}

impl From<&str> for DigStep {
    fn from(s: &str) -> Self {
        DigStep::Id(SmolStr::new(s))
    }
}

impl From<usize> for DigStep {
    fn from(i: usize) -> Self {
        DigStep::Index(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_has_zero_span() {
        let t = Tree::new("root", 0);
        assert_eq!(t.span(), 0);
        assert_eq!(t.end(), 0);
        assert!(t.children().is_empty());
    }

    #[test]
    fn adopt_is_persistent() {
        let parent = Tree::new("p", 0);
        let child = Tree::new("c", 0).terminate(1);
        let with_child = parent.adopt(child.clone());
        assert!(parent.children().is_empty());
        assert_eq!(with_child.children().len(), 1);
        assert_eq!(with_child.children()[0], child);
    }

    #[test]
    fn setattr_is_persistent() {
        let t = Tree::new("x", 0);
        let t2 = t.setattr("k", "v");
        assert!(t.getattr_opt("k").is_none());
        assert_eq!(t2.getattr("k"), "v");
    }

    #[test]
    #[should_panic(expected = "precedes begin")]
    fn terminate_before_begin_is_fatal() {
        Tree::new("x", 5).terminate(3);
    }

    #[test]
    fn dig_navigates_by_id_and_index() {
        let leaf = Tree::new("leaf", 2).terminate(3);
        let mid = Tree::new("mid", 0).adopt(leaf.clone());
        let root = Tree::new("root", 0).adopt(mid.clone());
        let steps = vec![DigStep::from("mid"), DigStep::from(0usize)];
        assert_eq!(root.dig(&steps), Some(&leaf));
        assert_eq!(root.dig(&[DigStep::from("nope")]), None);
    }
}
