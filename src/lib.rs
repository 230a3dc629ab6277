//! A parser-combinator library: an embedded DSL for declaring grammars
//! that consume Unicode text and produce an immutable, labeled parse
//! tree.
//!
//! The core is small and closed: primitive matchers ([`Rule::from_char`],
//! [`Rule::from_range`], [`Rule::from_string`]) compose via a handful of
//! combinators ([`Rule::then`], [`Rule::or`], [`Rule::times`],
//! [`Rule::refusing`], [`rule::capture`], [`rule::keep`],
//! [`rule::tourney`], [`rule::ahead`]) into a grammar, which [`apply`]
//! evaluates against an input string to produce a [`tree::Tree`] or a
//! [`context::MatchError`].
//!
//! Everything under [`wrappers`], [`render`], and [`visit`] is a
//! collaborator built purely on the core's public operations — none of it
//! is required to understand or extend the rule algebra itself.

pub mod apply;
pub mod context;
pub mod cursor;
pub mod render;
pub mod rule;
pub mod trace;
pub mod tree;
pub mod visit;
pub mod wrappers;

pub use apply::{apply, apply_tree, apply_tree_or_throw, ApplyOptions};
pub use context::{Context, MatchError};
pub use cursor::Cursor;
pub use rule::{ahead, capture, keep, tourney, BranchMode, Rule};
pub use tree::{DigStep, Tree};
