//! The evaluation context and the error value rule evaluation returns on
//! failure.

use std::error::Error as StdError;
use std::fmt;

use crate::cursor::Cursor;
use crate::tree::Tree;

/// A cursor paired with the tree-under-construction.
///
/// `Context` is value-typed: every operation returns a new context, and
/// backtracking is simply discarding an advanced one in favor of an
/// earlier one the caller still holds.
#[derive(Clone, Debug)]
pub struct Context {
    cursor: Cursor,
    root: Tree,
}

impl Context {
    pub fn new(cursor: Cursor, root: Tree) -> Self {
        Self { cursor, root }
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn root(&self) -> &Tree {
        &self.root
    }

    pub fn into_root(self) -> Tree {
        self.root
    }

    /// Current character the cursor is positioned at.
    pub fn char(&self) -> char {
        self.cursor.char()
    }

    /// How far into the input this context has advanced.
    pub fn progress(&self) -> usize {
        self.cursor.position()
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Return a context with the same cursor but a fresh root tree, for a
    /// capture to accumulate into.
    pub fn rebase(&self, id: impl Into<smol_str::SmolStr>) -> Self {
        Self {
            cursor: self.cursor.clone(),
            root: Tree::new(id, self.cursor.position()),
        }
    }

    /// Close this context's root so its span ends at the current position.
    pub fn terminate(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            root: self.root.terminate(self.cursor.position()),
        }
    }

    /// Advance the cursor by one character.
    pub fn advance(&self) -> Self {
        Self {
            cursor: self.cursor.advance(),
            root: self.root.clone(),
        }
    }

    /// Incorporate a successful descendant context's sub-root as this
    /// context's next child.
    ///
    /// `other` must be a context from a successful sub-evaluation of the
    /// same input. The returned cursor is whichever of `self`/`other` made
    /// more progress — this is what propagates forward motion out of a
    /// sub-evaluation back into the enclosing one.
    pub fn adopt(&self, other: &Context) -> Self {
        let terminated = other.terminate();
        let cursor = if terminated.cursor.position() >= self.cursor.position() {
            terminated.cursor.clone()
        } else {
            self.cursor.clone()
        };
        Self {
            cursor,
            root: self.root.adopt(terminated.root),
        }
    }
}

/// The furthest-progress failure of a rule evaluation.
///
/// Value-typed and non-fatal: ordinary control flow for `Branch`/`Repeat`,
/// never thrown. Carries the context at the point a primitive rejected.
#[derive(Clone, Debug)]
pub struct MatchError {
    ctx: Context,
}

impl MatchError {
    pub fn at(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn progress(&self) -> usize {
        self.ctx.progress()
    }

    pub fn char(&self) -> char {
        self.ctx.char()
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Scan backward from `progress` counting newlines to find the
    /// (1-indexed line, 1-indexed column) of the failure.
    pub fn line_and_column(&self, input: &str) -> (usize, usize) {
        line_and_column_at(input, self.progress())
    }

    /// Return whichever of `self`/`other` made more progress, preferring
    /// `self` on a tie (first-encountered wins).
    pub fn furthest(self, other: MatchError) -> MatchError {
        if other.progress() > self.progress() {
            other
        } else {
            self
        }
    }
}

pub(crate) fn line_and_column_at(input: &str, progress: usize) -> (usize, usize) {
    let mut line = 1usize;
    let mut col = 1usize;
    for ch in input.chars().take(progress) {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "match failure at position {} (char {:?})",
            self.progress(),
            self.char()
        )
    }
}

impl StdError for MatchError {}
