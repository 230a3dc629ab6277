//! The rule algebra: a closed set of variants, each a pure function from a
//! [`Context`] to a `Context` (success) or a [`MatchError`] (failure).
//!
//! Evaluation never retries on its own — `Branch` is the only place
//! alternative exploration happens, and `Repeat` is the only place
//! iteration happens. Everything else is a single pass left to right.

use std::rc::Rc;
use std::sync::OnceLock;

use log::{debug, trace};
use smol_str::SmolStr;

use crate::context::{Context, MatchError};

/// How a [`Rule::Branch`] picks among its alternatives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchMode {
    /// First success in declaration order wins.
    Seq,
    /// Every branch runs against the same starting context; the result
    /// reaching the furthest progress wins (success beats error on a tie).
    Tourney,
}

/// A grammar rule. Values are cheap to clone (recursive structure is
/// `Rc`-shared) and safe to share across an application — each `evaluate`
/// call only reads the rule and threads its own [`Context`].
#[derive(Clone, Debug)]
pub enum Rule {
    Empty,
    One(char),
    Range(char, char),
    Chain(Vec<Rule>),
    Branch(Vec<Rule>, BranchMode),
    Repeat(Rc<Rule>, usize, Option<usize>),
    Refuse(Rc<Rule>, Rc<Rule>),
    Capture(Rc<Rule>, SmolStr),
    Keep(Rc<Rule>, SmolStr),
    Ahead(Rc<OnceLock<Rule>>),
}

impl Rule {
    /// Always succeeds without consuming input.
    pub fn empty() -> Rule {
        Rule::Empty
    }

    /// Matches exactly one character.
    pub fn from_char(c: char) -> Rule {
        Rule::One(c)
    }

    /// Matches one character in `[lo, hi]` (or `[lo, hi)` if
    /// `exclusive_upper`), by Unicode code-point order.
    pub fn from_range(lo: char, hi: char, exclusive_upper: bool) -> Rule {
        let hi = if exclusive_upper {
            char::from_u32((hi as u32).saturating_sub(1)).unwrap_or(hi)
        } else {
            hi
        };
        Rule::Range(lo, hi)
    }

    /// A chain of single-character rules matching `s` verbatim.
    pub fn from_string(s: &str) -> Rule {
        Rule::Chain(s.chars().map(Rule::One).collect())
    }

    /// Sequence: `self` then `other`. Chains into an existing `Chain`
    /// rather than nesting, so `a.then(b).then(c)` stays a flat 3-element
    /// chain instead of `Chain[Chain[a,b],c]`.
    pub fn then(self, other: Rule) -> Rule {
        match self {
            Rule::Chain(mut terms) => {
                terms.push(other);
                Rule::Chain(terms)
            }
            first => Rule::Chain(vec![first, other]),
        }
    }

    /// First-match alternation (`Branch` in `Seq` mode). Flattens the same
    /// way `then` does.
    pub fn or(self, other: Rule) -> Rule {
        match self {
            Rule::Branch(mut alts, BranchMode::Seq) => {
                alts.push(other);
                Rule::Branch(alts, BranchMode::Seq)
            }
            first => Rule::Branch(vec![first, other], BranchMode::Seq),
        }
    }

    /// Repeat `self` between `min` and `max` times (`max = None` is
    /// unbounded). `exclusive_upper` mirrors [`Rule::from_range`]: when
    /// true, `max` itself is not a valid repetition count.
    pub fn times(self, min: usize, max: Option<usize>, exclusive_upper: bool) -> Rule {
        let limit = max.map(|m| if exclusive_upper { m } else { m + 1 });
        Rule::Repeat(Rc::new(self), min, limit)
    }

    /// Negative lookahead: fail if `cond` would succeed here, otherwise
    /// evaluate `self`. `cond` never consumes input in the caller's
    /// context — its own advanced cursor is discarded either way.
    pub fn refusing(self, cond: Rule) -> Rule {
        Rule::Refuse(Rc::new(self), Rc::new(cond))
    }

    /// Attach this rule as the target of a forward declaration made with
    /// [`ahead`]. Fatal if this rule isn't an unresolved `Ahead`, or if
    /// its target was already set.
    pub fn put(&self, target: Rule) {
        match self {
            Rule::Ahead(cell) => cell
                .set(target)
                .unwrap_or_else(|_| panic!("ahead rule's target was already set")),
            _ => panic!("put() called on a rule that is not an unresolved `ahead`"),
        }
    }

    /// Evaluate this rule against `ctx`, returning the advanced context on
    /// success or the furthest-reached [`MatchError`] on failure.
    pub fn evaluate(&self, ctx: &Context) -> Result<Context, MatchError> {
        trace!("evaluate {:?} at {}", self, ctx.progress());
        match self {
            Rule::Empty => Ok(ctx.clone()),
            Rule::One(c) => {
                if !ctx.at_end() && ctx.char() == *c {
                    Ok(ctx.advance())
                } else {
                    Err(MatchError::at(ctx.clone()))
                }
            }
            Rule::Range(lo, hi) => {
                if !ctx.at_end() && ctx.char() >= *lo && ctx.char() <= *hi {
                    Ok(ctx.advance())
                } else {
                    Err(MatchError::at(ctx.clone()))
                }
            }
            Rule::Chain(terms) => {
                let mut cur = ctx.clone();
                for term in terms {
                    cur = term.evaluate(&cur)?;
                }
                Ok(cur)
            }
            Rule::Branch(alts, BranchMode::Seq) => {
                let mut furthest: Option<MatchError> = None;
                for alt in alts {
                    match alt.evaluate(ctx) {
                        Ok(next) => return Ok(next),
                        Err(e) => {
                            furthest = Some(match furthest {
                                None => e,
                                Some(prev) => prev.furthest(e),
                            });
                        }
                    }
                }
                debug!("branch(seq) exhausted at {}", ctx.progress());
                Err(furthest.expect("Branch must have at least one alternative"))
            }
            Rule::Branch(alts, BranchMode::Tourney) => self.evaluate_tourney(alts, ctx),
            Rule::Repeat(body, min, limit) => self.evaluate_repeat(body, *min, *limit, ctx),
            Rule::Refuse(body, cond) => match cond.evaluate(ctx) {
                Ok(blocked) => Err(MatchError::at(blocked)),
                Err(_) => body.evaluate(ctx),
            },
            Rule::Capture(body, id) => {
                let sub_ctx = ctx.rebase(id.clone());
                let sub = body.evaluate(&sub_ctx)?;
                Ok(ctx.adopt(&sub))
            }
            Rule::Keep(body, id) => {
                let sub_ctx = ctx.rebase(id.clone());
                let sub = body.evaluate(&sub_ctx)?;
                let text = ctx.cursor().slice(ctx.progress(), sub.progress());
                let root = ctx.root().setattr(id.clone(), text);
                Ok(Context::new(sub.cursor().clone(), root))
            }
            Rule::Ahead(cell) => match cell.get() {
                Some(target) => target.evaluate(ctx),
                None => panic!("evaluated an `ahead` rule whose target was never set via put()"),
            },
        }
    }

    fn evaluate_tourney(&self, alts: &[Rule], ctx: &Context) -> Result<Context, MatchError> {
        let mut best: Option<Result<Context, MatchError>> = None;
        for alt in alts {
            let candidate = alt.evaluate(ctx);
            let candidate_progress = match &candidate {
                Ok(c) => c.progress(),
                Err(e) => e.progress(),
            };
            best = Some(match best {
                None => candidate,
                Some(prev) => {
                    let prev_progress = match &prev {
                        Ok(c) => c.progress(),
                        Err(e) => e.progress(),
                    };
                    let prev_is_success = prev.is_ok();
                    let candidate_is_success = candidate.is_ok();
                    let replace = if candidate_progress != prev_progress {
                        candidate_progress > prev_progress
                    } else {
                        candidate_is_success && !prev_is_success
                    };
                    if replace {
                        candidate
                    } else {
                        prev
                    }
                }
            });
        }
        best.expect("tourney must have at least one alternative")
    }

    /// `body` is evaluated repeatedly from the current context. Stops
    /// when `body` fails, the iteration limit is reached, or a success
    /// makes no progress (guards against an unbounded zero-advance loop).
    fn evaluate_repeat(
        &self,
        body: &Rule,
        min: usize,
        limit: Option<usize>,
        ctx: &Context,
    ) -> Result<Context, MatchError> {
        let mut cur = ctx.clone();
        let mut count = 0usize;
        loop {
            if let Some(limit) = limit {
                if count >= limit {
                    break;
                }
            }
            match body.evaluate(&cur) {
                Ok(next) => {
                    let progressed = next.progress() > cur.progress();
                    cur = next;
                    count += 1;
                    if !progressed {
                        // Body matched without consuming input; stop here
                        // rather than looping forever.
                        break;
                    }
                }
                Err(e) => {
                    return if count >= min { Ok(cur) } else { Err(e) };
                }
            }
        }
        Ok(cur)
    }
}

/// A forward-declared rule for recursive/mutually recursive grammars.
/// Evaluating it before [`Rule::put`] is called is a programmer error
/// (fatal: an unbound forward reference).
pub fn ahead() -> Rule {
    Rule::Ahead(Rc::new(OnceLock::new()))
}

/// Label the subtree produced by `r` with `id`.
pub fn capture(r: Rule, id: impl Into<SmolStr>) -> Rule {
    Rule::Capture(Rc::new(r), id.into())
}

/// Label the substring matched by `r` as an attribute named `id` on the
/// enclosing tree. The subtree `r` produces is discarded.
pub fn keep(r: Rule, id: impl Into<SmolStr>) -> Rule {
    Rule::Keep(Rc::new(r), id.into())
}

/// Alternation that picks the branch reaching the furthest progress,
/// rather than the first success.
pub fn tourney(alts: impl IntoIterator<Item = Rule>) -> Rule {
    let alts: Vec<Rule> = alts.into_iter().collect();
    assert!(!alts.is_empty(), "tourney() requires at least one alternative");
    Rule::Branch(alts, BranchMode::Tourney)
}
