//! Entry points: apply a [`Rule`] to an input string and get back a parse
//! tree or a [`MatchError`].

use log::info;

use crate::context::{Context, MatchError};
use crate::cursor::Cursor;
use crate::rule::Rule;
use crate::tree::Tree;

/// Options controlling [`apply`].
#[derive(Clone, Debug)]
pub struct ApplyOptions {
    /// Character index to start parsing at. Defaults to 0.
    pub offset: usize,
    /// Require the rule to consume the entire input. Defaults to `false`.
    pub exact: bool,
    /// Label of the implicit outermost tree. Defaults to `"root"`.
    pub root_id: String,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            offset: 0,
            exact: false,
            root_id: "root".to_string(),
        }
    }
}

/// Evaluate `rule` against `input`, returning the final context on success
/// or the furthest-reached error on failure.
pub fn apply(input: &str, rule: &Rule, options: &ApplyOptions) -> Result<Context, MatchError> {
    let cursor = Cursor::new(input, options.offset);
    let root = Tree::new(options.root_id.as_str(), options.offset);
    let initial = Context::new(cursor, root);

    let result = rule.evaluate(&initial);

    match result {
        Ok(ctx) if options.exact && !ctx.at_end() => {
            info!(
                "apply: exact match required but {} of {} characters unconsumed",
                ctx.cursor().len() - ctx.progress(),
                ctx.cursor().len()
            );
            Err(MatchError::at(ctx))
        }
        Ok(ctx) => {
            info!("apply: succeeded, consumed {} characters", ctx.progress());
            Ok(ctx.terminate())
        }
        Err(e) => {
            info!("apply: failed at position {}", e.progress());
            Err(e)
        }
    }
}

/// Like [`apply`], but returns the finalized root tree directly, or
/// `None` on failure.
pub fn apply_tree(input: &str, rule: &Rule, options: &ApplyOptions) -> Option<Tree> {
    apply(input, rule, options).ok().map(Context::into_root)
}

/// Like [`apply_tree`], but returns a boxed error (the closest this crate
/// gets to the source's "raised syntax error") instead of `None` on
/// failure.
pub fn apply_tree_or_throw(
    input: &str,
    rule: &Rule,
    options: &ApplyOptions,
) -> Result<Tree, Box<dyn std::error::Error>> {
    apply(input, rule, options)
        .map(Context::into_root)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
}
