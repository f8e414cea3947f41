//! Markdown-style block shortcuts.
//!
//! - `> ` turns the block into a quote
//! - `#` to `######` then space turns it into a heading with `level` data
//! - `---` then enter turns it into a void horizontal rule

use crate::{
    AutoReplace, BlockProperties, ConfigurationError, MatchResult, Options, PluginStack,
    PropertiesSpec, compile_pattern,
};

pub const QUOTE: &str = "quote";
pub const HEADING: &str = "heading";
pub const HORIZONTAL_RULE: &str = "hr";

pub fn quote<C: 'static>() -> Result<AutoReplace<C>, ConfigurationError> {
    AutoReplace::new(
        Options::new()
            .trigger("space")
            .before(compile_pattern(r"^(>)$")?)
            .properties(BlockProperties::new(QUOTE)),
    )
}

pub fn heading<C: 'static>() -> Result<AutoReplace<C>, ConfigurationError> {
    AutoReplace::new(
        Options::new()
            .trigger("space")
            .before(compile_pattern(r"^(#{1,6})$")?)
            .properties(PropertiesSpec::resolver(|_: &C, matches: &MatchResult| {
                BlockProperties::new(HEADING).with_data("level", heading_level(matches))
            })),
    )
}

pub fn horizontal_rule<C: 'static>() -> Result<AutoReplace<C>, ConfigurationError> {
    AutoReplace::new(
        Options::new()
            .trigger("enter")
            .before(compile_pattern(r"^(-{3})$")?)
            .properties(BlockProperties::new(HORIZONTAL_RULE).void(true)),
    )
}

/// Quote, heading and horizontal rule, in that order.
pub fn markdown_shortcuts<C: 'static>() -> Result<PluginStack<C>, ConfigurationError> {
    Ok(PluginStack::new(vec![quote()?, heading()?, horizontal_rule()?]))
}

fn heading_level(matches: &MatchResult) -> usize {
    matches
        .before
        .as_ref()
        .and_then(|before| before.group(1))
        .map_or(1, |hashes| hashes.chars().count())
}
