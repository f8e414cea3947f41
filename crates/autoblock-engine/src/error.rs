use thiserror::Error;

/// Errors raised while building a plugin from its options.
///
/// These are construction-time failures: a plugin that fails to build never
/// exists, so a broken configuration can't reach the event handlers.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("You must provide a `trigger`")]
    MissingTrigger,

    #[error("You must provide `properties`")]
    MissingProperties,

    #[error("Trigger text must not be empty")]
    EmptyTrigger,

    #[error("Shorthand `{shorthand}` needs at least one character before the trigger character")]
    ShorthandTooShort { shorthand: String },

    #[error(
        "Shorthand `{shorthand}` ends with the key name `{key}`; use an explicit `trigger` and `before` instead"
    )]
    AmbiguousShorthand { shorthand: String, key: String },

    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}
