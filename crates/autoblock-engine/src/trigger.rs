use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::{ConfigurationError, InputEvent, KeyCodes};

/// The accepted shapes of a trigger before normalization.
#[derive(Debug, Clone)]
pub enum TriggerSpec {
    /// Tested against the event's input text.
    Pattern(Regex),
    /// A reserved key name from [`KeyCodes`], otherwise literal input text.
    Text(String),
}

impl From<Regex> for TriggerSpec {
    fn from(pattern: Regex) -> Self {
        TriggerSpec::Pattern(pattern)
    }
}

impl From<&str> for TriggerSpec {
    fn from(text: &str) -> Self {
        TriggerSpec::Text(text.to_string())
    }
}

impl From<String> for TriggerSpec {
    fn from(text: String) -> Self {
        TriggerSpec::Text(text)
    }
}

/// Compile `source`, reporting failures as configuration errors.
pub fn compile_pattern(source: &str) -> Result<Regex, ConfigurationError> {
    Regex::new(source).map_err(|source_err| ConfigurationError::InvalidPattern {
        pattern: source.to_string(),
        source: source_err,
    })
}

type Predicate = Arc<dyn Fn(&InputEvent) -> bool + Send + Sync>;

/// A normalized trigger: one predicate over input events, resolved once at
/// construction so the handlers never branch on the trigger form.
#[derive(Clone)]
pub struct Trigger {
    predicate: Predicate,
    description: String,
}

impl Trigger {
    /// Resolve `spec` against the key table.
    ///
    /// - `Pattern`: the event's input text must match the regex.
    /// - `Text` naming a key in `keys`: the event's key code must equal that code.
    /// - Any other `Text`: the event's input text must equal it exactly.
    pub fn normalize(spec: TriggerSpec, keys: &KeyCodes) -> Result<Self, ConfigurationError> {
        match spec {
            TriggerSpec::Pattern(pattern) => Ok(Self {
                description: format!("/{pattern}/"),
                predicate: Arc::new(move |event: &InputEvent| {
                    event.data.as_deref().is_some_and(|data| pattern.is_match(data))
                }),
            }),
            TriggerSpec::Text(text) if text.is_empty() => Err(ConfigurationError::EmptyTrigger),
            TriggerSpec::Text(text) => match keys.code(&text) {
                Some(code) => Ok(Self {
                    description: format!("{text} ({code})"),
                    predicate: Arc::new(move |event: &InputEvent| event.key_code == Some(code)),
                }),
                None => Ok(Self {
                    description: format!("{text:?}"),
                    predicate: Arc::new(move |event: &InputEvent| {
                        event.data.as_deref() == Some(text.as_str())
                    }),
                }),
            },
        }
    }

    pub fn matches(&self, event: &InputEvent) -> bool {
        (self.predicate)(event)
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Trigger").field(&self.description).finish()
    }
}

/// A compact trigger split into its final trigger and implied `before` pattern.
#[derive(Debug, Clone)]
pub struct Shorthand {
    pub trigger: TriggerSpec,
    pub before: Option<Regex>,
}

impl Shorthand {
    /// Split a compact trigger.
    ///
    /// For text, the last character is the literal trigger and everything
    /// before it becomes `(escaped)$`. `"> "` is `before: /(>)$/` with a
    /// literal `" "` trigger. A pattern has no implied `before`.
    ///
    /// Text ending in a key name (`">space"`) is rejected: whether `space` is
    /// the key or the tail of the literal can't be told apart.
    pub fn parse(spec: TriggerSpec, keys: &KeyCodes) -> Result<Self, ConfigurationError> {
        let text = match spec {
            TriggerSpec::Pattern(pattern) => {
                return Ok(Self {
                    trigger: TriggerSpec::Pattern(pattern),
                    before: None,
                });
            }
            TriggerSpec::Text(text) => text,
        };

        if let Some(key) = keys.name_suffix_of(&text) {
            return Err(ConfigurationError::AmbiguousShorthand {
                key: key.to_string(),
                shorthand: text,
            });
        }

        let split = match text.char_indices().last() {
            Some((index, _)) if index > 0 => index,
            _ => return Err(ConfigurationError::ShorthandTooShort { shorthand: text }),
        };
        let (prefix, last) = text.split_at(split);

        let before = compile_pattern(&format!("({})$", regex::escape(prefix)))?;

        Ok(Self {
            trigger: TriggerSpec::Text(last.to_string()),
            before: Some(before),
        })
    }
}
