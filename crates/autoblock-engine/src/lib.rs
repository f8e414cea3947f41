/*!
 * # Auto-replace block engine
 *
 * Watches keystrokes in a rich-text editor and, when the text right before
 * (and optionally after) the cursor matches a rule at the rule's trigger key,
 * deletes the matched span and converts the enclosing block to a new type.
 * Typing `> ` in a paragraph gives a quote, `### ` a level 3 heading,
 * `---` then enter a horizontal rule.
 *
 * ## Flow
 *
 * 1. The host calls [`AutoReplace::on_before_input`] or
 *    [`AutoReplace::on_key_down`] with the event, its own context value and
 *    a snapshot of its document state.
 * 2. The normalized [`Trigger`] decides whether the event is interesting.
 * 3. [`get_matches`] runs the `before`/`after` patterns around the cursor and
 *    [`get_offsets`] turns the first capture groups into the span to delete.
 * 4. [`Properties`] resolves the new block type and data from the match.
 * 5. One [`Transform`] selects the span, deletes it and retypes the block;
 *    `apply` hands the new state back to the host.
 *
 * The document model itself belongs to the host and is reached only through
 * [`EditorState`] and [`Transform`].
 */

pub mod error;
pub mod event;
pub mod keys;
pub mod matching;
pub mod plugin;
pub mod presets;
pub mod properties;
pub mod stack;
pub mod state;
pub mod trigger;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use error::ConfigurationError;
pub use event::InputEvent;
pub use keys::KeyCodes;
pub use matching::{Capture, MatchResult, Offsets, get_matches, get_offsets};
pub use plugin::{AutoReplace, Options};
pub use properties::{BlockProperties, Properties, PropertiesSpec};
pub use stack::PluginStack;
pub use state::{EditorState, Transform};
pub use trigger::{Shorthand, Trigger, TriggerSpec, compile_pattern};
