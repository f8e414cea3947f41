use std::fmt;

use regex::Regex;

use crate::matching::{get_matches, get_offsets};
use crate::{
    ConfigurationError, EditorState, InputEvent, KeyCodes, MatchResult, Properties,
    PropertiesSpec, Shorthand, Transform, Trigger, TriggerSpec,
};

/// Options for one auto-replace rule, before validation.
pub struct Options<C = ()> {
    pub trigger: Option<TriggerSpec>,
    pub before: Option<Regex>,
    pub after: Option<Regex>,
    pub properties: Option<PropertiesSpec<C>>,
    pub only_in: Option<Vec<String>>,
    pub ignore_in: Option<Vec<String>>,
    pub key_codes: KeyCodes,
}

impl<C> Default for Options<C> {
    fn default() -> Self {
        Self {
            trigger: None,
            before: None,
            after: None,
            properties: None,
            only_in: None,
            ignore_in: None,
            key_codes: KeyCodes::default(),
        }
    }
}

impl<C> Options<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(mut self, trigger: impl Into<TriggerSpec>) -> Self {
        self.trigger = Some(trigger.into());
        self
    }

    pub fn before(mut self, pattern: Regex) -> Self {
        self.before = Some(pattern);
        self
    }

    pub fn after(mut self, pattern: Regex) -> Self {
        self.after = Some(pattern);
        self
    }

    pub fn properties(mut self, properties: impl Into<PropertiesSpec<C>>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Only fire inside blocks of these types.
    pub fn only_in<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only_in = Some(kinds.into_iter().map(Into::into).collect());
        self
    }

    /// Never fire inside blocks of these types.
    pub fn ignore_in<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_in = Some(kinds.into_iter().map(Into::into).collect());
        self
    }

    pub fn key_codes(mut self, key_codes: KeyCodes) -> Self {
        self.key_codes = key_codes;
        self
    }
}

/// Converts the block around the cursor when the trigger fires and the text
/// around the cursor matches.
///
/// ```rust
/// use autoblock_engine::{AutoReplace, BlockProperties, Options, compile_pattern};
///
/// let quote = AutoReplace::<()>::new(
///     Options::new()
///         .trigger("space")
///         .before(compile_pattern(r"^(>)$").unwrap())
///         .properties(BlockProperties::new("quote")),
/// )
/// .unwrap();
/// # let _ = quote;
/// ```
///
/// Default handling of the event is suppressed only when a block is actually
/// converted. A trigger key typed where nothing matches is left alone.
pub struct AutoReplace<C = ()> {
    trigger: Trigger,
    before: Option<Regex>,
    after: Option<Regex>,
    properties: Properties<C>,
    only_in: Option<Vec<String>>,
    ignore_in: Option<Vec<String>>,
}

impl<C: 'static> AutoReplace<C> {
    /// Validate `options` and normalize the trigger and properties.
    pub fn new(options: Options<C>) -> Result<Self, ConfigurationError> {
        let Options {
            trigger,
            before,
            after,
            properties,
            only_in,
            ignore_in,
            key_codes,
        } = options;

        let trigger = trigger.ok_or(ConfigurationError::MissingTrigger)?;
        let trigger = Trigger::normalize(trigger, &key_codes)?;
        let properties = properties.ok_or(ConfigurationError::MissingProperties)?;

        Ok(Self {
            trigger,
            before,
            after,
            properties: Properties::normalize(properties),
            only_in,
            ignore_in,
        })
    }

    /// Build from a compact trigger such as `"> "` plus properties.
    ///
    /// Any `before` in `extra` is replaced: by the escaped prefix for text
    /// shorthand, by nothing for a pattern.
    pub fn shorthand(
        trigger: impl Into<TriggerSpec>,
        properties: impl Into<PropertiesSpec<C>>,
        extra: Options<C>,
    ) -> Result<Self, ConfigurationError> {
        let parsed = Shorthand::parse(trigger.into(), &extra.key_codes)?;

        Self::new(Options {
            trigger: Some(parsed.trigger),
            before: parsed.before,
            properties: Some(properties.into()),
            ..extra
        })
    }
}

impl<C> AutoReplace<C> {
    /// Before-input entry point.
    pub fn on_before_input<S: EditorState>(
        &self,
        event: &mut InputEvent,
        context: &C,
        state: &S,
    ) -> Option<S> {
        self.handle(event, context, state)
    }

    /// Key-down entry point.
    pub fn on_key_down<S: EditorState>(
        &self,
        event: &mut InputEvent,
        context: &C,
        state: &S,
    ) -> Option<S> {
        self.handle(event, context, state)
    }

    fn handle<S: EditorState>(&self, event: &mut InputEvent, context: &C, state: &S) -> Option<S> {
        if !self.trigger.matches(event) {
            return None;
        }
        self.replace(event, context, state)
    }

    /// Delete the matched span and retype the block, or `None` when the rule
    /// doesn't apply. Does not check the trigger.
    pub fn replace<S: EditorState>(
        &self,
        event: &mut InputEvent,
        context: &C,
        state: &S,
    ) -> Option<S> {
        if !state.is_collapsed() {
            log::trace!("{:?} skipped: selection is expanded", self.trigger);
            return None;
        }

        let kind = state.start_block_kind();
        if !self.applies_in(kind) {
            log::trace!("{:?} skipped: not applicable in `{kind}`", self.trigger);
            return None;
        }

        let text = state.start_block_text();
        let Some(matches) = self.matches_in(&text, state.start_offset()) else {
            log::trace!("{:?} skipped: no text match", self.trigger);
            return None;
        };

        event.prevent_default();

        let cursor = state.start_offset().min(text.chars().count());
        let offsets = get_offsets(&matches, cursor);
        let properties = self.properties.resolve(context, &matches);

        log::debug!(
            "{:?} converting `{kind}` to `{}`, deleting {}..{}",
            self.trigger,
            properties.kind,
            offsets.start,
            offsets.end
        );

        Some(
            state
                .transform()
                .move_to_offsets(offsets.start, offsets.end)
                .delete()
                .set_block(&properties)
                .apply(),
        )
    }

    /// Match the configured patterns around the cursor in `state`.
    pub fn matches<S: EditorState>(&self, state: &S) -> Option<MatchResult> {
        self.matches_in(&state.start_block_text(), state.start_offset())
    }

    fn matches_in(&self, text: &str, offset: usize) -> Option<MatchResult> {
        get_matches(self.before.as_ref(), self.after.as_ref(), text, offset)
    }

    fn applies_in(&self, kind: &str) -> bool {
        let included = self
            .only_in
            .as_ref()
            .is_none_or(|kinds| kinds.iter().any(|k| k == kind));
        let ignored = self
            .ignore_in
            .as_ref()
            .is_some_and(|kinds| kinds.iter().any(|k| k == kind));
        included && !ignored
    }
}

impl<C> fmt::Debug for AutoReplace<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoReplace")
            .field("trigger", &self.trigger)
            .field("before", &self.before)
            .field("after", &self.after)
            .field("only_in", &self.only_in)
            .field("ignore_in", &self.ignore_in)
            .finish_non_exhaustive()
    }
}
