use std::fmt;

use crate::{AutoReplace, EditorState, InputEvent};

/// Several rules run in order; the first one that converts a block wins.
pub struct PluginStack<C = ()> {
    plugins: Vec<AutoReplace<C>>,
}

impl<C> Default for PluginStack<C> {
    fn default() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }
}

impl<C> PluginStack<C> {
    pub fn new(plugins: Vec<AutoReplace<C>>) -> Self {
        Self { plugins }
    }

    pub fn push(&mut self, plugin: AutoReplace<C>) {
        self.plugins.push(plugin);
    }

    pub fn extend(&mut self, other: PluginStack<C>) {
        self.plugins.extend(other.plugins);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AutoReplace<C>> {
        self.plugins.iter()
    }

    pub fn on_before_input<S: EditorState>(
        &self,
        event: &mut InputEvent,
        context: &C,
        state: &S,
    ) -> Option<S> {
        self.plugins
            .iter()
            .find_map(|plugin| plugin.on_before_input(event, context, state))
    }

    pub fn on_key_down<S: EditorState>(
        &self,
        event: &mut InputEvent,
        context: &C,
        state: &S,
    ) -> Option<S> {
        self.plugins
            .iter()
            .find_map(|plugin| plugin.on_key_down(event, context, state))
    }
}

impl<C> fmt::Debug for PluginStack<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.plugins).finish()
    }
}

impl<C> FromIterator<AutoReplace<C>> for PluginStack<C> {
    fn from_iter<I: IntoIterator<Item = AutoReplace<C>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
