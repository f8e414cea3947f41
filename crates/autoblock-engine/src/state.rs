use std::borrow::Cow;

use crate::BlockProperties;

/// Read access to the host editor's document state.
///
/// The plugin never owns the document: it reads a snapshot through this
/// trait and asks for a new one through [`EditorState::transform`].
/// Offsets are counted in chars within the block that holds the selection
/// start.
pub trait EditorState: Sized {
    type Transform: Transform<State = Self>;

    /// Whether the selection is a single cursor position.
    fn is_collapsed(&self) -> bool;

    /// Type name of the block containing the selection start.
    fn start_block_kind(&self) -> &str;

    /// Full text of the block containing the selection start.
    fn start_block_text(&self) -> Cow<'_, str>;

    /// Char offset of the selection start within its block.
    fn start_offset(&self) -> usize;

    /// Begin a compound change against this state.
    fn transform(&self) -> Self::Transform;
}

/// A compound change, built up step by step and committed by [`Transform::apply`].
///
/// Nothing is visible to the host until `apply` returns the new state, so the
/// whole chain lands as one transition.
pub trait Transform: Sized {
    type State;

    /// Select `start..end` (chars) within the start block.
    fn move_to_offsets(self, start: usize, end: usize) -> Self;

    /// Delete the selected content, collapsing the selection to its start.
    fn delete(self) -> Self;

    /// Set the start block's type, data and void flag. An `is_void` of
    /// `None` leaves the block's flag as it was.
    fn set_block(self, properties: &BlockProperties) -> Self;

    fn apply(self) -> Self::State;
}
