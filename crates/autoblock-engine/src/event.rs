/// An input event delivered by the host editor.
///
/// Key-down events carry a `key_code`; before-input events carry the text
/// about to be inserted in `data`. Hosts may fill in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputEvent {
    pub key_code: Option<u32>,
    pub data: Option<String>,
    default_prevented: bool,
}

impl InputEvent {
    /// A key-down event for `code`.
    pub fn key(code: u32) -> Self {
        Self {
            key_code: Some(code),
            ..Self::default()
        }
    }

    /// A before-input event inserting `data`.
    pub fn input(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Mark the event as consumed so the host skips its default insertion.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
