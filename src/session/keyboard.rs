//! Keyboard shortcuts
//!
//! Primary modifier (Ctrl, or Cmd on macOS) + Enter formats;
//! primary modifier + Shift + C copies.

/// User action a shortcut or control maps to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Format,
    Copy,
}

/// The parts of a key press that shortcuts look at
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[cfg(target_arch = "wasm32")]
impl From<&web_sys::KeyboardEvent> for KeyChord {
    fn from(event: &web_sys::KeyboardEvent) -> Self {
        Self {
            key: event.key(),
            ctrl: event.ctrl_key(),
            meta: event.meta_key(),
            shift: event.shift_key(),
        }
    }
}

/// Map a key press to the action it triggers, if any
pub fn shortcut_for(chord: &KeyChord) -> Option<Intent> {
    if !chord.primary() {
        return None;
    }
    match chord.key.as_str() {
        "Enter" => Some(Intent::Format),
        "C" | "c" if chord.shift => Some(Intent::Copy),
        _ => None,
    }
}
