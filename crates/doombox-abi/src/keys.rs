//! Semantic key labels.
//!
//! The engine keys actions off its own numeric codes. Rather than having
//! every host hardcode those numbers, the module exports one i32 global per
//! semantic action; hosts translate physical input by reading the global for
//! the label they care about.

/// Largest key code the module accepts; reports outside `0..=MAX_KEY_CODE`
/// are rejected with a logged diagnostic and no state change.
pub const MAX_KEY_CODE: i32 = 255;

/// One semantic key the module names via an exported global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyLabel {
    Alt,
    Backspace,
    DownArrow,
    Enter,
    Escape,
    Fire,
    LeftArrow,
    RightArrow,
    Shift,
    StrafeLeft,
    StrafeRight,
    Tab,
    UpArrow,
    Use,
}

impl KeyLabel {
    /// Every label, in the order the module exports its globals.
    pub const ALL: [KeyLabel; 14] = [
        KeyLabel::Alt,
        KeyLabel::Backspace,
        KeyLabel::DownArrow,
        KeyLabel::Enter,
        KeyLabel::Escape,
        KeyLabel::Fire,
        KeyLabel::LeftArrow,
        KeyLabel::RightArrow,
        KeyLabel::Shift,
        KeyLabel::StrafeLeft,
        KeyLabel::StrafeRight,
        KeyLabel::Tab,
        KeyLabel::UpArrow,
        KeyLabel::Use,
    ];

    /// Name of the exported i32 global carrying this label's key code.
    pub fn global_name(self) -> &'static str {
        match self {
            KeyLabel::Alt => "KEY_ALT",
            KeyLabel::Backspace => "KEY_BACKSPACE",
            KeyLabel::DownArrow => "KEY_DOWNARROW",
            KeyLabel::Enter => "KEY_ENTER",
            KeyLabel::Escape => "KEY_ESCAPE",
            KeyLabel::Fire => "KEY_FIRE",
            KeyLabel::LeftArrow => "KEY_LEFTARROW",
            KeyLabel::RightArrow => "KEY_RIGHTARROW",
            KeyLabel::Shift => "KEY_SHIFT",
            KeyLabel::StrafeLeft => "KEY_STRAFE_L",
            KeyLabel::StrafeRight => "KEY_STRAFE_R",
            KeyLabel::Tab => "KEY_TAB",
            KeyLabel::UpArrow => "KEY_UPARROW",
            KeyLabel::Use => "KEY_USE",
        }
    }

    /// Reverse of [`global_name`](Self::global_name).
    pub fn from_global_name(name: &str) -> Option<KeyLabel> {
        KeyLabel::ALL
            .into_iter()
            .find(|label| label.global_name() == name)
    }
}

impl std::fmt::Display for KeyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.global_name())
    }
}
