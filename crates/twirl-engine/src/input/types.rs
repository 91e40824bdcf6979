/// Keyboard key identifier.
///
/// Escape is the only key the viewer reacts to; everything else is
/// `Key::Other` carrying the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    /// Platform-dependent key not represented here.
    Other(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A key transition delivered to `core::App::on_key`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// True when event is a key-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    pub const fn pressed(key: Key) -> Self {
        Self { key, state: KeyState::Pressed, repeat: false }
    }

    pub const fn released(key: Key) -> Self {
        Self { key, state: KeyState::Released, repeat: false }
    }
}
