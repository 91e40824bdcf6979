use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Key, KeyEvent};

/// Translates a winit `WindowEvent` into an engine `KeyEvent`.
///
/// Returns `None` for anything that is not keyboard input.
pub(crate) fn translate_key_event(event: &WindowEvent) -> Option<KeyEvent> {
    let WindowEvent::KeyboardInput { event, .. } = event else {
        return None;
    };

    let key = map_key(event.physical_key);
    let base = match event.state {
        ElementState::Pressed => KeyEvent::pressed(key),
        ElementState::Released => KeyEvent::released(key),
    };

    Some(KeyEvent { repeat: event.repeat, ..base })
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            other => Key::Other(other as u32),
        },

        // NativeKeyCode is not a u32 in winit 0.30; keep it unidentified.
        PhysicalKey::Unidentified(_) => Key::Other(0),
    }
}
