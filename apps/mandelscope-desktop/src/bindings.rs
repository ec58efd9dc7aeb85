use glam::Vec2;
use mandelscope_input::Action;
use winit::keyboard::KeyCode;

/// Actions applied every frame while their key is held.
pub fn held_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::ArrowRight => Some(Action::Pan(Vec2::X)),
        KeyCode::ArrowLeft => Some(Action::Pan(Vec2::NEG_X)),
        KeyCode::ArrowUp => Some(Action::Pan(Vec2::Y)),
        KeyCode::ArrowDown => Some(Action::Pan(Vec2::NEG_Y)),
        KeyCode::KeyZ => Some(Action::ZoomIn),
        KeyCode::KeyX => Some(Action::ZoomOut),
        _ => None,
    }
}

/// Actions fired once on key press.
pub fn pressed_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::KeyJ | KeyCode::Tab => Some(Action::ToggleKind),
        KeyCode::BracketRight => Some(Action::IterationsUp),
        KeyCode::BracketLeft => Some(Action::IterationsDown),
        KeyCode::KeyR => Some(Action::ResetView),
        KeyCode::Digit1 => Some(Action::JuliaPreset(0)),
        KeyCode::Digit2 => Some(Action::JuliaPreset(1)),
        KeyCode::Digit3 => Some(Action::JuliaPreset(2)),
        KeyCode::Digit4 => Some(Action::JuliaPreset(3)),
        _ => None,
    }
}
