use glam::Vec2;

/// A high-level action produced from raw input (keyboard, mouse, console).
///
/// The view-state kernel consumes actions, never winit events. This keeps
/// the bindings in one place and the view logic testable without a window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Pan one keyboard step in a unit direction (applied per held frame).
    Pan(Vec2),
    /// One frame of keyboard zoom-in (applied per held frame).
    ZoomIn,
    /// One frame of keyboard zoom-out (applied per held frame).
    ZoomOut,
    /// Switch between Mandelbrot and Julia rendering.
    ToggleKind,
    /// Double the iteration limit.
    IterationsUp,
    /// Halve the iteration limit.
    IterationsDown,
    /// Animate the Julia constant toward a preset.
    JuliaPreset(usize),
    /// Restore the default view.
    ResetView,
}

/// Julia constants reachable from the number keys. The classic showpieces:
/// a dendrite-adjacent spiral, San Marco, the Douady rabbit, and a galaxy.
pub const JULIA_PRESETS: [Vec2; 4] = [
    Vec2::new(-0.8, 0.156),
    Vec2::new(-0.75, 0.0),
    Vec2::new(-0.123, 0.745),
    Vec2::new(0.285, 0.01),
];

impl Action {
    /// Whether this action repeats every frame while its key is held, as
    /// opposed to firing once on press.
    pub fn is_held(&self) -> bool {
        matches!(self, Action::Pan(_) | Action::ZoomIn | Action::ZoomOut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_is_constructible() {
        let a = Action::Pan(Vec2::new(1.0, 0.0));
        assert!(matches!(a, Action::Pan(_)));
    }

    #[test]
    fn held_vs_pressed() {
        assert!(Action::Pan(Vec2::X).is_held());
        assert!(Action::ZoomIn.is_held());
        assert!(Action::ZoomOut.is_held());
        assert!(!Action::ToggleKind.is_held());
        assert!(!Action::ResetView.is_held());
        assert!(!Action::JuliaPreset(0).is_held());
    }

    #[test]
    fn presets_are_distinct() {
        for (i, a) in JULIA_PRESETS.iter().enumerate() {
            for b in &JULIA_PRESETS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
