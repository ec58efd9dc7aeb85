use glam::Vec2;

/// Smallest permitted zoom factor.
pub const MIN_ZOOM: f32 = 1e-5;
/// Half the visible height of the complex plane at zoom 1.0.
pub const BASE_HALF_HEIGHT: f32 = 1.25;
/// Iteration clamp bounds. Keeps the shader loop bounded while leaving the
/// whole useful range reachable from the console.
pub const MIN_ITERATIONS: u32 = 16;
pub const MAX_ITERATIONS: u32 = 4096;
/// Frames a Julia constant interpolation takes to complete (~2 s at 60 Hz).
pub const TWEEN_FRAMES: u32 = 120;

/// Complex-plane pan step per frame per held key, before zoom scaling.
const PAN_STEP: f32 = 0.02;
/// Per-frame keyboard zoom factors.
const KEY_ZOOM_IN: f32 = 1.005;
const KEY_ZOOM_OUT: f32 = 0.995;

/// Which escape-time fractal the shader evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
    Julia,
}

/// An in-flight linear interpolation of the Julia constant.
///
/// Progress advances by `1 / TWEEN_FRAMES` per rendered frame, matching the
/// per-frame counter of the classic viewers rather than wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuliaTween {
    pub from: Vec2,
    pub to: Vec2,
    pub progress: f32,
}

/// The fractal view parameters uploaded as shader uniforms every frame.
///
/// Center and zoom define the visible window of the complex plane: half the
/// visible height is `BASE_HALF_HEIGHT / zoom`, half the width is that times
/// the aspect ratio. Pan steps are divided by zoom so perceived motion stays
/// constant at any magnification.
#[derive(Debug, Clone, PartialEq)]
pub struct FractalView {
    center: Vec2,
    zoom: f32,
    max_iterations: u32,
    kind: FractalKind,
    julia_c: Vec2,
    tween: Option<JuliaTween>,
}

impl Default for FractalView {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            zoom: 1.0,
            max_iterations: 256,
            kind: FractalKind::Mandelbrot,
            julia_c: Vec2::new(-0.8, 0.156),
            tween: None,
        }
    }
}

impl FractalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn kind(&self) -> FractalKind {
        self.kind
    }

    pub fn julia_c(&self) -> Vec2 {
        self.julia_c
    }

    pub fn tween(&self) -> Option<&JuliaTween> {
        self.tween.as_ref()
    }

    /// Half the visible extent of the complex plane at the current zoom.
    pub fn half_extents(&self, aspect: f32) -> Vec2 {
        let half_h = BASE_HALF_HEIGHT / self.zoom;
        Vec2::new(half_h * aspect, half_h)
    }

    /// Complex point at the given normalized device coordinate (both axes
    /// in `[-1, 1]`, y up).
    pub fn complex_at(&self, ndc: Vec2, aspect: f32) -> Vec2 {
        self.center + ndc * self.half_extents(aspect)
    }

    /// Pan by one keyboard step in the given unit direction. `fine` divides
    /// the step by 10 (held Shift).
    pub fn pan_step(&mut self, dir: Vec2, fine: bool) {
        let mut step = PAN_STEP / self.zoom;
        if fine {
            step /= 10.0;
        }
        self.center += dir * step;
    }

    /// Pan by an absolute complex-plane offset (mouse drag).
    pub fn pan_by(&mut self, delta: Vec2) {
        self.center += delta;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
    }

    /// One frame of keyboard zoom-in (`Z` held).
    pub fn key_zoom_in(&mut self) {
        self.zoom_by(KEY_ZOOM_IN);
    }

    /// One frame of keyboard zoom-out (`X` held).
    pub fn key_zoom_out(&mut self) {
        self.zoom_by(KEY_ZOOM_OUT);
    }

    pub fn zoom_by(&mut self, factor: f32) {
        self.set_zoom(self.zoom * factor);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(MIN_ZOOM);
    }

    /// Zoom by `factor` keeping the complex point under `ndc` fixed.
    ///
    /// Solves `center' = p - ndc * half_extents'` for the post-zoom center,
    /// where `p` is the anchor point at the pre-zoom view.
    pub fn zoom_at(&mut self, ndc: Vec2, aspect: f32, factor: f32) {
        let anchor = self.complex_at(ndc, aspect);
        self.zoom_by(factor);
        self.center = anchor - ndc * self.half_extents(aspect);
    }

    pub fn set_max_iterations(&mut self, n: u32) {
        self.max_iterations = n.clamp(MIN_ITERATIONS, MAX_ITERATIONS);
    }

    pub fn set_kind(&mut self, kind: FractalKind) {
        if self.kind != kind {
            tracing::debug!(?kind, "fractal kind changed");
        }
        self.kind = kind;
    }

    pub fn toggle_kind(&mut self) {
        let next = match self.kind {
            FractalKind::Mandelbrot => FractalKind::Julia,
            FractalKind::Julia => FractalKind::Mandelbrot,
        };
        self.set_kind(next);
    }

    /// Jump to a Julia constant immediately, cancelling any tween.
    pub fn set_julia_c(&mut self, c: Vec2) {
        self.julia_c = c;
        self.tween = None;
    }

    /// Begin animating the Julia constant toward `target` and switch to
    /// Julia mode. Starting a tween mid-flight restarts from the current
    /// constant, so the animation never jumps.
    pub fn begin_julia_tween(&mut self, target: Vec2) {
        self.set_kind(FractalKind::Julia);
        if self.julia_c == target {
            return;
        }
        self.tween = Some(JuliaTween {
            from: self.julia_c,
            to: target,
            progress: 0.0,
        });
    }

    /// Advance per-frame animation state. Call once per rendered frame.
    pub fn tick(&mut self) {
        if let Some(tween) = &mut self.tween {
            tween.progress += 1.0 / TWEEN_FRAMES as f32;
            if tween.progress >= 1.0 {
                self.julia_c = tween.to;
                self.tween = None;
                tracing::debug!(c = ?self.julia_c, "julia tween complete");
            } else {
                self.julia_c = tween.from.lerp(tween.to, tween.progress);
            }
        }
    }

    /// Restore the default view.
    pub fn reset(&mut self) {
        *self = Self::default();
        tracing::debug!("view reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view() {
        let view = FractalView::default();
        assert_eq!(view.center(), Vec2::ZERO);
        assert_eq!(view.zoom(), 1.0);
        assert_eq!(view.max_iterations(), 256);
        assert_eq!(view.kind(), FractalKind::Mandelbrot);
        assert!(view.tween().is_none());
    }

    #[test]
    fn pan_step_scales_with_zoom() {
        let mut view = FractalView::default();
        view.pan_step(Vec2::X, false);
        let coarse = view.center().x;

        let mut zoomed = FractalView::default();
        zoomed.set_zoom(100.0);
        zoomed.pan_step(Vec2::X, false);

        assert!((coarse - 0.02).abs() < 1e-6);
        assert!((zoomed.center().x - 0.0002).abs() < 1e-7);
    }

    #[test]
    fn fine_pan_is_tenth_step() {
        let mut view = FractalView::default();
        view.pan_step(Vec2::Y, true);
        assert!((view.center().y - 0.002).abs() < 1e-7);
    }

    #[test]
    fn zoom_clamps_at_minimum() {
        let mut view = FractalView::default();
        view.set_zoom(0.0);
        assert_eq!(view.zoom(), MIN_ZOOM);
        view.set_zoom(-3.0);
        assert_eq!(view.zoom(), MIN_ZOOM);
    }

    #[test]
    fn keyboard_zoom_factors() {
        let mut view = FractalView::default();
        view.key_zoom_in();
        assert!((view.zoom() - 1.005).abs() < 1e-6);
        let mut out = FractalView::default();
        out.key_zoom_out();
        assert!((out.zoom() - 0.995).abs() < 1e-6);
    }

    #[test]
    fn anchored_zoom_keeps_cursor_point_fixed() {
        let mut view = FractalView::default();
        view.set_center(Vec2::new(-0.5, 0.3));
        let ndc = Vec2::new(0.7, -0.4);
        let aspect = 16.0 / 9.0;

        let before = view.complex_at(ndc, aspect);
        view.zoom_at(ndc, aspect, 1.1);
        let after = view.complex_at(ndc, aspect);

        assert!((before - after).length() < 1e-5);
        assert!((view.zoom() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn iteration_clamp() {
        let mut view = FractalView::default();
        view.set_max_iterations(1);
        assert_eq!(view.max_iterations(), MIN_ITERATIONS);
        view.set_max_iterations(1_000_000);
        assert_eq!(view.max_iterations(), MAX_ITERATIONS);
        view.set_max_iterations(512);
        assert_eq!(view.max_iterations(), 512);
    }

    #[test]
    fn tween_progresses_and_completes() {
        let mut view = FractalView::default();
        let start = view.julia_c();
        let target = Vec2::new(0.285, 0.01);
        view.begin_julia_tween(target);
        assert_eq!(view.kind(), FractalKind::Julia);

        view.tick();
        let mid = view.julia_c();
        assert_ne!(mid, start);
        assert_ne!(mid, target);

        for _ in 0..TWEEN_FRAMES {
            view.tick();
        }
        assert_eq!(view.julia_c(), target);
        assert!(view.tween().is_none());
    }

    #[test]
    fn restarted_tween_starts_from_current_constant() {
        let mut view = FractalView::default();
        view.begin_julia_tween(Vec2::new(0.285, 0.01));
        for _ in 0..10 {
            view.tick();
        }
        let mid = view.julia_c();
        view.begin_julia_tween(Vec2::new(-0.4, 0.6));
        let tween = view.tween().expect("tween running");
        assert_eq!(tween.from, mid);
        assert_eq!(tween.progress, 0.0);
    }

    #[test]
    fn tween_to_current_constant_is_noop() {
        let mut view = FractalView::default();
        let c = view.julia_c();
        view.begin_julia_tween(c);
        assert!(view.tween().is_none());
    }

    #[test]
    fn toggle_kind_round_trips() {
        let mut view = FractalView::default();
        view.toggle_kind();
        assert_eq!(view.kind(), FractalKind::Julia);
        view.toggle_kind();
        assert_eq!(view.kind(), FractalKind::Mandelbrot);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut view = FractalView::default();
        view.set_zoom(500.0);
        view.set_center(Vec2::new(-1.4, 0.0));
        view.toggle_kind();
        view.reset();
        assert_eq!(view, FractalView::default());
    }

    #[test]
    fn half_extents_follow_aspect() {
        let view = FractalView::default();
        let e = view.half_extents(2.0);
        assert!((e.y - BASE_HALF_HEIGHT).abs() < 1e-6);
        assert!((e.x - 2.0 * BASE_HALF_HEIGHT).abs() < 1e-6);
    }
}
