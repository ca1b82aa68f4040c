//! Zoom controller: wheel + pinch gestures driving a clamped font scale.
//!
//! State machine:
//!
//! ```text
//!            touch start (2 contacts)
//!   Idle ──────────────────────────────▶ Pinching { distance, scale }
//!    ▲                                        │ touch move (2 contacts): rescale
//!    └──── touch end / cancel / < 2 contacts ─┘
//! ```
//!
//! Wheel ticks are independent of the pinch state: with a precision modifier
//! (Ctrl or Meta) each tick moves the scale by exactly one step, otherwise the
//! tick is left to the platform scroll. Single-contact touch moves are never
//! consumed so text selection keeps working.
//!
//! Every write goes through [`FontScale::new`], which clamps into
//! `[MIN_SCALE, MAX_SCALE]`.

use core_events::{
    Disposition, EventKind, ListenerBinding, SurfaceEvent, TouchEvent, TouchPhase, WheelEvent,
};
use std::fmt;

pub const MIN_SCALE: f64 = 10.0;
pub const MAX_SCALE: f64 = 32.0;
pub const DEFAULT_SCALE: f64 = 14.0;
/// Scale change per accepted wheel tick.
pub const WHEEL_STEP: f64 = 1.0;

/// Listener bindings the controller needs. Wheel and touch move must be able
/// to suppress the platform default.
pub const ZOOM_BINDINGS: [ListenerBinding; 5] = [
    ListenerBinding::active(EventKind::Wheel),
    ListenerBinding::passive(EventKind::TouchStart),
    ListenerBinding::active(EventKind::TouchMove),
    ListenerBinding::passive(EventKind::TouchEnd),
    ListenerBinding::passive(EventKind::TouchCancel),
];

/// Display scale, always within `[MIN_SCALE, MAX_SCALE]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FontScale(f64);

impl FontScale {
    /// Clamp `value` into range. NaN maps to the minimum.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(MIN_SCALE);
        }
        Self(value.clamp(MIN_SCALE, MAX_SCALE))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn is_clamped_from(self, requested: f64) -> bool {
        self.0 != requested
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self(DEFAULT_SCALE)
    }
}

impl fmt::Display for FontScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Baseline captured at the start of a two-contact gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    pub distance: f64,
    pub scale: FontScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Pinching(PinchBaseline),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScaleSource {
    Wheel,
    Pinch,
}

#[derive(Debug, Clone, Default)]
pub struct ZoomController {
    scale: FontScale,
    gesture: GestureState,
}

impl ZoomController {
    pub fn new(initial: f64) -> Self {
        Self {
            scale: FontScale::new(initial),
            gesture: GestureState::Idle,
        }
    }

    pub fn scale(&self) -> FontScale {
        self.scale
    }

    /// Raw scale value handed to the line renderer.
    pub fn font_scale(&self) -> f64 {
        self.scale.get()
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.gesture, GestureState::Pinching(_))
    }

    pub fn bindings(&self) -> &'static [ListenerBinding] {
        &ZOOM_BINDINGS
    }

    /// Drop any pinch baseline so the next two-contact gesture re-baselines.
    /// Called when listeners are released.
    pub fn cancel_gesture(&mut self) {
        if self.is_pinching() {
            tracing::trace!(target: "zoom", "pinch_baseline_cleared");
        }
        self.gesture = GestureState::Idle;
    }

    pub fn handle(&mut self, event: &SurfaceEvent) -> Disposition {
        match event {
            SurfaceEvent::Wheel(wheel) => self.handle_wheel(wheel),
            SurfaceEvent::Touch(touch) => self.handle_touch(touch),
            SurfaceEvent::Activate(_) => Disposition::Ignored,
        }
    }

    pub fn handle_wheel(&mut self, event: &WheelEvent) -> Disposition {
        if !event.mods.has_precision() {
            return Disposition::Ignored;
        }
        // Scrolling down (positive delta) zooms out.
        let step = if event.delta_y > 0.0 {
            -WHEEL_STEP
        } else {
            WHEEL_STEP
        };
        self.set_scale(self.scale.get() + step, ScaleSource::Wheel);
        Disposition::Consumed
    }

    pub fn handle_touch(&mut self, event: &TouchEvent) -> Disposition {
        let contacts = event.contacts.len();
        match event.phase {
            TouchPhase::Start => {
                if contacts < 2 {
                    self.cancel_gesture();
                    return Disposition::Ignored;
                }
                if contacts > 2 {
                    return Disposition::Ignored;
                }
                match event.pinch_distance() {
                    Some(distance) if distance.is_finite() && distance > 0.0 => {
                        self.gesture = GestureState::Pinching(PinchBaseline {
                            distance,
                            scale: self.scale,
                        });
                        tracing::trace!(target: "zoom", distance, scale = self.scale.get(), "pinch_baseline");
                        Disposition::Observed
                    }
                    _ => {
                        self.cancel_gesture();
                        Disposition::Ignored
                    }
                }
            }
            TouchPhase::Move => {
                if contacts < 2 {
                    self.cancel_gesture();
                    return Disposition::Ignored;
                }
                let GestureState::Pinching(baseline) = self.gesture else {
                    return Disposition::Ignored;
                };
                if contacts > 2 {
                    return Disposition::Ignored;
                }
                let Some(current) = event.pinch_distance().filter(|d| d.is_finite()) else {
                    return Disposition::Ignored;
                };
                let requested = baseline.scale.get() * (current / baseline.distance);
                self.set_scale(requested, ScaleSource::Pinch);
                Disposition::Consumed
            }
            TouchPhase::End | TouchPhase::Cancel => {
                let was_pinching = self.is_pinching();
                self.cancel_gesture();
                if was_pinching {
                    Disposition::Observed
                } else {
                    Disposition::Ignored
                }
            }
        }
    }

    fn set_scale(&mut self, requested: f64, source: ScaleSource) {
        let next = FontScale::new(requested);
        if next != self.scale {
            tracing::debug!(
                target: "zoom",
                from = self.scale.get(),
                to = next.get(),
                clamped = next.is_clamped_from(requested),
                source = ?source,
                "scale_changed"
            );
        }
        self.scale = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::{ContactPoint, ModMask};

    fn touch(phase: TouchPhase, pts: &[(f64, f64)]) -> TouchEvent {
        TouchEvent::new(
            phase,
            pts.iter().map(|&(x, y)| ContactPoint::new(x, y)).collect(),
        )
    }

    #[test]
    fn initial_scale_is_clamped() {
        assert_eq!(ZoomController::new(4.0).font_scale(), MIN_SCALE);
        assert_eq!(ZoomController::new(99.0).font_scale(), MAX_SCALE);
        assert_eq!(ZoomController::default().font_scale(), DEFAULT_SCALE);
        assert_eq!(FontScale::new(f64::NAN).get(), MIN_SCALE);
    }

    #[test]
    fn wheel_needs_precision_modifier() {
        let mut z = ZoomController::new(14.0);
        let d = z.handle_wheel(&WheelEvent::new(-3.0, ModMask::SHIFT));
        assert_eq!(d, Disposition::Ignored);
        assert_eq!(z.font_scale(), 14.0);
    }

    #[test]
    fn wheel_steps_by_one() {
        let mut z = ZoomController::new(14.0);
        assert_eq!(
            z.handle_wheel(&WheelEvent::new(-120.0, ModMask::CTRL)),
            Disposition::Consumed
        );
        assert_eq!(z.font_scale(), 15.0);
        z.handle_wheel(&WheelEvent::new(0.5, ModMask::META));
        z.handle_wheel(&WheelEvent::new(40.0, ModMask::META));
        assert_eq!(z.font_scale(), 13.0);
    }

    #[test]
    fn wheel_clamps_and_still_consumes() {
        let mut z = ZoomController::new(32.0);
        assert_eq!(
            z.handle_wheel(&WheelEvent::new(-1.0, ModMask::CTRL)),
            Disposition::Consumed
        );
        assert_eq!(z.font_scale(), 32.0);
    }

    #[test]
    fn pinch_scales_proportionally_from_baseline() {
        let mut z = ZoomController::new(14.0);
        assert_eq!(
            z.handle_touch(&touch(TouchPhase::Start, &[(0.0, 0.0), (100.0, 0.0)])),
            Disposition::Observed
        );
        assert_eq!(
            z.handle_touch(&touch(TouchPhase::Move, &[(0.0, 0.0), (150.0, 0.0)])),
            Disposition::Consumed
        );
        assert_eq!(z.font_scale(), 21.0);
        // Proportional to the baseline, not the previous move.
        z.handle_touch(&touch(TouchPhase::Move, &[(0.0, 0.0), (50.0, 0.0)]));
        assert_eq!(z.font_scale(), MIN_SCALE);
        z.handle_touch(&touch(TouchPhase::Move, &[(0.0, 0.0), (100.0, 0.0)]));
        assert_eq!(z.font_scale(), 14.0);
    }

    #[test]
    fn end_clears_baseline_so_next_gesture_rebaselines() {
        let mut z = ZoomController::new(14.0);
        z.handle_touch(&touch(TouchPhase::Start, &[(0.0, 0.0), (100.0, 0.0)]));
        z.handle_touch(&touch(TouchPhase::Move, &[(0.0, 0.0), (200.0, 0.0)]));
        assert_eq!(z.font_scale(), 28.0);
        assert_eq!(z.handle_touch(&touch(TouchPhase::End, &[])), Disposition::Observed);
        assert!(!z.is_pinching());
        // A move without a fresh start must not jump.
        assert_eq!(
            z.handle_touch(&touch(TouchPhase::Move, &[(0.0, 0.0), (10.0, 0.0)])),
            Disposition::Ignored
        );
        assert_eq!(z.font_scale(), 28.0);
        z.handle_touch(&touch(TouchPhase::Start, &[(0.0, 0.0), (10.0, 0.0)]));
        z.handle_touch(&touch(TouchPhase::Move, &[(0.0, 0.0), (5.0, 0.0)]));
        assert_eq!(z.font_scale(), 14.0);
    }

    #[test]
    fn single_contact_moves_are_not_consumed() {
        let mut z = ZoomController::new(14.0);
        z.handle_touch(&touch(TouchPhase::Start, &[(0.0, 0.0), (100.0, 0.0)]));
        let d = z.handle_touch(&touch(TouchPhase::Move, &[(10.0, 10.0)]));
        assert_eq!(d, Disposition::Ignored);
        assert!(!z.is_pinching());
        assert_eq!(
            z.handle_touch(&touch(TouchPhase::Start, &[(1.0, 1.0)])),
            Disposition::Ignored
        );
    }

    #[test]
    fn zero_distance_start_does_not_arm() {
        let mut z = ZoomController::new(14.0);
        z.handle_touch(&touch(TouchPhase::Start, &[(5.0, 5.0), (5.0, 5.0)]));
        assert!(!z.is_pinching());
        z.handle_touch(&touch(TouchPhase::Move, &[(0.0, 0.0), (50.0, 0.0)]));
        assert_eq!(z.font_scale(), 14.0);
    }

    #[test]
    fn bindings_are_non_passive_for_wheel_and_move() {
        let z = ZoomController::default();
        let active: Vec<EventKind> = z
            .bindings()
            .iter()
            .filter(|b| !b.passive)
            .map(|b| b.kind)
            .collect();
        assert_eq!(active, vec![EventKind::Wheel, EventKind::TouchMove]);
    }

    #[test]
    fn activation_is_ignored() {
        let mut z = ZoomController::default();
        let ev = SurfaceEvent::Activate(core_events::ActivationEvent::new(
            1,
            core_events::SelectionSnapshot::none(),
        ));
        assert_eq!(z.handle(&ev), Disposition::Ignored);
    }
}
