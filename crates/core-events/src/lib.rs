//! Viewer surface event vocabulary.
//!
//! The viewer surface produces three families of input: wheel ticks, touch
//! contact updates and plain pointer activations on a rendered line. They are
//! normalized here so the zoom controller and the fold activation path never
//! see platform types.
//!
//! Listener bindings describe which event kinds a component wants delivered
//! and whether it needs to suppress the platform default (non-passive). The
//! [`ListenerRegistry`] holds the bindings for one mounted viewer and releases
//! them as a unit on unmount or content change.

use std::fmt;

bitflags::bitflags! {
    /// Modifier keys held while a surface event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ModMask: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

impl ModMask {
    /// Modifiers that turn a wheel tick into a zoom step instead of a scroll.
    pub const PRECISION: ModMask = ModMask::CTRL.union(ModMask::META);

    pub fn has_precision(self) -> bool {
        self.intersects(Self::PRECISION)
    }
}

/// One wheel tick. Positive `delta_y` scrolls down (content moves up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta_y: f64,
    pub mods: ModMask,
}

impl WheelEvent {
    pub fn new(delta_y: f64, mods: ModMask) -> Self {
        Self { delta_y, mods }
    }
}

/// A single active contact in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    pub x: f64,
    pub y: f64,
}

impl ContactPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ContactPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Touch update carrying every contact still active after the change.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub contacts: Vec<ContactPoint>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, contacts: Vec<ContactPoint>) -> Self {
        Self { phase, contacts }
    }

    /// Distance between the first two contacts, if at least two are active.
    pub fn pinch_distance(&self) -> Option<f64> {
        match self.contacts.as_slice() {
            [a, b, ..] => Some(a.distance_to(b)),
            _ => None,
        }
    }
}

/// Text selected by the gesture that produced an activation.
///
/// Captured by the surface when the activation fires and handed to the fold
/// activation path, which must not toggle when anything was selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSnapshot {
    text: String,
}

impl SelectionSnapshot {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// True when no characters were selected. Whitespace counts as a selection.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Plain activation (click / tap) on a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationEvent {
    pub line: usize,
    pub selection: SelectionSnapshot,
}

impl ActivationEvent {
    pub fn new(line: usize, selection: SelectionSnapshot) -> Self {
        Self { line, selection }
    }
}

/// Top-level event delivered to a mounted viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Wheel(WheelEvent),
    Touch(TouchEvent),
    Activate(ActivationEvent),
}

impl SurfaceEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SurfaceEvent::Wheel(_) => EventKind::Wheel,
            SurfaceEvent::Touch(t) => match t.phase {
                TouchPhase::Start => EventKind::TouchStart,
                TouchPhase::Move => EventKind::TouchMove,
                TouchPhase::End => EventKind::TouchEnd,
                TouchPhase::Cancel => EventKind::TouchCancel,
            },
            SurfaceEvent::Activate(_) => EventKind::Activate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Wheel,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    Activate,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Wheel => "wheel",
            EventKind::TouchStart => "touchstart",
            EventKind::TouchMove => "touchmove",
            EventKind::TouchEnd => "touchend",
            EventKind::TouchCancel => "touchcancel",
            EventKind::Activate => "activate",
        };
        f.write_str(name)
    }
}

/// How a handler dealt with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Not relevant to the handler; the platform default proceeds untouched.
    Ignored,
    /// State updated, platform default still proceeds (passive handling).
    Observed,
    /// State updated and the platform default must be suppressed.
    Consumed,
}

impl Disposition {
    pub fn prevents_default(self) -> bool {
        matches!(self, Disposition::Consumed)
    }
}

/// A requested delivery of one event kind.
///
/// `passive == false` means the handler may return [`Disposition::Consumed`]
/// and the surface must register the listener with default-prevention enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerBinding {
    pub kind: EventKind,
    pub passive: bool,
}

impl ListenerBinding {
    pub const fn passive(kind: EventKind) -> Self {
        Self {
            kind,
            passive: true,
        }
    }

    pub const fn active(kind: EventKind) -> Self {
        Self {
            kind,
            passive: false,
        }
    }
}

/// Bindings held by one mounted viewer.
///
/// Each `register_all` call bumps the generation so a surface adapter can tell
/// a re-registration apart from the bindings it already installed.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    bindings: Vec<ListenerBinding>,
    generation: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `bindings`, replacing any duplicate kind already present.
    pub fn register_all(&mut self, bindings: &[ListenerBinding]) {
        for binding in bindings {
            self.bindings.retain(|b| b.kind != binding.kind);
            self.bindings.push(*binding);
        }
        self.generation += 1;
        tracing::debug!(
            target: "viewer.listeners",
            count = self.bindings.len(),
            generation = self.generation,
            "listeners_registered"
        );
    }

    /// Drop every binding. Returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let released = self.bindings.len();
        self.bindings.clear();
        if released > 0 {
            tracing::debug!(
                target: "viewer.listeners",
                released,
                generation = self.generation,
                "listeners_released"
            );
        }
        released
    }

    pub fn binding(&self, kind: EventKind) -> Option<&ListenerBinding> {
        self.bindings.iter().find(|b| b.kind == kind)
    }

    pub fn is_bound(&self, kind: EventKind) -> bool {
        self.binding(kind).is_some()
    }

    pub fn bindings(&self) -> &[ListenerBinding] {
        &self.bindings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
