//! Viewer model: the component that owns everything the source viewer shows.
//!
//! A [`Viewer`] holds the loaded content, its [`ContentKind`], the fold model
//! (ranges + fold state), the zoom controller and the listener bindings for
//! the surface it is mounted on. Nothing here is shared across viewers or
//! persisted.
//!
//! Lifecycle:
//! * `mount` registers the zoom bindings plus a passive activation binding.
//! * `load` with changed content resets fold state, publishes the new range
//!   set, then releases and re-registers listeners so no pinch baseline from
//!   the previous content survives. The zoom scale itself is kept.
//! * `unmount` releases every binding.
//!
//! Ordering: fold state is cleared before the new ranges are visible, and both
//! happen inside one `&mut self` call, so a frame can never pair ranges from
//! one content with folds from another.

use core_config::Config;
use core_events::{
    Disposition, EventKind, ListenerBinding, ListenerRegistry, SelectionSnapshot, SurfaceEvent,
};
use core_fold::{FoldModel, HeuristicScanner, LineDirective};
use core_text::Buffer;
use core_zoom::{DEFAULT_SCALE, ZoomController};

mod content_kind;
pub use content_kind::ContentKind;

const ACTIVATE_BINDING: ListenerBinding = ListenerBinding::passive(EventKind::Activate);

#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub initial_scale: f64,
    pub comment_markers: Vec<String>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            initial_scale: DEFAULT_SCALE,
            comment_markers: core_fold::DEFAULT_COMMENT_MARKERS
                .map(String::from)
                .to_vec(),
        }
    }
}

impl ViewerOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            initial_scale: config.effective_initial_scale(),
            comment_markers: config.comment_markers().to_vec(),
        }
    }
}

/// Everything a line renderer needs for one pass.
#[derive(Debug)]
pub struct ViewFrame<'a> {
    pub buffer: Option<&'a Buffer>,
    pub kind: ContentKind,
    pub directives: Vec<LineDirective>,
    /// Folded range starts, including ones hidden inside an outer fold.
    pub folded: usize,
    pub font_scale: f64,
}

#[derive(Debug)]
pub struct Viewer {
    content: Option<Buffer>,
    kind: ContentKind,
    folds: FoldModel,
    zoom: ZoomController,
    listeners: ListenerRegistry,
    mounted: bool,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerOptions::default())
    }
}

impl Viewer {
    pub fn new(options: ViewerOptions) -> Self {
        let scanner = HeuristicScanner::with_comment_markers(options.comment_markers);
        Self {
            content: None,
            kind: ContentKind::default(),
            folds: FoldModel::new(scanner),
            zoom: ZoomController::new(options.initial_scale),
            listeners: ListenerRegistry::new(),
            mounted: false,
        }
    }

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.bind_listeners();
        tracing::debug!(target: "viewer", "mounted");
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.listeners.release_all();
        self.zoom.cancel_gesture();
        tracing::debug!(target: "viewer", "unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Load content named `name`. Returns `false` when neither the text nor
    /// the kind changed, in which case nothing is recomputed and only the
    /// buffer name is updated.
    pub fn load(&mut self, name: &str, content: Option<&str>) -> bool {
        let kind = ContentKind::from_filename(name);
        let unchanged = kind == self.kind
            && match (&self.content, content) {
                (None, None) => true,
                (Some(old), Some(new)) => old.text() == new,
                _ => false,
            };
        if unchanged {
            if let Some(buffer) = self.content.as_mut()
                && buffer.name != name
            {
                buffer.name = name.to_owned();
            }
            tracing::trace!(target: "viewer", name, "content_unchanged");
            return false;
        }

        self.kind = kind;
        self.content = content.map(|text| Buffer::from_str(name, text));
        let foldable = self.content.as_ref().filter(|_| kind.is_foldable());
        self.folds.load(foldable);

        if self.mounted {
            self.listeners.release_all();
            self.zoom.cancel_gesture();
            self.bind_listeners();
        }
        tracing::debug!(
            target: "viewer",
            name,
            kind = ?kind,
            lines = self.line_count(),
            ranges = self.folds.ranges().len(),
            "content_loaded"
        );
        true
    }

    pub fn content(&self) -> Option<&Buffer> {
        self.content.as_ref()
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Lines in the loaded content, 0 when nothing is loaded.
    pub fn line_count(&self) -> usize {
        self.content.as_ref().map_or(0, Buffer::line_count)
    }

    pub fn folds(&self) -> &FoldModel {
        &self.folds
    }

    pub fn folds_mut(&mut self) -> &mut FoldModel {
        &mut self.folds
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn font_scale(&self) -> f64 {
        self.zoom.font_scale()
    }

    pub fn toggle(&mut self, start: usize) -> Option<bool> {
        self.folds.toggle(start)
    }

    pub fn directive(&self, line: usize) -> Option<LineDirective> {
        (1..=self.line_count())
            .contains(&line)
            .then(|| self.folds.directive(line))
    }

    pub fn directives(&self) -> Vec<LineDirective> {
        self.folds.directives(self.line_count())
    }

    pub fn frame(&self) -> ViewFrame<'_> {
        ViewFrame {
            buffer: self.content.as_ref(),
            kind: self.kind,
            directives: self.directives(),
            folded: self.folds.state().len(),
            font_scale: self.font_scale(),
        }
    }

    /// Route a surface event. Events without a registered binding are ignored.
    pub fn handle_event(&mut self, event: &SurfaceEvent) -> Disposition {
        let kind = event.kind();
        if !self.listeners.is_bound(kind) {
            tracing::trace!(target: "viewer", %kind, "event_without_binding");
            return Disposition::Ignored;
        }
        match event {
            SurfaceEvent::Wheel(_) | SurfaceEvent::Touch(_) => self.zoom.handle(event),
            SurfaceEvent::Activate(activation) => {
                self.activate(activation.line, &activation.selection)
            }
        }
    }

    /// Run the activation handler of `line`, if it has one.
    pub fn activate(&mut self, line: usize, selection: &SelectionSnapshot) -> Disposition {
        let Some(action) = self.directive(line).and_then(|d| d.on_activate) else {
            return Disposition::Ignored;
        };
        if self.folds.activate(action, selection) {
            Disposition::Consumed
        } else {
            Disposition::Ignored
        }
    }

    fn bind_listeners(&mut self) {
        self.listeners.register_all(self.zoom.bindings());
        self.listeners.register_all(&[ACTIVATE_BINDING]);
    }
}
