//! Debug overlay controller
//!
//! Ties the frame timer, text reporter and graph together behind the
//! configuration. The host calls [`DebugOverlay::update`] once per rendered
//! frame and [`DebugOverlay::loop_status`] whenever its loop starts or stops.
//!
//! # Shared container
//!
//! Every overlay attaches to the element registered under its container id,
//! creating it only if the document has none. Two overlays with the same id
//! share one container: each appends its own rows, and the one built last
//! decides the container's style.

use crate::config::{ConfigError, OverlayConfig};
use crate::loop_status::log_loop_status;
use crate::style;
use crate::text_reporter::TextReporter;
use overlay_display::{ClickListener, DisplayError, ElementId, ElementKind, SharedDocument};
use overlay_metrics::{Clock, FrameSample, FrameTimer, MonotonicClock};
use overlay_render::{GraphLayout, GraphRenderer, PixelSurface, Surface, SurfaceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to create graph surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error("failed to build overlay elements: {0}")]
    Display(#[from] DisplayError),
}

type GraphFactory<S> = Box<dyn FnOnce(&GraphLayout) -> Result<GraphRenderer<S>, SurfaceError>>;

/// Builder for [`DebugOverlay`].
pub struct DebugOverlayBuilder<S: Surface = PixelSurface> {
    config: OverlayConfig,
    document: Option<SharedDocument>,
    loop_toggle: Option<ClickListener>,
    clock: Box<dyn Clock>,
    make_graph: GraphFactory<S>,
}

impl DebugOverlayBuilder<PixelSurface> {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            document: None,
            loop_toggle: None,
            clock: Box::new(MonotonicClock::new()),
            make_graph: Box::new(|layout: &GraphLayout| GraphRenderer::new(layout)),
        }
    }
}

impl<S: Surface> DebugOverlayBuilder<S> {
    /// Document the overlay attaches to. Without one the overlay stays
    /// invisible even when `overlay_on` is set.
    pub fn with_document(mut self, document: SharedDocument) -> Self {
        self.document = Some(document);
        self
    }

    /// Called when the loop indicator is clicked.
    pub fn with_loop_toggle(mut self, toggle: impl FnMut() + 'static) -> Self {
        self.loop_toggle = Some(Box::new(toggle));
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the graph's drawing surface.
    pub fn with_graph_factory<T, F>(self, make_graph: F) -> DebugOverlayBuilder<T>
    where
        T: Surface,
        F: FnOnce(&GraphLayout) -> Result<GraphRenderer<T>, SurfaceError> + 'static,
    {
        DebugOverlayBuilder {
            config: self.config,
            document: self.document,
            loop_toggle: self.loop_toggle,
            clock: self.clock,
            make_graph: Box::new(make_graph),
        }
    }

    pub fn build(self) -> Result<DebugOverlay<S>, OverlayError> {
        let Self {
            config,
            document,
            loop_toggle,
            clock,
            make_graph,
        } = self;
        config.validate()?;

        let view = match (config.overlay_on, document) {
            (false, _) => {
                tracing::debug!("overlay disabled, measuring only");
                None
            }
            (true, None) => {
                tracing::warn!("overlay enabled without a document, measuring only");
                None
            }
            (true, Some(document)) => {
                let graph = if config.graph_on {
                    Some(make_graph(&config.graph)?)
                } else {
                    None
                };
                Some(OverlayView::attach(&config, document, loop_toggle, graph)?)
            }
        };

        Ok(DebugOverlay {
            config,
            clock,
            timer: FrameTimer::new(),
            view,
        })
    }
}

/// Elements and renderers that exist only while the overlay is on.
struct OverlayView<S: Surface> {
    document: SharedDocument,
    container: ElementId,
    fps: ElementId,
    frame_time: ElementId,
    loop_indicator: ElementId,
    reporter: TextReporter,
    graph: Option<(GraphRenderer<S>, ElementId)>,
}

impl<S: Surface> OverlayView<S> {
    fn attach(
        config: &OverlayConfig,
        document: SharedDocument,
        loop_toggle: Option<ClickListener>,
        graph: Option<GraphRenderer<S>>,
    ) -> Result<Self, DisplayError> {
        let mut doc = document.borrow_mut();

        let (container, created) = doc.get_or_create_by_id(&config.container_id, ElementKind::Div);
        if created {
            tracing::debug!(container_id = %config.container_id, "created overlay container");
        } else {
            tracing::debug!(container_id = %config.container_id, "reusing overlay container");
        }
        doc.set_style(container, &style::container_style())?;
        doc.set_class(container, style::CONTAINER_CLASS)?;

        let fps = doc.create_text(ElementKind::Span, TextReporter::INITIAL_RATE_TEXT);
        doc.set_title(fps, style::FPS_TITLE)?;
        let frame_time = doc.create_text(ElementKind::Span, TextReporter::INITIAL_TIME_TEXT);
        doc.set_title(frame_time, style::FRAME_TIME_TITLE)?;

        if config.is_compact {
            let row = doc.create(ElementKind::Div);
            let spacer = doc.create_text(ElementKind::Span, ", ");
            doc.append_child(row, fps)?;
            doc.append_child(row, spacer)?;
            doc.append_child(row, frame_time)?;
            doc.append_child(container, row)?;
        } else {
            for (label, value) in [("framerate: ", fps), ("frametime: ", frame_time)] {
                let row = doc.create(ElementKind::Div);
                let label = doc.create_text(ElementKind::Span, label);
                doc.append_child(row, label)?;
                doc.append_child(row, value)?;
                doc.append_child(container, row)?;
            }
        }

        let loop_row = doc.create(ElementKind::Div);
        let loop_label = doc.create_text(ElementKind::Span, "loop: ");
        let loop_indicator = doc.create_text(ElementKind::Span, "null");
        doc.set_title(loop_indicator, style::LOOP_TITLE)?;
        doc.append_child(loop_row, loop_label)?;
        doc.append_child(loop_row, loop_indicator)?;
        doc.append_child(container, loop_row)?;

        let graph = match graph {
            Some(renderer) => {
                let surface = renderer.surface();
                let canvas = doc.create(ElementKind::Canvas {
                    width: surface.width(),
                    height: surface.height(),
                });
                doc.set_title(canvas, style::GRAPH_TITLE)?;
                doc.set_style(
                    canvas,
                    &style::graph_style(config.graph.width, config.graph.height),
                )?;
                doc.append_child(container, canvas)?;
                tracing::debug!(
                    width = surface.width(),
                    height = surface.height(),
                    "graph attached"
                );
                Some((renderer, canvas))
            }
            None => None,
        };

        let body = doc.body();
        doc.append_child(body, container)?;

        // Only an attached indicator gets the toggle
        if let Some(toggle) = loop_toggle {
            doc.add_click_listener(loop_indicator, toggle)?;
            doc.set_style(loop_indicator, &style::toggle_hint_style())?;
        }
        drop(doc);

        Ok(Self {
            document,
            container,
            fps,
            frame_time,
            loop_indicator,
            reporter: TextReporter::new(config.refresh_interval_ms),
            graph,
        })
    }

    fn refresh_text(&mut self, now_ms: f64, sample: FrameSample) {
        if !self.reporter.maybe_refresh(now_ms, sample) {
            return;
        }
        let mut doc = self.document.borrow_mut();
        let result = doc
            .set_text(self.fps, self.reporter.rate_text())
            .and_then(|_| doc.set_text(self.frame_time, self.reporter.time_text()));
        if let Err(err) = result {
            tracing::warn!(%err, "overlay text element missing");
        }
    }

    fn show_loop_status(&mut self, running: bool) {
        let mut doc = self.document.borrow_mut();
        let result = doc
            .set_text(self.loop_indicator, if running { "true" } else { "false" })
            .and_then(|_| doc.set_style(self.loop_indicator, &style::loop_indicator_style(running)));
        if let Err(err) = result {
            tracing::warn!(%err, "loop indicator element missing");
        }
    }
}

/// In-page frame timing overlay.
///
/// Frame timing always runs. Text, loop indicator and graph exist only when
/// the configuration turns the overlay on.
pub struct DebugOverlay<S: Surface = PixelSurface> {
    config: OverlayConfig,
    clock: Box<dyn Clock>,
    timer: FrameTimer,
    view: Option<OverlayView<S>>,
}

impl DebugOverlay<PixelSurface> {
    pub fn builder(config: OverlayConfig) -> DebugOverlayBuilder<PixelSurface> {
        DebugOverlayBuilder::new(config)
    }

    /// Overlay on `document` with the wall clock and a software graph.
    pub fn new(
        config: OverlayConfig,
        document: SharedDocument,
        loop_toggle: Option<ClickListener>,
    ) -> Result<Self, OverlayError> {
        let mut builder = Self::builder(config).with_document(document);
        if let Some(toggle) = loop_toggle {
            builder = builder.with_loop_toggle(toggle);
        }
        builder.build()
    }
}

impl<S: Surface> DebugOverlay<S> {
    /// Call once per rendered frame.
    ///
    /// The text only changes once per refresh interval; the graph is
    /// redrawn on every call.
    pub fn update(&mut self) {
        let now_ms = self.clock.now_ms();
        let sample = self.timer.tick(now_ms);

        let Some(view) = self.view.as_mut() else {
            return;
        };
        view.refresh_text(now_ms, sample);
        if let Some((graph, _)) = view.graph.as_mut() {
            graph.update(sample.frame_time_ms);
            graph.render();
        }
    }

    /// Call whenever the host loop starts (`true`) or stops (`false`).
    pub fn loop_status(&mut self, running: bool) {
        if let Some(view) = self.view.as_mut() {
            view.show_loop_status(running);
        }
        if self.config.loop_status_log_on {
            log_loop_status(running);
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn sample(&self) -> FrameSample {
        self.timer.sample()
    }

    pub fn is_visible(&self) -> bool {
        self.view.is_some()
    }

    pub fn graph(&self) -> Option<&GraphRenderer<S>> {
        self.view
            .as_ref()
            .and_then(|view| view.graph.as_ref())
            .map(|(graph, _)| graph)
    }

    pub fn container(&self) -> Option<ElementId> {
        self.view.as_ref().map(|view| view.container)
    }

    pub fn loop_indicator(&self) -> Option<ElementId> {
        self.view.as_ref().map(|view| view.loop_indicator)
    }

    pub fn graph_element(&self) -> Option<ElementId> {
        self.view
            .as_ref()
            .and_then(|view| view.graph.as_ref())
            .map(|(_, canvas)| *canvas)
    }

    /// The fps and frame time elements, in that order.
    pub fn text_elements(&self) -> Option<(ElementId, ElementId)> {
        self.view.as_ref().map(|view| (view.fps, view.frame_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overlay_display::{dispatch_click, Document};
    use overlay_metrics::ManualClock;
    use overlay_render::{Rect, Rgba, Vec2};
    use std::cell::Cell;
    use std::rc::Rc;

    fn visible(graph_on: bool) -> OverlayConfig {
        OverlayConfig {
            overlay_on: true,
            graph_on,
            loop_status_log_on: false,
            ..OverlayConfig::default()
        }
    }

    /// Counts draw calls.
    struct CountingSurface {
        draws: Rc<Cell<usize>>,
    }

    impl Surface for CountingSurface {
        fn width(&self) -> u32 {
            64
        }

        fn height(&self) -> u32 {
            16
        }

        fn global_alpha(&self) -> f32 {
            1.0
        }

        fn set_global_alpha(&mut self, _alpha: f32) {}

        fn fill_rect(&mut self, _rect: Rect, _color: Rgba) {
            self.draws.set(self.draws.get() + 1);
        }

        fn stroke_polyline(&mut self, _points: &[Vec2], _line_width: f32, _color: Rgba) {
            self.draws.set(self.draws.get() + 1);
        }
    }

    fn counting_overlay(
        config: OverlayConfig,
        document: SharedDocument,
        clock: ManualClock,
    ) -> (DebugOverlay<CountingSurface>, Rc<Cell<usize>>, Rc<Cell<bool>>) {
        let draws = Rc::new(Cell::new(0));
        let factory_called = Rc::new(Cell::new(false));
        let (d, f) = (draws.clone(), factory_called.clone());
        let overlay = DebugOverlay::builder(config)
            .with_document(document)
            .with_clock(clock)
            .with_graph_factory(move |layout: &GraphLayout| {
                f.set(true);
                Ok(GraphRenderer::with_surface(
                    CountingSurface { draws: d },
                    layout.capacity,
                ))
            })
            .build()
            .unwrap();
        (overlay, draws, factory_called)
    }

    #[test]
    fn disabled_overlay_only_measures() {
        let doc = Document::shared();
        let clock = ManualClock::new();
        let (mut overlay, draws, factory_called) =
            counting_overlay(OverlayConfig::default(), doc.clone(), clock.clone());

        for _ in 0..100 {
            clock.advance(16.0);
            overlay.update();
        }
        overlay.loop_status(true);

        assert!(!overlay.is_visible());
        assert!(overlay.graph().is_none());
        assert!(!factory_called.get());
        assert_eq!(draws.get(), 0);
        assert_eq!(overlay.sample().frame_time_ms, 16.0);
        assert!(doc.borrow().children(doc.borrow().body()).is_empty());
    }

    #[test]
    fn graph_on_without_overlay_builds_nothing() {
        let doc = Document::shared();
        let config = OverlayConfig {
            graph_on: true,
            ..OverlayConfig::default()
        };
        let (mut overlay, draws, factory_called) =
            counting_overlay(config, doc, ManualClock::new());
        overlay.update();
        overlay.update();

        assert!(!factory_called.get());
        assert_eq!(draws.get(), 0);
    }

    #[test]
    fn overlay_without_document_degrades_to_measuring() {
        let clock = ManualClock::new();
        let mut overlay = DebugOverlay::builder(visible(true))
            .with_clock(clock.clone())
            .build()
            .unwrap();

        overlay.update();
        clock.advance(10.0);
        overlay.update();

        assert!(!overlay.is_visible());
        assert_eq!(overlay.sample().frame_rate_hz, 100.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = OverlayConfig {
            refresh_interval_ms: -1.0,
            ..OverlayConfig::default()
        };
        let result = DebugOverlay::builder(config).build();
        assert!(matches!(result, Err(OverlayError::Config(_))));
    }

    #[test]
    fn compact_layout() {
        let doc = Document::shared();
        let overlay = DebugOverlay::new(visible(false), doc.clone(), None).unwrap();
        let doc = doc.borrow();
        let container = overlay.container().unwrap();

        assert_eq!(doc.children(doc.body()), &[container]);
        assert_eq!(doc.text_content(container), "00.00 fps, 00.00 msloop: null");
        assert_eq!(doc.children(container).len(), 2);

        let element = doc.element(container).unwrap();
        assert_eq!(element.dom_id.as_deref(), Some("debug-container"));
        assert_eq!(element.class.as_deref(), Some("noselect debug-overlay"));
        assert!(element.style.starts_with("position:absolute;"));
        assert!(element.style.contains("user-select:none;"));
    }

    #[test]
    fn labelled_layout() {
        let doc = Document::shared();
        let config = OverlayConfig {
            is_compact: false,
            ..visible(false)
        };
        let overlay = DebugOverlay::new(config, doc.clone(), None).unwrap();
        let doc = doc.borrow();
        let container = overlay.container().unwrap();

        assert_eq!(doc.children(container).len(), 3);
        assert_eq!(
            doc.text_content(container),
            "framerate: 00.00 fpsframetime: 00.00 msloop: null"
        );
        let (fps, frame_time) = overlay.text_elements().unwrap();
        assert_eq!(
            doc.element(fps).unwrap().title.as_deref(),
            Some("Displaying the current frame rate")
        );
        assert_eq!(
            doc.element(frame_time).unwrap().title.as_deref(),
            Some("Displaying the current frame time")
        );
    }

    #[test]
    fn text_refresh_is_throttled() {
        let doc = Document::shared();
        let clock = ManualClock::starting_at(1000.0);
        let mut overlay = DebugOverlay::builder(visible(false))
            .with_document(doc.clone())
            .with_clock(clock.clone())
            .build()
            .unwrap();
        let (fps, frame_time) = overlay.text_elements().unwrap();

        // Seeds the timer; the interval has passed so the zero metrics show
        overlay.update();
        assert_eq!(doc.borrow().text(fps), Some("0.00 fps"));

        clock.advance(20.0);
        overlay.update();
        assert_eq!(doc.borrow().text(fps), Some("0.00 fps"));

        clock.advance(250.0);
        overlay.update();
        assert_eq!(doc.borrow().text(fps), Some("4.00 fps"));
        assert_eq!(doc.borrow().text(frame_time), Some("250.00 ms"));
    }

    #[test]
    fn graph_redraws_every_frame() {
        let doc = Document::shared();
        let clock = ManualClock::new();
        let (mut overlay, draws, factory_called) =
            counting_overlay(visible(true), doc, clock.clone());
        assert!(factory_called.get());

        for _ in 0..5 {
            clock.advance(16.0);
            overlay.update();
        }

        // One fade and one stroke per frame, never throttled
        assert_eq!(draws.get(), 10);
        let samples: Vec<f64> = overlay.graph().unwrap().samples().iter().copied().collect();
        assert_eq!(samples, vec![0.0, 16.0, 16.0, 16.0, 16.0]);
    }

    #[test]
    fn graph_element_is_sized_by_pixel_ratio() {
        let doc = Document::shared();
        let overlay = DebugOverlay::new(visible(true), doc.clone(), None).unwrap();
        let doc = doc.borrow();
        let canvas = overlay.graph_element().unwrap();
        let element = doc.element(canvas).unwrap();

        assert_eq!(
            element.kind,
            ElementKind::Canvas {
                width: 512,
                height: 72
            }
        );
        assert_eq!(element.style, "width:256px;height:36px;");
        assert_eq!(element.title.as_deref(), Some("Frame time over time"));
        assert_eq!(doc.children(overlay.container().unwrap()).last(), Some(&canvas));
    }

    #[test]
    fn loop_status_updates_indicator() {
        let doc = Document::shared();
        let mut overlay = DebugOverlay::new(visible(false), doc.clone(), None).unwrap();
        let indicator = overlay.loop_indicator().unwrap();

        overlay.loop_status(true);
        assert_eq!(doc.borrow().text(indicator), Some("true"));
        assert_eq!(
            doc.borrow().style(indicator),
            Some("cursor:Pointer;color:#5EE1F0")
        );

        overlay.loop_status(false);
        assert_eq!(doc.borrow().text(indicator), Some("false"));
        assert_eq!(
            doc.borrow().style(indicator),
            Some("cursor:Pointer;color:#FF2E62")
        );
    }

    #[test]
    fn clicking_indicator_invokes_toggle() {
        let doc = Document::shared();
        let toggles = Rc::new(Cell::new(0));
        let counter = toggles.clone();
        let overlay = DebugOverlay::builder(visible(false))
            .with_document(doc.clone())
            .with_loop_toggle(move || counter.set(counter.get() + 1))
            .build()
            .unwrap();
        let indicator = overlay.loop_indicator().unwrap();

        assert_eq!(
            doc.borrow().style(indicator),
            Some("cursor: Pointer;color:#9C8CF3")
        );
        assert!(dispatch_click(&doc, indicator));
        assert!(dispatch_click(&doc, indicator));
        assert_eq!(toggles.get(), 2);
    }

    #[test]
    fn toggle_is_registered_on_the_attached_indicator() {
        let doc = Document::shared();
        let overlay = DebugOverlay::builder(visible(true))
            .with_document(doc.clone())
            .with_loop_toggle(|| {})
            .build()
            .unwrap();
        let indicator = overlay.loop_indicator().unwrap();

        let doc = doc.borrow();
        assert!(doc.is_attached(indicator));
        assert!(doc.has_click_listener(indicator));
    }

    #[test]
    fn failed_attach_leaves_no_toggle_behind() {
        let doc = Document::shared();
        {
            // A host that nested the body under the container id
            let mut doc = doc.borrow_mut();
            let (container, _) = doc.get_or_create_by_id("debug-container", ElementKind::Div);
            let body = doc.body();
            doc.append_child(container, body).unwrap();
        }

        let toggled = Rc::new(Cell::new(false));
        let flag = toggled.clone();
        let result = DebugOverlay::builder(visible(false))
            .with_document(doc.clone())
            .with_loop_toggle(move || flag.set(true))
            .build();

        assert!(matches!(
            result,
            Err(OverlayError::Display(DisplayError::HierarchyCycle { .. }))
        ));
        // The toggle closure was dropped instead of being kept by an orphan element
        assert_eq!(Rc::strong_count(&toggled), 1);
    }

    #[test]
    fn indicator_without_toggle_is_inert() {
        let doc = Document::shared();
        let overlay = DebugOverlay::new(visible(false), doc.clone(), None).unwrap();
        let indicator = overlay.loop_indicator().unwrap();

        assert!(!doc.borrow().has_click_listener(indicator));
        assert_eq!(doc.borrow().style(indicator), Some(""));
        assert!(!dispatch_click(&doc, indicator));
    }

    #[test]
    fn overlays_share_one_container() {
        let doc = Document::shared();
        let first = DebugOverlay::new(visible(false), doc.clone(), None).unwrap();
        let second = DebugOverlay::new(visible(true), doc.clone(), None).unwrap();

        let doc = doc.borrow();
        assert_eq!(doc.count_with_id("debug-container"), 1);
        assert_eq!(first.container(), second.container());
        assert_eq!(doc.children(doc.body()).len(), 1);
        // Both overlays' rows live in the shared container
        assert_eq!(doc.children(first.container().unwrap()).len(), 5);
    }

    #[test]
    fn separate_container_ids_do_not_collide() {
        let doc = Document::shared();
        let first = DebugOverlay::new(visible(false), doc.clone(), None).unwrap();
        let second = DebugOverlay::new(
            OverlayConfig {
                container_id: "second-overlay".to_string(),
                ..visible(false)
            },
            doc.clone(),
            None,
        )
        .unwrap();

        assert_ne!(first.container(), second.container());
        assert_eq!(doc.borrow().children(doc.borrow().body()).len(), 2);
    }

    #[test]
    fn config_is_kept_as_given() {
        let config = visible(true);
        let overlay = DebugOverlay::builder(config.clone()).build().unwrap();
        assert_eq!(overlay.config(), &config);
    }
}
