//! Standalone desktop window backed by winit.
//!
//! ```no_run
//! # use vantage::{Scene, Viewer};
//! # use glam::Vec3;
//! let mut scene = Scene::with_ground();
//! let _ = scene.add_box("Building A", Vec3::new(0.0, 1.0, 1.0), Vec3::splat(2.0));
//! Viewer::builder()
//!     .with_scene(scene)
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    controller::ViewEvent, error::VantageError, options::Options,
    InputEvent, MouseButton, Scene, ViewerEngine,
};

/// Pixels of trackpad scroll per dolly unit.
const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    scene: Scene,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Vantage", empty
    /// scene with a ground plane, default options).
    fn new() -> Self {
        Self {
            scene: Scene::with_ground(),
            options: None,
            title: "Vantage".into(),
        }
    }

    /// Set the scene to display.
    #[must_use]
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scene = scene;
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            scene: self.scene,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays a scene with focus navigation.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    scene: Scene,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Viewer`] if the event loop cannot be
    /// created or fails.
    pub fn run(self) -> Result<(), VantageError> {
        let event_loop = EventLoop::new()
            .map_err(|e| VantageError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            pending: Some((self.scene, self.options)),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VantageError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    /// Scene and options waiting for the window to exist.
    pending: Option<(Scene, Options)>,
    title: String,
}

/// Compute the wgpu surface size from the window's inner size.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    /// Log controller notifications and reflect focus in the title.
    fn report_events(&self, events: Vec<ViewEvent>) {
        let (Some(window), Some(engine)) = (&self.window, &self.engine) else {
            return;
        };
        for event in events {
            match event {
                ViewEvent::Focused(id) => {
                    let name = engine
                        .scene()
                        .object(id)
                        .map_or("?", |o| o.name.as_str());
                    log::info!("viewing {name}");
                    window.set_title(&format!("{}: {name}", self.title));
                }
                ViewEvent::OverviewRestored => {
                    window.set_title(&self.title);
                }
                ViewEvent::FocusStarted(_) | ViewEvent::OverviewStarted => {}
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some((scene, options)) = self.pending.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let engine = match pollster::block_on(ViewerEngine::new(
            window.clone(),
            size,
            scene,
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                engine.resize(vp_w, vp_h);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let (vp_w, vp_h) = viewport_size(window.inner_size());
                engine.resize(vp_w, vp_h);
            }

            WindowEvent::RedrawRequested => {
                let _ = engine.update();
                match engine.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
                    ) => {
                        let (vp_w, vp_h) = viewport_size(window.inner_size());
                        engine.resize(vp_w, vp_h);
                        engine.reconfigure();
                    }
                    Err(e) => {
                        log::error!("render error: {e:?}");
                    }
                }
                window.request_redraw();
                let events = engine.drain_events();
                self.report_events(events);
            }

            WindowEvent::Focused(false) => {
                engine.release_pointer();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(button) = MouseButton::from_winit(button) {
                    engine.handle_input(InputEvent::MouseButton {
                        button,
                        pressed: state == ElementState::Pressed,
                    });
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                engine.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_SCROLL_LINE
                    }
                };
                engine.handle_input(InputEvent::Scroll {
                    delta: scroll_delta,
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                use winit::keyboard::PhysicalKey;
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if !engine.handle_key_press(&key_str) {
                    log::trace!("unbound key {key_str}");
                }
            }

            _ => (),
        }
    }
}
