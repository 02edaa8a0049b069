//! The runtime that owns the scene, the interaction controller, and the
//! GPU renderer.
//!
//! Hosts (the desktop viewer, the browser front-end) forward raw input to
//! [`ViewerEngine::handle_input`] and call [`ViewerEngine::update`] and
//! [`ViewerEngine::render`] once per display refresh.

mod input;

use crate::controller::{InteractionController, ViewEvent};
use crate::error::VantageError;
use crate::gpu::render_context::RenderContext;
use crate::input::InputProcessor;
use crate::label::LabelElement;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::scene::{ObjectId, Scene};
use crate::util::frame_timing::FrameTiming;

/// A running viewer: scene, controller, input, and renderer.
pub struct ViewerEngine {
    context: RenderContext,
    renderer: SceneRenderer,
    scene: Scene,
    controller: InteractionController,
    input: InputProcessor,
    frame_timing: FrameTiming,
    options: Options,
}

impl ViewerEngine {
    /// Initialize the GPU on `target` and start at the overview of
    /// `scene`. Every object without a label gets an overlay label.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::Gpu`] if the render context cannot be
    /// created.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scene: Scene,
        options: Options,
    ) -> Result<Self, VantageError> {
        let context = RenderContext::new(target, size).await?;
        let renderer = SceneRenderer::new(&context);
        let mut controller =
            InteractionController::new(&options, context.viewport());
        controller.labels_mut().register_scene(&scene);
        log::info!(
            "engine ready: {} objects, {}x{}",
            scene.len(),
            context.config.width,
            context.config.height
        );

        Ok(Self {
            context,
            renderer,
            scene,
            controller,
            input: InputProcessor::with_key_bindings(
                options.keybindings.clone(),
            ),
            frame_timing: FrameTiming::new(),
            options,
        })
    }

    /// Advance one frame using wall-clock time. Returns the step in
    /// seconds.
    pub fn update(&mut self) -> f32 {
        let dt = self.frame_timing.tick();
        self.controller.frame(&self.scene, dt);
        dt
    }

    /// Draw the current frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired; callers reconfigure on `Lost`/`Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer
            .render(&self.context, &self.scene, &self.controller)
    }

    /// Adopt a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        self.controller.resize(self.context.viewport());
    }

    /// Reconfigure the surface at its current size.
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Replace the label element of `object`.
    pub fn register_label(
        &mut self,
        object: ObjectId,
        text: &str,
        element: Box<dyn LabelElement>,
    ) {
        self.controller.labels_mut().register(object, text, element);
    }

    /// Stop drawing label rectangles (labels are rendered by the host).
    pub fn disable_label_markers(&mut self) {
        self.renderer.set_label_markers(false);
    }

    /// Take the controller's queued notifications.
    pub fn drain_events(&mut self) -> Vec<ViewEvent> {
        self.controller.drain_events().collect()
    }

    /// Replace the options and apply them to input and controller.
    pub fn set_options(&mut self, options: Options) {
        self.input.set_key_bindings(options.keybindings.clone());
        self.controller.apply_options(&options);
        self.options = options;
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access. Call [`sync_labels`](Self::sync_labels)
    /// after adding or removing objects.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Drop labels of removed objects and give every object that lacks
    /// one an overlay label.
    pub fn sync_labels(&mut self) {
        let labels = self.controller.labels_mut();
        let _ = labels.prune(&self.scene);
        labels.register_scene(&self.scene);
    }

    /// The interaction controller.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn screen_size(&self) -> (u32, u32) {
        self.context.size()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}
