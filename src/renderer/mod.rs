//! wgpu rendering of the scene and its label overlay.
//!
//! Objects are drawn as instanced, lit boxes and the ground as a
//! single-sided quad in one depth-tested pass; visible labels are drawn on
//! top as screen-space rectangles afterwards in the same pass.

pub mod instances;
pub(crate) mod pipeline_util;

use wgpu::util::DeviceExt;

use self::instances::{
    box_instances, cube_vertices, ground_vertices, label_instances,
    BoxInstance, CubeVertex, LabelInstance,
};
use crate::camera::CameraUniform;
use crate::controller::InteractionController;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTarget;
use crate::scene::Scene;

/// Background color.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.55,
    g: 0.68,
    b: 0.82,
    a: 1.0,
};

const CUBE_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const BOX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![2 => Float32x4, 3 => Float32x4, 4 => Float32x4];
const LABEL_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

/// Draws boxes for scene objects, the ground, and label rectangles.
pub struct SceneRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    box_pipeline: wgpu::RenderPipeline,
    cube_vertices: wgpu::Buffer,
    cube_vertex_count: u32,
    ground_vertices: wgpu::Buffer,
    ground_vertex_count: u32,
    box_buffer: TypedBuffer<BoxInstance>,
    /// Leading instances in `box_buffer` that use the ground mesh.
    ground_instances: u32,
    label_pipeline: wgpu::RenderPipeline,
    label_buffer: TypedBuffer<LabelInstance>,
    /// Draw label rectangles (off when labels are DOM elements).
    label_markers: bool,
    depth: DepthTarget,
}

impl SceneRenderer {
    /// Create pipelines and buffers for the context's surface format.
    #[must_use]
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;

        let camera_uniform = CameraUniform::new();
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Layout"),
                entries: &[pipeline_util::uniform_layout_entry(0)],
            });
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let vertices = cube_vertices();
        let cube_vertices =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cube Vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let ground = ground_vertices();
        let ground_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Ground Vertices"),
                contents: bytemuck::cast_slice(&ground),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let box_buffer = TypedBuffer::with_capacity(
            device,
            "Box Instances",
            64,
            wgpu::BufferUsages::VERTEX,
        );
        let label_buffer = TypedBuffer::with_capacity(
            device,
            "Label Instances",
            64,
            wgpu::BufferUsages::VERTEX,
        );

        let (width, height) = context.size();
        Self {
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            box_pipeline: Self::create_box_pipeline(context, &camera_layout),
            cube_vertices,
            cube_vertex_count: vertices.len() as u32,
            ground_vertices: ground_buffer,
            ground_vertex_count: ground.len() as u32,
            box_buffer,
            ground_instances: 0,
            label_pipeline: Self::create_label_pipeline(
                context,
                &camera_layout,
            ),
            label_buffer,
            label_markers: true,
            depth: DepthTarget::new(device, width, height),
        }
    }

    /// Enable or disable the label rectangle pass.
    pub fn set_label_markers(&mut self, enabled: bool) {
        self.label_markers = enabled;
    }

    fn create_box_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/scene_box.wgsl"
        ));
        let layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Box Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            },
        );
        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Box Pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: size_of::<CubeVertex>()
                                as wgpu::BufferAddress,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &CUBE_ATTRIBUTES,
                        },
                        wgpu::VertexBufferLayout {
                            array_stride: size_of::<BoxInstance>()
                                as wgpu::BufferAddress,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &BOX_ATTRIBUTES,
                        },
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::surface_target(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    fn create_label_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = context.device.create_shader_module(wgpu::include_wgsl!(
            "../../assets/shaders/label_overlay.wgsl"
        ));
        let layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Label Pipeline Layout"),
                bind_group_layouts: &[camera_layout],
                push_constant_ranges: &[],
            },
        );
        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Label Pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: size_of::<LabelInstance>()
                            as wgpu::BufferAddress,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &LABEL_ATTRIBUTES,
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::surface_target(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(pipeline_util::overlay_depth_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
    }

    /// Recreate the depth attachment if the surface size changed.
    pub fn resize(&mut self, context: &RenderContext) {
        let size = context.size();
        if self.depth.size() != size {
            self.depth = DepthTarget::new(&context.device, size.0, size.1);
        }
    }

    /// Upload this frame's camera, boxes, and labels.
    pub fn prepare(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        controller: &InteractionController,
    ) {
        self.camera_uniform
            .update(controller.camera(), controller.viewport());
        context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );

        let highlight = controller.focus_state().routing_object();
        self.ground_instances = u32::from(scene.ground().is_some());
        let _ = self.box_buffer.write(
            &context.device,
            &context.queue,
            &box_instances(scene, highlight),
        );
        let labels = if self.label_markers {
            label_instances(controller.labels())
        } else {
            Vec::new()
        };
        let _ = self
            .label_buffer
            .write(&context.device, &context.queue, &labels);
    }

    /// Record both passes into `encoder`, targeting `view`.
    pub fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            ..Default::default()
        });

        pass.set_bind_group(0, &self.camera_bind_group, &[]);

        let instance_count = self.box_buffer.count();
        if instance_count > 0 {
            pass.set_pipeline(&self.box_pipeline);
            pass.set_vertex_buffer(1, self.box_buffer.slice());
            let ground = self.ground_instances.min(instance_count);
            if ground > 0 {
                pass.set_vertex_buffer(0, self.ground_vertices.slice(..));
                pass.draw(0..self.ground_vertex_count, 0..ground);
            }
            if instance_count > ground {
                pass.set_vertex_buffer(0, self.cube_vertices.slice(..));
                pass.draw(0..self.cube_vertex_count, ground..instance_count);
            }
        }

        if self.label_buffer.count() > 0 {
            pass.set_pipeline(&self.label_pipeline);
            pass.set_vertex_buffer(0, self.label_buffer.slice());
            pass.draw(0..6, 0..self.label_buffer.count());
        }
    }

    /// Prepare, encode, and present one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture
    /// cannot be acquired.
    pub fn render(
        &mut self,
        context: &RenderContext,
        scene: &Scene,
        controller: &InteractionController,
    ) -> Result<(), wgpu::SurfaceError> {
        self.prepare(context, scene, controller);
        let frame = context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder();
        self.encode(&mut encoder, &view);
        context.submit(encoder);
        frame.present();
        Ok(())
    }
}
