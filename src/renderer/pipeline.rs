//! wgpu render backend
//!
//! Renders into an offscreen texture the size of the window. Static meshes
//! live in their own vertex buffers; every frame the submitted draw calls are
//! packed into one instance buffer and drawn as instanced runs, keeping the
//! submission order.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::shapes;
use super::sink::{DrawCall, DrawSink, MeshKind, Primitive};
use super::vertex::{InstanceRaw, MeshVertex};
use crate::error::InitError;

/// Offscreen target format (colors are written as-is, no sRGB conversion)
const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
/// Initial instance buffer capacity (draw calls)
const INITIAL_INSTANCES: usize = 256;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    projection: [[f32; 4]; 4],
}

/// A static mesh resident on the GPU
struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

/// Draw-call sink backed by wgpu
pub struct GpuSink {
    device: wgpu::Device,
    queue: wgpu::Queue,
    _target: wgpu::Texture,
    target_view: wgpu::TextureView,
    fill_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    circle_fill: Option<GpuMesh>,
    circle_outline: Option<GpuMesh>,
    rect: Option<GpuMesh>,

    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    clear_color: wgpu::Color,
    calls: Vec<DrawCall>,
    pub size: (u32, u32),
}

impl GpuSink {
    /// Acquire an adapter and device and set up the offscreen target
    pub fn new(width: u32, height: u32) -> Result<Self, InitError> {
        pollster::block_on(Self::new_async(width, height))
    }

    async fn new_async(width: u32, height: u32) -> Result<Self, InitError> {
        if width == 0 || height == 0 {
            return Err(InitError::InvalidWindowSize { width, height });
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::NoAdapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("orbit-dodge-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await
            .map_err(|e| InitError::RequestDevice(e.to_string()))?;

        let target = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("frame_target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let target_view = target.create_view(&wgpu::TextureViewDescriptor::default());

        // Screen pixels, origin bottom-left
        let projection = Mat4::orthographic_rh(0.0, width as f32, 0.0, height as f32, -1.0, 1.0);
        let globals = Globals {
            projection: projection.to_cols_array_2d(),
        };
        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals_buffer"),
            contents: bytemuck::bytes_of(&globals),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let fill_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            wgpu::PrimitiveTopology::TriangleList,
            "fill_pipeline",
        );
        let line_pipeline = build_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            wgpu::PrimitiveTopology::LineList,
            "line_pipeline",
        );

        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCES);

        Ok(Self {
            device,
            queue,
            _target: target,
            target_view,
            fill_pipeline,
            line_pipeline,
            bind_group,
            circle_fill: None,
            circle_outline: None,
            rect: None,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCES,
            clear_color: wgpu::Color::BLACK,
            calls: Vec::new(),
            size: (width, height),
        })
    }

    fn upload(&self, label: &str, vertices: &[Vec3]) -> GpuMesh {
        let data: Vec<MeshVertex> = vertices.iter().copied().map(MeshVertex::from_vec3).collect();
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(&data),
                usage: wgpu::BufferUsages::VERTEX,
            });
        GpuMesh {
            buffer,
            vertex_count: data.len() as u32,
        }
    }

    fn mesh_for(&self, primitive: Primitive) -> Option<&GpuMesh> {
        match primitive {
            Primitive::CircleFill => self.circle_fill.as_ref(),
            Primitive::CircleOutline => self.circle_outline.as_ref(),
            Primitive::Rect => self.rect.as_ref(),
        }
    }

    fn pipeline_for(&self, primitive: Primitive) -> &wgpu::RenderPipeline {
        match primitive {
            Primitive::CircleOutline => &self.line_pipeline,
            Primitive::CircleFill | Primitive::Rect => &self.fill_pipeline,
        }
    }

    /// Grow the instance buffer to hold at least `count` instances
    fn reserve_instances(&mut self, count: usize) {
        if count <= self.instance_capacity {
            return;
        }
        let capacity = count.next_power_of_two();
        log::debug!(
            "Growing instance buffer {} -> {}",
            self.instance_capacity,
            capacity
        );
        self.instance_buffer = create_instance_buffer(&self.device, capacity);
        self.instance_capacity = capacity;
    }
}

impl DrawSink for GpuSink {
    fn upload_static_mesh(&mut self, mesh: MeshKind, vertices: &[Vec3]) -> Result<(), InitError> {
        match mesh {
            MeshKind::Circle => {
                // No fan or line-loop topology in wgpu: expand once here
                let fill = shapes::fan_to_triangles(vertices)?;
                let outline = shapes::fan_rim_lines(vertices)?;
                self.circle_fill = Some(self.upload("circle_fill", &fill));
                self.circle_outline = Some(self.upload("circle_outline", &outline));
            }
            MeshKind::Rect => {
                if vertices.len() % 3 != 0 || vertices.is_empty() {
                    return Err(InitError::InvalidMesh {
                        mesh: mesh.name(),
                        count: vertices.len(),
                        expected: "a non-empty triangle list".to_string(),
                    });
                }
                self.rect = Some(self.upload("rect", vertices));
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Vec3) {
        self.clear_color = wgpu::Color {
            r: f64::from(color.x),
            g: f64::from(color.y),
            b: f64::from(color.z),
            a: 1.0,
        };
        self.calls.clear();
    }

    fn submit(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    fn present(&mut self) {
        let instances: Vec<InstanceRaw> = self.calls.iter().map(InstanceRaw::from_call).collect();
        self.reserve_instances(instances.len());
        if !instances.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.target_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            // Consecutive calls with the same primitive become one instanced draw
            let mut start = 0;
            while start < self.calls.len() {
                let primitive = self.calls[start].primitive;
                let end = self.calls[start..]
                    .iter()
                    .position(|c| c.primitive != primitive)
                    .map_or(self.calls.len(), |n| start + n);

                if let Some(mesh) = self.mesh_for(primitive) {
                    render_pass.set_pipeline(self.pipeline_for(primitive));
                    render_pass.set_vertex_buffer(0, mesh.buffer.slice(..));
                    render_pass.draw(0..mesh.vertex_count, start as u32..end as u32);
                } else {
                    log::warn!("Skipping {:?} draws: mesh not uploaded", primitive);
                }
                start = end;
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        self.calls.clear();
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("instance_buffer"),
        size: (capacity * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn build_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    topology: wgpu::PrimitiveTopology,
    label: &str,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[MeshVertex::desc(), InstanceRaw::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: TARGET_FORMAT,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
