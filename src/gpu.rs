//! wgpu renderer for the flock.
//!
//! Draws one blue arrow per boid on a white background. The world rectangle
//! always fills the surface, so resizing the window scales the view.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::config::Bounds;
use crate::error::GpuError;
use crate::shader::{BoidInstance, Uniforms, GLYPH_SIZE, RENDER_SHADER};

const VERTICES_PER_GLYPH: u32 = 3;

/// GPU state for drawing a flock.
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    instances: wgpu::Buffer,
    globals: wgpu::BindGroup,
    capacity: u32,
    drawn: u32,
}

impl Renderer {
    /// Set up a surface for `window` and room for `capacity` boids.
    pub async fn new(
        window: Arc<Window>,
        bounds: Bounds,
        capacity: usize,
    ) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await
            .ok_or(GpuError::NoAdapter)?;
        let info = adapter.get_info();
        log::info!("rendering on {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("boids device"),
                    ..Default::default()
                },
                None,
            )
            .await?;

        let config = surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &config);

        let capacity = capacity.max(1) as u32;
        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("boid instances"),
            size: u64::from(capacity) * std::mem::size_of::<BoidInstance>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (globals_layout, globals) = create_globals(&device, bounds);
        let pipeline = create_pipeline(&device, config.format, &globals_layout);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            instances,
            globals,
            capacity,
            drawn: 0,
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Reconfigure the surface at its current size, after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload the boids to draw next. Instances beyond capacity are dropped.
    pub fn upload(&mut self, instances: &[BoidInstance]) {
        let count = instances.len().min(self.capacity as usize);
        self.queue
            .write_buffer(&self.instances, 0, bytemuck::cast_slice(&instances[..count]));
        self.drawn = count as u32;
    }

    /// Draw the last uploaded boids and present the frame.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("boids frame"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("boids pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            if self.drawn > 0 {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.globals, &[]);
                pass.set_vertex_buffer(0, self.instances.slice(..));
                pass.draw(0..VERTICES_PER_GLYPH, 0..self.drawn);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Surface configuration for `size`, preferring an sRGB format.
fn surface_config(
    surface: &wgpu::Surface<'_>,
    adapter: &wgpu::Adapter,
    size: PhysicalSize<u32>,
) -> Result<wgpu::SurfaceConfiguration, GpuError> {
    let mut config = surface
        .get_default_config(adapter, size.width.max(1), size.height.max(1))
        .ok_or(GpuError::NoSurfaceFormat)?;

    let caps = surface.get_capabilities(adapter);
    if let Some(srgb) = caps.formats.iter().copied().find(|f| f.is_srgb()) {
        config.format = srgb;
    }
    config.present_mode = wgpu::PresentMode::AutoVsync;
    Ok(config)
}

/// Uniform buffer holding the world size, and its bind group.
fn create_globals(device: &wgpu::Device, bounds: Bounds) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
    let uniforms = Uniforms::new(bounds.width, bounds.height, GLYPH_SIZE);
    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("boids globals"),
        contents: bytemuck::bytes_of(&uniforms),
        usage: wgpu::BufferUsages::UNIFORM,
    });

    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("boids globals layout"),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<Uniforms>() as u64),
            },
            count: None,
        }],
    });

    let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("boids globals"),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    (layout, group)
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    globals_layout: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("boid glyph shader"),
        source: wgpu::ShaderSource::Wgsl(RENDER_SHADER.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("boid glyph layout"),
        bind_group_layouts: &[globals_layout],
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("boid glyphs"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some("vs_main"),
            buffers: &[BoidInstance::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some("fs_main"),
            targets: &[Some(format.into())],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
