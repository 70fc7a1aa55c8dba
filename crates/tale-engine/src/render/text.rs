use std::borrow::Cow;
use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use crate::coords::ColorRgba;
use crate::render::{RenderCtx, RenderTarget};
use crate::text::{
    GlyphCanvas, GlyphQuad, GlyphVertex, RasterGlyph, TextUniforms, TextureHandle, TEXT_CANVAS,
};

// ── GPU types ─────────────────────────────────────────────────────────────

/// Uniform block layout (80 bytes):
///
///  offset  0  projection  mat4x4<f32>
///  offset 64  color       vec4<f32>
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TextUniformBlock {
    projection: [[f32; 4]; 4],
    color:      [f32; 4],
}

impl From<&TextUniforms> for TextUniformBlock {
    fn from(u: &TextUniforms) -> Self {
        Self { projection: u.projection, color: u.color.to_array() }
    }
}

const UNIFORM_BLOCK_SIZE: u64 = std::mem::size_of::<TextUniformBlock>() as u64;

impl GlyphVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2  // uv
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

fn alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

/// Texture contents for a glyph bitmap.
///
/// wgpu rejects zero-sized textures, so empty bitmaps (spaces, control
/// characters) become a single transparent texel.
fn texture_upload(glyph: &RasterGlyph) -> (u32, u32, Cow<'_, [u8]>) {
    if glyph.width == 0 || glyph.height == 0 {
        (1, 1, Cow::Owned(vec![0]))
    } else {
        (glyph.width, glyph.height, Cow::Borrowed(glyph.bitmap.as_slice()))
    }
}

/// Byte stride between uniform slots, rounded up to the device alignment.
fn uniform_stride(alignment: u32) -> u64 {
    let align = alignment.max(1) as u64;
    UNIFORM_BLOCK_SIZE.div_ceil(align) * align
}

// ── frame queue ───────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
struct QueuedGlyph {
    texture: TextureHandle,
    /// Index of the uniform batch the glyph is drawn with.
    batch:   u32,
    quad:    GlyphQuad,
}

/// One frame's text draws, before anything touches the GPU.
///
/// `begin_text` opens a batch; every glyph drawn afterwards belongs to it.
/// A glyph drawn before any batch gets white text on the fixed canvas.
#[derive(Debug, Default)]
struct DrawQueue {
    batches: Vec<TextUniforms>,
    glyphs:  Vec<QueuedGlyph>,
}

impl DrawQueue {
    fn clear(&mut self) {
        self.batches.clear();
        self.glyphs.clear();
    }

    fn begin(&mut self, uniforms: TextUniforms) {
        self.batches.push(uniforms);
    }

    fn push(&mut self, texture: TextureHandle, quad: GlyphQuad) {
        if self.batches.is_empty() {
            log::debug!("glyph drawn without begin_text; using default uniforms");
            self.begin(TextUniforms {
                color: ColorRgba::white(),
                projection: TEXT_CANVAS.ortho_projection(),
            });
        }
        let batch = (self.batches.len() - 1) as u32;
        self.glyphs.push(QueuedGlyph { texture, batch, quad });
    }

    fn vertices(&self) -> Vec<GlyphVertex> {
        self.glyphs.iter().flat_map(|g| g.quad).collect()
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Bind group layouts and the sampler, created together on first use.
struct TextLayouts {
    uniform_bgl: wgpu::BindGroupLayout,
    texture_bgl: wgpu::BindGroupLayout,
    sampler:     wgpu::Sampler,
}

impl TextLayouts {
    fn new(device: &wgpu::Device) -> Self {
        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tale text uniform bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(UNIFORM_BLOCK_SIZE),
                },
                count: None,
            }],
        });

        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("tale glyph texture bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("tale glyph sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self { uniform_bgl, texture_bgl, sampler }
    }
}

struct GlyphTexture {
    _texture:   wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

/// wgpu backend of the text pipeline.
///
/// Every glyph gets its own single-channel texture and every glyph is one
/// draw call with that texture bound. Draws are queued through a [`TextPass`]
/// while the frame is being built and recorded into one render pass on
/// [`TextPass::finish`].
///
/// Each `begin_text` opens a new batch with its own slot in a dynamic-offset
/// uniform buffer, so the color and projection bound for one string do not
/// leak into another drawn in the same frame.
#[derive(Default)]
pub struct GlyphQuadRenderer {
    layouts: Option<TextLayouts>,

    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline:        Option<wgpu::RenderPipeline>,

    // uniforms
    uniform_ubo:        Option<wgpu::Buffer>,
    uniform_bind_group: Option<wgpu::BindGroup>,
    uniform_capacity:   usize,

    // glyph textures, indexed by handle
    textures: Vec<GlyphTexture>,

    // geometry
    vertex_vbo:      Option<wgpu::Buffer>,
    vertex_capacity: usize,

    queue: DrawQueue,
}

impl GlyphQuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts collecting text draws for the current frame.
    pub fn pass<'r, 'c>(&'r mut self, ctx: &'r RenderCtx<'c>) -> TextPass<'r, 'c> {
        self.queue.clear();
        TextPass { renderer: self, ctx }
    }

    fn layouts(&mut self, device: &wgpu::Device) -> &TextLayouts {
        self.layouts.get_or_insert_with(|| TextLayouts::new(device))
    }

    fn create_texture(&mut self, ctx: &RenderCtx<'_>, glyph: &RasterGlyph) -> TextureHandle {
        let (width, height, data) = texture_upload(glyph);
        let size = wgpu::Extent3d { width, height, depth_or_array_layers: 1 };

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tale glyph texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        // Rows are tightly packed, one byte per texel.
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let layouts = self.layouts(ctx.device);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tale glyph bind group"),
            layout: &layouts.texture_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&layouts.sampler),
                },
            ],
        });

        let handle = TextureHandle(self.textures.len() as u32);
        self.textures.push(GlyphTexture { _texture: texture, bind_group });
        handle
    }

    fn flush(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if self.queue.glyphs.is_empty() {
            return;
        }

        let stride = uniform_stride(ctx.device.limits().min_uniform_buffer_offset_alignment);
        self.ensure_pipeline(ctx);
        self.ensure_uniform_capacity(ctx, self.queue.batches.len(), stride);
        self.ensure_vertex_capacity(ctx, self.queue.glyphs.len());

        let (Some(pipeline), Some(ubo), Some(uniform_bg), Some(vbo)) = (
            self.pipeline.as_ref(),
            self.uniform_ubo.as_ref(),
            self.uniform_bind_group.as_ref(),
            self.vertex_vbo.as_ref(),
        ) else {
            return;
        };

        for (i, batch) in self.queue.batches.iter().enumerate() {
            let block = TextUniformBlock::from(batch);
            ctx.queue.write_buffer(ubo, i as u64 * stride, bytemuck::bytes_of(&block));
        }
        ctx.queue.write_buffer(vbo, 0, bytemuck::cast_slice(&self.queue.vertices()));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("tale text pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_vertex_buffer(0, vbo.slice(..));

        let mut bound_batch = None;
        for (i, glyph) in self.queue.glyphs.iter().enumerate() {
            let Some(tex) = self.textures.get(glyph.texture.0 as usize) else {
                log::warn!("unknown glyph texture {:?}, skipping", glyph.texture);
                continue;
            };
            if bound_batch != Some(glyph.batch) {
                let offset = (glyph.batch as u64 * stride) as u32;
                rpass.set_bind_group(0, uniform_bg, &[offset]);
                bound_batch = Some(glyph.batch);
            }
            rpass.set_bind_group(1, &tex.bind_group, &[]);

            let first = (i * 6) as u32;
            rpass.draw(first..first + 6, 0..1);
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let layouts = self.layouts(ctx.device);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tale text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tale text pipeline layout"),
            bind_group_layouts: &[&layouts.uniform_bgl, &layouts.texture_bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tale text pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[GlyphVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
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
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_uniform_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize, stride: u64) {
        if required <= self.uniform_capacity && self.uniform_bind_group.is_some() {
            return;
        }

        let new_cap = required.next_power_of_two().max(8);
        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tale text uniform ubo"),
            size: new_cap as u64 * stride,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layouts = self.layouts(ctx.device);
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("tale text uniform bind group"),
            layout: &layouts.uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &ubo,
                    offset: 0,
                    size: NonZeroU64::new(UNIFORM_BLOCK_SIZE),
                }),
            }],
        });

        self.uniform_ubo = Some(ubo);
        self.uniform_bind_group = Some(bind_group);
        self.uniform_capacity = new_cap;
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, quads: usize) {
        if quads <= self.vertex_capacity && self.vertex_vbo.is_some() {
            return;
        }
        let new_cap = quads.next_power_of_two().max(64);
        self.vertex_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tale text vbo"),
            size: (new_cap * std::mem::size_of::<GlyphQuad>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}

// ── frame pass ────────────────────────────────────────────────────────────

/// One frame's worth of text draws on a [`GlyphQuadRenderer`].
pub struct TextPass<'r, 'c> {
    renderer: &'r mut GlyphQuadRenderer,
    ctx:      &'r RenderCtx<'c>,
}

impl TextPass<'_, '_> {
    /// Records every queued glyph into `target`.
    pub fn finish(self, target: &mut RenderTarget<'_>) {
        self.renderer.flush(self.ctx, target);
    }
}

impl GlyphCanvas for TextPass<'_, '_> {
    fn create_glyph_texture(&mut self, glyph: &RasterGlyph) -> TextureHandle {
        self.renderer.create_texture(self.ctx, glyph)
    }

    fn begin_text(&mut self, uniforms: &TextUniforms) {
        self.renderer.queue.begin(*uniforms);
    }

    fn draw_glyph(&mut self, texture: TextureHandle, quad: &GlyphQuad) {
        self.renderer.queue.push(texture, *quad);
    }
}
