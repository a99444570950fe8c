use crate::helpers::{self, QUAD_LAYOUT};
use tree_core::{CardArtwork, CardId, CardPose};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CardUniform {
    center: [f32; 3],
    rotation: f32,
    scale: [f32; 2],
    opacity: f32,
    _pad: f32,
}

impl From<&CardPose> for CardUniform {
    fn from(pose: &CardPose) -> Self {
        Self {
            center: pose.position.to_array(),
            rotation: pose.rotation,
            scale: pose.scale.to_array(),
            opacity: pose.opacity.clamp(0.0, 1.0),
            _pad: 0.0,
        }
    }
}

pub(crate) struct CardTexture {
    _texture: wgpu::Texture,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

pub(crate) struct CardResources {
    pub pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    /// Indexed by `CardId`; `None` for cards whose artwork could not be
    /// uploaded.
    textures: Vec<Option<CardTexture>>,
}

impl CardResources {
    pub fn new(
        device: &wgpu::Device,
        globals_bgl: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cards_shader"),
            source: wgpu::ShaderSource::Wgsl(tree_core::CARDS_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("card_bgl"),
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
                helpers::uniform_layout_entry(2),
            ],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("cards_pl"),
            bind_group_layouts: &[globals_bgl, &bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_pipeline(
            device,
            "cards_pipeline",
            &layout,
            &shader,
            &[QUAD_LAYOUT],
            format,
            wgpu::BlendState::ALPHA_BLENDING,
        );
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("card_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        Self {
            pipeline,
            bgl,
            sampler,
            textures: Vec::new(),
        }
    }

    pub fn insert(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: CardId,
        art: &CardArtwork,
    ) {
        let max_dim = device.limits().max_texture_dimension_2d;
        if art.width > max_dim || art.height > max_dim {
            log::warn!(
                "[gpu] card {} artwork {}x{} exceeds texture limit {}",
                id.0,
                art.width,
                art.height,
                max_dim
            );
            return;
        }
        let label = format!("card_{}", id.0);
        let (texture, view) =
            helpers::create_rgba_texture(device, queue, &label, art.width, art.height, &art.rgba);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("card_uniforms"),
            size: std::mem::size_of::<CardUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("card_bg"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });
        if self.textures.len() <= id.0 {
            self.textures.resize_with(id.0 + 1, || None);
        }
        self.textures[id.0] = Some(CardTexture {
            _texture: texture,
            uniform_buffer,
            bind_group,
        });
    }

    pub fn get(&self, id: CardId) -> Option<&CardTexture> {
        self.textures.get(id.0).and_then(Option::as_ref)
    }
}
