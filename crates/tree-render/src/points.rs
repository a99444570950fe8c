use crate::helpers::{self, QUAD_LAYOUT};
use wgpu::util::DeviceExt;

pub(crate) struct PointsResources {
    pub pipeline: wgpu::RenderPipeline,
    pub positions_vb: wgpu::Buffer,
    pub colors_vb: wgpu::Buffer,
    pub count: u32,
}

const POSITION_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: (std::mem::size_of::<f32>() * 3) as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 1,
    }],
};

const COLOR_LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
    array_stride: (std::mem::size_of::<f32>() * 3) as u64,
    step_mode: wgpu::VertexStepMode::Instance,
    attributes: &[wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: 2,
    }],
};

pub(crate) fn create_points_resources(
    device: &wgpu::Device,
    globals_bgl: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
    positions: &[f32],
    colors: &[[f32; 3]],
) -> PointsResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("points_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::POINTS_WGSL.into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("points_pl"),
        bind_group_layouts: &[globals_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_pipeline(
        device,
        "points_pipeline",
        &layout,
        &shader,
        &[QUAD_LAYOUT, POSITION_LAYOUT, COLOR_LAYOUT],
        format,
        helpers::ADDITIVE_BLEND,
    );
    // Positions are rewritten every frame; colors never change.
    let positions_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("positions_vb"),
        contents: bytemuck::cast_slice(positions),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let colors_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("colors_vb"),
        contents: bytemuck::cast_slice(colors),
        usage: wgpu::BufferUsages::VERTEX,
    });
    PointsResources {
        pipeline,
        positions_vb,
        colors_vb,
        count: (positions.len() / 3) as u32,
    }
}
