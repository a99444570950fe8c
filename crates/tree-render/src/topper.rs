use crate::helpers;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use tree_core::constants::{TOPPER_INNER_RADIUS, TOPPER_OUTER_RADIUS, TOPPER_POINTS};
use tree_core::topper::star_outline;
use tree_core::Topper;
use wgpu::util::DeviceExt;

const STAR_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct TopperUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

impl From<&Topper> for TopperUniform {
    fn from(t: &Topper) -> Self {
        let rotation = Quat::from_euler(EulerRot::XYZ, t.rotation.x, t.rotation.y, t.rotation.z);
        let model = Mat4::from_scale_rotation_translation(Vec3::splat(t.scale), rotation, t.position);
        Self {
            model: model.to_cols_array_2d(),
            color: STAR_COLOR,
        }
    }
}

pub(crate) struct TopperResources {
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub uniform_buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

/// Star as a triangle fan around its centre, flattened to a triangle list.
fn star_triangles() -> Vec<[f32; 2]> {
    let outline = star_outline(TOPPER_POINTS, TOPPER_OUTER_RADIUS, TOPPER_INNER_RADIUS);
    let n = outline.len();
    let mut verts = Vec::with_capacity(n * 3);
    for i in 0..n {
        verts.push(Vec2::ZERO.to_array());
        verts.push(outline[i].to_array());
        verts.push(outline[(i + 1) % n].to_array());
    }
    verts
}

pub(crate) fn create_topper_resources(
    device: &wgpu::Device,
    globals_bgl: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> TopperResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("topper_shader"),
        source: wgpu::ShaderSource::Wgsl(tree_core::TOPPER_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("topper_bgl"),
        entries: &[helpers::uniform_layout_entry(0)],
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("topper_pl"),
        bind_group_layouts: &[globals_bgl, &bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_pipeline(
        device,
        "topper_pipeline",
        &layout,
        &shader,
        &[helpers::QUAD_LAYOUT],
        format,
        wgpu::BlendState::ALPHA_BLENDING,
    );
    let verts = star_triangles();
    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("topper_vb"),
        contents: bytemuck::cast_slice(&verts),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("topper_uniforms"),
        size: std::mem::size_of::<TopperUniform>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("topper_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });
    TopperResources {
        pipeline,
        vertex_buffer,
        vertex_count: verts.len() as u32,
        uniform_buffer,
        bind_group,
    }
}
