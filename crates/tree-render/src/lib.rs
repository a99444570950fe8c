//! wgpu renderer shared by the web and native frontends.
//!
//! Draws one [`FrameView`] per call: the particle cloud as instanced glowing
//! quads, then the star topper, then the cards back to front.

mod cards;
mod helpers;
mod points;
mod topper;

use cards::{CardResources, CardUniform};
use glam::Mat4;
use points::PointsResources;
use topper::{TopperResources, TopperUniform};
use tree_core::{CardArtwork, CardId, FrameView};

/// World-space size of a particle quad.
pub const POINT_SIZE: f32 = 1.5;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    point_size: f32,
    time: f32,
    _pad: [f32; 2],
}

pub struct SceneRenderer {
    quad_vb: wgpu::Buffer,
    globals_ub: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,
    points: PointsResources,
    topper: TopperResources,
    cards: CardResources,
}

impl SceneRenderer {
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        positions: &[f32],
        colors: &[[f32; 3]],
    ) -> Self {
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(0)],
        });
        let globals_ub = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_ub"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_ub.as_entire_binding(),
            }],
        });

        let points =
            points::create_points_resources(device, &globals_bgl, format, positions, colors);
        let topper = topper::create_topper_resources(device, &globals_bgl, format);
        let cards = CardResources::new(device, &globals_bgl, format);
        log::info!("[gpu] renderer ready: {} particles", points.count);

        Self {
            quad_vb: helpers::create_quad_buffer(device),
            globals_ub,
            globals_bg,
            points,
            topper,
            cards,
        }
    }

    /// Upload the artwork for a newly created card.
    pub fn add_card(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: CardId,
        art: &CardArtwork,
    ) {
        self.cards.insert(device, queue, id, art);
    }

    pub fn render(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame: &FrameView<'_>,
        clear: wgpu::Color,
    ) {
        let globals = Globals {
            view: frame.camera.view_matrix().to_cols_array_2d(),
            proj: frame.camera.projection_matrix().to_cols_array_2d(),
            model: Mat4::from_rotation_y(frame.cloud_rotation).to_cols_array_2d(),
            point_size: POINT_SIZE,
            time: frame.time,
            _pad: [0.0; 2],
        };
        queue.write_buffer(&self.globals_ub, 0, bytemuck::bytes_of(&globals));
        let count = (frame.positions.len() / 3).min(self.points.count as usize);
        queue.write_buffer(
            &self.points.positions_vb,
            0,
            bytemuck::cast_slice(&frame.positions[..count * 3]),
        );
        if let Some(t) = &frame.topper {
            let u = TopperUniform::from(t);
            queue.write_buffer(&self.topper.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
        for draw in &frame.cards {
            if let Some(tex) = self.cards.get(draw.id) {
                let u = CardUniform::from(&draw.pose);
                queue.write_buffer(&tex.uniform_buffer, 0, bytemuck::bytes_of(&u));
            }
        }

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        if count > 0 {
            pass.set_pipeline(&self.points.pipeline);
            pass.set_bind_group(0, &self.globals_bg, &[]);
            pass.set_vertex_buffer(0, self.quad_vb.slice(..));
            pass.set_vertex_buffer(1, self.points.positions_vb.slice(..));
            pass.set_vertex_buffer(2, self.points.colors_vb.slice(..));
            pass.draw(0..helpers::QUAD_CORNERS.len() as u32, 0..count as u32);
        }

        if frame.topper.is_some() {
            pass.set_pipeline(&self.topper.pipeline);
            pass.set_bind_group(0, &self.globals_bg, &[]);
            pass.set_bind_group(1, &self.topper.bind_group, &[]);
            pass.set_vertex_buffer(0, self.topper.vertex_buffer.slice(..));
            pass.draw(0..self.topper.vertex_count, 0..1);
        }

        pass.set_pipeline(&self.cards.pipeline);
        pass.set_bind_group(0, &self.globals_bg, &[]);
        pass.set_vertex_buffer(0, self.quad_vb.slice(..));
        for draw in &frame.cards {
            let Some(tex) = self.cards.get(draw.id) else {
                continue;
            };
            pass.set_bind_group(1, &tex.bind_group, &[]);
            pass.draw(0..helpers::QUAD_CORNERS.len() as u32, 0..1);
        }
    }
}
