//! Forward renderer for loaded room models.
//!
//! One pipeline (depth-tested, no culling since rooms are viewed from the
//! inside) and one vertex/index buffer pair per primitive.

use wgpu::util::DeviceExt;

use crate::asset::{LoadedModel, MeshData, ModelVertex};
use crate::error::RoomviewError;
use crate::gpu::{
    render_context::RenderContext, shader_composer::ShaderComposer,
};
use crate::renderer::pipeline_util;

/// Bind groups shared by every model draw call.
pub struct DrawBindGroups<'a> {
    /// Camera uniform bind group (group 0).
    pub camera: &'a wgpu::BindGroup,
    /// Lighting uniform bind group (group 1).
    pub lighting: &'a wgpu::BindGroup,
}

const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
    0 => Float32x3,
    1 => Float32x3,
    2 => Float32x4,
];

/// Vertex buffer layout matching [`ModelVertex`].
#[must_use]
pub fn model_vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<ModelVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

/// Uploaded buffers of one primitive.
struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let label = mesh.name.as_deref().unwrap_or("Model Mesh");
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Draws the currently loaded model.
pub struct ModelRenderer {
    pipeline: wgpu::RenderPipeline,
    meshes: Vec<GpuMesh>,
}

impl ModelRenderer {
    /// Build the pipeline. No geometry until [`upload`](Self::upload).
    ///
    /// # Errors
    ///
    /// Returns [`RoomviewError::Shader`] if the model shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, RoomviewError> {
        let shader = shader_composer.compose(
            &context.device,
            "Model Shader",
            include_str!("../../assets/shaders/raster/mesh/model.wgsl"),
            "raster/mesh/model.wgsl",
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Model Pipeline Layout"),
                bind_group_layouts: &[camera_layout, lighting_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Model Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[model_vertex_buffer_layout()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_target(context.format()),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Ok(Self {
            pipeline,
            meshes: Vec::new(),
        })
    }

    /// Replace the drawn geometry with `model`. Primitives without indices
    /// are skipped.
    pub fn upload(&mut self, device: &wgpu::Device, model: &LoadedModel) {
        self.meshes = model
            .meshes
            .iter()
            .filter(|m| !m.indices.is_empty())
            .map(|m| GpuMesh::upload(device, m))
            .collect();
        log::debug!("uploaded {} model meshes", self.meshes.len());
    }

    /// Record draw calls for every uploaded primitive.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        bind_groups: &DrawBindGroups<'a>,
    ) {
        if self.meshes.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, bind_groups.camera, &[]);
        render_pass.set_bind_group(1, bind_groups.lighting, &[]);
        for mesh in &self.meshes {
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                mesh.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_matches_model_vertex() {
        let layout = model_vertex_buffer_layout();
        assert_eq!(layout.array_stride, 40);
        let offsets: Vec<u64> =
            layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
        assert_eq!(layout.attributes[2].format, wgpu::VertexFormat::Float32x4);
    }
}
