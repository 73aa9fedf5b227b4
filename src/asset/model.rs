use glam::Vec3;

use crate::camera::framing::BoundingVolume;

/// Interleaved vertex uploaded to the GPU.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// World-space unit normal.
    pub normal: [f32; 3],
    /// Linear RGBA base color.
    pub color: [f32; 4],
}

/// One triangle-list primitive with node transforms already applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Name of the glTF mesh this primitive came from, if any.
    pub name: Option<String>,
    /// Vertices in world space.
    pub vertices: Vec<ModelVertex>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Iterator over world-space vertex positions.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| Vec3::from(v.position))
    }
}

/// Render-ready geometry of a loaded model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedModel {
    /// All primitives, in scene traversal order.
    pub meshes: Vec<MeshData>,
}

impl LoadedModel {
    /// Whether the model has no geometry at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.iter().all(|m| m.vertices.is_empty())
    }

    /// Total vertex count across meshes.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertices.len()).sum()
    }

    /// Total triangle count across meshes.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }

    /// World-space bounding volume of every vertex. Empty models give
    /// [`BoundingVolume::EMPTY`].
    #[must_use]
    pub fn bounds(&self) -> BoundingVolume {
        BoundingVolume::from_points(
            self.meshes.iter().flat_map(MeshData::positions),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(p: [f32; 3]) -> ModelVertex {
        ModelVertex {
            position: p,
            normal: [0.0, 1.0, 0.0],
            color: [1.0; 4],
        }
    }

    #[test]
    fn bounds_span_all_meshes() {
        let model = LoadedModel {
            meshes: vec![
                MeshData {
                    name: None,
                    vertices: vec![vertex([0.0, 0.0, 0.0]), vertex([1.0, 2.0, 0.0])],
                    indices: vec![],
                },
                MeshData {
                    name: Some("wall".into()),
                    vertices: vec![vertex([-4.0, 0.5, 3.0])],
                    indices: vec![],
                },
            ],
        };
        let bounds = model.bounds();
        assert_eq!(bounds.min, Vec3::new(-4.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(model.vertex_count(), 3);
    }

    #[test]
    fn empty_model_has_empty_bounds() {
        let model = LoadedModel::default();
        assert!(model.is_empty());
        assert_eq!(model.bounds(), BoundingVolume::EMPTY);
        assert_eq!(model.triangle_count(), 0);
    }
}
