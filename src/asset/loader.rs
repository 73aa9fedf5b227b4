//! glTF / GLB import into world-space mesh data.
//!
//! The default scene (or the first scene when none is marked default) is
//! walked depth-first. Node transforms are accumulated and baked into
//! positions and normals, so the renderer only needs the camera transform.

use std::path::Path;

use glam::{Mat3, Mat4, Vec3};

use super::model::{LoadedModel, MeshData, ModelVertex};
use crate::error::RoomviewError;

/// Import a `.gltf` or `.glb` file. External buffers are resolved relative
/// to the file. Images are never decoded.
///
/// # Errors
///
/// Returns [`RoomviewError::Gltf`] if the file cannot be read, fails
/// validation (including files that require an unsupported extension such
/// as `KHR_draco_mesh_compression`), or a buffer cannot be resolved.
pub fn load_model(path: &Path) -> Result<LoadedModel, RoomviewError> {
    let gltf = gltf::Gltf::open(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new("./"));
    let buffers = gltf::import_buffers(&gltf.document, Some(base), gltf.blob)?;
    build_model(&gltf.document, &buffers)
}

/// Import a model held in memory (GLB bytes or glTF JSON with embedded
/// data URIs). Images are never decoded.
///
/// # Errors
///
/// Same as [`load_model`]; buffers that reference external files also fail
/// since there is no base directory.
pub fn load_model_from_slice(
    bytes: &[u8],
) -> Result<LoadedModel, RoomviewError> {
    let gltf = gltf::Gltf::from_slice(bytes)?;
    let buffers = gltf::import_buffers(&gltf.document, None, gltf.blob)?;
    build_model(&gltf.document, &buffers)
}

fn build_model(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<LoadedModel, RoomviewError> {
    let Some(scene) = document
        .default_scene()
        .or_else(|| document.scenes().next())
    else {
        log::warn!("model has no scenes");
        return Ok(LoadedModel::default());
    };

    let mut walk = SceneWalk {
        buffers,
        meshes: Vec::new(),
        skipped: 0,
    };
    for node in scene.nodes() {
        walk.visit(&node, Mat4::IDENTITY);
    }

    if walk.meshes.is_empty() && walk.skipped > 0 {
        return Err(RoomviewError::ModelLoad(format!(
            "none of the {} primitives could be read",
            walk.skipped
        )));
    }

    let model = LoadedModel {
        meshes: walk.meshes,
    };
    log::debug!(
        "built {} meshes, {} vertices, {} triangles ({} primitives skipped)",
        model.meshes.len(),
        model.vertex_count(),
        model.triangle_count(),
        walk.skipped
    );
    Ok(model)
}

/// Depth-first traversal state.
struct SceneWalk<'a> {
    buffers: &'a [gltf::buffer::Data],
    meshes: Vec<MeshData>,
    skipped: usize,
}

impl SceneWalk<'_> {
    fn visit(&mut self, node: &gltf::Node<'_>, parent: Mat4) {
        let world =
            parent * Mat4::from_cols_array_2d(&node.transform().matrix());

        if let Some(mesh) = node.mesh() {
            for primitive in mesh.primitives() {
                if let Some(data) =
                    read_primitive(&mesh, &primitive, world, self.buffers)
                {
                    self.meshes.push(data);
                } else {
                    log::warn!(
                        "skipping primitive {} of mesh {:?}",
                        primitive.index(),
                        mesh.name().unwrap_or("<unnamed>")
                    );
                    self.skipped += 1;
                }
            }
        }

        for child in node.children() {
            self.visit(&child, world);
        }
    }
}

/// Read one primitive into world space. `None` for anything that is not a
/// readable, well-formed triangle list.
fn read_primitive(
    mesh: &gltf::Mesh<'_>,
    primitive: &gltf::Primitive<'_>,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
) -> Option<MeshData> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        return None;
    }

    let reader = primitive
        .reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

    let positions: Vec<Vec3> = reader
        .read_positions()?
        .map(|p| world.transform_point3(Vec3::from(p)))
        .collect();

    let indices: Vec<u32> = reader.read_indices().map_or_else(
        || (0..positions.len() as u32).collect(),
        |i| i.into_u32().collect(),
    );
    if indices.len() % 3 != 0
        || indices.iter().any(|&i| i as usize >= positions.len())
    {
        return None;
    }

    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(normals) => normals
            .map(|n| (normal_matrix * Vec3::from(n)).normalize_or(Vec3::Y))
            .collect(),
        None => smooth_normals(&positions, &indices),
    };
    if normals.len() != positions.len() {
        return None;
    }

    let base = primitive
        .material()
        .pbr_metallic_roughness()
        .base_color_factor();
    let colors: Vec<[f32; 4]> = match reader.read_colors(0) {
        Some(colors) => colors
            .into_rgba_f32()
            .map(|c| [c[0] * base[0], c[1] * base[1], c[2] * base[2], c[3] * base[3]])
            .collect(),
        None => vec![base; positions.len()],
    };

    let vertices = positions
        .iter()
        .zip(&normals)
        .zip(colors.iter().chain(std::iter::repeat(&base)))
        .map(|((p, n), c)| ModelVertex {
            position: p.to_array(),
            normal: n.to_array(),
            color: *c,
        })
        .collect();

    Some(MeshData {
        name: mesh.name().map(str::to_owned),
        vertices,
        indices,
    })
}

/// Area-weighted vertex normals for primitives that ship without them.
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut accum = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }
    accum.into_iter().map(|n| n.normalize_or(Vec3::Y)).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::camera::framing::BoundingVolume;

    /// Three positions (origin, +X, +Y) followed by u16 indices 0, 1, 2.
    const TRIANGLE_BUFFER: &str = "data:application/octet-stream;base64,\
        AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAAAAABAAIAAAA=";

    fn triangle_gltf(nodes: &str, scene_nodes: &str, mode: u32) -> String {
        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": {scene_nodes} }}],
  "nodes": {nodes},
  "meshes": [{{
    "name": "floor",
    "primitives": [{{
      "attributes": {{ "POSITION": 0 }},
      "indices": 1,
      "mode": {mode}
    }}]
  }}],
  "buffers": [{{ "byteLength": 44, "uri": "{TRIANGLE_BUFFER}" }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ]
}}"#
        )
    }

    /// Add top-level members to a glTF document built by `triangle_gltf`.
    fn with_members(json: &str, members: &str) -> String {
        json.replacen('{', &format!("{{ {members},"), 1)
    }

    #[test]
    fn reads_single_triangle() {
        let json = triangle_gltf(r#"[{ "mesh": 0 }]"#, "[0]", 4);
        let model = load_model_from_slice(json.as_bytes()).unwrap();

        assert_eq!(model.meshes.len(), 1);
        let mesh = &model.meshes[0];
        assert_eq!(mesh.name.as_deref(), Some("floor"));
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(model.triangle_count(), 1);
        // Generated normals face +Z for a counter-clockwise XY triangle
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal[2], 1.0, epsilon = 1e-6);
            assert_eq!(v.color, [1.0; 4]);
        }
    }

    #[test]
    fn bakes_nested_node_transforms() {
        let nodes = r#"[
            { "translation": [10.0, 0.0, 0.0], "children": [1] },
            { "mesh": 0, "translation": [0.0, 5.0, 0.0], "scale": [2.0, 2.0, 2.0] }
        ]"#;
        let json = triangle_gltf(nodes, "[0]", 4);
        let model = load_model_from_slice(json.as_bytes()).unwrap();

        let bounds = model.bounds();
        assert_eq!(bounds.min, Vec3::new(10.0, 5.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(12.0, 7.0, 0.0));
    }

    #[test]
    fn scene_without_nodes_is_empty() {
        let json = triangle_gltf("[]", "[]", 4);
        let model = load_model_from_slice(json.as_bytes()).unwrap();
        assert!(model.is_empty());
        assert_eq!(model.bounds(), BoundingVolume::EMPTY);
    }

    #[test]
    fn only_unsupported_primitives_is_an_error() {
        // mode 0 = POINTS
        let json = triangle_gltf(r#"[{ "mesh": 0 }]"#, "[0]", 0);
        let err = load_model_from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, RoomviewError::ModelLoad(_)));
    }

    #[test]
    fn images_are_not_decoded() {
        // WebP is not decodable by the importer, and data URI images are
        // rejected outright when importing from a slice.
        let json = with_members(
            &triangle_gltf(r#"[{ "mesh": 0 }]"#, "[0]", 4),
            r#""images": [{ "uri": "data:image/webp;base64,UklGRg==" }],
  "textures": [{ "source": 0 }]"#,
        );
        let model = load_model_from_slice(json.as_bytes()).unwrap();
        assert_eq!(model.triangle_count(), 1);
    }

    #[test]
    fn draco_required_file_is_rejected() {
        let json = with_members(
            &triangle_gltf(r#"[{ "mesh": 0 }]"#, "[0]", 4),
            r#""extensionsUsed": ["KHR_draco_mesh_compression"],
  "extensionsRequired": ["KHR_draco_mesh_compression"]"#,
        );
        let err = load_model_from_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, RoomviewError::Gltf(_)));
    }

    #[test]
    fn path_load_ignores_missing_texture_file() {
        let dir = std::env::temp_dir()
            .join(format!("roomview-loader-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        // Buffer bytes come from the embedded data URI; the image file is
        // never created, so decoding it would fail.
        let json = with_members(
            &triangle_gltf(r#"[{ "mesh": 0 }]"#, "[0]", 4),
            r#""images": [{ "uri": "missing_texture.png" }]"#,
        );
        let path = dir.join("room.gltf");
        std::fs::write(&path, json).unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.triangle_count(), 1);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn garbage_is_a_gltf_error() {
        let err = load_model_from_slice(b"definitely not a model").unwrap_err();
        assert!(matches!(err, RoomviewError::Gltf(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_model(Path::new("no/such/room.glb")).is_err());
    }

    #[test]
    fn smooth_normals_average_faces() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z];
        // Two faces sharing the edge 0-1: one in XY, one in XZ
        let normals = smooth_normals(&positions, &[0, 1, 2, 0, 3, 1]);
        let shared = normals[0];
        assert_relative_eq!(shared.length(), 1.0, epsilon = 1e-6);
        assert!(shared.y > 0.0 && shared.z > 0.0);
    }
}
