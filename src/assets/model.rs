//! glTF model import.
//!
//! Flattens every triangle primitive reachable from the default scene into
//! one indexed mesh in model space. Node transforms are baked into the
//! vertices; material base-color factors and vertex colors are multiplied
//! into a per-vertex color. Textures are not sampled.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3, Vec4};

use crate::error::ViewerError;

/// One vertex of the model mesh, laid out for the model pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Linear RGBA base color.
    pub color: [f32; 4],
}

/// Indexed triangle list for the whole model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelMesh {
    /// Vertex data.
    pub vertices: Vec<ModelVertex>,
    /// Triangle indices into [`Self::vertices`].
    pub indices: Vec<u32>,
}

impl ModelMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds `(min, max)`, `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Append a primitive, offsetting its indices past the current
    /// vertices.
    fn append(&mut self, vertices: Vec<ModelVertex>, indices: &[u32]) {
        let base = u32::try_from(self.vertices.len()).unwrap_or(u32::MAX);
        self.vertices.extend(vertices);
        self.indices.extend(indices.iter().map(|&i| base + i));
    }
}

/// Import the glTF/GLB file at `path`.
pub fn load_model(path: &Path) -> Result<ModelMesh, ViewerError> {
    let (doc, buffers, _images) = gltf::import(path).map_err(|e| {
        ViewerError::ModelLoad(format!("{}: {e}", path.display()))
    })?;

    let mut mesh = ModelMesh::default();
    if let Some(scene) = doc.default_scene().or_else(|| doc.scenes().next()) {
        for node in scene.nodes() {
            visit_node(&node, Mat4::IDENTITY, &buffers, &mut mesh);
        }
    } else {
        for gltf_mesh in doc.meshes() {
            append_mesh(&gltf_mesh, Mat4::IDENTITY, &buffers, &mut mesh);
        }
    }

    if mesh.indices.is_empty() {
        return Err(ViewerError::ModelLoad(format!(
            "{}: no triangle geometry",
            path.display()
        )));
    }

    log::info!(
        "loaded model {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    if let Some((lo, hi)) = mesh.bounds() {
        log::debug!("model bounds {lo} .. {hi}");
    }
    Ok(mesh)
}

fn visit_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut ModelMesh,
) {
    let local = Mat4::from_cols_array_2d(&node.transform().matrix());
    let world = parent * local;
    if let Some(gltf_mesh) = node.mesh() {
        append_mesh(&gltf_mesh, world, buffers, out);
    }
    for child in node.children() {
        visit_node(&child, world, buffers, out);
    }
}

fn append_mesh(
    gltf_mesh: &gltf::Mesh<'_>,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut ModelMesh,
) {
    let normal_matrix = normal_matrix(world);

    for prim in gltf_mesh.primitives() {
        if prim.mode() != gltf::mesh::Mode::Triangles {
            log::debug!(
                "skipping {:?} primitive in mesh {:?}",
                prim.mode(),
                gltf_mesh.name()
            );
            continue;
        }
        let reader = prim.reader(|buffer| {
            buffers.get(buffer.index()).map(|data| data.0.as_slice())
        });

        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| world.transform_point3(Vec3::from(p)))
            .collect();
        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..u32::try_from(positions.len()).unwrap_or(u32::MAX))
                .collect(),
        };
        let count = positions.len();
        if indices.iter().any(|&i| i as usize >= count) {
            log::warn!(
                "mesh {:?}: index out of range, primitive skipped",
                gltf_mesh.name()
            );
            continue;
        }

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
                .collect(),
            None => compute_normals(&positions, &indices),
        };

        let base = Vec4::from(
            prim.material().pbr_metallic_roughness().base_color_factor(),
        );
        let colors: Vec<Vec4> = match reader.read_colors(0) {
            Some(colors) => {
                colors.into_rgba_f32().map(|c| base * Vec4::from(c)).collect()
            }
            None => vec![base; count],
        };

        let vertices = positions
            .iter()
            .enumerate()
            .map(|(i, p)| ModelVertex {
                position: p.to_array(),
                normal: normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                color: colors.get(i).copied().unwrap_or(base).to_array(),
            })
            .collect();
        out.append(vertices, &indices[..indices.len() - indices.len() % 3]);
    }
}

/// Inverse-transpose of the upper 3x3, for transforming normals.
fn normal_matrix(world: Mat4) -> Mat3 {
    let linear = Mat3::from_mat4(world);
    if linear.determinant().abs() < f32::EPSILON {
        Mat3::IDENTITY
    } else {
        linear.inverse().transpose()
    }
}

/// Smooth normals for meshes that ship without them: each vertex gets
/// the area-weighted sum of its faces' normals.
#[must_use]
pub fn compute_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(&pa), Some(&pb), Some(&pc)) =
            (positions.get(a), positions.get(b), positions.get(c))
        else {
            continue;
        };
        let face = (pb - pa).cross(pc - pa);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One red triangle in the XY plane, node translated by (1, 2, 3),
    /// positions in an embedded base64 buffer, no normals or indices.
    const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [ { "nodes": [0] } ],
  "nodes": [ { "mesh": 0, "translation": [1.0, 2.0, 3.0] } ],
  "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] } ],
  "materials": [ { "pbrMetallicRoughness": { "baseColorFactor": [1.0, 0.0, 0.0, 1.0] } } ],
  "buffers": [ {
    "byteLength": 36,
    "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA"
  } ],
  "bufferViews": [ { "buffer": 0, "byteOffset": 0, "byteLength": 36 } ],
  "accessors": [ {
    "bufferView": 0,
    "componentType": 5126,
    "count": 3,
    "type": "VEC3",
    "min": [0.0, 0.0, 0.0],
    "max": [1.0, 1.0, 0.0]
  } ]
}"#;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("astroview-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn imports_embedded_triangle() {
        let path = write_temp("triangle.gltf", TRIANGLE_GLTF);
        let mesh = load_model(&path);
        let _ = std::fs::remove_file(&path);
        let mesh = mesh.unwrap();

        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(mesh.vertices[1].position, [2.0, 2.0, 3.0]);
        assert_eq!(mesh.vertices[2].position, [1.0, 3.0, 3.0]);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal) - Vec3::Z).length() < 1e-6);
            assert_eq!(v.color, [1.0, 0.0, 0.0, 1.0]);
        }
        assert_eq!(
            mesh.bounds(),
            Some((Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 3.0, 3.0)))
        );
    }

    #[test]
    fn missing_file_is_model_error() {
        let result = load_model(Path::new("does/not/exist.glb"));
        assert!(matches!(result, Err(ViewerError::ModelLoad(_))));
    }

    #[test]
    fn garbage_file_is_model_error() {
        let path = write_temp("garbage.glb", "not a model");
        let result = load_model(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(ViewerError::ModelLoad(_))));
    }

    #[test]
    fn computed_normals_follow_winding() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(1.0, 1.0, 0.0)];
        let normals = compute_normals(&positions, &[0, 1, 2, 1, 3, 2]);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_fallback_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::ONE];
        let normals = compute_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], Vec3::Y);
    }

    #[test]
    fn empty_mesh_has_no_bounds() {
        assert_eq!(ModelMesh::default().bounds(), None);
    }
}
