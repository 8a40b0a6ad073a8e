//! Triangle mesh storage and OBJ import.
//!
//! A [`Mesh`] holds flat attribute arrays exactly as an asset importer
//! produces them: `xyz` positions, `xyz` normals, `uv` texture coordinates
//! and a triangle-list index buffer. Meshes are validated once on
//! construction and are immutable afterwards, so workers can read them
//! concurrently without checks on the hot path.

use std::path::Path;

use log::{info, warn};

use crate::error::LoadError;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: String,
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Build a mesh from flat arrays.
    ///
    /// `normals` may be empty, in which case smooth normals are generated
    /// from the faces. Every other invariant is enforced:
    /// `positions.len() == 3 * n`, `uvs.len() == 2 * n`, a whole number of
    /// triangles, and every index below `n`.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<f32>,
        normals: Vec<f32>,
        uvs: Vec<f32>,
        indices: Vec<u32>,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        let invalid = |reason: String| LoadError::InvalidMesh {
            name: name.clone(),
            reason,
        };

        if positions.len() % 3 != 0 {
            return Err(invalid(format!(
                "position array length {} is not a multiple of 3",
                positions.len()
            )));
        }
        let vertex_count = positions.len() / 3;

        if uvs.len() != vertex_count * 2 {
            return Err(invalid(format!(
                "expected {} uv components, got {}",
                vertex_count * 2,
                uvs.len()
            )));
        }
        if !normals.is_empty() && normals.len() != positions.len() {
            return Err(invalid(format!(
                "expected {} normal components, got {}",
                positions.len(),
                normals.len()
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(invalid(format!(
                "index count {} is not a whole number of triangles",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(invalid(format!(
                "index {bad} out of range for {vertex_count} vertices"
            )));
        }

        let normals = if normals.is_empty() {
            generate_smooth_normals(&positions, &indices)
        } else {
            normals
        };

        Ok(Self {
            name,
            positions,
            normals,
            uvs,
            indices,
        })
    }

    /// Import every object/group of an OBJ file as its own mesh.
    ///
    /// Faces are triangulated and attributes are re-indexed to a single
    /// index buffer. Missing normals are generated; missing texture
    /// coordinates are filled with zeros. V is flipped so that `v = 0` is
    /// the top row of the texture.
    pub fn load_all_from_obj<P: AsRef<Path>>(path: P) -> Result<Vec<Mesh>, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let meshes = models
            .into_iter()
            .map(Self::from_obj_model)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "imported {} mesh(es) from {}: {} vertices, {} triangles",
            meshes.len(),
            path.display(),
            meshes.iter().map(Mesh::vertex_count).sum::<usize>(),
            meshes.iter().map(Mesh::triangle_count).sum::<usize>(),
        );
        Ok(meshes)
    }

    fn from_obj_model(model: tobj::Model) -> Result<Mesh, LoadError> {
        let (mesh, name) = (model.mesh, model.name);
        let vertex_count = mesh.positions.len() / 3;

        let uvs = if mesh.texcoords.len() == vertex_count * 2 {
            mesh.texcoords
                .chunks_exact(2)
                .flat_map(|uv| [uv[0], 1.0 - uv[1]])
                .collect()
        } else {
            warn!("mesh '{name}' has no texture coordinates; using (0, 0)");
            vec![0.0; vertex_count * 2]
        };

        Mesh::new(name, mesh.positions, mesh.normals, uvs, mesh.indices)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    pub fn uvs(&self) -> &[f32] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn position(&self, vertex: usize) -> Vec3 {
        let p = &self.positions[vertex * 3..vertex * 3 + 3];
        Vec3::new(p[0], p[1], p[2])
    }

    #[inline]
    pub fn normal(&self, vertex: usize) -> Vec3 {
        let n = &self.normals[vertex * 3..vertex * 3 + 3];
        Vec3::new(n[0], n[1], n[2])
    }

    #[inline]
    pub fn uv(&self, vertex: usize) -> Vec2 {
        Vec2::new(self.uvs[vertex * 2], self.uvs[vertex * 2 + 1])
    }
}

/// Area-weighted vertex normals: each face adds its unnormalized normal to
/// its three corners, then every sum is normalized.
fn generate_smooth_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let at = |i: u32| {
        let i = i as usize * 3;
        Vec3::new(positions[i], positions[i + 1], positions[i + 2])
    };

    let mut sums = vec![Vec3::ZERO; vertex_count];
    for face in indices.chunks_exact(3) {
        let (a, b, c) = (at(face[0]), at(face[1]), at(face[2]));
        let face_normal = (b - a).cross(c - a);
        for &i in face {
            sums[i as usize] = sums[i as usize] + face_normal;
        }
    }

    sums.into_iter()
        .flat_map(|n| {
            let n = n.normalize();
            [n.x, n.y, n.z]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;

    fn unit_triangle() -> (Vec<f32>, Vec<f32>, Vec<u32>) {
        (
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn generates_normals_when_absent() {
        let (positions, uvs, indices) = unit_triangle();
        let mesh = Mesh::new("tri", positions, vec![], uvs, indices).unwrap();
        for v in 0..3 {
            let n = mesh.normal(v);
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn rejects_out_of_range_index() {
        let (positions, uvs, _) = unit_triangle();
        let err = Mesh::new("tri", positions, vec![], uvs, vec![0, 1, 3]).unwrap_err();
        assert!(matches!(err, LoadError::InvalidMesh { .. }));
    }

    #[test]
    fn rejects_partial_triangle() {
        let (positions, uvs, _) = unit_triangle();
        assert!(Mesh::new("tri", positions, vec![], uvs, vec![0, 1]).is_err());
    }

    #[test]
    fn rejects_uv_count_mismatch() {
        let (positions, _, indices) = unit_triangle();
        assert!(Mesh::new("tri", positions, vec![], vec![0.0; 4], indices).is_err());
    }

    #[test]
    fn accessors_read_flat_arrays() {
        let (positions, uvs, indices) = unit_triangle();
        let mesh = Mesh::new("tri", positions, vec![], uvs, indices).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.position(1), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.uv(1), Vec2::new(1.0, 0.0));
        assert_eq!(mesh.uv(2), Vec2::new(0.0, 1.0));
        assert_eq!(mesh.normals().len(), 9);
    }

    #[test]
    fn imports_and_triangulates_obj_quad() {
        let path = std::env::temp_dir().join(format!("texraster-quad-{}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "o quad\nv -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\nvt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nf 1/1 2/2 3/3 4/4"
        )
        .unwrap();
        drop(file);

        let meshes = Mesh::load_all_from_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(meshes.len(), 1);
        let quad = &meshes[0];
        assert_eq!(quad.triangle_count(), 2);
        assert_eq!(quad.normals().len(), quad.positions().len());
        // bottom-left corner carries OBJ v = 0, stored flipped
        let corner = (0..quad.vertex_count())
            .find(|&v| quad.position(v) == Vec3::new(-1.0, -1.0, 0.0))
            .unwrap();
        assert_relative_eq!(quad.uv(corner).y, 1.0);
    }

    #[test]
    fn missing_obj_file_is_an_error() {
        let err = Mesh::load_all_from_obj("/nonexistent/texraster.obj").unwrap_err();
        assert!(matches!(err, LoadError::Obj(_)));
    }
}
