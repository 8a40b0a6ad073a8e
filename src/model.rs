//! A loaded asset: every mesh from one OBJ file plus the texture they share.
//!
//! Meshes and texture are immutable once the model is built, so a frame can
//! hand `&Model` to every worker without synchronization.

use std::path::Path;

use log::info;

use crate::error::LoadError;
use crate::mesh::Mesh;
use crate::texture::Texture;

pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    texture: Texture,
}

impl Model {
    pub fn new(name: impl Into<String>, meshes: Vec<Mesh>, texture: Texture) -> Self {
        Self {
            name: name.into(),
            meshes,
            texture,
        }
    }

    /// Import an OBJ file and decode its texture.
    ///
    /// All objects/groups in the OBJ file become separate meshes.
    pub fn load<P, Q>(name: impl Into<String>, mesh_path: P, texture_path: Q) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let meshes = Mesh::load_all_from_obj(mesh_path)?;
        let texture = Texture::from_file(texture_path)?;
        let model = Self::new(name, meshes, texture);
        info!(
            "model '{}' ready: {} mesh(es), {} triangle(s)",
            model.name(),
            model.mesh_count(),
            model.triangle_count()
        );
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(name: &str) -> Mesh {
        Mesh::new(
            name,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            vec![],
            vec![0.0; 6],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn keeps_meshes_in_file_order() {
        let model = Model::new(
            "pair",
            vec![triangle("left"), triangle("right")],
            Texture::solid(1, 1, 0xFFFF_FFFF),
        );
        assert_eq!(model.mesh_count(), 2);
        assert_eq!(model.triangle_count(), 2);
        assert_eq!(model.name(), "pair");
        let names: Vec<&str> = model.meshes().iter().map(Mesh::name).collect();
        assert_eq!(names, ["left", "right"]);
    }

    #[test]
    fn missing_texture_fails_the_load() {
        let path = std::env::temp_dir().join(format!("texraster-model-{}.obj", std::process::id()));
        std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let result = Model::load("tri", &path, "/nonexistent/texture.png");
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(LoadError::Image(_))));
    }
}
