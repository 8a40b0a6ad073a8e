//! Per-frame model/view/projection transforms.
//!
//! A [`TransformSet`] is built by the caller before a frame is dispatched
//! and handed to the pipeline by reference. Workers only ever read it, so
//! there is no way to change a matrix while triangles are in flight.

use crate::math::{mat4::Mat4, vec3::Vec3, vec4::Vec4};

/// Model, view and projection matrices for one frame, plus the optional
/// normal matrix.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct TransformSet {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// Inverse-transpose of `model`. When present the vertex stage also
    /// transforms normals.
    pub normal_matrix: Option<Mat4>,
}

impl TransformSet {
    pub fn new(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model,
            view,
            projection,
            normal_matrix: None,
        }
    }

    pub fn set_model(&mut self, model: Mat4) -> &mut Self {
        self.model = model;
        self
    }

    pub fn set_view(&mut self, view: Mat4) -> &mut Self {
        self.view = view;
        self
    }

    pub fn set_projection(&mut self, projection: Mat4) -> &mut Self {
        self.projection = projection;
        self
    }

    /// Derive the normal matrix from the current model matrix.
    ///
    /// A singular model matrix falls back to identity.
    pub fn with_normal_matrix(mut self) -> Self {
        self.normal_matrix = Some(self.model.inverse_transpose().unwrap_or_default());
        self
    }

    /// Carry a homogeneous position to clip space.
    ///
    /// Each matrix is applied in turn (model, then view, then projection);
    /// the three are never pre-multiplied into one.
    #[inline]
    pub fn to_clip(&self, position: Vec4) -> Vec4 {
        let world = self.model * position;
        let eye = self.view * world;
        self.projection * eye
    }

    /// Transform and renormalize a normal, if a normal matrix is set.
    #[inline]
    pub fn transform_normal(&self, normal: Vec3) -> Option<Vec3> {
        self.normal_matrix.map(|m| {
            (m * Vec4::direction(normal.x, normal.y, normal.z))
                .to_vec3()
                .normalize()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_is_identity_without_normals() {
        let t = TransformSet::default();
        assert_eq!(t.model, Mat4::identity());
        assert!(t.normal_matrix.is_none());
        assert!(t.transform_normal(Vec3::new(0.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn applies_model_then_view_then_projection() {
        let mut t = TransformSet::default();
        t.set_model(Mat4::translation(1.0, 0.0, 0.0))
            .set_view(Mat4::scaling(2.0, 2.0, 2.0))
            .set_projection(Mat4::translation(0.0, 0.0, -1.0));

        // translate, then scale, then translate: (1 * 2, 0, 0 - 1)
        let clip = t.to_clip(Vec4::point(0.0, 0.0, 0.0));
        assert_relative_eq!(clip.x, 2.0);
        assert_relative_eq!(clip.z, -1.0);
        assert_relative_eq!(clip.w, 1.0);
    }

    #[test]
    fn normal_matrix_corrects_non_uniform_scale() {
        let t = TransformSet::new(
            Mat4::scaling(4.0, 1.0, 1.0),
            Mat4::identity(),
            Mat4::identity(),
        )
        .with_normal_matrix();

        // plane x = y: normal (1, -1, 0); after stretching x by 4 the
        // surface normal tilts toward y
        let n = t.transform_normal(Vec3::new(1.0, -1.0, 0.0)).unwrap();
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-5);
        assert!(n.y.abs() > n.x.abs());
    }

    #[test]
    fn normal_transform_ignores_translation() {
        let t = TransformSet::new(
            Mat4::translation(5.0, -3.0, 2.0),
            Mat4::identity(),
            Mat4::identity(),
        )
        .with_normal_matrix();
        let n = t.transform_normal(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert_relative_eq!(n.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(n.x, 0.0, epsilon = 1e-5);
    }
}
