//! Vertex stage: mesh vertex to screen space.

use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::transform::TransformSet;

/// A vertex after projection, perspective divide and viewport mapping.
///
/// `x`/`y` are integer pixel coordinates (y grows downward), `z` is the
/// post-divide depth and `w` the clip-space w kept from before the divide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub x: i32,
    pub y: i32,
    pub z: f32,
    pub w: f32,
    pub u: f32,
    pub v: f32,
    pub normal: Option<Vec3>,
}

impl ScreenVertex {
    pub fn new(x: i32, y: i32, z: f32, u: f32, v: f32) -> Self {
        Self {
            x,
            y,
            z,
            w: 1.0,
            u,
            v,
            normal: None,
        }
    }
}

/// Run one mesh vertex through model, view and projection, divide by w and
/// map NDC onto a `width x height` viewport.
///
/// Screen coordinates truncate toward zero. A vertex with `w == 0` produces
/// non-finite values; the float-to-int casts saturate, so the rasterizer
/// still receives well-defined integers.
#[inline]
pub fn transform_vertex(mesh: &Mesh, vertex: usize, transforms: &TransformSet, width: u32, height: u32) -> ScreenVertex {
    let p = mesh.position(vertex);
    let clip = transforms.to_clip(Vec4::point(p.x, p.y, p.z));
    let ndc = clip.perspective_divide();

    let half_w = width as f32 * 0.5;
    let half_h = height as f32 * 0.5;
    let uv = mesh.uv(vertex);

    ScreenVertex {
        x: ((ndc.x + 1.0) * half_w) as i32,
        y: ((1.0 - ndc.y) * half_h) as i32,
        z: ndc.z,
        w: ndc.w,
        u: uv.x,
        v: uv.y,
        normal: transforms.transform_normal(mesh.normal(vertex)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::mat4::Mat4;
    use approx::assert_relative_eq;

    fn corner_mesh() -> Mesh {
        Mesh::new(
            "corners",
            vec![-1.0, 1.0, 0.25, 1.0, -1.0, 0.5, 0.0, 0.0, 0.0],
            vec![],
            vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            vec![0, 1, 2],
        )
        .unwrap()
    }

    #[test]
    fn identity_maps_ndc_corners_to_viewport() {
        let mesh = corner_mesh();
        let t = TransformSet::default();

        let top_left = transform_vertex(&mesh, 0, &t, 640, 480);
        assert_eq!((top_left.x, top_left.y), (0, 0));
        assert_relative_eq!(top_left.z, 0.25);

        let bottom_right = transform_vertex(&mesh, 1, &t, 640, 480);
        assert_eq!((bottom_right.x, bottom_right.y), (640, 480));

        let center = transform_vertex(&mesh, 2, &t, 640, 480);
        assert_eq!((center.x, center.y), (320, 240));
    }

    #[test]
    fn uv_passes_through_unchanged() {
        let mesh = corner_mesh();
        let v = transform_vertex(&mesh, 1, &TransformSet::default(), 8, 8);
        assert_relative_eq!(v.u, 0.3);
        assert_relative_eq!(v.v, 0.4);
        assert!(v.normal.is_none());
    }

    #[test]
    fn divides_by_w_and_keeps_it() {
        let mesh = corner_mesh();
        let t = TransformSet::new(Mat4::identity(), Mat4::identity(), Mat4::scaling(2.0, 2.0, 2.0));
        // scaling leaves w = 1, so the divide is a no-op and x doubles
        let v = transform_vertex(&mesh, 0, &t, 4, 4);
        assert_relative_eq!(v.w, 1.0);
        assert_relative_eq!(v.z, 0.5);
        // ndc x = -2 -> (-2 + 1) * 2 = -2
        assert_eq!(v.x, -2);
    }

    #[test]
    fn normals_follow_the_normal_matrix() {
        let mesh = corner_mesh();
        let t = TransformSet::new(Mat4::rotation_y(std::f32::consts::FRAC_PI_2), Mat4::identity(), Mat4::identity())
            .with_normal_matrix();
        let v = transform_vertex(&mesh, 2, &t, 4, 4);
        let n = v.normal.unwrap();
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-5);
    }
}
