//! End-to-end rendering through mesh, vertex stage, dispatch and frame
//! buffer.

use texraster::math::mat4::Mat4;
use texraster::render::{DisplaySurface, Dispatcher, ExecutionMode, FrameBuffer};
use texraster::{Engine, Mesh, Model, RenderConfig, RenderError, Texture, TransformSet};

const A: u32 = 0xFFFF_0000;
const B: u32 = 0xFF00_FF00;
const C: u32 = 0xFF00_00FF;
const D: u32 = 0xFFFF_FFFF;
const CLEAR: u32 = 0xFF00_0000;

/// Maps view-space z in [-1, 0] onto depth [0, 1] and leaves x/y alone.
fn ortho_transforms() -> TransformSet {
    TransformSet::new(
        Mat4::identity(),
        Mat4::identity(),
        Mat4::orthographic_reversed_z(-1.0, 1.0, -1.0, 1.0, 0.0, 1.0),
    )
}

/// Full-screen quad at view-space depth `z`, counter-clockwise, with UVs
/// spanning the texture (v = 0 at the top).
fn fullscreen_quad(name: &str, z: f32) -> Mesh {
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    let positions = corners.iter().flat_map(|&(x, y)| [x, y, z]).collect();
    let uvs = corners
        .iter()
        .flat_map(|&(x, y)| [(x + 1.0) / 2.0, (1.0 - y) / 2.0])
        .collect();
    Mesh::new(name, positions, vec![], uvs, vec![0, 1, 2, 0, 2, 3]).unwrap()
}

/// Same quad, but every vertex samples one fixed UV.
fn flat_quad(name: &str, z: f32, uv: (f32, f32)) -> Mesh {
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    let positions = corners.iter().flat_map(|&(x, y)| [x, y, z]).collect();
    let uvs = corners.iter().flat_map(|_| [uv.0, uv.1]).collect();
    Mesh::new(name, positions, vec![], uvs, vec![0, 1, 2, 0, 2, 3]).unwrap()
}

fn checkerboard() -> Texture {
    Texture::new(vec![A, B, C, D], 2, 2).unwrap()
}

fn render(mode: ExecutionMode, meshes: &[Mesh], texture: &Texture, size: u32) -> (FrameBuffer, usize) {
    let mut buffer = FrameBuffer::new(size, size);
    buffer.clear(CLEAR);
    let dispatcher = Dispatcher::new(4, mode).unwrap();
    let written = dispatcher.render_meshes(meshes, texture, &ortho_transforms(), &buffer);
    (buffer, written)
}

#[test]
fn checkerboard_quad_fills_four_blocks() {
    for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
        let (buffer, _) = render(mode, &[fullscreen_quad("quad", -0.5)], &checkerboard(), 8);

        for py in 0..8 {
            for px in 0..8 {
                let expected = match (px / 4, py / 4) {
                    (0, 0) => A,
                    (1, 0) => B,
                    (0, 1) => C,
                    _ => D,
                };
                assert_eq!(buffer.pixel(px, py), Some(expected), "pixel ({px}, {py}) in {mode:?}");
                assert_eq!(buffer.depth(px, py), Some(0.5));
            }
        }
    }
}

#[test]
fn sequential_checkerboard_writes_each_pixel_once() {
    // The diagonal is covered by both triangles; the second hit ties on
    // depth and is rejected.
    let (_, written) = render(ExecutionMode::Sequential, &[fullscreen_quad("quad", -0.5)], &checkerboard(), 8);
    assert_eq!(written, 64);
}

#[test]
fn transparent_texture_leaves_buffer_untouched() {
    let transparent = Texture::solid(1, 1, 0x00FF_FFFF);
    let (buffer, written) = render(ExecutionMode::Sequential, &[fullscreen_quad("quad", -0.5)], &transparent, 8);

    assert_eq!(written, 0);
    assert!(buffer.snapshot().iter().all(|&c| c == CLEAR));
    assert!(buffer.depth_snapshot().iter().all(|&d| d == 0.0));
}

#[test]
fn nearest_mesh_wins_regardless_of_order() {
    let texture = checkerboard();
    // depth 0.75 samples A, depth 0.25 samples D
    let near = flat_quad("near", -0.25, (0.25, 0.25));
    let far = flat_quad("far", -0.75, (0.75, 0.75));

    for meshes in [[near.clone(), far.clone()], [far.clone(), near.clone()]] {
        let (buffer, _) = render(ExecutionMode::Sequential, &meshes, &texture, 8);
        assert!(buffer.snapshot().iter().all(|&c| c == A));
        assert!(buffer.depth_snapshot().iter().all(|&d| d == 0.75));
    }
}

/// Small triangles on a 4-pixel grid that never share a pixel.
fn scattered_triangles(name: &str, rows: std::ops::Range<u32>) -> Mesh {
    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for row in rows {
        for col in 0..8u32 {
            let (sx, sy) = ((col * 4) as f32, (row * 4) as f32);
            let base = positions.len() as u32 / 3;
            // screen (0,0), (0,2), (2,0) inside the cell; 32 px = 2 NDC units
            for (dx, dy) in [(0.0, 0.0), (0.0, 2.0), (2.0, 0.0)] {
                let x = (sx + dx) / 16.0 - 1.0;
                let y = 1.0 - (sy + dy) / 16.0;
                positions.extend_from_slice(&[x, y, -0.5 + col as f32 / 16.0]);
                uvs.extend_from_slice(&[(sx + dx) / 32.0, (sy + dy) / 32.0]);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2]);
        }
    }

    Mesh::new(name, positions, vec![], uvs, indices).unwrap()
}

#[test]
fn parallel_matches_sequential_without_collisions() {
    let pixels = (0..16u32).map(|i| 0xFF00_0000 | (i * 0x0F_0F0F)).collect();
    let texture = Texture::new(pixels, 4, 4).unwrap();
    let meshes = [scattered_triangles("top", 0..4), scattered_triangles("bottom", 4..8)];

    let (sequential, seq_written) = render(ExecutionMode::Sequential, &meshes, &texture, 32);
    let (parallel, par_written) = render(ExecutionMode::Parallel, &meshes, &texture, 32);

    // six pixels per triangle, 64 triangles
    assert_eq!(seq_written, 384);
    assert_eq!(par_written, seq_written);
    assert_eq!(parallel.snapshot(), sequential.snapshot());
    assert_eq!(parallel.depth_snapshot(), sequential.depth_snapshot());
}

struct RecordingSurface {
    width: u32,
    height: u32,
    frames: Vec<(u32, u32, Vec<u32>)>,
}

impl DisplaySurface for RecordingSurface {
    fn current_width(&self) -> u32 {
        self.width
    }

    fn current_height(&self) -> u32 {
        self.height
    }

    fn blit(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<(), RenderError> {
        self.frames.push((width, height, pixels.to_vec()));
        Ok(())
    }
}

#[test]
fn engine_follows_surface_size() {
    let config = RenderConfig {
        worker_count: 2,
        window_width: 4,
        window_height: 4,
        ..RenderConfig::default()
    };
    let mut engine = Engine::new(&config).unwrap();
    let model = Model::new("quad", vec![fullscreen_quad("quad", -0.5)], checkerboard());
    let mut surface = RecordingSurface {
        width: 8,
        height: 8,
        frames: Vec::new(),
    };

    let written = engine.render_frame(&mut surface, &model, &ortho_transforms()).unwrap();
    assert!(written >= 64);
    assert_eq!((engine.frame_buffer().width(), engine.frame_buffer().height()), (8, 8));

    surface.width = 6;
    surface.height = 2;
    engine.render_frame(&mut surface, &model, &ortho_transforms()).unwrap();

    let sizes: Vec<_> = surface.frames.iter().map(|(w, h, p)| (*w, *h, p.len())).collect();
    assert_eq!(sizes, vec![(8, 8, 64), (6, 2, 12)]);
    // top-left block of the first frame samples texel (0, 0)
    assert_eq!(surface.frames[0].2[0], A);
}
