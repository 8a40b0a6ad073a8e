//! Splitting a frame's index lists across the worker pool.
//!
//! Each mesh's index list is cut into contiguous, triangle-aligned ranges
//! with [`partition`]. Every range becomes one task on a rayon pool that is
//! built once and reused for every frame. All tasks write into the same
//! [`FrameBuffer`] and the dispatch call returns only after every task of
//! the frame has finished.

use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::RenderError;
use crate::mesh::Mesh;
use crate::render::framebuffer::FrameBuffer;
use crate::render::rasterizer::TriangleRasterizer;
use crate::render::vertex::transform_vertex;
use crate::texture::Texture;
use crate::transform::TransformSet;

/// How a frame's ranges are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One pool task per range.
    #[default]
    Parallel,
    /// Same ranges, run in order on the calling thread. Results are
    /// bit-exact and reproducible.
    Sequential,
}

/// Cut `index_count` indices into at most `workers` triangle-aligned ranges.
///
/// With `t = index_count / 3` triangles and `per = max(1, t / workers)`,
/// range `k` starts at `k * per * 3`. The last range runs to `index_count`
/// and absorbs the remainder. A worker count of 0 is treated as 1.
pub fn partition(index_count: usize, workers: usize) -> Vec<Range<usize>> {
    let triangles = index_count / 3;
    if triangles == 0 {
        return Vec::new();
    }

    let workers = workers.max(1);
    let per = (triangles / workers).max(1);
    let count = workers.min(triangles);

    (0..count)
        .map(|k| {
            let start = k * per * 3;
            let end = if k + 1 == count { index_count } else { (k + 1) * per * 3 };
            start..end
        })
        .collect()
}

/// Fixed worker pool plus the rasterizer every task shares.
pub struct Dispatcher {
    pool: ThreadPool,
    workers: usize,
    mode: ExecutionMode,
    rasterizer: TriangleRasterizer,
}

impl Dispatcher {
    pub fn new(workers: usize, mode: ExecutionMode) -> Result<Self, RenderError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("texraster-worker-{i}"))
            .build()?;
        info!("worker pool ready: {workers} thread(s), {mode:?} dispatch");

        Ok(Self {
            pool,
            workers,
            mode,
            rasterizer: TriangleRasterizer::new(),
        })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ExecutionMode) {
        self.mode = mode;
    }

    /// Render one mesh. Returns the number of pixels written.
    pub fn render_mesh(&self, mesh: &Mesh, texture: &Texture, transforms: &TransformSet, buffer: &FrameBuffer) -> usize {
        self.render_meshes(std::slice::from_ref(mesh), texture, transforms, buffer)
    }

    /// Render every mesh with the same texture and transforms.
    ///
    /// Ranges of all meshes are submitted together and joined once.
    pub fn render_meshes(
        &self,
        meshes: &[Mesh],
        texture: &Texture,
        transforms: &TransformSet,
        buffer: &FrameBuffer,
    ) -> usize {
        let jobs: Vec<(&Mesh, Range<usize>)> = meshes
            .iter()
            .flat_map(|mesh| {
                partition(mesh.indices().len(), self.workers)
                    .into_iter()
                    .map(move |range| (mesh, range))
            })
            .collect();

        let written: usize = match self.mode {
            ExecutionMode::Sequential => jobs
                .iter()
                .map(|(mesh, range)| self.render_range(mesh, range.clone(), texture, transforms, buffer))
                .sum(),
            ExecutionMode::Parallel => {
                let written = AtomicUsize::new(0);
                self.pool.scope(|scope| {
                    for (mesh, range) in &jobs {
                        let written = &written;
                        scope.spawn(move |_| {
                            let n = self.render_range(mesh, range.clone(), texture, transforms, buffer);
                            written.fetch_add(n, Ordering::Relaxed);
                        });
                    }
                });
                written.into_inner()
            }
        };

        debug!(
            "dispatched {} range(s) over {} mesh(es): {} pixel(s) written",
            jobs.len(),
            meshes.len(),
            written
        );
        written
    }

    /// Transform and rasterize the triangles of `mesh.indices()[range]`.
    pub fn render_range(
        &self,
        mesh: &Mesh,
        range: Range<usize>,
        texture: &Texture,
        transforms: &TransformSet,
        buffer: &FrameBuffer,
    ) -> usize {
        let (width, height) = (buffer.width(), buffer.height());
        mesh.indices()[range]
            .chunks_exact(3)
            .map(|face| {
                let vertices = [face[0], face[1], face[2]]
                    .map(|i| transform_vertex(mesh, i as usize, transforms, width, height));
                self.rasterizer.fill_triangle(&vertices, texture, buffer)
            })
            .sum()
    }
}
