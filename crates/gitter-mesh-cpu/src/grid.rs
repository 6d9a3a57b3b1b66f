use std::time::Instant;

use gitter_geom::{Aabb, Vec2, Vec3};

use crate::mesh_build::MeshBuild;
use crate::normals::recalc_normals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The grid needs at least 2 vertices per edge; 1 has no quads and the
    /// UV divisor `side - 1` would be zero.
    InvalidSide(i32),
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::InvalidSide(side) => {
                write!(f, "invalid grid side {}: need at least 2 vertices per edge", side)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// A completed grid mesh: buffers plus the parameters they were built from.
pub struct GridMeshCPU {
    pub side: i32,
    pub bbox: Aabb,
    pub mesh: MeshBuild,
}

/// Builds a flat `side` x `side` vertex grid in the XZ plane at Y=0.
///
/// Vertex `(x, z)` lands at flattened index `x + z*side` with position
/// `(x, 0, z)` and UV `(x, z) / (side - 1)`. Each of the `(side-1)^2` cells
/// contributes two triangles wound so their face normals point toward +Y.
/// Normals are derived from the finished index buffer before returning, so
/// the result is a complete matched set of buffers.
///
/// Deterministic: the same `side` always produces bit-identical buffers.
pub fn build_grid_plane_cpu(side: i32) -> Result<GridMeshCPU, GridError> {
    if side < 2 {
        return Err(GridError::InvalidSide(side));
    }
    let t0 = Instant::now();
    let n = side as usize;
    let mut mb = MeshBuild::default();
    mb.reserve_grid(n * n, (n - 1) * (n - 1));
    layout_vertices(&mut mb, n);
    triangulate(&mut mb, n);
    recalc_normals(&mut mb);
    let extent = (side - 1) as f32;
    let bbox = Aabb::new(Vec3::ZERO, Vec3::new(extent, 0.0, extent));
    let ms = t0.elapsed().as_millis();
    log::debug!(
        target: "perf",
        "ms={} grid_plane_build side={} verts={} tris={}",
        ms,
        side,
        mb.vertex_count(),
        mb.triangle_count()
    );
    Ok(GridMeshCPU {
        side,
        bbox,
        mesh: mb,
    })
}

/// Emits positions and UVs row-major, `x` fastest within fixed `z`, so the
/// append order matches the `x + z*side` flattening used by `triangulate`.
fn layout_vertices(mb: &mut MeshBuild, side: usize) {
    let denom = (side - 1) as f32;
    for z in 0..side {
        for x in 0..side {
            mb.push_vertex(
                Vec3::new(x as f32, 0.0, z as f32),
                Vec2::new(x as f32, z as f32) / denom,
            );
        }
    }
}

/// Emits two triangles per cell as the sextuple `(bl, tr, br, bl, tl, tr)`.
/// Cells go row-major, `x` fastest, mirroring the vertex pass.
fn triangulate(mb: &mut MeshBuild, side: usize) {
    for z in 0..side - 1 {
        for x in 0..side - 1 {
            let bl = (x + z * side) as u32;
            let br = bl + 1;
            let tl = (x + (z + 1) * side) as u32;
            let tr = tl + 1;
            mb.idx.extend_from_slice(&[bl, tr, br, bl, tl, tr]);
        }
    }
}
