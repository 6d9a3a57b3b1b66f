//! CPU mesh construction for flat tessellated grid planes (renderer-agnostic).
#![forbid(unsafe_code)]

pub mod grid;
pub mod mesh_build;
pub mod normals;

pub use grid::{GridError, GridMeshCPU, build_grid_plane_cpu};
pub use mesh_build::MeshBuild;
pub use normals::recalc_normals;
