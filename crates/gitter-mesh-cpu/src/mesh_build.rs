use gitter_geom::{Vec2, Vec3};

/// Interleaved CPU-side mesh buffers, ready for GPU upload.
///
/// Positions and normals are `x,y,z` triples, UVs are `u,v` pairs, and the
/// index buffer addresses vertices by their position in these arrays. The
/// three attribute buffers always describe the same vertex count; the index
/// buffer is only meaningful against that matched set.
#[derive(Default, Clone, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    /// Pre-reserve capacity for `n_verts` vertices and `n_quads` quads.
    #[inline]
    pub fn reserve_grid(&mut self, n_verts: usize, n_quads: usize) {
        self.pos.reserve(n_verts * 3);
        self.norm.reserve(n_verts * 3);
        self.uv.reserve(n_verts * 2);
        self.idx.reserve(n_quads * 6);
    }

    /// Appends a vertex position and its UV. Normals are not written here;
    /// they are derived afterwards from the index buffer.
    #[inline]
    pub fn push_vertex(&mut self, p: Vec3, uv: Vec2) {
        self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        self.uv.extend_from_slice(&[uv.x, uv.y]);
    }

    /// Returns the position of vertex `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos[i * 3], self.pos[i * 3 + 1], self.pos[i * 3 + 2])
    }

    /// Returns the normal of vertex `i`.
    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::new(self.norm[i * 3], self.norm[i * 3 + 1], self.norm[i * 3 + 2])
    }

    /// Returns the texture coordinate of vertex `i`.
    #[inline]
    pub fn texcoord(&self, i: usize) -> Vec2 {
        Vec2::new(self.uv[i * 2], self.uv[i * 2 + 1])
    }

    /// Returns a slice of interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    /// Returns a slice of interleaved vertex normals (x,y,z per vertex).
    pub fn normals(&self) -> &[f32] {
        &self.norm
    }
}
