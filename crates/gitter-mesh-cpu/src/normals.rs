use gitter_geom::Vec3;

use crate::mesh_build::MeshBuild;

/// Rebuilds the per-vertex normal buffer from positions and indices.
///
/// Each triangle's area-weighted face normal (`(b-a) x (c-a)` for indices
/// `(a, b, c)`) is accumulated into its three vertices, then every
/// accumulated vector is normalized. A vertex no triangle references keeps
/// the zero vector rather than producing NaNs.
pub fn recalc_normals(mb: &mut MeshBuild) {
    let n_verts = mb.vertex_count();
    let mut acc = vec![Vec3::ZERO; n_verts];
    for tri in mb.idx.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let a = mb.position(ia);
        let b = mb.position(ib);
        let c = mb.position(ic);
        let face = (b - a).cross(c - a);
        acc[ia] += face;
        acc[ib] += face;
        acc[ic] += face;
    }
    mb.norm.clear();
    mb.norm.reserve(n_verts * 3);
    for v in acc {
        let n = v.normalized();
        mb.norm.extend_from_slice(&[n.x, n.y, n.z]);
    }
}
