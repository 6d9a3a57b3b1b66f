use gitter_geom::Vec3;
use gitter_mesh_cpu::{GridError, MeshBuild, build_grid_plane_cpu, recalc_normals};

/// Face normal of triangle `t` in the index buffer, right-hand rule.
fn face_normal(mb: &MeshBuild, t: usize) -> Vec3 {
    let ia = mb.idx[t * 3] as usize;
    let ib = mb.idx[t * 3 + 1] as usize;
    let ic = mb.idx[t * 3 + 2] as usize;
    let a = mb.position(ia);
    let b = mb.position(ib);
    let c = mb.position(ic);
    (b - a).cross(c - a)
}

#[test]
fn buffer_lengths_match_side() {
    for side in [2i32, 3, 4, 7, 16, 33] {
        let cpu = build_grid_plane_cpu(side).unwrap();
        let n = side as usize;
        let mb = &cpu.mesh;
        assert_eq!(mb.pos.len(), n * n * 3);
        assert_eq!(mb.uv.len(), n * n * 2);
        assert_eq!(mb.norm.len(), n * n * 3);
        assert_eq!(mb.idx.len(), (n - 1) * (n - 1) * 6);
    }
}

#[test]
fn side_below_two_is_rejected() {
    for side in [1i32, 0, -5] {
        match build_grid_plane_cpu(side) {
            Err(GridError::InvalidSide(s)) => assert_eq!(s, side),
            Ok(_) => panic!("side {} should not build", side),
        }
    }
}

#[test]
fn smallest_grid_is_one_quad() {
    let cpu = build_grid_plane_cpu(2).unwrap();
    let mb = &cpu.mesh;
    assert_eq!(mb.vertex_count(), 4);
    assert_eq!(mb.triangle_count(), 2);
    // bl=0 br=1 tl=2 tr=3
    assert_eq!(mb.idx, vec![0, 3, 1, 0, 2, 3]);
}

#[test]
fn vertices_follow_flattened_indexing() {
    let side = 5i32;
    let cpu = build_grid_plane_cpu(side).unwrap();
    let n = side as usize;
    for z in 0..n {
        for x in 0..n {
            let i = x + z * n;
            let p = cpu.mesh.position(i);
            assert_eq!(p, Vec3::new(x as f32, 0.0, z as f32));
        }
    }
}

#[test]
fn uvs_normalize_into_unit_square() {
    let side = 5i32;
    let cpu = build_grid_plane_cpu(side).unwrap();
    let n = side as usize;
    let denom = (n - 1) as f32;
    for z in 0..n {
        for x in 0..n {
            let uv = cpu.mesh.texcoord(x + z * n);
            assert_eq!(uv.x, x as f32 / denom);
            assert_eq!(uv.y, z as f32 / denom);
            assert!((0.0..=1.0).contains(&uv.x));
            assert!((0.0..=1.0).contains(&uv.y));
        }
    }
}

#[test]
fn three_by_three_grid_exact_buffers() {
    let cpu = build_grid_plane_cpu(3).unwrap();
    let mb = &cpu.mesh;
    assert_eq!(mb.vertex_count(), 9);
    assert_eq!(mb.position(0), Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(mb.position(8), Vec3::new(2.0, 0.0, 2.0));
    // UV corners of the unit square
    assert_eq!((mb.texcoord(0).x, mb.texcoord(0).y), (0.0, 0.0));
    assert_eq!((mb.texcoord(2).x, mb.texcoord(2).y), (1.0, 0.0));
    assert_eq!((mb.texcoord(6).x, mb.texcoord(6).y), (0.0, 1.0));
    assert_eq!((mb.texcoord(8).x, mb.texcoord(8).y), (1.0, 1.0));
    // Four cells, row-major with x fastest, each (bl, tr, br, bl, tl, tr)
    assert_eq!(
        mb.idx,
        vec![
            0, 4, 1, 0, 3, 4, // cell (0,0)
            1, 5, 2, 1, 4, 5, // cell (1,0)
            3, 7, 4, 3, 6, 7, // cell (0,1)
            4, 8, 5, 4, 7, 8, // cell (1,1)
        ]
    );
}

#[test]
fn every_index_addresses_a_vertex() {
    let cpu = build_grid_plane_cpu(9).unwrap();
    let n_verts = cpu.mesh.vertex_count() as u32;
    assert!(cpu.mesh.idx.iter().all(|&i| i < n_verts));
}

#[test]
fn builds_are_deterministic() {
    let a = build_grid_plane_cpu(17).unwrap();
    let b = build_grid_plane_cpu(17).unwrap();
    assert!(a.mesh == b.mesh);
    assert_eq!(a.bbox, b.bbox);
}

#[test]
fn all_faces_wind_toward_positive_y() {
    let cpu = build_grid_plane_cpu(6).unwrap();
    for t in 0..cpu.mesh.triangle_count() {
        let n = face_normal(&cpu.mesh, t);
        assert!(n.y > 0.0, "triangle {} faces {:?}", t, n);
    }
}

#[test]
fn flat_grid_normals_are_exactly_up() {
    let cpu = build_grid_plane_cpu(8).unwrap();
    for i in 0..cpu.mesh.vertex_count() {
        let n = cpu.mesh.normal(i);
        assert!((n - Vec3::UP).length() < 1e-6, "vertex {} normal {:?}", i, n);
    }
}

#[test]
fn bbox_spans_the_grid_extent() {
    let cpu = build_grid_plane_cpu(11).unwrap();
    assert_eq!(cpu.bbox.min, Vec3::ZERO);
    assert_eq!(cpu.bbox.max, Vec3::new(10.0, 0.0, 10.0));
}

#[test]
fn unreferenced_vertex_gets_zero_normal() {
    let mut mb = MeshBuild::default();
    mb.pos.extend_from_slice(&[1.0, 2.0, 3.0]);
    mb.uv.extend_from_slice(&[0.0, 0.0]);
    recalc_normals(&mut mb);
    assert_eq!(mb.normal(0), Vec3::ZERO);
}
