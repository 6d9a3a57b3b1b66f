//! Raylib-based GPU upload for grid meshes: conversions, texture cache, presenter.
// Unsafe is required for Raylib mesh/model upload operations in this crate.

use std::collections::HashMap;
use std::path::PathBuf;

use gitter_mesh_cpu::GridMeshCPU;
use raylib::prelude::*;

pub mod conv {
    use gitter_geom::{Aabb, Vec3};

    pub fn vec3_to_rl(v: Vec3) -> raylib::prelude::Vector3 {
        raylib::prelude::Vector3::new(v.x, v.y, v.z)
    }

    pub fn vec3_from_rl(v: raylib::prelude::Vector3) -> Vec3 {
        Vec3 {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }

    pub fn aabb_to_rl(bb: Aabb) -> raylib::core::math::BoundingBox {
        raylib::core::math::BoundingBox::new(vec3_to_rl(bb.min), vec3_to_rl(bb.max))
    }
}

pub struct TextureCache {
    pub map: HashMap<String, raylib::core::texture::Texture2D>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
    pub fn get_ref(&self, key: &str) -> Option<&raylib::core::texture::Texture2D> {
        self.map.get(key)
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Opaque surface descriptor the mesh core never inspects. Candidate texture
/// paths are tried in order; the first that exists on disk is bound as the
/// albedo map.
#[derive(Default, Clone, Debug)]
pub struct SurfaceAppearance {
    pub texture_candidates: Vec<PathBuf>,
}

impl SurfaceAppearance {
    pub fn with_textures(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            texture_candidates: paths.into_iter().collect(),
        }
    }
}

/// One uploaded band of the grid. `v_start`/`v_count` locate its vertex
/// range inside the source CPU buffers.
pub struct GridPart {
    pub model: raylib::core::models::Model,
    pub v_start: usize,
    pub v_count: usize,
}

/// GPU-resident grid mesh. Owns the models; a host replaces the whole value
/// when it regenerates at a new resolution.
pub struct GridRender {
    pub side: i32,
    pub bbox: raylib::core::math::BoundingBox,
    pub parts: Vec<GridPart>,
}

/// Uploads a CPU grid mesh and binds its surface appearance.
///
/// Raylib index buffers are u16, so a grid whose vertex count exceeds that
/// range is split into bands of whole cell rows; each band re-bases the
/// source indices against its first vertex and shares its boundary vertex
/// row with the next band. Returns `None` (after logging) if the grid cannot
/// be uploaded.
pub fn upload_grid_mesh(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    cpu: GridMeshCPU,
    tex_cache: &mut TextureCache,
    appearance: &SurfaceAppearance,
) -> Option<GridRender> {
    let side = cpu.side as usize;
    let mb = &cpu.mesh;
    let cells_per_row = side - 1;

    let max_verts: usize = 65000;
    let band_cell_rows = if side * side <= max_verts {
        cells_per_row
    } else {
        let vert_rows = max_verts / side;
        if vert_rows < 2 {
            log::warn!(
                "grid side {} too wide for u16 index upload; skipping",
                cpu.side
            );
            return None;
        }
        vert_rows - 1
    };

    let mut parts: Vec<GridPart> = Vec::new();
    let mut z0 = 0usize;
    while z0 < cells_per_row {
        let rows = band_cell_rows.min(cells_per_row - z0);
        let v_start = z0 * side;
        let v_count = (rows + 1) * side;
        let tri_count = rows * cells_per_row * 2;
        let idx_start = z0 * cells_per_row * 6;
        let idx_count = tri_count * 3;

        let mut raw: raylib::ffi::Mesh = unsafe { std::mem::zeroed() };
        raw.vertexCount = v_count as i32;
        raw.triangleCount = tri_count as i32;
        unsafe {
            let pos_start = v_start * 3;
            let uv_start = v_start * 2;
            let vbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
            let nbytes = (v_count * 3 * std::mem::size_of::<f32>()) as u32;
            let tbytes = (v_count * 2 * std::mem::size_of::<f32>()) as u32;
            let ibytes = (idx_count * std::mem::size_of::<u16>()) as u32;
            raw.vertices = raylib::ffi::MemAlloc(vbytes) as *mut f32;
            raw.normals = raylib::ffi::MemAlloc(nbytes) as *mut f32;
            raw.texcoords = raylib::ffi::MemAlloc(tbytes) as *mut f32;
            raw.indices = raylib::ffi::MemAlloc(ibytes) as *mut u16;
            std::ptr::copy_nonoverlapping(
                mb.pos[pos_start..pos_start + v_count * 3].as_ptr(),
                raw.vertices,
                v_count * 3,
            );
            std::ptr::copy_nonoverlapping(
                mb.norm[pos_start..pos_start + v_count * 3].as_ptr(),
                raw.normals,
                v_count * 3,
            );
            std::ptr::copy_nonoverlapping(
                mb.uv[uv_start..uv_start + v_count * 2].as_ptr(),
                raw.texcoords,
                v_count * 2,
            );
            for (k, &i) in mb.idx[idx_start..idx_start + idx_count].iter().enumerate() {
                *raw.indices.add(k) = (i as usize - v_start) as u16;
            }
        }
        let mut mesh = unsafe { raylib::core::models::Mesh::from_raw(raw) };
        unsafe {
            mesh.upload(false);
        }
        let mut model = rl
            .load_model_from_mesh(thread, unsafe { mesh.make_weak() })
            .ok()?;
        if let Some(mat) = model.materials_mut().get_mut(0) {
            bind_albedo(rl, thread, mat, tex_cache, appearance);
        }
        parts.push(GridPart {
            model,
            v_start,
            v_count,
        });
        z0 += rows;
    }

    Some(GridRender {
        side: cpu.side,
        bbox: conv::aabb_to_rl(cpu.bbox),
        parts,
    })
}

/// Resolves the first usable texture candidate through the cache and binds
/// it as the material's albedo map with point filtering and repeat wrap.
fn bind_albedo(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    mat: &mut raylib::core::models::WeakMaterial,
    tex_cache: &mut TextureCache,
    appearance: &SurfaceAppearance,
) {
    let candidates: Vec<String> = appearance
        .texture_candidates
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();
    let chosen: Option<String> = candidates
        .iter()
        .find(|p| std::path::Path::new(p.as_str()).exists())
        .cloned()
        .or_else(|| candidates.first().cloned());
    let Some(path) = chosen else {
        return;
    };
    let key = std::fs::canonicalize(&path)
        .ok()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or(path);
    use std::collections::hash_map::Entry;
    match tex_cache.map.entry(key.clone()) {
        Entry::Occupied(e) => {
            let tex = e.into_mut();
            mat.set_material_texture(raylib::consts::MaterialMapIndex::MATERIAL_MAP_ALBEDO, tex);
        }
        Entry::Vacant(v) => match rl.load_texture(thread, &key) {
            Ok(t) => {
                t.set_texture_filter(thread, raylib::consts::TextureFilter::TEXTURE_FILTER_POINT);
                t.set_texture_wrap(thread, raylib::consts::TextureWrap::TEXTURE_WRAP_REPEAT);
                v.insert(t);
                if let Some(tex) = tex_cache.get_ref(&key) {
                    mat.set_material_texture(
                        raylib::consts::MaterialMapIndex::MATERIAL_MAP_ALBEDO,
                        tex,
                    );
                }
            }
            Err(e) => {
                log::warn!("failed to load surface texture {}: {}", key, e);
            }
        },
    }
}
