use std::path::PathBuf;

use clap::Parser;
use raylib::prelude::*;

mod camera;
mod config;

use camera::OrbitCamera;
use config::ViewerConfig;
use gitter_mesh_cpu::build_grid_plane_cpu;
use gitter_render_raylib::{GridRender, SurfaceAppearance, TextureCache, upload_grid_mesh};

#[derive(Parser, Debug)]
#[command(name = "gitter", about = "Flat tessellated grid mesh viewer")]
struct Args {
    /// Vertices per grid edge (>= 2)
    #[arg(long)]
    side: Option<i32>,
    /// Surface texture candidate, repeatable; first existing path wins
    #[arg(long = "texture")]
    textures: Vec<String>,
    /// Optional TOML config file; CLI flags override it
    #[arg(long)]
    config: Option<String>,
    #[arg(long, default_value_t = 1280)]
    width: i32,
    #[arg(long, default_value_t = 720)]
    height: i32,
}

const DEFAULT_SIDE: i32 = 100;
const MAX_SIDE: i32 = 2048;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = match args.config.as_deref() {
        Some(path) => match ViewerConfig::from_path(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => ViewerConfig::default(),
    };
    let mut side = args.side.or(cfg.side).unwrap_or(DEFAULT_SIDE);
    let texture_paths = if args.textures.is_empty() {
        cfg.texture.clone()
    } else {
        args.textures.clone()
    };
    let appearance = SurfaceAppearance::with_textures(texture_paths.iter().map(PathBuf::from));

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("gitter")
        .build();
    rl.set_target_fps(60);

    let mut tex_cache = TextureCache::new();
    let mut render = match build_and_upload(&mut rl, &thread, side, &mut tex_cache, &appearance) {
        Some(r) => r,
        None => std::process::exit(1),
    };
    let mut cam = OrbitCamera::new(grid_center(side), (side as f32) * 1.2);

    while !rl.window_should_close() {
        // [ and ] halve/double the resolution; the whole render set is
        // rebuilt and swapped, never patched in place.
        let mut want_side = side;
        if rl.is_key_pressed(KeyboardKey::KEY_LEFT_BRACKET) {
            want_side = (side / 2).max(2);
        }
        if rl.is_key_pressed(KeyboardKey::KEY_RIGHT_BRACKET) {
            want_side = (side * 2).min(MAX_SIDE);
        }
        if want_side != side {
            if let Some(next) =
                build_and_upload(&mut rl, &thread, want_side, &mut tex_cache, &appearance)
            {
                side = want_side;
                render = next;
                cam.retarget(grid_center(side), (side as f32) * 1.2);
            }
        }
        cam.update(&rl);

        let verts = (side as usize) * (side as usize);
        let tris = ((side - 1) as usize) * ((side - 1) as usize) * 2;
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        {
            let mut d3 = d.begin_mode3D(cam.to_camera3d());
            for part in &render.parts {
                d3.draw_model(&part.model, Vector3::zero(), 1.0, Color::WHITE);
            }
            d3.draw_bounding_box(render.bbox, Color::LIGHTGRAY);
        }
        d.draw_text(
            &format!("side={}  verts={}  tris={}  [ / ] resize", side, verts, tris),
            12,
            12,
            20,
            Color::DARKGRAY,
        );
        d.draw_fps(12, 40);
    }
}

fn grid_center(side: i32) -> Vector3 {
    let half = (side - 1) as f32 * 0.5;
    Vector3::new(half, 0.0, half)
}

/// Builds the CPU grid at `side` and uploads it, logging either failure.
fn build_and_upload(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    side: i32,
    tex_cache: &mut TextureCache,
    appearance: &SurfaceAppearance,
) -> Option<GridRender> {
    let cpu = match build_grid_plane_cpu(side) {
        Ok(cpu) => cpu,
        Err(e) => {
            log::error!("grid build failed: {}", e);
            return None;
        }
    };
    log::info!(
        "built grid side={} verts={} tris={}",
        side,
        cpu.mesh.vertex_count(),
        cpu.mesh.triangle_count()
    );
    let render = upload_grid_mesh(rl, thread, cpu, tex_cache, appearance);
    if render.is_none() {
        log::error!("grid upload failed at side={}", side);
    }
    render
}
