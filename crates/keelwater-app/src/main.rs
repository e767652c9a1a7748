//! Keelwater demo: renders the underwater overlay for a rocking hull in a
//! synthetic ocean and logs per-frame statistics.
//!
//! Run with: `cargo run -p keelwater-app -- --frames 8`

mod scene;

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use glam::DVec3;
use keelwater_config::{CliArgs, Config, OverlayConfig};
use keelwater_overlay::{OverlayMesh, UnderwaterOverlay};
use tracing::{info, warn};

use scene::{ANCHOR, GHOST_SHIP, HULL_SHIP, OceanWorld};

/// Frame at which the hull is breached and its classification changes.
const BREACH_FRAME: u32 = 4;

/// The config file is checked for edits every this many frames.
const RELOAD_INTERVAL: u32 = 2;

fn main() {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keelwater")
    });

    let (on_disk, load_error) = match Config::load_or_create(&config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let mut config = on_disk.clone();
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    keelwater_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Some(e) = load_error {
        warn!("Failed to load config: {e}, using defaults");
    }
    info!(
        "Overlay: enabled={} max_ships={} alpha={:.2}",
        config.overlay.enabled, config.overlay.max_ships, config.overlay.overlay_alpha
    );

    let mut watcher = ConfigWatcher {
        dir: config_dir,
        on_disk,
        args,
    };
    run_frames(&config, &mut watcher);
}

/// Tracks the config file as last read from disk so edits can be applied
/// mid-run with the command-line overrides reapplied on top.
struct ConfigWatcher {
    dir: PathBuf,
    on_disk: Config,
    args: CliArgs,
}

impl ConfigWatcher {
    /// Returns the new overlay settings if the file changed since the last poll.
    fn poll(&mut self) -> Option<OverlayConfig> {
        match self.on_disk.reload(&self.dir) {
            Ok(Some(reloaded)) => {
                let mut effective = reloaded.clone();
                effective.apply_cli_overrides(&self.args);
                self.on_disk = reloaded;
                Some(effective.overlay)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Config reload failed: {e}");
                None
            }
        }
    }
}

fn run_frames(config: &Config, watcher: &mut ConfigWatcher) {
    let frames = watcher.args.frames;
    let world = OceanWorld::new();
    let mut snapshots = HashMap::new();
    match scene::hull_snapshot(1, false) {
        Ok(snapshot) => {
            snapshots.insert(HULL_SHIP, snapshot);
        }
        Err(e) => {
            warn!("Failed to build hull snapshot: {e}");
            return;
        }
    }

    let mut overlay = UnderwaterOverlay::new(config.overlay.clone());
    let mut mesh = OverlayMesh::new();
    let camera = ANCHOR + DVec3::new(-18.0, 9.0, -22.0);

    for frame in 0..frames {
        if frame > 0
            && frame % RELOAD_INTERVAL == 0
            && let Some(overlay_config) = watcher.poll()
        {
            info!(
                dir = %watcher.dir.display(),
                enabled = overlay_config.enabled,
                max_ships = overlay_config.max_ships,
                "Applying reloaded overlay settings"
            );
            overlay.set_config(overlay_config);
        }

        if frame == BREACH_FRAME {
            match scene::hull_snapshot(2, true) {
                Ok(snapshot) => {
                    info!("Hull breached at the bow, geometry revision 2");
                    snapshots.insert(HULL_SHIP, snapshot);
                }
                Err(e) => warn!("Failed to rebuild hull snapshot: {e}"),
            }
        }

        let transform = scene::hull_transform(frame);
        // The second ship has no classification yet and is skipped.
        let ships = vec![
            scene::ship_info(HULL_SHIP, transform),
            scene::ship_info(GHOST_SHIP, scene::hull_transform(frame + 3)),
        ];

        mesh.clear();
        let stats = overlay.render_overlay(&world, &ships, &snapshots, camera, &mut mesh);
        info!(
            frame,
            ships = stats.ships_rendered,
            missing = stats.ships_missing_snapshot,
            voxels = stats.qualifying_voxels,
            no_surface = stats.voxels_without_surface,
            whole = stats.faces_whole,
            clipped = stats.faces_clipped,
            culled = stats.faces_culled,
            vertices = stats.vertices_emitted,
            triangles = mesh.triangle_count(),
            "Frame rendered"
        );
    }

    let cache = overlay.surfaces().stats();
    info!(
        rebuilds = overlay.classifications().rebuild_count(),
        surface_hits = cache.hits,
        surface_misses = cache.misses,
        surface_entries = cache.len,
        "Done"
    );
}
