//! Tile Crawl entry point
//!
//! Runs a scripted session headlessly: the simulation is stepped with a fixed
//! timestep and each second of play logs what a renderer would draw.
//!
//! Usage: `tile-crawl [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use tile_crawl::Settings;
    use tile_crawl::consts::SIM_DT;
    use tile_crawl::renderer::{FrameView, QuadKind, as_bytes, triangulate};
    use tile_crawl::sim::grid::SOLID_TILE;
    use tile_crawl::sim::tick::FrameClock;
    use tile_crawl::sim::{GameState, tick};

    env_logger::init();
    log::info!("Tile Crawl (native) starting...");

    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let mut state = GameState::new(&settings);
    log::info!("Game initialized with seed: {}", settings.seed);

    let mut clock = FrameClock::default();
    for frame in 0..DEMO_FRAMES {
        // Alternate 60 Hz and 30 Hz frames to exercise the substep clock
        let frame_dt = if frame % 2 == 0 { SIM_DT } else { SIM_DT * 2.0 };
        for _ in 0..clock.advance(frame_dt) {
            let input = scripted_input(state.time_ticks);
            tick(&mut state, &input, SIM_DT);
        }

        if frame % 60 == 0 {
            let view = FrameView::build(&state);
            log::info!(
                "t={} player=({:.1},{:.1}) camera=({:.1},{:.1}) zoom={:.1} walls={} enemies={}",
                state.time_ticks,
                state.player.pos().x,
                state.player.pos().y,
                state.camera.x(),
                state.camera.y(),
                state.camera.zoom(),
                view.count(QuadKind::Tile(SOLID_TILE)),
                state.enemies.len(),
            );
            let vertices = triangulate(&view.quads);
            log::debug!(
                "frame: {} quads, {} vertices, {} bytes",
                view.quads.len(),
                vertices.len(),
                as_bytes(&vertices).len()
            );
            for line in &view.overlay {
                log::info!("  {}", line);
            }
        }

        if !state.player.alive {
            log::info!("Player died after {} ticks", state.time_ticks);
            break;
        }
    }

    println!(
        "Level {} | ticks {} | health {:.0} | sanity {} | enemies {} | corpses {}",
        state.level,
        state.time_ticks,
        state.player.health,
        state.player.sanity,
        state.enemies.len(),
        state.corpses.len(),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No web frontend; the library is embedded by the host page
}

/// Frames to run in the scripted session
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 900;

/// Wander the level: sweep right and down, swing at anything close, and poke
/// the debug keys once so the overlay shows up in the log
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(t: u64) -> tile_crawl::sim::TickInput {
    use glam::Vec2;

    let phase = (t / 120) % 4;
    let move_dir = match phase {
        0 => Vec2::X,
        1 => Vec2::Y,
        2 => Vec2::new(1.0, -1.0),
        _ => Vec2::new(-1.0, 1.0),
    };
    tile_crawl::sim::TickInput {
        move_dir,
        attack: t % 20 == 0,
        toggle_overlay: t == 1,
        toggle_immortal: t == 1,
        zoom_in: t == 300,
        zoom_out: t == 600,
        reset_zoom: t == 800,
    }
}
