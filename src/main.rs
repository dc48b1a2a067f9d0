//! Star Rogue entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this runs a headless autopilot session and logs how it went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(7);
    log::info!("Star Rogue (native) starting with seed {seed}");
    log::info!("Native mode is headless - serve the web build to play");

    autopilot::run(seed, 120.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use star_rogue::sim::{GameEvent, GamePhase, GameState, TickInput, select_offer, tick};

    const DT: f32 = 1.0 / 60.0;

    /// Steer under the nearest enemy and keep the trigger held
    fn steer(state: &GameState) -> TickInput {
        let ship_x = state.player.pos.x + state.player.size.x / 2.0;
        let target = state
            .enemies
            .iter()
            .map(|e| e.center().x)
            .min_by(|a, b| (a - ship_x).abs().total_cmp(&(b - ship_x).abs()));

        let mut input = TickInput {
            fire_pressed: true,
            fire_held: true,
            ..Default::default()
        };
        if let Some(x) = target {
            input.move_left = x < ship_x - 4.0;
            input.move_right = x > ship_x + 4.0;
        }
        // Turret weapons need somewhere to go
        input.click = Some(state.player.pos - glam::Vec2::new(0.0, 120.0));
        input
    }

    pub fn run(seed: u64, seconds: f32) {
        let mut state = GameState::with_seed(seed);
        state.start_session();

        let mut kills = 0u32;
        let mut elapsed = 0.0;
        while elapsed < seconds {
            match state.phase {
                GamePhase::OfferSelect => {
                    select_offer(&mut state, 0);
                }
                GamePhase::GameOver => break,
                _ => {
                    let input = steer(&state);
                    tick(&mut state, &input, DT);
                }
            }

            for event in state.drain_events() {
                match event {
                    GameEvent::EnemyDestroyed { .. } => kills += 1,
                    GameEvent::PlayerHit { lives } => log::info!("Hit! {lives} lives left"),
                    other => log::debug!("{other:?}"),
                }
            }
            elapsed += DT;
        }

        log::info!(
            "Autopilot finished after {:.1}s: level {}, score {}, kills {}, weapon {}, gold {}",
            elapsed,
            state.level,
            state.score,
            kills,
            state.player.weapon.as_str(),
            state.gold()
        );
    }
}
