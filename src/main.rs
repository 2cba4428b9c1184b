//! Penguin Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use penguin_rush::consts::*;
    use penguin_rush::leaderboard::{ChainView, LEADERBOARD_SIZE};
    use penguin_rush::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use penguin_rush::platform::FrameClock;
    use penguin_rush::sim::{GameEvent, GamePhase, GameState, RunOutcome, Snapshot, TickInput, tick};
    use penguin_rush::sync::{ChainSync, ContractCall, SyncBridge};
    use penguin_rush::{HighScores, Settings};

    /// DOM event the wallet layer listens for
    const CHAIN_CALL_EVENT: &str = "penguin-chain-call";
    /// DOM event carrying leaderboard query results back from the wallet layer
    const CHAIN_DATA_EVENT: &str = "penguin-chain-data";

    /// Hands contract calls to the page's wallet layer as CustomEvents
    struct DomEventSync;

    impl ChainSync for DomEventSync {
        fn submit(&mut self, call: ContractCall) {
            let Some(window) = web_sys::window() else { return };
            let Ok(json) = serde_json::to_string(&call) else { return };
            let init = web_sys::CustomEventInit::new();
            init.set_detail(&JsValue::from_str(&json));
            match web_sys::CustomEvent::new_with_event_init_dict(CHAIN_CALL_EVENT, &init) {
                Ok(event) => {
                    let _ = window.dispatch_event(&event);
                    log::info!("Chain call dispatched: {}", call.function_name());
                }
                Err(e) => log::warn!("Failed to create chain call event: {:?}", e),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: TickInput,
        settings: Settings,
        store: Box<dyn KeyValueStore>,
        highscores: HighScores,
        sync: SyncBridge<DomEventSync>,
        chain: Option<ChainView>,
        ctx: CanvasRenderingContext2d,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, ctx: CanvasRenderingContext2d) -> Self {
            let store: Box<dyn KeyValueStore> = match LocalStore::open() {
                Ok(store) => Box::new(store),
                Err(e) => {
                    log::warn!("{e}, settings and scores will not persist");
                    Box::new(MemoryStore::new())
                }
            };
            let settings = Settings::load(store.as_ref());
            let highscores = HighScores::load(store.as_ref());
            Self {
                state: GameState::new(seed, settings.sim_config()),
                clock: FrameClock::new(settings.timestep),
                input: TickInput::default(),
                settings,
                store,
                highscores,
                sync: SyncBridge::new(DomEventSync),
                chain: None,
                ctx,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Start (or restart) a run
        fn start(&mut self) {
            if self.state.phase == GamePhase::Running {
                return;
            }
            self.state.config = self.settings.sim_config();
            self.state.start();
            self.clock.reset();
            self.input.jump = false;
        }

        /// Run simulation steps for this display frame
        fn update(&mut self, time: f64) {
            let steps = self.clock.advance(time);
            for _ in 0..steps {
                tick(&mut self.state, &self.input);
                // Clear one-shot inputs after processing
                self.input.jump = false;
            }

            for event in self.state.drain_events() {
                self.sync.handle(&event, time);
                if let GameEvent::RunEnded {
                    outcome,
                    score,
                    jumps,
                } = event
                {
                    let reached_goal = outcome == RunOutcome::ReachedGoal;
                    if let Some(rank) =
                        self.highscores
                            .add_score(score, jumps, reached_goal, js_sys::Date::now())
                    {
                        log::info!("New local high score #{rank}: {score}");
                        self.highscores.save(self.store.as_mut());
                    }
                }
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Flat-shaded scene from the snapshot
        fn render(&self) {
            let snap: Snapshot = self.state.snapshot();
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);

            ctx.set_fill_style_str("#0a1628");
            ctx.fill_rect(0.0, 0.0, PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);

            for star in &snap.stars {
                let alpha = if self.settings.reduced_motion {
                    0.8
                } else {
                    0.5 + star.twinkle.sin() * 0.5
                };
                ctx.set_fill_style_str(&format!("rgba(255,255,255,{alpha:.2})"));
                ctx.begin_path();
                let _ = ctx.arc(
                    star.pos.x as f64,
                    star.pos.y as f64,
                    star.size as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }

            // Goal mountain
            ctx.set_fill_style_str("#cfd8dc");
            ctx.begin_path();
            ctx.move_to(snap.mountain_x as f64, 320.0);
            ctx.line_to(snap.mountain_x as f64 + 90.0, 150.0);
            ctx.line_to(snap.mountain_x as f64 + 180.0, 320.0);
            ctx.close_path();
            ctx.fill();

            // Water
            ctx.set_fill_style_str("#1565c0");
            ctx.fill_rect(0.0, 350.0, PLAYFIELD_WIDTH as f64, 100.0);
            let wave = if self.settings.reduced_motion { 0.0 } else { snap.wave_offset };
            ctx.set_fill_style_str("rgba(66,165,245,0.4)");
            ctx.begin_path();
            ctx.move_to(0.0, 360.0);
            let mut x = 0.0f32;
            while x <= PLAYFIELD_WIDTH {
                ctx.line_to(x as f64, (355.0 + (x * 0.02 + wave).sin() * 7.0) as f64);
                x += 20.0;
            }
            ctx.line_to(PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);
            ctx.line_to(0.0, PLAYFIELD_HEIGHT as f64);
            ctx.close_path();
            ctx.fill();

            ctx.set_fill_style_str("#e3f2fd");
            for floe in &snap.floes {
                ctx.fill_rect(floe.x as f64, floe.y as f64, floe.width as f64, floe.height as f64);
            }

            let actor = snap.actor;
            ctx.set_fill_style_str("#263238");
            ctx.fill_rect(actor.x as f64, actor.y as f64, actor.width as f64, actor.height as f64);
            ctx.set_fill_style_str("#ffffff");
            ctx.fill_rect(
                actor.x as f64 + 8.0,
                actor.y as f64 + 12.0,
                actor.width as f64 - 16.0,
                actor.height as f64 - 16.0,
            );
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let set_text = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };
            set_text("#hud-score .hud-value", &self.state.score.to_string());
            set_text(
                "#hud-distance .hud-value",
                &format!("{:.0}m", self.state.distance_remaining.max(0.0)),
            );
            set_text("#hud-jumps .hud-value", &self.state.jump_count.to_string());
            if self.settings.show_fps {
                set_text("#hud-fps .hud-value", &self.fps.to_string());
            }

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            let phase = self.state.phase;
            show("start-screen", phase == GamePhase::NotStarted);
            show("game-over", phase == GamePhase::Lost);
            show("win-screen", phase == GamePhase::Won);
            if phase.is_terminal() {
                set_text("#final-score", &self.state.score.to_string());
                set_text("#final-jumps", &self.state.jump_count.to_string());
                if let Some(best) = self.highscores.top_score() {
                    set_text("#best-score", &best.to_string());
                }
            }
        }

        /// Replace the leaderboard with fresh query results
        fn apply_chain_data(&mut self, json: &str) {
            match ChainView::from_json(json) {
                Ok(view) => {
                    log::info!("Leaderboard updated: {} players", view.board.entries.len());
                    self.chain = Some(view);
                    self.render_leaderboard();
                }
                Err(e) => log::warn!("Ignoring malformed chain data: {e}"),
            }
        }

        fn render_leaderboard(&self) {
            let Some(view) = &self.chain else { return };
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(list) = document.get_element_by_id("leaderboard-list") {
                list.set_text_content(None);
                let rows = view.rows(LEADERBOARD_SIZE);
                if rows.is_empty() {
                    if let Ok(li) = document.create_element("li") {
                        li.set_class_name("empty");
                        li.set_text_content(Some("No scores yet"));
                        let _ = list.append_child(&li);
                    }
                }
                for row in rows {
                    let Ok(li) = document.create_element("li") else { continue };
                    if row.is_you {
                        li.set_class_name("you");
                    }
                    li.set_text_content(Some(&format!("#{} {} {}", row.rank, row.label, row.score)));
                    let _ = list.append_child(&li);
                }
            }

            let set_text = |id: &str, text: String| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            };
            if let Some(global) = view.global {
                set_text("global-games", global.total_games.to_string());
                set_text("global-jumps", global.total_jumps.to_string());
                set_text("global-players", global.total_players.to_string());
            }
            if let Some(player) = view.player {
                set_text("player-games", player.total_games.to_string());
                set_text("player-jumps", player.total_jumps.to_string());
                set_text("player-best", player.high_score.to_string());
            }
            set_text(
                "player-rank",
                view.own_rank().map_or_else(|| "-".to_string(), |r| format!("#{r}")),
            );
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Penguin Rush starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, ctx)));
        log::info!(
            "Game initialized with seed {} ({})",
            seed,
            game.borrow().settings.variant.as_str()
        );

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_chain_listener(game.clone());

        request_animation_frame(game);

        log::info!("Penguin Rush running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click / tap jumps
        for event_name in ["mousedown", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                game.borrow_mut().input.jump = true;
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                " " | "ArrowUp" | "w" | "W" => {
                    event.prevent_default();
                    g.input.jump = true;
                }
                "Enter" => g.start(),
                "i" | "I" => {
                    g.input.idle_mode = !g.input.idle_mode;
                    log::info!("Idle mode: {}", g.input.idle_mode);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for id in ["start-btn", "restart-btn", "play-again-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_chain_listener(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::CustomEvent| {
            match event.detail().as_string() {
                Some(json) => game.borrow_mut().apply_chain_data(&json),
                None => log::warn!("{CHAIN_DATA_EVENT} without a JSON string detail"),
            }
        });
        let _ = window
            .add_event_listener_with_callback(CHAIN_DATA_EVENT, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use penguin_rush::persistence::MemoryStore;
    use penguin_rush::sim::{GameEvent, GamePhase, GameState, SimConfig, TickInput, Variant, tick};
    use penguin_rush::sync::{RecordingSync, SyncBridge};
    use penguin_rush::{HighScores, consts::FRAME_DT};

    env_logger::init();
    log::info!("Penguin Rush (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024u64);
    let variant = args
        .next()
        .and_then(|s| Variant::from_str(&s))
        .unwrap_or_default();

    let mut state = GameState::new(seed, SimConfig::for_variant(variant));
    let mut sync = SyncBridge::new(RecordingSync::default());
    let mut store = MemoryStore::new();
    let mut highscores = HighScores::load(&store);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    state.start();
    let frame_ms = FRAME_DT * 1000.0;
    let mut frame = 0u64;
    while state.phase == GamePhase::Running && frame < 100_000 {
        tick(&mut state, &input);
        frame += 1;
        for event in state.drain_events() {
            sync.handle(&event, frame as f64 * frame_ms);
            if let GameEvent::RunEnded { outcome, score, jumps } = event {
                let reached_goal = outcome == penguin_rush::sim::RunOutcome::ReachedGoal;
                if highscores.add_score(score, jumps, reached_goal, 0.0).is_some() {
                    highscores.save(&mut store);
                }
            }
        }
    }

    println!(
        "{} run (seed {}): {:?} after {} frames, score {}, {} jumps, {:.1}m to go",
        variant.as_str(),
        seed,
        state.phase,
        frame,
        state.score,
        state.jump_count,
        state.distance_remaining
    );
    println!(
        "Chain calls: {} submitted, {} throttled",
        sync.submitted, sync.throttled
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
