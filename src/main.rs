//! Local Arcade entry point
//!
//! On the web this wires the simulation to the page: canvas, HUD text, keyboard
//! and the leave buttons. Natively it runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use local_arcade::SessionConfig;
    use local_arcade::consts::*;
    use local_arcade::platform::KeySet;
    use local_arcade::renderer::{present, render_frame};
    use local_arcade::sim::{GameEvent, GameState, tick};
    use local_arcade::ui::{GameSummary, HudState};

    /// LocalStorage key the login page stores the display name under
    const USERNAME_KEY: &str = "game_demo_username";
    const LOBBY_URL: &str = "/lobby.html";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        hud: HudState,
        keys: KeySet,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        /// Set once the player leaves; stops the frame loop
        left: bool,
    }

    impl Game {
        fn new(config: &SessionConfig, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                state: GameState::new(config),
                hud: HudState::new(),
                keys: KeySet::new(),
                ctx,
                accumulator: 0.0,
                last_time: 0.0,
                left: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.to_input();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// React to what happened during this frame's ticks
        fn handle_events(&mut self, document: &Document) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::CountdownTick { remaining } => log::info!("Countdown {}", remaining),
                    GameEvent::Finished { reason } => log::info!("Session finished: {:?}", reason),
                    GameEvent::SummaryReady => {
                        if let Some(summary) = GameSummary::from_state(&self.state) {
                            show_summary(document, &summary);
                        }
                    }
                    other => log::trace!("{:?}", other),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let cmds = render_frame(&self.state, &self.hud);
            present(&cmds, &mut self.ctx);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let view = self.hud.sync(&self.state);

            set_text(document, "hpText", &view.hp.to_string());
            set_text(document, "scoreText", &view.score.to_string());
            set_text(document, "timeText", &view.time);

            if let Some(list) = document.get_element_by_id("scoreList") {
                list.set_text_content(None);
                for entry in &view.roster {
                    let Ok(item) = document.create_element("li") else {
                        continue;
                    };
                    let _ = item.set_attribute("style", "color: #ff4d4f;");
                    item.set_text_content(Some(&entry.label()));
                    let _ = list.append_child(&item);
                }
            }
        }

        /// Leave the session for good
        fn leave(&mut self) {
            self.state.leave();
            self.keys.clear();
            self.left = true;
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_summary(document: &Document, summary: &GameSummary) {
        if let Some(overlay) = document.get_element_by_id("overlay") {
            let _ = overlay.class_list().remove_1("hidden");
        }
        set_text(document, "overTitle", &summary.title);
        set_text(document, "overSummary", &summary.text());
        match serde_json::to_string(summary) {
            Ok(json) => log::info!("Summary: {}", json),
            Err(e) => log::warn!("Could not encode summary: {}", e),
        }
    }

    /// `?win=` from the page URL
    fn read_win_mode(window: &web_sys::Window) -> Option<String> {
        let search = window.location().search().ok()?;
        let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
        params.get("win")
    }

    fn read_player_name(window: &web_sys::Window) -> Option<String> {
        let storage = window.local_storage().ok()??;
        storage.get_item(USERNAME_KEY).ok()?
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Local Arcade starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let win_mode = read_win_mode(&window);
        let player_name = read_player_name(&window);
        let seed = js_sys::Date::now() as u64;
        let config = SessionConfig::from_inputs(win_mode.as_deref(), player_name.as_deref(), seed);

        set_text(&document, "lblUser", &config.player_name);
        set_text(&document, "lblArchitecture", "[Local single player - offline]");

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("gameCanvas not found");
            return;
        };
        canvas.set_width(ARENA_WIDTH as u32);
        canvas.set_height(ARENA_HEIGHT as u32);

        let ctx = match canvas.get_context("2d") {
            Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::error!("2d context has unexpected type");
                    return;
                }
            },
            _ => {
                log::error!("2d canvas context unavailable");
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game::new(&config, ctx)));

        setup_input_handlers(&document, &window, game.clone());
        setup_leave_buttons(&document, game.clone());

        request_animation_frame(game);
        log::info!("Local Arcade running!");
    }

    fn setup_input_handlers(document: &Document, window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().keys.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events are lost, so drop held keys
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.clear();
                log::debug!("Window blur, released held keys");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_leave_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["btnLeave", "btnBackLobby"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().leave();
                log::info!("Leaving to lobby");
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.location().set_href(LOBBY_URL) {
                        log::error!("Navigation to lobby failed: {:?}", e);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        {
            let mut g = game.borrow_mut();
            if g.left {
                return;
            }

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.update_hud(&document);
            g.handle_events(&document);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Local Arcade (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let win_mode = args.next();
    let player_name = args.next();
    let config = local_arcade::SessionConfig::from_inputs(
        win_mode.as_deref(),
        player_name.as_deref().or(Some("Autopilot")),
        42,
    );

    match autopilot::run(&config) {
        Some(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not encode summary: {}", e),
        },
        None => println!("Session did not finish within the autopilot time budget"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use glam::Vec2;

    use local_arcade::SessionConfig;
    use local_arcade::consts::*;
    use local_arcade::sim::{GameState, TickInput, tick};
    use local_arcade::ui::{GameSummary, HudState};

    /// Simulated minutes before giving up
    const BUDGET_MINUTES: u64 = 10;

    /// Chase the lowest asteroid horizontally and keep firing
    fn steer(state: &GameState) -> TickInput {
        let target = state
            .asteroids
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|a| a.pos.x);

        let dx = target.map_or(0.0, |x| x - state.player.pos.x);
        let movement = if dx.abs() > 4.0 {
            Vec2::new(dx.signum(), 0.0)
        } else {
            Vec2::ZERO
        };
        TickInput {
            movement,
            fire: true,
        }
    }

    pub fn run(config: &SessionConfig) -> Option<GameSummary> {
        let mut state = GameState::new(config);
        let mut hud = HudState::new();

        for _ in 0..BUDGET_MINUTES * 60 * TICK_RATE_HZ {
            let input = steer(&state);
            tick(&mut state, &input, SIM_DT);
            let view = hud.sync(&state);
            for event in state.drain_events() {
                log::debug!("{:?} (hp {}, score {}, {})", event, view.hp, view.score, view.time);
            }
            if state.summary_released() {
                return GameSummary::from_state(&state);
            }
        }
        None
    }
}
