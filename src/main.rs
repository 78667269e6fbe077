//! Lane Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlCanvasElement};

    use lane_rush::audio::{AudioManager, SoundEffect};
    use lane_rush::consts::*;
    use lane_rush::renderer::{scene, RenderState};
    use lane_rush::sim::{
        tick, GameEvent, GameOverReason, GamePhase, GameState, MoveDir, TickInput, ViewSize,
    };
    use lane_rush::{format_time, BestTime, Settings};

    /// How long a flavor toast stays visible (ms)
    const TOAST_DURATION_MS: f64 = 800.0;

    /// Overlay screens
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum OverlayMode {
        Start,
        HowTo,
        Paused,
        Over,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        best: BestTime,
        input: TickInput,
        last_time: f64,
        /// Frame clock (performance.now ms), refreshed every frame
        now_ms: f64,
        /// Toast hides once the frame clock passes this
        toast_until: f64,
        /// Survival time of the last finished run, for the game-over screen
        last_survived: f32,
        /// Phase seen by the previous frame, for overlay/audio transitions
        last_phase: GamePhase,
    }

    impl Game {
        fn new(view: ViewSize, seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_muted(settings.muted);
            audio.set_master_volume(settings.master_volume);
            Self {
                state: GameState::new(view, seed),
                render_state: None,
                audio,
                settings,
                best: BestTime::load(),
                input: TickInput::default(),
                last_time: 0.0,
                now_ms: 0.0,
                toast_until: 0.0,
                last_survived: 0.0,
                last_phase: GamePhase::Start,
            }
        }

        /// Advance the simulation one frame
        fn update(&mut self, dt: f32) {
            let input = self.input;
            tick(&mut self.state, &input, dt);
            // Clear one-shot inputs after processing
            self.input.pause = false;
        }

        /// Start (or restart) a run with a fresh seed
        fn start_run(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.reset(seed);
            self.audio.resume();
            self.hide_overlay();
            self.show_toast("YOU WEREN'T SUPPOSED TO SEE HIM");
            log::info!("Run started with seed: {seed}");
        }

        /// Drain simulation events into audio / persistence / DOM effects
        fn handle_events(&mut self) {
            let events = std::mem::take(&mut self.state.events);
            for event in events {
                match event {
                    GameEvent::Toast(line) => self.show_toast(line),
                    GameEvent::GameOver { reason, survived } => {
                        self.last_survived = survived;
                        self.audio.stop_engine();
                        let improved = self.best.record(survived);
                        if improved {
                            self.best.save();
                        }
                        if reason == GameOverReason::Collision {
                            self.audio.play(SoundEffect::Crash);
                        }
                        self.audio.play(if improved {
                            SoundEffect::NewBestTime
                        } else {
                            SoundEffect::GameOver
                        });
                        log::info!(
                            "Run over ({reason:?}) after {survived:.1}s{}",
                            if improved { " - new best" } else { "" }
                        );
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = scene::build(&self.state, self.settings.reduced_motion);
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let view = render_state.view;
                        render_state.resize(w, h, view);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Keep DOM readouts, the toast, and the overlay in sync
        fn update_hud(&mut self) {
            set_text("time", &format_time(self.state.score_time));
            set_text("best", &format_time(self.best.seconds));

            if self.now_ms > self.toast_until {
                set_class("toast", "toast");
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                match phase {
                    GamePhase::Running => self.hide_overlay(),
                    GamePhase::Paused => {
                        self.audio.stop_engine();
                        self.show_overlay(OverlayMode::Paused);
                    }
                    GamePhase::GameOver => self.show_overlay(OverlayMode::Over),
                    GamePhase::Start | GamePhase::HowTo => {}
                }
                self.last_phase = phase;
            }
        }

        fn show_toast(&mut self, msg: &str) {
            set_text("toast", msg);
            set_class("toast", "toast show");
            self.toast_until = self.now_ms + TOAST_DURATION_MS;
        }

        fn show_overlay(&self, mode: OverlayMode) {
            let (title, body, action, show_small) = match mode {
                OverlayMode::Start => (
                    "LANE RUSH",
                    "Dodge obstacles. Survive as long as you can.<br/>\
                     If the chaser reaches you&hellip; it's over."
                        .to_string(),
                    "Start",
                    true,
                ),
                OverlayMode::HowTo => (
                    "HOW TO PLAY",
                    "<div style=\"text-align:left; line-height:1.5;\">\
                     <strong>Move:</strong> Left/Right (&larr; &rarr;) or A/D<br/>\
                     <strong>Mobile:</strong> hold &#9664; &#9654; or tap either side of the road<br/>\
                     <strong>Goal:</strong> survive. Speed ramps forever.<br/>\
                     <strong>The chaser:</strong> closes in over time. At 100%, the run is over.\
                     </div>"
                        .to_string(),
                    "Back",
                    false,
                ),
                OverlayMode::Paused => (
                    "PAUSED",
                    "Breathe. He's still behind you.".to_string(),
                    "Resume",
                    false,
                ),
                OverlayMode::Over => (
                    "CAUGHT",
                    format!(
                        "You survived <strong>{}</strong>s.<br/>Best: <strong>{}</strong>s.",
                        format_time(self.last_survived),
                        format_time(self.best.seconds)
                    ),
                    "Restart",
                    true,
                ),
            };

            set_text("overlay-title", title);
            if let Some(el) = element("overlay-text") {
                el.set_inner_html(&body);
            }
            set_text("start-btn", action);
            set_class(
                "overlay-small",
                if show_small { "" } else { "hidden" },
            );
            set_class("overlay", "overlay");
        }

        fn hide_overlay(&self) {
            set_class("overlay", "overlay hidden");
        }

        fn update_mute_label(&self) {
            set_text(
                "mute-btn",
                if self.settings.muted {
                    "Sound: Off"
                } else {
                    "Sound: On"
                },
            );
        }
    }

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn element(id: &str) -> Option<Element> {
        document().get_element_by_id(id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str) {
        if let Some(el) = element(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    /// Canvas backing-store size (physical px) and viewport (CSS px).
    /// DPR is clamped to [1, 2].
    fn canvas_view(canvas: &HtmlCanvasElement) -> (u32, u32, ViewSize) {
        let window = web_sys::window().unwrap();
        let dpr = window.device_pixel_ratio().clamp(1.0, 2.0);
        let css_w = canvas.client_width().max(1) as f64;
        let css_h = canvas.client_height().max(1) as f64;
        (
            (css_w * dpr).floor() as u32,
            (css_h * dpr).floor() as u32,
            ViewSize {
                w: css_w as f32,
                h: css_h as f32,
            },
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height, view) = canvas_view(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(view, seed)));

        log::info!("Game initialized with seed: {seed}");

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, view).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input + UI wiring
        setup_keyboard(game.clone());
        setup_hold_button(game.clone(), "left-btn", MoveDir::Left);
        setup_hold_button(game.clone(), "right-btn", MoveDir::Right);
        setup_pointer_regions(&canvas, game.clone());
        setup_overlay_buttons(game.clone());
        setup_auto_pause(game.clone());
        setup_resize(&canvas, game.clone());

        {
            let g = game.borrow();
            g.update_mute_label();
            g.show_overlay(OverlayMode::Start);
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Lane Rush running!");
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.now_ms = time;

            // Bounded delta; the sim clamps again on its side
            let dt = if g.last_time > 0.0 {
                (((time - g.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            if g.state.phase == GamePhase::Running {
                let intensity = g.state.engine_intensity;
                g.audio.set_engine_intensity(intensity);
            }
            g.handle_events();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    /// The overlay's primary button: what it does depends on where we are
    fn primary_action(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        match g.state.phase {
            GamePhase::Start | GamePhase::GameOver => g.start_run(),
            GamePhase::HowTo => {
                g.state.phase = GamePhase::Start;
                g.show_overlay(OverlayMode::Start);
            }
            GamePhase::Paused => g.input.pause = true,
            GamePhase::Running => {}
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                match key.as_str() {
                    "arrowleft" | "a" => game.borrow_mut().input.move_dir = MoveDir::Left,
                    "arrowright" | "d" => game.borrow_mut().input.move_dir = MoveDir::Right,
                    "p" => {
                        let mut g = game.borrow_mut();
                        if matches!(g.state.phase, GamePhase::Running | GamePhase::Paused) {
                            g.input.pause = true;
                        }
                    }
                    "r" => {
                        let mut g = game.borrow_mut();
                        if matches!(g.state.phase, GamePhase::Start | GamePhase::GameOver) {
                            g.start_run();
                        }
                    }
                    " " | "enter" => {
                        if game.borrow().state.phase != GamePhase::Running {
                            primary_action(&game);
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                let mut g = game.borrow_mut();
                let released = match key.as_str() {
                    "arrowleft" | "a" => MoveDir::Left,
                    "arrowright" | "d" => MoveDir::Right,
                    _ => return,
                };
                if g.input.move_dir == released {
                    g.input.move_dir = MoveDir::None;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// A touch/mouse button that applies its direction while held
    fn setup_hold_button(game: Rc<RefCell<Game>>, id: &str, dir: MoveDir) {
        let Some(btn) = element(id) else {
            log::warn!("Missing hold button #{id}");
            return;
        };

        for event_name in ["touchstart", "mousedown"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.move_dir = dir;
                g.audio.resume();
            });
            let _ =
                btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["touchend", "touchcancel", "mouseup", "mouseleave"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.input.move_dir == dir {
                    g.input.move_dir = MoveDir::None;
                }
            });
            let _ =
                btn.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Tapping either half of the canvas steers toward that side
    fn setup_pointer_regions(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f64 - rect.left();
                let mut g = game.borrow_mut();
                g.input.move_dir = if x < rect.width() / 2.0 {
                    MoveDir::Left
                } else {
                    MoveDir::Right
                };
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for event_name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                game.borrow_mut().input.move_dir = MoveDir::None;
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_overlay_buttons(game: Rc<RefCell<Game>>) {
        if let Some(btn) = element("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                primary_action(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = element("how-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Start {
                    g.state.phase = GamePhase::HowTo;
                    g.show_overlay(OverlayMode::HowTo);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = element("pause-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if matches!(g.state.phase, GamePhase::Running | GamePhase::Paused) {
                    g.input.pause = true;
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = element("mute-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.muted = !g.settings.muted;
                g.settings.save();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
                if !muted {
                    g.audio.resume();
                }
                g.update_mute_label();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause when the tab hides or the window loses focus
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Running {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Running {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height, view) = canvas_view(&canvas_clone);
            canvas_clone.set_width(width);
            canvas_clone.set_height(height);
            let mut g = game.borrow_mut();
            g.state.set_view(view);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height, view);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Rush (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Run a quick sanity pass over the simulation
    println!("\nRunning simulation smoke check...");
    smoke_check_collision();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check_collision() {
    use glam::Vec2;
    use lane_rush::sim::{tick, GamePhase, GameState, Obstacle, ObstacleKind, TickInput, ViewSize};

    let mut state = GameState::new(ViewSize { w: 420.0, h: 720.0 }, 1);
    state.reset(1);

    let size = Vec2::splat(40.0);
    state.obstacles.push(Obstacle {
        lane: state.player.lane,
        pos: state.player.pos - size / 2.0,
        size,
        kind: ObstacleKind::Barrier,
    });
    tick(&mut state, &TickInput::default(), 0.016);

    assert_eq!(state.phase, GamePhase::GameOver, "collision must end the run");
    println!("✓ Collision smoke check passed!");
}
