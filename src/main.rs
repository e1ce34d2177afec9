//! Paper Plane entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use paper_plane::Settings;
    use paper_plane::audio::AudioManager;
    use paper_plane::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use paper_plane::persistence::LocalStorageStore;
    use paper_plane::platform::{
        InputAction, ResizeDebouncer, layout_for_viewport, map_key, map_pointer, map_touch_start,
    };
    use paper_plane::sim::scene::{palette, star_points};
    use paper_plane::sim::{Drawable, Game, GameEvent, GamePhase, ParticleKind, Scene};

    /// Browser host: simulation plus its DOM and audio collaborators
    struct App {
        game: Game,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        document: Document,
        audio: AudioManager,
        settings: Settings,
        resize: ResizeDebouncer,
        /// Set by `NewBest`, shown on the next game-over screen
        new_best: bool,
    }

    impl App {
        fn input(&mut self, action: InputAction) {
            if action == InputAction::ToggleMute {
                let on = self.audio.toggle_muted();
                self.settings.audio = *self.audio.mix();
                self.settings.save();
                log::info!("Sound {}", if on { "on" } else { "off" });
                return;
            }
            self.game.handle_input(action);
            self.dispatch_events();
        }

        fn frame(&mut self) {
            if let Some((w, h)) = self.resize.poll(js_sys::Date::now()) {
                self.apply_viewport(w, h);
            }

            self.game.update();
            self.dispatch_events();

            let scene = self.game.scene();
            draw_scene(&self.ctx, &scene);

            if self.settings.show_debug && self.game.phase() == GamePhase::Playing {
                self.draw_debug();
            }
        }

        /// Forward queued simulation events to audio and the DOM
        fn dispatch_events(&mut self) {
            for event in self.game.drain_events() {
                match event {
                    GameEvent::Sound(sound) => self.audio.play(sound),
                    GameEvent::ScoreChanged(score) => {
                        set_text(&self.document, "score", &score.to_string());
                    }
                    GameEvent::NewBest { .. } => self.new_best = true,
                    GameEvent::PhaseChanged(phase) => self.show_phase(phase),
                }
            }
        }

        fn show_phase(&mut self, phase: GamePhase) {
            let doc = &self.document;
            match phase {
                GamePhase::Playing => {
                    self.new_best = false;
                    set_display(doc, "gameOverlay", "none");
                    if let Some(body) = doc.body() {
                        let _ = body.class_list().add_1("playing");
                    }
                }
                GamePhase::GameOver => {
                    set_text(doc, "finalScore", &self.game.score().to_string());
                    set_text(doc, "playedDifficulty", self.game.profile().name());
                    set_display(
                        doc,
                        "bestScoreDisplay",
                        if self.new_best { "block" } else { "none" },
                    );
                    set_display(doc, "startScreen", "none");
                    set_display(doc, "gameOverScreen", "block");
                    set_display(doc, "gameOverlay", "flex");
                    if let Some(body) = doc.body() {
                        let _ = body.class_list().remove_1("playing");
                    }
                }
                GamePhase::Ready => {
                    set_display(doc, "gameOverScreen", "none");
                    set_display(doc, "startScreen", "block");
                    set_text(doc, "bestScore", &self.game.best_score().to_string());
                }
            }
        }

        /// Scale the canvas to the viewport and reclassify the screen
        fn apply_viewport(&mut self, width: f32, height: f32) {
            let layout = layout_for_viewport(width, height);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", layout.display_width));
            let _ = style.set_property("height", &format!("{}px", layout.display_height));
            self.game.set_screen_type(layout.screen);
            log::debug!("Viewport {}x{} -> {:?}", width, height, layout.screen);
        }

        fn select_difficulty(&mut self, name: &str) {
            if self.game.set_difficulty(name) {
                self.settings.difficulty = self.game.selected_difficulty();
                self.settings.save();
                set_text(&self.document, "bestScore", &self.game.best_score().to_string());
            }
        }

        fn draw_debug(&self) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("rgba(0, 0, 0, 0.7)");
            ctx.fill_rect(10.0, 10.0, 220.0, 105.0);
            ctx.set_fill_style_str("#FFFFFF");
            ctx.set_font("12px Arial");
            ctx.set_text_align("left");
            ctx.set_text_baseline("alphabetic");
            for (i, line) in self.game.debug_info().lines().iter().enumerate() {
                let _ = ctx.fill_text(line, 15.0, 25.0 + i as f64 * 15.0);
            }
        }
    }

    fn set_text(doc: &Document, id: &str, text: &str) {
        if let Some(el) = doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(doc: &Document, id: &str, display: &str) {
        if let Some(el) = doc
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", display);
        }
    }

    // === Canvas drawing ===

    fn draw_scene(ctx: &CanvasRenderingContext2d, scene: &Scene) {
        for drawable in scene {
            match drawable {
                Drawable::Sky => {
                    ctx.set_fill_style_str(palette::SKY);
                    ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);
                }
                Drawable::Cloud { circles, alpha } => {
                    ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha));
                    ctx.begin_path();
                    for c in circles {
                        ctx.move_to((c.center.x + c.radius) as f64, c.center.y as f64);
                        let _ = ctx.arc(c.center.x as f64, c.center.y as f64, c.radius as f64, 0.0, TAU);
                    }
                    ctx.fill();
                }
                Drawable::Pipe {
                    body, cap, stripes, ..
                } => {
                    ctx.set_fill_style_str(palette::PIPE_FILL);
                    ctx.set_stroke_style_str(palette::PIPE_STROKE);
                    ctx.set_line_width(3.0);
                    for r in [body, cap] {
                        ctx.fill_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
                        ctx.stroke_rect(r.x as f64, r.y as f64, r.width as f64, r.height as f64);
                    }

                    ctx.set_stroke_style_str(palette::PIPE_STRIPE);
                    ctx.set_line_width(1.0);
                    ctx.begin_path();
                    for x in stripes {
                        ctx.move_to(*x as f64, body.y as f64);
                        ctx.line_to(*x as f64, body.bottom() as f64);
                    }
                    ctx.stroke();
                }
                Drawable::Shield {
                    center,
                    radius,
                    glyph,
                } => {
                    ctx.set_fill_style_str(palette::SHIELD_FILL);
                    ctx.set_stroke_style_str(palette::SHIELD_STROKE);
                    ctx.set_line_width(3.0);
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.fill();
                    ctx.stroke();

                    ctx.set_fill_style_str(palette::SHIELD_STROKE);
                    ctx.set_font("bold 20px Arial");
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    let _ = ctx.fill_text(glyph, center.x as f64, center.y as f64 + 1.0);
                }
                Drawable::Star { points, .. } => {
                    ctx.set_fill_style_str(palette::STAR_FILL);
                    ctx.set_stroke_style_str(palette::STAR_STROKE);
                    ctx.set_line_width(2.0);
                    polygon(ctx, points);
                    ctx.fill();
                    ctx.stroke();
                }
                Drawable::Plane {
                    center,
                    rotation,
                    outline,
                    keel,
                    shielded,
                } => {
                    ctx.save();
                    let _ = ctx.translate(center.x as f64, center.y as f64);
                    let _ = ctx.rotate(*rotation as f64);

                    ctx.set_fill_style_str(palette::PLANE_FILL);
                    ctx.set_stroke_style_str(palette::PLANE_STROKE);
                    ctx.set_line_width(2.0);
                    polygon(ctx, outline);
                    ctx.fill();
                    ctx.stroke();

                    ctx.begin_path();
                    ctx.move_to(keel[0].x as f64, keel[0].y as f64);
                    ctx.line_to(keel[1].x as f64, keel[1].y as f64);
                    ctx.stroke();

                    if *shielded {
                        ctx.set_stroke_style_str(palette::SHIELD_FILL);
                        ctx.set_line_width(3.0);
                        ctx.begin_path();
                        let _ = ctx.arc(0.0, 0.0, 32.0, 0.0, TAU);
                        ctx.stroke();
                    }
                    ctx.restore();
                }
                Drawable::Particle {
                    pos,
                    rotation,
                    size,
                    color,
                    alpha,
                    kind,
                } => {
                    ctx.save();
                    ctx.set_global_alpha(*alpha as f64);
                    let _ = ctx.translate(pos.x as f64, pos.y as f64);
                    let _ = ctx.rotate(*rotation as f64);
                    ctx.set_fill_style_str(color);
                    match kind {
                        ParticleKind::Score => {
                            ctx.set_stroke_style_str(palette::STAR_STROKE);
                            ctx.set_line_width(1.0);
                            polygon(ctx, &star_points(glam::Vec2::ZERO, *size, size * 0.5));
                            ctx.fill();
                            ctx.stroke();
                        }
                        ParticleKind::Collision => {
                            ctx.set_stroke_style_str("#FF4444");
                            ctx.set_line_width(2.0);
                            ctx.begin_path();
                            for i in 0..8 {
                                let a = i as f64 * TAU / 8.0;
                                let r = *size as f64 * if i % 2 == 0 { 1.2 } else { 0.8 };
                                ctx.line_to(a.cos() * r, a.sin() * r);
                            }
                            ctx.close_path();
                            ctx.fill();
                            ctx.stroke();
                        }
                        ParticleKind::Jump | ParticleKind::Trail | ParticleKind::Default => {
                            ctx.begin_path();
                            let _ = ctx.arc(0.0, 0.0, *size as f64, 0.0, TAU);
                            ctx.fill();
                        }
                    }
                    ctx.restore();
                }
            }
        }
    }

    fn polygon(ctx: &CanvasRenderingContext2d, points: &[glam::Vec2]) {
        ctx.begin_path();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                ctx.move_to(p.x as f64, p.y as f64);
            } else {
                ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        ctx.close_path();
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Paper Plane starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let audio = AudioManager::new(settings.audio);
        if !audio.is_available() {
            log::warn!("No AudioContext available - running silent");
        }

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed, Box::new(LocalStorageStore));
        game.apply_settings(&settings);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game,
            ctx,
            canvas: canvas.clone(),
            document: document.clone(),
            audio,
            settings,
            resize: ResizeDebouncer::new(),
            new_best: false,
        }));

        {
            let mut a = app.borrow_mut();
            let (w, h) = viewport_size(&window);
            a.apply_viewport(w, h);
            a.show_phase(GamePhase::Ready);
            let selected = a.settings.difficulty.as_str();
            mark_active_difficulty(&document, selected);
        }

        setup_input_handlers(&canvas, app.clone());
        setup_buttons(&document, app.clone());
        setup_difficulty_selector(&document, app.clone());
        setup_resize(&window, app.clone());

        request_animation_frame(app);

        log::info!("Paper Plane running!");
        Ok(())
    }

    fn viewport_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(CANVAS_WIDTH as f64);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(CANVAS_HEIGHT as f64);
        (w as f32, h as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                if let Some(action) = map_pointer(event.button()) {
                    app.borrow_mut().input(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(action) = map_touch_start() {
                    app.borrow_mut().input(action);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard (space)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = map_key(&event.code(), event.repeat()) {
                    event.prevent_default();
                    app.borrow_mut().input(action);
                } else if event.code() == "Space" {
                    event.prevent_default();
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.game.phase() != GamePhase::Playing {
                    a.game.start_game();
                    a.dispatch_events();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                if a.game.phase() == GamePhase::GameOver {
                    a.game.restart();
                    a.dispatch_events();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn difficulty_buttons(document: &Document) -> Vec<Element> {
        let Ok(list) = document.query_selector_all(".difficulty-btn") else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn mark_active_difficulty(document: &Document, name: &str) {
        for btn in difficulty_buttons(document) {
            let active = btn.get_attribute("data-difficulty").as_deref() == Some(name);
            let _ = btn.class_list().toggle_with_force("active", active);
        }
    }

    fn setup_difficulty_selector(document: &Document, app: Rc<RefCell<App>>) {
        for btn in difficulty_buttons(document) {
            let app = app.clone();
            let document = document.clone();
            let name = btn.get_attribute("data-difficulty").unwrap_or_default();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                mark_active_difficulty(&document, &name);
                app.borrow_mut().select_difficulty(&name);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = viewport_size(&win);
            app.borrow_mut().resize.request(w, h, js_sys::Date::now());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        app.borrow_mut().frame();
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Paper Plane (native) starting...");
    log::info!("The playable build targets wasm32 - running a headless autopilot round");

    let mut args = std::env::args().skip(1);
    let difficulty = args.next().unwrap_or_else(|| "normal".to_string());
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let path = std::env::var("PAPER_PLANE_SCORES")
        .unwrap_or_else(|_| "paper_plane_scores.json".to_string());
    let store = paper_plane::persistence::FileStore::open(&path);

    let mut game = paper_plane::sim::Game::new(seed, Box::new(store));
    if !game.set_difficulty(&difficulty) {
        log::warn!("Falling back to {}", game.selected_difficulty().label());
    }

    let frames = autopilot_round(&mut game, 60 * 120);
    log::info!(
        "Round finished after {} frames: score {} (best {} on {})",
        frames,
        game.score(),
        game.best_score(),
        game.profile().name()
    );
}

/// Fly one round with a simple gap-following pilot; returns frames played
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_round(game: &mut paper_plane::sim::Game, max_frames: u32) -> u32 {
    use paper_plane::platform::InputAction;
    use paper_plane::sim::{Body, GameEvent, GamePhase};

    game.handle_input(InputAction::Primary);
    let (_, canvas_height) = game.canvas_size();

    let mut frames = 0;
    while game.phase() == GamePhase::Playing && frames < max_frames {
        let plane = game.plane();
        let center = plane.bounding_box().center();
        let target = game
            .obstacles()
            .obstacles()
            .iter()
            .find(|o| o.x + o.width >= plane.x)
            .map(|o| o.gap_center().y)
            .unwrap_or(canvas_height / 2.0);

        if center.y > target + 15.0 && plane.velocity >= 0.0 {
            game.handle_input(InputAction::Primary);
        }
        game.update();
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::ScoreChanged(score) if score > 0 => log::debug!("Score: {}", score),
                GameEvent::NewBest { difficulty, score } => {
                    log::info!("New best on {}: {}", difficulty.label(), score);
                }
                _ => {}
            }
        }
    }

    if game.phase() == GamePhase::Playing {
        game.game_over();
    }
    frames
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
