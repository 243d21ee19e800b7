//! Beetle Waves entry point
//!
//! The browser build drives the simulation from `requestAnimationFrame` and
//! draws onto a 2D canvas. The native build runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use beetle_waves::sim::{GameEvent, GameState, Key, Rect, TickInput, tick};
    use beetle_waves::{Settings, Sprite, Surface};

    const CANVAS_WIDTH: u32 = 600;
    const CANVAS_HEIGHT: u32 = 800;

    /// Canvas 2D context with the enemy sprite sheet
    struct CanvasSurface<'a> {
        ctx: &'a CanvasRenderingContext2d,
        sheet: Option<&'a HtmlImageElement>,
    }

    impl Surface for CanvasSurface<'_> {
        fn fill_rect(&mut self, rect: Rect) {
            self.ctx.fill_rect(
                rect.x as f64,
                rect.y as f64,
                rect.width as f64,
                rect.height as f64,
            );
        }

        fn draw_sprite(&mut self, sprite: Sprite, dest: Rect) {
            let (w, h) = (dest.width as f64, dest.height as f64);
            match self.sheet {
                Some(sheet) => {
                    let _ = self
                        .ctx
                        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                            sheet,
                            sprite.frame_x as f64 * w,
                            sprite.frame_y as f64 * h,
                            w,
                            h,
                            dest.x as f64,
                            dest.y as f64,
                            w,
                            h,
                        );
                }
                // No sheet loaded: outline the enemy instead
                None => self.ctx.stroke_rect(dest.x as f64, dest.y as f64, w, h),
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        ctx: CanvasRenderingContext2d,
        sheet: Option<HtmlImageElement>,
    }

    impl Game {
        fn update(&mut self) {
            tick(&mut self.state, &self.input);
            for event in self.state.drain_events() {
                match event {
                    GameEvent::WaveCleared { next_wave } => log::info!("Wave {}", next_wave),
                    GameEvent::GameOver { reason } => log::info!("Game over: {:?}", reason),
                    _ => {}
                }
            }
        }

        fn render(&self) {
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

            let mut surface = CanvasSurface {
                ctx,
                sheet: self.sheet.as_ref(),
            };
            self.state.render(&mut surface);
            self.draw_status_text();
        }

        fn draw_status_text(&self) {
            let ctx = &self.ctx;
            let hud = self.state.hud();

            ctx.save();
            let _ = ctx.fill_text(&format!("Score: {}", hud.score), 10.0, 40.0);
            let _ = ctx.fill_text(&format!("Wave: {}", hud.wave), 10.0, 80.0);
            for i in 0..hud.lives {
                ctx.fill_rect(20.0 + 10.0 * i as f64, 100.0, 5.0, 20.0);
            }

            if hud.game_over {
                let (cx, cy) = (CANVAS_WIDTH as f64 * 0.5, CANVAS_HEIGHT as f64 * 0.5);
                ctx.set_text_align("center");
                ctx.set_font("100px Impact");
                let _ = ctx.fill_text("Game Over!", cx, cy);
                ctx.set_font("20px Impact");
                let _ = ctx.fill_text("Press R to restart", cx, cy + 50.0);
            }
            ctx.restore();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Beetle Waves starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas1")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        ctx.set_fill_style_str("white");
        ctx.set_stroke_style_str("white");
        ctx.set_line_width(5.0);
        ctx.set_font("30px Impact");

        let sheet = document
            .get_element_by_id("beetlemorph")
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
        if sheet.is_none() {
            log::warn!("Sprite sheet not found, drawing outlines");
        }

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::with_canvas(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
        let state = match GameState::new(settings, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Invalid settings: {}", e);
                return;
            }
        };

        let game = Rc::new(RefCell::new(Game {
            state,
            input: TickInput::default(),
            ctx,
            sheet,
        }));

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Beetle Waves running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.key()) {
                    game.borrow_mut().input.press(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.key()) {
                    game.borrow_mut().input.release(key);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
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

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beetle Waves (native) starting...");
    log::info!("Native mode runs a headless autopilot session - build for wasm32 to play");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| beetle_waves::Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => beetle_waves::Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    match headless::run(settings, seed, 20_000) {
        Ok(hud) => println!(
            "Session over: score {}, wave {}, lives {}{}",
            hud.score,
            hud.wave,
            hud.lives,
            if hud.game_over { " (game over)" } else { "" }
        ),
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use beetle_waves::ConfigError;
    use beetle_waves::render::Hud;
    use beetle_waves::sim::{Bounds, GameEvent, GameState, Key, TickInput, tick};
    use beetle_waves::Settings;

    /// Play a session with a simple autopilot: chase the lowest living enemy,
    /// tap fire every other frame.
    pub fn run(settings: Settings, seed: u64, max_ticks: u64) -> Result<Hud, ConfigError> {
        let mut state = GameState::new(settings, seed)?;

        for frame in 0..max_ticks {
            let input = autopilot(&state, frame);
            tick(&mut state, &input);

            for event in state.drain_events() {
                match event {
                    GameEvent::WaveCleared { next_wave } => {
                        log::info!("Frame {}: wave {} incoming", frame, next_wave)
                    }
                    GameEvent::PlayerHit { lives_left } => {
                        log::info!("Frame {}: ship hit, {} lives left", frame, lives_left)
                    }
                    GameEvent::GameOver { reason } => {
                        log::info!("Frame {}: game over ({:?})", frame, reason)
                    }
                    _ => {}
                }
            }

            if state.is_game_over() {
                break;
            }
        }

        Ok(state.hud())
    }

    fn autopilot(state: &GameState, frame: u64) -> TickInput {
        let mut input = TickInput::default();
        if frame % 2 == 0 {
            input.press(Key::Fire);
        }

        let target = state
            .waves
            .iter()
            .flat_map(|w| w.enemies.iter())
            .filter(|e| !e.is_dying())
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|e| e.bounds().center_x());

        if let Some(target) = target {
            let muzzle = state.player.bounds().center_x();
            if target < muzzle - state.player.speed {
                input.press(Key::ArrowLeft);
            } else if target > muzzle + state.player.speed {
                input.press(Key::ArrowRight);
            }
        }
        input
    }
}
