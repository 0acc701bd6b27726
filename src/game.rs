use crate::assets::Sprites;
use crate::audio::{Audio, AudioSink};
use crate::browser;
use crate::config;
use crate::engine::{Game, Point, Rect, Renderer, Size};
use crate::hud::Hud;
use crate::world::render::{self, Sprite, Surface};
use crate::world::{SessionSummary, StepOutcome, World};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

/// ┌──────────────────────── Who touches the world ─────────────────────────┐
/// │  requestAnimationFrame -> update() + draw()    every display frame     │
/// │  setInterval           -> spawn_obstacle()     every spawn interval    │
/// │  mousemove / touchmove -> aim_at()                                     │
/// │  click                 -> shoot()                                      │
/// │  resize                -> resize()                                     │
/// └────────────────────────────────────────────────────────────────────────┘
/// All of them run on the one browser thread, so `Rc<RefCell<World>>` is
/// enough and a borrow never outlives its handler.
pub enum PoopDodge {
    /// Assets and config still loading
    Loading,

    Loaded(Arena),
}

impl PoopDodge {
    pub fn new() -> Self {
        PoopDodge::Loading
    }
}

impl Default for PoopDodge {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Arena {
    world: Rc<RefCell<World>>,
    audio: Rc<Audio>,
    hud: Rc<Hud>,
    sprites: Sprites,
}

#[async_trait(?Send)]
impl Game for PoopDodge {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            PoopDodge::Loading => {
                let config = config::load_or_default().await;
                let sprites = Sprites::load(&config.assets, config.obstacle.image_count).await;

                let canvas = browser::canvas()?;
                let size = fit_canvas(&canvas).context("Could not size the canvas")?;
                let spawn_interval_ms = config.obstacle.spawn_interval_ms;
                let audio = Rc::new(Audio::new(config.audio.clone()));
                let world = Rc::new(RefCell::new(World::new(config, size, browser::now()?)));
                let hud = Rc::new(Hud::find());
                hud.reset();
                hud.show_mute(audio.is_muted());

                install_pointer(&canvas, &world, &audio, &hud)?;
                install_resize(canvas, &world)?;
                install_spawner(&world, spawn_interval_ms)?;
                install_audio(&audio, &hud)?;

                log::info!("Poop Dodge ready on a {}x{} canvas", size.width, size.height);
                Ok(Box::new(PoopDodge::Loaded(Arena {
                    world,
                    audio,
                    hud,
                    sprites,
                })))
            }
            PoopDodge::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn update(&mut self, now: f64) {
        if let PoopDodge::Loaded(arena) = self {
            let outcome = arena.world.borrow_mut().step(now, &*arena.audio);
            match outcome {
                StepOutcome::Running { unlocked } => {
                    let world = arena.world.borrow();
                    arena.hud.show_score(world.score());
                    arena.hud.show_time(world.elapsed_secs());
                    if unlocked {
                        arena
                            .hud
                            .flash_unlock_message(world.config().rules.unlock_message_ms);
                    }
                }
                StepOutcome::GameOver(summary) => arena.end_session(&summary, now),
                StepOutcome::Stopped => {}
            }
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let PoopDodge::Loaded(arena) = self {
            let surface = CanvasSurface {
                renderer,
                sprites: &arena.sprites,
            };
            render::draw(&arena.world.borrow(), &surface);
        }
    }
}

impl Arena {
    /// Show the summary, then start over with a fresh page. If the page can't
    /// be reloaded the session restarts in place.
    fn end_session(&self, summary: &SessionSummary, now: f64) {
        self.hud.game_over(summary);
        if let Err(err) = browser::reload() {
            log::warn!("Restarting in place : {:#}", err);
            self.world.borrow_mut().reset(now);
            self.hud.reset();
            self.audio.start_music();
        }
    }
}

/// Draws onto the 2d canvas context with the preloaded images
struct CanvasSurface<'a> {
    renderer: &'a Renderer,
    sprites: &'a Sprites,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&self, area: &Rect) {
        self.renderer.clear(area);
    }

    fn draw_sprite(&self, sprite: Sprite, destination: &Rect) {
        let image = match sprite {
            Sprite::Player => self.sprites.player(),
            Sprite::Obstacle(index) => self.sprites.obstacle(index),
        };
        if let Some(image) = image {
            if let Err(err) = self.renderer.draw_image(image, destination) {
                log::warn!("{:?} : {:#}", sprite, err);
            }
        }
    }

    fn draw_glyph(&self, glyph: &str, position: Point, font_px: f64) {
        if let Err(err) = self.renderer.draw_text(glyph, position, font_px) {
            log::warn!("{:#}", err);
        }
    }
}

// ==================== Event wiring ====================
/// Stretch the canvas over the viewport, returns the new size
fn fit_canvas(canvas: &HtmlCanvasElement) -> Result<Size> {
    let size = browser::viewport_size()?;
    canvas.set_width(size.width as u32);
    canvas.set_height(size.height as u32);
    Ok(size)
}

fn install_pointer(
    canvas: &HtmlCanvasElement,
    world: &Rc<RefCell<World>>,
    audio: &Rc<Audio>,
    hud: &Rc<Hud>,
) -> Result<()> {
    {
        let world = world.clone();
        browser::add_event_listener(canvas, "mousemove", move |event: MouseEvent| {
            world.borrow_mut().aim_at(event.client_x() as f64);
        })?;
    }
    {
        let world = world.clone();
        browser::add_event_listener(canvas, "touchmove", move |event: TouchEvent| {
            if let Some(touch) = event.touches().get(0) {
                world.borrow_mut().aim_at(touch.client_x() as f64);
            }
        })?;
    }
    {
        let world = world.clone();
        let audio = audio.clone();
        let hud = hud.clone();
        browser::add_event_listener(canvas, "click", move |_event: MouseEvent| {
            let fired = world.borrow_mut().shoot(&*audio);
            if fired {
                hud.show_shots(world.borrow().shots());
            }
        })?;
    }
    browser::prevent_touch_scroll()
}

fn install_resize(canvas: HtmlCanvasElement, world: &Rc<RefCell<World>>) -> Result<()> {
    let world = world.clone();
    browser::add_event_listener(browser::window()?.as_ref(), "resize", move |_event: web_sys::Event| {
        match fit_canvas(&canvas) {
            Ok(size) => world.borrow_mut().resize(size),
            Err(err) => log::warn!("Resize ignored : {:#}", err),
        }
    })
}

fn install_spawner(world: &Rc<RefCell<World>>, interval_ms: i32) -> Result<()> {
    let world = world.clone();
    let mut rng = StdRng::from_entropy();
    browser::set_interval(interval_ms, move || {
        world.borrow_mut().spawn_obstacle(&mut rng);
    })?;
    Ok(())
}

/// Mute toggle now, clips a moment after the page has loaded
fn install_audio(audio: &Rc<Audio>, hud: &Rc<Hud>) -> Result<()> {
    if let Some(control) = hud.audio_control() {
        let audio = audio.clone();
        let hud = hud.clone();
        browser::add_event_listener(control, "click", move |_event: web_sys::Event| {
            let muted = audio.toggle_mute();
            hud.show_mute(muted);
        })?;
    }

    let audio = audio.clone();
    browser::on_page_load(move || {
        let delay = audio.init_delay_ms();
        if let Err(err) = browser::set_timeout(delay, move || {
            audio.start();
        }) {
            log::warn!("Audio will stay off : {:#}", err);
        }
    })
}
