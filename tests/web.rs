//! Browser glue tests, run with `wasm-pack test --headless --firefox`
#![cfg(target_arch = "wasm32")]

use poop_dodge::assets::Sprites;
use poop_dodge::audio::Audio;
use poop_dodge::browser;
use poop_dodge::config::{self, AssetConfig, AudioConfig, GameConfig};
use poop_dodge::engine;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

// 1x1 transparent gif, loads without a server
const PIXEL: &str = "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

fn mount_canvas() -> HtmlCanvasElement {
    let document = browser::document().unwrap();
    if let Some(existing) = document.get_element_by_id("gameCanvas") {
        return existing.dyn_into().unwrap();
    }
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    canvas.set_id("gameCanvas");
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn clock_moves_forward() {
    let first = browser::now().unwrap();
    let second = browser::now().unwrap();
    assert!(first >= 0.0);
    assert!(second >= first);
    assert!(first <= js_sys::Date::now());
}

#[wasm_bindgen_test]
fn context_found_once_canvas_exists() {
    mount_canvas();
    assert!(browser::canvas().is_ok());
    assert!(browser::context().is_ok());
}

#[wasm_bindgen_test]
fn viewport_has_a_size() {
    let size = browser::viewport_size().unwrap();
    assert!(size.width >= 0.0);
    assert!(size.height >= 0.0);
}

#[wasm_bindgen_test]
fn missing_element_is_an_error() {
    assert!(browser::element("definitely-not-on-the-page").is_err());
}

#[wasm_bindgen_test]
async fn missing_image_is_an_error() {
    assert!(engine::load_image("no/such/image.png").await.is_err());
}

#[wasm_bindgen_test]
async fn missing_config_falls_back_to_defaults() {
    assert_eq!(config::load_or_default().await, GameConfig::default());
}

#[wasm_bindgen_test]
fn audio_loads_clips_only_once() {
    let audio = Audio::new(AudioConfig::default());
    assert!(!audio.is_started());
    assert!(audio.clips_muted().is_empty());

    assert!(audio.start());
    assert!(audio.is_started());
    assert_eq!(audio.clips_muted().len(), 6);

    assert!(!audio.start());
    assert_eq!(audio.clips_muted().len(), 6);
}

#[wasm_bindgen_test]
fn mute_before_start_reaches_every_clip() {
    let audio = Audio::new(AudioConfig::default());
    assert!(audio.toggle_mute());
    audio.start();
    assert_eq!(audio.clips_muted(), vec![true; 6]);

    assert!(!audio.toggle_mute());
    assert_eq!(audio.clips_muted(), vec![false; 6]);
}

#[wasm_bindgen_test]
async fn late_obstacles_fall_back_early_ones_stay_empty() {
    let assets = AssetConfig {
        player_image: PIXEL.to_string(),
        obstacle_image: "no/such/obstacle{}.png".to_string(),
        fallback_image: PIXEL.to_string(),
        fallback_after: 2,
    };
    let sprites = Sprites::load(&assets, 4).await;

    assert!(sprites.player().is_some());
    // slots are 0-based, obstacle indices 1-based
    assert!(sprites.obstacle(0).is_none());
    assert!(sprites.obstacle(1).is_none());
    assert!(sprites.obstacle(2).is_some());
    assert!(sprites.obstacle(3).is_some());
    assert!(sprites.obstacle(4).is_none());
}

#[wasm_bindgen_test]
async fn missing_fallback_leaves_the_slot_empty() {
    let assets = AssetConfig {
        player_image: "no/such/player.png".to_string(),
        obstacle_image: "no/such/obstacle{}.png".to_string(),
        fallback_image: "no/such/fallback.png".to_string(),
        fallback_after: 0,
    };
    let sprites = Sprites::load(&assets, 2).await;

    assert!(sprites.player().is_none());
    assert!(sprites.obstacle(0).is_none());
    assert!(sprites.obstacle(1).is_none());
}
