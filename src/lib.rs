// ==================== Imports ====================
use engine::GameLoop;
use game::PoopDodge;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

pub mod assets;
pub mod audio;
pub mod browser;
pub mod config;
pub mod engine;
pub mod game;
pub mod hud;
pub mod world;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - routes panics and `log` output to the console
/// - checks for a usable canvas, the only unrecoverable failure
/// - loads assets and starts the game loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    // already set if the page calls main_js twice, keep the first one
    let _ = console_log::init_with_level(log::Level::Info);

    browser::context().map_err(|err| JsValue::from_str(&format!("{:#}", err)))?;

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(PoopDodge::new()).await {
            log::error!("Could not start game : {:#}", err);
        }
    });

    Ok(())
}
