//! Music and sound cues on `<audio>` elements.
//!
//! Playback is request-and-forget: nothing waits on a clip, and a clip that
//! fails to load or play only leaves a warning in the console.

use crate::browser;
use crate::config::AudioConfig;
use anyhow::Result;
use std::cell::{Cell, RefCell};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

/// One-shot sounds the simulation asks for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cue {
    Start,
    Shoot,
    Destroy,
    GameOver,
    Unlock,
}

/// Where the simulation sends sound. Implementations must not fail or block.
pub trait AudioSink {
    fn play(&self, cue: Cue);
    fn start_music(&self);
    fn stop_music(&self);
}

struct Clips {
    music: HtmlAudioElement,
    start: HtmlAudioElement,
    shoot: HtmlAudioElement,
    destroy: HtmlAudioElement,
    game_over: HtmlAudioElement,
    unlock: HtmlAudioElement,
}

impl Clips {
    fn load(config: &AudioConfig) -> Result<Self> {
        let music = clip(&config.music)?;
        music.set_loop(true);
        music.set_volume(config.music_volume);
        Ok(Clips {
            music,
            start: clip(&config.start)?,
            shoot: clip(&config.shoot)?,
            destroy: clip(&config.destroy)?,
            game_over: clip(&config.game_over)?,
            unlock: clip(&config.unlock)?,
        })
    }

    fn cue(&self, cue: Cue) -> &HtmlAudioElement {
        match cue {
            Cue::Start => &self.start,
            Cue::Shoot => &self.shoot,
            Cue::Destroy => &self.destroy,
            Cue::GameOver => &self.game_over,
            Cue::Unlock => &self.unlock,
        }
    }

    fn all(&self) -> [&HtmlAudioElement; 6] {
        [
            &self.music,
            &self.start,
            &self.shoot,
            &self.destroy,
            &self.game_over,
            &self.unlock,
        ]
    }
}

fn clip(source: &str) -> Result<HtmlAudioElement> {
    let audio = browser::create_audio_element(source)?;
    let path = source.to_string();
    browser::add_event_listener(&audio, "error", move |_event: web_sys::Event| {
        log::warn!("Could not load sound {}", path);
    })?;
    audio.load();
    Ok(audio)
}

fn play_clip(clip: &HtmlAudioElement, label: &'static str) {
    match clip.play() {
        Ok(promise) => browser::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("{} playback failed : {:#?}", label, err);
            }
        }),
        Err(err) => log::warn!("{} playback failed : {:#?}", label, err),
    }
}

/// Six clips behind a mute switch. Clips are created lazily by `start`, a
/// browser may refuse autoplay before the page settled.
pub struct Audio {
    config: AudioConfig,
    clips: RefCell<Option<Clips>>,
    started: Cell<bool>,
    muted: Cell<bool>,
}

impl Audio {
    pub fn new(config: AudioConfig) -> Self {
        Audio {
            config,
            clips: RefCell::new(None),
            started: Cell::new(false),
            muted: Cell::new(false),
        }
    }

    pub fn init_delay_ms(&self) -> i32 {
        self.config.init_delay_ms
    }

    /// Load every clip, then start the music and the start cue. Runs at most
    /// once, a failed attempt leaves the game silent. Returns whether this call
    /// did the loading.
    pub fn start(&self) -> bool {
        if self.started.replace(true) {
            return false;
        }
        match Clips::load(&self.config) {
            Ok(clips) => {
                for clip in clips.all() {
                    clip.set_muted(self.muted.get());
                }
                *self.clips.borrow_mut() = Some(clips);
                log::info!("Audio initialized");
                self.start_music();
                self.play(Cue::Start);
            }
            Err(err) => log::error!("Audio disabled : {:#}", err),
        }
        true
    }

    pub fn is_started(&self) -> bool {
        self.started.get()
    }

    /// Mute flag of each loaded clip, empty until `start` succeeded
    pub fn clips_muted(&self) -> Vec<bool> {
        self.clips
            .borrow()
            .as_ref()
            .map(|clips| clips.all().iter().map(|clip| clip.muted()).collect())
            .unwrap_or_default()
    }

    pub fn is_muted(&self) -> bool {
        self.muted.get()
    }

    /// Flip mute on every clip, returns the new state
    pub fn toggle_mute(&self) -> bool {
        let muted = !self.muted.get();
        self.muted.set(muted);
        if let Some(clips) = self.clips.borrow().as_ref() {
            for clip in clips.all() {
                clip.set_muted(muted);
            }
        }
        muted
    }
}

impl AudioSink for Audio {
    fn play(&self, cue: Cue) {
        if let Some(clips) = self.clips.borrow().as_ref() {
            let label = match cue {
                Cue::Start => "start",
                Cue::Shoot => "shoot",
                Cue::Destroy => "destroy",
                Cue::GameOver => "game over",
                Cue::Unlock => "unlock",
            };
            play_clip(clips.cue(cue), label);
        }
    }

    fn start_music(&self) {
        if let Some(clips) = self.clips.borrow().as_ref() {
            play_clip(&clips.music, "music");
        }
    }

    fn stop_music(&self) {
        if let Some(clips) = self.clips.borrow().as_ref() {
            if let Err(err) = clips.music.pause() {
                log::warn!("Could not pause music : {:#?}", err);
            }
        }
    }
}
