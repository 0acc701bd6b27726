use crate::browser;
use crate::world::SessionSummary;
use web_sys::{Element, HtmlElement};

mod ids {
    pub const SCORE: &str = "scoreDisplay";
    pub const TIMER: &str = "timerDisplay";
    pub const SHOTS: &str = "shootCounter";
    pub const UNLOCK_MESSAGE: &str = "shootMessage";
    pub const AUDIO_CONTROL: &str = "audioControl";
}

pub fn score_html(score: u64) -> String {
    format!("<i class=\"fas fa-star\"></i> Score: {}", score)
}

pub fn timer_html(elapsed_secs: u64) -> String {
    format!("<i class=\"fas fa-stopwatch\"></i> {}s", elapsed_secs)
}

pub fn shots_html(shots: u32) -> String {
    format!("<i class=\"fas fa-bullseye\"></i> {}", shots)
}

pub fn mute_icon_html(muted: bool) -> &'static str {
    if muted {
        "<i class='fas fa-volume-mute'></i>"
    } else {
        "<i class='fas fa-volume-up'></i>"
    }
}

pub fn game_over_text(summary: &SessionSummary) -> String {
    format!(
        "Game Over! Score: {}, Time: {}s, Shots: {}",
        summary.score, summary.elapsed_secs, summary.shots
    )
}

/// Text overlays around the canvas. Elements missing from the page are
/// reported once at startup and skipped afterwards.
pub struct Hud {
    score: Option<Element>,
    timer: Option<Element>,
    shots: Option<Element>,
    unlock_message: Option<HtmlElement>,
    audio_control: Option<Element>,
}

fn lookup(id: &str) -> Option<Element> {
    browser::element(id)
        .map_err(|err| log::warn!("HUD : {:#}", err))
        .ok()
}

impl Hud {
    pub fn find() -> Self {
        Hud {
            score: lookup(ids::SCORE),
            timer: lookup(ids::TIMER),
            shots: lookup(ids::SHOTS),
            unlock_message: browser::html_element(ids::UNLOCK_MESSAGE)
                .map_err(|err| log::warn!("HUD : {:#}", err))
                .ok(),
            audio_control: lookup(ids::AUDIO_CONTROL),
        }
    }

    pub fn audio_control(&self) -> Option<&Element> {
        self.audio_control.as_ref()
    }

    pub fn show_score(&self, score: u64) {
        if let Some(element) = &self.score {
            element.set_inner_html(&score_html(score));
        }
    }

    pub fn show_time(&self, elapsed_secs: u64) {
        if let Some(element) = &self.timer {
            element.set_inner_html(&timer_html(elapsed_secs));
        }
    }

    pub fn show_shots(&self, shots: u32) {
        if let Some(element) = &self.shots {
            element.set_inner_html(&shots_html(shots));
        }
    }

    pub fn show_mute(&self, muted: bool) {
        if let Some(element) = &self.audio_control {
            element.set_inner_html(mute_icon_html(muted));
        }
    }

    pub fn reset(&self) {
        self.show_score(0);
        self.show_time(0);
        self.show_shots(0);
    }

    /// Show the "you can shoot" banner, hide it again after `duration_ms`
    pub fn flash_unlock_message(&self, duration_ms: i32) {
        let Some(message) = self.unlock_message.clone() else {
            return;
        };
        set_display(&message, "block");
        if let Err(err) = browser::set_timeout(duration_ms, move || set_display(&message, "none")) {
            log::warn!("Unlock message will stay up : {:#}", err);
        }
    }

    /// Blocks until the player dismisses the dialog
    pub fn game_over(&self, summary: &SessionSummary) {
        if let Err(err) = browser::alert(&game_over_text(summary)) {
            log::warn!("{:#}", err);
        }
    }
}

fn set_display(element: &HtmlElement, value: &str) {
    if let Err(err) = element.style().set_property("display", value) {
        log::warn!("Could not set display to {} : {:#?}", value, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_render_with_their_icons() {
        assert_eq!(score_html(42), "<i class=\"fas fa-star\"></i> Score: 42");
        assert_eq!(timer_html(7), "<i class=\"fas fa-stopwatch\"></i> 7s");
        assert_eq!(shots_html(3), "<i class=\"fas fa-bullseye\"></i> 3");
    }

    #[test]
    fn mute_icon_follows_state() {
        assert!(mute_icon_html(true).contains("fa-volume-mute"));
        assert!(mute_icon_html(false).contains("fa-volume-up"));
    }

    #[test]
    fn game_over_text_lists_the_session() {
        let summary = SessionSummary {
            score: 1234,
            elapsed_secs: 25,
            shots: 6,
        };
        assert_eq!(
            game_over_text(&summary),
            "Game Over! Score: 1234, Time: 25s, Shots: 6"
        );
    }
}
