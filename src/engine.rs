use crate::browser;
use anyhow::{anyhow, Error, Result};
// wasm is single threaded, so Rc RefCell over Arc Mutex
use async_trait::async_trait;
use futures::channel::oneshot::channel;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

#[async_trait(?Send)]
pub trait Game {
    async fn initialize(&self) -> Result<Box<dyn Game>>;
    /// `now` is the animation frame timestamp in ms
    fn update(&mut self, now: f64);
    fn draw(&self, renderer: &Renderer);
}

pub struct GameLoop;

type SharedLoopClosure = Rc<RefCell<Option<browser::LoopClosure>>>;

impl GameLoop {
    /// One update + one draw per display frame, forever. Nothing in here stops
    /// the loop, a session ends by reloading the page.
    pub async fn start(game: impl Game + 'static) -> Result<()> {
        let mut game = game.initialize().await?;
        let renderer = Renderer {
            context: browser::context()?,
        };
        let f: SharedLoopClosure = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(browser::create_raf_closure(move |perf: f64| {
            game.update(perf);
            game.draw(&renderer);
            if let Some(next) = f.borrow().as_ref() {
                if let Err(err) = browser::request_animation_frame(next) {
                    log::error!("Game loop stalled : {:#}", err);
                }
            }
        }));

        browser::request_animation_frame(
            g.borrow()
                .as_ref()
                .ok_or_else(|| anyhow!("GameLoop: Loop is None"))?,
        )?;

        Ok(())
    }
}

// ==================== Geometry ====================
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Axis aligned box, origin at the top left corner
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Point, size: Size) -> Self {
        Rect { position, size }
    }

    pub fn square(position: Point, side: f64) -> Self {
        Rect::new(
            position,
            Size {
                width: side,
                height: side,
            },
        )
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.width
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.height
    }

    /// Strict overlap on both axes, boxes that only share an edge do not touch
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

// ==================== Rendering ====================
pub struct Renderer {
    context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn clear(&self, rect: &Rect) {
        self.context
            .clear_rect(rect.left(), rect.top(), rect.size.width, rect.size.height);
    }

    pub fn draw_image(&self, image: &HtmlImageElement, destination: &Rect) -> Result<()> {
        self.context
            .draw_image_with_html_image_element_and_dw_and_dh(
                image,
                destination.left(),
                destination.top(),
                destination.size.width,
                destination.size.height,
            )
            .map_err(|err| anyhow!("Error drawing image {:#?}", err))
    }

    /// Text is centered horizontally on `position.x`, `position.y` is the baseline
    pub fn draw_text(&self, text: &str, position: Point, font_px: f64) -> Result<()> {
        self.context.set_font(&format!("{}px Arial", font_px));
        self.context.set_text_align("center");
        self.context
            .fill_text(text, position.x, position.y)
            .map_err(|err| anyhow!("Error drawing text {:#?}", err))
    }
}

/// Asynchronously load an image from a given source path
/// # Arguments
/// * `source` - string slice to path/url
/// # Returns
/// * `Ok(HtmlImageElement)` - on load success
/// * `Err` - on load fail
pub async fn load_image(source: &str) -> Result<HtmlImageElement> {
    let image = browser::create_html_image_element()?;
    let (tx, rx) = channel::<Result<(), Error>>();
    let success_tx = Rc::new(RefCell::new(Some(tx)));
    let error_tx = success_tx.clone();
    let path = source.to_string();

    let success_callback = browser::closure_once(move || {
        if let Some(tx) = success_tx.borrow_mut().take() {
            let _ = tx.send(Ok(()));
        }
    });

    let error_callback = browser::closure_once(move |err: JsValue| {
        if let Some(tx) = error_tx.borrow_mut().take() {
            let _ = tx.send(Err(anyhow!("Error loading image {}: {:#?}", path, err)));
        }
    });

    image.set_onload(Some(success_callback.as_ref().unchecked_ref()));
    image.set_onerror(Some(error_callback.as_ref().unchecked_ref()));
    image.set_src(source);

    // keep callbacks alive until the image loads or errors
    success_callback.forget();
    error_callback.forget();

    // Result<Result<(), Error>, oneshot::Canceled>
    // - first ? : channel result
    // - second ? : image load result
    rx.await??;

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f64, y: f64, side: f64) -> Rect {
        Rect::square(Point { x, y }, side)
    }

    #[test]
    fn edges_follow_position_and_size() {
        let r = Rect::new(
            Point { x: 10.0, y: 20.0 },
            Size {
                width: 30.0,
                height: 40.0,
            },
        );
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
    }

    #[test]
    fn overlapping_boxes_intersect_both_ways() {
        let player = rect(100.0, 500.0, 50.0);
        let obstacle = rect(110.0, 510.0, 60.0);
        assert!(player.intersects(&obstacle));
        assert!(obstacle.intersects(&player));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = rect(0.0, 0.0, 50.0);
        assert!(!a.intersects(&rect(50.0, 0.0, 50.0)));
        assert!(!a.intersects(&rect(0.0, 50.0, 50.0)));
        assert!(!a.intersects(&rect(-50.0, 0.0, 50.0)));
    }

    #[test]
    fn contained_box_intersects() {
        assert!(rect(0.0, 0.0, 100.0).intersects(&rect(40.0, 40.0, 10.0)));
    }

    #[test]
    fn separated_on_one_axis_is_enough() {
        let a = rect(0.0, 0.0, 50.0);
        assert!(!a.intersects(&rect(10.0, 200.0, 50.0)));
        assert!(!a.intersects(&rect(200.0, 10.0, 50.0)));
    }
}
