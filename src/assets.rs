use crate::config::AssetConfig;
use crate::engine;
use futures::future::join_all;
use futures::join;
use web_sys::HtmlImageElement;

/// Preloaded images, shared read-only by every frame. A slot that failed to
/// load is `None` and simply isn't drawn.
pub struct Sprites {
    player: Option<HtmlImageElement>,
    obstacles: Vec<Option<HtmlImageElement>>,
}

impl Sprites {
    /// Loads everything concurrently, never fails as a whole
    pub async fn load(config: &AssetConfig, obstacle_count: usize) -> Self {
        let obstacles = join_all((1..=obstacle_count).map(|index| load_obstacle(config, index)));
        let (player, obstacles) = join!(load_player(config), obstacles);
        let missing = obstacles.iter().filter(|image| image.is_none()).count();
        if missing > 0 {
            log::warn!("{} of {} obstacle images unavailable", missing, obstacle_count);
        }
        Sprites { player, obstacles }
    }

    pub fn player(&self) -> Option<&HtmlImageElement> {
        self.player.as_ref()
    }

    pub fn obstacle(&self, index: usize) -> Option<&HtmlImageElement> {
        self.obstacles.get(index).and_then(Option::as_ref)
    }
}

async fn load_player(config: &AssetConfig) -> Option<HtmlImageElement> {
    engine::load_image(&config.player_image)
        .await
        .map_err(|err| log::warn!("{:#}", err))
        .ok()
}

/// `index` is 1-based, late obstacles get a second chance with the fallback image
async fn load_obstacle(config: &AssetConfig, index: usize) -> Option<HtmlImageElement> {
    match engine::load_image(&config.obstacle_path(index)).await {
        Ok(image) => Some(image),
        Err(err) => {
            log::warn!("{:#}", err);
            let fallback = config.fallback_for(index)?;
            engine::load_image(fallback)
                .await
                .map_err(|err| log::warn!("Fallback for obstacle {} failed : {:#}", index, err))
                .ok()
        }
    }
}
