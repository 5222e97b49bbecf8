//! URL layout of the file server: `<base>/files/<game>/images/static/<id>.png`.

use crate::image_dir::{image_file_name, ImageId};
use url::Url;

#[derive(Debug, Clone)]
pub struct Endpoint {
    base: Url,
    game: String,
}

impl Endpoint {
    pub fn new(base: Url, game: impl Into<String>) -> Self {
        let mut base = base;
        // `Url::join` replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            base,
            game: game.into(),
        }
    }

    pub fn parse(base: &str, game: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self::new(Url::parse(base)?, game))
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    pub fn image_url(&self, id: ImageId) -> Result<Url, url::ParseError> {
        self.base.join(&format!(
            "files/{}/images/static/{}",
            self.game,
            image_file_name(id)
        ))
    }
}
