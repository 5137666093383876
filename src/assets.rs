//! Sprite loading.
//!
//! Sprites are ASCII-art text files.  A sprite that fails to load is logged
//! and left out of the sheet; entities without a loaded sprite are drawn as
//! solid placeholder rectangles instead.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crossterm::style::Color;

use crate::error::AssetError;

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "art"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Player,
    AlienSmall,
    AlienMedium,
    AlienLarge,
    Heart,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Player,
        SpriteId::AlienSmall,
        SpriteId::AlienMedium,
        SpriteId::AlienLarge,
        SpriteId::Heart,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            SpriteId::Player => "player.txt",
            SpriteId::AlienSmall => "alien_small.txt",
            SpriteId::AlienMedium => "alien_medium.txt",
            SpriteId::AlienLarge => "alien_big.txt",
            SpriteId::Heart => "heart.txt",
        }
    }

    pub fn color(self) -> Color {
        match self {
            SpriteId::Player => Color::White,
            SpriteId::AlienSmall => Color::Green,
            SpriteId::AlienMedium => Color::Yellow,
            SpriteId::AlienLarge => Color::Red,
            SpriteId::Heart => Color::Magenta,
        }
    }
}

/// Rectangular glyph grid; short rows are padded with spaces.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    width: usize,
    rows: Vec<Vec<char>>,
}

impl Sprite {
    pub fn from_art(art: &str) -> Option<Sprite> {
        let mut rows: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        for row in &mut rows {
            row.resize(width, ' ');
        }
        Some(Sprite { width, rows })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn glyph(&self, col: usize, row: usize) -> char {
        self.rows[row][col]
    }
}

pub fn load_sprite(path: &Path) -> Result<Sprite, AssetError> {
    let supported = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !supported {
        return Err(AssetError::UnsupportedFormat { path: path.to_path_buf() });
    }
    if !path.exists() {
        return Err(AssetError::NotFound { path: path.to_path_buf() });
    }
    let art = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Sprite::from_art(&art).ok_or_else(|| AssetError::Empty { path: path.to_path_buf() })
}

/// Every sprite that loaded successfully.  Cheap to clone.
#[derive(Clone, Debug, Default)]
pub struct SpriteSheet {
    sprites: HashMap<SpriteId, Arc<Sprite>>,
}

impl SpriteSheet {
    pub fn empty() -> Self {
        SpriteSheet::default()
    }

    /// Load every known sprite from `dir`.  Failures are logged and skipped.
    pub fn load(dir: &Path) -> Self {
        let mut sheet = SpriteSheet::empty();
        for id in SpriteId::ALL {
            match load_sprite(&dir.join(id.file_name())) {
                Ok(sprite) => sheet.insert(id, sprite),
                Err(e) => log::warn!("sprite {:?} unavailable, using placeholder: {}", id, e),
            }
        }
        log::info!("loaded {}/{} sprites from {}", sheet.len(), SpriteId::ALL.len(), dir.display());
        sheet
    }

    pub fn insert(&mut self, id: SpriteId, sprite: Sprite) {
        self.sprites.insert(id, Arc::new(sprite));
    }

    pub fn get(&self, id: SpriteId) -> Option<&Arc<Sprite>> {
        self.sprites.get(&id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}
