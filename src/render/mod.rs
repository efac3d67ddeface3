//! Grid renderer.
//!
//! Turns the run outcome into a static page: `index.html` plus one PNG per
//! cover under `covers/`. Tiles beyond the grid's capacity are dropped.

mod grid;
mod html;
mod tile;

pub use grid::GridLayout;
pub use html::escape_html;
pub use tile::{DisplayTile, TITLE_ELLIPSIS, TITLE_MAX_CHARS, catalog_link, truncate_title};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

/// Message shown when the catalog returned no records.
pub const NO_NEW_TITLES_MESSAGE: &str = "No new titles found.";

/// Name of the page written into the output directory.
pub const INDEX_FILE: &str = "index.html";

/// Directory (relative to the output directory) holding cover images.
pub const COVERS_DIR: &str = "covers";

const DEFAULT_COVER_FILE: &str = "default.png";

/// Errors that can occur while writing the page.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A file or directory could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// What the page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Covers laid out in the grid.
    Grid(Vec<DisplayTile>),
    /// The catalog returned no records.
    NoNewTitles,
    /// A fatal error ended the run.
    Error(String),
}

/// An image file referenced by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAsset {
    /// Path relative to the output directory, `/`-separated.
    pub relative_path: String,
    /// PNG bytes.
    pub bytes: Arc<[u8]>,
}

/// A page ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    html: String,
    assets: Vec<PageAsset>,
}

impl RenderedPage {
    /// The page markup.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Cover images the page links to, one per distinct file.
    #[must_use]
    pub fn assets(&self) -> &[PageAsset] {
        &self.assets
    }

    /// Writes `index.html` and the cover images into `dir`, creating it if
    /// needed. Returns the path of the written index.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if any directory or file cannot be
    /// written.
    #[tracing::instrument(skip_all, fields(dir = %dir.display(), assets = self.assets.len()))]
    pub async fn write_to(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| RenderError::io(dir, e))?;

        if !self.assets.is_empty() {
            let covers = dir.join(COVERS_DIR);
            tokio::fs::create_dir_all(&covers)
                .await
                .map_err(|e| RenderError::io(&covers, e))?;
        }

        for asset in &self.assets {
            let path = dir.join(&asset.relative_path);
            tokio::fs::write(&path, &asset.bytes)
                .await
                .map_err(|e| RenderError::io(&path, e))?;
            debug!(path = %path.display(), bytes = asset.bytes.len(), "Wrote cover");
        }

        let index = dir.join(INDEX_FILE);
        tokio::fs::write(&index, self.html.as_bytes())
            .await
            .map_err(|e| RenderError::io(&index, e))?;
        info!(path = %index.display(), "Page written");
        Ok(index)
    }
}

/// Renders pages for one deployment's grid and heading.
#[derive(Debug, Clone)]
pub struct PageRenderer {
    grid: GridLayout,
    page_title: String,
}

impl PageRenderer {
    #[must_use]
    pub fn new(grid: GridLayout, page_title: impl Into<String>) -> Self {
        Self {
            grid,
            page_title: page_title.into(),
        }
    }

    /// Renders `page` into markup plus the cover files it references.
    #[must_use]
    pub fn render(&self, page: &Page) -> RenderedPage {
        match page {
            Page::Grid(tiles) => self.render_grid(tiles),
            Page::NoNewTitles => RenderedPage {
                html: html::document(&self.page_title, &html::notice_body(NO_NEW_TITLES_MESSAGE)),
                assets: Vec::new(),
            },
            Page::Error(message) => RenderedPage {
                html: html::document(&self.page_title, &html::error_body(message)),
                assets: Vec::new(),
            },
        }
    }

    fn render_grid(&self, tiles: &[DisplayTile]) -> RenderedPage {
        let shown = &tiles[..tiles.len().min(self.grid.capacity())];
        if shown.len() < tiles.len() {
            debug!(
                dropped = tiles.len() - shown.len(),
                capacity = self.grid.capacity(),
                "Tiles beyond grid capacity dropped"
            );
        }

        let mut assets = Vec::new();
        let mut cover_paths = Vec::with_capacity(shown.len());
        let default_path = format!("{COVERS_DIR}/{DEFAULT_COVER_FILE}");
        for (index, tile) in shown.iter().enumerate() {
            let cover = tile.cover();
            if cover.is_default() {
                if !assets.iter().any(|a: &PageAsset| a.relative_path == default_path) {
                    assets.push(PageAsset {
                        relative_path: default_path.clone(),
                        bytes: Arc::from(cover.bytes()),
                    });
                }
                cover_paths.push(default_path.clone());
            } else {
                let relative_path = format!("{COVERS_DIR}/{index:03}.png");
                assets.push(PageAsset {
                    relative_path: relative_path.clone(),
                    bytes: Arc::from(cover.bytes()),
                });
                cover_paths.push(relative_path);
            }
        }

        let body = html::grid_body(self.grid, shown, &cover_paths);
        RenderedPage {
            html: html::document(&self.page_title, &body),
            assets,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::TitleRecord;
    use crate::cover::{CoverImage, CoverSource, TargetSize};

    fn found(byte: u8) -> CoverImage {
        CoverImage::new(
            vec![byte],
            TargetSize::default(),
            CoverSource::Provider {
                provider: "bookcover".to_string(),
                isbn: byte.to_string(),
            },
        )
    }

    fn default_cover() -> CoverImage {
        CoverImage::new(vec![0xDE], TargetSize::default(), CoverSource::Default)
    }

    fn tile(title: &str, oclc: &str, cover: CoverImage) -> DisplayTile {
        let record = TitleRecord::new(title, oclc, Vec::<String>::new());
        DisplayTile::new(&record, cover, "https://catalog.example/{oclc}")
    }

    #[test]
    fn test_grid_page_drops_tiles_beyond_capacity() {
        let renderer = PageRenderer::new(GridLayout::new(1, 2), "New Books");
        let tiles: Vec<DisplayTile> = (1..=3)
            .map(|i| tile(&format!("Title {i}"), &i.to_string(), found(i)))
            .collect();
        let page = renderer.render(&Page::Grid(tiles));
        assert!(page.html().contains("Title 1"));
        assert!(page.html().contains("Title 2"));
        assert!(!page.html().contains("Title 3"));
        assert_eq!(page.assets().len(), 2);
        assert_eq!(page.assets()[1].relative_path, "covers/001.png");
    }

    #[test]
    fn test_grid_page_keeps_input_order() {
        let renderer = PageRenderer::new(GridLayout::new(2, 2), "New Books");
        let tiles = vec![
            tile("First", "1", found(1)),
            tile("Second", "2", found(2)),
            tile("Third", "3", found(3)),
        ];
        let html = renderer.render(&Page::Grid(tiles)).html().to_string();
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        let third = html.find("Third").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_default_covers_share_one_file() {
        let renderer = PageRenderer::new(GridLayout::default(), "New Books");
        let tiles = vec![
            tile("A", "1", default_cover()),
            tile("B", "2", found(7)),
            tile("C", "3", default_cover()),
        ];
        let page = renderer.render(&Page::Grid(tiles));
        let paths: Vec<&str> = page
            .assets()
            .iter()
            .map(|a| a.relative_path.as_str())
            .collect();
        assert_eq!(paths, ["covers/default.png", "covers/001.png"]);
        assert_eq!(page.html().matches("covers/default.png").count(), 2);
    }

    #[test]
    fn test_tile_links_and_captions_are_escaped() {
        let renderer = PageRenderer::new(GridLayout::default(), "New Books");
        let page = renderer.render(&Page::Grid(vec![tile("Cats & <Dogs>", "9", found(1))]));
        assert!(page.html().contains("Cats &amp; &lt;Dogs&gt;"));
        assert!(page.html().contains("href=\"https://catalog.example/9\""));
    }

    #[test]
    fn test_no_new_titles_page() {
        let renderer = PageRenderer::new(GridLayout::default(), "New Books");
        let page = renderer.render(&Page::NoNewTitles);
        assert!(page.html().contains(NO_NEW_TITLES_MESSAGE));
        assert!(page.assets().is_empty());
    }

    #[test]
    fn test_error_page_shows_message() {
        let renderer = PageRenderer::new(GridLayout::default(), "Library");
        let page = renderer.render(&Page::Error("token request rejected".to_string()));
        assert!(page.html().contains("token request rejected"));
        assert!(page.html().contains("<h1>Library</h1>"));
    }

    #[tokio::test]
    async fn test_write_to_creates_index_and_covers() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("site");
        let renderer = PageRenderer::new(GridLayout::default(), "New Books");
        let page = renderer.render(&Page::Grid(vec![
            tile("A", "1", found(5)),
            tile("B", "2", default_cover()),
        ]));

        let index = page.write_to(&out).await.unwrap();
        assert_eq!(index, out.join(INDEX_FILE));
        assert!(std::fs::read_to_string(&index).unwrap().contains("covers/000.png"));
        assert_eq!(std::fs::read(out.join("covers/000.png")).unwrap(), [5]);
        assert_eq!(std::fs::read(out.join("covers/default.png")).unwrap(), [0xDE]);
    }

    #[tokio::test]
    async fn test_write_to_without_assets_skips_covers_dir() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PageRenderer::new(GridLayout::default(), "New Books");
        renderer
            .render(&Page::NoNewTitles)
            .write_to(dir.path())
            .await
            .unwrap();
        assert!(dir.path().join(INDEX_FILE).exists());
        assert!(!dir.path().join(COVERS_DIR).exists());
    }
}
