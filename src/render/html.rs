//! HTML fragments for the three page kinds.

use super::grid::GridLayout;
use super::tile::DisplayTile;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 0 auto; max-width: 960px; padding: 16px; }
header h1 { margin: 0 0 16px 0; }
.grid { display: grid; gap: 12px; }
.row { display: contents; }
.tile { position: relative; }
.tile img { display: block; width: 100%; height: auto; }
.caption { position: absolute; bottom: 0; left: 0; right: 0; padding: 5px;
  background-color: rgba(255, 255, 255, 0.9); max-height: 4.5em; overflow: hidden; }
.caption a { color: black; text-decoration: none; }
.notice { padding: 12px; }
.error { padding: 12px; background: #fdecea; color: #611a15; border-radius: 4px; }
";

/// Escapes text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wraps `body` in a complete document with the page heading.
pub(super) fn document(page_title: &str, body: &str) -> String {
    let title = escape_html(page_title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>\n{STYLE}</style>\n</head>\n<body>\n\
         <header><h1>{title}</h1></header>\n<main>\n{body}</main>\n</body>\n</html>\n"
    )
}

/// The tile grid. `cover_paths[i]` is the relative image path for tile `i`.
///
/// Each tile is pinned to the cell [`GridLayout::position`] assigns it; a
/// new row element opens whenever a tile lands in the first column.
pub(super) fn grid_body(grid: GridLayout, tiles: &[DisplayTile], cover_paths: &[String]) -> String {
    let mut body = format!(
        "<div class=\"grid\" style=\"grid-template-columns: repeat({}, 1fr);\">\n",
        grid.columns.max(1)
    );
    let mut row_open = false;
    for (index, tile) in tiles.iter().enumerate() {
        let Some((row, column)) = grid.position(index) else {
            break;
        };
        if column == 0 {
            if row_open {
                body.push_str("</div>\n");
            }
            body.push_str("<div class=\"row\">\n");
            row_open = true;
        }
        let link = escape_html(tile.link());
        let caption = escape_html(tile.caption());
        let src = cover_paths.get(index).map_or("", String::as_str);
        body.push_str(&format!(
            "<div class=\"tile\" style=\"grid-row: {r}; grid-column: {c};\">\n\
             <a href=\"{link}\"><img src=\"{src}\" alt=\"{caption}\" \
             width=\"{w}\" height=\"{h}\"></a>\n\
             <div class=\"caption\"><a href=\"{link}\">{caption}</a></div>\n</div>\n",
            r = row + 1,
            c = column + 1,
            w = tile.cover().size().width,
            h = tile.cover().size().height,
        ));
    }
    if row_open {
        body.push_str("</div>\n");
    }
    body.push_str("</div>\n");
    body
}

/// The informational page shown when the catalog returned nothing.
pub(super) fn notice_body(message: &str) -> String {
    format!("<p class=\"notice\">{}</p>\n", escape_html(message))
}

/// The page shown after a fatal error.
pub(super) fn error_body(message: &str) -> String {
    format!(
        "<div class=\"error\" role=\"alert\">{}</div>\n",
        escape_html(message)
    )
}
