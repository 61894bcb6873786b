use crate::types::{Mosaic, Placement};

const CELL_WIDTH: usize = 6;
const CELL_HEIGHT: usize = 2;

/// Draws the grid plan as ASCII boxes, each labelled with the 1-based
/// index of its photo. Empty cells stay blank.
pub fn render_mosaic(mosaic: &Mosaic) -> String {
    let width = mosaic.grid_cols as usize * CELL_WIDTH;
    let height = mosaic.grid_rows as usize * CELL_HEIGHT;
    let mut canvas = vec![vec![' '; width + 1]; height + 1];

    draw_box(&mut canvas, 0, 0, width, height);

    for (i, p) in mosaic.placements.iter().enumerate() {
        let (x, y, w, h) = cell_bounds(p);
        draw_box(&mut canvas, x, y, w, h);

        let label: Vec<char> = (i + 1).to_string().chars().collect();
        let cy = y + h / 2;
        let start = (x + w / 2).saturating_sub(label.len() / 2).max(x + 1);
        for (k, &ch) in label.iter().enumerate() {
            let cx = start + k;
            if cx < x + w {
                canvas[cy][cx] = ch;
            }
        }
    }

    let mut out = String::new();
    for line in &canvas {
        let line: String = line.iter().collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn cell_bounds(p: &Placement) -> (usize, usize, usize, usize) {
    (
        (p.col as usize - 1) * CELL_WIDTH,
        (p.row as usize - 1) * CELL_HEIGHT,
        p.col_span as usize * CELL_WIDTH,
        p.row_span as usize * CELL_HEIGHT,
    )
}

fn draw_box(canvas: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    for cx in x..=x + w {
        stroke(canvas, cx, y, '-');
        stroke(canvas, cx, y + h, '-');
    }
    for cy in y..=y + h {
        stroke(canvas, x, cy, '|');
        stroke(canvas, x + w, cy, '|');
    }
}

/// Crossing strokes and corners become '+'.
fn stroke(canvas: &mut [Vec<char>], x: usize, y: usize, ch: char) {
    let Some(cell) = canvas.get_mut(y).and_then(|row| row.get_mut(x)) else {
        return;
    };
    *cell = match *cell {
        ' ' => ch,
        c if c == ch => ch,
        _ => '+',
    };
}
