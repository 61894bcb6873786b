use crate::types::{MosaicConfig, Viewport};

/// Picks a starting `(cols, rows)` so each photo gets roughly one square
/// cell of the viewport. Both counts are clamped independently into
/// `[min_cells, max_cells]`; rows may still grow during placement.
pub fn plan_grid(photo_count: usize, viewport: Viewport, config: &MosaicConfig) -> (u32, u32) {
    if photo_count == 0 {
        return (1, 1);
    }

    let cell_area = viewport.area() / (photo_count as f64 * config.density);
    let cell_side = cell_area.sqrt();

    let cols = clamp_cells(viewport.width / cell_side, config);
    let rows = clamp_cells(viewport.height / cell_side, config);
    (cols, rows)
}

fn clamp_cells(fit: f64, config: &MosaicConfig) -> u32 {
    // `as` saturates, NaN becomes 0
    (fit.floor() as u32).clamp(config.min_cells, config.max_cells)
}
