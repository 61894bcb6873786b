use crate::error::LayoutError;
use crate::grid::OccupancyGrid;
use crate::pattern::select_span;
use crate::planner::plan_grid;
use crate::types::{Mosaic, MosaicConfig, Photo, Placement, Span, Viewport};

pub struct MosaicBuilder {
    config: MosaicConfig,
}

impl MosaicBuilder {
    pub fn new(config: MosaicConfig) -> Self {
        Self { config }
    }

    /// Places every photo, in input order, onto a grid sized for the
    /// viewport. The result has one placement per photo and the final
    /// (possibly expanded) grid size.
    pub fn assemble(&self, photos: &[Photo], viewport: Viewport) -> Result<Mosaic, LayoutError> {
        if photos.is_empty() {
            return Ok(Mosaic::empty());
        }
        self.config.validate()?;
        viewport.validate()?;

        let (cols, rows) = plan_grid(photos.len(), viewport, &self.config);
        tracing::debug!(photos = photos.len(), %viewport, cols, rows, "planned mosaic grid");

        let mut grid = OccupancyGrid::new(cols, rows);
        let placements = photos
            .iter()
            .map(|photo| {
                let placement = self.place(&mut grid, photo);
                grid.occupy(&placement);
                placement
            })
            .collect();

        Ok(Mosaic {
            placements,
            grid_cols: grid.cols(),
            grid_rows: grid.rows(),
        })
    }

    fn place(&self, grid: &mut OccupancyGrid, photo: &Photo) -> Placement {
        let preferred = select_span(photo, &self.config);
        if let Some(p) = grid.find_fit(preferred) {
            return p;
        }
        if let Some(p) = grid.find_fit(Span::UNIT) {
            return p;
        }

        let rows = grid.expand();
        tracing::debug!(photo = %photo.id, rows, "grid full, added a row");
        match grid.find_fit(Span::UNIT) {
            Some(p) => p,
            // the new row is empty and cols >= 1
            None => unreachable!("no free cell after expanding to {rows} rows"),
        }
    }
}

/// Lays out `photos` with the default heuristic constants.
pub fn generate_mosaic(photos: &[Photo], viewport: Viewport) -> Result<Mosaic, LayoutError> {
    MosaicBuilder::new(MosaicConfig::default()).assemble(photos, viewport)
}
