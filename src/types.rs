use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LayoutError;

/// Accepts photo ids given either as JSON strings or numbers.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        UInt(u64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::UInt(n) => n.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

/// Reads a photo side leniently: numbers and numeric strings are kept,
/// anything else becomes `None` so the photo falls back to the square class.
pub fn deserialize_dimension<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDimension {
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match RawDimension::deserialize(deserializer)? {
        RawDimension::Number(n) => Some(n),
        RawDimension::Text(s) => s.trim().parse::<f64>().ok(),
        RawDimension::Other(_) => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_dimension")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_dimension")]
    pub height: Option<f64>,
}

impl Photo {
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Width over height, or 1.0 when either side is missing or unusable.
    pub fn aspect_ratio(&self) -> f64 {
        match (self.width, self.height) {
            (Some(w), Some(h)) if is_positive(w) && is_positive(h) => w / h,
            _ => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if is_positive(self.width) && is_positive(self.height) {
            Ok(())
        } else {
            Err(LayoutError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// Extent of a region in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub rows: u32,
    pub cols: u32,
}

impl Span {
    pub const UNIT: Span = Span { rows: 1, cols: 1 };

    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn cells(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A 1-indexed anchor plus extent. The region covers rows
/// `row..row_end()` and columns `col..col_end()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub row: u32,
    pub col: u32,
    pub row_span: u32,
    pub col_span: u32,
}

impl Placement {
    pub fn new(row: u32, col: u32, span: Span) -> Self {
        Self {
            row,
            col,
            row_span: span.rows,
            col_span: span.cols,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.row_span, self.col_span)
    }

    pub fn row_end(&self) -> u32 {
        self.row + self.row_span
    }

    pub fn col_end(&self) -> u32 {
        self.col + self.col_span
    }

    pub fn covers(&self, row: u32, col: u32) -> bool {
        (self.row..self.row_end()).contains(&row) && (self.col..self.col_end()).contains(&col)
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        self.row < other.row_end()
            && other.row < self.row_end()
            && self.col < other.col_end()
            && other.col < self.col_end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mosaic {
    pub placements: Vec<Placement>,
    pub grid_cols: u32,
    pub grid_rows: u32,
}

impl Mosaic {
    pub fn empty() -> Self {
        Self {
            placements: vec![],
            grid_cols: 1,
            grid_rows: 1,
        }
    }

    pub fn cell_count(&self) -> u64 {
        self.grid_cols as u64 * self.grid_rows as u64
    }

    /// Share of grid cells covered by some placement, in percent.
    pub fn fill_percent(&self) -> f64 {
        let total = self.cell_count();
        if total == 0 {
            return 0.0;
        }
        let used: u64 = self.placements.iter().map(|p| p.span().cells()).sum();
        used as f64 / total as f64 * 100.0
    }
}

/// Ceiling for `max_cells`. The occupancy grid allocates one slot per
/// cell, so the starting grid must stay small.
pub const MAX_CELLS_LIMIT: u32 = 256;

fn default_density() -> f64 {
    0.9
}

fn default_min_cells() -> u32 {
    3
}

fn default_max_cells() -> u32 {
    12
}

fn default_landscape_above() -> f64 {
    1.3
}

fn default_portrait_below() -> f64 {
    0.7
}

/// Tunables of the layout heuristic. The defaults are empirical and
/// changing them changes the visual output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicConfig {
    /// Divides the per-photo area; below 1.0 leaves spare cells for packing.
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default = "default_min_cells")]
    pub min_cells: u32,
    #[serde(default = "default_max_cells")]
    pub max_cells: u32,
    #[serde(default = "default_landscape_above")]
    pub landscape_above: f64,
    #[serde(default = "default_portrait_below")]
    pub portrait_below: f64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            density: default_density(),
            min_cells: default_min_cells(),
            max_cells: default_max_cells(),
            landscape_above: default_landscape_above(),
            portrait_below: default_portrait_below(),
        }
    }
}

impl MosaicConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !is_positive(self.density) {
            return Err(LayoutError::InvalidConfig(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        if self.min_cells == 0 {
            return Err(LayoutError::InvalidConfig(
                "min_cells must be at least 1".to_string(),
            ));
        }
        if self.max_cells > MAX_CELLS_LIMIT {
            return Err(LayoutError::InvalidConfig(format!(
                "max_cells {} exceeds the limit of {}",
                self.max_cells, MAX_CELLS_LIMIT
            )));
        }
        if self.min_cells > self.max_cells {
            return Err(LayoutError::InvalidConfig(format!(
                "min_cells {} exceeds max_cells {}",
                self.min_cells, self.max_cells
            )));
        }
        if !self.landscape_above.is_finite()
            || !self.portrait_below.is_finite()
            || self.portrait_below > self.landscape_above
        {
            return Err(LayoutError::InvalidConfig(format!(
                "portrait_below {} must not exceed landscape_above {}",
                self.portrait_below, self.landscape_above
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(Photo::new("a", 1000.0, 500.0).aspect_ratio(), 2.0);
        assert_eq!(Photo::new("b", 500.0, 1000.0).aspect_ratio(), 0.5);
    }

    #[test]
    fn test_aspect_ratio_falls_back_to_square() {
        assert_eq!(Photo::new("zero", 800.0, 0.0).aspect_ratio(), 1.0);
        assert_eq!(Photo::new("neg", -3.0, 100.0).aspect_ratio(), 1.0);
        assert_eq!(Photo::new("nan", f64::NAN, 100.0).aspect_ratio(), 1.0);
        let missing = Photo {
            id: "missing".to_string(),
            width: Some(400.0),
            height: None,
        };
        assert_eq!(missing.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_viewport_validate() {
        assert!(Viewport::new(1200.0, 800.0).validate().is_ok());
        assert_eq!(
            Viewport::new(0.0, 800.0).validate(),
            Err(LayoutError::InvalidViewport {
                width: 0.0,
                height: 800.0
            })
        );
        assert!(Viewport::new(1200.0, -1.0).validate().is_err());
        assert!(Viewport::new(f64::INFINITY, 800.0).validate().is_err());
    }

    #[test]
    fn test_placement_overlap() {
        let a = Placement::new(1, 1, Span::new(2, 2));
        let b = Placement::new(2, 2, Span::new(1, 1));
        let c = Placement::new(1, 3, Span::new(2, 1));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.covers(2, 2));
        assert!(!a.covers(3, 1));
    }

    #[test]
    fn test_fill_percent() {
        let mosaic = Mosaic {
            placements: vec![
                Placement::new(1, 1, Span::new(1, 2)),
                Placement::new(2, 1, Span::new(1, 1)),
            ],
            grid_cols: 2,
            grid_rows: 2,
        };
        assert!((mosaic.fill_percent() - 75.0).abs() < 0.01);
        assert_eq!(Mosaic::empty().fill_percent(), 0.0);
    }

    #[test]
    fn test_config_validate() {
        assert!(MosaicConfig::default().validate().is_ok());
        let bad_density = MosaicConfig {
            density: 0.0,
            ..Default::default()
        };
        assert!(bad_density.validate().is_err());
        let inverted = MosaicConfig {
            min_cells: 8,
            max_cells: 4,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
        let no_cells = MosaicConfig {
            min_cells: 0,
            ..Default::default()
        };
        assert!(no_cells.validate().is_err());
    }

    #[test]
    fn test_config_rejects_huge_grid() {
        let huge = MosaicConfig {
            min_cells: 200_000,
            max_cells: 200_000,
            ..Default::default()
        };
        assert!(matches!(huge.validate(), Err(LayoutError::InvalidConfig(_))));

        let wide_only = MosaicConfig {
            max_cells: MAX_CELLS_LIMIT + 1,
            ..Default::default()
        };
        assert!(wide_only.validate().is_err());

        let at_limit = MosaicConfig {
            min_cells: MAX_CELLS_LIMIT,
            max_cells: MAX_CELLS_LIMIT,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_config_json_keys() {
        let config: MosaicConfig =
            serde_json::from_str(r#"{"minCells": 1, "maxCells": 4, "landscapeAbove": 1.5}"#)
                .unwrap();
        assert_eq!(config.min_cells, 1);
        assert_eq!(config.max_cells, 4);
        assert_eq!(config.landscape_above, 1.5);
        assert_eq!(config.density, 0.9);

        let json = serde_json::to_value(MosaicConfig::default()).unwrap();
        assert_eq!(json["minCells"], 3);
        assert_eq!(json["portraitBelow"], 0.7);
    }

    #[test]
    fn test_photo_json_lenient_dimensions() {
        let photos: Vec<Photo> = serde_json::from_str(
            r#"[
                {"id": 1, "width": "800", "height": "600"},
                {"id": 2, "width": "wide", "height": true},
                {"id": 3, "width": null, "height": {"px": 5}}
            ]"#,
        )
        .unwrap();
        assert_eq!(photos[0].width, Some(800.0));
        assert_eq!(photos[0].height, Some(600.0));
        assert_eq!(photos[1].width, None);
        assert_eq!(photos[1].height, None);
        assert_eq!(photos[1].aspect_ratio(), 1.0);
        assert_eq!(photos[2].width, None);
        assert_eq!(photos[2].height, None);
    }

    #[test]
    fn test_photo_json_large_numeric_id() {
        let photo: Photo = serde_json::from_str(r#"{"id": 18446744073709551615}"#).unwrap();
        assert_eq!(photo.id, "18446744073709551615");
    }

    #[test]
    fn test_photo_json_ids() {
        let photos: Vec<Photo> = serde_json::from_str(
            r#"[{"id": 42, "width": 800, "height": 600}, {"id": "abc"}]"#,
        )
        .unwrap();
        assert_eq!(photos[0].id, "42");
        assert_eq!(photos[0].width, Some(800.0));
        assert_eq!(photos[1].id, "abc");
        assert_eq!(photos[1].height, None);
    }

    #[test]
    fn test_mosaic_json_shape() {
        let mosaic = Mosaic {
            placements: vec![Placement::new(1, 3, Span::new(2, 1))],
            grid_cols: 3,
            grid_rows: 3,
        };
        let json = serde_json::to_value(&mosaic).unwrap();
        assert_eq!(json["gridCols"], 3);
        assert_eq!(json["placements"][0]["rowSpan"], 2);
        assert_eq!(json["placements"][0]["colSpan"], 1);
    }
}
