use crate::types::{MosaicConfig, Photo, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternClass {
    Landscape,
    Portrait,
    Square,
}

impl PatternClass {
    /// Landscape wins over portrait; anything in between is square.
    pub fn classify(aspect: f64, config: &MosaicConfig) -> Self {
        if aspect > config.landscape_above {
            PatternClass::Landscape
        } else if aspect < config.portrait_below {
            PatternClass::Portrait
        } else {
            PatternClass::Square
        }
    }

    pub fn span(self) -> Span {
        match self {
            PatternClass::Landscape => Span::new(1, 2),
            PatternClass::Portrait => Span::new(2, 1),
            PatternClass::Square => Span::new(2, 2),
        }
    }
}

pub fn select_span(photo: &Photo, config: &MosaicConfig) -> Span {
    PatternClass::classify(photo.aspect_ratio(), config).span()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_of(w: f64, h: f64) -> PatternClass {
        PatternClass::classify(Photo::new("p", w, h).aspect_ratio(), &MosaicConfig::default())
    }

    #[test]
    fn test_classes() {
        assert_eq!(class_of(2000.0, 1000.0), PatternClass::Landscape);
        assert_eq!(class_of(1000.0, 2000.0), PatternClass::Portrait);
        assert_eq!(class_of(1000.0, 1000.0), PatternClass::Square);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        assert_eq!(class_of(1300.0, 1000.0), PatternClass::Square);
        assert_eq!(class_of(700.0, 1000.0), PatternClass::Square);
        assert_eq!(class_of(1301.0, 1000.0), PatternClass::Landscape);
        assert_eq!(class_of(699.0, 1000.0), PatternClass::Portrait);
    }

    #[test]
    fn test_spans() {
        let config = MosaicConfig::default();
        assert_eq!(select_span(&Photo::new("l", 2.0, 1.0), &config), Span::new(1, 2));
        assert_eq!(select_span(&Photo::new("p", 1.0, 2.0), &config), Span::new(2, 1));
        assert_eq!(select_span(&Photo::new("s", 1.0, 1.0), &config), Span::new(2, 2));
    }

    #[test]
    fn test_bad_dimensions_are_square() {
        let config = MosaicConfig::default();
        let photo = Photo {
            id: "x".to_string(),
            width: None,
            height: None,
        };
        assert_eq!(select_span(&photo, &config), Span::new(2, 2));
        assert_eq!(select_span(&Photo::new("z", 640.0, 0.0), &config), Span::new(2, 2));
    }
}
