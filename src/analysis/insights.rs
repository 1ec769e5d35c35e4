use super::presenter::ResultObserver;
use super::result::{AnalysisResult, Coordinate};

/// Which region of color space a coordinate falls in, judged by its
/// largest-magnitude axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRegion {
    Red,
    LowRed,
    Green,
    LowGreen,
    Blue,
    LowBlue,
    Balanced,
}

/// Blue only counts as dominant once it is this far from the origin.
const BLUE_DOMINANCE_THRESHOLD: f64 = 2.0;

impl ColorRegion {
    pub fn classify(c: Coordinate) -> Self {
        let (ax, ay, az) = (c.x.abs(), c.y.abs(), c.z.abs());
        if ax > ay && ax > az {
            if c.x > 0.0 {
                ColorRegion::Red
            } else {
                ColorRegion::LowRed
            }
        } else if ay > az {
            if c.y > 0.0 {
                ColorRegion::Green
            } else {
                ColorRegion::LowGreen
            }
        } else if az > BLUE_DOMINANCE_THRESHOLD {
            if c.z > 0.0 {
                ColorRegion::Blue
            } else {
                ColorRegion::LowBlue
            }
        } else {
            ColorRegion::Balanced
        }
    }

    pub fn position_phrase(&self) -> &'static str {
        match self {
            ColorRegion::Red => "positive X (red) direction",
            ColorRegion::LowRed => "negative X (less red) direction",
            ColorRegion::Green => "positive Y (green) direction",
            ColorRegion::LowGreen => "negative Y (less green) direction",
            ColorRegion::Blue => "positive Z (blue) direction",
            ColorRegion::LowBlue => "negative Z (less blue) direction",
            ColorRegion::Balanced => "center",
        }
    }

    pub fn lesson(&self) -> &'static str {
        match self {
            ColorRegion::Red => "Images with strong red components (like roses, strawberries, or sunsets) cluster in this region. CNNs use this to distinguish red objects from others.",
            ColorRegion::Green => "Green-dominant images (like forests, grass, or leaves) appear here. This helps CNNs identify nature scenes and vegetation.",
            ColorRegion::Blue => "Blue-heavy images (like sky, ocean, or blue objects) are positioned here. CNNs use this to recognize water, sky, and blue items.",
            ColorRegion::Balanced => "Your image has balanced colors, appearing near the center. This often indicates complex scenes with multiple colors or neutral tones.",
            ColorRegion::LowRed => "This image has minimal red content, appearing in the cyan/blue region of color space.",
            ColorRegion::LowGreen => "Limited green content pushes this image toward the magenta region, away from natural/vegetation colors.",
            ColorRegion::LowBlue => "Low blue content places this image in the yellow region, typical of warm, sunny scenes.",
        }
    }
}

pub const CNN_CONNECTION: &str = "Real CNNs extract thousands of features like this, but instead of just colors, they detect edges, textures, shapes, and complex patterns. Each feature becomes a dimension in high-dimensional space!";
pub const TRY_NEXT: &str = "Upload images with different dominant colors to see how they cluster in different regions of the 3D space. This mimics how CNNs group similar images together!";

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub title: &'static str,
    pub text: String,
}

/// Learning panel content derived from the latest displayed result.
#[derive(Debug, Clone, Default)]
pub struct LearningInsights {
    region: Option<ColorRegion>,
    items: Vec<Insight>,
}

impl LearningInsights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, result: &AnalysisResult) {
        let region = ColorRegion::classify(result.coordinates);
        self.region = Some(region);
        self.items = vec![
            Insight {
                title: "Position Analysis",
                text: format!(
                    "Your image appears in the {} of our 3D color space.",
                    region.position_phrase()
                ),
            },
            Insight {
                title: "What This Teaches Us",
                text: region.lesson().to_string(),
            },
            Insight {
                title: "CNN Connection",
                text: CNN_CONNECTION.to_string(),
            },
            Insight {
                title: "Try Next",
                text: TRY_NEXT.to_string(),
            },
        ];
    }

    pub fn region(&self) -> Option<ColorRegion> {
        self.region
    }

    pub fn items(&self) -> &[Insight] {
        &self.items
    }
}

impl ResultObserver for LearningInsights {
    fn on_result_displayed(&mut self, result: &AnalysisResult) {
        self.update(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: f64, y: f64, z: f64) -> ColorRegion {
        ColorRegion::classify(Coordinate::new(x, y, z))
    }

    #[test]
    fn test_dominant_axis_classification() {
        assert_eq!(region(3.0, 1.0, -1.0), ColorRegion::Red);
        assert_eq!(region(-3.0, 1.0, 1.0), ColorRegion::LowRed);
        assert_eq!(region(0.5, 2.5, 1.0), ColorRegion::Green);
        assert_eq!(region(0.5, -2.5, 1.0), ColorRegion::LowGreen);
        assert_eq!(region(0.5, 1.0, 3.5), ColorRegion::Blue);
        assert_eq!(region(0.5, 1.0, -3.5), ColorRegion::LowBlue);
    }

    #[test]
    fn test_weak_blue_counts_as_balanced() {
        assert_eq!(region(0.2, 0.3, 1.5), ColorRegion::Balanced);
        assert_eq!(region(0.0, 0.0, 0.0), ColorRegion::Balanced);
    }

    #[test]
    fn test_update_builds_position_sentence() {
        let mut insights = LearningInsights::new();
        insights.on_result_displayed(&AnalysisResult::new(Coordinate::new(4.0, 1.0, 1.0), None));
        assert_eq!(insights.region(), Some(ColorRegion::Red));
        assert_eq!(insights.items().len(), 4);
        assert_eq!(
            insights.items()[0].text,
            "Your image appears in the positive X (red) direction of our 3D color space."
        );
    }

    #[test]
    fn test_cnn_connection_closes_with_exclamation() {
        let mut insights = LearningInsights::new();
        insights.update(&AnalysisResult::new(Coordinate::new(0.0, 0.0, 0.0), None));
        let connection = &insights.items()[2];
        assert_eq!(connection.title, "CNN Connection");
        assert!(connection.text.ends_with("high-dimensional space!"));
    }
}
