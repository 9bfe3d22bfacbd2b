use crate::model::ElementKind;

/// Closed zoom brackets, coarsest first. A boundary value belongs to the earlier bracket.
pub const ZOOM_THRESHOLDS: [(ElementKind, f64, f64); 5] = [
    (ElementKind::Landscape, 0.0, 0.2),
    (ElementKind::System, 0.2, 0.4),
    (ElementKind::Container, 0.4, 0.6),
    (ElementKind::Component, 0.6, 0.8),
    (ElementKind::Code, 0.8, 1.0),
];

/// Map a zoom factor to the hierarchy level to render. Input is clamped to [0, 1];
/// NaN maps to the root level.
pub fn semantic_zoom_level(zoom: f64) -> ElementKind {
    if zoom.is_nan() {
        return ElementKind::Landscape;
    }
    let zoom = zoom.clamp(0.0, 1.0);
    ZOOM_THRESHOLDS
        .iter()
        .find(|(_, min, max)| zoom >= *min && zoom <= *max)
        .map(|(kind, _, _)| *kind)
        .unwrap_or(ElementKind::Landscape)
}

/// The bracket that renders `kind`.
pub fn zoom_range(kind: ElementKind) -> (f64, f64) {
    ZOOM_THRESHOLDS
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|(_, min, max)| (*min, *max))
        .unwrap_or((0.0, 0.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets() {
        assert_eq!(semantic_zoom_level(0.0), ElementKind::Landscape);
        assert_eq!(semantic_zoom_level(0.2), ElementKind::Landscape);
        assert_eq!(semantic_zoom_level(0.25), ElementKind::System);
        assert_eq!(semantic_zoom_level(0.4), ElementKind::System);
        assert_eq!(semantic_zoom_level(0.5), ElementKind::Container);
        assert_eq!(semantic_zoom_level(0.79), ElementKind::Component);
        assert_eq!(semantic_zoom_level(0.85), ElementKind::Code);
        assert_eq!(semantic_zoom_level(1.0), ElementKind::Code);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(semantic_zoom_level(-3.0), ElementKind::Landscape);
        assert_eq!(semantic_zoom_level(42.0), ElementKind::Code);
        assert_eq!(semantic_zoom_level(f64::INFINITY), ElementKind::Code);
        assert_eq!(semantic_zoom_level(f64::NEG_INFINITY), ElementKind::Landscape);
        assert_eq!(semantic_zoom_level(f64::NAN), ElementKind::Landscape);
    }

    #[test]
    fn level_never_decreases_as_zoom_grows() {
        let mut previous = ElementKind::Landscape;
        for step in 0..=1000 {
            let level = semantic_zoom_level(step as f64 / 1000.0);
            assert!(level >= previous, "zoom {step}/1000 went back to {level}");
            previous = level;
        }
        assert_eq!(previous, ElementKind::Code);
    }

    #[test]
    fn ranges_cover_each_kind() {
        assert_eq!(zoom_range(ElementKind::Container), (0.4, 0.6));
        for kind in ElementKind::ALL {
            let (min, max) = zoom_range(kind);
            assert_eq!(semantic_zoom_level(max), kind);
            assert!(min < max);
        }
    }
}
