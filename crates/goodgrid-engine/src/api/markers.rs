use crate::paint::Rgba8;

/// One song marker: a world X and the color of its guide line.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TimeMarker {
    pub position: f32,
    pub color: Rgba8,
}

/// Song markers keyed by position, kept sorted so a visible X range is a slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeMarkers {
    markers: Vec<TimeMarker>,
}

impl TimeMarkers {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the host's comma-separated `position,type,position,type,...` string.
    ///
    /// Fewer than two entries yields an empty table; a trailing unpaired entry is
    /// ignored. Entries that are empty or not numbers read as `0` and keep their
    /// slot, so a trailing comma adds one `0` entry.
    pub fn parse(raw: &str) -> Self {
        let mut out = Self::new();
        let entries: Vec<f32> = raw
            .split(',')
            .map(|s| s.trim().parse::<f32>().unwrap_or_default())
            .collect();
        if entries.len() < 2 {
            return out;
        }

        for pair in entries.chunks_exact(2) {
            out.insert(pair[0], marker_color(pair[1]));
        }
        out
    }

    /// Inserts a marker; a marker already at `position` has its color replaced.
    pub fn insert(&mut self, position: f32, color: Rgba8) {
        match self
            .markers
            .binary_search_by(|m| m.position.total_cmp(&position))
        {
            Ok(i) => self.markers[i].color = color,
            Err(i) => self.markers.insert(i, TimeMarker { position, color }),
        }
    }

    pub fn get(&self, position: f32) -> Option<Rgba8> {
        self.markers
            .binary_search_by(|m| m.position.total_cmp(&position))
            .ok()
            .map(|i| self.markers[i].color)
    }

    /// Markers with `min <= position <= max`, ascending.
    pub fn in_range(&self, min: f32, max: f32) -> &[TimeMarker] {
        let start = self.markers.partition_point(|m| m.position < min);
        let end = self.markers.partition_point(|m| m.position <= max);
        if start >= end {
            return &[];
        }
        &self.markers[start..end]
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TimeMarker> {
        self.markers.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

/// Guide color for a marker type value.
///
/// | type                 | color            |
/// |----------------------|------------------|
/// | `0.9`                | `127,255,0,255`  |
/// | `1.0`                | `255,255,0,255`  |
/// | `>= 0.8` or `0`      | `255,127,0,255`  |
/// | anything else        | transparent      |
pub fn marker_color(kind: f32) -> Rgba8 {
    if kind == 0.9 {
        Rgba8::new(127, 255, 0, 255)
    } else if kind == 1.0 {
        Rgba8::new(255, 255, 0, 255)
    } else if kind >= 0.8 || kind == 0.0 {
        Rgba8::new(255, 127, 0, 255)
    } else {
        Rgba8::transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mapping() {
        assert_eq!(marker_color(0.9), Rgba8::new(127, 255, 0, 255));
        assert_eq!(marker_color(1.0), Rgba8::new(255, 255, 0, 255));
        assert_eq!(marker_color(0.85), Rgba8::new(255, 127, 0, 255));
        assert_eq!(marker_color(0.0), Rgba8::new(255, 127, 0, 255));
        assert_eq!(marker_color(0.5), Rgba8::transparent());
    }

    #[test]
    fn parse_pairs() {
        let m = TimeMarkers::parse("300,0.9,150,1,600,0.5,");
        assert_eq!(m.len(), 3);
        let positions: Vec<f32> = m.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![150.0, 300.0, 600.0]);
        assert_eq!(m.get(300.0), Some(Rgba8::new(127, 255, 0, 255)));
        assert_eq!(m.get(600.0), Some(Rgba8::transparent()));
    }

    #[test]
    fn parse_short_or_garbage() {
        assert!(TimeMarkers::parse("").is_empty());
        assert!(TimeMarkers::parse("120").is_empty());
        // "abc" reads as 0 → orange marker at 0
        let m = TimeMarkers::parse("abc,abc");
        assert_eq!(m.get(0.0), Some(Rgba8::new(255, 127, 0, 255)));
    }

    #[test]
    fn empty_entry_keeps_its_slot() {
        // pairs (100, 0) and (200, 1)
        let m = TimeMarkers::parse("100,,200,1");
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(100.0), Some(Rgba8::new(255, 127, 0, 255)));
        assert_eq!(m.get(200.0), Some(Rgba8::new(255, 255, 0, 255)));
    }

    #[test]
    fn repeated_position_replaces_color() {
        let m = TimeMarkers::parse("100,0.9,100,1");
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(100.0), Some(Rgba8::new(255, 255, 0, 255)));
    }

    #[test]
    fn range_is_inclusive() {
        let m = TimeMarkers::parse("0,1,30,1,60,1,90,1");
        let xs: Vec<f32> = m.in_range(30.0, 60.0).iter().map(|t| t.position).collect();
        assert_eq!(xs, vec![30.0, 60.0]);
        assert!(m.in_range(61.0, 89.0).is_empty());
        assert!(m.in_range(100.0, 0.0).is_empty());
    }
}
