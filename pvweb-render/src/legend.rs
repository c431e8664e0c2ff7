//! Color legends built from colormap records.

use glam::Vec2;
use pvweb_format::ColorMapDescriptor;

/// Fixed legend height in pixels.
pub const LEGEND_HEIGHT: f32 = 30.0;

/// Normalized lookup table: one `[r, g, b, value]` entry per color stop,
/// channels in [0, 1].
#[derive(Clone, Debug, PartialEq)]
pub struct LookupTable {
    pub entries: Vec<[f32; 4]>,
}

impl LookupTable {
    pub fn from_colormap(colormap: &ColorMapDescriptor) -> Self {
        let entries = colormap
            .colors
            .iter()
            .map(|stop| {
                [
                    f32::from(stop.rgb[0]) / 255.0,
                    f32::from(stop.rgb[1]) / 255.0,
                    f32::from(stop.rgb[2]) / 255.0,
                    stop.value,
                ]
            })
            .collect();
        Self { entries }
    }

    /// Smallest and largest scalar value covered by the table.
    pub fn range(&self) -> Option<[f32; 2]> {
        self.entries.iter().map(|e| e[3]).fold(None, |acc, v| match acc {
            None => Some([v, v]),
            Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
        })
    }
}

/// Where and how a legend is drawn, in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendLayout {
    /// Bottom-left corner; z is always 0.
    pub position: [f32; 3],
    pub width: f32,
    pub height: f32,
    pub label_count: u8,
    pub orientation: u8,
}

impl LegendLayout {
    /// Place `colormap` inside a `viewport` of `[width, height]` pixels.
    ///
    /// The record's position is normalized with y measured from the top;
    /// the legend is anchored so its top edge sits on that line.
    pub fn from_colormap(colormap: &ColorMapDescriptor, viewport: Vec2, height: f32) -> Self {
        let [px, py] = colormap.position;
        Self {
            position: [px * viewport.x, (1.0 - py) * viewport.y - height, 0.0],
            width: colormap.size[0] * viewport.x,
            height,
            label_count: colormap.label_count,
            orientation: colormap.orientation,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendWidget {
    pub title: String,
    pub lookup_table: LookupTable,
    pub layout: LegendLayout,
}

/// Builds the legend a colormap record turns into.
pub trait LegendFactory {
    fn create_color_legend(&mut self, title: &str, lookup_table: LookupTable, layout: LegendLayout) -> LegendWidget;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BasicLegendFactory;

impl LegendFactory for BasicLegendFactory {
    fn create_color_legend(&mut self, title: &str, lookup_table: LookupTable, layout: LegendLayout) -> LegendWidget {
        LegendWidget {
            title: title.to_string(),
            lookup_table,
            layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvweb_format::ColorStop;

    fn colormap() -> ColorMapDescriptor {
        ColorMapDescriptor {
            position: [0.25, 0.5],
            size: [0.5, 0.1],
            colors: vec![
                ColorStop { value: -1.0, rgb: [0, 0, 255] },
                ColorStop { value: 1.0, rgb: [255, 0, 0] },
            ],
            orientation: 1,
            label_count: 5,
            title: "Pressure".into(),
        }
    }

    #[test]
    fn test_legend_placement() {
        let layout = LegendLayout::from_colormap(&colormap(), Vec2::new(800.0, 600.0), LEGEND_HEIGHT);
        assert_eq!(layout.position, [200.0, 270.0, 0.0]);
        assert_eq!(layout.width, 400.0);
        assert_eq!(layout.height, 30.0);
        assert_eq!(layout.label_count, 5);
        assert_eq!(layout.orientation, 1);
    }

    #[test]
    fn test_basic_factory_keeps_inputs() {
        let cm = colormap();
        let layout = LegendLayout::from_colormap(&cm, Vec2::new(100.0, 100.0), LEGEND_HEIGHT);
        let widget = BasicLegendFactory.create_color_legend(&cm.title, LookupTable::from_colormap(&cm), layout);
        assert_eq!(widget.title, "Pressure");
        assert_eq!(widget.layout, layout);
        assert_eq!(widget.lookup_table.entries.len(), 2);
    }

    #[test]
    fn test_lookup_table_normalized() {
        let lut = LookupTable::from_colormap(&colormap());
        assert_eq!(lut.entries, vec![[0.0, 0.0, 1.0, -1.0], [1.0, 0.0, 0.0, 1.0]]);
        assert_eq!(lut.range(), Some([-1.0, 1.0]));
    }
}
