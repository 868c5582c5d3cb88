use crate::format_info::FormatInfo;
use crate::interface::LayoutInfo;
use folio_idf::Element;

/// One placement of an element on one area.
///
/// An element split across areas produces one record per area.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord<'a> {
    pub element: &'a Element,
    pub format_info: FormatInfo<'a>,
    pub layout_info: LayoutInfo,
}

impl<'a> RenderRecord<'a> {
    pub fn new(element: &'a Element, format_info: FormatInfo<'a>, layout_info: LayoutInfo) -> Self {
        Self {
            element,
            format_info,
            layout_info,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.format_info.is_empty()
    }

    /// Drops the trailing unit of the placement and shrinks the content area to match.
    pub fn remove_ending(&mut self) {
        let area = &mut self.layout_info.content_area;
        match self.format_info.remove_ending() {
            Some(removed) if !self.format_info.is_empty() => {
                area.height = (area.height - removed).max(0.0);
            }
            _ => area.height = 0.0,
        }
    }

    /// Whether this record places a piece of `element`.
    pub fn belongs_to(&self, element: &Element) -> bool {
        std::ptr::eq(self.element, element)
    }

    /// Top of the record including its top margin.
    pub fn outer_top(&self) -> f32 {
        self.layout_info.content_area.y - self.layout_info.margin_top
    }

    /// Bottom of the record including its bottom margin.
    pub fn outer_bottom(&self) -> f32 {
        self.layout_info.content_area.bottom() + self.layout_info.margin_bottom
    }
}

/// Vertical extent of a sequence of records, from the top margin of the first
/// to the bottom margin of the last. Zero for no records.
pub fn total_height(records: &[RenderRecord<'_>]) -> f32 {
    match (records.first(), records.last()) {
        (Some(first), Some(last)) => (last.outer_bottom() - first.outer_top()).max(0.0),
        _ => 0.0,
    }
}
