use crate::config::LayoutConfig;
use crate::format_info::FormatInfo;
use crate::painting::canvas::Canvas;
use crate::render_record::RenderRecord;
use crate::text::TextMeasurer;
use crate::LayoutError;
use folio_types::{Point, Rect};

// --- Layout Hints ---

/// Whether an element takes part in the top-to-bottom flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Floating {
    /// Occupies the full width of its band; following content goes below it.
    #[default]
    TopBottom,
    /// Positioned without affecting the flow.
    None,
}

/// What an element's vertical position is measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerticalReference {
    #[default]
    PreviousElement,
    AreaTop,
    Page,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ElementAlignment {
    #[default]
    Near,
    Center,
    Far,
}

/// Placement of one formatted piece of an element inside an area.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutInfo {
    pub content_area: Rect,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub keep_together: bool,
    pub keep_with_next: bool,
    pub floating: Floating,
    pub vertical_reference: VerticalReference,
    /// Height of the first unsplittable unit (a line, a row group).
    pub starting_height: f32,
    /// Height of the last unsplittable unit.
    pub trailing_height: f32,
    pub horizontal_alignment: ElementAlignment,
    /// Horizontal offset applied when aligning near.
    pub left: f32,
    pub min_width: f32,
    pub page_break_before: bool,
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self {
            content_area: Rect::default(),
            margin_top: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            margin_right: 0.0,
            keep_together: false,
            keep_with_next: false,
            floating: Floating::TopBottom,
            vertical_reference: VerticalReference::PreviousElement,
            starting_height: 0.0,
            trailing_height: 0.0,
            horizontal_alignment: ElementAlignment::Near,
            left: 0.0,
            min_width: 0.0,
            page_break_before: false,
        }
    }
}

impl LayoutInfo {
    /// True when the element is stacked below its predecessor, so margins
    /// collapse between the two and the area shrinks by its height.
    pub fn flows_with_previous(&self) -> bool {
        self.vertical_reference == VerticalReference::PreviousElement
            && self.floating != Floating::None
    }
}

/// Values for the fields that text may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfos {
    pub page_number: usize,
    pub section_number: usize,
}

impl Default for FieldInfos {
    fn default() -> Self {
        Self {
            page_number: 1,
            section_number: 1,
        }
    }
}

// --- Collaborator Contracts ---

/// Supplies drawable areas to the flow driver and receives what was placed on them.
pub trait AreaSource<'a> {
    /// Hands out the next area, committing to it. `None` once exhausted.
    fn next_area(&mut self) -> Option<Rect>;

    /// The area `next_area` would return, without committing to it.
    fn probe_next_area(&self) -> Option<Rect>;

    /// Receives the records placed on the current area.
    fn store_render_records(&mut self, records: Vec<RenderRecord<'a>>);

    /// Replaces the most recently stored record. Used when the ending of an
    /// element already placed on an earlier area is pulled onto the current one.
    /// An empty replacement removes the record.
    fn replace_last_record(&mut self, record: RenderRecord<'a>);

    /// Applies area-anchored vertical placement. Returns whether it moved anything.
    fn position_vertically(&self, layout: &mut LayoutInfo) -> bool;

    /// Applies horizontal alignment. Returns whether it moved anything.
    fn position_horizontally(&self, layout: &mut LayoutInfo) -> bool;

    fn is_area_break_before(&self, layout: &LayoutInfo) -> bool;

    fn field_infos(&self) -> FieldInfos;
}

/// The capability every element renderer provides to the flow driver.
pub trait ElementRenderer<'a> {
    /// Layout hints known before formatting: margins and keep flags.
    fn initial_layout_info(&self) -> LayoutInfo;

    /// Formats as much of the element as fits into `area`, continuing after
    /// `previous` when the element was partially placed on an earlier area.
    fn format(
        &mut self,
        env: &LayoutEnvironment,
        area: Rect,
        previous: Option<&FormatInfo<'a>>,
    ) -> Result<RenderRecord<'a>, LayoutError>;

    /// Draws a record this renderer's element produced, shifted by `offset`.
    fn render(
        &self,
        record: &RenderRecord<'a>,
        canvas: &mut dyn Canvas,
        offset: Point,
    ) -> Result<(), LayoutError>;

    /// The tallest piece the element may produce; taller content is clamped.
    fn set_max_element_height(&mut self, height: f32);
}

// --- Environment ---

/// Read-only environment data shared across a layout pass.
#[derive(Clone, Copy)]
pub struct LayoutEnvironment<'e> {
    pub config: &'e LayoutConfig,
    pub measurer: &'e dyn TextMeasurer,
    /// Table nesting depth of the flow being formatted; 0 at the top level.
    pub depth: usize,
    /// Usable height of the section's pages; 0 means unbounded.
    pub usable_height: f32,
}

impl<'e> LayoutEnvironment<'e> {
    pub fn new(config: &'e LayoutConfig, measurer: &'e dyn TextMeasurer, usable_height: f32) -> Self {
        Self {
            config,
            measurer,
            depth: 0,
            usable_height,
        }
    }

    /// The environment for the content of a table cell one level down.
    pub fn nested(&self) -> Result<Self, LayoutError> {
        let depth = self.depth + 1;
        if depth > self.config.max_nesting_depth {
            return Err(LayoutError::NestingTooDeep {
                depth,
                limit: self.config.max_nesting_depth,
            });
        }
        Ok(Self { depth, ..*self })
    }

    pub fn tolerance(&self) -> f32 {
        self.config.tolerance
    }
}
