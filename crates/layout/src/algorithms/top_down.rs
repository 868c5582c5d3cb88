//! The top-down flow driver.
//!
//! Walks a sequence of elements, asks an [`AreaSource`] for areas and decides
//! per element whether it fits, must move to the next area, or continues on
//! the next area after a partial placement.

use crate::algorithms::pagination::margin_max;
use crate::interface::{AreaSource, ElementRenderer, FieldInfos, LayoutEnvironment};
use crate::nodes::RenderNode;
use crate::render_record::RenderRecord;
use crate::LayoutError;
use folio_idf::Element;
use folio_types::{Rect, UNBOUNDED};
use log::{debug, trace, warn};

/// Where a flow pass stopped: the element to continue with and, if that
/// element was partially placed, the record of its last placement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowCursor<'a> {
    pub index: usize,
    pub pending: Option<RenderRecord<'a>>,
}

impl<'a> FlowCursor<'a> {
    pub fn start() -> Self {
        Self::default()
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0 && self.pending.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowOutcome<'a> {
    pub cursor: FlowCursor<'a>,
    /// All elements were placed. When false the area source ran out of areas
    /// and `cursor` tells where to resume.
    pub finished: bool,
}

impl<'a> FlowOutcome<'a> {
    fn finished(index: usize) -> Self {
        Self {
            cursor: FlowCursor {
                index,
                pending: None,
            },
            finished: true,
        }
    }

    fn exhausted(index: usize, pending: Option<RenderRecord<'a>>) -> Self {
        Self {
            cursor: FlowCursor { index, pending },
            finished: false,
        }
    }
}

/// Per-area bookkeeping of a pass.
struct AreaState {
    area: Rect,
    max_height: f32,
    prev_bottom_margin: f32,
    first_on_area: bool,
    pulled_ending: bool,
}

impl AreaState {
    fn new(area: Rect) -> Self {
        Self {
            area,
            max_height: area.height,
            prev_bottom_margin: 0.0,
            first_on_area: true,
            pulled_ending: false,
        }
    }
}

pub struct TopDownFormatter<'a, 'e> {
    elements: &'a [Element],
    env: LayoutEnvironment<'e>,
}

impl<'a, 'e> TopDownFormatter<'a, 'e> {
    pub fn new(elements: &'a [Element], env: LayoutEnvironment<'e>) -> Self {
        Self { elements, env }
    }

    /// Places elements onto the areas of `source`, starting at `cursor`.
    pub fn format_on_areas(
        &self,
        source: &mut dyn AreaSource<'a>,
        cursor: FlowCursor<'a>,
    ) -> Result<FlowOutcome<'a>, LayoutError> {
        let FlowCursor { mut index, pending } = cursor;
        if index >= self.elements.len() {
            return Ok(FlowOutcome::finished(index));
        }

        let mut previous = pending.filter(|record| {
            let belongs = record.belongs_to(&self.elements[index]);
            if !belongs {
                warn!("Dropping a pending record that does not belong to element {}.", index);
            }
            belongs
        });

        let Some(first_area) = source.next_area() else {
            debug!("No area available for element {}.", index);
            return Ok(FlowOutcome::exhausted(index, previous));
        };
        let mut state = AreaState::new(first_area);
        let mut batch: Vec<RenderRecord<'a>> = Vec::new();

        while index < self.elements.len() {
            let element = &self.elements[index];
            let fields = source.field_infos();
            let mut renderer = RenderNode::create(element, fields);
            renderer.set_max_element_height(state.max_height);

            // Elements outside the flow leave the collapsed margin for the next one.
            if previous.is_none() {
                let initial = renderer.initial_layout_info();
                if initial.flows_with_previous() {
                    let distance = margin_max(initial.margin_top, state.prev_bottom_margin);
                    state.area = state.area.lower(distance);
                    state.prev_bottom_margin = 0.0;
                }
            }

            let mut record = renderer.format(
                &self.env,
                state.area,
                previous.as_ref().map(|r| &r.format_info),
            )?;
            source.position_horizontally(&mut record.layout_info);

            let break_before = !state.first_on_area
                && (source.is_area_break_before(&record.layout_info)
                    || self.is_forced_area_break(index, &record, &state, fields)?);

            if !break_before && record.format_info.is_ending() {
                if !state.pulled_ending
                    && self.previous_needs_remove_ending(previous.as_ref(), &record, source)
                {
                    if let Some(prev) = previous.as_mut() {
                        prev.remove_ending();
                        debug!(
                            "Pulling the ending of element {} over from the previous area.",
                            index
                        );
                        source.replace_last_record(prev.clone());
                    }
                    state.pulled_ending = true;
                    continue;
                }

                if self.needs_ending_on_next_area(index, &record, &state, fields)? {
                    record.remove_ending();
                    debug!("Moving the ending of element {} to the next area.", index);
                    previous = Self::finish_area(record, false, previous, &mut batch, source);
                    match source.next_area() {
                        Some(next) => state = AreaState::new(next),
                        None => return Ok(FlowOutcome::exhausted(index, previous)),
                    }
                    continue;
                }

                source.position_vertically(&mut record.layout_info);
                if record.layout_info.flows_with_previous() {
                    state.prev_bottom_margin = record.layout_info.margin_bottom;
                    state.area = state.area.lower(record.layout_info.content_area.height);
                    state.first_on_area = false;
                }
                trace!(
                    "Placed element {} ({}) at y={:.2}, height {:.2}.",
                    index,
                    element.kind(),
                    record.layout_info.content_area.y,
                    record.layout_info.content_area.height
                );
                batch.push(record);
                previous = None;
                index += 1;
                continue;
            }

            if record.is_empty() && state.first_on_area {
                record = self.format_overflowing(element, &state, previous.as_ref(), fields, source)?;
                if record.is_empty() {
                    warn!(
                        "Element {} ({}) does not fit on an empty area; skipping it.",
                        index,
                        element.kind()
                    );
                    previous = None;
                    index += 1;
                    continue;
                }
                warn!(
                    "Element {} ({}) is taller than its area; placing it overflowing.",
                    index,
                    element.kind()
                );
                let ending = record.format_info.is_ending();
                previous = Self::finish_area(record, false, previous, &mut batch, source);
                if ending {
                    index += 1;
                }
            } else {
                previous = Self::finish_area(record, break_before, previous, &mut batch, source);
            }

            if index >= self.elements.len() {
                return Ok(FlowOutcome::finished(index));
            }
            match source.next_area() {
                Some(next) => {
                    debug!("Element {} continues on a new area.", index);
                    state = AreaState::new(next);
                }
                None => return Ok(FlowOutcome::exhausted(index, previous)),
            }
        }

        source.store_render_records(batch);
        Ok(FlowOutcome::finished(index))
    }

    /// Closes the current area: stores its batch and returns the record the
    /// next area continues from, if any.
    ///
    /// An empty placement or one deferred by a forced break adds nothing, so
    /// whatever was pending before stays pending.
    fn finish_area(
        record: RenderRecord<'a>,
        break_before: bool,
        previous: Option<RenderRecord<'a>>,
        batch: &mut Vec<RenderRecord<'a>>,
        source: &mut dyn AreaSource<'a>,
    ) -> Option<RenderRecord<'a>> {
        let pending = if record.is_empty() || break_before {
            previous
        } else if record.format_info.is_ending() {
            batch.push(record);
            None
        } else {
            batch.push(record.clone());
            Some(record)
        };
        source.store_render_records(std::mem::take(batch));
        pending
    }

    /// Reformats an element that produced nothing although it is first on its
    /// area, against the area grown to the page's usable height.
    fn format_overflowing(
        &self,
        element: &'a Element,
        state: &AreaState,
        previous: Option<&RenderRecord<'a>>,
        fields: FieldInfos,
        source: &mut dyn AreaSource<'a>,
    ) -> Result<RenderRecord<'a>, LayoutError> {
        let usable = self.env.usable_height.max(0.0);
        let height = if usable == 0.0 { UNBOUNDED } else { usable };
        let area = state.area;
        let enlarged = area.unite(&Rect::new(area.x, area.y, area.width, height));

        let mut renderer = RenderNode::create(element, fields);
        renderer.set_max_element_height(enlarged.height);
        let mut record =
            renderer.format(&self.env, enlarged, previous.map(|r| &r.format_info))?;
        source.position_horizontally(&mut record.layout_info);
        source.position_vertically(&mut record.layout_info);
        Ok(record)
    }

    fn is_forced_area_break(
        &self,
        index: usize,
        record: &RenderRecord<'a>,
        state: &AreaState,
        fields: FieldInfos,
    ) -> Result<bool, LayoutError> {
        let format = &record.format_info;
        let layout = &record.layout_info;

        if format.is_starting() && !format.starting_is_complete() {
            return Ok(true);
        }
        if layout.keep_together && !format.is_complete() {
            return Ok(true);
        }
        if layout.keep_together && layout.keep_with_next {
            let remaining = state.area.lower(layout.content_area.height);
            return self.next_elements_dont_fit(
                index,
                remaining,
                layout.margin_bottom,
                state.max_height,
                fields,
            );
        }
        Ok(false)
    }

    /// Whether the incomplete ending of `record` should instead take over the
    /// last unit of the placement on the previous area.
    fn previous_needs_remove_ending(
        &self,
        previous: Option<&RenderRecord<'a>>,
        record: &RenderRecord<'a>,
        source: &dyn AreaSource<'a>,
    ) -> bool {
        let Some(prev) = previous else {
            return false;
        };
        if prev.is_empty() {
            return false;
        }
        let format = &record.format_info;
        if format.is_ending() && !format.ending_is_complete() {
            if let Some(next) = source.probe_next_area() {
                return next.height
                    > prev.layout_info.trailing_height
                        + record.layout_info.trailing_height
                        + self.env.tolerance();
            }
        }
        false
    }

    fn needs_ending_on_next_area(
        &self,
        index: usize,
        record: &RenderRecord<'a>,
        state: &AreaState,
        fields: FieldInfos,
    ) -> Result<bool, LayoutError> {
        let format = &record.format_info;
        let layout = &record.layout_info;

        // Moving a whole element off an area it starts would leave the area empty.
        if state.first_on_area && (layout.keep_together || format.is_starting()) {
            return Ok(false);
        }
        if !format.ending_is_complete() {
            return Ok(false);
        }
        if state.first_on_area {
            let mut trimmed = format.clone();
            if trimmed.remove_ending().is_none() || trimmed.is_empty() {
                return Ok(false);
            }
        }
        if layout.keep_with_next {
            let remaining = state.area.lower(layout.content_area.height);
            return self.next_elements_dont_fit(
                index,
                remaining,
                layout.margin_bottom,
                state.max_height,
                fields,
            );
        }
        Ok(false)
    }

    /// Tentatively formats the elements after `index` into `area` and reports
    /// whether the chain that must stay with element `index` fails to fit.
    ///
    /// Looks at no more than `max_combine_elements` elements and assumes the
    /// rest fits.
    pub(crate) fn next_elements_dont_fit(
        &self,
        index: usize,
        area: Rect,
        previous_margin_bottom: f32,
        max_height: f32,
        fields: FieldInfos,
    ) -> Result<bool, LayoutError> {
        let mut distance = previous_margin_bottom;
        let mut area = area;

        for next in index + 1..self.elements.len() {
            if next - index > self.env.config.max_combine_elements {
                trace!("Lookahead from element {} stopped at its bound.", index);
                return Ok(false);
            }
            let mut renderer = RenderNode::create(&self.elements[next], fields);
            renderer.set_max_element_height(max_height);
            let initial = renderer.initial_layout_info();
            if !initial.flows_with_previous() {
                return Ok(false);
            }

            distance = margin_max(distance, initial.margin_top);
            area = area.lower(distance);
            if area.height <= 0.0 {
                return Ok(true);
            }

            let record = renderer.format(&self.env, area, None)?;
            let format = &record.format_info;
            let layout = &record.layout_info;
            if !format.starting_is_complete() {
                return Ok(true);
            }
            if layout.keep_together && !format.is_complete() {
                return Ok(true);
            }
            if !(layout.keep_together && layout.keep_with_next) {
                return Ok(false);
            }
            area = area.lower(layout.content_area.height);
            if area.height <= 0.0 {
                return Ok(true);
            }
            distance = layout.margin_bottom;
        }
        Ok(false)
    }
}
