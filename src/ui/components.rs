/// Reusable UI components

use crate::segment::Segment;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SegmentRowProps {
    pub index: usize,
    pub segment: Segment,
    pub on_delete: Callback<usize>,
}

/// `✕ [0:07] Intro` with the name linking to the segment start
#[function_component(SegmentRow)]
pub fn segment_row(props: &SegmentRowProps) -> Html {
    let segment = &props.segment;

    // Fall back to the stored URL if it no longer parses
    let href = segment
        .start_link()
        .unwrap_or_else(|_| segment.url.clone());

    let on_delete = {
        let index = props.index;
        props.on_delete.reform(move |_: MouseEvent| index)
    };

    html! {
        <div class="segment-item">
            <button class="delete-btn" title="Delete segment" onclick={on_delete}>
                {"✕"}
            </button>
            <span class="segment-duration">{segment.duration_label()}</span>
            <a class="segment-link" href={href} target="_blank">
                {&segment.name}
            </a>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SegmentListProps {
    /// Segments with their position in the stored list
    pub segments: Vec<(usize, Segment)>,
    pub on_delete: Callback<usize>,
}

#[function_component(SegmentList)]
pub fn segment_list(props: &SegmentListProps) -> Html {
    if props.segments.is_empty() {
        return html! {
            <div class="no-segments">{"No segments saved"}</div>
        };
    }

    html! {
        <div class="segment-list">
            {for props.segments.iter().map(|(index, segment)| html! {
                <SegmentRow
                    key={*index}
                    index={*index}
                    segment={segment.clone()}
                    on_delete={props.on_delete.clone()}
                />
            })}
        </div>
    }
}
