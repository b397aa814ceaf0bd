//! Frame filtering of page furniture.

use crate::model::{Frame, LayoutObject, ObjectKind};

/// Decide whether a layout object belongs to the page content.
///
/// With a frame, the object must lie entirely inside it; an object that
/// straddles the frame edge is dropped whole. With a kind list, the object's
/// kind must be in it. Either check is skipped when not configured.
pub fn is_relevant(
    obj: &LayoutObject,
    frame: Option<&Frame>,
    content_kinds: Option<&[ObjectKind]>,
) -> bool {
    let in_frame = frame.map_or(true, |f| f.contains(obj.bbox()));
    let has_content = content_kinds.map_or(true, |kinds| kinds.contains(&obj.kind()));
    in_frame && has_content
}
