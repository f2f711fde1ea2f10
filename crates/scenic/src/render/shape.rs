//! Rendering of boxes, ellipses, diamonds and text labels.
//!
//! Both renderers snap geometry to the grid and register the resulting
//! bounding box so that arrows can anchor to the element.

use log::debug;

use scenic_core::{
    geometry::BBox,
    scene::{SceneElement, SceneElementKind, TextFields},
    semantic::{Shape, ShapeKind, Text},
    style::Style,
    text,
};

use super::{RenderError, context::RenderContext};

/// Renders a box, ellipse or diamond.
pub(super) fn render_shape(
    shape: &Shape,
    ctx: &mut RenderContext<'_>,
) -> Result<SceneElement, RenderError> {
    let id = ctx.resolve_id(&shape.common, shape.kind.id_prefix())?;
    let style = ctx.resolve_style(&Style::shape_default(), &shape.common, &id)?;

    let grid = ctx.grid();
    let bbox = BBox::new(
        grid.snap(shape.x),
        grid.snap(shape.y),
        grid.snap(shape.w),
        grid.snap(shape.h),
    );
    let stamp = ctx.stamp();
    ctx.register(&id, bbox);

    let kind = match shape.kind {
        ShapeKind::Box => SceneElementKind::Rectangle,
        ShapeKind::Ellipse => SceneElementKind::Ellipse,
        ShapeKind::Diamond => SceneElementKind::Diamond,
    };

    debug!(id = id.as_str(), kind = kind.type_name(); "Rendered shape");
    Ok(SceneElement::new(id, kind, bbox, style, stamp))
}

/// Renders a free-standing text label.
///
/// The box is measured with [`text::estimate_size`] when the element
/// omits both `w` and `h`, or when the diagram forces fitting; otherwise
/// missing dimensions default to zero.
pub(super) fn render_text(
    label: &Text,
    ctx: &mut RenderContext<'_>,
) -> Result<SceneElement, RenderError> {
    if label.text.is_empty() {
        return Err(RenderError::EmptyText {
            id: label.common.id.clone(),
        });
    }

    let id = ctx.resolve_id(&label.common, "text")?;
    let style = ctx.resolve_style(&Style::text_default(), &label.common, &id)?;

    let (width, height) = if ctx.fit_text() || (label.w.is_none() && label.h.is_none()) {
        let size = text::estimate_size(&label.text, label.metrics());
        (size.width(), size.height())
    } else {
        (label.w.unwrap_or_default(), label.h.unwrap_or_default())
    };

    let grid = ctx.grid();
    let bbox = BBox::new(
        grid.snap(label.x),
        grid.snap(label.y),
        grid.snap(width),
        grid.snap(height),
    );
    let stamp = ctx.stamp();
    ctx.register(&id, bbox);

    let fields = TextFields {
        text: label.text.clone(),
        font_size: label.font_size,
        font_family: label.font_family,
        text_align: label.text_align.clone(),
        vertical_align: label.vertical_align.clone(),
        baseline: (bbox.height() - label.padding).trunc() as i64,
        container_id: None,
        original_text: label.text.clone(),
        line_height: label.line_height,
    };

    debug!(id = id.as_str(), width = bbox.width(), height = bbox.height(); "Rendered text");
    Ok(SceneElement::new(
        id,
        SceneElementKind::Text(fields),
        bbox,
        style,
        stamp,
    ))
}
