//! Rendering of arrows between anchored endpoints.

use log::debug;

use scenic_core::{
    geometry::{BBox, Point},
    scene::{ArrowFields, SceneElement, SceneElementKind},
    semantic::{Arrow, ArrowEndpoint},
    style::Style,
};

use super::{RenderError, context::RenderContext};

/// Renders an arrow whose endpoints are already registered.
///
/// The element's `x`/`y` is the snapped start anchor and its
/// `width`/`height` the displacement to the snapped end anchor.
pub(super) fn render_arrow(
    arrow: &Arrow,
    ctx: &mut RenderContext<'_>,
) -> Result<SceneElement, RenderError> {
    let id = ctx.resolve_id(&arrow.common, "arrow")?;
    let style = ctx.resolve_style(&Style::shape_default(), &arrow.common, &id)?;

    let start = anchor(&arrow.from, &id, ctx)?;
    let end = anchor(&arrow.to, &id, ctx)?;
    let delta = end.sub_point(start);

    let stamp = ctx.stamp();
    let bbox = BBox::new(start.x(), start.y(), delta.x(), delta.y());

    debug!(
        id = id.as_str(),
        from = arrow.from.target.as_str(),
        to = arrow.to.target.as_str();
        "Rendered arrow"
    );
    Ok(SceneElement::new(
        id,
        SceneElementKind::Arrow(ArrowFields::straight(delta)),
        bbox,
        style,
        stamp,
    ))
}

fn anchor(
    endpoint: &ArrowEndpoint,
    arrow_id: &str,
    ctx: &RenderContext<'_>,
) -> Result<Point, RenderError> {
    let bbox = ctx
        .lookup(&endpoint.target)
        .ok_or_else(|| RenderError::UnresolvedReference {
            arrow: arrow_id.to_string(),
            target: endpoint.target.clone(),
        })?;
    Ok(ctx.grid().snap_point(bbox.anchor(endpoint.side)))
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use scenic_core::{
        geometry::Side,
        scene::{Arrowhead, Roundness},
        semantic::{Common, Diagram},
    };

    use super::*;

    fn arrow(from: (&str, Side), to: (&str, Side)) -> Arrow {
        Arrow::new(
            ArrowEndpoint::new(from.0, from.1),
            ArrowEndpoint::new(to.0, to.1),
        )
    }

    #[test]
    fn test_arrow_between_boxes() {
        let diagram = Diagram::new(Vec::new());
        let mut ctx = RenderContext::new(&diagram, Some(0));
        ctx.register("a", BBox::new(0.0, 0.0, 100.0, 60.0));
        ctx.register("b", BBox::new(200.0, 0.0, 100.0, 60.0));

        let element =
            render_arrow(&arrow(("a", Side::Right), ("b", Side::Left)), &mut ctx).unwrap();

        assert_eq!(element.id(), "arrow-1");
        assert_eq!(element.type_name(), "arrow");
        assert_approx_eq!(f64, element.x(), 100.0);
        assert_approx_eq!(f64, element.y(), 30.0);
        assert_approx_eq!(f64, element.width(), 100.0);
        assert_approx_eq!(f64, element.height(), 0.0);
        assert_eq!(element.roundness(), Some(Roundness::PROPORTIONAL));

        let fields = element.arrow().unwrap();
        assert_eq!(fields.points, vec![[0.0, 0.0], [100.0, 0.0]]);
        assert_eq!(fields.start_arrowhead, None);
        assert_eq!(fields.end_arrowhead, Some(Arrowhead::Arrow));
    }

    #[test]
    fn test_anchors_snap_independently() {
        let diagram = Diagram::new(Vec::new());
        let mut ctx = RenderContext::new(&diagram, Some(0));
        // Center at (15, 15), bottom at (15, 30)
        ctx.register("a", BBox::new(0.0, 0.0, 30.0, 30.0));
        ctx.register("b", BBox::new(50.0, 70.0, 10.0, 10.0));

        let element =
            render_arrow(&arrow(("a", Side::Center), ("b", Side::Top)), &mut ctx).unwrap();

        // 15 rounds half-to-even to 20; (55, 70) snaps to (60, 70)
        assert_approx_eq!(f64, element.x(), 20.0);
        assert_approx_eq!(f64, element.y(), 20.0);
        assert_approx_eq!(f64, element.width(), 40.0);
        assert_approx_eq!(f64, element.height(), 50.0);
    }

    #[test]
    fn test_unresolved_reference() {
        let diagram = Diagram::new(Vec::new());
        let mut ctx = RenderContext::new(&diagram, Some(0));
        ctx.register("a", BBox::new(0.0, 0.0, 10.0, 10.0));

        let err = render_arrow(&arrow(("a", Side::Right), ("ghost", Side::Left)), &mut ctx)
            .unwrap_err();

        assert_eq!(
            err,
            RenderError::UnresolvedReference {
                arrow: "arrow-1".to_string(),
                target: "ghost".to_string()
            }
        );
        assert!(err.is_reference_error());
    }

    #[test]
    fn test_explicit_arrow_id() {
        let diagram = Diagram::new(Vec::new());
        let mut ctx = RenderContext::new(&diagram, Some(0));
        ctx.register("a", BBox::new(0.0, 0.0, 10.0, 10.0));
        let arrow = arrow(("a", Side::Center), ("a", Side::Center))
            .with_common(Common::default().with_id("self"));

        let element = render_arrow(&arrow, &mut ctx).unwrap();

        assert_eq!(element.id(), "self");
        assert_eq!(element.seed(), 1);
        assert_approx_eq!(f64, element.width(), 0.0);
    }
}
