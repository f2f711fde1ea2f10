//! Compilation of a validated [`Diagram`] into a [`Scene`].
//!
//! Rendering runs in two passes over the element list. The first pass
//! renders every shape and text element in declaration order, registering
//! their bounding boxes, and leaves a placeholder slot for each arrow. The
//! second pass fills the arrow slots, so an arrow may reference an element
//! declared anywhere in the document.

mod arrow;
mod context;
mod error;
mod shape;

pub use error::{RenderError, RenderErrorKind};

use log::{debug, info};

use scenic_core::{
    scene::{Scene, SceneElement},
    semantic::{Arrow, Diagram, Element},
};

use context::RenderContext;

/// An output position: either already rendered or waiting on the registry.
enum Slot<'a> {
    Rendered(SceneElement),
    Deferred(&'a Arrow),
}

/// Compiles `diagram` into a scene.
///
/// `start_time` freezes the base of the synthetic `updated` timestamps
/// (milliseconds since the Unix epoch). With `None` the wall clock is read
/// once, and the output is deterministic apart from `updated`.
///
/// # Errors
///
/// Returns the first [`RenderError`] encountered; no partial scene is
/// produced.
///
/// # Examples
///
/// ```
/// use scenic::{
///     compile,
///     semantic::{Diagram, Element, Shape, ShapeKind},
/// };
///
/// let diagram = Diagram::new(vec![Element::Shape(Shape::new(
///     ShapeKind::Box,
///     0.0,
///     0.0,
///     100.0,
///     60.0,
/// ))]);
///
/// let scene = compile(&diagram, Some(0)).expect("Failed to compile");
/// assert_eq!(scene.elements()[0].id(), "box-1");
/// ```
pub fn compile(diagram: &Diagram, start_time: Option<i64>) -> Result<Scene, RenderError> {
    info!(elements = diagram.elements().len(), grid = diagram.grid(); "Compiling diagram");

    let mut ctx = RenderContext::new(diagram, start_time);

    let mut slots = Vec::with_capacity(diagram.elements().len());
    for element in diagram.elements() {
        let slot = match element {
            Element::Shape(shape) => Slot::Rendered(shape::render_shape(shape, &mut ctx)?),
            Element::Text(text) => Slot::Rendered(shape::render_text(text, &mut ctx)?),
            Element::Arrow(arrow) => Slot::Deferred(arrow),
        };
        slots.push(slot);
    }

    debug!(
        deferred = slots.iter().filter(|slot| matches!(slot, Slot::Deferred(_))).count();
        "Shapes rendered, resolving arrows"
    );

    let elements = slots
        .into_iter()
        .map(|slot| match slot {
            Slot::Rendered(element) => Ok(element),
            Slot::Deferred(arrow) => arrow::render_arrow(arrow, &mut ctx),
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!(elements = elements.len(); "Diagram compiled");
    Ok(Scene::new(elements))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use float_cmp::assert_approx_eq;

    use scenic_core::{
        geometry::Side,
        semantic::{ArrowEndpoint, Common, Shape, ShapeKind, Text},
        style::{StyleOverrides, StylePresets},
    };

    use super::*;

    fn boxed(id: &str, x: f64, y: f64) -> Element {
        Element::Shape(
            Shape::new(ShapeKind::Box, x, y, 100.0, 60.0)
                .with_common(Common::default().with_id(id)),
        )
    }

    fn arrow(from: &str, to: &str) -> Element {
        Element::Arrow(Arrow::new(
            ArrowEndpoint::new(from, Side::Right),
            ArrowEndpoint::new(to, Side::Left),
        ))
    }

    #[test]
    fn test_forward_reference() {
        let diagram = Diagram::new(vec![
            arrow("a", "b"),
            boxed("a", 0.0, 0.0),
            boxed("b", 200.0, 0.0),
        ]);

        let scene = compile(&diagram, Some(0)).unwrap();

        let ids: Vec<_> = scene.elements().iter().map(SceneElement::id).collect();
        assert_eq!(ids, vec!["arrow-3", "a", "b"]);
        let arrow = &scene.elements()[0];
        assert_approx_eq!(f64, arrow.x(), 100.0);
        assert_approx_eq!(f64, arrow.width(), 100.0);
    }

    #[test]
    fn test_declaration_order_preserved() {
        let diagram = Diagram::new(vec![
            boxed("a", 0.0, 0.0),
            arrow("a", "b"),
            Element::Text(Text::new("label").with_common(Common::default().with_id("t"))),
            boxed("b", 200.0, 0.0),
        ]);

        let scene = compile(&diagram, Some(0)).unwrap();

        let types: Vec<_> = scene
            .elements()
            .iter()
            .map(SceneElement::type_name)
            .collect();
        assert_eq!(types, vec!["rectangle", "arrow", "text", "rectangle"]);
    }

    #[test]
    fn test_unique_seeds_and_generated_ids() {
        let shape = |kind| Element::Shape(Shape::new(kind, 0.0, 0.0, 10.0, 10.0));
        let diagram = Diagram::new(vec![
            shape(ShapeKind::Box),
            shape(ShapeKind::Ellipse),
            shape(ShapeKind::Diamond),
            Element::Text(Text::new("hello")),
            boxed("a", 0.0, 0.0),
            arrow("a", "a"),
        ]);

        let scene = compile(&diagram, Some(0)).unwrap();

        let seeds: HashSet<_> = scene.elements().iter().map(SceneElement::seed).collect();
        assert_eq!(seeds.len(), scene.len());

        let ids: Vec<_> = scene.elements().iter().map(SceneElement::id).collect();
        assert_eq!(
            ids,
            vec!["box-1", "ellipse-3", "diamond-5", "text-7", "a", "arrow-10"]
        );
    }

    #[test]
    fn test_timestamps_strictly_increase() {
        let diagram = Diagram::new(vec![
            boxed("a", 0.0, 0.0),
            boxed("b", 200.0, 0.0),
            arrow("a", "b"),
        ]);

        let scene = compile(&diagram, Some(1_700_000_000_000)).unwrap();

        let updated: Vec<_> = scene.elements().iter().map(SceneElement::updated).collect();
        assert!(updated.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(updated[0], 1_700_000_000_001);
    }

    #[test]
    fn test_deterministic_with_frozen_start_time() {
        let diagram = Diagram::new(vec![
            arrow("a", "b"),
            boxed("a", 0.0, 0.0),
            boxed("b", 200.0, 0.0),
        ]);

        assert_eq!(
            compile(&diagram, Some(42)).unwrap(),
            compile(&diagram, Some(42)).unwrap()
        );
    }

    #[test]
    fn test_unknown_reference_fails() {
        let diagram = Diagram::new(vec![boxed("a", 0.0, 0.0), arrow("a", "ghost")]);

        let err = compile(&diagram, Some(0)).unwrap_err();

        assert!(err.is_reference_error());
        assert!(matches!(err, RenderError::UnresolvedReference { target, .. } if target == "ghost"));
    }

    #[test]
    fn test_arrow_cannot_reference_arrow() {
        let diagram = Diagram::new(vec![
            boxed("a", 0.0, 0.0),
            boxed("b", 200.0, 0.0),
            Element::Arrow(
                Arrow::new(
                    ArrowEndpoint::new("a", Side::Right),
                    ArrowEndpoint::new("b", Side::Left),
                )
                .with_common(Common::default().with_id("link")),
            ),
            arrow("a", "link"),
        ]);

        let err = compile(&diagram, Some(0)).unwrap_err();

        assert_eq!(err.kind(), RenderErrorKind::Reference);
    }

    #[test]
    fn test_unknown_preset_fails() {
        let diagram = Diagram::new(vec![Element::Shape(
            Shape::new(ShapeKind::Box, 0.0, 0.0, 10.0, 10.0)
                .with_common(Common::default().with_style("missing")),
        )]);

        let err = compile(&diagram, Some(0)).unwrap_err();

        assert_eq!(err.to_string(), "element `box-1` uses unknown style preset `missing`");
    }

    #[test]
    fn test_style_cascade() {
        let mut presets = StylePresets::new();
        presets.insert(
            "primary".to_string(),
            StyleOverrides::new()
                .with_stroke_color("#1971c2")
                .with_background_color("#a5d8ff"),
        );
        let diagram = Diagram::new(vec![Element::Shape(
            Shape::new(ShapeKind::Box, 0.0, 0.0, 10.0, 10.0).with_common(
                Common::default()
                    .with_style("primary")
                    .with_style_overrides(StyleOverrides::new().with_background_color("#ffec99")),
            ),
        )])
        .with_styles(presets);

        let scene = compile(&diagram, Some(0)).unwrap();

        let style = scene.elements()[0].style();
        assert_eq!(style.stroke_color(), "#1971c2");
        assert_eq!(style.background_color(), "#ffec99");
        assert_eq!(style.fill_style(), "solid");
        assert_eq!(style.stroke_width(), 2.0);
        assert_eq!(style.opacity(), 100.0);
    }

    #[test]
    fn test_empty_text_aborts_compilation() {
        let diagram = Diagram::new(vec![boxed("a", 0.0, 0.0), Element::Text(Text::new(""))]);

        let err = compile(&diagram, Some(0)).unwrap_err();

        assert_eq!(err.kind(), RenderErrorKind::Content);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let diagram = Diagram::new(vec![boxed("a", 0.0, 0.0), boxed("a", 200.0, 0.0)]);

        let err = compile(&diagram, Some(0)).unwrap_err();

        assert_eq!(err, RenderError::DuplicateId { id: "a".to_string() });
    }

    mod proptests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn seeds_and_ids_are_unique(
                boxes in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..20),
                arrows in 0usize..10,
            ) {
                let mut elements: Vec<Element> = boxes
                    .iter()
                    .map(|&(x, y)| Element::Shape(Shape::new(ShapeKind::Box, x, y, 40.0, 40.0)))
                    .collect();
                for _ in 0..arrows {
                    elements.push(Element::Arrow(Arrow::new(
                        ArrowEndpoint::new("box-1", Side::Right),
                        ArrowEndpoint::new("box-1", Side::Left),
                    )));
                }
                let diagram = Diagram::new(elements);

                let scene = compile(&diagram, Some(0)).unwrap();

                let seeds: HashSet<_> = scene.elements().iter().map(SceneElement::seed).collect();
                let ids: HashSet<_> = scene.elements().iter().map(SceneElement::id).collect();
                prop_assert_eq!(seeds.len(), scene.len());
                prop_assert_eq!(ids.len(), scene.len());
            }
        }
    }
}
