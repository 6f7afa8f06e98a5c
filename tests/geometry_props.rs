//! Property tests for the viewport-fitting math.

use layout_reactome_rs::{bounding_box, centering_offset, fit_scale, Canvas, Entity, EntityKind, Point, Size, Transform};
use proptest::prelude::*;

fn entity_strategy() -> impl Strategy<Value = Entity> {
    (0.0..5000.0f64, 0.0..5000.0f64, 1.0..400.0f64, 1.0..400.0f64).prop_map(|(x, y, w, h)| {
        Entity::new("e", "R", EntityKind::Protein, Point::new(x, y), Size::new(w, h))
    })
}

fn canvas_strategy() -> impl Strategy<Value = Canvas> {
    (50.0..2000.0f64, 50.0..2000.0f64).prop_map(|(w, h)| Canvas::new(w, h))
}

proptest! {
    #[test]
    fn bounding_box_contains_every_extent(entities in prop::collection::vec(entity_strategy(), 1..40)) {
        let bbox = bounding_box(&entities).unwrap();
        for entity in &entities {
            prop_assert!(bbox.min_width <= entity.position.x);
            prop_assert!(bbox.min_height <= entity.position.y);
            prop_assert!(entity.position.x + entity.size.width <= bbox.width);
            prop_assert!(entity.position.y + entity.size.height <= bbox.height);
        }
    }

    #[test]
    fn fitted_content_stays_on_canvas(
        entities in prop::collection::vec(entity_strategy(), 1..40),
        canvas in canvas_strategy(),
        damping in 0.1..=1.0f64,
    ) {
        let bbox = bounding_box(&entities).unwrap();
        let transform = Transform::fit(&bbox, canvas, damping).unwrap();
        let top_left = transform.map_point(Point::new(bbox.min_width, bbox.min_height));
        let bottom_right = transform.map_point(Point::new(bbox.width, bbox.height));
        let eps = 1e-6;
        prop_assert!(top_left.x >= -eps && top_left.y >= -eps);
        prop_assert!(bottom_right.x <= canvas.width + eps);
        prop_assert!(bottom_right.y <= canvas.height + eps);
    }

    #[test]
    fn centering_is_symmetric(
        entities in prop::collection::vec(entity_strategy(), 1..10),
        canvas in canvas_strategy(),
    ) {
        let bbox = bounding_box(&entities).unwrap();
        let scale = fit_scale(&bbox, canvas).unwrap();
        let offset = centering_offset(&bbox, canvas, scale);
        let right_margin = canvas.width - bbox.content_width() * scale - offset.x;
        let bottom_margin = canvas.height - bbox.content_height() * scale - offset.y;
        prop_assert!((right_margin - offset.x).abs() < 1e-6);
        prop_assert!((bottom_margin - offset.y).abs() < 1e-6);
    }

    #[test]
    fn fit_is_deterministic(
        entities in prop::collection::vec(entity_strategy(), 1..10),
        canvas in canvas_strategy(),
    ) {
        let bbox = bounding_box(&entities).unwrap();
        prop_assert_eq!(Transform::fit(&bbox, canvas, 0.9), Transform::fit(&bbox, canvas, 0.9));
    }
}
