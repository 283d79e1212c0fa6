use sketchkit_core::{Error, Point, ShapeError};
use sketchkit_designer::{Paint, Pattern, PropertyValue, Shape, Style};

fn names(shape: &Shape) -> Vec<String> {
    shape.properties().into_iter().map(|p| p.name).collect()
}

fn value(shape: &Shape, name: &str) -> Option<PropertyValue> {
    shape
        .properties()
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| p.value)
}

#[test]
fn test_rect_property_list() {
    let rect = Shape::rect(10.0, 20.0, 30.0, 40.0).with_style(Style::filled("#ff0000", "#000000", 2.0));
    assert_eq!(
        names(&rect),
        vec!["X", "Y", "Width", "Height", "Rotation", "Transparency", "LineWidth", "Fill", "Stroke"]
    );
    assert_eq!(value(&rect, "Width"), Some(PropertyValue::Number(30.0)));
    assert_eq!(value(&rect, "Transparency"), Some(PropertyValue::Number(100.0)));
    assert_eq!(
        value(&rect, "Fill"),
        Some(PropertyValue::String("#ff0000".to_string()))
    );
}

#[test]
fn test_non_solid_fill_is_not_listed() {
    let rect = Shape::rect(0.0, 0.0, 5.0, 5.0).with_style(Style {
        fill: Some(Paint::Pattern(Pattern {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 255],
            repetition: Default::default(),
        })),
        ..Style::default()
    });
    assert!(!names(&rect).contains(&"Fill".to_string()));
}

#[test]
fn test_set_position_and_size() {
    let mut rect = Shape::rect(10.0, 20.0, 30.0, 40.0);
    rect.set_property("X", PropertyValue::Number(5.0)).unwrap();
    rect.set_property("Y", PropertyValue::Number(6.0)).unwrap();
    rect.set_property("Width", PropertyValue::Number(12.0)).unwrap();
    rect.set_property("Height", PropertyValue::Number(8.0)).unwrap();

    assert_eq!(rect.position(), Point::new(5.0, 6.0));
    assert_eq!(rect.width(), 12.0);
    assert_eq!(rect.height(), 8.0);
}

#[test]
fn test_vertex_shape_width_scales_from_left() {
    let mut line = Shape::line(0.0, 0.0, 100.0, 50.0);
    line.set_property("Width", PropertyValue::Number(50.0)).unwrap();
    let b = line.bounds();
    assert_eq!(b.min, Point::new(0.0, 0.0));
    assert_eq!(b.max, Point::new(50.0, 50.0));
}

#[test]
fn test_transparency_is_a_percentage() {
    let mut rect = Shape::rect(0.0, 0.0, 10.0, 10.0);
    rect.set_property("Transparency", PropertyValue::Number(25.0)).unwrap();
    assert_eq!(rect.style.transparency, 0.25);

    let err = rect
        .set_property("Transparency", PropertyValue::Number(150.0))
        .unwrap_err();
    assert!(err.is_property_error());
    assert_eq!(rect.style.transparency, 0.25);
}

#[test]
fn test_unsupported_key_is_rejected() {
    let mut line = Shape::line(0.0, 0.0, 10.0, 10.0);
    let err = line
        .set_property("Radius", PropertyValue::Number(3.0))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Shape(ShapeError::UnsupportedProperty { .. })
    ));
}

#[test]
fn test_read_only_vertex_count_is_rejected() {
    let mut polygon = Shape::polygon(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(5.0, 8.0),
    ]);
    assert_eq!(value(&polygon, "VertexCount"), Some(PropertyValue::Number(3.0)));
    assert!(polygon
        .set_property("VertexCount", PropertyValue::Number(5.0))
        .is_err());
}

#[test]
fn test_non_finite_value_is_rejected() {
    let mut circle = Shape::circle(0.0, 0.0, 5.0);
    let err = circle
        .set_property("Radius", PropertyValue::Number(f64::NAN))
        .unwrap_err();
    assert!(matches!(err, Error::Shape(ShapeError::InvalidValue { .. })));
    assert_eq!(value(&circle, "Radius"), Some(PropertyValue::Number(5.0)));
}

#[test]
fn test_circle_height_sets_diameter() {
    let mut circle = Shape::circle(40.0, 40.0, 5.0);
    circle
        .set_property("Height", PropertyValue::Number(30.0))
        .unwrap();
    assert_eq!(value(&circle, "Radius"), Some(PropertyValue::Number(15.0)));
    assert_eq!(circle.position(), Point::new(40.0, 40.0));
}

#[test]
fn test_star_spikes() {
    let mut star = Shape::star(50.0, 50.0, 5, 10.0, 20.0);
    star.set_property("Spikes", PropertyValue::Number(8.0)).unwrap();
    assert_eq!(value(&star, "Spikes"), Some(PropertyValue::Number(8.0)));

    assert!(star.set_property("Spikes", PropertyValue::Number(1.0)).is_err());
    assert!(star.set_property("Spikes", PropertyValue::Number(6.5)).is_err());
    assert_eq!(value(&star, "Spikes"), Some(PropertyValue::Number(8.0)));
}

#[test]
fn test_fill_string_sets_and_clears() {
    let mut circle = Shape::circle(0.0, 0.0, 5.0);
    circle
        .set_property("Fill", PropertyValue::String("#00ff00".to_string()))
        .unwrap();
    assert_eq!(circle.style.fill, Some(Paint::solid("#00ff00")));

    circle
        .set_property("Fill", PropertyValue::String(String::new()))
        .unwrap();
    assert!(circle.style.fill.is_none());

    assert!(circle
        .set_property("Radius", PropertyValue::String("big".to_string()))
        .is_err());
}

#[test]
fn test_star_width_scales_both_radii_about_center() {
    let mut star = Shape::star(50.0, 50.0, 5, 10.0, 20.0);
    star.set_property("Width", PropertyValue::Number(80.0)).unwrap();
    assert_eq!(value(&star, "OuterRadius"), Some(PropertyValue::Number(40.0)));
    assert_eq!(value(&star, "InnerRadius"), Some(PropertyValue::Number(20.0)));
    assert_eq!(star.position(), Point::new(50.0, 50.0));
    assert!(star.set_property("Height", PropertyValue::Number(0.0)).is_err());
}
