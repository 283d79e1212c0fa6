use sketchkit_core::{Point, Shared};
use sketchkit_designer::{
    Color, EditorSession, Figure, Gradient, GradientStop, Paint, Painter, PixmapSurface, Shape,
    Style,
};
use sketchkit_settings::Config;
use std::rc::Rc;

const WHITE: Color = Color::rgb(255, 255, 255);
const RED: Color = Color::rgb(255, 0, 0);

fn red(shape: Shape) -> Shape {
    shape.with_style(Style::filled("#ff0000", "#000000", 1.0))
}

fn render(session: &EditorSession, width: u32, height: u32) -> PixmapSurface {
    let mut surface = PixmapSurface::new(width, height).unwrap();
    surface.fill_background("#ffffff");
    let mut painter = Painter::new(surface);
    session.render(&mut painter);
    painter.into_surface()
}

fn session_with(shapes: Vec<Shape>) -> (EditorSession, Vec<Shared<Shape>>) {
    let mut figure = Figure::new();
    let handles = shapes.into_iter().map(|s| figure.add(s)).collect();
    (EditorSession::with_figure(figure, &Config::default()), handles)
}

#[test]
fn test_figure_renders_over_background() {
    let (session, _) = session_with(vec![red(Shape::rect(10.0, 10.0, 30.0, 20.0))]);
    let surface = render(&session, 64, 64);

    assert_eq!(surface.pixel(20, 20), Some(RED));
    assert_eq!(surface.pixel(5, 5), Some(WHITE));
    assert_eq!(surface.pixel(50, 50), Some(WHITE));
}

#[test]
fn test_later_shapes_cover_earlier_ones() {
    let (session, _) = session_with(vec![
        red(Shape::rect(0.0, 0.0, 40.0, 40.0)),
        Shape::circle(20.0, 20.0, 10.0).with_style(Style::filled("#0000ff", "#0000ff", 1.0)),
    ]);
    let surface = render(&session, 64, 64);

    assert_eq!(surface.pixel(20, 20), Some(Color::rgb(0, 0, 255)));
    assert_eq!(surface.pixel(3, 3), Some(RED));
}

#[test]
fn test_rotated_rect_is_rasterised_rotated() {
    // 100x10 bar centered at (50, 25) turned upright.
    let (session, _) = session_with(vec![
        red(Shape::rect(0.0, 20.0, 100.0, 10.0)).with_rotation(90.0)
    ]);
    let surface = render(&session, 100, 100);

    assert_eq!(surface.pixel(50, 60), Some(RED));
    assert_eq!(surface.pixel(50, 5), Some(RED));
    assert_eq!(surface.pixel(10, 25), Some(WHITE));
    assert_eq!(surface.pixel(90, 25), Some(WHITE));
}

#[test]
fn test_transparency_blends_with_background() {
    let mut shape = red(Shape::rect(0.0, 0.0, 20.0, 20.0));
    shape.style.transparency = 0.5;
    let (session, _) = session_with(vec![shape]);
    let surface = render(&session, 32, 32);

    let p = surface.pixel(10, 10).unwrap();
    assert_eq!(p.r, 255);
    assert!((126..=130).contains(&p.g), "green was {}", p.g);
    assert!((126..=130).contains(&p.b), "blue was {}", p.b);
}

#[test]
fn test_linear_gradient_runs_along_its_axis() {
    let shape = Shape::rect(0.0, 0.0, 100.0, 20.0).with_style(Style {
        fill: Some(Paint::Gradient(Gradient::Linear {
            start: Point::new(0.0, 0.0),
            end: Point::new(100.0, 0.0),
            stops: vec![
                GradientStop::new(0.0, "#000000"),
                GradientStop::new(1.0, "#ffffff"),
            ],
        })),
        ..Style::default()
    });
    let (session, _) = session_with(vec![shape]);
    let surface = render(&session, 100, 20);

    let left = surface.pixel(5, 10).unwrap();
    let right = surface.pixel(95, 10).unwrap();
    assert!(left.r < 40, "left was {:?}", left);
    assert!(right.r > 215, "right was {:?}", right);
}

#[test]
fn test_selection_overlay_is_drawn() {
    let (mut session, shapes) = session_with(vec![red(Shape::rect(100.0, 100.0, 50.0, 40.0))]);
    let before = render(&session, 200, 200);
    assert_eq!(before.pixel(92, 92), Some(WHITE));

    session.select(Some(Rc::clone(&shapes[0])));
    let after = render(&session, 200, 200);
    assert_eq!(after.pixel(92, 92), Some(Color::rgb(0, 0, 255)));
    assert_eq!(after.pixel(125, 120), Some(RED));
}

#[test]
fn test_png_is_written_to_disk() {
    let (session, _) = session_with(vec![red(Shape::circle(16.0, 16.0, 8.0))]);
    let surface = render(&session, 32, 32);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("figure.png");
    surface.save_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
