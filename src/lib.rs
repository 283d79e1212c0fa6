//! # SketchKit
//!
//! Engine of a vector drawing editor: shapes with hit-testing and
//! transforms, a z-ordered figure with change notification, selection
//! handles, drawing tools and an interactive editing session.
//!
//! ## Architecture
//!
//! SketchKit is organized as a workspace with multiple crates:
//!
//! 1. **sketchkit-core** - Geometry primitives, errors, event bus
//! 2. **sketchkit-settings** - Editor configuration and its file I/O
//! 3. **sketchkit-designer** - Shapes, figure, controller, tools, surfaces
//! 4. **sketchkit** - Binary that renders a scripted editing session to PNG

pub use sketchkit_core::{BoundingBox, Error, FigureEvent, Point, Result};
pub use sketchkit_designer as designer;
pub use sketchkit_designer::{
    EditOutcome, EditorSession, Figure, GroupManager, Painter, PixmapSurface, Shape, Tool,
};
pub use sketchkit_settings::{Config, SettingsManager};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Press at `from`, drag to `to` in a few steps and release there.
pub fn drag(session: &mut EditorSession, from: Point, to: Point) -> EditOutcome {
    const STEPS: u32 = 4;
    session.pointer_down(from);
    for i in 1..=STEPS {
        let t = f64::from(i) / f64::from(STEPS);
        session.pointer_move(Point::new(
            from.x + (to.x - from.x) * t,
            from.y + (to.y - from.y) * t,
        ));
    }
    session.pointer_up(to)
}

/// Press and release at `p` without moving.
pub fn click(session: &mut EditorSession, p: Point) -> EditOutcome {
    session.pointer_down(p);
    session.pointer_up(p)
}

/// Build a session by driving it the way a user would: draw one shape with
/// every tool, select, move, scale and rotate the rectangle, then group the
/// circle with the star and shift the group down.
pub fn demo_session(config: &Config) -> Result<EditorSession> {
    let mut session = EditorSession::new(config);

    session.set_tool(Tool::Rect);
    drag(&mut session, Point::new(80.0, 80.0), Point::new(380.0, 280.0));

    session.set_tool(Tool::Circle);
    drag(&mut session, Point::new(600.0, 200.0), Point::new(700.0, 200.0));

    session.set_tool(Tool::Line);
    drag(&mut session, Point::new(80.0, 400.0), Point::new(500.0, 480.0));

    session.set_tool(Tool::Doodle);
    drag(&mut session, Point::new(800.0, 100.0), Point::new(950.0, 260.0));

    session.set_tool(Tool::Star);
    click(&mut session, Point::new(1100.0, 180.0));

    session.set_tool(Tool::Triangle);
    for p in [
        Point::new(200.0, 600.0),
        Point::new(420.0, 600.0),
        Point::new(310.0, 780.0),
    ] {
        click(&mut session, p);
    }

    session.set_tool(Tool::Polygon);
    for p in [
        Point::new(700.0, 560.0),
        Point::new(900.0, 580.0),
        Point::new(860.0, 760.0),
        Point::new(680.0, 720.0),
    ] {
        click(&mut session, p);
    }

    // Select the rectangle, move it, then pull its bottom-right handle
    // and give it a quarter turn.
    session.set_tool(Tool::Selection);
    click(&mut session, Point::new(200.0, 150.0));
    drag(&mut session, Point::new(200.0, 150.0), Point::new(260.0, 190.0));
    drag(&mut session, Point::new(438.0, 318.0), Point::new(478.0, 338.0));
    if let Some(rect) = session.selected() {
        let (handle, center) = {
            let rect = rect.borrow();
            let bounds = rect.bounds();
            let handle = session.controller().rotate_handle_center(&bounds);
            (handle, bounds.center())
        };
        drag(&mut session, handle, Point::new(center.x + 100.0, center.y));
    }

    let mut groups = GroupManager::new();
    let circle = session.figure().pick(Point::new(600.0, 200.0));
    let star = session.figure().pick(Point::new(1100.0, 180.0));
    if let (Some(circle), Some(star)) = (circle, star) {
        let group = groups.create_group(&circle);
        let id = group.borrow().id().clone();
        groups.add_to_group(&id, &star)?;
        let target = group.borrow().position().translate(0.0, 50.0);
        group.borrow_mut().move_to(target.x, target.y);
        session.figure_mut().refresh();
    }

    tracing::info!(
        "Demo session built: {} shapes, revision {}",
        session.figure().len(),
        session.figure().revision()
    );
    Ok(session)
}

/// Rasterise `session` onto a canvas sized and coloured by `config`.
pub fn render_session(session: &EditorSession, config: &Config) -> Result<PixmapSurface> {
    let mut surface = PixmapSurface::new(config.canvas.width, config.canvas.height)?;
    surface.fill_background(&config.canvas.background);
    let mut painter = Painter::new(surface);
    session.render(&mut painter);
    Ok(painter.into_surface())
}
