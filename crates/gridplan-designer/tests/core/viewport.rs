use gridplan_designer::{GridPoint, GridRect, Point, Viewport};
use gridplan_settings::GridSettings;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_viewport_defaults() {
    let vp = Viewport::default();
    assert_eq!(vp.grid_size(), 20.0);
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
    assert_eq!(vp.canvas_width(), 1200.0);
    assert_eq!(vp.canvas_height(), 800.0);
}

#[test]
fn test_screen_grid_round_trip() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_offset(-3.5, 2.0);
    let screen = Point::new(123.0, 456.0);
    let back = vp.grid_to_screen(vp.screen_to_grid(screen));
    assert!(approx(back.x, screen.x));
    assert!(approx(back.y, screen.y));
}

#[test]
fn test_screen_to_cell_floors_negative_coordinates() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_offset(-2.0, -2.0);
    assert_eq!(vp.screen_to_cell(Point::new(5.0, 5.0)), GridPoint::new(-2, -2));
    assert_eq!(vp.screen_to_cell(Point::new(39.0, 41.0)), GridPoint::new(-1, 0));
}

#[test]
fn test_grid_size_is_clamped() {
    let mut vp = Viewport::default();
    vp.set_grid_size(1000.0);
    assert_eq!(vp.grid_size(), 100.0);
    vp.set_grid_size(1.0);
    assert_eq!(vp.grid_size(), 8.0);
    vp.set_grid_size(f64::NAN);
    assert_eq!(vp.grid_size(), 8.0);
}

#[test]
fn test_grid_limits_from_settings() {
    let grid = GridSettings {
        default_size: 40.0,
        min_size: 10.0,
        max_size: 30.0,
    };
    let mut vp = Viewport::with_grid_settings(800.0, 600.0, &grid);
    assert_eq!(vp.grid_size(), 30.0);

    vp.set_grid_limits(5.0, 12.0);
    assert_eq!(vp.grid_size(), 12.0);

    // Inverted limits are ignored.
    vp.set_grid_limits(50.0, 10.0);
    assert_eq!(vp.grid_size(), 12.0);
}

#[test]
fn test_zoom_keeps_centre_without_anchor() {
    let mut vp = Viewport::new(800.0, 600.0);
    let centre = Point::new(400.0, 300.0);
    let before = vp.screen_to_grid(centre);
    assert!(vp.zoom_by(2.0, None));
    let after = vp.screen_to_grid(centre);
    assert!(approx(before.x, after.x));
    assert!(approx(before.y, after.y));
    assert_eq!(vp.grid_size(), 40.0);
}

#[test]
fn test_zoom_at_limit_is_no_op() {
    let mut vp = Viewport::default();
    vp.set_grid_size(100.0);
    let offset = vp.offset();
    assert!(!vp.zoom_by(2.0, Some(Point::new(10.0, 10.0))));
    assert_eq!(vp.offset(), offset);
    assert!(!vp.zoom_by(0.0, None));
    assert!(!vp.zoom_by(f64::INFINITY, None));
}

#[test]
fn test_pan_direction() {
    let mut vp = Viewport::default();
    vp.pan_by_screen(20.0, -40.0, false);
    assert_eq!(vp.offset(), Point::new(-1.0, 2.0));
    vp.pan_by_screen(20.0, -40.0, true);
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
}

#[test]
fn test_visible_rect_covers_partial_cells() {
    let mut vp = Viewport::new(100.0, 50.0);
    vp.set_offset(0.5, 0.5);
    let rect = vp.visible_rect();
    assert_eq!(rect, GridRect::new(0, 0, 6, 3));
}

#[test]
fn test_fit_to_rect() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.fit_to_rect(&GridRect::new(10, 10, 20, 10), 0.0);
    assert_eq!(vp.grid_size(), 50.0);
    let (cx, cy) = vp.visible_bounds().center();
    assert!(approx(cx, 20.0));
    assert!(approx(cy, 15.0));

    let before = vp.clone();
    vp.fit_to_rect(&GridRect::new(0, 0, 0, 0), 0.1);
    assert_eq!(vp, before);
}

#[test]
fn test_fit_to_rect_with_padding() {
    let mut vp = Viewport::new(1000.0, 1000.0);
    vp.fit_to_rect(&GridRect::new(0, 0, 10, 10), 0.1);
    assert!(approx(vp.grid_size(), 80.0));
}

#[test]
fn test_reset_and_display() {
    let mut vp = Viewport::default();
    vp.set_grid_size(50.0);
    vp.scroll(3.0, -4.0);
    assert_eq!(vp.to_string(), "Grid: 50.0px | Offset: (3.0, -4.0)");
    vp.reset();
    assert_eq!(vp, Viewport::default());
}
