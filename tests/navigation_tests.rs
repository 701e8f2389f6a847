use kline_board::ChartError;
use kline_board::api::{ChartEngine, ChartEngineConfig, ChartNavigator};
use kline_board::core::{Anchor, Bar, SurfaceSize};
use kline_board::interaction::{DrawingTool, KeyCommand, PointerButtons, PointerEvent};
use kline_board::objects::ShapeDraft;
use kline_board::render::NullRenderer;

fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(SurfaceSize::new(860, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let bars = (0..100)
        .map(|i| Bar::new(i * 60_000, 100.0, 110.0, 90.0, 105.0, 1.0).expect("valid bar"))
        .collect();
    engine.update_data(bars, false);
    engine
}

fn window(engine: &ChartEngine<NullRenderer>) -> (usize, usize) {
    (engine.viewport().start_index(), engine.viewport().end_index())
}

fn toolbar_zoom_then_step_back(navigator: &mut dyn ChartNavigator) -> bool {
    navigator.zoom_in() && navigator.pan_by_bars(-4)
}

#[test]
fn navigator_trait_drives_the_engine() {
    let mut engine = engine();
    assert!(toolbar_zoom_then_step_back(&mut engine));
    // 12px per bar at scale 1.25: 66 bars, then 4 back.
    assert_eq!(engine.viewport().scale(), 1.25);
    assert_eq!(window(&engine), (30, 96));

    let navigator: &mut dyn ChartNavigator = &mut engine;
    assert!(navigator.scroll_to_latest());
    assert!(navigator.reset_view());
    assert!(!navigator.reset_view());
    assert_eq!(window(&engine), (0, 100));
    assert_eq!(engine.viewport().scale(), 1.0);
}

#[test]
fn keyboard_commands_map_to_navigation() {
    let mut engine = engine();
    assert_eq!(window(&engine), (0, 100));
    assert!(engine.handle_key(KeyCommand::PanLeft));
    assert_eq!(window(&engine), (10, 90));
    assert!(engine.handle_key(KeyCommand::PanRight));
    assert!(engine.handle_key(KeyCommand::PanRight));
    // Up to 43 empty slots are allowed past the newest bar.
    assert_eq!(window(&engine), (30, 110));

    assert!(engine.handle_key(KeyCommand::ResetView));
    assert_eq!(window(&engine), (0, 100));

    assert!(engine.handle_key(KeyCommand::ZoomOut));
    assert!((engine.viewport().scale() - 0.8).abs() <= 1e-12);
    assert_eq!(window(&engine), (5, 100));
}

#[test]
fn wheel_zoom_keeps_the_bar_under_the_pointer() {
    let mut engine = engine();
    let pivot_before = engine.coordinate_transform().x_to_fractional_index(400.0);
    assert!((pivot_before - 60.0).abs() <= 1e-9);

    engine.handle_pointer(PointerEvent::scroll(400.0, 200.0, -1.0));
    assert!(engine.viewport().scale() > 1.0);
    let x_after = engine.coordinate_transform().index_to_x(60.0);
    assert!((x_after - 400.0).abs() <= 1e-6, "pivot drifted to {x_after}");

    let scale = engine.viewport().scale();
    assert!(!engine.scroll(400.0, 0.0));
    assert!(!engine.scroll(400.0, f64::NAN));
    assert_eq!(engine.viewport().scale(), scale);
}

#[test]
fn pan_gesture_moves_by_whole_bars_and_keeps_the_remainder() {
    let mut engine = engine();
    engine.pointer_down(500.0, 50.0, PointerButtons::PRIMARY);
    engine.pointer_move(504.0, 50.0);
    engine.pointer_move(508.0, 50.0);
    assert_eq!(window(&engine), (0, 100));

    engine.pointer_move(512.0, 50.0);
    assert_eq!(window(&engine), (19, 99));
    engine.pointer_move(516.0, 50.0);
    assert_eq!(window(&engine), (19, 99));
    engine.pointer_move(520.0, 50.0);
    assert_eq!(window(&engine), (18, 98));

    engine.pointer_up(520.0, 50.0);
    engine.pointer_move(600.0, 50.0);
    assert_eq!(window(&engine), (18, 98));
}

#[test]
fn resize_validates_and_keeps_the_right_edge() {
    let mut engine = engine();
    assert!(engine.resize(SurfaceSize::new(460, 400)).expect("valid surface"));
    assert_eq!(window(&engine), (60, 100));

    let err = engine
        .resize(SurfaceSize::new(0, 400))
        .expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
    assert_eq!(engine.surface(), SurfaceSize::new(460, 400));
}

#[test]
fn delete_cancel_and_finish_keys() {
    let mut engine = engine();
    let id = engine
        .add_drawing(ShapeDraft::TrendLine {
            start: Anchor::new(50.0, 100.0),
            end: Anchor::new(60.0, 100.0),
        })
        .expect("drawing stored");
    assert!(!engine.handle_key(KeyCommand::DeleteSelected));
    assert!(engine.select_object(&id));
    assert!(engine.handle_key(KeyCommand::DeleteSelected));
    assert!(engine.drawings().is_empty());

    engine.select_tool(Some(DrawingTool::Polyline));
    engine.pointer_down(200.0, 200.0, PointerButtons::PRIMARY);
    engine.pointer_down(300.0, 100.0, PointerButtons::PRIMARY);
    assert!(engine.handle_key(KeyCommand::FinishPolyline));
    assert_eq!(engine.drawings().len(), 1);

    engine.select_tool(Some(DrawingTool::Circle));
    engine.pointer_down(500.0, 200.0, PointerButtons::PRIMARY);
    assert!(engine.handle_key(KeyCommand::Cancel));
    assert_eq!(engine.active_tool(), None);
    assert!(engine.session().pending_start().is_none());
    assert!(!engine.handle_key(KeyCommand::Cancel));
}
