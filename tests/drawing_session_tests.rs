use kline_board::api::{ChartEngine, ChartEngineConfig};
use kline_board::core::{Anchor, Bar, SurfaceSize};
use kline_board::interaction::{
    DrawingTool, InteractionMode, PointerButtons, PointerEvent, PointerEventKind, SessionPhase,
};
use kline_board::objects::{ChartObject, ObjectId, ObjectKind, ObjectOrigin, ShapeDraft};
use kline_board::render::NullRenderer;

// 860x400 with 100 bars: index i at x = 10 * i - 200, price 100 at y = 200.
fn engine() -> ChartEngine<NullRenderer> {
    let config = ChartEngineConfig::new(SurfaceSize::new(860, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let bars = (0..100)
        .map(|i| Bar::new(i * 60_000, 100.0, 110.0, 90.0, 105.0, 1.0).expect("valid bar"))
        .collect();
    engine.update_data(bars, false);
    engine
}

fn tap(engine: &mut ChartEngine<NullRenderer>, x: f64, y: f64) {
    engine.pointer_down(x, y, PointerButtons::PRIMARY);
    engine.pointer_up(x, y);
}

#[test]
fn trend_line_is_created_by_two_taps_and_tool_is_one_shot() {
    let mut engine = engine();
    engine.select_tool(Some(DrawingTool::TrendLine));
    assert_eq!(engine.session().phase(), SessionPhase::ToolSelected);

    tap(&mut engine, 300.0, 200.0);
    assert_eq!(engine.session().phase(), SessionPhase::Anchoring);
    assert_eq!(engine.session().pending_start(), Some(Anchor::new(50.0, 100.0)));

    engine.pointer_move(380.0, 150.0);
    assert_eq!(engine.session().phase(), SessionPhase::Previewing);
    let model = engine.build_object_model();
    let preview = model.preview().expect("preview object");
    assert_eq!(preview.object.id(), &ObjectId::preview());
    assert_eq!(preview.object.kind(), ObjectKind::TrendLine);
    assert!(engine.drawings().is_empty());

    tap(&mut engine, 400.0, 200.0);
    assert_eq!(engine.drawings().len(), 1);
    let line = engine
        .drawings()
        .get(&ObjectId::new("trend-1"))
        .expect("stored trend line");
    assert_eq!(
        line.handles(),
        Some((Anchor::new(50.0, 100.0), Anchor::new(60.0, 100.0)))
    );
    assert_eq!(engine.active_tool(), None);
    assert_eq!(engine.session().phase(), SessionPhase::Idle);
    assert!(engine.build_object_model().preview().is_none());

    // Tool is gone: the next press on empty space pans.
    engine.pointer_down(150.0, 50.0, PointerButtons::PRIMARY);
    assert_eq!(engine.interaction_mode(), InteractionMode::Panning);
    engine.pointer_up(150.0, 50.0);
    assert_eq!(engine.drawings().len(), 1);
}

#[test]
fn second_tap_on_the_first_anchor_keeps_waiting() {
    let mut engine = engine();
    engine.select_tool(Some(DrawingTool::Rectangle));
    tap(&mut engine, 300.0, 200.0);
    // 303px still snaps to bar 50.
    tap(&mut engine, 303.0, 200.0);

    assert!(engine.drawings().is_empty());
    assert_eq!(engine.active_tool(), Some(DrawingTool::Rectangle));
    assert_eq!(engine.session().pending_start(), Some(Anchor::new(50.0, 100.0)));

    tap(&mut engine, 350.0, 100.0);
    assert_eq!(engine.drawings().count_of_kind(ObjectKind::Rectangle), 1);
    assert_eq!(engine.session().phase(), SessionPhase::Idle);
}

#[test]
fn polyline_collects_points_until_double_tap() {
    let mut engine = engine();
    engine.select_tool(Some(DrawingTool::Polyline));
    tap(&mut engine, 200.0, 200.0);
    tap(&mut engine, 250.0, 100.0);
    tap(&mut engine, 300.0, 200.0);
    assert_eq!(engine.session().phase(), SessionPhase::PolylineDraft);
    assert_eq!(engine.session().polyline_points().len(), 3);

    engine.pointer_move(330.0, 180.0);
    let model = engine.build_object_model();
    let preview = model.preview().expect("polyline preview");
    assert!(
        matches!(&preview.object, ChartObject::Polyline(line) if line.points.len() == 4),
        "preview should append the pointer to the collected points"
    );

    engine.handle_pointer(PointerEvent::new(PointerEventKind::DoubleTap, 300.0, 200.0));
    let ChartObject::Polyline(line) = engine
        .drawings()
        .get(&ObjectId::new("poly-1"))
        .expect("stored polyline")
    else {
        panic!("expected a polyline");
    };
    assert_eq!(
        line.points,
        vec![
            Anchor::new(40.0, 100.0),
            Anchor::new(45.0, 105.5),
            Anchor::new(50.0, 100.0),
        ]
    );
    assert_eq!(engine.active_tool(), None);
}

#[test]
fn polyline_needs_two_points_to_finish() {
    let mut engine = engine();
    engine.select_tool(Some(DrawingTool::Polyline));
    tap(&mut engine, 200.0, 200.0);
    tap(&mut engine, 200.0, 200.0);

    assert!(!engine.double_tap(200.0, 200.0));
    assert!(engine.finish_polyline().is_none());
    assert!(engine.drawings().is_empty());
    assert_eq!(engine.session().polyline_points().len(), 1);
    assert_eq!(engine.session().phase(), SessionPhase::PolylineDraft);
}

#[test]
fn vertical_line_mode_toggles_lines_per_bar() {
    let mut engine = engine();
    engine.set_vertical_line_mode(true);
    assert_eq!(engine.session().phase(), SessionPhase::VerticalLineMode);

    tap(&mut engine, 300.0, 200.0);
    let first = engine
        .drawings()
        .of_kind(ObjectKind::VerticalLine)
        .next()
        .cloned()
        .expect("vertical line");
    assert!(matches!(&first, ChartObject::VerticalLine(line) if line.timestamp == 50 * 60_000));
    assert!(engine.vertical_line_mode());

    // Same bar again removes it.
    tap(&mut engine, 303.0, 50.0);
    assert_eq!(engine.drawings().count_of_kind(ObjectKind::VerticalLine), 0);

    tap(&mut engine, 310.0, 200.0);
    assert_eq!(engine.drawings().count_of_kind(ObjectKind::VerticalLine), 1);
    assert!(engine.drawings().get(&ObjectId::new("vline-2")).is_some());

    engine.select_tool(Some(DrawingTool::Circle));
    assert!(!engine.vertical_line_mode());
    assert_eq!(engine.active_tool(), Some(DrawingTool::Circle));
}

#[test]
fn enabling_vertical_line_mode_clears_the_tool() {
    let mut engine = engine();
    engine.select_tool(Some(DrawingTool::Fibonacci));
    tap(&mut engine, 300.0, 200.0);
    engine.set_vertical_line_mode(true);
    assert_eq!(engine.active_tool(), None);
    assert!(engine.session().pending_start().is_none());
}

#[test]
fn secondary_button_cancels_the_session() {
    let mut engine = engine();
    engine.select_tool(Some(DrawingTool::TrendLine));
    tap(&mut engine, 300.0, 200.0);

    engine.handle_pointer(
        PointerEvent::down(500.0, 100.0).with_buttons(PointerButtons::SECONDARY),
    );
    assert_eq!(engine.active_tool(), None);
    assert_eq!(engine.session().phase(), SessionPhase::Idle);
    assert!(engine.drawings().is_empty());
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn pressing_an_existing_drawing_drags_it_instead_of_drawing() {
    let mut engine = engine();
    let id = engine
        .add_drawing(ShapeDraft::TrendLine {
            start: Anchor::new(50.0, 100.0),
            end: Anchor::new(60.0, 100.0),
        })
        .expect("drawing stored");
    engine.select_tool(Some(DrawingTool::Circle));

    engine.pointer_down(350.0, 200.0, PointerButtons::PRIMARY);
    assert_eq!(engine.interaction_mode(), InteractionMode::Dragging);
    assert_eq!(engine.interaction().selected_id(), Some(&id));
    assert_eq!(engine.session().phase(), SessionPhase::ToolSelected);

    engine.pointer_up(350.0, 200.0);
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(engine.interaction().selected_id(), Some(&id));
    assert_eq!(engine.drawings().len(), 1);
}

#[test]
fn taps_are_ignored_without_bars() {
    let config = ChartEngineConfig::new(SurfaceSize::new(860, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.select_tool(Some(DrawingTool::TrendLine));
    tap(&mut engine, 300.0, 200.0);
    tap(&mut engine, 400.0, 200.0);
    assert!(engine.drawings().is_empty());
    assert_eq!(engine.session().phase(), SessionPhase::ToolSelected);
}

#[test]
fn first_tap_of_any_tool_clears_the_selection() {
    let mut engine = engine();
    let id = engine
        .add_drawing(ShapeDraft::TrendLine {
            start: Anchor::new(50.0, 100.0),
            end: Anchor::new(60.0, 100.0),
        })
        .expect("drawing stored");

    for tool in [DrawingTool::Polyline, DrawingTool::Circle] {
        assert!(engine.select_object(&id));
        engine.select_tool(Some(tool));
        assert_eq!(engine.interaction().selected_id(), Some(&id));

        tap(&mut engine, 600.0, 100.0);
        assert_eq!(engine.interaction().selected_id(), None, "{tool:?}");
        engine.cancel_drawing();
    }
}
