use std::cell::RefCell;
use std::rc::Rc;

use kline_board::ChartError;
use kline_board::api::{ChartEngine, ChartEngineConfig};
use kline_board::core::{Bar, SurfaceSize};
use kline_board::extensions::{ChartPlugin, PluginContext, PluginEvent};
use kline_board::interaction::{DragTarget, DrawingTool, PointerButtons};
use kline_board::objects::{ObjectId, ObjectKind};
use kline_board::render::NullRenderer;

type EventLog = Rc<RefCell<Vec<(PluginEvent, usize)>>>;

struct RecordingPlugin {
    id: String,
    events: EventLog,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: EventLog) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl ChartPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &PluginEvent, context: &PluginContext) {
        self.events
            .borrow_mut()
            .push((event.clone(), context.drawing_count));
    }
}

fn event_kind(event: &PluginEvent) -> &'static str {
    match event {
        PluginEvent::DataUpdated { .. } => "data",
        PluginEvent::ViewportChanged { .. } => "viewport",
        PluginEvent::PointerMoved { .. } => "pointer_move",
        PluginEvent::PointerLeft => "pointer_leave",
        PluginEvent::PanStarted => "pan_start",
        PluginEvent::PanEnded => "pan_end",
        PluginEvent::SelectionChanged { .. } => "selection",
        PluginEvent::DragStarted { .. } => "drag_start",
        PluginEvent::DragEnded { .. } => "drag_end",
        PluginEvent::ObjectCreated { .. } => "created",
        PluginEvent::ObjectRemoved { .. } => "removed",
        PluginEvent::ToolChanged { .. } => "tool",
        PluginEvent::Rendered => "rendered",
    }
}

fn engine_with_recorder() -> (ChartEngine<NullRenderer>, EventLog) {
    let config = ChartEngineConfig::new(SurfaceSize::new(860, 400));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    let events = EventLog::default();
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", Rc::clone(&events))))
        .expect("register plugin");
    (engine, events)
}

fn bars() -> Vec<Bar> {
    (0..100)
        .map(|i| Bar::new(i * 60_000, 100.0, 110.0, 90.0, 105.0, 1.0).expect("valid bar"))
        .collect()
}

#[test]
fn pan_gesture_emits_a_deterministic_sequence() {
    let (mut engine, events) = engine_with_recorder();
    engine.update_data(bars(), false);
    engine.pointer_down(500.0, 50.0, PointerButtons::PRIMARY);
    engine.pointer_move(530.0, 50.0);
    engine.pointer_up(530.0, 50.0);
    engine.render().expect("render");

    let log = events.borrow();
    let kinds: Vec<&str> = log.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "data",
            "viewport",
            "pan_start",
            "pointer_move",
            "viewport",
            "pan_end",
            "rendered",
        ]
    );
    assert_eq!(log[0].0, PluginEvent::DataUpdated { bar_count: 100 });
    assert_eq!(
        log[4].0,
        PluginEvent::ViewportChanged {
            start_index: 17,
            end_index: 97,
            scale: 1.0,
        }
    );
}

#[test]
fn drawing_lifecycle_is_observable() {
    let (mut engine, events) = engine_with_recorder();
    engine.update_data(bars(), false);
    events.borrow_mut().clear();

    engine.select_tool(Some(DrawingTool::TrendLine));
    engine.pointer_down(300.0, 200.0, PointerButtons::PRIMARY);
    engine.pointer_up(300.0, 200.0);
    engine.pointer_down(400.0, 200.0, PointerButtons::PRIMARY);
    engine.pointer_up(400.0, 200.0);
    engine.pointer_down(350.0, 200.0, PointerButtons::PRIMARY);
    engine.pointer_up(350.0, 200.0);
    engine.delete_selected().expect("deleted");

    let id = ObjectId::new("trend-1");
    let log = events.borrow();
    let observed: Vec<PluginEvent> = log.iter().map(|(event, _)| event.clone()).collect();
    assert_eq!(
        observed,
        vec![
            PluginEvent::ToolChanged {
                tool: Some(DrawingTool::TrendLine),
                vertical_line_mode: false,
            },
            PluginEvent::ObjectCreated {
                id: id.clone(),
                kind: ObjectKind::TrendLine,
            },
            PluginEvent::ToolChanged {
                tool: None,
                vertical_line_mode: false,
            },
            PluginEvent::SelectionChanged {
                selected: Some(id.clone()),
            },
            PluginEvent::DragStarted {
                id: id.clone(),
                target: DragTarget::Body,
            },
            PluginEvent::DragEnded {
                id: id.clone(),
                moved: false,
            },
            PluginEvent::ObjectRemoved {
                id,
                kind: ObjectKind::TrendLine,
            },
            PluginEvent::SelectionChanged { selected: None },
        ]
    );
    // Context is taken after the mutation it reports.
    assert_eq!(log[1].1, 1);
    assert_eq!(log[6].1, 0);
}

#[test]
fn plugin_ids_must_be_unique_and_non_empty() {
    let (mut engine, events) = engine_with_recorder();

    let duplicate = engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", Rc::clone(&events))))
        .expect_err("duplicate id");
    assert!(matches!(duplicate, ChartError::InvalidData(_)));
    let empty = engine
        .register_plugin(Box::new(RecordingPlugin::new("", Rc::clone(&events))))
        .expect_err("empty id");
    assert!(matches!(empty, ChartError::InvalidData(_)));
    assert_eq!(engine.plugin_count(), 1);

    assert!(engine.unregister_plugin("recorder"));
    assert!(!engine.unregister_plugin("recorder"));
    assert!(!engine.has_plugin("recorder"));

    engine.update_data(bars(), false);
    assert!(events.borrow().is_empty());
}
