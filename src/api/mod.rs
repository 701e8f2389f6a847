mod data_controller;
mod drawing_controller;
mod engine;
mod engine_config;
mod engine_init;
mod engine_snapshot;
mod frame_builder;
mod interaction_controller;
mod json_contract;
mod navigation;
mod plugin_dispatch;
mod plugin_registry;
mod validation;
mod viewport_controller;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use engine_snapshot::EngineSnapshot;
pub use json_contract::{ENGINE_SNAPSHOT_JSON_SCHEMA_V1, EngineSnapshotJsonContractV1};
pub use navigation::ChartNavigator;

pub use crate::extensions::PluginEvent;
