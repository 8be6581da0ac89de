// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in store descriptions for the component model.

use super::{
    CONNECTOR_TYPE, CONTEXT_TYPE, ENGINE_TYPE, EXECUTOR_FAMILY, EXECUTOR_TYPE, HOST_TYPE,
    LISTENER_FAMILY, SERVER_TYPE, SERVICE_TYPE, VALVE_FAMILY,
};
use crate::descriptor::{ArraySpec, ChildSpec, StoreDescription};
use crate::strategy::StrategyKind;

const CONTEXT_CONFIG: &str = "org.apache.catalina.startup.ContextConfig";
const HOST_CONFIG: &str = "org.apache.catalina.startup.HostConfig";
const ENGINE_CONFIG: &str = "org.apache.catalina.startup.EngineConfig";
const NAMING_CONTEXT_LISTENER: &str = "org.apache.catalina.core.NamingContextListener";
const MAPPER_LISTENER: &str = "org.apache.catalina.mapper.MapperListener";

/// Descriptions registered by [`StoreRegistry::with_defaults`](crate::StoreRegistry::with_defaults).
pub fn default_descriptions() -> Vec<StoreDescription> {
    vec![
        StoreDescription::new(SERVER_TYPE, "Server")
            .child(ChildSpec::new("listeners"))
            .child(ChildSpec::new("services"))
            .transient_child(NAMING_CONTEXT_LISTENER),
        StoreDescription::new(SERVICE_TYPE, "Service")
            .child(ChildSpec::new("executors"))
            .child(ChildSpec::new("connectors"))
            .child(ChildSpec::new("engine"))
            .transient_child(MAPPER_LISTENER),
        StoreDescription::new(EXECUTOR_TYPE, "Executor"),
        StoreDescription::new(EXECUTOR_FAMILY, "Executor").non_standard(),
        StoreDescription::new(CONNECTOR_TYPE, "Connector").strategy(StrategyKind::Connector),
        StoreDescription::new(ENGINE_TYPE, "Engine")
            .child(ChildSpec::new("listeners"))
            .child(ChildSpec::new("valves"))
            .child(ChildSpec::new("hosts"))
            .transient_child(ENGINE_CONFIG),
        StoreDescription::new(HOST_TYPE, "Host")
            .child(ChildSpec::new("listeners"))
            .child(ChildSpec::new("valves"))
            .child(ChildSpec::new("contexts"))
            .transient_child(HOST_CONFIG),
        StoreDescription::new(CONTEXT_TYPE, "Context")
            .array(ArraySpec::new("watchedResources", "WatchedResource"))
            .array(ArraySpec::qualified("WrapperLifecycle"))
            .array(ArraySpec::qualified("WrapperListener"))
            .child(ChildSpec::new("listeners"))
            .child(ChildSpec::new("valves"))
            .transient_child(CONTEXT_CONFIG)
            .transient_child(NAMING_CONTEXT_LISTENER),
        StoreDescription::new(CONTEXT_TYPE, "WrapperLifecycle")
            .qualifier("WrapperLifecycle")
            .strategy(StrategyKind::StringArray)
            .without_attributes(),
        StoreDescription::new(CONTEXT_TYPE, "WrapperListener")
            .qualifier("WrapperListener")
            .strategy(StrategyKind::StringArray)
            .without_attributes(),
        StoreDescription::new(LISTENER_FAMILY, "Listener").non_standard(),
        StoreDescription::new(VALVE_FAMILY, "Valve").non_standard(),
    ]
}
