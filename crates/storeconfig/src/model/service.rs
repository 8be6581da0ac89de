// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use std::fmt;

use super::{subjects, Engine, CONNECTOR_TYPE, EXECUTOR_FAMILY, EXECUTOR_TYPE, SERVICE_TYPE};
use crate::subject::{Property, Subject, Value};

pub const DEFAULT_PROTOCOL: &str = "HTTP/1.1";
pub const AJP_PROTOCOL: &str = "AJP/1.3";
pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_REDIRECT_PORT: i32 = 443;
pub const DEFAULT_CONNECTOR_MAX_THREADS: i32 = 200;
pub const DEFAULT_CONNECTOR_MIN_SPARE_THREADS: i32 = 10;

/// Connector attributes held in typed fields rather than free-form properties.
pub const CONNECTOR_ATTRIBUTES: [&str; 8] = [
    "port",
    "protocol",
    "secure",
    "scheme",
    "redirectPort",
    "executor",
    "maxThreads",
    "minSpareThreads",
];

pub const DEFAULT_NAME_PREFIX: &str = "tomcat-exec-";
pub const DEFAULT_EXECUTOR_MAX_THREADS: i32 = 200;
pub const DEFAULT_EXECUTOR_MIN_SPARE_THREADS: i32 = 25;
pub const DEFAULT_MAX_IDLE_TIME: i32 = 60000;

/// A named group of connectors sharing one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub executors: Vec<Executor>,
    pub connectors: Vec<Connector>,
    pub engine: Option<Engine>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            executors: Vec::new(),
            connectors: Vec::new(),
            engine: None,
        }
    }

    pub fn add_connector(&mut self, connector: Connector) {
        self.connectors.push(connector);
    }

    pub fn find_connectors(&self) -> &[Connector] {
        &self.connectors
    }

    /// Remove every connector bound to `port`; returns how many were removed.
    pub fn remove_connector(&mut self, port: i32) -> usize {
        let before = self.connectors.len();
        self.connectors.retain(|c| c.port != port);
        before - self.connectors.len()
    }

    /// Add an executor; an executor with the same name is replaced.
    pub fn add_executor(&mut self, executor: Executor) {
        match self.executors.iter_mut().find(|e| e.name == executor.name) {
            Some(existing) => *existing = executor,
            None => self.executors.push(executor),
        }
    }

    pub fn find_executors(&self) -> &[Executor] {
        &self.executors
    }

    pub fn get_executor(&self, name: &str) -> Option<&Executor> {
        self.executors.iter().find(|e| e.name == name)
    }

    pub fn remove_executor(&mut self, name: &str) -> Option<Executor> {
        let idx = self.executors.iter().position(|e| e.name == name)?;
        Some(self.executors.remove(idx))
    }

    pub fn set_engine(&mut self, engine: Engine) {
        self.engine = Some(engine);
    }
}

impl Subject for Service {
    fn type_name(&self) -> &str {
        SERVICE_TYPE
    }

    fn properties(&self) -> Vec<Property> {
        vec![Property::new("name", self.name.as_str())]
    }

    fn children(&self, property: &str) -> Option<Vec<&dyn Subject>> {
        match property {
            "executors" => Some(subjects(&self.executors)),
            "connectors" => Some(subjects(&self.connectors)),
            "engine" => Some(self.engine.iter().map(|e| e as &dyn Subject).collect()),
            _ => None,
        }
    }
}

/// Shared thread pool connectors can reference by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executor {
    pub class_name: String,
    pub name: String,
    pub name_prefix: String,
    pub max_threads: i32,
    pub min_spare_threads: i32,
    pub max_idle_time: i32,
    pub daemon: bool,
}

impl Executor {
    /// Standard thread pool executor.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_class(EXECUTOR_TYPE, name)
    }

    pub fn with_class(class_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            max_threads: DEFAULT_EXECUTOR_MAX_THREADS,
            min_spare_threads: DEFAULT_EXECUTOR_MIN_SPARE_THREADS,
            max_idle_time: DEFAULT_MAX_IDLE_TIME,
            daemon: true,
        }
    }
}

impl fmt::Display for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.class_name.rsplit('.').next().unwrap_or(&self.class_name);
        write!(f, "{}[{}]", simple, self.name)
    }
}

impl Subject for Executor {
    fn type_name(&self) -> &str {
        &self.class_name
    }

    fn family(&self) -> Option<&str> {
        Some(EXECUTOR_FAMILY)
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::new("name", self.name.as_str()),
            Property::with_default("namePrefix", self.name_prefix.as_str(), DEFAULT_NAME_PREFIX),
            Property::with_default("maxThreads", self.max_threads, DEFAULT_EXECUTOR_MAX_THREADS),
            Property::with_default(
                "minSpareThreads",
                self.min_spare_threads,
                DEFAULT_EXECUTOR_MIN_SPARE_THREADS,
            ),
            Property::with_default("maxIdleTime", self.max_idle_time, DEFAULT_MAX_IDLE_TIME),
            Property::with_default("daemon", self.daemon, true),
        ]
    }
}

/// Protocol endpoint of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub protocol: String,
    pub port: i32,
    pub secure: bool,
    pub scheme: String,
    pub redirect_port: i32,
    pub executor: Option<String>,
    pub max_threads: i32,
    pub min_spare_threads: i32,
    /// Protocol handler properties (e.g. `address`), in insertion order.
    pub properties: Vec<(String, String)>,
}

impl Connector {
    pub fn new(protocol: impl Into<String>, port: i32) -> Self {
        Self {
            protocol: protocol.into(),
            port,
            secure: false,
            scheme: DEFAULT_SCHEME.to_string(),
            redirect_port: DEFAULT_REDIRECT_PORT,
            executor: None,
            max_threads: DEFAULT_CONNECTOR_MAX_THREADS,
            min_spare_threads: DEFAULT_CONNECTOR_MIN_SPARE_THREADS,
            properties: Vec::new(),
        }
    }

    /// Set a property by its attribute name.
    ///
    /// Names in [`CONNECTOR_ATTRIBUTES`] update the typed field; anything else
    /// becomes a protocol handler property, replacing an existing value in
    /// place. Returns `false` when a typed value does not parse, leaving the
    /// connector unchanged.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            "port" => set_parsed(&mut self.port, &value),
            "protocol" => {
                self.protocol = value;
                true
            }
            "secure" => set_parsed(&mut self.secure, &value),
            "scheme" => {
                self.scheme = value;
                true
            }
            "redirectPort" => set_parsed(&mut self.redirect_port, &value),
            "executor" => {
                self.executor = Some(value).filter(|v| !v.is_empty());
                true
            }
            "maxThreads" => set_parsed(&mut self.max_threads, &value),
            "minSpareThreads" => set_parsed(&mut self.min_spare_threads, &value),
            _ => {
                match self.properties.iter_mut().find(|(n, _)| *n == name) {
                    Some(entry) => entry.1 = value,
                    None => self.properties.push((name, value)),
                }
                true
            }
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

fn set_parsed<T: std::str::FromStr>(field: &mut T, raw: &str) -> bool {
    match raw.trim().parse() {
        Ok(value) => {
            *field = value;
            true
        }
        Err(_) => false,
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property("address") {
            Some(address) => write!(f, "Connector[{}-{}-{}]", self.protocol, address, self.port),
            None => write!(f, "Connector[{}-{}]", self.protocol, self.port),
        }
    }
}

impl Subject for Connector {
    fn type_name(&self) -> &str {
        CONNECTOR_TYPE
    }

    fn properties(&self) -> Vec<Property> {
        let mut props = vec![
            Property::new("port", self.port),
            Property::with_default("protocol", self.protocol.as_str(), DEFAULT_PROTOCOL),
            Property::with_default("secure", self.secure, false),
            Property::with_default("scheme", self.scheme.as_str(), DEFAULT_SCHEME),
            Property::with_default("redirectPort", self.redirect_port, DEFAULT_REDIRECT_PORT),
        ];
        if let Some(executor) = &self.executor {
            props.push(Property::new("executor", Value::Str(executor.clone())));
        }
        props.push(Property::with_default(
            "maxThreads",
            self.max_threads,
            DEFAULT_CONNECTOR_MAX_THREADS,
        ));
        props.push(Property::with_default(
            "minSpareThreads",
            self.min_spare_threads,
            DEFAULT_CONNECTOR_MIN_SPARE_THREADS,
        ));
        props.extend(
            self.properties
                .iter()
                .filter(|(n, _)| !CONNECTOR_ATTRIBUTES.contains(&n.as_str()))
                .map(|(n, v)| Property::new(n.clone(), v.as_str())),
        );
        props
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_display() {
        let mut connector = Connector::new(DEFAULT_PROTOCOL, 8080);
        assert_eq!(connector.to_string(), "Connector[HTTP/1.1-8080]");
        connector.set_property("address", "10.0.0.1");
        assert_eq!(connector.to_string(), "Connector[HTTP/1.1-10.0.0.1-8080]");
    }

    #[test]
    fn test_set_property_updates_typed_fields() {
        let mut connector = Connector::new(DEFAULT_PROTOCOL, 8080);
        assert!(connector.set_property("secure", "true"));
        assert!(connector.set_property("maxThreads", "400"));
        assert!(connector.set_property("executor", "tomcatThreadPool"));
        assert!(connector.set_property("compression", "on"));
        assert!(!connector.set_property("redirectPort", "many"));

        assert!(connector.secure);
        assert_eq!(connector.max_threads, 400);
        assert_eq!(connector.executor.as_deref(), Some("tomcatThreadPool"));
        assert_eq!(connector.redirect_port, DEFAULT_REDIRECT_PORT);
        assert_eq!(
            connector.properties,
            vec![("compression".to_string(), "on".to_string())]
        );
    }

    #[test]
    fn test_free_form_entries_never_shadow_typed_properties() {
        let mut connector = Connector::new(DEFAULT_PROTOCOL, 8080);
        connector.secure = true;
        connector.properties.push(("secure".into(), "false".into()));
        connector.properties.push(("address".into(), "0.0.0.0".into()));

        let names: Vec<String> = connector.properties().into_iter().map(|p| p.name).collect();
        assert_eq!(names.iter().filter(|n| *n == "secure").count(), 1);
        assert!(names.contains(&"address".to_string()));
    }

    #[test]
    fn test_executor_display_uses_simple_class_name() {
        assert_eq!(
            Executor::new("tomcatThreadPool").to_string(),
            "StandardThreadExecutor[tomcatThreadPool]"
        );
    }

    #[test]
    fn test_service_executor_management() {
        let mut service = Service::new("Catalina");
        service.add_executor(Executor::new("pool"));
        let mut bigger = Executor::new("pool");
        bigger.max_threads = 400;
        service.add_executor(bigger);
        assert_eq!(service.find_executors().len(), 1);
        assert_eq!(service.get_executor("pool").unwrap().max_threads, 400);
        assert!(service.remove_executor("pool").is_some());
        assert!(service.get_executor("pool").is_none());
    }

    #[test]
    fn test_remove_connector_by_port() {
        let mut service = Service::new("Catalina");
        service.add_connector(Connector::new(DEFAULT_PROTOCOL, 8080));
        service.add_connector(Connector::new(AJP_PROTOCOL, 8009));
        assert_eq!(service.remove_connector(8080), 1);
        assert_eq!(service.find_connectors().len(), 1);
        assert_eq!(service.remove_connector(8080), 0);
    }

    #[test]
    fn test_engine_collection_is_optional() {
        let service = Service::new("Catalina");
        assert_eq!(service.children("engine").unwrap().len(), 0);
        assert!(service.children("hosts").is_none());
    }
}
