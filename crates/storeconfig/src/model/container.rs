// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{subjects, Plugin, CONTEXT_TYPE, ENGINE_TYPE, HOST_TYPE};
use crate::subject::{Property, Subject};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_APP_BASE: &str = "webapps";

/// Request-processing engine of a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engine {
    pub name: String,
    pub default_host: String,
    pub jvm_route: Option<String>,
    pub listeners: Vec<Plugin>,
    pub valves: Vec<Plugin>,
    pub hosts: Vec<Host>,
}

impl Engine {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_host: DEFAULT_HOST.to_string(),
            jvm_route: None,
            listeners: Vec::new(),
            valves: Vec::new(),
            hosts: Vec::new(),
        }
    }

    pub fn add_host(&mut self, host: Host) {
        self.hosts.push(host);
    }

    pub fn find_host(&self, name: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.name == name)
    }
}

impl Subject for Engine {
    fn type_name(&self) -> &str {
        ENGINE_TYPE
    }

    fn properties(&self) -> Vec<Property> {
        let mut props = vec![
            Property::new("name", self.name.as_str()),
            Property::with_default("defaultHost", self.default_host.as_str(), DEFAULT_HOST),
        ];
        if let Some(route) = &self.jvm_route {
            props.push(Property::new("jvmRoute", route.as_str()));
        }
        props
    }

    fn children(&self, property: &str) -> Option<Vec<&dyn Subject>> {
        match property {
            "listeners" => Some(subjects(&self.listeners)),
            "valves" => Some(subjects(&self.valves)),
            "hosts" => Some(subjects(&self.hosts)),
            _ => None,
        }
    }
}

/// Virtual host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub name: String,
    pub app_base: String,
    pub unpack_wars: bool,
    pub auto_deploy: bool,
    pub listeners: Vec<Plugin>,
    pub valves: Vec<Plugin>,
    pub contexts: Vec<Context>,
}

impl Host {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            app_base: DEFAULT_APP_BASE.to_string(),
            unpack_wars: true,
            auto_deploy: true,
            listeners: Vec::new(),
            valves: Vec::new(),
            contexts: Vec::new(),
        }
    }

    pub fn add_context(&mut self, context: Context) {
        self.contexts.push(context);
    }

    pub fn find_context(&self, path: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.path == path)
    }
}

impl Subject for Host {
    fn type_name(&self) -> &str {
        HOST_TYPE
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::new("name", self.name.as_str()),
            Property::with_default("appBase", self.app_base.as_str(), DEFAULT_APP_BASE),
            Property::with_default("unpackWARs", self.unpack_wars, true),
            Property::with_default("autoDeploy", self.auto_deploy, true),
        ]
    }

    fn children(&self, property: &str) -> Option<Vec<&dyn Subject>> {
        match property {
            "listeners" => Some(subjects(&self.listeners)),
            "valves" => Some(subjects(&self.valves)),
            "contexts" => Some(subjects(&self.contexts)),
            _ => None,
        }
    }
}

/// Web application context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    pub path: String,
    pub doc_base: String,
    pub reloadable: bool,
    pub cookies: bool,
    pub privileged: bool,
    pub listeners: Vec<Plugin>,
    pub valves: Vec<Plugin>,
    pub watched_resources: Vec<String>,
    pub wrapper_lifecycles: Vec<String>,
    pub wrapper_listeners: Vec<String>,
}

impl Context {
    pub fn new(path: impl Into<String>, doc_base: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            doc_base: doc_base.into(),
            reloadable: false,
            cookies: true,
            privileged: false,
            listeners: Vec::new(),
            valves: Vec::new(),
            watched_resources: Vec::new(),
            wrapper_lifecycles: Vec::new(),
            wrapper_listeners: Vec::new(),
        }
    }

    pub fn add_wrapper_lifecycle(&mut self, class_name: impl Into<String>) {
        self.wrapper_lifecycles.push(class_name.into());
    }

    pub fn find_wrapper_lifecycles(&self) -> &[String] {
        &self.wrapper_lifecycles
    }

    pub fn add_wrapper_listener(&mut self, class_name: impl Into<String>) {
        self.wrapper_listeners.push(class_name.into());
    }

    pub fn find_wrapper_listeners(&self) -> &[String] {
        &self.wrapper_listeners
    }

    pub fn add_watched_resource(&mut self, path: impl Into<String>) {
        self.watched_resources.push(path.into());
    }
}

impl Subject for Context {
    fn type_name(&self) -> &str {
        CONTEXT_TYPE
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::new("path", self.path.as_str()),
            Property::new("docBase", self.doc_base.as_str()),
            Property::with_default("reloadable", self.reloadable, false),
            Property::with_default("cookies", self.cookies, true),
            Property::with_default("privileged", self.privileged, false),
        ]
    }

    fn children(&self, property: &str) -> Option<Vec<&dyn Subject>> {
        match property {
            "listeners" => Some(subjects(&self.listeners)),
            "valves" => Some(subjects(&self.valves)),
            _ => None,
        }
    }

    fn string_array(&self, property: &str) -> Option<&[String]> {
        match property {
            "watchedResources" => Some(&self.watched_resources),
            "WrapperLifecycle" => Some(&self.wrapper_lifecycles),
            "WrapperListener" => Some(&self.wrapper_listeners),
            _ => None,
        }
    }
}
