// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{subjects, Plugin, Service, SERVER_TYPE};
use crate::subject::{Property, Subject};

pub const DEFAULT_SHUTDOWN_PORT: i32 = 8005;
pub const DEFAULT_SHUTDOWN_COMMAND: &str = "SHUTDOWN";
pub const DEFAULT_ADDRESS: &str = "localhost";

/// Top-level server: shutdown socket, global listeners and services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Server {
    pub port: i32,
    pub shutdown: String,
    pub address: String,
    pub listeners: Vec<Plugin>,
    pub services: Vec<Service>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            port: DEFAULT_SHUTDOWN_PORT,
            shutdown: DEFAULT_SHUTDOWN_COMMAND.to_string(),
            address: DEFAULT_ADDRESS.to_string(),
            listeners: Vec::new(),
            services: Vec::new(),
        }
    }
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, listener: Plugin) {
        self.listeners.push(listener);
    }

    pub fn add_service(&mut self, service: Service) {
        self.services.push(service);
    }

    pub fn find_service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    pub fn find_service_mut(&mut self, name: &str) -> Option<&mut Service> {
        self.services.iter_mut().find(|s| s.name == name)
    }
}

impl Subject for Server {
    fn type_name(&self) -> &str {
        SERVER_TYPE
    }

    fn properties(&self) -> Vec<Property> {
        vec![
            Property::with_default("port", self.port, DEFAULT_SHUTDOWN_PORT),
            Property::with_default("shutdown", self.shutdown.as_str(), DEFAULT_SHUTDOWN_COMMAND),
            Property::with_default("address", self.address.as_str(), DEFAULT_ADDRESS),
        ]
    }

    fn children(&self, property: &str) -> Option<Vec<&dyn Subject>> {
        match property {
            "listeners" => Some(subjects(&self.listeners)),
            "services" => Some(subjects(&self.services)),
            _ => None,
        }
    }
}
