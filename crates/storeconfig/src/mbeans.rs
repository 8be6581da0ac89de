// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Management facade over a live service.
//!
//! Thin delegation to [`Service`]: everything it changes is what a later
//! store invocation writes out.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::info;

use crate::model::{Connector, Executor, Service, AJP_PROTOCOL, DEFAULT_PROTOCOL, EXECUTOR_TYPE};

/// Facade errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MBeanError {
    #[error("Cannot instantiate unknown type {0}")]
    UnknownType(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Management operations on one service.
#[derive(Debug, Clone)]
pub struct ServiceMBean {
    resource: Arc<RwLock<Service>>,
}

impl ServiceMBean {
    pub fn new(resource: Arc<RwLock<Service>>) -> Self {
        Self { resource }
    }

    /// The managed service.
    pub fn resource(&self) -> &Arc<RwLock<Service>> {
        &self.resource
    }

    /// Add a connector. An empty or missing `address` binds all interfaces.
    pub fn add_connector(&self, address: Option<&str>, port: i32, is_ajp: bool, is_ssl: bool) {
        let protocol = if is_ajp { AJP_PROTOCOL } else { DEFAULT_PROTOCOL };
        let mut connector = Connector::new(protocol, port);
        if let Some(address) = address.filter(|a| !a.is_empty()) {
            connector.set_property("address", address);
        }
        connector.secure = is_ssl;
        connector.scheme = if is_ssl { "https" } else { "http" }.to_string();

        info!(connector = %connector, "add connector");
        self.resource.write().add_connector(connector);
    }

    /// Instantiate an executor of `type_name` and add it to the service.
    ///
    /// The executor is named after the simple class name with the default
    /// name prefix, matching how a freshly constructed executor looks.
    pub fn add_executor(&self, type_name: &str) -> Result<(), MBeanError> {
        let executor = new_executor(type_name)?;
        info!(executor = %executor, "add executor");
        self.resource.write().add_executor(executor);
        Ok(())
    }

    pub fn find_connectors(&self) -> Vec<String> {
        self.resource
            .read()
            .find_connectors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn find_executors(&self) -> Vec<String> {
        self.resource
            .read()
            .find_executors()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn get_executor(&self, name: &str) -> Option<String> {
        self.resource.read().get_executor(name).map(ToString::to_string)
    }

    pub fn remove_connector(&self, port: i32) -> Result<(), MBeanError> {
        match self.resource.write().remove_connector(port) {
            0 => Err(MBeanError::NotFound(format!("connector on port {}", port))),
            _ => Ok(()),
        }
    }

    pub fn remove_executor(&self, name: &str) -> Result<(), MBeanError> {
        self.resource
            .write()
            .remove_executor(name)
            .map(|_| ())
            .ok_or_else(|| MBeanError::NotFound(format!("executor {}", name)))
    }
}

fn new_executor(type_name: &str) -> Result<Executor, MBeanError> {
    match type_name {
        EXECUTOR_TYPE => Ok(Executor::new("StandardThreadExecutor")),
        other => Err(MBeanError::UnknownType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mbean() -> ServiceMBean {
        ServiceMBean::new(Arc::new(RwLock::new(Service::new("Catalina"))))
    }

    #[test]
    fn test_add_connector_variants() {
        let mbean = mbean();
        mbean.add_connector(None, 8080, false, false);
        mbean.add_connector(Some("127.0.0.1"), 8443, false, true);
        mbean.add_connector(Some(""), 8009, true, false);

        assert_eq!(
            mbean.find_connectors(),
            vec![
                "Connector[HTTP/1.1-8080]".to_string(),
                "Connector[HTTP/1.1-127.0.0.1-8443]".to_string(),
                "Connector[AJP/1.3-8009]".to_string(),
            ]
        );

        let service = mbean.resource().read();
        let ssl = &service.connectors[1];
        assert!(ssl.secure);
        assert_eq!(ssl.scheme, "https");
        assert_eq!(service.connectors[2].property("address"), None);
    }

    #[test]
    fn test_executor_lifecycle() {
        let mbean = mbean();
        mbean.add_executor(EXECUTOR_TYPE).unwrap();
        assert_eq!(
            mbean.find_executors(),
            vec!["StandardThreadExecutor[StandardThreadExecutor]".to_string()]
        );
        assert!(mbean.get_executor("StandardThreadExecutor").is_some());
        assert!(mbean.get_executor("missing").is_none());

        mbean.remove_executor("StandardThreadExecutor").unwrap();
        assert!(mbean.find_executors().is_empty());
        assert!(matches!(
            mbean.remove_executor("StandardThreadExecutor"),
            Err(MBeanError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_executor_type() {
        assert_eq!(
            mbean().add_executor("com.example.Nope"),
            Err(MBeanError::UnknownType("com.example.Nope".into()))
        );
    }

    #[test]
    fn test_remove_connector() {
        let mbean = mbean();
        mbean.add_connector(None, 8080, false, false);
        assert!(mbean.remove_connector(8080).is_ok());
        assert!(mbean.remove_connector(8080).is_err());
    }
}
