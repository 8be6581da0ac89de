// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-memory server component tree.
//!
//! These types are the subjects the store engine serializes out of the box:
//!
//! ```text
//! Server
//! ├── Listener*
//! └── Service*
//!     ├── Executor*
//!     ├── Connector*
//!     └── Engine?
//!         ├── Listener*, Valve*
//!         └── Host*
//!             ├── Listener*, Valve*
//!             └── Context*
//!                 ├── Listener*, Valve*
//!                 └── WatchedResource*, WrapperLifecycle*, WrapperListener*
//! ```

mod container;
mod descriptions;
mod plugin;
mod server;
mod service;

pub use container::{Context, Engine, Host};
pub use descriptions::default_descriptions;
pub use plugin::{Plugin, PluginKind};
pub use server::Server;
pub use service::{
    Connector, Executor, Service, AJP_PROTOCOL, CONNECTOR_ATTRIBUTES, DEFAULT_PROTOCOL,
};

pub const SERVER_TYPE: &str = "org.apache.catalina.core.StandardServer";
pub const SERVICE_TYPE: &str = "org.apache.catalina.core.StandardService";
pub const CONNECTOR_TYPE: &str = "org.apache.catalina.connector.Connector";
pub const EXECUTOR_TYPE: &str = "org.apache.catalina.core.StandardThreadExecutor";
pub const ENGINE_TYPE: &str = "org.apache.catalina.core.StandardEngine";
pub const HOST_TYPE: &str = "org.apache.catalina.core.StandardHost";
pub const CONTEXT_TYPE: &str = "org.apache.catalina.core.StandardContext";

pub const EXECUTOR_FAMILY: &str = "org.apache.catalina.Executor";
pub const LISTENER_FAMILY: &str = "org.apache.catalina.LifecycleListener";
pub const VALVE_FAMILY: &str = "org.apache.catalina.Valve";

/// Upcast a slice of concrete subjects for [`Subject::children`](crate::Subject::children).
pub(crate) fn subjects<T: crate::Subject>(items: &[T]) -> Vec<&dyn crate::Subject> {
    items.iter().map(|s| s as &dyn crate::Subject).collect()
}
