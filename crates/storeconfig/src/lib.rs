// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Store engine for server configuration
//!
//! Walks a live component tree (server, services, connectors, executors,
//! engine, hosts, contexts, listeners, valves) and writes it back as a
//! `server.xml` document that the server's own loader can read again.
//!
//! # Architecture
//!
//! ```text
//! StoreConfig ── registry.lookup(root) ──> StoreDescription ──> StoreStrategy
//!                                                                   │
//!      StoreAppender <── tags / attributes / arrays ────────────────┤
//!                                                                   │
//!      for each child: registry.lookup(child, qualifier) ──> child strategy ...
//! ```
//!
//! - **Registry** ([`StoreRegistry`]): descriptions keyed by runtime type,
//!   optionally scoped by a parent-context qualifier (`type.[Qualifier]`),
//!   with an interface-style family fallback.
//! - **Strategies** ([`StrategyKind`]): standard, connector and string-array
//!   rendering; missing child descriptions are reported, never fatal.
//! - **Appender** ([`StoreAppender`]): indentation, escaping, array tags.
//!
//! # Quick Start
//!
//! ```
//! use storeconfig::model::{Connector, Server, Service};
//! use storeconfig::StoreConfig;
//!
//! let mut service = Service::new("Catalina");
//! service.add_connector(Connector::new("HTTP/1.1", 8080));
//! let mut server = Server::new();
//! server.add_service(service);
//!
//! let (xml, report) = StoreConfig::with_defaults().store_to_string(&server).unwrap();
//! assert!(xml.contains("<Connector port=\"8080\" protocol=\"HTTP/1.1\"/>"));
//! assert!(report.is_clean());
//! ```

pub mod appender;
pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod file;
pub mod loader;
pub mod mbeans;
pub mod model;
pub mod naming;
pub mod registry;
pub mod strategy;
pub mod subject;

pub use appender::{escape_attribute, escape_xml, Attribute, StoreAppender};
pub use config::{ConfigError, StoreConfigFile, StoreOptions};
pub use descriptor::{qualified_key, ArraySpec, ChildSpec, StoreDescription};
pub use diagnostics::{Diagnostic, MessageKey};
pub use engine::{RenderState, StoreConfig, StoreReport};
pub use error::StoreError;
pub use file::StoreFileMover;
pub use loader::{LoadError, ServerLoader};
pub use mbeans::{MBeanError, ServiceMBean};
pub use naming::EjbRef;
pub use registry::StoreRegistry;
pub use strategy::{StoreContext, StoreStrategy, StrategyKind};
pub use subject::{Property, Subject, Value};
