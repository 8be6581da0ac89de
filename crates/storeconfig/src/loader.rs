// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! server.xml loader.
//!
//! Reads documents in the format the store engine writes back into the
//! component model, so a stored tree can be checked for round-trip fidelity.
//! Recognised attributes fill typed fields (absent ones take the model
//! defaults); anything else on a connector becomes a protocol property and
//! anything on a listener or valve stays a free-form property.

use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{
    Connector, Context, Engine, Executor, Host, Plugin, PluginKind, Server, Service,
    CONNECTOR_ATTRIBUTES, DEFAULT_PROTOCOL, EXECUTOR_TYPE,
};

/// Loader errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub struct ServerLoader;

impl ServerLoader {
    /// Load a server tree from a file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Server, LoadError> {
        let xml = fs::read_to_string(path)?;
        Self::parse_xml(&xml)
    }

    /// Parse a `<Server>` document.
    pub fn parse_xml(xml: &str) -> Result<Server, LoadError> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();
        if root.tag_name().name() != "Server" {
            return Err(LoadError::Invalid(format!(
                "Expected <Server> root element, found <{}>",
                root.tag_name().name()
            )));
        }
        Self::parse_server(&root)
    }

    fn parse_server(node: &Node) -> Result<Server, LoadError> {
        let defaults = Server::default();
        let mut server = Server {
            port: int_attr(node, "port", defaults.port)?,
            shutdown: str_attr(node, "shutdown", &defaults.shutdown),
            address: str_attr(node, "address", &defaults.address),
            ..defaults
        };

        for child in elements(node) {
            match child.tag_name().name() {
                "Listener" => server.add_listener(parse_plugin(&child, PluginKind::Listener)?),
                "Service" => server.add_service(Self::parse_service(&child)?),
                other => unexpected(node, other),
            }
        }
        Ok(server)
    }

    fn parse_service(node: &Node) -> Result<Service, LoadError> {
        let mut service = Service::new(required_attr(node, "name")?);
        for child in elements(node) {
            match child.tag_name().name() {
                "Executor" => service.add_executor(parse_executor(&child)?),
                "Connector" => service.add_connector(parse_connector(&child)?),
                "Engine" => {
                    if service.engine.is_some() {
                        return Err(LoadError::Invalid(format!(
                            "Service {} declares more than one Engine",
                            service.name
                        )));
                    }
                    service.set_engine(Self::parse_engine(&child)?);
                }
                other => unexpected(node, other),
            }
        }
        Ok(service)
    }

    fn parse_engine(node: &Node) -> Result<Engine, LoadError> {
        let mut engine = Engine::new(required_attr(node, "name")?);
        engine.default_host = str_attr(node, "defaultHost", &engine.default_host);
        engine.jvm_route = node.attribute("jvmRoute").map(str::to_string);

        for child in elements(node) {
            match child.tag_name().name() {
                "Listener" => engine.listeners.push(parse_plugin(&child, PluginKind::Listener)?),
                "Valve" => engine.valves.push(parse_plugin(&child, PluginKind::Valve)?),
                "Host" => engine.add_host(Self::parse_host(&child)?),
                other => unexpected(node, other),
            }
        }
        Ok(engine)
    }

    fn parse_host(node: &Node) -> Result<Host, LoadError> {
        let mut host = Host::new(required_attr(node, "name")?);
        host.app_base = str_attr(node, "appBase", &host.app_base);
        host.unpack_wars = bool_attr(node, "unpackWARs", host.unpack_wars)?;
        host.auto_deploy = bool_attr(node, "autoDeploy", host.auto_deploy)?;

        for child in elements(node) {
            match child.tag_name().name() {
                "Listener" => host.listeners.push(parse_plugin(&child, PluginKind::Listener)?),
                "Valve" => host.valves.push(parse_plugin(&child, PluginKind::Valve)?),
                "Context" => host.add_context(parse_context(&child)?),
                other => unexpected(node, other),
            }
        }
        Ok(host)
    }
}

fn parse_context(node: &Node) -> Result<Context, LoadError> {
    let mut context = Context::new(
        node.attribute("path").unwrap_or(""),
        node.attribute("docBase").unwrap_or(""),
    );
    context.reloadable = bool_attr(node, "reloadable", context.reloadable)?;
    context.cookies = bool_attr(node, "cookies", context.cookies)?;
    context.privileged = bool_attr(node, "privileged", context.privileged)?;

    for child in elements(node) {
        let text = child.text().unwrap_or("");
        match child.tag_name().name() {
            "Listener" => context.listeners.push(parse_plugin(&child, PluginKind::Listener)?),
            "Valve" => context.valves.push(parse_plugin(&child, PluginKind::Valve)?),
            "WatchedResource" => context.add_watched_resource(text),
            "WrapperLifecycle" => context.add_wrapper_lifecycle(text),
            "WrapperListener" => context.add_wrapper_listener(text),
            other => unexpected(node, other),
        }
    }
    Ok(context)
}

fn parse_executor(node: &Node) -> Result<Executor, LoadError> {
    let class_name = node.attribute("className").unwrap_or(EXECUTOR_TYPE);
    let mut executor = Executor::with_class(class_name, required_attr(node, "name")?);
    executor.name_prefix = str_attr(node, "namePrefix", &executor.name_prefix);
    executor.max_threads = int_attr(node, "maxThreads", executor.max_threads)?;
    executor.min_spare_threads = int_attr(node, "minSpareThreads", executor.min_spare_threads)?;
    executor.max_idle_time = int_attr(node, "maxIdleTime", executor.max_idle_time)?;
    executor.daemon = bool_attr(node, "daemon", executor.daemon)?;
    Ok(executor)
}

fn parse_connector(node: &Node) -> Result<Connector, LoadError> {
    let mut connector = Connector::new(
        node.attribute("protocol").unwrap_or(DEFAULT_PROTOCOL),
        int_attr(node, "port", -1)?,
    );
    connector.secure = bool_attr(node, "secure", connector.secure)?;
    connector.scheme = str_attr(node, "scheme", &connector.scheme);
    connector.redirect_port = int_attr(node, "redirectPort", connector.redirect_port)?;
    connector.executor = node.attribute("executor").map(str::to_string);
    connector.max_threads = int_attr(node, "maxThreads", connector.max_threads)?;
    connector.min_spare_threads = int_attr(node, "minSpareThreads", connector.min_spare_threads)?;

    for attr in node.attributes() {
        if !CONNECTOR_ATTRIBUTES.contains(&attr.name()) {
            connector.set_property(attr.name(), attr.value());
        }
    }
    Ok(connector)
}

fn parse_plugin(node: &Node, kind: PluginKind) -> Result<Plugin, LoadError> {
    let mut plugin = Plugin::new(kind, required_attr(node, "className")?);
    for attr in node.attributes() {
        if attr.name() != "className" {
            plugin.set(attr.name(), attr.value());
        }
    }
    Ok(plugin)
}

fn elements<'a, 'input>(node: &Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn unexpected(parent: &Node, tag: &str) {
    warn!(
        parent = parent.tag_name().name(),
        element = tag,
        "ignoring unsupported element"
    );
}

fn required_attr<'a>(node: &Node<'a, '_>, name: &str) -> Result<&'a str, LoadError> {
    node.attribute(name).ok_or_else(|| {
        LoadError::Invalid(format!(
            "<{}> is missing required attribute {}",
            node.tag_name().name(),
            name
        ))
    })
}

fn str_attr(node: &Node, name: &str, default: &str) -> String {
    node.attribute(name).unwrap_or(default).to_string()
}

fn int_attr(node: &Node, name: &str, default: i32) -> Result<i32, LoadError> {
    parse_attr(node, name, default)
}

fn bool_attr(node: &Node, name: &str, default: bool) -> Result<bool, LoadError> {
    parse_attr(node, name, default)
}

fn parse_attr<T: FromStr>(node: &Node, name: &str, default: T) -> Result<T, LoadError> {
    match node.attribute(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            LoadError::Invalid(format!(
                "<{}> attribute {}=\"{}\" is not valid",
                node.tag_name().name(),
                name,
                raw
            ))
        }),
        None => {
            debug!(element = node.tag_name().name(), attribute = name, "attribute defaulted");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Server port="8015">
  <Listener className="org.apache.catalina.startup.VersionLoggerListener" logArgs="false"/>
  <Service name="Catalina">
    <Executor name="tomcatThreadPool" maxThreads="150"/>
    <Connector port="8080" protocol="HTTP/1.1" executor="tomcatThreadPool" address="0.0.0.0" compression="on"/>
    <Engine name="Catalina" jvmRoute="node1">
      <Host name="localhost" autoDeploy="false">
        <Valve className="org.apache.catalina.valves.AccessLogValve" directory="logs"/>
        <Context path="/app" docBase="app" reloadable="true">
          <WrapperLifecycle>a.Listener1</WrapperLifecycle>
          <WatchedResource>WEB-INF/web.xml</WatchedResource>
        </Context>
      </Host>
    </Engine>
  </Service>
</Server>
"#;

    #[test]
    fn test_parse_sample() {
        let server = ServerLoader::parse_xml(SAMPLE).unwrap();
        assert_eq!(server.port, 8015);
        assert_eq!(server.shutdown, "SHUTDOWN");
        assert_eq!(server.listeners[0].get("logArgs"), Some("false"));

        let service = server.find_service("Catalina").unwrap();
        assert_eq!(service.get_executor("tomcatThreadPool").unwrap().max_threads, 150);

        let connector = &service.connectors[0];
        assert_eq!(connector.port, 8080);
        assert_eq!(connector.executor.as_deref(), Some("tomcatThreadPool"));
        assert_eq!(
            connector.properties,
            vec![
                ("address".to_string(), "0.0.0.0".to_string()),
                ("compression".to_string(), "on".to_string())
            ]
        );

        let engine = service.engine.as_ref().unwrap();
        assert_eq!(engine.jvm_route.as_deref(), Some("node1"));
        let host = engine.find_host("localhost").unwrap();
        assert!(!host.auto_deploy);
        assert_eq!(host.valves[0].kind, PluginKind::Valve);
        let context = host.find_context("/app").unwrap();
        assert!(context.reloadable);
        assert_eq!(context.find_wrapper_lifecycles(), ["a.Listener1".to_string()]);
        assert_eq!(context.watched_resources, vec!["WEB-INF/web.xml".to_string()]);
    }

    #[test]
    fn test_wrong_root_element() {
        let err = ServerLoader::parse_xml("<Engine name=\"x\"/>").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(_)));
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let err = ServerLoader::parse_xml("<Server port=\"eighty\"/>").unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_missing_class_name_is_rejected() {
        let err = ServerLoader::parse_xml("<Server><Listener/></Server>").unwrap_err();
        assert!(err.to_string().contains("className"));
    }

    #[test]
    fn test_malformed_xml() {
        assert!(matches!(
            ServerLoader::parse_xml("<Server>").unwrap_err(),
            LoadError::Xml(_)
        ));
    }
}
