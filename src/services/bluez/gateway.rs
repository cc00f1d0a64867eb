use std::{future::Future, time::Duration};

use async_trait::async_trait;
use tracing::{instrument, trace};
use zbus::{
    Connection,
    fdo::{IntrospectableProxy, PropertiesProxy},
    names::InterfaceName,
    proxy::CacheProperties,
};
use zbus_xml::Node;

use super::{BusError, PropertyValue};
use crate::config::BusKind;

/// The two questions the bridge ever asks the bus.
///
/// Player discovery and state reads depend only on this shape, so they can
/// run against a live connection or an in-memory object tree alike.
#[async_trait]
pub trait BusGateway: Send + Sync {
    /// Names of the immediate child objects below `path`.
    ///
    /// # Errors
    /// Returns error if the object cannot be introspected.
    async fn list_children(&self, path: &str) -> Result<Vec<String>, BusError>;

    /// Current value of `interface.name` on the object at `path`.
    ///
    /// # Errors
    /// Returns error if the object, interface or property is unavailable.
    async fn get_property(
        &self,
        path: &str,
        interface: &str,
        name: &str,
    ) -> Result<PropertyValue, BusError>;
}

/// Gateway backed by a zbus connection.
pub struct ZbusGateway {
    connection: Connection,
    service: String,
    call_timeout: Option<Duration>,
}

impl ZbusGateway {
    /// Connects to the requested bus.
    ///
    /// # Errors
    /// Returns error if the bus connection cannot be established.
    #[instrument(skip(service))]
    pub async fn connect(
        kind: BusKind,
        service: impl Into<String>,
        call_timeout: Option<Duration>,
    ) -> Result<Self, BusError> {
        let connection = match kind {
            BusKind::System => Connection::system().await?,
            BusKind::Session => Connection::session().await?,
        };

        Ok(Self::new(connection, service, call_timeout))
    }

    /// Wraps an existing connection.
    pub fn new(
        connection: Connection,
        service: impl Into<String>,
        call_timeout: Option<Duration>,
    ) -> Self {
        Self {
            connection,
            service: service.into(),
            call_timeout,
        }
    }

    async fn bounded<T, F>(&self, operation: &'static str, path: &str, call: F) -> Result<T, BusError>
    where
        F: Future<Output = Result<T, BusError>>,
    {
        let Some(timeout) = self.call_timeout else {
            return call.await;
        };

        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| BusError::Timeout {
                operation,
                path: path.to_string(),
                timeout,
            })?
    }
}

#[async_trait]
impl BusGateway for ZbusGateway {
    async fn list_children(&self, path: &str) -> Result<Vec<String>, BusError> {
        self.bounded("introspect", path, async {
            let proxy = IntrospectableProxy::builder(&self.connection)
                .destination(self.service.as_str())?
                .path(path)?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;

            let xml = proxy.introspect().await?;
            let node = Node::from_reader(xml.as_bytes()).map_err(|e| BusError::Introspection {
                path: path.to_string(),
                details: e.to_string(),
            })?;

            let children: Vec<String> = node
                .nodes()
                .iter()
                .filter_map(|child| child.name().map(str::to_string))
                .collect();
            trace!(path, ?children, "introspected");

            Ok::<_, BusError>(children)
        })
        .await
    }

    async fn get_property(
        &self,
        path: &str,
        interface: &str,
        name: &str,
    ) -> Result<PropertyValue, BusError> {
        self.bounded("get property", path, async {
            let interface = InterfaceName::try_from(interface).map_err(zbus::Error::from)?;
            let proxy = PropertiesProxy::builder(&self.connection)
                .destination(self.service.as_str())?
                .path(path)?
                .cache_properties(CacheProperties::No)
                .build()
                .await?;

            let value = proxy.get(interface, name).await?;
            trace!(path, name, "property fetched");

            Ok::<_, BusError>(PropertyValue::from(value))
        })
        .await
    }
}
