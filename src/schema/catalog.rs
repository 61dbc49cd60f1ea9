//! Catalog of known services, built-in plus any loaded from schema files.

use super::{builtin, loader, OperationSchema, ServiceSchema};
use crate::error::AdapterError;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    services: BTreeMap<String, ServiceSchema>,
}

impl Catalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in service definitions.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for service in builtin::services() {
            catalog.merge(service);
        }
        catalog
    }

    /// Built-in catalog extended with the schema files found at `paths`.
    pub fn with_schema_paths(paths: &[PathBuf]) -> Result<Self, AdapterError> {
        let mut catalog = Self::builtin();
        for service in loader::load_paths(paths)? {
            service.validate()?;
            catalog.merge(service);
        }
        Ok(catalog)
    }

    /// Merge a service into the catalog. Operations with the same name replace
    /// existing ones; endpoint metadata of the incoming definition wins.
    pub fn merge(&mut self, service: ServiceSchema) {
        match self.services.get_mut(&service.name) {
            Some(existing) => {
                debug!(service = %service.name, "Merging service definition into catalog");
                existing.endpoint_prefix = service.endpoint_prefix;
                existing.target_prefix = service.target_prefix;
                existing.json_version = service.json_version;
                for op in service.operations {
                    match existing.operations.iter_mut().find(|o| o.name == op.name) {
                        Some(slot) => *slot = op,
                        None => existing.operations.push(op),
                    }
                }
            }
            None => {
                self.services.insert(service.name.clone(), service);
            }
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceSchema> {
        self.services.get(name)
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceSchema> {
        self.services.values()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Look up a service and one of its operations by CLI spelling.
    pub fn resolve(
        &self,
        service: &str,
        operation: &str,
    ) -> Result<(&ServiceSchema, &OperationSchema), AdapterError> {
        let svc = self.service(service).ok_or_else(|| {
            let known: Vec<&str> = self.services.keys().map(|k| k.as_str()).collect();
            AdapterError::Schema(format!(
                "Unknown service '{}'. Known services: {}",
                service,
                known.join(", ")
            ))
        })?;
        let op = svc.operation(operation).ok_or_else(|| {
            AdapterError::Schema(format!(
                "Service '{}' has no operation '{}'. Run `awscmd operations --service {}` to list them.",
                service, operation, service
            ))
        })?;
        Ok((svc, op))
    }
}
