//! Dialect selection
//!
//! The factory is the one place that looks at the configured
//! [`AccessControlMode`]. Everything it hands out works through the
//! dialect-agnostic [`AccessDatasetBuilder`] and [`AccessDataset`] surfaces.

use tracing::{debug, warn};

use crate::builder::AccessDatasetBuilder;
use crate::config::TestSubjectConfig;
use crate::dataset::{
    AccessControlMode, AccessDataset, AcpCompiler, AcpDataset, AcpLegacyCompiler, AcpLegacyDataset,
    DatasetCompiler, WacCompiler, WacDataset,
};
use crate::errors::Result;
use crate::http::{self, HttpClient, MEDIA_TYPE_TEXT_TURTLE};

/// Hands out builders and datasets for the configured dialect
///
/// With no dialect configured every method returns `None`: the server has
/// no access control support the caller can drive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessControlFactory {
    mode: Option<AccessControlMode>,
}

impl AccessControlFactory {
    pub fn new(mode: Option<AccessControlMode>) -> Self {
        Self { mode }
    }

    pub fn from_config(config: &TestSubjectConfig) -> Self {
        Self::new(config.access_control_mode)
    }

    pub fn mode(&self) -> Option<AccessControlMode> {
        self.mode
    }

    /// Builder for new grants, with `base_uri` (the ACL document) already set
    pub fn access_dataset_builder(&self, base_uri: &str) -> Option<AccessDatasetBuilder> {
        let compiler = self.compiler()?;
        Some(AccessDatasetBuilder::new(compiler).set_base_uri(base_uri))
    }

    /// Parse a server's ACL document with the configured dialect
    pub fn create_access_dataset(&self, acl: &str, base_uri: &str) -> Result<Option<Box<dyn AccessDataset>>> {
        let Some(mode) = self.configured() else {
            return Ok(None);
        };
        let dataset: Box<dyn AccessDataset> = match mode {
            AccessControlMode::Wac => Box::new(WacDataset::from_turtle(acl, base_uri)?),
            AccessControlMode::Acp => Box::new(AcpDataset::from_turtle(acl, base_uri)?),
            AccessControlMode::AcpLegacy => Box::new(AcpLegacyDataset::from_turtle(acl, base_uri)?),
        };
        Ok(Some(dataset))
    }

    /// GET the ACL document at `acl_uri` and parse it
    ///
    /// A non-2xx response means there is no document to read and yields `None`.
    pub fn fetch_access_dataset(
        &self,
        client: &dyn HttpClient,
        acl_uri: &str,
    ) -> Result<Option<Box<dyn AccessDataset>>> {
        if self.configured().is_none() {
            return Ok(None);
        }

        let response = client.get(acl_uri, MEDIA_TYPE_TEXT_TURTLE)?;
        if !http::is_successful(response.status) {
            debug!(uri = acl_uri, status = response.status, "no readable ACL document");
            return Ok(None);
        }
        self.create_access_dataset(&response.body, acl_uri)
    }

    fn compiler(&self) -> Option<Box<dyn DatasetCompiler>> {
        let compiler: Box<dyn DatasetCompiler> = match self.configured()? {
            AccessControlMode::Wac => Box::new(WacCompiler),
            AccessControlMode::Acp => Box::new(AcpCompiler),
            AccessControlMode::AcpLegacy => Box::new(AcpLegacyCompiler),
        };
        Some(compiler)
    }

    fn configured(&self) -> Option<AccessControlMode> {
        if self.mode.is_none() {
            warn!("no access control mode configured");
        }
        self.mode
    }
}
