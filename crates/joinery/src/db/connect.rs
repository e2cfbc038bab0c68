use crate::Result;

use joinery_core::{
    async_trait,
    driver::{Capability, Connection, Driver},
    err, Error,
};

use std::borrow::Cow;
use url::Url;

/// Picks a built-in driver from the URL scheme.
#[derive(Debug)]
pub(super) struct Connect {
    url: Url,
    capability: &'static Capability,
}

impl Connect {
    pub(super) fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(anyhow::Error::from)?;

        let capability = match url.scheme() {
            "sqlite" => &Capability::SQLITE,
            scheme => {
                return Err(Error::unsupported_operation(format!(
                    "unsupported database; scheme={scheme}; url={url}"
                )))
            }
        };

        Ok(Self { url, capability })
    }
}

#[async_trait]
impl Driver for Connect {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.url.as_str())
    }

    fn capability(&self) -> &'static Capability {
        self.capability
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        match self.url.scheme() {
            "sqlite" => connect_sqlite(&self.url).await,
            scheme => Err(err!("no built-in driver for `{scheme}`")),
        }
    }
}

#[cfg(feature = "sqlite")]
async fn connect_sqlite(url: &Url) -> Result<Box<dyn Connection>> {
    joinery_driver_sqlite::Sqlite::new(url.as_str())?.connect().await
}

#[cfg(not(feature = "sqlite"))]
async fn connect_sqlite(_url: &Url) -> Result<Box<dyn Connection>> {
    Err(err!("`sqlite` feature not enabled"))
}
