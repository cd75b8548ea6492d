use quarry_core::{driver::Connection, Error, Result};

use url::Url;

/// Opens a driver connection, picking the driver from the URL scheme.
pub(super) async fn connect(url: &str) -> Result<Box<dyn Connection>> {
    let parsed = Url::parse(url)
        .map_err(|err| Error::invalid_connection_url(format!("{err}; url={url}")))?;

    match parsed.scheme() {
        "mysql" => connect_mysql(url).await,
        "sqlite" => connect_sqlite(url),
        scheme => Err(Error::invalid_connection_url(format!(
            "unsupported database; scheme={scheme}; url={url}"
        ))),
    }
}

#[cfg(feature = "mysql")]
async fn connect_mysql(url: &str) -> Result<Box<dyn Connection>> {
    let driver = quarry_driver_mysql::MySql::connect(url).await?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "mysql"))]
async fn connect_mysql(_url: &str) -> Result<Box<dyn Connection>> {
    Err(Error::invalid_connection_url("`mysql` feature not enabled"))
}

#[cfg(feature = "sqlite")]
fn connect_sqlite(url: &str) -> Result<Box<dyn Connection>> {
    let driver = quarry_driver_sqlite::Sqlite::connect(url)?;
    Ok(Box::new(driver))
}

#[cfg(not(feature = "sqlite"))]
fn connect_sqlite(_url: &str) -> Result<Box<dyn Connection>> {
    Err(Error::invalid_connection_url("`sqlite` feature not enabled"))
}
