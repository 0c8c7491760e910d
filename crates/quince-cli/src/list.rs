use quince_core::PackageStore;
use quince_package::{PackageKind, Version};
use tracing::warn;

use crate::{error::CliResult, response};

pub async fn list_packages(store: &PackageStore) -> CliResult<()> {
    let listing = store.list_all().await?;

    for failure in &listing.failures {
        warn!(
            "Unreadable package file {}: {}",
            failure.path.display(),
            failure.error
        );
    }

    println!("{}", response::archive_contents(&listing));
    Ok(())
}

pub async fn show_package(
    store: &PackageStore,
    name: &str,
    version: &str,
    kind: PackageKind,
) -> CliResult<()> {
    let version = Version::parse(version)?;
    let (_, meta) = store.load(name, &version, kind).await?;

    println!("{}", response::package_metadata(&meta));
    Ok(())
}
