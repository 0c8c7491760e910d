use std::{io::Write, path::Path};

use quince_core::PackageStore;
use quince_package::{PackageKind, Version};
use tracing::info;

use crate::error::{CliResult, ErrorContext};

pub async fn fetch_package(
    store: &PackageStore,
    name: &str,
    version: &str,
    kind: PackageKind,
    output: Option<&Path>,
) -> CliResult<()> {
    let version = Version::parse(version)?;
    let (bytes, meta) = store.load(name, &version, kind).await?;

    match output {
        Some(path) => {
            tokio::fs::write(path, &bytes)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {} {} to {}", meta.name, meta.version, path.display());
        }
        None => {
            std::io::stdout()
                .write_all(&bytes)
                .with_context(|| "writing package content to stdout".to_string())?;
        }
    }

    Ok(())
}
