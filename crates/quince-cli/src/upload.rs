use std::path::Path;

use quince_core::PackageStore;
use quince_package::PackageKind;
use tracing::info;

use crate::{
    cli::KindArg,
    error::{CliError, CliResult, ErrorContext},
    response,
};

pub async fn upload_package(
    store: &PackageStore,
    file: &Path,
    kind: Option<KindArg>,
    relocate: bool,
) -> CliResult<()> {
    let kind = match kind {
        Some(kind) => kind.into(),
        None => infer_kind(file)?,
    };

    let meta = match kind {
        PackageKind::SingleFile if relocate => return Err(CliError::RelocateSingleFile),
        PackageKind::SingleFile => {
            let content = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("reading upload {}", file.display()))?;
            store.save_single_file(&content).await?
        }
        PackageKind::Archive if relocate => store.save_archive_from_path(file).await?,
        PackageKind::Archive => {
            let bytes = tokio::fs::read(file)
                .await
                .with_context(|| format!("reading upload {}", file.display()))?;
            store.save_archive(&bytes).await?
        }
    };

    info!("Uploaded {} {}", meta.name, meta.version);
    println!("{}", response::upload_ack(&meta));
    Ok(())
}

fn infer_kind(file: &Path) -> CliResult<PackageKind> {
    file.extension()
        .and_then(|ext| ext.to_str())
        .and_then(PackageKind::from_extension)
        .ok_or_else(|| CliError::UnknownKind(file.display().to_string()))
}
