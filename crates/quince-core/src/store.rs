//! The on-disk package store.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use quince_package::{
    PackageError, PackageKind, PackageMetadata, PackageName, PackageParser, Version,
};
use tokio::{fs, sync::Semaphore, task};
use tracing::{debug, warn};

use crate::{
    error::{ErrorContext, StoreError},
    lock::NameLocks,
    StoreResult,
};

/// Default bound on concurrent reads during a full listing.
pub const DEFAULT_PARALLEL_READS: usize = 16;

/// A directory of packages, one file per (name, kind) pair at
/// `<dir>/<name>.<ext>` with `ext` either `el` or `tar`.
///
/// Metadata is never stored separately; every save, load and listing
/// re-derives it from the persisted bytes through the parser. A later
/// save for the same name and kind silently replaces the earlier file.
/// There is no version history and no delete operation.
pub struct PackageStore {
    dir: PathBuf,
    parser: Arc<dyn PackageParser>,
    locks: NameLocks,
    parallel_reads: usize,
}

/// Outcome of a full listing: every stored package that parsed, plus
/// every recognized file that failed to read or parse. A bad file never
/// fails the listing and is never silently dropped.
///
/// Entry order in both lists is completion order of the underlying
/// reads, not directory order.
#[derive(Debug)]
pub struct Listing {
    pub packages: Vec<PackageMetadata>,
    pub failures: Vec<ListFailure>,
}

/// One file the listing could not turn into metadata.
#[derive(Debug)]
pub struct ListFailure {
    pub path: PathBuf,
    pub error: StoreError,
}

impl PackageStore {
    /// Opens the store directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>, parser: Arc<dyn PackageParser>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating store directory {}", dir.display()))?;

        Ok(PackageStore {
            dir,
            parser,
            locks: NameLocks::default(),
            parallel_reads: DEFAULT_PARALLEL_READS,
        })
    }

    /// Sets the bound on concurrent reads used by [`PackageStore::list_all`].
    pub fn with_parallel_reads(mut self, limit: usize) -> Self {
        self.parallel_reads = limit.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn package_path(&self, name: &PackageName, kind: PackageKind) -> PathBuf {
        self.dir.join(format!("{}.{}", name, kind.extension()))
    }

    /// Saves a single-file package. The content is parsed before
    /// anything touches the filesystem, so a parse failure writes
    /// nothing.
    pub async fn save_single_file(&self, content: &str) -> StoreResult<PackageMetadata> {
        let meta = self.parser.parse_single_file(content)?;
        self.write_package(&meta, content.as_bytes()).await?;
        Ok(meta)
    }

    /// Saves a multi-file package from in-memory archive bytes.
    pub async fn save_archive(&self, bytes: &[u8]) -> StoreResult<PackageMetadata> {
        let meta = self.parser.parse_archive_bytes(bytes)?;
        self.write_package(&meta, bytes).await?;
        Ok(meta)
    }

    /// Ingests an already-uploaded archive by moving the file into the
    /// store rather than copying its bytes, so large uploads are never
    /// buffered twice. The move is an atomic same-volume rename; only
    /// when the source lives on another filesystem does it degrade to
    /// copy-then-delete.
    pub async fn save_archive_from_path(
        &self,
        path: impl AsRef<Path>,
    ) -> StoreResult<PackageMetadata> {
        let path = path.as_ref();
        let meta = self.parser.parse_archive_file(path)?;
        let dest = self.package_path(&meta.name, meta.kind);

        let _guard = self.locks.lock(meta.name.as_str()).await;
        match fs::rename(path, &dest).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::CrossesDevices => {
                fs::copy(path, &dest)
                    .await
                    .with_context(|| format!("copying {} into the store", path.display()))?;
                fs::remove_file(path)
                    .await
                    .with_context(|| format!("removing relocated upload {}", path.display()))?;
            }
            Err(err) => {
                return Err(StoreError::IoError {
                    action: format!("moving {} into the store", path.display()),
                    source: err,
                });
            }
        }

        debug!("Stored {} {} at {}", meta.name, meta.version, dest.display());
        Ok(meta)
    }

    /// Saves raw upload bytes under a wire type tag. Any tag other than
    /// `single-file` or `archive` is rejected before anything is parsed
    /// or written.
    pub async fn save(&self, bytes: &[u8], type_tag: &str) -> StoreResult<PackageMetadata> {
        let kind = PackageKind::from_type_tag(type_tag)
            .ok_or_else(|| StoreError::UnknownFileType(type_tag.to_string()))?;

        match kind {
            PackageKind::SingleFile => {
                let source = std::str::from_utf8(bytes).map_err(PackageError::from)?;
                self.save_single_file(source).await
            }
            PackageKind::Archive => self.save_archive(bytes).await,
        }
    }

    /// Loads a package's raw bytes plus its re-derived metadata.
    ///
    /// The stored version must equal `version` exactly; otherwise the
    /// call fails with [`StoreError::WrongVersion`] naming both
    /// versions.
    pub async fn load(
        &self,
        name: &str,
        version: &Version,
        kind: PackageKind,
    ) -> StoreResult<(Vec<u8>, PackageMetadata)> {
        let name = PackageName::new(name)?;
        let path = self.package_path(&name, kind);
        let bytes = fs::read(&path)
            .await
            .with_context(|| format!("reading package file {}", path.display()))?;

        let meta = self.parser.parse(&bytes, kind)?;
        if meta.version != *version {
            return Err(StoreError::WrongVersion {
                name,
                requested: version.clone(),
                stored: meta.version,
            });
        }

        Ok((bytes, meta))
    }

    /// Lists every package in the store.
    ///
    /// One read-then-parse task runs per recognized package file, at
    /// most `parallel_reads` at a time, and the call returns only once
    /// every task has finished. Files that fail to read or parse are
    /// collected in [`Listing::failures`] and logged; they do not fail
    /// the call. Files without a package extension (lock files,
    /// in-progress temporaries) are skipped.
    pub async fn list_all(&self) -> StoreResult<Listing> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("listing store directory {}", self.dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("listing store directory {}", self.dir.display()))?
        {
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("inspecting {}", entry.path().display()))?;
            if file_type.is_dir() {
                continue;
            }
            let path = entry.path();
            let Some(kind) = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(PackageKind::from_extension)
            else {
                continue;
            };
            files.push((path, kind));
        }

        let semaphore = Arc::new(Semaphore::new(self.parallel_reads));
        let mut workers = Vec::with_capacity(files.len());
        for (path, kind) in files {
            let permit = semaphore.clone().acquire_owned().await.unwrap();
            let parser = self.parser.clone();
            workers.push(task::spawn(async move {
                let _permit = permit;
                let result = read_and_parse(parser.as_ref(), &path, kind).await;
                (path, result)
            }));
        }

        // Join barrier: the listing is delivered only after every worker
        // has reported, success or failure.
        let mut listing = Listing {
            packages: Vec::with_capacity(workers.len()),
            failures: Vec::new(),
        };
        for worker in workers {
            let (path, result) = worker
                .await
                .map_err(|err| StoreError::ListingWorker(err.to_string()))?;
            match result {
                Ok(meta) => listing.packages.push(meta),
                Err(error) => {
                    warn!("Skipping {} in listing: {error}", path.display());
                    listing.failures.push(ListFailure { path, error });
                }
            }
        }

        Ok(listing)
    }

    async fn write_package(&self, meta: &PackageMetadata, bytes: &[u8]) -> StoreResult<()> {
        let dest = self.package_path(&meta.name, meta.kind);
        // Same-directory temporary so the final rename stays on one volume.
        let tmp = self
            .dir
            .join(format!(".{}.{}.part", meta.name, meta.kind.extension()));

        let _guard = self.locks.lock(meta.name.as_str()).await;
        fs::write(&tmp, bytes)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, &dest)
            .await
            .with_context(|| format!("replacing {}", dest.display()))?;

        debug!("Stored {} {} at {}", meta.name, meta.version, dest.display());
        Ok(())
    }
}

async fn read_and_parse(
    parser: &dyn PackageParser,
    path: &Path,
    kind: PackageKind,
) -> StoreResult<PackageMetadata> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("reading package file {}", path.display()))?;
    Ok(parser.parse(&bytes, kind)?)
}
