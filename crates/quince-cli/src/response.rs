//! Protocol responses, built entirely out of sexp values.
//!
//! The query protocol answers with alists and vectors: the archive
//! contents listing maps each package name to a
//! `[version-components description kind]` cell, and single-package
//! responses reuse the same shapes.

use quince_core::Listing;
use quince_package::PackageMetadata;
use quince_sexp::Sexp;

fn version_list(meta: &PackageMetadata) -> Sexp {
    Sexp::list(
        meta.version
            .components()
            .iter()
            .map(|&component| Sexp::Int(component as i64)),
    )
}

fn contents_cell(meta: &PackageMetadata) -> Sexp {
    Sexp::vector([
        version_list(meta),
        Sexp::string(meta.description.clone()),
        Sexp::symbol(meta.kind.type_tag()),
    ])
}

/// The full archive contents response.
pub fn archive_contents(listing: &Listing) -> String {
    Sexp::alist(
        listing
            .packages
            .iter()
            .map(|meta| (meta.name.as_str(), contents_cell(meta))),
    )
    .render()
}

/// Metadata response for one package.
pub fn package_metadata(meta: &PackageMetadata) -> String {
    Sexp::alist([
        ("name", Sexp::symbol(meta.name.as_str())),
        ("version", version_list(meta)),
        ("description", Sexp::string(meta.description.clone())),
        ("kind", Sexp::symbol(meta.kind.type_tag())),
    ])
    .render()
}

/// Acknowledgement for a completed upload.
pub fn upload_ack(meta: &PackageMetadata) -> String {
    Sexp::alist([
        (
            "message",
            Sexp::string(format!("Saved {} version {}", meta.name, meta.version)),
        ),
        ("name", Sexp::symbol(meta.name.as_str())),
        ("version", version_list(meta)),
    ])
    .render()
}
