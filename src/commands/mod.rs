//! CLI commands for header-release
//!
//! ## Setup & Inspection
//! - **init**: Write a release.toml with the default layout
//! - **status**: Compare every manifest with the version of record
//!
//! ## Version propagation
//! - **update-versions**: Rewrite every manifest from the version of record
//! - **mirror**: Sync the hardware-platform mirror repository
//! - **release**: Version propagation followed by mirror sync, with a run report
//!
//! ## Distribution & Docs
//! - **package**: Build the standalone zip archive
//! - **doc-groups**: Generate API group pages from Doxygen XML
//! - **verify-generators**: Check generated headers against their templates
//!
//! All commands accept `&ProjectContext` so configuration is loaded once.

pub mod docs;
pub mod init;
pub mod mirror;
pub mod package;
pub mod release;
pub mod status;
pub mod verify;
pub mod versions;

pub use docs::run_doc_groups;
pub use init::run_init;
pub use mirror::run_mirror;
pub use package::run_package;
pub use release::run_release;
pub use status::run_status;
pub use verify::run_verify_generators;
pub use versions::run_update_versions;
