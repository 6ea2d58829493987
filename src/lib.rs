//! assetmount - incremental asset bundle materialization
//!
//! Presents a read-only asset bundle (a directory, a tar archive or a
//! zstd-compressed tar archive) as a writable directory tree. Entries are
//! copied into a mount root on demand, existing files are never rewritten, and
//! re-running a materialization only creates what is missing.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let bundle = assetmount::bundle::open_bundle(Path::new("assets.tar.zst"))?;
//! let report = assetmount::materialize(bundle.as_ref(), "data", Path::new("files"))?;
//! println!("{report}");
//! # Ok::<(), assetmount::error::AssetError>(())
//! ```

pub mod bundle;
pub mod cancel;
pub mod config;
pub mod copier;
pub mod error;
pub mod exclude;
pub mod hash;
pub mod materializer;
pub mod planner;
pub mod progress;
pub mod report;
pub mod resolver;
pub mod task;
pub mod verify;

pub use bundle::{BundleEntry, BundleReader, EntryKind, LogicalPath, open_bundle};
pub use cancel::CancelToken;
pub use error::{AssetError, Result};
pub use materializer::{Materializer, materialize};
pub use report::RunReport;
pub use resolver::{Resolved, Resolver};
pub use task::{MaterializationResult, MaterializationTask, Outcome};
pub use verify::{Verifier, VerifyReport};
