//! # occam-pack
//!
//! Fluent helper for running `pack build` from tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use occam_pack::Pack;
//!
//! let (image, logs) = Pack::new()
//!     .with_no_color()
//!     .build
//!     .with_builder("paketobuildpacks/builder-jammy-base")
//!     .with_buildpacks(["paketo-buildpacks/go"])
//!     .with_env([("BP_GO_VERSION", "1.22.*")])
//!     .with_no_pull()
//!     .execute("my-app", "./testdata/app")
//!     .map_err(|err| {
//!         eprintln!("{}", err.logs());
//!         err
//!     })?;
//! println!("{} built\n{logs}", image.id);
//! # Ok::<(), occam_pack::PackError>(())
//! ```

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod builder;
pub mod error;

pub use builder::{Pack, PackBuild};
pub use error::PackError;
