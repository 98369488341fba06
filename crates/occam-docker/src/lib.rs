//! # occam-docker
//!
//! Image inspection against a container runtime.
//!
//! Handles:
//! - **Image model**: [`Image`](image::Image), decoded from
//!   `docker image inspect` output, including the buildpacks recorded by the
//!   lifecycle in the image labels.
//! - **Client**: the [`ImageClient`](client::ImageClient) seam and its
//!   docker CLI implementation.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod client;
pub mod error;
pub mod image;

pub use client::{DockerImageClient, ImageClient};
pub use error::DockerError;
pub use image::{Image, ImageBuildpackMetadata, ImageBuildpackMetadataLayer};
