//! Core geometry and image utilities for QR position pattern detection.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete polygon detector or image container.

mod homography;
mod image;
mod logger;

pub use homography::{homography_from_4pt, quad_area, Homography};
pub use image::{sample_bilinear, sample_bilinear_u8, GrayImage, GrayImageView};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
