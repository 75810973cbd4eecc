//! Live vehicle counting: frames arrive over a WebSocket as base64 images, each
//! one is run through a YOLO detector, and per-frame small/big vehicle counts
//! with boxes are streamed back as JSON.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
