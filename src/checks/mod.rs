//! The fixed check definitions the binaries run

pub mod dashboard;
pub mod pages;

/// Anchor selector for vehicle detail links, shared by both checks' probes
pub const VEHICLE_LINK_SELECTOR: &str = "a[href^='/vehicle/']";
