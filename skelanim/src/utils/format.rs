//! Formatting utilities

use humansize::{BINARY, format_size};

/// Format a byte count with binary units
pub fn format_bytes(bytes: usize) -> String {
    format_size(bytes as u64, BINARY)
}

/// Format a position with three decimals, printing negative zero as zero
pub fn format_vec3(v: glam::Vec3) -> String {
    let clean = |c: f32| if c == 0.0 { 0.0 } else { c };
    format!("({:.3}, {:.3}, {:.3})", clean(v.x), clean(v.y), clean(v.z))
}

/// Format a duration in seconds
pub fn format_seconds(seconds: f32) -> String {
    format!("{seconds:.3}s")
}
