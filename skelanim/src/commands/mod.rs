//! Command implementations

pub mod blend;
pub mod build;
pub mod info;
pub mod sample;

use anyhow::{Context, Result, bail};
use console::style;
use skel_math::Float4x4;
use skel_runtime::{Animation, Archive, Skeleton};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::utils::format_vec3;

pub(crate) fn load_skeleton(path: &Path) -> Result<Skeleton> {
    Skeleton::from_path(path)
        .with_context(|| format!("Failed to load skeleton: {}", path.display()))
}

pub(crate) fn load_animation(path: &Path) -> Result<Animation> {
    Animation::from_path(path)
        .with_context(|| format!("Failed to load animation: {}", path.display()))
}

/// Animations drive the skeleton joint by joint, track `i` being joint `i`.
pub(crate) fn check_compatible(skeleton: &Skeleton, animation: &Animation) -> Result<()> {
    if animation.num_tracks() != skeleton.num_joints() {
        bail!(
            "Animation '{}' has {} tracks but the skeleton has {} joints",
            animation.name(),
            animation.num_tracks(),
            skeleton.num_joints()
        );
    }
    Ok(())
}

/// Print the translation part of every model-space matrix.
pub(crate) fn print_joint_positions(
    skeleton: &Skeleton,
    models: &[Float4x4],
    format: OutputFormat,
) -> Result<()> {
    let positions = models.iter().map(|m| glam::Vec3::from(m.cols[3]));
    match format {
        OutputFormat::Text => {
            let width = skeleton
                .joint_names()
                .iter()
                .map(String::len)
                .max()
                .unwrap_or(0);
            for (joint, (name, position)) in skeleton.joint_names().iter().zip(positions).enumerate() {
                println!(
                    "{joint:>4}  {:<width$}  {}",
                    style(name).cyan(),
                    format_vec3(position)
                );
            }
        }
        OutputFormat::Json => {
            let joints: Vec<_> = skeleton
                .joint_names()
                .iter()
                .zip(positions)
                .enumerate()
                .map(|(joint, (name, p))| {
                    serde_json::json!({
                        "joint": joint,
                        "name": name,
                        "position": [p.x, p.y, p.z],
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&joints)?);
        }
    }
    Ok(())
}
