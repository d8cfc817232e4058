//! Raw JSON descriptions to runtime archives

use anyhow::{Context, Result};
use console::style;
use log::info;
use skel_offline::{AnimationBuilder, RawAnimation, RawSkeleton, SkeletonBuilder};
use skel_runtime::Archive;
use std::fs;
use std::path::PathBuf;

use crate::utils::{format_bytes, format_seconds};

pub fn build_animation(input: PathBuf, output: PathBuf) -> Result<()> {
    let json = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read file: {}", input.display()))?;
    let raw = RawAnimation::from_json(&json)
        .with_context(|| format!("Failed to parse raw animation: {}", input.display()))?;
    info!(
        "Raw animation '{}': {} tracks, duration {}",
        raw.name,
        raw.num_tracks(),
        raw.duration
    );

    let animation = AnimationBuilder::new()
        .build(&raw)
        .with_context(|| format!("Invalid raw animation: {}", input.display()))?;
    animation
        .save(&output)
        .with_context(|| format!("Failed to write animation: {}", output.display()))?;

    println!(
        "✓ Built animation '{}' ({} tracks, {}, {}) -> {}",
        style(animation.name()).yellow(),
        animation.num_tracks(),
        format_seconds(animation.duration()),
        format_bytes(animation.size()),
        style(output.display()).cyan()
    );
    Ok(())
}

pub fn build_skeleton(input: PathBuf, output: PathBuf) -> Result<()> {
    let json = fs::read_to_string(&input)
        .with_context(|| format!("Failed to read file: {}", input.display()))?;
    let raw = RawSkeleton::from_json(&json)
        .with_context(|| format!("Failed to parse raw skeleton: {}", input.display()))?;

    let skeleton = SkeletonBuilder::new()
        .build(&raw)
        .with_context(|| format!("Invalid raw skeleton: {}", input.display()))?;
    skeleton
        .save(&output)
        .with_context(|| format!("Failed to write skeleton: {}", output.display()))?;

    println!(
        "✓ Built skeleton ({} joints) -> {}",
        skeleton.num_joints(),
        style(output.display()).cyan()
    );
    Ok(())
}
