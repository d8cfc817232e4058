//! Archive inspection

use anyhow::{Context, Result, bail};
use console::style;
use skel_runtime::{Animation, Archive, Keyframe, Skeleton};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::utils::{
    TreeOptions, add_table_row, create_table, format_bytes, format_seconds, render_skeleton,
};

use super::{load_animation, load_skeleton};

pub fn execute(path: PathBuf, no_color: bool) -> Result<()> {
    let magic = read_magic(&path)?;
    if &magic == Animation::magic() {
        print_animation(&path, &load_animation(&path)?);
    } else if &magic == Skeleton::magic() {
        print_skeleton(&path, &load_skeleton(&path)?, no_color);
    } else {
        bail!(
            "Unknown archive type '{}': {}",
            String::from_utf8_lossy(&magic),
            path.display()
        );
    }
    Ok(())
}

fn read_magic(path: &Path) -> Result<[u8; 4]> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)
        .with_context(|| format!("File too short to be an archive: {}", path.display()))?;
    Ok(magic)
}

/// Number of distinct key times, the times at which any track changes.
fn distinct_times<K: Keyframe>(keys: &[K]) -> usize {
    let mut times: Vec<f32> = keys.iter().map(Keyframe::time).collect();
    times.dedup();
    times.len()
}

fn print_animation(path: &Path, animation: &Animation) {
    println!("\n{}", style("Animation Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Name: {}", style(animation.name()).yellow());
    println!("Duration: {}", format_seconds(animation.duration()));
    println!(
        "Tracks: {} ({} SoA blocks)",
        style(animation.num_tracks()).green(),
        animation.num_soa_tracks()
    );
    println!("Size: {}", format_bytes(animation.size()));
    println!();
    let mut table = create_table(&["Channel", "Keys", "Times"]);
    for (channel, keys, times) in [
        ("translation", animation.translations().len(), distinct_times(animation.translations())),
        ("rotation", animation.rotations().len(), distinct_times(animation.rotations())),
        ("scale", animation.scales().len(), distinct_times(animation.scales())),
    ] {
        add_table_row(
            &mut table,
            &[channel.to_string(), keys.to_string(), times.to_string()],
        );
    }
    table.printstd();
}

fn print_skeleton(path: &Path, skeleton: &Skeleton, no_color: bool) {
    println!("\n{}", style("Skeleton Information").bold().underlined());
    println!("File: {}", style(path.display()).cyan());
    println!("Joints: {}", style(skeleton.num_joints()).green());
    let max_depth = skeleton.joint_depths().into_iter().max().unwrap_or(0);
    println!("Depth: {}", max_depth);
    println!();
    print!("{}", render_skeleton(skeleton, TreeOptions { no_color }));
}
