//! Joint hierarchy rendering

use console::Style;
use skel_runtime::Skeleton;

/// Options for tree rendering
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    pub no_color: bool,
}

/// Render the joint hierarchy of a skeleton, one joint per line.
///
/// Joints are stored parents first, so children are collected in a single
/// pass and the tree is walked from every root in storage order.
pub fn render_skeleton(skeleton: &Skeleton, options: TreeOptions) -> String {
    let parents = skeleton.joint_parents();
    let mut children = vec![Vec::new(); parents.len()];
    let mut roots = Vec::new();
    for (joint, &parent) in parents.iter().enumerate() {
        match usize::try_from(parent) {
            Ok(parent) => children[parent].push(joint),
            Err(_) => roots.push(joint),
        }
    }

    let mut output = String::new();
    for (i, &root) in roots.iter().enumerate() {
        render_joint(
            skeleton,
            &children,
            root,
            "",
            i + 1 == roots.len(),
            true,
            options,
            &mut output,
        );
    }
    output
}

#[allow(clippy::too_many_arguments)]
fn render_joint(
    skeleton: &Skeleton,
    children: &[Vec<usize>],
    joint: usize,
    prefix: &str,
    is_last: bool,
    is_root: bool,
    options: TreeOptions,
    output: &mut String,
) {
    let style = if options.no_color {
        Style::new()
    } else if is_root {
        Style::new().bold().cyan()
    } else if skeleton.is_leaf(joint) {
        Style::new().green()
    } else {
        Style::new().yellow()
    };
    let connector = match (is_root, is_last) {
        (true, _) => "",
        (false, true) => "└── ",
        (false, false) => "├── ",
    };
    output.push_str(&format!(
        "{prefix}{connector}{} [{joint}]\n",
        style.apply_to(&skeleton.joint_names()[joint])
    ));

    let child_prefix = match (is_root, is_last) {
        (true, _) => prefix.to_string(),
        (false, true) => format!("{prefix}    "),
        (false, false) => format!("{prefix}│   "),
    };
    let kids = &children[joint];
    for (i, &child) in kids.iter().enumerate() {
        render_joint(
            skeleton,
            children,
            child,
            &child_prefix,
            i + 1 == kids.len(),
            false,
            options,
            output,
        );
    }
}
