//! Rig inspection commands

use anyhow::Result;
use std::path::Path;

use crate::commands::load_rig;
use crate::utils::{
    TreeOptions, add_table_row, create_table, format_seconds, render_tree, rig_tree,
};

pub fn handle_info(path: Option<&Path>) -> Result<()> {
    let rig = load_rig(path)?;
    let skeleton = rig.skeleton();
    let animation = rig.animation();

    println!("Rig Information");
    println!("===============");
    println!();
    println!("Name: {}", rig.name());
    println!("Bones: {}", skeleton.bone_count());
    println!("Skin parts: {}", rig.skin().part_count());
    println!();
    println!("Animation:");
    println!("  Keyframes: {}", animation.key_count());
    println!("  Interval: {}", format_seconds(animation.interval()));
    println!("  Length: {}", format_seconds(animation.last_time()));
    println!("  Loop mode: {:?}", animation.options().loop_mode);
    println!("  Time scale: {}", animation.options().time_scale);
    println!();

    let mut table = create_table(vec!["Index", "Name", "Parent", "Depth", "Parts"]);
    for index in 0..skeleton.bone_count() {
        let name = skeleton
            .bone(index)
            .and_then(|b| b.name.clone())
            .unwrap_or_else(|| "-".to_string());
        let parent = skeleton
            .parent(index)
            .map_or_else(|| "root".to_string(), |p| p.to_string());
        let parts: Vec<&str> = rig
            .skin()
            .parts()
            .iter()
            .filter(|p| p.bone == index)
            .map(|p| p.mesh_name.as_str())
            .collect();

        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                name,
                parent,
                skeleton.depth(index).to_string(),
                parts.join(", "),
            ],
        );
    }
    table.printstd();
    println!();

    let mut parts = create_table(vec!["Part", "Mesh", "Bone", "Bind origin"]);
    for (index, (part, bind)) in rig
        .skin()
        .parts()
        .iter()
        .zip(rig.skin().bind_matrices())
        .enumerate()
    {
        let origin = bind.transform_point3(glam::Vec3::ZERO);
        add_table_row(
            &mut parts,
            vec![
                index.to_string(),
                part.mesh_name.clone(),
                part.bone.to_string(),
                format!("({:.3}, {:.3}, {:.3})", origin.x, origin.y, origin.z),
            ],
        );
    }
    parts.printstd();

    Ok(())
}

pub fn handle_tree(path: Option<&Path>, max_depth: Option<usize>, no_color: bool) -> Result<()> {
    let rig = load_rig(path)?;

    let options = TreeOptions {
        max_depth,
        no_color,
        show_metadata: true,
    };

    let mut root = rig_tree(&rig);
    if let Some(path) = path {
        root = root.with_metadata("file", &path.display().to_string());
    }

    print!("{}", render_tree(&root, &options));
    Ok(())
}

pub fn handle_validate(path: &Path) -> Result<()> {
    let rig = load_rig(Some(path))?;

    println!(
        "✓ {} is valid: {} bones, {} skin parts, {} keyframes",
        path.display(),
        rig.skeleton().bone_count(),
        rig.skin().part_count(),
        rig.animation().key_count()
    );

    Ok(())
}
