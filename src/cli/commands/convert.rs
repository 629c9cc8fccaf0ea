//! CLI interface for full skin conversion

use std::time::Instant;

use crate::cli::progress::{
    CUBE, DISK, DOCUMENT, GEAR, LOOKING_GLASS, PICTURE, print_done, print_step,
};
use crate::convert::{Conversion, ConvertOptions, ConvertPhase};

pub fn execute(options: ConvertOptions, verbose: bool) -> anyhow::Result<()> {
    let started = Instant::now();
    let conversion = Conversion::new(options)?;

    let mut step = 0;
    let summary = conversion.run_with_progress(|phase| {
        step += 1;
        if verbose {
            print_step(step, ConvertPhase::COUNT, emoji_for(phase), phase.description());
        }
    })?;

    println!();
    println!("Model '{}.mdl' created", summary.model_name);
    for artifact in &summary.artifacts {
        println!("  {}", artifact.display());
    }
    println!(
        "Materials: {} referenced, {} fixed",
        summary.materials.len(),
        summary.material_report.fixed.len()
    );
    if !summary.material_report.missing.is_empty() {
        println!("  Missing descriptors:");
        for name in &summary.material_report.missing {
            println!("    {name}");
        }
    }
    if !summary.animations_included {
        println!("Note: no shared animations were found");
    }
    if !summary.script_copied {
        println!("Note: weapon script was not copied");
    }

    if verbose {
        print_done(started.elapsed());
    }
    Ok(())
}

fn emoji_for(phase: ConvertPhase) -> console::Emoji<'static, 'static> {
    match phase {
        ConvertPhase::Decompile => LOOKING_GLASS,
        ConvertPhase::CopyMeshes | ConvertPhase::Animations => CUBE,
        ConvertPhase::Materials => PICTURE,
        ConvertPhase::GenerateQc => DOCUMENT,
        ConvertPhase::Compile => GEAR,
        ConvertPhase::Scripts => DISK,
    }
}
