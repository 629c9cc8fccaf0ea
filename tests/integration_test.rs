use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use skinforge::materials::{ResolverConfig, collect_material_dirs, fix_materials};

fn write_file(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_material_fixing_end_to_end() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();

    // realistic skin archive layout
    let knife_dir = source.path().join("models/weapons/v_models/knife_m9_bay");
    let glove_dir = source.path().join("models/weapons/v_models/arms/glove_sporty");
    write_file(
        &knife_dir.join("knife_blade.vmt"),
        "VertexLitGeneric\n{\n\t\"$basetexture\" \"knife_blade\"\n}\n",
    );
    write_file(
        &glove_dir.join("glove_sporty_left.vmt"),
        "VertexLitGeneric\n{\n\t\"$basetexture\" \"black\"\n}\n",
    );
    std::fs::write(knife_dir.join("knife_blade.vtf"), b"").unwrap();
    std::fs::write(knife_dir.join("knife_blade_normal.vtf"), b"").unwrap();
    std::fs::write(glove_dir.join("glove_sporty.vtf"), b"").unwrap();

    let names = vec![
        "knife_blade".to_string(),
        "glove_sporty_left".to_string(),
        "phantom_material".to_string(),
    ];
    let report = fix_materials(source.path(), dest.path(), &names, &ResolverConfig::default());

    assert_eq!(report.fixed.len(), 2);
    assert_eq!(report.missing, vec!["phantom_material"]);
    assert!(report.failures.is_empty());

    let knife = std::fs::read_to_string(
        dest.path()
            .join("models/weapons/v_models/knife_m9_bay/knife_blade.vmt"),
    )
    .unwrap();
    assert!(knife.contains(
        "\"$basetexture\" \"models/weapons/v_models/knife_m9_bay/knife_blade\""
    ));
    assert!(knife.contains(
        "\"$bumpmap\" \"models/weapons/v_models/knife_m9_bay/knife_blade_normal\""
    ));

    let glove = std::fs::read_to_string(
        dest.path()
            .join("models/weapons/v_models/arms/glove_sporty/glove_sporty_left.vmt"),
    )
    .unwrap();
    assert!(glove.contains(
        "\"$basetexture\" \"models/weapons/v_models/arms/glove_sporty/glove_sporty\""
    ));
    assert!(!glove.contains("$bumpmap"));

    // running the batch again produces byte-identical descriptors
    let rerun_dest = TempDir::new().unwrap();
    fix_materials(source.path(), rerun_dest.path(), &names, &ResolverConfig::default());
    let knife_again = std::fs::read_to_string(
        rerun_dest
            .path()
            .join("models/weapons/v_models/knife_m9_bay/knife_blade.vmt"),
    )
    .unwrap();
    assert_eq!(knife, knife_again);
}

#[test]
fn test_search_dirs_cover_matched_descriptors() {
    let source = TempDir::new().unwrap();
    write_file(
        &source.path().join("models/weapons/v_models/knife_m9_bay/knife_blade.vmt"),
        "X\n{\n}\n",
    );

    let dirs = collect_material_dirs(
        source.path(),
        &["knife_blade".to_string()],
        &ResolverConfig::default(),
    );
    assert_eq!(
        dirs,
        vec![
            String::new(),
            "models/weapons/".to_string(),
            "models/weapons/v_models/knife_m9_bay/".to_string(),
        ]
    );
}

#[cfg(unix)]
mod pipeline {
    use super::*;
    use pretty_assertions::assert_eq;
    use skinforge::convert::{Conversion, ConvertOptions, WeaponKind};

    fn stub_executable(path: &Path, script: &str) {
        use std::os::unix::fs::PermissionsExt;
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    // Emits a QC plus an SMD referencing the test materials, like a
    // decompiler would. $1 = model, $2 = output dir.
    const DECOMPILER: &str = r#"
stem=$(basename "$1" .mdl)
cat > "$2/$stem.qc" <<'QC'
$modelname "old/path.mdl"
$definebone "v_weapon.Bip01" "" 0 0 0 0 0 0
$attachment "muzzle_flash" "v_weapon.muzzle" 0 0 0
QC
cat > "$2/$stem.smd" <<'SMD'
version 1
triangles
knife_blade
0 0 0 0
glove_sporty_left
0 0 0 0
end
SMD
"#;

    // Drops the three expected model files under the -game dir.
    // $3 = -game dir, $5 = QC path.
    const COMPILER: &str = r#"
out="$3/models/weapons"
mkdir -p "$out"
stem=$(basename "$5" .qc)
touch "$out/$stem.mdl" "$out/$stem.vvd" "$out/$stem.dx90.vtx"
"#;

    #[test]
    fn test_full_conversion_with_stub_tools() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("data");
        let game = temp.path().join("game");
        let out = temp.path().join("out");
        let scripts = temp.path().join("scripts");

        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("v_knife_m9_bay.mdl"), b"mdl").unwrap();
        std::fs::write(data.join("v_glove_sporty.mdl"), b"mdl").unwrap();

        let knife_dir = data.join("materials/models/weapons/v_models/knife_m9_bay");
        write_file(
            &knife_dir.join("knife_blade.vmt"),
            "VertexLitGeneric\n{\n\t\"$basetexture\" \"knife_blade\"\n}\n",
        );
        std::fs::write(knife_dir.join("knife_blade.vtf"), b"").unwrap();

        let decompiler = temp.path().join("tools/crowbar");
        stub_executable(&decompiler, DECOMPILER);
        stub_executable(&game.join("bin/win64/studiomdl.exe"), COMPILER);
        write_file(&game.join("momentum/gameinfo.txt"), "GameInfo {}\n");
        write_file(&scripts.join("weapon_momentum_knife.txt"), "WeaponData {}\n");

        let options = ConvertOptions {
            data_dir: data.clone(),
            game_dir: game,
            output_dir: out.clone(),
            weapon_model: "v_knife_m9_bay.mdl".into(),
            glove_model: "v_glove_sporty.mdl".into(),
            kind: WeaponKind::Knife,
            decompiler,
            scripts_dir: scripts,
        };
        let summary = Conversion::new(options).unwrap().run().unwrap();

        assert_eq!(summary.model_name, "v_knife_t");
        assert_eq!(summary.artifacts.len(), 3);
        assert!(out.join("models/weapons/v_knife_t.mdl").is_file());
        assert!(out.join("models/weapons/v_knife_m9_bay.smd").is_file());
        assert!(out.join("models/weapons/v_glove_sporty.smd").is_file());
        assert!(out.join("scripts/weapon_momentum_knife.txt").is_file());
        assert!(summary.script_copied);

        // no _anim companion model in the data dir
        assert!(!summary.animations_included);

        // geometry references both materials; only the knife has a descriptor
        assert_eq!(
            summary.materials,
            vec!["knife_blade".to_string(), "glove_sporty_left".to_string()]
        );
        assert_eq!(summary.material_report.fixed.len(), 1);
        assert_eq!(summary.material_report.missing, vec!["glove_sporty_left"]);

        let qc = std::fs::read_to_string(out.join("models/weapons/v_knife_t.qc")).unwrap();
        assert!(qc.starts_with("$modelname \"weapons/v_knife_t.mdl\""));
        assert!(qc.contains("studio \"v_knife_m9_bay.smd\""));
        assert!(qc.contains("studio \"v_glove_sporty.smd\""));
        assert!(qc.contains("$cdmaterials \"models/weapons/v_models/knife_m9_bay/\""));
        assert!(qc.contains("$definebone \"v_weapon.Bip01\""));
        assert!(!qc.contains("$includemodel"));

        let vmt = std::fs::read_to_string(
            out.join("materials/models/weapons/v_models/knife_m9_bay/knife_blade.vmt"),
        )
        .unwrap();
        assert!(vmt.starts_with("VertexLitGeneric"));
        assert!(vmt.contains(
            "\"$basetexture\" \"models/weapons/v_models/knife_m9_bay/knife_blade\""
        ));
    }

    #[test]
    fn test_decompiler_failure_aborts_conversion() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join("data");
        let game = temp.path().join("game");
        let scripts = temp.path().join("scripts");

        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("v_knife_m9_bay.mdl"), b"mdl").unwrap();
        std::fs::write(data.join("v_glove_sporty.mdl"), b"mdl").unwrap();

        let decompiler = temp.path().join("tools/crowbar");
        stub_executable(&decompiler, "exit 1");
        stub_executable(&game.join("bin/win64/studiomdl.exe"), "true");
        write_file(&game.join("momentum/gameinfo.txt"), "GameInfo {}\n");
        std::fs::create_dir_all(&scripts).unwrap();

        let options = ConvertOptions {
            data_dir: data,
            game_dir: game,
            output_dir: temp.path().join("out"),
            weapon_model: "v_knife_m9_bay.mdl".into(),
            glove_model: "v_glove_sporty.mdl".into(),
            kind: WeaponKind::Knife,
            decompiler,
            scripts_dir: scripts,
        };
        let result = Conversion::new(options).unwrap().run();
        assert!(matches!(result, Err(skinforge::Error::DecompileFailed { .. })));
    }
}
