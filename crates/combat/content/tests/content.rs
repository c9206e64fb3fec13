use std::path::PathBuf;

use combat_content::{BuildLoader, ContentFactory, FlatDamage, SpellCatalog, TimelineLoader};
use combat_core::{
    HookRegistry, MechanismKind, Position, SimEnv, TimelineRunner, TransposePartner,
};

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[test]
fn bundled_content_runs_to_completion() {
    let factory = ContentFactory::new(data_dir());
    let config = factory.load_config().expect("config loads");
    let spells = factory.load_spells("xelor").expect("catalog loads");
    let build = factory.load_build("xelor").expect("build loads");
    let board = factory.load_board("default", &config).expect("board loads");
    let timeline = factory.load_timeline("dial-opener").expect("timeline loads");
    assert_eq!(timeline.build_id, build.id);

    let damage = FlatDamage::new();
    let mut runner =
        TimelineRunner::new(build, timeline, board, config).with_hooks(HookRegistry::standard());
    let report = runner.run_to_end(SimEnv::with_all(&spells, &damage));

    assert!(report.is_completed(), "{:?}", report.status);
    assert_eq!(report.results.len(), 5);

    let board = runner.board();
    let dial = board
        .mechanism_of_kind(MechanismKind::Dial)
        .expect("dial placed");
    assert_eq!(
        board.dial_hour_position(dial.id, 12),
        Some(Position::new(11, 9))
    );
    let regulator = board
        .mechanism_of_kind(MechanismKind::Regulator)
        .expect("regulator placed");
    assert_eq!(regulator.position, Position::new(11, 9));

    // The player swapped places with the cog, which picked up a charge.
    assert_eq!(
        board.player().map(|p| p.position),
        Some(Position::new(9, 10))
    );
    let cog = board
        .mechanism_of_kind(MechanismKind::Gear)
        .expect("cog placed");
    assert_eq!(cog.position, Position::new(6, 10));
    assert_eq!(cog.charges, 1);
    let transposed = report.results[3].outcomes[0]
        .effect
        .as_ref()
        .expect("transpose succeeded");
    assert!(matches!(
        transposed,
        combat_core::ActionEffect::Transpose(outcome)
            if matches!(outcome.partner, TransposePartner::Mechanism { charges: 1, .. })
    ));

    let summary = &report.summary;
    // 26 + 22 + 57 with the side bonus.
    assert_eq!(summary.total_damage, 105);
    assert_eq!(summary.remaining_ap, 0);
    assert_eq!(summary.remaining_wp, 7);
    assert_eq!(summary.remaining_mp, 3);
    assert_eq!(summary.total_ap_regenerated, 1);
    assert_eq!(summary.regeneration_by_source["regulator"].wp, 4);
    assert_eq!(summary.regeneration_by_source["spell:XEL_VDT"].ap, 1);
}

#[test]
fn embedded_catalog_matches_data_file() {
    let embedded = SpellCatalog::embedded().expect("embedded catalog parses");
    let on_disk = SpellCatalog::load(&data_dir().join("spells/xelor.ron")).expect("file parses");

    assert_eq!(embedded.len(), on_disk.len());
    assert!(embedded.ids().eq(on_disk.ids()));
}

#[test]
fn build_file_round_trip_through_tempdir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("build.ron");
    std::fs::write(
        &path,
        r#"(id: "glass", ap_max: 6, mp_max: 3, wp_max: 6, spells: ["XEL_AIGUILLE"])"#,
    )
    .expect("write build");

    let build = BuildLoader::load(&path).expect("build parses");
    assert_eq!(build.id, "glass");
    assert!(build.owns_spell("XEL_AIGUILLE"));
    assert!(build.passives.is_empty());
}

#[test]
fn missing_timeline_file_is_reported() {
    let err = TimelineLoader::load(&data_dir().join("timelines/nope.ron"))
        .expect_err("missing file");
    assert!(err.to_string().contains("Failed to read file"));
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = ContentFactory::new(dir.path())
        .load_config()
        .expect("defaults");
    assert_eq!(config, combat_core::SimConfig::default());
}
