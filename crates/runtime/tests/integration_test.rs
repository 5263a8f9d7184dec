//! End-to-end scenarios over the shipped content.

use chrono::{TimeDelta, Utc};
use crumbs_content::{CRUMBS, CULTIVATION, DIVINITY, layers::divinity, standard_game};
use crumbs_core::{Decimal, GameState, UpgradePhase};
use crumbs_runtime::{
    Event, GameSession, MemorySaveRepository, MigrationChain, RuntimeConfig, SaveMigration,
    SaveRepository, Topic, catch_up, repository,
};
use rust_decimal_macros::dec;

fn fresh_session() -> GameSession {
    GameSession::new(standard_game())
}

/// A session whose starting state was adjusted before play begins.
fn session_with(setup: impl FnOnce(&mut GameState)) -> GameSession {
    let content = standard_game();
    let mut state = GameState::new(&content);
    setup(&mut state);
    GameSession::with_state(content, state)
}

#[test]
fn fresh_game_idles_at_ten_crumbs() {
    let mut session = fresh_session();
    session.on_tick(dec!(1)).unwrap();

    let view = session.snapshot();
    let crumbs = view.layer("crumbs").unwrap();
    assert_eq!(crumbs.value, dec!(10));
    assert_eq!(crumbs.rate, dec!(0));
}

#[test]
fn prestige_then_upgrades_start_the_engine() {
    let mut session = session_with(|state| {
        // Bank enough crumbs for a 6-point prestige: sqrt(360 / 10) = 6.
        state.layer_mut(CRUMBS).unwrap().resource.add_gain(dec!(350));
    });

    session.press_reset_button(DIVINITY).unwrap();

    let view = session.snapshot();
    assert_eq!(view.layer("divinity").unwrap().value, dec!(6));
    // The prestige drained crumbs to zero, not to the cascade floor.
    assert_eq!(view.layer("crumbs").unwrap().value, dec!(0));

    // "Absorbing points" (+1/s) then "Points, but faster" (×2).
    session
        .purchase_upgrade(DIVINITY, divinity::ABSORBING_POINTS)
        .unwrap();
    session
        .purchase_upgrade(DIVINITY, divinity::POINTS_BUT_FASTER)
        .unwrap();

    session.on_tick(dec!(1)).unwrap();
    let view = session.snapshot();
    assert_eq!(view.layer("crumbs").unwrap().value, dec!(2));
    assert_eq!(view.layer("crumbs").unwrap().rate, dec!(2));
}

#[test]
fn the_opening_ten_crumbs_buy_the_first_prestige() {
    let mut session = fresh_session();

    // sqrt(10 / 10) = 1 divinity point: the intended bootstrap.
    session.press_reset_button(DIVINITY).unwrap();
    session
        .purchase_upgrade(DIVINITY, divinity::ABSORBING_POINTS)
        .unwrap();

    session.on_tick(dec!(5)).unwrap();
    assert_eq!(session.snapshot().layer("crumbs").unwrap().value, dec!(5));
}

#[test]
fn unaffordable_upgrade_is_a_no_op() {
    let mut session = fresh_session();
    // Divinity starts at 0; the first upgrade costs 1.
    let result = session.purchase_upgrade(DIVINITY, divinity::ABSORBING_POINTS);
    assert!(result.is_err());

    let view = session.snapshot();
    let upgrade = &view.layer("divinity").unwrap().upgrades[divinity::ABSORBING_POINTS];
    assert_eq!(upgrade.phase, UpgradePhase::Locked);
    assert_eq!(view.layer("divinity").unwrap().value, dec!(0));
}

#[test]
fn divinity_reset_leaves_cultivation_alone() {
    let mut session = session_with(|state| {
        state
            .layer_mut(CULTIVATION)
            .unwrap()
            .resource
            .add_gain(dec!(7));
    });

    session.trigger_reset(DIVINITY).unwrap();

    let view = session.snapshot();
    assert_eq!(view.layer("cultivation").unwrap().value, dec!(7));
    // Crumbs is swept by every reset regardless of branches.
    assert_eq!(view.layer("crumbs").unwrap().value, dec!(0));
}

#[test]
fn mastery_grants_a_cultivation_point() {
    let mut session = session_with(|state| {
        state
            .layer_mut(DIVINITY)
            .unwrap()
            .resource
            .add_gain(dec!(10000));
    });

    session
        .purchase_upgrade(DIVINITY, divinity::CULTIVATION_POINT)
        .unwrap();

    let view = session.snapshot();
    assert_eq!(view.layer("cultivation").unwrap().value, dec!(1));
    assert_eq!(view.layer("divinity").unwrap().value, dec!(0));
}

#[test]
fn events_fan_out_by_topic() {
    let mut session = session_with(|state| {
        state.layer_mut(DIVINITY).unwrap().resource.add_gain(dec!(1));
    });
    let mut resets = session.bus().subscribe(Topic::Reset);
    let mut upgrades = session.bus().subscribe(Topic::Upgrade);

    session
        .purchase_upgrade(DIVINITY, divinity::ABSORBING_POINTS)
        .unwrap();
    session.trigger_reset(DIVINITY).unwrap();

    let Ok(Event::Upgrade(purchased)) = upgrades.try_recv() else {
        panic!("expected an upgrade event");
    };
    assert_eq!(purchased.layer, "divinity");

    let Ok(Event::Reset(reset)) = resets.try_recv() else {
        panic!("expected a reset event");
    };
    assert_eq!(reset.triggered_by, "divinity");
    assert!(reset.affected.contains(&"crumbs".to_string()));
    assert!(!reset.affected.contains(&"cultivation".to_string()));
}

#[test]
fn save_load_round_trip_through_a_repository() {
    let mut session = session_with(|state| {
        state.layer_mut(DIVINITY).unwrap().resource.add_gain(dec!(6));
    });
    session
        .purchase_upgrade(DIVINITY, divinity::POINTS_BUT_FASTER)
        .unwrap();

    let repo = MemorySaveRepository::new();
    repository::save_session(&repo, "main", &session).unwrap();

    let mut restored = fresh_session();
    let save = repository::load_session(&repo, "main", &mut restored, &MigrationChain::new())
        .unwrap()
        .expect("slot exists");

    assert_eq!(save.version, repository::SAVE_VERSION);
    assert_eq!(restored.state(), session.state());
}

struct RenamePoints;

impl SaveMigration for RenamePoints {
    fn applies(&self, version: &str) -> bool {
        version == "0"
    }

    fn migrate(&self, save: &mut crumbs_runtime::SaveData) {
        if let Some(fields) = save.layers.remove("points") {
            save.layers.insert("crumbs".into(), fields);
        }
        save.version = "1".into();
    }
}

#[test]
fn migrations_run_before_state_is_populated() {
    let session = fresh_session();
    let repo = MemorySaveRepository::new();
    repository::save_session(&repo, "main", &session).unwrap();

    // Age the save: pretend version 0 kept crumbs under "points".
    let mut save = repo.load("main").unwrap().unwrap();
    let mut fields = save.layers.remove("crumbs").unwrap();
    fields.insert("value".into(), "55".into());
    save.layers.insert("points".into(), fields);
    save.version = "0".into();
    repo.save("main", &save).unwrap();

    let mut restored = fresh_session();
    let migrations = MigrationChain::new().with(RenamePoints);
    repository::load_session(&repo, "main", &mut restored, &migrations).unwrap();

    assert_eq!(restored.snapshot().layer("crumbs").unwrap().value, dec!(55));
}

#[test]
fn offline_time_is_credited_capped_and_scaled() {
    let mut session = session_with(|state| {
        state.layer_mut(DIVINITY).unwrap().resource.add_gain(dec!(1));
    });
    session
        .purchase_upgrade(DIVINITY, divinity::ABSORBING_POINTS)
        .unwrap();

    let config = RuntimeConfig {
        max_offline_seconds: 60,
        offline_efficiency: dec!(0.5),
        ..RuntimeConfig::default()
    };
    let now = Utc::now();
    let report = catch_up(&mut session, now - TimeDelta::seconds(600), now, &config).unwrap();

    assert_eq!(report.applied_seconds, dec!(30));
    // 10 starting crumbs + 30s at 1/s.
    assert_eq!(session.snapshot().layer("crumbs").unwrap().value, dec!(40));
}

#[test]
fn dev_speed_scales_and_pause_stops_time() {
    let mut session = session_with(|state| {
        state.layer_mut(DIVINITY).unwrap().resource.add_gain(dec!(1));
    });
    session
        .purchase_upgrade(DIVINITY, divinity::ABSORBING_POINTS)
        .unwrap();

    session.set_dev_speed(Decimal::from(10u32));
    session.on_tick(dec!(1)).unwrap();
    assert_eq!(session.snapshot().layer("crumbs").unwrap().value, dec!(20));

    session.set_paused(true);
    session.on_tick(dec!(1)).unwrap();
    assert_eq!(session.snapshot().layer("crumbs").unwrap().value, dec!(20));
}
