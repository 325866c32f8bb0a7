//! Aggregator scenarios
//!
//! Sessions are built from real log lines so the classifier and the fold are
//! exercised together.

use super::*;
use crate::classifier::classify;
use crate::loadout::{Armor, Equipment, StandardCostModel};
use crate::log::ParsedEvent;
use crate::session::MANUAL_BUCKET;

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// Build a line `secs` seconds into the session.
fn event(secs: u32, msg: &str) -> ParsedEvent {
    let line = format!("2025-03-01 10:{:02}:{:02} [System] [] {msg}", secs / 60, secs % 60);
    classify(&line).unwrap()
}

fn global(secs: u32, msg: &str) -> ParsedEvent {
    let line = format!("2025-03-01 10:{:02}:{:02} [Globals] [] {msg}", secs / 60, secs % 60);
    classify(&line).unwrap()
}

fn session_with(manual_cost: f64, events: Vec<ParsedEvent>) -> Session {
    let mut session = Session::new("test", manual_cost);
    if let Some(first) = events.first() {
        session.started_at = first.timestamp;
    }
    for e in events {
        session.add_event(e, None, &StandardCostModel);
    }
    session
}

fn weapon(name: &str, decay: f64, ammo_burn: f64) -> Option<Equipment> {
    Some(Equipment {
        name: name.to_string(),
        decay,
        ammo_burn,
    })
}

#[test]
fn test_manual_cost_scenario() {
    let mut events: Vec<ParsedEvent> = (0..10)
        .map(|i| event(i, "You inflicted 20.0 points of damage"))
        .collect();
    events.push(event(11, "You received Animal Oil Residue x (200) Value: 2.0000 PED"));
    let session = session_with(0.05, events);

    let stats = compute_stats(&session, None, None, &StandardCostModel);
    let economy = &stats.economy;
    assert!(approx(economy.total_spend, 0.50));
    assert!(approx(economy.loot_value, 2.00));
    assert!(approx(economy.profit, 1.50));
    assert!(approx(economy.return_rate, 400.0));
    assert_eq!(stats.combat.kills_inferred, 1);
    assert_eq!(stats.combat.kills, 1);

    assert_eq!(economy.loadouts.len(), 1);
    assert_eq!(economy.loadouts[0].loadout_id, MANUAL_BUCKET);
    assert_eq!(economy.loadouts[0].shots, 10);
}

#[test]
fn test_zero_spend_return_rate_is_zero() {
    let session = session_with(
        0.0,
        vec![
            event(0, "You inflicted 20.0 points of damage"),
            event(1, "You received Shrapnel x (1000) Value: 0.1000 PED"),
        ],
    );
    let stats = compute_stats(&session, None, None, &StandardCostModel);
    assert_eq!(stats.economy.total_spend, 0.0);
    assert_eq!(stats.economy.return_rate, 0.0);
    assert!(stats.economy.loadouts.iter().all(|l| l.return_rate == 0.0));

    let empty = Session::new("empty", 0.05);
    let stats = compute_stats(&empty, None, None, &StandardCostModel);
    assert_eq!(stats.economy.return_rate, 0.0);
    assert_eq!(stats.combat.hit_rate, 0.0);
    assert_eq!(stats.combat.dps, 0.0);
    assert_eq!(stats.skill_efficiency, SkillEfficiency::default());
}

#[test]
fn test_armor_decay_only_on_damage_taken() {
    let loadout = Loadout {
        id: "pixie".into(),
        name: "Pixie set".into(),
        armor: Some(Armor {
            name: "Pixie".into(),
            decay_per_hit: 0.001,
        }),
        ..Default::default()
    };
    let session = session_with(
        0.0,
        vec![
            event(0, "You took 12.5 points of damage"),
            event(1, "Damage deflected!"),
            event(2, "You Dodged the attack"),
            event(3, "You Evaded the attack"),
            event(4, "Critical hit - Armor penetration! You took 40.0 points of damage"),
        ],
    );

    let stats = compute_stats(&session, None, Some(&loadout), &StandardCostModel);
    let decay = &stats.economy.decay;
    assert_eq!(decay.armor_hits, 2);
    assert!(approx(decay.defensive, 0.002));
    assert!(approx(decay.repair_bill, 0.002));
    assert_eq!(decay.offensive, 0.0);
    assert_eq!(stats.combat.deflects, 1);
    assert_eq!(stats.combat.hits_taken, 2);
    assert!(approx(stats.combat.damage_taken, 52.5));
    assert!(approx(stats.combat.critical_damage_taken, 40.0));
}

#[test]
fn test_deflect_adds_no_decay() {
    let loadout = Loadout {
        armor: Some(Armor {
            name: "Pixie".into(),
            decay_per_hit: 0.001,
        }),
        ..Default::default()
    };
    let before = session_with(0.0, vec![event(0, "You took 10.0 points of damage")]);
    let mut after = before.clone();
    after.add_event(event(1, "Damage deflected!"), None, &StandardCostModel);

    let a = compute_stats(&before, None, Some(&loadout), &StandardCostModel);
    let b = compute_stats(&after, None, Some(&loadout), &StandardCostModel);
    assert_eq!(a.economy.decay.defensive, b.economy.decay.defensive);
    assert_eq!(a.economy.decay.armor_hits, b.economy.decay.armor_hits);
}

#[test]
fn test_limited_decay_stays_out_of_repair_bill() {
    let loadout = Loadout {
        id: "opalo".into(),
        name: "Opalo".into(),
        weapon: weapon("Opalo", 0.02, 0.0),
        amplifier: weapon("A101 (L)", 0.01, 0.0),
        ..Default::default()
    };
    let session = session_with(
        0.0,
        vec![
            event(0, "You inflicted 20.0 points of damage"),
            event(1, "You missed"),
        ],
    );
    let stats = compute_stats(&session, None, Some(&loadout), &StandardCostModel);
    let decay = &stats.economy.decay;
    assert!(approx(decay.offensive_unlimited, 0.04));
    assert!(approx(decay.offensive_limited, 0.02));
    assert!(approx(decay.repair_bill, 0.04));
    assert!(approx(decay.total, 0.06));
}

#[test]
fn test_fallback_decay_without_loadout() {
    let session = session_with(
        0.0,
        vec![
            event(0, "You inflicted 20.0 points of damage"),
            event(1, "You missed"),
            event(2, "Target out of range"),
        ],
    );
    let stats = compute_stats(&session, None, None, &StandardCostModel);
    assert_eq!(stats.combat.shots, 2);
    assert_eq!(stats.combat.out_of_range, 1);
    assert!(approx(stats.economy.decay.offensive, 2.0 * FALLBACK_DECAY_PER_SHOT));
    assert!(approx(stats.economy.decay.repair_bill, 2.0 * FALLBACK_DECAY_PER_SHOT));
    assert!(approx(
        stats.economy.net_profit,
        stats.economy.profit - stats.economy.decay.total
    ));
}

#[test]
fn test_compute_stats_is_idempotent() {
    let session = session_with(
        0.03,
        vec![
            event(0, "You inflicted 20.0 points of damage"),
            event(1, "Critical hit - Additional damage! You inflicted 52.4 points of damage"),
            event(2, "You have gained 0.3452 experience in your Rifle skill"),
            event(3, "You received Shrapnel x (4012) Value: 0.4012 PED"),
        ],
    );
    let a = compute_stats(&session, Some("Jane Doe"), None, &StandardCostModel);
    let b = compute_stats(&session, Some("Jane Doe"), None, &StandardCostModel);
    assert_eq!(a, b);
}

#[test]
fn test_snapshot_freeze_prices_spend() {
    let mut loadout = Loadout {
        id: "opalo".into(),
        name: "Opalo".into(),
        weapon: weapon("Opalo", 0.05, 0.0),
        ..Default::default()
    };
    let mut session = Session::new("freeze", 0.0);
    session.add_event(event(0, "You missed"), Some(&loadout), &StandardCostModel);

    // Upgrading the weapon mid-session does not reprice the session
    loadout.weapon = weapon("Opalo", 0.50, 0.0);
    session.add_event(event(1, "You missed"), Some(&loadout), &StandardCostModel);

    let stats = compute_stats(&session, None, Some(&loadout), &StandardCostModel);
    let opalo = &stats.economy.loadouts[0];
    assert_eq!(opalo.loadout_id, "opalo");
    assert_eq!(opalo.shots, 2);
    assert!(approx(opalo.cost_per_shot, 0.05));
    assert!(approx(opalo.spend, 0.10));
}

#[test]
fn test_kill_inference_once_per_burst() {
    let session = session_with(
        0.0,
        vec![
            event(0, "You inflicted 20.0 points of damage"),
            event(1, "You missed"),
            event(2, "You received Animal Hide x (3) Value: 0.0300 PED"),
            event(2, "You received Shrapnel x (1000) Value: 0.1000 PED"),
            event(2, "You received Animal Oil Residue x (5) Value: 0.0500 PED"),
            // Ground loot with no fire in between
            event(30, "You received Shrapnel x (10) Value: 0.0010 PED"),
            event(40, "The target Dodged your attack"),
            event(41, "You received Shrapnel x (500) Value: 0.0500 PED"),
        ],
    );
    let stats = compute_stats(&session, None, None, &StandardCostModel);
    assert_eq!(stats.combat.kills_inferred, 2);
    assert_eq!(stats.loot.loot_events, 5);
}

#[test]
fn test_universal_ammo_is_not_loot() {
    let session = session_with(
        0.01,
        vec![
            event(0, "You inflicted 20.0 points of damage"),
            event(1, "You received Universal Ammo x (1000) Value: 0.1000 PED"),
        ],
    );
    let stats = compute_stats(&session, None, None, &StandardCostModel);
    assert_eq!(stats.combat.kills_inferred, 0);
    assert_eq!(stats.loot.total_value, 0.0);
    assert_eq!(stats.economy.loot_value, 0.0);
    assert!(approx(stats.loot.ammo_returned_value, 0.1));
    assert_eq!(stats.loot.ammo_returned_quantity, 1000.0);
}

#[test]
fn test_loot_goes_to_last_firing_loadout() {
    let rifle = Loadout {
        id: "rifle".into(),
        name: "Rifle".into(),
        weapon: weapon("Rifle", 0.02, 0.0),
        ..Default::default()
    };
    let pistol = Loadout {
        id: "pistol".into(),
        name: "Pistol".into(),
        weapon: weapon("Pistol", 0.01, 0.0),
        ..Default::default()
    };
    let mut session = Session::new("swap", 0.0);
    session.add_event(event(0, "You inflicted 20.0 points of damage"), Some(&rifle), &StandardCostModel);
    // Swapped weapons while the creature was dying
    session.add_event(
        event(1, "You received Animal Hide x (3) Value: 1.0000 PED"),
        Some(&pistol),
        &StandardCostModel,
    );
    session.add_event(event(5, "You missed"), Some(&pistol), &StandardCostModel);
    session.add_event(
        event(6, "You received Animal Hide x (3) Value: 0.5000 PED"),
        Some(&pistol),
        &StandardCostModel,
    );

    let stats = compute_stats(&session, None, None, &StandardCostModel);
    let by_id = |id: &str| {
        stats
            .economy
            .loadouts
            .iter()
            .find(|l| l.loadout_id == id)
            .unwrap()
            .clone()
    };
    assert!(approx(by_id("rifle").loot_value, 1.0));
    assert!(approx(by_id("pistol").loot_value, 0.5));
    assert_eq!(by_id("rifle").name, "Rifle");
    assert!(approx(stats.economy.loot_value, 1.5));
}

#[test]
fn test_loot_before_any_shot_uses_own_bucket() {
    let mut session = Session::new("ground", 0.0);
    session.add_event(
        event(0, "You received Shrapnel x (100) Value: 0.0100 PED"),
        None,
        &StandardCostModel,
    );
    let stats = compute_stats(&session, None, None, &StandardCostModel);
    assert_eq!(stats.economy.loadouts[0].loadout_id, MANUAL_BUCKET);
    assert!(approx(stats.economy.loadouts[0].loot_value, 0.01));
    assert_eq!(stats.combat.kills_inferred, 0);
}

#[test]
fn test_combat_rates_and_dps() {
    let session = session_with(
        0.0,
        vec![
            event(0, "You inflicted 20.0 points of damage"),
            event(1, "Critical hit - Additional damage! You inflicted 60.0 points of damage"),
            event(2, "You missed"),
            event(3, "The target Evaded your attack"),
            event(4, "The target resisted all damage"),
            event(6, "Target out of range"),
            // Idle time after the last shot does not dilute dps
            event(120, "You have gained 0.5 experience in your Rifle skill"),
        ],
    );
    let stats = compute_stats(&session, None, None, &StandardCostModel);
    let combat = &stats.combat;
    assert_eq!(combat.shots, 5);
    assert_eq!(combat.hits, 2);
    assert_eq!(combat.criticals, 1);
    assert_eq!(combat.misses, 3);
    assert_eq!(combat.evades, 1);
    assert_eq!(combat.resists, 1);
    assert_eq!(combat.max_hit, 60.0);
    assert!(approx(combat.avg_damage_per_hit, 40.0));
    assert!(approx(combat.hit_rate, 40.0));
    assert!(approx(combat.crit_rate, 50.0));
    assert_eq!(combat.combat_window_ms, 4_000);
    assert!(approx(combat.dps, 20.0));
    assert_eq!(stats.duration_ms, 120_000);
}

#[test]
fn test_skills_and_efficiency() {
    let mut events: Vec<ParsedEvent> = (0..4).map(|i| event(i, "You missed")).collect();
    events.push(event(5, "You have gained 0.4 experience in your Rifle skill"));
    events.push(event(6, "You have gained 0.2 experience in your Rifle skill"));
    events.push(event(7, "You have gained 0.2 Agility"));
    events.push(event(8, "You have advanced to level 12 in Rifle"));
    events.push(event(9, "You received Animal Hide x (3) Value: 0.4000 PED"));
    let session = session_with(0.1, events);

    let stats = compute_stats(&session, None, None, &StandardCostModel);
    let skills = &stats.skills;
    assert_eq!(skills.total_gains, 3);
    assert!(approx(skills.total_skill, 0.8));
    assert_eq!(skills.skills["Rifle"].count, 2);
    assert!(approx(skills.skills["Rifle"].average, 0.3));
    assert_eq!(skills.skills["Rifle"].category, Some(SkillCategory::Combat));
    assert!(approx(skills.by_category[&SkillCategory::Attributes].total, 0.2));
    assert_eq!(skills.levels_gained, 1);

    let eff = &stats.skill_efficiency;
    assert!(approx(eff.per_ped_spent, 2.0));
    assert!(approx(eff.per_shot, 0.2));
    assert!(approx(eff.per_kill, 0.8));
    assert!(approx(eff.per_loot_ped, 2.0));
    // 0.8 skill over 9 seconds
    assert!(approx(eff.per_hour, 0.8 / (9.0 / 3600.0)));
}

#[test]
fn test_globals_follow_player_filter() {
    let session = session_with(
        0.0,
        vec![
            global(0, "Jane Doe killed a creature (Atrox Young) with a value of 55 PED!"),
            global(1, "John Roe killed a creature (Atrox Young) with a value of 70 PED!"),
        ],
    );
    let mine = compute_stats(&session, Some("Jane Doe"), None, &StandardCostModel);
    assert_eq!(mine.globals.count, 1);
    assert_eq!(mine.globals.total_value, 55.0);

    let everyone = compute_stats(&session, Some("  "), None, &StandardCostModel);
    assert_eq!(everyone.globals.count, 2);
}

#[test]
fn test_stats_serialize_camel_case() {
    let session = session_with(0.05, vec![event(0, "You missed")]);
    let stats = compute_stats(&session, None, None, &StandardCostModel);
    let json = serde_json::to_value(&stats).unwrap();
    assert!(json["economy"]["returnRate"].is_number());
    assert!(json["combat"]["killsInferred"].is_number());
    assert!(json["economy"]["decay"]["repairBill"].is_number());
    assert!(json["combat"].get("firstShot").is_none());
}
