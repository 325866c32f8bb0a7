use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, TimeZone};
use pedtrack_core::context::{AppConfig, AppConfigExt};
use pedtrack_core::session::SessionEvent;
use pedtrack_core::storage::SessionSummary;
use pedtrack_core::{
    EventHandler, FileSessionStore, LiveSession, Loadout, Session, SessionStats, SessionStore,
    StandardCostModel, TailerState, compute_stats, read_log_file,
};
use pedtrack_types::formatting::{
    format_compact, format_decimal, format_duration_ms, format_pct, format_ped, format_ped_precise,
};
use tokio::sync::mpsc;

use crate::{SessionArgs, SessionCommands};

/// Prints each recorded event as it arrives.
struct PrintHandler;

impl EventHandler for PrintHandler {
    fn handle_event(&mut self, event: &SessionEvent) {
        println!(
            "{} [{}] {}",
            format_time(event.timestamp),
            event.event_type,
            event.raw
        );
    }
}

fn format_time(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

fn load_loadout(args: &SessionArgs, config: &AppConfig) -> Result<Option<Loadout>, String> {
    let path = args
        .loadout
        .clone()
        .or_else(|| config.loadout_path.as_ref().map(PathBuf::from));
    match path {
        Some(path) => Loadout::load(&path)
            .map(Some)
            .map_err(|e| format!("Failed to load loadout {}: {e}", path.display())),
        None => Ok(None),
    }
}

fn player_name<'a>(args: &'a SessionArgs, config: &'a AppConfig) -> Option<&'a str> {
    args.player
        .as_deref()
        .or(Some(config.player_name.as_str()))
        .filter(|p| !p.trim().is_empty())
}

fn new_live_session(
    args: &SessionArgs,
    config: &AppConfig,
    default_name: &str,
) -> Result<LiveSession, String> {
    let name = args.name.clone().unwrap_or_else(|| default_name.to_string());
    let cost = args.cost_per_shot.unwrap_or(config.manual_cost_per_shot);
    let mut live = LiveSession::new(Session::new(name, cost), Arc::new(StandardCostModel));
    live.set_active_loadout(load_loadout(args, config)?);
    Ok(live)
}

fn store_for(config: &AppConfig) -> FileSessionStore {
    FileSessionStore::with_dir(config.resolved_sessions_dir())
}

pub async fn watch(path: Option<PathBuf>, args: SessionArgs) -> Result<(), String> {
    let config = AppConfig::load();
    let path = path.unwrap_or_else(|| config.resolved_log_path());
    let default_name = format!("Session {}", Local::now().format("%Y-%m-%d %H:%M"));

    let mut live = new_live_session(&args, &config, &default_name)?;
    live.add_event_handler(Box::new(PrintHandler));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tailer = TailerState::start(&path, tx, &config.tailer).map_err(|e| e.to_string())?;
    println!("Watching {} (Ctrl+C to stop)", path.display());

    loop {
        tokio::select! {
            line = rx.recv() => match line {
                Some(line) => {
                    live.ingest_line(&line);
                }
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tailer.stop();
    live.end();

    let stats = live.stats(player_name(&args, &config));
    let session = live.into_session();
    print_stats(&session, &stats, config.european_numbers);

    if session.events.is_empty() {
        println!("No events recorded, session not saved");
        return Ok(());
    }
    store_for(&config).save(&session).map_err(|e| e.to_string())?;
    println!("Saved session {}", session.id);
    Ok(())
}

pub fn parse(path: &Path, args: SessionArgs, json: bool, save: bool) -> Result<(), String> {
    let config = AppConfig::load();
    let (events, _) = read_log_file(path).map_err(|e| format!("{}: {e}", path.display()))?;

    let default_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Imported log".to_string());
    let mut live = new_live_session(&args, &config, &default_name)?;

    let first = events.first().map(|e| e.timestamp);
    let last = events.last().map(|e| e.timestamp);
    live.ingest_events(events);

    let mut session = live.into_session();
    if let Some(first) = first {
        session.started_at = first;
    }
    session.end_at(last.unwrap_or(session.started_at));

    let loadout = load_loadout(&args, &config)?;
    let stats = compute_stats(
        &session,
        player_name(&args, &config),
        loadout.as_ref(),
        &StandardCostModel,
    );

    if json {
        let text = serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        print_stats(&session, &stats, config.european_numbers);
    }

    if save {
        store_for(&config).save(&session).map_err(|e| e.to_string())?;
        println!("Saved session {}", session.id);
    }
    Ok(())
}

pub fn sessions(command: SessionCommands) -> Result<(), String> {
    let config = AppConfig::load();
    let store = store_for(&config);

    match command {
        SessionCommands::List => {
            let summaries = store.list().map_err(|e| e.to_string())?;
            if summaries.is_empty() {
                println!("No stored sessions in {}", store.sessions_dir().display());
            }
            for summary in summaries {
                print_summary(&summary);
            }
        }
        SessionCommands::Show { id, json } => {
            let session = store.load(&id).map_err(|e| e.to_string())?;
            let loadout = load_loadout(&SessionArgs::default(), &config)?;
            let stats = compute_stats(
                &session,
                player_name(&SessionArgs::default(), &config),
                loadout.as_ref(),
                &StandardCostModel,
            );
            if json {
                let text = serde_json::to_string_pretty(&stats).map_err(|e| e.to_string())?;
                println!("{text}");
            } else {
                print_stats(&session, &stats, config.european_numbers);
            }
        }
        SessionCommands::Delete { id } => {
            store.delete(&id).map_err(|e| e.to_string())?;
            println!("Deleted session {id}");
        }
        SessionCommands::Export { id, path } => {
            store.export(&id, &path).map_err(|e| e.to_string())?;
            println!("Exported session {id} to {}", path.display());
        }
        SessionCommands::Import { path } => {
            let session = store.import(&path).map_err(|e| e.to_string())?;
            println!("Imported session {} ({})", session.id, session.name);
        }
    }
    Ok(())
}

pub fn config(
    log_path: Option<String>,
    player: Option<String>,
    cost_per_shot: Option<f64>,
    loadout: Option<String>,
    european_numbers: Option<bool>,
) -> Result<(), String> {
    let mut config = AppConfig::load();
    let changed = log_path.is_some()
        || player.is_some()
        || cost_per_shot.is_some()
        || loadout.is_some()
        || european_numbers.is_some();

    if let Some(path) = log_path {
        config.log_path = path;
    }
    if let Some(player) = player {
        config.player_name = player;
    }
    if let Some(cost) = cost_per_shot {
        if !cost.is_finite() || cost < 0.0 {
            return Err(format!("Invalid cost per shot: {cost}"));
        }
        config.manual_cost_per_shot = cost;
    }
    if let Some(loadout) = loadout {
        config.loadout_path = Some(loadout).filter(|l| !l.trim().is_empty());
    }
    if let Some(european) = european_numbers {
        config.european_numbers = european;
    }

    if changed {
        config.save().map_err(|e| e.to_string())?;
        println!("Config saved");
    }

    if let Ok(path) = AppConfig::config_path() {
        println!("Config file:   {}", path.display());
    }
    println!("Log file:      {}", config.resolved_log_path().display());
    println!("Sessions:      {}", config.resolved_sessions_dir().display());
    println!("Player:        {}", config.player_name);
    println!("Cost per shot: {}", config.manual_cost_per_shot);
    if let Some(loadout) = &config.loadout_path {
        println!("Loadout:       {loadout}");
    }
    Ok(())
}

fn print_summary(summary: &SessionSummary) {
    let state = if summary.ended_at.is_some() { "" } else { " (active)" };
    println!(
        "{}  {}  {:>6} events  {}{}",
        summary.id,
        format_time(summary.started_at),
        summary.event_count,
        summary.name,
        state
    );
}

fn print_stats(session: &Session, stats: &SessionStats, eu: bool) {
    let combat = &stats.combat;
    let economy = &stats.economy;
    let loot = &stats.loot;

    println!();
    println!("=== {} ===", session.name);
    println!("Duration:     {}", format_duration_ms(stats.duration_ms));
    println!("Events:       {}", stats.event_count);

    println!("--- Combat ---");
    println!(
        "Shots: {}  Hits: {}  Misses: {}  Criticals: {}",
        combat.shots, combat.hits, combat.misses, combat.criticals
    );
    println!(
        "Hit rate: {}  Crit rate: {}  DPS: {}",
        format_pct(combat.hit_rate, eu),
        format_pct(combat.crit_rate, eu),
        format_decimal(combat.dps, 1, eu)
    );
    println!(
        "Damage dealt: {}  taken: {}  Kills: {}  Deaths: {}",
        format_compact(combat.damage_dealt, eu),
        format_compact(combat.damage_taken, eu),
        combat.kills,
        combat.deaths
    );

    println!("--- Loot ---");
    println!(
        "Loot: {}  Events: {}  Unique items: {}",
        format_ped(loot.total_value, eu),
        loot.loot_events,
        loot.unique_items
    );
    if stats.globals.count > 0 {
        println!(
            "Globals: {} (HoF {})  best {}",
            stats.globals.count,
            stats.globals.hof_count,
            format_ped(stats.globals.best_value, eu)
        );
    }

    println!("--- Economy ---");
    for loadout in &economy.loadouts {
        println!(
            "{}: {} shots at {}, spend {}, loot {}, return {}",
            loadout.name,
            loadout.shots,
            format_ped_precise(loadout.cost_per_shot, eu),
            format_ped(loadout.spend, eu),
            format_ped(loadout.loot_value, eu),
            format_pct(loadout.return_rate, eu)
        );
    }
    println!(
        "Spend: {}  Profit: {}  Return: {}",
        format_ped(economy.total_spend, eu),
        format_ped(economy.profit, eu),
        format_pct(economy.return_rate, eu)
    );
    println!(
        "Decay: {}  Repair bill: {}  Net: {}",
        format_ped(economy.decay.total, eu),
        format_ped(economy.decay.repair_bill, eu),
        format_ped(economy.net_profit, eu)
    );

    println!("--- Skills ---");
    println!(
        "Total: {} over {} gains  Levels: {}",
        format_decimal(stats.skills.total_skill, 4, eu),
        stats.skills.total_gains,
        stats.skills.levels_gained
    );
    let mut top: Vec<_> = stats.skills.skills.iter().collect();
    top.sort_by(|a, b| b.1.total.total_cmp(&a.1.total));
    for (skill, stat) in top.into_iter().take(5) {
        println!("  {skill}: {}", format_decimal(stat.total, 4, eu));
    }
}
