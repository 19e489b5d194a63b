//! Integration tests for roster CSV loading, bulk import and configuration.

use cricket_match_web::seed::read_records;
use cricket_match_web::{
    advance, import_players, load_players_csv, reset_to_step, AppConfig, GameError, GameSession,
    SeedError, WizardStep,
};
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn csv_roster_without_ids_gets_positional_ids() {
    let csv = "name,image_url,weight\nAlice,,3\nBob,/images/bob.png,4.5\n";
    let players = load_players_csv(csv.as_bytes()).unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].id, "01");
    assert_eq!(players[1].id, "02");
    assert!(players[0].image_url.starts_with("https://ui-avatars.com/api/?name=Alice"));
    assert_eq!(players[1].image_url, "/images/bob.png");
    assert_eq!(players[1].weight, 4.5);
}

#[test]
fn csv_roster_keeps_ids_and_is_restored_on_reset() {
    let csv = "id,name,weight\nk1, Kohli ,5\nk2,Root,4\n";
    let players = load_players_csv(csv.as_bytes()).unwrap();
    assert_eq!(players[0].name, "Kohli");

    let mut g = GameSession::new(players.clone());
    advance(&mut g).unwrap();
    reset_to_step(&mut g, WizardStep::AddPlayers).unwrap();
    assert_eq!(g.pool(), players.as_slice());
}

#[test]
fn csv_roster_rejects_bad_rows() {
    let bad_weight = "name,weight\nAlice,3\nBob,zero\n";
    match load_players_csv(bad_weight.as_bytes()) {
        Err(SeedError::InvalidRow { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected InvalidRow, got {other:?}"),
    }

    let dup = "id,name,weight\na,Alice,1\na,Bob,2\n";
    assert!(matches!(
        load_players_csv(dup.as_bytes()),
        Err(SeedError::DuplicateId(id)) if id == "a"
    ));

    assert!(matches!(
        load_players_csv("name,weight\n".as_bytes()),
        Err(SeedError::Empty)
    ));
}

#[test]
fn import_is_all_or_nothing() {
    let mut g = GameSession::default();
    let bad = read_records("name,weight\nAlice,3\n ,2\n".as_bytes()).unwrap();
    assert!(matches!(
        import_players(&mut g, bad),
        Err(GameError::InvalidRecord { line: 3, .. })
    ));
    assert_eq!(g.pool().len(), 20);

    let good = read_records("name,image_url,weight\nAlice,,3\nBob,,2\n".as_bytes()).unwrap();
    let notice = import_players(&mut g, good).unwrap();
    assert_eq!(g.pool().len(), 22);
    assert_eq!(g.pool()[21].name, "Bob");
    assert!(notice.description.starts_with("2 players"));
}

fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn config_defaults() {
    let c = config_from(&[]);
    assert_eq!(c, AppConfig::default());
    assert_eq!(c.host, "0.0.0.0");
    assert_eq!(c.port, 8080);
    assert_eq!(c.session_ttl, Duration::from_secs(12 * 3600));
    assert!(c.seed_csv.is_none());
    assert!(!c.cookie_secure);
}

#[test]
fn config_reads_overrides_and_ignores_garbage() {
    let long_key = "k".repeat(64);
    let c = config_from(&[
        ("HOST", "127.0.0.1"),
        ("PORT", "not-a-port"),
        ("SESSION_TTL_HOURS", "2"),
        ("SEED_PLAYERS_CSV", "roster.csv"),
        ("SESSION_KEY", &long_key),
        ("COOKIE_SECURE", "true"),
    ]);
    assert_eq!(c.host, "127.0.0.1");
    assert_eq!(c.port, 8080);
    assert_eq!(c.session_ttl, Duration::from_secs(2 * 3600));
    assert_eq!(c.seed_csv.as_deref(), Some(std::path::Path::new("roster.csv")));
    assert_eq!(c.session_key.as_deref(), Some(long_key.as_bytes()));
    assert!(c.cookie_secure);

    let short = config_from(&[("SESSION_KEY", "short"), ("SESSION_TTL_HOURS", "0")]);
    assert!(short.session_key.is_none());
    assert_eq!(short.session_ttl, Duration::from_secs(12 * 3600));
}

#[test]
fn config_ttl_too_large_falls_back_to_default() {
    let c = config_from(&[("SESSION_TTL_HOURS", "10000000000000000")]);
    assert_eq!(c.session_ttl, Duration::from_secs(12 * 3600));
}
