use std::io::Write;

use assert_matches::assert_matches;
use eressea_orders::{
    CompleterPreferences, GameData, GameDataError, LocaleTable, OrderChecker, OrderCompleter,
    RuntimeConfig, SyntaxError,
};

const WORLD: &str = r#"{
    "owner": "f1",
    "factions": [{"id": "f1", "name": "Eigene"}],
    "regions": [{
        "coordinate": {"x": 3, "y": -2},
        "name": "Küste",
        "units": [{"id": "a", "name": "Hinz", "faction": "f1"},
                  {"id": "b", "name": "Kunz", "faction": "f1"}]
    }]
}"#;

#[test]
fn world_and_preferences_from_files() {
    let mut world = tempfile::NamedTempFile::new().unwrap();
    world.write_all(WORLD.as_bytes()).unwrap();
    let data = GameData::from_json_file(world.path()).unwrap();

    let mut preferences = tempfile::NamedTempFile::new().unwrap();
    writeln!(preferences, "[completer]\nlocale = \"en\"\nmove_path_radius = 0").unwrap();
    let config = RuntimeConfig::load(preferences.path()).unwrap();

    let table = LocaleTable::for_locale(config.completer.locale);
    let completer = OrderCompleter::new(&data, &table, config.completer.clone());
    let completions = completer
        .complete_for("a".parse().unwrap(), "GIVE ")
        .unwrap();
    let names: Vec<&str> = completions.iter().map(|c| c.name.as_str()).collect();
    assert!(names.contains(&"Kunz (b)"));
    assert!(names.contains(&"b (Kunz)"));
}

#[test]
fn broken_world_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    assert_matches!(
        GameData::from_json_file(&dir.path().join("missing.json")),
        Err(GameDataError::Io { .. })
    );

    let dangling = WORLD.replace(
        "\"faction\": \"f1\"}]",
        "\"faction\": \"f1\", \"building\": \"zz\"}]",
    );
    assert_matches!(
        GameData::from_json_str(&dangling),
        Err(GameDataError::DanglingReference { .. })
    );
}

#[test]
fn order_file_with_completed_lines_checks_clean() {
    let data = GameData::from_json_str(WORLD).unwrap();
    let table = LocaleTable::german();
    let completer = OrderCompleter::new(&data, &table, CompleterPreferences::default());

    // Accept the first suggestion for the target and write the order out
    let target = completer
        .complete_for("a".parse().unwrap(), "GIB ")
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
    let text = format!(
        "ERESSEA f1 \"geheim\"\nREGION 3,-2\nEINHEIT a\nGIB {}{}5 Silber\nNÄCHSTER\n",
        target.value, target.postfix
    );

    let mut checker = OrderChecker::new(&table);
    let report = checker.check_text(&text);
    assert!(report.is_clean(), "{:?}", report.errors);
    assert_eq!(report.orders_checked, 1);
}

#[test]
fn order_file_errors_carry_lines() {
    let table = LocaleTable::german();
    let mut checker = OrderChecker::new(&table);
    let report = checker.check_text("EINHEIT a\nLERNE\nBANNER \"offen\n");

    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].line, 2);
    assert_matches!(
        report.errors[0].error,
        SyntaxError::UnexpectedEndOfOrder { .. }
    );
    assert_matches!(report.errors[1].error, SyntaxError::UnterminatedString { .. });
}
