use assert_matches::assert_matches;
use eressea_orders::completion::{crop, stub};
use eressea_orders::{
    CompleterPreferences, Completion, CompletionError, EntityId, GameData, LocaleTable,
    OrderCompleter,
};

const WORLD: &str = r#"{
    "owner": "f1",
    "rules": {
        "skills": [
            {"name": "Magie"},
            {"name": "Pferdedressur"},
            {"name": "Hiebwaffen"},
            {"name": "Burgenbau"},
            {"name": "Schiffbau"}
        ],
        "items": [
            {"name": "Silber", "category": "silver"},
            {"name": "Pferd", "category": "horse",
             "resources": [{"item": "Pferd", "amount": 1}],
             "make_skill": {"skill": "Pferdedressur", "level": 1}},
            {"name": "Holz", "category": "resource"}
        ],
        "buildings": [{"name": "Burg", "castle": true}],
        "ships": [{"name": "Boot"}],
        "races": [{"name": "Menschen", "recruit_cost": 75}]
    },
    "factions": [
        {"id": "f1", "name": "Eigene", "race": "Menschen", "allies": {"f2": ["HELFE"]}},
        {"id": "f2", "name": "Nachbarn"},
        {"id": "f3", "name": "Fremde"}
    ],
    "regions": [{
        "coordinate": {"x": 0, "y": 0},
        "name": "Weideland",
        "terrain": "Ebene",
        "peasants": 800,
        "silver": 4000,
        "resources": {"Pferd": 0},
        "units": [
            {"id": "a", "name": "Magier", "faction": "f1", "skills": {"Magie": 3},
             "items": {"Silber": 1000}, "building": "b1"},
            {"id": "b", "name": "Knecht", "faction": "f1"},
            {"id": "c", "name": "Fremder", "faction": "f3", "ship": "s1"},
            {"id": "d", "name": "Freund", "faction": "f2"}
        ],
        "buildings": [{"id": "b1", "name": "Wacht", "type": "Burg", "size": 10, "owner": "a"}],
        "ships": [{"id": "s1", "name": "Möwe", "type": "Boot", "size": 5, "owner": "c"}]
    }]
}"#;

fn world() -> GameData {
    GameData::from_json_str(WORLD).unwrap()
}

fn unit_id(id: &str) -> EntityId {
    id.parse().unwrap()
}

fn complete_with(
    data: &GameData,
    preferences: CompleterPreferences,
    line: &str,
) -> Vec<Completion> {
    let table = LocaleTable::german();
    let completer = OrderCompleter::new(data, &table, preferences);
    completer.complete_for(unit_id("a"), line).unwrap()
}

fn complete(data: &GameData, line: &str) -> Vec<Completion> {
    complete_with(data, CompleterPreferences::default(), line)
}

fn names(completions: &[Completion]) -> Vec<&str> {
    completions.iter().map(|c| c.name.as_str()).collect()
}

fn assert_ranked(completions: &[Completion]) {
    for pair in completions.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.priority < b.priority
                || (a.priority == b.priority && a.name.to_lowercase() <= b.name.to_lowercase()),
            "{} ({}) sorted before {} ({})",
            a.name,
            a.priority,
            b.name,
            b.priority
        );
    }
}

#[test]
fn make_without_horses_hides_horse_when_limited() {
    let data = world();
    let limited = CompleterPreferences {
        limit_make_completion: true,
        ..CompleterPreferences::default()
    };
    let completions = complete_with(&data, limited, "MACHE ");
    assert!(!names(&completions).contains(&"Pferd"));
    assert!(names(&completions).contains(&"BURG"));

    let unlimited = CompleterPreferences {
        limit_make_completion: false,
        ..CompleterPreferences::default()
    };
    let completions = complete_with(&data, unlimited, "MACHE ");
    assert!(names(&completions).contains(&"Pferd"));
}

#[test]
fn make_horse_follows_regional_stock() {
    let trainer = WORLD.replace(
        r#""skills": {"Magie": 3}"#,
        r#""skills": {"Magie": 3, "Pferdedressur": 1}"#,
    );
    let limited = CompleterPreferences {
        limit_make_completion: true,
        ..CompleterPreferences::default()
    };

    let data = GameData::from_json_str(&trainer).unwrap();
    let completions = complete_with(&data, limited.clone(), "MACHE ");
    assert!(!names(&completions).contains(&"Pferd"));

    let stocked = trainer.replace(r#""resources": {"Pferd": 0}"#, r#""resources": {"Pferd": 2}"#);
    let data = GameData::from_json_str(&stocked).unwrap();
    let completions = complete_with(&data, limited.clone(), "MACHE ");
    assert!(names(&completions).contains(&"Pferd"));

    let pooled = trainer.replace(
        r#"{"id": "b", "name": "Knecht", "faction": "f1"}"#,
        r#"{"id": "b", "name": "Knecht", "faction": "f1", "items": {"Pferd": 1}}"#,
    );
    let data = GameData::from_json_str(&pooled).unwrap();
    let completions = complete_with(&data, limited, "MACHE ");
    assert!(names(&completions).contains(&"Pferd"));
}

#[test]
fn learning_magic_reserves_progressive_cost() {
    let data = world();
    let completions = complete(&data, "LERNE ");
    let magic = completions.iter().find(|c| c.name == "Magie").unwrap();
    assert!(magic.insertion().contains("550"));

    let english = LocaleTable::english();
    let completer = OrderCompleter::new(&data, &english, CompleterPreferences::default());
    let completions = completer.complete_for(unit_id("a"), "LEARN ").unwrap();
    let magic = completions.iter().find(|c| c.name == "Magie").unwrap();
    assert!(magic.insertion().contains("RESERVE 550"));
}

#[test]
fn stub_selects_matching_keyword() {
    let candidates = vec![Completion::new("ATTACKIERE"), Completion::new("ATMEN")];
    assert_eq!(names(&crop(candidates, "ATT")), vec!["ATTACKIERE"]);

    let data = world();
    let completions = complete(&data, "ATT");
    assert!(names(&completions).contains(&"ATTACKIERE"));
    assert!(completions.iter().all(|c| c.name.to_uppercase().starts_with("ATT")));
}

#[test]
fn cropping_is_idempotent() {
    let data = world();
    for line in ["GIB ", "GIB K", "ATTACKIERE ", "BETRETE BURG "] {
        let once = complete(&data, line);
        let twice = crop(once.clone(), stub(line));
        assert_eq!(once, twice, "line {:?}", line);
    }
}

#[test]
fn every_completion_starts_with_stub() {
    let data = world();
    for line in ["GIB k", "GIB a 5 ", "LERNE ma", "KONTAKTIERE F", "nA"] {
        let typed = stub(line).to_lowercase();
        for completion in complete(&data, line) {
            assert!(
                completion.name.to_lowercase().starts_with(&typed),
                "{:?} does not match stub of {:?}",
                completion.name,
                line
            );
        }
    }
}

#[test]
fn completions_are_ranked() {
    let data = world();
    for line in ["", "GIB ", "LERNE ", "MACHE ", "KÄMPFE ", "ATTACKIERE "] {
        assert_ranked(&complete(&data, line));
    }
}

#[test]
fn empty_stub_keeps_every_candidate() {
    let data = world();
    let table = LocaleTable::german();
    let completer = OrderCompleter::new(&data, &table, CompleterPreferences::default());
    let unit = data.unit(unit_id("a")).unwrap();

    let raw = completer.candidates(unit, "GIB ");
    let completed = completer.complete(unit, "GIB ");
    assert_eq!(raw.len(), completed.len());
    for candidate in &raw {
        assert!(completed.contains(candidate));
    }
}

#[test]
fn references_come_in_mirrored_pairs() {
    let data = world();
    let lines = ["GIB ", "ATTACKIERE ", "BETRETE BURG ", "BETRETE SCHIFF ", "KONTAKTIERE "];
    for line in lines {
        let completions = complete(&data, line);
        for completion in completions.iter().filter(|c| c.name.ends_with(')')) {
            let (name, id) = completion
                .name
                .trim_end_matches(')')
                .rsplit_once(" (")
                .unwrap();
            let mirror = format!("{} ({})", id, name);
            let twin = completions.iter().find(|c| c.name == mirror).unwrap_or_else(|| {
                panic!("{:?} has no mirror for {:?}", completion.name, line)
            });
            assert_eq!(twin.value, completion.value);
        }
    }

    let ships = complete(&data, "BETRETE SCHIFF ");
    assert_eq!(names(&ships), vec!["Möwe (s1)", "s1 (Möwe)"]);
    assert!(ships.iter().all(|c| c.value == "s1"));
}

#[test]
fn attack_ranks_allies_last() {
    let data = world();
    let completions = complete(&data, "ATTACKIERE ");
    assert_eq!(
        names(&completions),
        vec!["Fremder (c)", "c (Fremder)", "Freund (d)", "d (Freund)"]
    );
}

#[test]
fn unknown_verb_and_unknown_unit() {
    let data = world();
    assert!(complete(&data, "TANZE ").is_empty());

    let table = LocaleTable::german();
    let completer = OrderCompleter::new(&data, &table, CompleterPreferences::default());
    assert_matches!(
        completer.complete_for(unit_id("zz"), "GIB "),
        Err(CompletionError::UnitNotFound(_))
    );
}

#[test]
fn only_the_last_line_is_completed() {
    let data = world();
    let text = "ARBEITE\n; Kommentar\nLERNE ";
    let completions = complete(&data, text);
    assert!(names(&completions).contains(&"Magie"));
}
