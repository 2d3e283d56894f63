//! Directions, paths and coordinates

use super::Request;
use crate::completion::completion::Completion;
use crate::config::compile_time::completion::MAX_PATH_RADIUS;
use crate::config::constants::priority;
use crate::grammar::OrderKey;
use crate::world::{Direction, Passage, Region};

impl Request<'_> {
    /// Ships move with their captain; everybody else walks
    fn passage(&self) -> Passage {
        let captain = self
            .unit
            .ship
            .and_then(|id| self.region.and_then(|region| region.ship(id)))
            .is_some_and(|ship| ship.owner == Some(self.unit.id));
        if captain {
            Passage::Sea
        } else {
            Passage::Land
        }
    }

    fn neighbour(&self, direction: Direction) -> Option<&Region> {
        let region = self.region?;
        self.data.region(region.coordinate.translate(direction))
    }

    fn add_directions(&mut self) {
        let passage = self.passage();
        for direction in Direction::ALL {
            let passable = self
                .neighbour(direction)
                .is_some_and(|region| passage == Passage::Sea || !region.ocean);
            let rank = if passable {
                priority::DEFAULT
            } else {
                priority::RARE
            };
            self.add_keyword(direction.key(), rank);
        }
    }

    /// Reachable regions as `Name (x, y)`, inserting the directions there
    fn add_paths(&mut self) {
        let Some(region) = self.region else {
            return;
        };
        let radius = self.preferences.move_path_radius.min(MAX_PATH_RADIUS);
        for route in self.data.reachable(region.coordinate, radius, self.passage()) {
            let Some(destination) = self.data.region(route.destination) else {
                continue;
            };
            let steps: Vec<&str> = route
                .directions
                .iter()
                .map(|direction| self.word(direction.key()))
                .collect();
            let name = format!(
                "{} ({}, {})",
                destination.display_name(),
                route.destination.x,
                route.destination.y
            );
            self.add(
                Completion::new(name)
                    .with_value(steps.join(" "))
                    .with_priority(priority::DEFAULT),
            );
        }
    }

    /// NACH. Paths only make sense before the first step is typed.
    pub(super) fn cmplt_move(&mut self, first: bool) {
        self.add_directions();
        if first {
            self.add_paths();
        }
    }

    pub(super) fn cmplt_route(&mut self) {
        self.add_directions();
        self.add_keyword(OrderKey::Pause, priority::DEFAULT);
        self.add_paths();
    }

    /// MACHE STRASSE: land borders without a finished road
    pub(super) fn cmplt_make_road(&mut self) {
        let Some(region) = self.region else {
            return;
        };
        for direction in Direction::ALL {
            if region.has_road(direction) {
                continue;
            }
            let rank = match self.neighbour(direction) {
                Some(neighbour) if neighbour.ocean => continue,
                Some(_) => priority::DEFAULT,
                None => priority::RARE,
            };
            self.add_keyword(direction.key(), rank);
        }
    }

    pub(super) fn cmplt_destroy_road(&mut self) {
        let Some(region) = self.region else {
            return;
        };
        for &direction in &region.roads {
            self.add_keyword(direction.key(), priority::DEFAULT);
        }
    }

    fn add_coordinate(&mut self, region: &Region, rank: i32) {
        let coordinate = region.coordinate.to_string();
        self.add(
            Completion::new(format!("{} ({})", coordinate, region.display_name()))
                .with_value(coordinate)
                .with_priority(rank),
        );
    }

    pub(super) fn cmplt_origin(&mut self) {
        if let Some(region) = self.region {
            self.add_coordinate(region, priority::DEFAULT);
        }
    }

    /// Regions of the current plane, the unit's own first
    pub(super) fn cmplt_coordinates(&mut self) {
        let here = self.region.map(|region| region.coordinate);
        for region in self.data.regions() {
            if here.is_some_and(|here| here.z != region.coordinate.z) {
                continue;
            }
            let rank = if Some(region.coordinate) == here {
                priority::FREQUENT
            } else {
                priority::DEFAULT
            };
            self.add_coordinate(region, rank);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::completion::completer::OrderCompleter;
    use crate::completion::Completion;
    use crate::config::constants::priority;
    use crate::config::CompleterPreferences;
    use crate::grammar::LocaleTable;
    use crate::world::GameData;

    // (0,0) Mitte, east (1,0) ocean, north-east (0,1) Wald, (1,1) Berg
    fn world() -> GameData {
        let json = serde_json::json!({
            "owner": "f1",
            "factions": [{"id": "f1", "name": "Eigene"}],
            "regions": [
                {
                    "coordinate": {"x": 0, "y": 0},
                    "name": "Mitte",
                    "terrain": "Ebene",
                    "roads": ["ne"],
                    "units": [{"id": "a", "name": "Hinz", "faction": "f1"}]
                },
                {"coordinate": {"x": 1, "y": 0}, "terrain": "Ozean", "ocean": true},
                {"coordinate": {"x": 0, "y": 1}, "name": "Wald", "terrain": "Wald"},
                {"coordinate": {"x": 1, "y": 1}, "name": "Berg", "terrain": "Berge"}
            ]
        });
        GameData::from_json_str(&json.to_string()).unwrap()
    }

    fn complete(data: &GameData, line: &str) -> Vec<Completion> {
        let table = LocaleTable::german();
        let preferences = CompleterPreferences {
            move_path_radius: 2,
            ..CompleterPreferences::default()
        };
        let completer = OrderCompleter::new(data, &table, preferences);
        let unit = data.unit("a".parse().unwrap()).unwrap();
        completer.complete(unit, line)
    }

    fn find<'c>(completions: &'c [Completion], name: &str) -> Option<&'c Completion> {
        completions.iter().find(|c| c.name == name)
    }

    #[test]
    fn test_directions_rank_by_terrain() {
        let data = world();
        let completions = complete(&data, "NACH ");
        assert_eq!(find(&completions, "NO").unwrap().priority, priority::DEFAULT);
        assert_eq!(find(&completions, "O").unwrap().priority, priority::RARE);
        assert_eq!(find(&completions, "W").unwrap().priority, priority::RARE);
    }

    #[test]
    fn test_paths_insert_directions() {
        let data = world();
        let completions = complete(&data, "NACH ");
        let mountain = find(&completions, "Berg (1, 1)").unwrap();
        assert_eq!(mountain.value, "NO O");
        assert!(find(&completions, "Ozean (1, 0)").is_none());

        let later = complete(&data, "NACH NO ");
        assert!(find(&later, "Berg (1, 1)").is_none());
        assert!(find(&complete(&data, "ROUTE NO "), "PAUSE").is_some());
    }

    #[test]
    fn test_roads() {
        let data = world();
        let build = complete(&data, "MACHE STRASSE ");
        assert!(find(&build, "NO").is_none());
        assert!(find(&build, "O").is_none());
        assert_eq!(find(&build, "W").unwrap().priority, priority::RARE);

        let destroy = complete(&data, "ZERSTÖRE STRASSE ");
        assert_eq!(destroy.len(), 1);
        assert_eq!(destroy[0].name, "NO");
    }

    #[test]
    fn test_origin_is_the_current_region() {
        let data = world();
        let completions = complete(&data, "URSPRUNG ");
        assert_eq!(completions.len(), 1);
        assert_eq!(completions[0].name, "0 0 (Mitte)");
        assert_eq!(completions[0].value, "0 0");
    }
}
