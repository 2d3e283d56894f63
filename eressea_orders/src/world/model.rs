//! Read-only game data: factions, regions and what they contain
//!
//! A [`GameSnapshot`] is the serialized form (JSON). [`GameData`] is built
//! from it once, validated, and indexed for the lookups completion needs.

use super::geometry::{Coordinate, Direction};
use super::ids::EntityId;
use super::known::WellKnown;
use super::rules::{same_name, Rules};
use crate::logging::{codes, Code};
use crate::{log_success, log_warning};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum GameDataError {
    #[error("Failed to read game data '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse game data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{referenced_by} refers to unknown {kind} {id}")]
    DanglingReference {
        kind: &'static str,
        id: String,
        referenced_by: String,
    },
}

impl GameDataError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::Io { .. } => codes::game_data::DATA_IO_ERROR,
            Self::Parse(_) => codes::game_data::DATA_PARSE_ERROR,
            Self::DuplicateId { .. } => codes::game_data::DUPLICATE_ID,
            Self::DanglingReference { .. } => codes::game_data::DANGLING_REFERENCE,
        }
    }

    fn dangling(kind: &'static str, id: impl ToString, referenced_by: String) -> Self {
        Self::DanglingReference {
            kind,
            id: id.to_string(),
            referenced_by,
        }
    }
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faction {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub race: Option<String>,
    /// Help categories granted to other factions (`ALLES`, `SILBER`, ...)
    #[serde(default)]
    pub allies: BTreeMap<EntityId, Vec<String>>,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Report options currently switched on
    #[serde(default)]
    pub options: Vec<String>,
}

impl Faction {
    pub fn is_allied_with(&self, other: EntityId) -> bool {
        self.allies.contains_key(&other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub faction: Option<EntityId>,
    #[serde(default = "one")]
    pub persons: u32,
    #[serde(default)]
    pub race: Option<String>,
    /// Learned skill levels
    #[serde(default)]
    pub skills: BTreeMap<String, u32>,
    /// Race and building bonuses on top of the learned level
    #[serde(default)]
    pub skill_modifiers: BTreeMap<String, i32>,
    #[serde(default)]
    pub items: BTreeMap<String, u32>,
    #[serde(default)]
    pub spells: Vec<String>,
    /// Orders of the current turn
    #[serde(default)]
    pub orders: Vec<String>,
    #[serde(default)]
    pub guarding: bool,
    #[serde(default)]
    pub building: Option<EntityId>,
    #[serde(default)]
    pub ship: Option<EntityId>,
    #[serde(default)]
    pub group: Option<String>,
}

fn lookup<'a, V>(map: &'a BTreeMap<String, V>, name: &str) -> Option<&'a V> {
    map.get(name)
        .or_else(|| map.iter().find(|(key, _)| same_name(key, name)).map(|(_, v)| v))
}

impl Unit {
    pub fn skill_level(&self, skill: &str) -> u32 {
        lookup(&self.skills, skill).copied().unwrap_or(0)
    }

    /// Learned level plus modifiers; a skill never learned stays at 0
    pub fn effective_skill(&self, skill: &str) -> u32 {
        let level = self.skill_level(skill);
        if level == 0 {
            return 0;
        }
        let modifier = lookup(&self.skill_modifiers, skill).copied().unwrap_or(0);
        u32::try_from((i64::from(level) + i64::from(modifier)).max(0)).unwrap_or(u32::MAX)
    }

    pub fn item_amount(&self, item: &str) -> u32 {
        lookup(&self.items, item).copied().unwrap_or(0)
    }

    pub fn knows_spell(&self, spell: &str) -> bool {
        self.spells.iter().any(|s| same_name(s, spell))
    }

    pub fn belongs_to(&self, faction: Option<EntityId>) -> bool {
        faction.is_some() && self.faction == faction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub building_type: String,
    #[serde(default)]
    pub size: u32,
    /// Unit in command
    #[serde(default)]
    pub owner: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub ship_type: String,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub owner: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub coordinate: Coordinate,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub terrain: String,
    #[serde(default)]
    pub ocean: bool,
    #[serde(default)]
    pub peasants: u32,
    #[serde(default)]
    pub silver: u32,
    /// Raw materials that can be gathered (trees, stones, horses, ...)
    #[serde(default)]
    pub resources: BTreeMap<String, u32>,
    /// Luxury prices
    #[serde(default)]
    pub prices: BTreeMap<String, u32>,
    /// The one luxury the region sells
    #[serde(default)]
    pub produced_luxury: Option<String>,
    /// Directions with a finished road
    #[serde(default)]
    pub roads: Vec<Direction>,
    #[serde(default)]
    pub herb: Option<String>,
    #[serde(default)]
    pub units: Vec<Unit>,
    #[serde(default)]
    pub buildings: Vec<Building>,
    #[serde(default)]
    pub ships: Vec<Ship>,
}

impl Region {
    /// Name for display; unnamed regions show their terrain
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.terrain)
    }

    pub fn resource(&self, item: &str) -> u32 {
        lookup(&self.resources, item).copied().unwrap_or(0)
    }

    pub fn price(&self, luxury: &str) -> Option<u32> {
        lookup(&self.prices, luxury).copied()
    }

    pub fn has_road(&self, direction: Direction) -> bool {
        self.roads.contains(&direction)
    }

    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn building(&self, id: EntityId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn ship(&self, id: EntityId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }
}

/// Serialized game state as exported by a report parser
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    #[serde(default)]
    pub rules: Rules,
    /// The faction the report belongs to
    #[serde(default)]
    pub owner: Option<EntityId>,
    #[serde(default)]
    pub factions: Vec<Faction>,
    #[serde(default)]
    pub regions: Vec<Region>,
}

/// Terrain a moving party may cross
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Passage {
    /// Land units never enter the ocean
    Land,
    /// Ships sail the ocean and may end on a coast
    Sea,
}

/// A reachable region and the directions leading there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub destination: Coordinate,
    pub directions: Vec<Direction>,
}

#[derive(Debug, Clone)]
pub struct GameData {
    rules: Rules,
    well_known: WellKnown,
    factions: Vec<Faction>,
    regions: Vec<Region>,
    faction_index: HashMap<EntityId, usize>,
    region_index: HashMap<Coordinate, usize>,
    unit_index: HashMap<EntityId, (usize, usize)>,
}

impl GameData {
    /// Index and validate a snapshot
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, GameDataError> {
        let GameSnapshot {
            rules,
            owner,
            factions,
            regions,
        } = snapshot;

        let mut faction_index = HashMap::with_capacity(factions.len());
        for (i, faction) in factions.iter().enumerate() {
            if faction_index.insert(faction.id, i).is_some() {
                return Err(GameDataError::DuplicateId {
                    kind: "faction",
                    id: faction.id.to_string(),
                });
            }
        }
        if let Some(owner) = owner {
            if !faction_index.contains_key(&owner) {
                return Err(GameDataError::dangling("faction", owner, "report owner".to_string()));
            }
        }

        let mut region_index = HashMap::with_capacity(regions.len());
        let mut unit_index = HashMap::new();
        let mut buildings = HashSet::new();
        let mut ships = HashSet::new();
        for (r, region) in regions.iter().enumerate() {
            if region_index.insert(region.coordinate, r).is_some() {
                return Err(GameDataError::DuplicateId {
                    kind: "region",
                    id: region.coordinate.to_string(),
                });
            }
            for building in &region.buildings {
                if !buildings.insert(building.id) {
                    return Err(GameDataError::DuplicateId {
                        kind: "building",
                        id: building.id.to_string(),
                    });
                }
            }
            for ship in &region.ships {
                if !ships.insert(ship.id) {
                    return Err(GameDataError::DuplicateId {
                        kind: "ship",
                        id: ship.id.to_string(),
                    });
                }
            }
            for (u, unit) in region.units.iter().enumerate() {
                if unit_index.insert(unit.id, (r, u)).is_some() {
                    return Err(GameDataError::DuplicateId {
                        kind: "unit",
                        id: unit.id.to_string(),
                    });
                }
            }
            Self::validate_region(region)?;
        }

        let unknown = rules.unknown_resources();
        if !unknown.is_empty() {
            log_warning!("Rules refer to unknown resources; affected items cannot be made",
                "resources" => unknown.join(", ")
            );
        }

        log_success!(codes::success::GAME_DATA_LOADED, "Game data loaded",
            "owner" => owner.map(|id| id.to_string()).unwrap_or_default(),
            "regions" => regions.len(),
            "factions" => factions.len(),
            "units" => unit_index.len()
        );

        Ok(Self {
            well_known: WellKnown::resolve(&rules),
            rules,
            factions,
            regions,
            faction_index,
            region_index,
            unit_index,
        })
    }

    /// References inside one region must resolve inside that region
    fn validate_region(region: &Region) -> Result<(), GameDataError> {
        for unit in &region.units {
            if let Some(building) = unit.building {
                if region.building(building).is_none() {
                    return Err(GameDataError::dangling("building", building, format!("unit {}", unit.id)));
                }
            }
            if let Some(ship) = unit.ship {
                if region.ship(ship).is_none() {
                    return Err(GameDataError::dangling("ship", ship, format!("unit {}", unit.id)));
                }
            }
        }
        for building in &region.buildings {
            if let Some(owner) = building.owner {
                if region.unit(owner).is_none() {
                    return Err(GameDataError::dangling("unit", owner, format!("building {}", building.id)));
                }
            }
        }
        for ship in &region.ships {
            if let Some(owner) = ship.owner {
                if region.unit(owner).is_none() {
                    return Err(GameDataError::dangling("unit", owner, format!("ship {}", ship.id)));
                }
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, GameDataError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, GameDataError> {
        let content = std::fs::read_to_string(path).map_err(|source| GameDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn well_known(&self) -> &WellKnown {
        &self.well_known
    }

    pub fn faction(&self, id: EntityId) -> Option<&Faction> {
        self.faction_index.get(&id).map(|&i| &self.factions[i])
    }

    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    pub fn region(&self, coordinate: Coordinate) -> Option<&Region> {
        self.region_index.get(&coordinate).map(|&i| &self.regions[i])
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn unit(&self, id: EntityId) -> Option<&Unit> {
        self.unit_index
            .get(&id)
            .map(|&(r, u)| &self.regions[r].units[u])
    }

    /// Region the unit stands in
    pub fn region_of(&self, unit: EntityId) -> Option<&Region> {
        self.unit_index.get(&unit).map(|&(r, _)| &self.regions[r])
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.regions.iter().flat_map(|r| r.units.iter())
    }

    /// Known neighbours of a region
    pub fn neighbours(&self, coordinate: Coordinate) -> impl Iterator<Item = (Direction, &Region)> {
        Direction::ALL.into_iter().filter_map(move |direction| {
            self.region(coordinate.translate(direction))
                .map(|region| (direction, region))
        })
    }

    /// Regions reachable within `radius` steps, nearest first
    pub fn reachable(&self, from: Coordinate, radius: usize, passage: Passage) -> Vec<Route> {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([(from, Vec::new())]);
        let mut routes = Vec::new();

        while let Some((at, path)) = queue.pop_front() {
            if path.len() >= radius {
                continue;
            }
            // a ship that reached land has landed
            if passage == Passage::Sea && !path.is_empty() && !self.region(at).is_some_and(|r| r.ocean) {
                continue;
            }
            for direction in Direction::ALL {
                let next = at.translate(direction);
                let Some(region) = self.region(next) else {
                    continue;
                };
                if passage == Passage::Land && region.ocean {
                    continue;
                }
                if !seen.insert(next) {
                    continue;
                }
                let mut directions: Vec<Direction> = path.clone();
                directions.push(direction);
                routes.push(Route {
                    destination: next,
                    directions: directions.clone(),
                });
                queue.push_back((next, directions));
            }
        }
        routes
    }

    /// Shortest path between two regions, if one exists within `radius`
    pub fn path_to(
        &self,
        from: Coordinate,
        to: Coordinate,
        radius: usize,
        passage: Passage,
    ) -> Option<Vec<Direction>> {
        self.reachable(from, radius, passage)
            .into_iter()
            .find(|route| route.destination == to)
            .map(|route| route.directions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn region(x: i32, y: i32, ocean: bool) -> serde_json::Value {
        let terrain = if ocean { "Ozean" } else { "Ebene" };
        serde_json::json!({
            "coordinate": {"x": x, "y": y},
            "terrain": terrain,
            "ocean": ocean
        })
    }

    fn data(regions: Vec<serde_json::Value>) -> GameData {
        let json = serde_json::json!({ "regions": regions });
        GameData::from_json_str(&json.to_string()).unwrap()
    }

    #[test]
    fn test_land_paths_avoid_ocean() {
        // (1,0) is ocean, the way east leads around it
        let game = data(vec![
            region(0, 0, false),
            region(1, 0, true),
            region(2, 0, false),
            region(0, 1, false),
            region(1, 1, false),
            region(2, -1, false),
        ]);
        let path = game.path_to(Coordinate::new(0, 0), Coordinate::new(2, 0), 4, Passage::Land);
        assert_eq!(path, Some(vec![Direction::NorthEast, Direction::East, Direction::SouthEast]));
        assert!(game
            .reachable(Coordinate::new(0, 0), 4, Passage::Land)
            .iter()
            .all(|route| route.destination != Coordinate::new(1, 0)));
    }

    #[test]
    fn test_radius_bounds_search() {
        let game = data(vec![region(0, 0, false), region(1, 0, false), region(2, 0, false)]);
        let routes = game.reachable(Coordinate::new(0, 0), 1, Passage::Land);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].directions, vec![Direction::East]);
    }

    #[test]
    fn test_ships_stop_at_coast() {
        let game = data(vec![
            region(0, 0, true),
            region(1, 0, false),
            region(2, 0, false),
        ]);
        let routes = game.reachable(Coordinate::new(0, 0), 5, Passage::Sea);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].destination, Coordinate::new(1, 0));
    }

    #[test]
    fn test_validation_errors() {
        let duplicate = serde_json::json!({
            "regions": [region(0, 0, false), region(0, 0, false)]
        });
        assert_matches!(
            GameData::from_json_str(&duplicate.to_string()),
            Err(GameDataError::DuplicateId { kind: "region", .. })
        );

        let dangling = serde_json::json!({
            "regions": [{
                "coordinate": {"x": 0, "y": 0},
                "units": [{"id": "a", "name": "A", "building": "b"}]
            }]
        });
        let error = GameData::from_json_str(&dangling.to_string()).unwrap_err();
        assert_matches!(error, GameDataError::DanglingReference { kind: "building", .. });
        assert_eq!(error.error_code(), codes::game_data::DANGLING_REFERENCE);

        assert_matches!(GameData::from_json_str("{"), Err(GameDataError::Parse(_)));
        assert_matches!(
            GameData::from_json_file(Path::new("/nonexistent/world.json")),
            Err(GameDataError::Io { .. })
        );
    }

    #[test]
    fn test_unit_queries() {
        let json = serde_json::json!({
            "regions": [{
                "coordinate": {"x": 0, "y": 0},
                "units": [{
                    "id": "m1",
                    "name": "Magier",
                    "skills": {"Magie": 3, "Tarnung": 1},
                    "skill_modifiers": {"Tarnung": -2, "Magie": 1},
                    "items": {"Silber": 100}
                }]
            }]
        });
        let game = GameData::from_json_str(&json.to_string()).unwrap();
        let unit = game.unit("m1".parse().unwrap()).unwrap();
        assert_eq!(unit.persons, 1);
        assert_eq!(unit.skill_level("magie"), 3);
        assert_eq!(unit.effective_skill("Magie"), 4);
        assert_eq!(unit.effective_skill("Tarnung"), 0);
        assert_eq!(unit.effective_skill("Taktik"), 0);
        assert_eq!(unit.item_amount("silber"), 100);
        assert!(game.region_of(unit.id).is_some());
    }

    #[test]
    fn test_effective_skill_saturates() {
        let json = serde_json::json!({
            "regions": [{
                "coordinate": {"x": 0, "y": 0},
                "units": [{
                    "id": "m1",
                    "name": "Magier",
                    "skills": {"Magie": u32::MAX},
                    "skill_modifiers": {"Magie": 5}
                }]
            }]
        });
        let game = GameData::from_json_str(&json.to_string()).unwrap();
        let unit = game.unit("m1".parse().unwrap()).unwrap();
        assert_eq!(unit.effective_skill("Magie"), u32::MAX);
    }
}
