use serde::de::{self, IgnoredAny, IntoDeserializer, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:4040";
pub const GAME_PATH: &str = "game";

/// Status literal the server uses to tag a rejected command.
pub const ERROR_STATUS: &str = "error";

/// A cell on the board in game-space, origin at the bottom-left corner.
///
/// On the wire a position is the two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self, size: usize) -> bool {
        self.x < size && self.y < size
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for (usize, usize) {
    fn from(position: Position) -> Self {
        (position.x, position.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// One player as reported by the server: `[[x, y], name, is_alive]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Position, String, bool)", into = "(Position, String, bool)")]
pub struct PlayerView {
    pub position: Position,
    pub name: String,
    pub is_alive: bool,
}

impl PlayerView {
    pub fn new(position: Position, name: impl Into<String>, is_alive: bool) -> Self {
        Self {
            position,
            name: name.into(),
            is_alive,
        }
    }
}

impl From<(Position, String, bool)> for PlayerView {
    fn from((position, name, is_alive): (Position, String, bool)) -> Self {
        Self {
            position,
            name,
            is_alive,
        }
    }
}

impl From<PlayerView> for (Position, String, bool) {
    fn from(player: PlayerView) -> Self {
        (player.position, player.name, player.is_alive)
    }
}

/// Full authoritative game state at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub walls: BTreeSet<Position>,
    pub players: Vec<PlayerView>,
}

impl BoardSnapshot {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            walls: BTreeSet::new(),
            players: Vec::new(),
        }
    }

    pub fn with_wall(mut self, x: usize, y: usize) -> Self {
        self.walls.insert(Position::new(x, y));
        self
    }

    pub fn with_player(mut self, x: usize, y: usize, name: &str, is_alive: bool) -> Self {
        self.players
            .push(PlayerView::new(Position::new(x, y), name, is_alive));
        self
    }

    /// Decodes a state response body and checks it against the board invariants.
    pub fn from_json(body: &str) -> Result<Self, WireError> {
        let snapshot: BoardSnapshot = serde_json::from_str(body)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Every wall and player must sit inside the `size × size` grid.
    pub fn validate(&self) -> Result<(), WireError> {
        if self.size == 0 {
            return Err(WireError::EmptyBoard);
        }

        let positions = self
            .walls
            .iter()
            .copied()
            .chain(self.players.iter().map(|player| player.position));

        for position in positions {
            if !position.in_bounds(self.size) {
                return Err(WireError::OutOfBounds {
                    position,
                    size: self.size,
                });
            }
        }

        Ok(())
    }
}

/// Outcome of a walk or attack command.
///
/// The server encodes it as `[status, payload]`; a status equal to the string
/// `"error"` carries a human-readable message, any other status is a success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult<T> {
    Ok(T),
    Error(String),
}

impl<T> ActionResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActionResult::Ok(_))
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ActionResult<U> {
        match self {
            ActionResult::Ok(payload) => ActionResult::Ok(f(payload)),
            ActionResult::Error(message) => ActionResult::Error(message),
        }
    }
}

impl ActionResult<()> {
    /// Decodes a walk response. The success payload is ignored.
    pub fn walk_from_json(body: &str) -> Result<Self, WireError> {
        let result: ActionResult<IgnoredAny> = serde_json::from_str(body)?;
        Ok(result.map(|_| ()))
    }
}

impl ActionResult<u32> {
    /// Decodes an attack response; the success payload is the kill count.
    pub fn attack_from_json(body: &str) -> Result<Self, WireError> {
        Ok(serde_json::from_str(body)?)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ActionResult<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ActionResultVisitor(PhantomData))
    }
}

struct ActionResultVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for ActionResultVisitor<T> {
    type Value = ActionResult<T>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a [status, payload] array")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let status: serde_json::Value = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        if status.as_str() == Some(ERROR_STATUS) {
            let message: String = seq
                .next_element()?
                .ok_or_else(|| de::Error::invalid_length(1, &self))?;
            return Ok(ActionResult::Error(message));
        }

        // A bare `[status]` is accepted when the payload type can stand in for unit.
        let payload = match seq.next_element()? {
            Some(payload) => payload,
            None => T::deserialize(<() as IntoDeserializer<'de, A::Error>>::into_deserializer(()))
                .map_err(|_| de::Error::invalid_length(1, &self))?,
        };

        Ok(ActionResult::Ok(payload))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The value of the `direction` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("position {position} is outside a board of size {size}")]
    OutOfBounds { position: Position, size: usize },

    #[error("board size must be positive")]
    EmptyBoard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_decoding() {
        let body = r#"{"size":3,"walls":[[1,1]],"players":[[[0,0],"alice",true],[[2,1],"bob",false]]}"#;
        let snapshot = BoardSnapshot::from_json(body).unwrap();

        assert_eq!(snapshot.size, 3);
        assert!(snapshot.walls.contains(&Position::new(1, 1)));
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.players[0], PlayerView::new(Position::new(0, 0), "alice", true));
        assert_eq!(snapshot.players[1].name, "bob");
        assert!(!snapshot.players[1].is_alive);
    }

    #[test]
    fn test_snapshot_keeps_player_order() {
        let body = r#"{"size":4,"walls":[],"players":[[[3,3],"zed",true],[[0,0],"amy",true]]}"#;
        let snapshot = BoardSnapshot::from_json(body).unwrap();

        let names: Vec<&str> = snapshot.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zed", "amy"]);
    }

    #[test]
    fn test_snapshot_rejects_out_of_bounds_wall() {
        let body = r#"{"size":2,"walls":[[2,0]],"players":[]}"#;
        match BoardSnapshot::from_json(body) {
            Err(WireError::OutOfBounds { position, size }) => {
                assert_eq!(position, Position::new(2, 0));
                assert_eq!(size, 2);
            }
            other => panic!("expected out of bounds error, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_rejects_out_of_bounds_player() {
        let body = r#"{"size":2,"walls":[],"players":[[[0,5],"alice",true]]}"#;
        assert!(matches!(
            BoardSnapshot::from_json(body),
            Err(WireError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_snapshot_rejects_negative_coordinates() {
        let body = r#"{"size":2,"walls":[[-1,0]],"players":[]}"#;
        assert!(matches!(
            BoardSnapshot::from_json(body),
            Err(WireError::Malformed(_))
        ));
    }

    #[test]
    fn test_snapshot_rejects_empty_board() {
        let body = r#"{"size":0,"walls":[],"players":[]}"#;
        assert!(matches!(
            BoardSnapshot::from_json(body),
            Err(WireError::EmptyBoard)
        ));
    }

    #[test]
    fn test_snapshot_rejects_wrong_shape() {
        assert!(BoardSnapshot::from_json(r#"{"size":3}"#).is_err());
        assert!(BoardSnapshot::from_json("not json").is_err());
        assert!(BoardSnapshot::from_json(r#"{"size":3,"walls":[[1]],"players":[]}"#).is_err());
    }

    #[test]
    fn test_walk_error_result() {
        let result = ActionResult::walk_from_json(r#"["error","can't walk into wall"]"#).unwrap();
        assert_eq!(result, ActionResult::Error("can't walk into wall".to_string()));
    }

    #[test]
    fn test_walk_ok_ignores_payload() {
        let result = ActionResult::walk_from_json(r#"["ok",{"anything":[1,2]}]"#).unwrap();
        assert_eq!(result, ActionResult::Ok(()));

        let result = ActionResult::walk_from_json(r#"["ok",null]"#).unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_walk_ok_without_payload() {
        let result = ActionResult::walk_from_json(r#"["ok"]"#).unwrap();
        assert_eq!(result, ActionResult::Ok(()));
    }

    #[test]
    fn test_attack_kill_count() {
        let result = ActionResult::attack_from_json(r#"["ok",2]"#).unwrap();
        assert_eq!(result, ActionResult::Ok(2));
    }

    #[test]
    fn test_any_non_error_status_is_success() {
        let result = ActionResult::attack_from_json(r#"[true,0]"#).unwrap();
        assert_eq!(result, ActionResult::Ok(0));

        let result = ActionResult::attack_from_json(r#"["success",5]"#).unwrap();
        assert_eq!(result, ActionResult::Ok(5));
    }

    #[test]
    fn test_attack_requires_kill_count() {
        assert!(ActionResult::attack_from_json(r#"["ok"]"#).is_err());
        assert!(ActionResult::attack_from_json(r#"["ok","two"]"#).is_err());
    }

    #[test]
    fn test_error_requires_message() {
        assert!(ActionResult::walk_from_json(r#"["error"]"#).is_err());
        assert!(ActionResult::walk_from_json(r#"[]"#).is_err());
    }

    #[test]
    fn test_action_result_map() {
        let ok: ActionResult<u32> = ActionResult::Ok(3);
        assert_eq!(ok.map(|n| n * 2), ActionResult::Ok(6));

        let err: ActionResult<u32> = ActionResult::Error("dead".to_string());
        assert_eq!(err.map(|n| n * 2), ActionResult::Error("dead".to_string()));
    }

    #[test]
    fn test_direction_wire_names() {
        let names: Vec<&str> = Direction::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(names, vec!["up", "down", "left", "right"]);
        assert_eq!(Direction::Left.to_string(), "left");
    }

    #[test]
    fn test_position_display_matches_cell_id() {
        assert_eq!(Position::new(2, 7).to_string(), "2,7");
    }
}
