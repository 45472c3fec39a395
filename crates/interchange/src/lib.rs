//! Plan Interchange Format
//!
//! KDL-based format for saved house plans. Pure data: one node per room,
//! in paint order, plus the plot configuration the session started with.
//!
//! # Document Format
//!
//! ```kdl
//! plan version="0.1" saved-at="2026-01-01T09:30:00+00:00" {
//!   config length=40 width=30 floors=1 style="modern"
//!   room "5f0c...-uuid" x=100 y=100 width=160 height=220 type="bedroom" name="Master"
//!   room "9a41...-uuid" x=300 y=100 width=120 height=80 type="bathroom"
//! }
//! ```

mod store;

pub use store::{FilePlanStore, MemoryPlanStore, PlanStore, SaveReceipt};

use chrono::{DateTime, Utc};
use kdl::{KdlDocument, KdlEntry, KdlNode};
use plan::{CanvasPoint, CanvasRect, CanvasSize, PlanConfig, PlanStyle, Room, RoomId, RoomList, RoomType};
use std::str::FromStr;
use thiserror::Error;

pub const FORMAT_VERSION: &str = "0.1";

/// Error type for interchange operations.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid structure: {0}")]
    InvalidStructure(String),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error("no plan has been saved yet")]
    NothingSaved,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A saved plan: the room list plus the session's plot configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDocument {
    pub version: String,
    pub saved_at: Option<DateTime<Utc>>,
    pub config: Option<PlanConfig>,
    pub rooms: RoomList,
}

impl PlanDocument {
    pub fn new(config: Option<PlanConfig>, rooms: RoomList) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            saved_at: None,
            config,
            rooms,
        }
    }

    /// Stamp the document with the current time.
    pub fn stamped(mut self) -> Self {
        self.saved_at = Some(Utc::now());
        self
    }

    /// Serialize the document to a KDL string.
    pub fn to_kdl(&self) -> String {
        let mut doc = KdlDocument::new();

        let mut plan_node = KdlNode::new("plan");
        plan_node.push(KdlEntry::new_prop("version", self.version.clone()));
        if let Some(saved_at) = self.saved_at {
            plan_node.push(KdlEntry::new_prop("saved-at", saved_at.to_rfc3339()));
        }

        let children = plan_node.children_mut().get_or_insert_with(KdlDocument::new);

        if let Some(config) = &self.config {
            children.nodes_mut().push(config_to_kdl(config));
        }

        for room in &self.rooms {
            children.nodes_mut().push(room_to_kdl(room));
        }

        doc.nodes_mut().push(plan_node);
        doc.to_string()
    }

    /// Parse a document from a KDL string.
    pub fn from_kdl(input: &str) -> Result<Self, InterchangeError> {
        let doc: KdlDocument = input
            .parse()
            .map_err(|e| InterchangeError::Parse(format!("{}", e)))?;

        let plan_node = doc
            .get("plan")
            .ok_or_else(|| InterchangeError::InvalidStructure("missing 'plan' node".into()))?;

        let version = plan_node
            .get("version")
            .and_then(|v| v.as_string())
            .map(|s| s.to_string())
            .unwrap_or_else(|| FORMAT_VERSION.to_string());

        let saved_at = match plan_node.get("saved-at").and_then(|v| v.as_string()) {
            Some(s) => Some(
                DateTime::parse_from_rfc3339(s)
                    .map_err(|e| InterchangeError::InvalidValue(format!("saved-at: {}", e)))?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        let mut config = None;
        let mut rooms = RoomList::new();

        if let Some(children) = plan_node.children() {
            for node in children.nodes() {
                match node.name().value() {
                    "config" => config = Some(parse_config(node)?),
                    "room" => {
                        let room = parse_room(node)?;
                        let id = room.id;
                        if !rooms.push(room) {
                            return Err(InterchangeError::InvalidStructure(format!(
                                "duplicate room id {}",
                                id.to_uuid_string()
                            )));
                        }
                    }
                    other => {
                        log::warn!("ignoring unknown plan node '{}'", other);
                    }
                }
            }
        }

        Ok(Self {
            version,
            saved_at,
            config,
            rooms,
        })
    }
}

fn config_to_kdl(config: &PlanConfig) -> KdlNode {
    let mut node = KdlNode::new("config");
    node.push(KdlEntry::new_prop("length", i128::from(config.length_ft)));
    node.push(KdlEntry::new_prop("width", i128::from(config.width_ft)));
    node.push(KdlEntry::new_prop("floors", i128::from(config.floors)));
    node.push(KdlEntry::new_prop("style", config.style.key().to_string()));
    node
}

fn room_to_kdl(room: &Room) -> KdlNode {
    let mut node = KdlNode::new("room");

    // Full UUID keeps ids stable across save/load
    node.push(KdlEntry::new(room.id.to_uuid_string()));

    node.push(KdlEntry::new_prop("x", i128::from(room.x())));
    node.push(KdlEntry::new_prop("y", i128::from(room.y())));
    node.push(KdlEntry::new_prop("width", i128::from(room.width())));
    node.push(KdlEntry::new_prop("height", i128::from(room.height())));
    node.push(KdlEntry::new_prop("type", room.room_type.key().to_string()));

    if !room.name.is_empty() {
        node.push(KdlEntry::new_prop("name", room.name.clone()));
    }

    node
}

fn parse_config(node: &KdlNode) -> Result<PlanConfig, InterchangeError> {
    let defaults = PlanConfig::default();
    let style = match node.get("style").and_then(|v| v.as_string()) {
        Some(s) => PlanStyle::from_str(s)
            .map_err(|_| InterchangeError::InvalidValue(format!("unknown plan style '{}'", s)))?,
        None => defaults.style,
    };

    Ok(PlanConfig {
        length_ft: get_int_prop(node, "length")?.unwrap_or(defaults.length_ft),
        width_ft: get_int_prop(node, "width")?.unwrap_or(defaults.width_ft),
        floors: get_int_prop(node, "floors")?.unwrap_or(defaults.floors),
        style,
    })
}

fn parse_room(node: &KdlNode) -> Result<Room, InterchangeError> {
    let id = match node
        .entries()
        .iter()
        .find(|e| e.name().is_none())
        .and_then(|e| e.value().as_string())
    {
        Some(s) => RoomId::parse(s)
            .ok_or_else(|| InterchangeError::InvalidValue(format!("room id '{}'", s)))?,
        None => RoomId::new(),
    };

    let x: i32 = require_int_prop(node, "x")?;
    let y: i32 = require_int_prop(node, "y")?;
    let width: u32 = require_int_prop(node, "width")?;
    let height: u32 = require_int_prop(node, "height")?;

    let type_key = node
        .get("type")
        .and_then(|v| v.as_string())
        .ok_or_else(|| InterchangeError::MissingField("room type".into()))?;
    let room_type = RoomType::from_str(type_key)
        .map_err(|_| InterchangeError::InvalidValue(format!("unknown room type '{}'", type_key)))?;

    let name = node
        .get("name")
        .and_then(|v| v.as_string())
        .unwrap_or_default()
        .to_string();

    let bounds = CanvasRect::new(CanvasPoint::new(x, y), CanvasSize::new(width, height));
    Ok(Room::new(bounds, room_type, name).with_id(id))
}

fn get_int_prop<T: TryFrom<i128>>(node: &KdlNode, name: &str) -> Result<Option<T>, InterchangeError> {
    match node.get(name) {
        None => Ok(None),
        Some(value) => {
            let raw = value
                .as_integer()
                .ok_or_else(|| InterchangeError::InvalidValue(format!("{} must be an integer", name)))?;
            T::try_from(raw)
                .map(Some)
                .map_err(|_| InterchangeError::InvalidValue(format!("{} out of range: {}", name, raw)))
        }
    }
}

fn require_int_prop<T: TryFrom<i128>>(node: &KdlNode, name: &str) -> Result<T, InterchangeError> {
    get_int_prop(node, name)?.ok_or_else(|| InterchangeError::MissingField(format!("room {}", name)))
}
