//! Actions proposed by agents and the fields rules can read from them.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};
use crate::types::ValueType;
use crate::value::{Edge, Value, Vertex};

/// A single agent's proposed move for one simulation step.
///
/// Actions are built by the simulation layer and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Action {
    /// Where the agent stands before the action.
    pub origin: Vertex,
    /// Where the agent stands after the action.
    pub destination: Vertex,
    /// Simulation tick at which the action is requested.
    pub time: i64,
    /// Action name, e.g. `Move(N)` or `NoOp`.
    pub name: String,
    /// Id of the agent performing the action.
    pub agent: i64,
}

impl Action {
    /// Creates a new action.
    #[must_use]
    pub fn new(
        origin: Vertex,
        destination: Vertex,
        time: i64,
        name: impl Into<String>,
        agent: i64,
    ) -> Self {
        Self {
            origin,
            destination,
            time,
            name: name.into(),
            agent,
        }
    }

    /// Creates a `NoOp` action at time 0 for agent 0 moving from `origin` to `destination`.
    #[must_use]
    pub fn between(origin: impl Into<Vertex>, destination: impl Into<Vertex>) -> Self {
        Self::new(origin.into(), destination.into(), 0, "NoOp", 0)
    }

    /// Sets the time.
    #[must_use]
    pub fn with_time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the agent id.
    #[must_use]
    pub fn with_agent(mut self, agent: i64) -> Self {
        self.agent = agent;
        self
    }

    /// Returns the `(origin, destination)` edge.
    #[must_use]
    pub const fn edge(&self) -> Edge {
        Edge::new(self.origin, self.destination)
    }

    /// Returns true if the action changes the agent's position.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.origin != self.destination
    }

    /// Reads one field of this action as a value.
    #[must_use]
    pub fn field(&self, field: Field) -> Value {
        match field {
            Field::Origin => Value::Vertex(self.origin),
            Field::Destination => Value::Vertex(self.destination),
            Field::Edge => Value::Edge(self.edge()),
            Field::Time => Value::Number(self.time),
            Field::Name => Value::String(self.name.clone()),
            Field::Agent => Value::Number(self.agent),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} by agent {} at t={}",
            self.name,
            self.edge(),
            self.agent,
            self.time
        )
    }
}

/// Parses the bracketed literal form used by interactive tools:
/// `[name=Move(E) orig=1,1 dest=1,2 time=0 agent=0]`.
///
/// Every key is optional. `name` defaults to `NoOp`, `orig` to `(0,0)`,
/// `dest` to the origin, `time` and `agent` to 0. Keys accept the same long
/// spellings as rule fields.
impl FromStr for Action {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| {
            Error::new(ErrorKind::InvalidAction {
                text: text.to_string(),
                reason,
            })
        };

        let body = text
            .trim()
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
            .ok_or_else(|| invalid("expected [key=value ...]".to_string()))?;

        let mut name = None;
        let mut origin = None;
        let mut destination = None;
        let mut time = None;
        let mut agent = None;

        for pair in body.split_whitespace() {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| invalid(format!("expected key=value, found {pair:?}")))?;
            match Field::parse(key) {
                Some(Field::Name) => name = Some(value.to_string()),
                Some(Field::Origin) => origin = Some(parse_vertex(value).map_err(invalid)?),
                Some(Field::Destination) => {
                    destination = Some(parse_vertex(value).map_err(invalid)?);
                }
                Some(Field::Time) => time = Some(parse_number(key, value).map_err(invalid)?),
                Some(Field::Agent) => agent = Some(parse_number(key, value).map_err(invalid)?),
                Some(Field::Edge) | None => return Err(invalid(format!("unknown key {key:?}"))),
            }
        }

        let origin = origin.unwrap_or_default();
        Ok(Self::new(
            origin,
            destination.unwrap_or(origin),
            time.unwrap_or(0),
            name.unwrap_or_else(|| "NoOp".to_string()),
            agent.unwrap_or(0),
        ))
    }
}

fn parse_vertex(text: &str) -> Result<Vertex, String> {
    let (row, col) = text
        .split_once(',')
        .ok_or_else(|| format!("expected row,col, found {text:?}"))?;
    let row = row
        .parse()
        .map_err(|_| format!("invalid row {row:?}"))?;
    let col = col
        .parse()
        .map_err(|_| format!("invalid column {col:?}"))?;
    Ok(Vertex::new(row, col))
}

fn parse_number(key: &str, text: &str) -> Result<i64, String> {
    text.parse()
        .map_err(|_| format!("invalid {key} {text:?}"))
}

/// A readable field of an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    /// `orig` / `origin`
    Origin,
    /// `dest` / `destination`
    Destination,
    /// `edge`
    Edge,
    /// `time`
    Time,
    /// `name`
    Name,
    /// `agent`
    Agent,
}

impl Field {
    /// All fields, in declaration order.
    pub const ALL: [Field; 6] = [
        Self::Origin,
        Self::Destination,
        Self::Edge,
        Self::Time,
        Self::Name,
        Self::Agent,
    ];

    /// Parses a field name, accepting the long and short spellings.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "orig" | "origin" => Some(Self::Origin),
            "dest" | "destination" => Some(Self::Destination),
            "edge" => Some(Self::Edge),
            "time" => Some(Self::Time),
            "name" => Some(Self::Name),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }

    /// Returns the canonical (short) spelling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Origin => "orig",
            Self::Destination => "dest",
            Self::Edge => "edge",
            Self::Time => "time",
            Self::Name => "name",
            Self::Agent => "agent",
        }
    }

    /// Returns the kind of value this field produces.
    #[must_use]
    pub const fn value_type(self) -> ValueType {
        match self {
            Self::Origin | Self::Destination => ValueType::Vertex,
            Self::Edge => ValueType::Edge,
            Self::Time | Self::Agent => ValueType::Number,
            Self::Name => ValueType::String,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
