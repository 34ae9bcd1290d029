//! Shared-database topology schemas
//!
//! Barque shares its control database with the cluster it backs up. These are
//! the foreign document shapes other components read for topology decisions:
//! the replica-set status snapshot and the shard list. Barque never produces
//! or validates them; they are carried here so every consumer agrees on one
//! schema.
//!
//! Member health and state arrive as wire integers. They are modeled as
//! exhaustive enumerations so every variant has a display label at compile
//! time, with out-of-range integers collapsing to [`MemberState::Unknown`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health of a replica-set member as reported by the cluster (wire: 0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum MemberHealth {
    Down,
    Up,
}

impl MemberHealth {
    /// Display label for the health value.
    pub fn label(self) -> &'static str {
        match self {
            MemberHealth::Down => "DOWN",
            MemberHealth::Up => "UP",
        }
    }
}

impl From<i32> for MemberHealth {
    fn from(v: i32) -> Self {
        if v == 0 {
            MemberHealth::Down
        } else {
            MemberHealth::Up
        }
    }
}

impl From<MemberHealth> for i32 {
    fn from(h: MemberHealth) -> Self {
        match h {
            MemberHealth::Down => 0,
            MemberHealth::Up => 1,
        }
    }
}

/// Replication state of a replica-set member (wire: 0..=10, 4 unused).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum MemberState {
    Startup,
    Primary,
    Secondary,
    Recovering,
    Startup2,
    Unknown,
    Arbiter,
    Down,
    Rollback,
    Removed,
}

impl MemberState {
    /// Display label for the state, one per variant.
    pub fn label(self) -> &'static str {
        match self {
            MemberState::Startup => "STARTUP",
            MemberState::Primary => "PRIMARY",
            MemberState::Secondary => "SECONDARY",
            MemberState::Recovering => "RECOVERING",
            MemberState::Startup2 => "STARTUP2",
            MemberState::Unknown => "UNKNOWN",
            MemberState::Arbiter => "ARBITER",
            MemberState::Down => "DOWN",
            MemberState::Rollback => "ROLLBACK",
            MemberState::Removed => "REMOVED",
        }
    }

    /// Wire integer for the state.
    pub fn code(self) -> i32 {
        match self {
            MemberState::Startup => 0,
            MemberState::Primary => 1,
            MemberState::Secondary => 2,
            MemberState::Recovering => 3,
            MemberState::Startup2 => 5,
            MemberState::Unknown => 6,
            MemberState::Arbiter => 7,
            MemberState::Down => 8,
            MemberState::Rollback => 9,
            MemberState::Removed => 10,
        }
    }
}

impl From<i32> for MemberState {
    fn from(v: i32) -> Self {
        match v {
            0 => MemberState::Startup,
            1 => MemberState::Primary,
            2 => MemberState::Secondary,
            3 => MemberState::Recovering,
            5 => MemberState::Startup2,
            7 => MemberState::Arbiter,
            8 => MemberState::Down,
            9 => MemberState::Rollback,
            10 => MemberState::Removed,
            // 6 is UNKNOWN on the wire; anything unrecognized folds in with it
            _ => MemberState::Unknown,
        }
    }
}

impl From<MemberState> for i32 {
    fn from(s: MemberState) -> Self {
        s.code()
    }
}

/// A replication optime: cluster timestamp plus election term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Optime {
    #[serde(rename = "ts")]
    pub timestamp: u64,
    #[serde(rename = "t")]
    pub term: i64,
}

/// Optimes section of a replica-set status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatusOptimes {
    #[serde(rename = "lastCommittedOpTime")]
    pub last_committed: Option<Optime>,
    #[serde(rename = "appliedOpTime")]
    pub applied: Option<Optime>,
    #[serde(rename = "durableOpTime")]
    pub durable: Option<Optime>,
}

/// One member entry of a replica-set status snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplsetStatusMember {
    #[serde(rename = "_id")]
    pub id: i32,
    pub name: String,
    pub health: MemberHealth,
    pub state: MemberState,
    #[serde(rename = "stateStr", default)]
    pub state_str: String,
    #[serde(default)]
    pub uptime: i64,
    #[serde(default)]
    pub optime: Option<Optime>,
}

/// Replica-set status snapshot as read from the shared database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplsetStatus {
    pub set: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "myState")]
    pub my_state: MemberState,
    pub members: Vec<ReplsetStatusMember>,
    #[serde(default)]
    pub term: Option<i64>,
    #[serde(default)]
    pub optimes: Option<StatusOptimes>,
    pub ok: i32,
}

/// One shard entry from the cluster's shard registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shard {
    #[serde(rename = "_id")]
    pub id: String,
    pub host: String,
    #[serde(default)]
    pub state: i32,
}

/// Shard-list snapshot as read from the shared database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListShards {
    pub shards: Vec<Shard>,
    pub ok: i32,
}
