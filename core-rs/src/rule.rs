//! Access rules
//!
//! An [`AccessRule`] is one grant: "this agent selector may use these modes
//! on this target, optionally inheritably". Rules are pure data; each dialect
//! compiler decides which combinations it can express.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const READ: &str = "read";
pub const WRITE: &str = "write";
pub const APPEND: &str = "append";
pub const CONTROL: &str = "control";
pub const CONTROL_READ: &str = "controlRead";
pub const CONTROL_WRITE: &str = "controlWrite";

/// Who a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentKind {
    AuthenticatedUser,
    Public,
    Group,
    Agent,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::AuthenticatedUser => write!(f, "AUTHENTICATED_USER"),
            AgentKind::Public => write!(f, "PUBLIC"),
            AgentKind::Group => write!(f, "GROUP"),
            AgentKind::Agent => write!(f, "AGENT"),
        }
    }
}

/// A requested access mode
///
/// Well-known tokens map to variants; anything else is kept verbatim as a
/// custom mode identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccessMode {
    Read,
    Write,
    Append,
    Control,
    ControlRead,
    ControlWrite,
    Custom(String),
}

impl AccessMode {
    pub fn from_token(token: &str) -> Self {
        match token {
            READ => AccessMode::Read,
            WRITE => AccessMode::Write,
            APPEND => AccessMode::Append,
            CONTROL => AccessMode::Control,
            CONTROL_READ => AccessMode::ControlRead,
            CONTROL_WRITE => AccessMode::ControlWrite,
            other => AccessMode::Custom(other.to_string()),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            AccessMode::Read => READ,
            AccessMode::Write => WRITE,
            AccessMode::Append => APPEND,
            AccessMode::Control => CONTROL,
            AccessMode::ControlRead => CONTROL_READ,
            AccessMode::ControlWrite => CONTROL_WRITE,
            AccessMode::Custom(iri) => iri,
        }
    }

    /// `control`, `controlRead` or `controlWrite`
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            AccessMode::Control | AccessMode::ControlRead | AccessMode::ControlWrite
        )
    }
}

impl From<String> for AccessMode {
    fn from(token: String) -> Self {
        AccessMode::from_token(&token)
    }
}

impl From<&str> for AccessMode {
    fn from(token: &str) -> Self {
        AccessMode::from_token(token)
    }
}

impl From<AccessMode> for String {
    fn from(mode: AccessMode) -> Self {
        mode.as_token().to_string()
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// One immutable access grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessRule {
    target: String,
    #[serde(default)]
    inheritable: bool,
    agent_kind: AgentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    agent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    members: Vec<String>,
    access: Vec<AccessMode>,
}

impl AccessRule {
    /// Create a rule
    ///
    /// `agent` is kept only for [`AgentKind::Agent`] and `members` only for
    /// [`AgentKind::Group`]; repeated modes collapse to their first occurrence.
    pub fn new<M>(
        target: impl Into<String>,
        inheritable: bool,
        agent_kind: AgentKind,
        agent: Option<String>,
        access: M,
        members: Vec<String>,
    ) -> Self
    where
        M: IntoIterator,
        M::Item: Into<AccessMode>,
    {
        let mut modes: Vec<AccessMode> = Vec::new();
        for mode in access.into_iter().map(Into::into) {
            if !modes.contains(&mode) {
                modes.push(mode);
            }
        }

        Self {
            target: target.into(),
            inheritable,
            agent_kind,
            agent: if agent_kind == AgentKind::Agent { agent } else { None },
            members: if agent_kind == AgentKind::Group { members } else { Vec::new() },
            access: modes,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_inheritable(&self) -> bool {
        self.inheritable
    }

    pub fn agent_kind(&self) -> AgentKind {
        self.agent_kind
    }

    pub fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn access(&self) -> &[AccessMode] {
        &self.access
    }

    pub fn has_mode(&self, mode: &AccessMode) -> bool {
        self.access.contains(mode)
    }

    /// Requested modes outside the control family, in request order
    pub fn content_modes(&self) -> impl Iterator<Item = &AccessMode> {
        self.access.iter().filter(|mode| !mode.is_control())
    }

    /// Rebuild the rule with deduplicated modes and the agent/members
    /// invariant enforced. Rules read from files go through this.
    pub(crate) fn normalized(self) -> Self {
        AccessRule::new(
            self.target,
            self.inheritable,
            self.agent_kind,
            self.agent,
            self.access,
            self.members,
        )
    }
}
