//! Vocabulary terms used by the access control dialects
//!
//! Each submodule exposes its `PREFIX`, `NAMESPACE` and the terms the
//! compilers emit, as `NamedNodeRef` constants usable without allocation.

pub use oxigraph::model::vocab::rdf;

/// Web Access Control (`http://www.w3.org/ns/auth/acl#`)
pub mod acl {
    use oxigraph::model::NamedNodeRef;

    pub const PREFIX: &str = "acl";
    pub const NAMESPACE: &str = "http://www.w3.org/ns/auth/acl#";

    pub const AUTHORIZATION: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Authorization");
    pub const AUTHENTICATED_AGENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#AuthenticatedAgent");

    pub const ACCESS_TO: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#accessTo");
    pub const DEFAULT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#default");
    pub const AGENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#agent");
    pub const AGENT_CLASS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#agentClass");
    pub const AGENT_GROUP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#agentGroup");
    pub const MODE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#mode");

    pub const READ: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Read");
    pub const WRITE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Write");
    pub const APPEND: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Append");
    pub const CONTROL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/auth/acl#Control");
}

/// Access Control Policy (`http://www.w3.org/ns/solid/acp#`)
///
/// Holds the terms of both the current and the legacy drafts; they share a
/// namespace and differ only in which terms they use.
pub mod acp {
    use oxigraph::model::NamedNodeRef;

    pub const PREFIX: &str = "acp";
    pub const NAMESPACE: &str = "http://www.w3.org/ns/solid/acp#";

    // Classes
    pub const ACCESS_CONTROL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#AccessControl");
    pub const ACCESS_CONTROL_RESOURCE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#AccessControlResource");
    pub const POLICY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#Policy");
    pub const MATCHER: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#Matcher");
    pub const RULE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#Rule");
    pub const PUBLIC_AGENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#PublicAgent");
    pub const AUTHENTICATED_AGENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#AuthenticatedAgent");

    // Current draft linking predicates
    pub const ACCESS_CONTROL_PROP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#accessControl");
    pub const MEMBER_ACCESS_CONTROL: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#memberAccessControl");

    // Legacy draft linking predicates
    pub const APPLY_MEMBERS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#applyMembers");
    pub const ACCESS_MEMBERS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#accessMembers");

    // Shared predicates
    pub const APPLY: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#apply");
    pub const ACCESS: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#access");
    pub const ALL_OF: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#allOf");
    pub const ALLOW: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#allow");
    pub const AGENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#agent");
    pub const GROUP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#group");

    // Legacy draft modes
    pub const READ: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#Read");
    pub const WRITE: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#Write");
    pub const APPEND: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/solid/acp#Append");
}

pub mod foaf {
    use oxigraph::model::NamedNodeRef;

    pub const PREFIX: &str = "foaf";
    pub const NAMESPACE: &str = "http://xmlns.com/foaf/0.1/";

    pub const AGENT: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://xmlns.com/foaf/0.1/Agent");
}

pub mod vcard {
    use oxigraph::model::NamedNodeRef;

    pub const PREFIX: &str = "vcard";
    pub const NAMESPACE: &str = "http://www.w3.org/2006/vcard/ns#";

    pub const GROUP: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/vcard/ns#Group");
    pub const HAS_MEMBER: NamedNodeRef<'static> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2006/vcard/ns#hasMember");
}
