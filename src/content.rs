//! Static board content: feature hexes, ambient agents, enemies and phrases.
//!
//! These tables are read-only input data. The game copies entity placements
//! out of them at startup and keeps `&'static` references to features.

use hexx::Hex;

/// Category of a feature hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// A playable title in the catalog.
    Game,
    /// World-building text.
    Lore,
    /// An AI agent profile.
    Agent,
    /// Token information.
    Token,
    /// Community channels.
    Community,
}

impl FeatureKind {
    /// Short uppercase tag shown on cards.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Game => "GAME",
            Self::Lore => "LORE",
            Self::Agent => "AGENT",
            Self::Token => "TOKEN",
            Self::Community => "COMMUNITY",
        }
    }
}

/// A descriptive hex on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    /// Axial q.
    pub q: i32,
    /// Axial r.
    pub r: i32,
    /// Category.
    pub kind: FeatureKind,
    /// Card title.
    pub label: &'static str,
    /// Card body.
    pub description: &'static str,
    /// Optional outbound link.
    pub link: Option<&'static str>,
}

impl Feature {
    /// Board coordinate of this feature.
    pub fn hex(&self) -> Hex {
        Hex::new(self.q, self.r)
    }
}

/// Initial placement of an ambient agent.
#[derive(Debug, Clone, Copy)]
pub struct AgentSpawn {
    /// Stable identifier.
    pub id: &'static str,
    /// Axial q.
    pub q: i32,
    /// Axial r.
    pub r: i32,
    /// Glyph drawn inside the agent marker.
    pub glyph: char,
}

/// Initial placement of an enemy.
#[derive(Debug, Clone, Copy)]
pub struct EnemySpawn {
    /// Stable identifier.
    pub id: &'static str,
    /// Axial q.
    pub q: i32,
    /// Axial r.
    pub r: i32,
}

/// Feature hexes, one per coordinate.
pub const FEATURES: &[Feature] = &[
    Feature {
        q: 2,
        r: -1,
        kind: FeatureKind::Game,
        label: "Shardfall Arena",
        description: "Fast tactical duels on a collapsing hex board. Last tile standing wins.",
        link: Some("https://example.com/games/shardfall"),
    },
    Feature {
        q: -3,
        r: 1,
        kind: FeatureKind::Game,
        label: "Drift Couriers",
        description: "Run parcels between floating outposts before the storm front closes.",
        link: Some("https://example.com/games/drift-couriers"),
    },
    Feature {
        q: 5,
        r: -6,
        kind: FeatureKind::Game,
        label: "Lantern Keep",
        description: "Co-op tower defence where the lights you place are also your map.",
        link: Some("https://example.com/games/lantern-keep"),
    },
    Feature {
        q: -1,
        r: -3,
        kind: FeatureKind::Lore,
        label: "The Quiet Grid",
        description: "Before the signal, the lattice hummed with nothing. Then something answered.",
        link: None,
    },
    Feature {
        q: 7,
        r: 2,
        kind: FeatureKind::Lore,
        label: "Cartographers' Oath",
        description: "Every hex walked is a hex remembered. Every hex remembered can be found again.",
        link: None,
    },
    Feature {
        q: 0,
        r: 4,
        kind: FeatureKind::Agent,
        label: "Meet the Wanderers",
        description: "Autonomous agents roam the grid, trading rumours with anyone who comes close.",
        link: None,
    },
    Feature {
        q: -6,
        r: 6,
        kind: FeatureKind::Token,
        label: "Grid Token",
        description: "The utility token that powers in-game economies across the catalog.",
        link: Some("https://example.com/token"),
    },
    Feature {
        q: 4,
        r: 3,
        kind: FeatureKind::Community,
        label: "Signal Fire",
        description: "Join the community channels for playtests, events and patch notes.",
        link: Some("https://example.com/community"),
    },
    Feature {
        q: -8,
        r: 0,
        kind: FeatureKind::Community,
        label: "Builders' Hall",
        description: "Open tooling and grants for creators building on the grid.",
        link: Some("https://example.com/builders"),
    },
];

/// Ambient agents in list order (proximity is first-match in this order).
pub const AGENT_SPAWNS: &[AgentSpawn] = &[
    AgentSpawn { id: "vesper", q: 3, r: 1, glyph: 'V' },
    AgentSpawn { id: "orrin", q: -4, r: 3, glyph: 'O' },
    AgentSpawn { id: "kite", q: 1, r: -5, glyph: 'K' },
    AgentSpawn { id: "mabel", q: -2, r: -2, glyph: 'M' },
];

/// Enemies and the hexes they return to after a catch.
pub const ENEMY_SPAWNS: &[EnemySpawn] = &[
    EnemySpawn { id: "hunter-1", q: 8, r: -4 },
    EnemySpawn { id: "hunter-2", q: -7, r: 7 },
    EnemySpawn { id: "hunter-3", q: 2, r: 8 },
];

/// Speech lines an agent picks from when the player comes close.
pub const AGENT_PHRASES: &[&str] = &[
    "Heard there's a game hidden east of here.",
    "The edges get foggy. Don't wander too far.",
    "Red ones bite. Keep moving.",
    "I've walked this ring a thousand times.",
    "Every glowing hex has a story.",
    "Looking for the token vault? Try south-west.",
    "Nice trail you're leaving.",
    "The hunters only wake once you start moving.",
];

/// Decorative glyphs scattered over empty hexes.
pub const FILL_GLYPHS: &[char] = &['.', ':', '+', '*', '\'', '~'];
