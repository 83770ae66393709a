use regex::Regex;
use std::fmt;

/// Highest value any version component can hold.
pub const COMPONENT_MAX: u32 = 99;

/// Three-component version counter, each component in `0..=99`.
///
/// Rendered as `MM.mm.pp` with every component zero-padded to two digits.
/// Fields are private so every value goes through [Version::new] or
/// [Version::parse] and stays within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
}

impl Version {
    /// Create a new version, clamping each component to 99
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major: major.min(COMPONENT_MAX),
            minor: minor.min(COMPONENT_MAX),
            patch: patch.min(COMPONENT_MAX),
        }
    }

    /// Parse a version such as "01.02.03" (one or two digits per component).
    ///
    /// Surrounding whitespace is ignored. The error carries a human readable
    /// reason; callers wrap it into the error variant that fits their context.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let re = Regex::new(r"^([0-9]{1,2})\.([0-9]{1,2})\.([0-9]{1,2})$")
            .map_err(|e| e.to_string())?;
        let trimmed = text.trim();

        let captures = re
            .captures(trimmed)
            .ok_or_else(|| format!("'{}' is not in MM.mm.pp format", trimmed))?;

        let component = |i: usize| -> std::result::Result<u32, String> {
            captures[i]
                .parse::<u32>()
                .map_err(|e| format!("invalid component '{}': {}", &captures[i], e))
        };

        Ok(Version {
            major: component(1)?,
            minor: component(2)?,
            patch: component(3)?,
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    /// The value of one component
    pub fn get(&self, component: Component) -> u32 {
        match component {
            Component::Major => self.major,
            Component::Minor => self.minor,
            Component::Patch => self.patch,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.major, self.minor, self.patch)
    }
}

/// One of the three version components, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Component {
    Major,
    Minor,
    Patch,
}

/// Which flags the operator passed, plus an optional explicit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IncrementRequest {
    pub major: bool,
    pub minor: bool,
    pub patch: bool,
    pub explicit: Option<Version>,
}

impl IncrementRequest {
    /// Build a request from CLI flags. With no flag and no explicit value the
    /// request falls back to a patch increment.
    pub fn from_flags(major: bool, minor: bool, patch: bool, explicit: Option<Version>) -> Self {
        let none_given = !major && !minor && !patch;
        IncrementRequest {
            major,
            minor,
            patch: patch || (none_given && explicit.is_none()),
            explicit,
        }
    }

    /// A direct assignment, bypassing every increment flag
    pub fn set(version: Version) -> Self {
        IncrementRequest {
            explicit: Some(version),
            ..Default::default()
        }
    }
}

/// Compute the next version.
///
/// An explicit value wins outright and reports no incremented component.
/// Otherwise every requested component is incremented in the order
/// major, minor, patch. A major bump resets minor and patch, a minor bump
/// resets patch. Components saturate at 99. The reported component is the
/// highest-priority one that was requested.
pub fn next(current: Version, request: &IncrementRequest) -> (Version, Option<Component>) {
    if let Some(explicit) = request.explicit {
        return (explicit, None);
    }

    let mut version = current;
    let mut starred = None;

    if request.major {
        version.major = bump(version.major);
        version.minor = 0;
        version.patch = 0;
        starred.get_or_insert(Component::Major);
    }

    if request.minor {
        version.minor = bump(version.minor);
        version.patch = 0;
        starred.get_or_insert(Component::Minor);
    }

    if request.patch {
        version.patch = bump(version.patch);
        starred.get_or_insert(Component::Patch);
    }

    (version, starred)
}

fn bump(value: u32) -> u32 {
    value.saturating_add(1).min(COMPONENT_MAX)
}
