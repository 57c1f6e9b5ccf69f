use std::{fmt, sync::Arc};

/// Identifier of a synchronization group.
///
/// Cloning is a reference-count bump, so names can be handed to every member
/// each tick without allocating. `GroupName::none()` means "do not synchronize".
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupName(Option<Arc<str>>);

impl GroupName {
    pub fn new(name: &str) -> Self {
        Self(Some(Arc::from(name)))
    }

    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn as_str(&self) -> &str {
        match &self.0 {
            Some(name) => name,
            None => "None",
        }
    }
}

impl From<&str> for GroupName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for GroupName {
    fn from(name: String) -> Self {
        Self(Some(Arc::from(name)))
    }
}

impl fmt::Debug for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupName({})", self.as_str())
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of a sync marker ("LeftFootDown", "RightFootDown", ...).
///
/// Markers are matched across timelines by name only, never by index.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct MarkerName(Arc<str>);

impl MarkerName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkerName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for MarkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for MarkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
