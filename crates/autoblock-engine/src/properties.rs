use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::MatchResult;

/// The block attributes written when a rule fires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockProperties {
    /// Block type name, e.g. `quote`, `heading`, `hr`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Arbitrary block data.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_void: Option<bool>,
}

impl BlockProperties {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn void(mut self, is_void: bool) -> Self {
        self.is_void = Some(is_void);
        self
    }
}

type Resolver<C> = Arc<dyn Fn(&C, &MatchResult) -> BlockProperties + Send + Sync>;

/// The accepted shapes of a `properties` option before normalization.
pub enum PropertiesSpec<C = ()> {
    Static(BlockProperties),
    Resolver(Resolver<C>),
}

impl<C> PropertiesSpec<C> {
    /// Wrap a function of the host context and the match.
    pub fn resolver<F>(f: F) -> Self
    where
        F: Fn(&C, &MatchResult) -> BlockProperties + Send + Sync + 'static,
    {
        PropertiesSpec::Resolver(Arc::new(f))
    }
}

impl<C> From<BlockProperties> for PropertiesSpec<C> {
    fn from(properties: BlockProperties) -> Self {
        PropertiesSpec::Static(properties)
    }
}

impl<C> fmt::Debug for PropertiesSpec<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertiesSpec::Static(properties) => f.debug_tuple("Static").field(properties).finish(),
            PropertiesSpec::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

/// Normalized properties: always a function of context and match.
pub struct Properties<C = ()> {
    resolve: Resolver<C>,
}

impl<C: 'static> Properties<C> {
    /// A static record becomes a constant function. The record is owned here,
    /// and every call hands out a fresh clone, so callers can't mutate the
    /// configured value through a result.
    pub fn normalize(spec: PropertiesSpec<C>) -> Self {
        let resolve = match spec {
            PropertiesSpec::Resolver(resolve) => resolve,
            PropertiesSpec::Static(properties) => {
                Arc::new(move |_: &C, _: &MatchResult| properties.clone()) as Resolver<C>
            }
        };
        Self { resolve }
    }
}

impl<C> Properties<C> {
    pub fn resolve(&self, context: &C, matches: &MatchResult) -> BlockProperties {
        (self.resolve)(context, matches)
    }
}

impl<C> Clone for Properties<C> {
    fn clone(&self) -> Self {
        Self {
            resolve: Arc::clone(&self.resolve),
        }
    }
}

impl<C> fmt::Debug for Properties<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Properties(..)")
    }
}
