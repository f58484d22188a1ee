//! Component declaration surface
//!
//! The statically declared public surface of a component as supplied by the
//! host toolchain. Deserialized from JSON:
//!
//! ```json
//! {
//!   "name": "CounterComponent",
//!   "members": [
//!     { "name": "count", "kind": "field", "initial": 0 },
//!     { "name": "onAdd", "kind": "method", "returns": "void" }
//!   ],
//!   "providers": [
//!     { "token": "Logger", "strategy": "factory",
//!       "useFactory": { "kind": "named", "name": "createLogger" } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::MetadataError;
use crate::parse_util::ParseLocation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDecl {
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    #[serde(default)]
    pub providers: Vec<ProviderDecl>,
}

impl ComponentDecl {
    pub fn new(name: &str) -> Self {
        ComponentDecl {
            name: name.to_string(),
            members: Vec::new(),
            providers: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_provider(mut self, provider: ProviderDecl) -> Self {
        self.providers.push(provider);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// What a method hands back to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    #[default]
    Value,
    Void,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDecl {
    pub name: String,
    pub kind: MemberKind,
    #[serde(default)]
    pub visibility: Visibility,
    /// Parameter names, in declaration order. Methods only.
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub returns: ReturnKind,
    /// Initializer of a field, when it is a JSON-representable constant.
    #[serde(default)]
    pub initial: Option<serde_json::Value>,
}

impl MemberDecl {
    pub fn field(name: &str) -> Self {
        MemberDecl {
            name: name.to_string(),
            kind: MemberKind::Field,
            visibility: Visibility::Public,
            parameters: Vec::new(),
            returns: ReturnKind::Value,
            initial: None,
        }
    }

    pub fn method(name: &str, parameters: &[&str]) -> Self {
        MemberDecl {
            name: name.to_string(),
            kind: MemberKind::Method,
            visibility: Visibility::Public,
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            returns: ReturnKind::Value,
            initial: None,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn returning_void(mut self) -> Self {
        self.returns = ReturnKind::Void;
        self
    }

    pub fn with_initial(mut self, value: serde_json::Value) -> Self {
        self.initial = Some(value);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStrategy {
    Class,
    Factory,
}

/// How a `useFactory` provider refers to its factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FactoryDecl {
    /// A named function. `topLevel: false` marks a function declared inside
    /// another scope.
    Named {
        name: String,
        #[serde(default = "default_top_level", rename = "topLevel")]
        top_level: bool,
    },
    /// An inline closure such as `() => new Logger(config)`.
    Inline { source: String },
}

fn default_top_level() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDecl {
    pub token: String,
    pub strategy: ProviderStrategy,
    #[serde(default)]
    pub use_class: Option<String>,
    #[serde(default)]
    pub use_factory: Option<FactoryDecl>,
    /// Where the provider is declared in the component source.
    #[serde(default)]
    pub position: ParseLocation,
}

impl ProviderDecl {
    pub fn class(token: &str, class_name: &str) -> Self {
        ProviderDecl {
            token: token.to_string(),
            strategy: ProviderStrategy::Class,
            use_class: Some(class_name.to_string()),
            use_factory: None,
            position: ParseLocation::default(),
        }
    }

    pub fn named_factory(token: &str, function: &str) -> Self {
        ProviderDecl {
            token: token.to_string(),
            strategy: ProviderStrategy::Factory,
            use_class: None,
            use_factory: Some(FactoryDecl::Named {
                name: function.to_string(),
                top_level: true,
            }),
            position: ParseLocation::default(),
        }
    }

    pub fn inline_factory(token: &str, source: &str) -> Self {
        ProviderDecl {
            token: token.to_string(),
            strategy: ProviderStrategy::Factory,
            use_class: None,
            use_factory: Some(FactoryDecl::Inline {
                source: source.to_string(),
            }),
            position: ParseLocation::default(),
        }
    }

    pub fn at(mut self, position: ParseLocation) -> Self {
        self.position = position;
        self
    }
}
