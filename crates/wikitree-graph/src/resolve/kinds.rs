//! Entity kinds and the type-URI mapping used to recognize references.

use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

/// schema.org type of a WikiTree profile.
pub const PERSON_TYPE: &str = "http://schema.org/Person";

/// Attributes a person profile may carry, known before it is loaded.
pub const PERSON_ATTRIBUTES: &[&str] = &[
    "additionalName",
    "birth",
    "birthDate",
    "children",
    "death",
    "deathDate",
    "familyName",
    "gender",
    "givenName",
    "image",
    "marriage",
    "name",
    "parent",
    "sibling",
    "spouse",
    "startDate",
    "url",
];

/// Static description of one kind of entity node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKind {
    /// Display name, e.g. `Person`.
    pub name: String,
    /// Declared microdata type that maps to this kind.
    pub type_uri: String,
    /// Attribute names answered by an unloaded node.
    pub declared_attributes: Vec<String>,
    /// Substring marking a site-relative profile path, e.g. `/wiki`.
    pub path_marker: String,
    /// Path prefix bare identifiers are appended to, e.g. `/wiki/`.
    pub profile_path: String,
}

impl EntityKind {
    pub fn new(name: impl Into<String>, type_uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_uri: type_uri.into(),
            declared_attributes: Vec::new(),
            path_marker: "/wiki".to_string(),
            profile_path: "/wiki/".to_string(),
        }
    }

    pub fn person() -> Self {
        Self::new("Person", PERSON_TYPE).with_attributes(PERSON_ATTRIBUTES)
    }

    /// Set the attribute names an unloaded node reports.
    pub fn with_attributes(mut self, names: &[&str]) -> Self {
        self.declared_attributes = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Set the path marker and the profile path prefix.
    pub fn with_paths(mut self, path_marker: &str, profile_path: &str) -> Self {
        self.path_marker = path_marker.to_string();
        self.profile_path = profile_path.to_string();
        self
    }

    /// Canonical absolute URL for an identifier, path, or URL.
    ///
    /// Tried in order: absolute http(s) URL as-is, site-relative path
    /// containing the path marker, bare identifier under the profile path.
    /// Never fails; a string that still does not parse is returned verbatim
    /// and rejected when the node loads.
    pub fn canonical_url(&self, origin: &Url, reference: &str) -> String {
        let reference = reference.trim();
        if let Ok(url) = Url::parse(reference) {
            if matches!(url.scheme(), "http" | "https") {
                return url.into();
            }
        }

        let origin = origin.as_str().trim_end_matches('/');
        let joined = if reference.contains(self.path_marker.as_str()) {
            if reference.starts_with('/') {
                format!("{origin}{reference}")
            } else {
                format!("{origin}/{reference}")
            }
        } else {
            format!("{origin}{}{reference}", self.profile_path)
        };

        match Url::parse(&joined) {
            Ok(url) => url.into(),
            Err(_) => joined,
        }
    }

    /// Short label for an identity URL: the identifier under the profile
    /// path, or the URL's path component otherwise.
    pub fn short_label<'a>(&self, url: &'a str) -> &'a str {
        let path = match url.find("://") {
            Some(scheme_end) => {
                let rest = &url[scheme_end + 3..];
                rest.find('/').map(|i| &rest[i..]).unwrap_or("/")
            }
            None => url,
        };
        path.strip_prefix(self.profile_path.as_str()).unwrap_or(path)
    }
}

/// Immutable mapping from declared type URI to entity kind.
#[derive(Debug, Clone)]
pub struct TypeMapping {
    kinds: HashMap<String, Arc<EntityKind>>,
}

impl TypeMapping {
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Add a kind, replacing any kind registered for the same type URI.
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kinds.insert(kind.type_uri.clone(), Arc::new(kind));
        self
    }

    pub fn resolve(&self, type_uri: &str) -> Option<&Arc<EntityKind>> {
        self.kinds.get(type_uri)
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for TypeMapping {
    fn default() -> Self {
        Self::empty().with_kind(EntityKind::person())
    }
}
