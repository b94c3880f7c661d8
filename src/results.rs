use crate::ordered::OrderedMap;
use serde::{Deserialize, Serialize};

/// Event label mapped to its details, in page order
pub type Events = OrderedMap<Vec<String>>;

/// Immutable snapshot of one crawled profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    name: String,
    url: String,
    #[serde(with = "base64_bytes")]
    portrait: Vec<u8>,
    related_names: Vec<String>,
    biography: String,
    organizations: Vec<String>,
    subjects: Vec<String>,
    events: Events,
}

impl ProfileRecord {
    /// Create a new profile record
    pub fn new(
        name: String,
        url: String,
        portrait: Vec<u8>,
        related_names: Vec<String>,
        biography: String,
        organizations: Vec<String>,
        subjects: Vec<String>,
        events: Events,
    ) -> Self {
        Self {
            name,
            url,
            portrait,
            related_names,
            biography,
            organizations,
            subjects,
            events,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page the record was extracted from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw portrait bytes as downloaded (JPEG)
    pub fn portrait(&self) -> &[u8] {
        &self.portrait
    }

    pub fn related_names(&self) -> &[String] {
        &self.related_names
    }

    pub fn biography(&self) -> &str {
        &self.biography
    }

    pub fn organizations(&self) -> &[String] {
        &self.organizations
    }

    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn events(&self) -> &Events {
        &self.events
    }
}

/// All profiles of one crawl, keyed by name in visit order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    profiles: OrderedMap<ProfileRecord>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record under its own name
    pub fn insert(&mut self, record: ProfileRecord) {
        self.profiles.insert(record.name.clone(), record);
    }

    pub fn get(&self, name: &str) -> Option<&ProfileRecord> {
        self.profiles.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Names in the order they were visited
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &ProfileRecord> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
