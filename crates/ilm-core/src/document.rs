use crate::error::{IlmError, Result};
use crate::policy::{Action, Phase, Policy};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

// ---------------------------------------------------------------------------
// Wire shape
// ---------------------------------------------------------------------------

// Phase and action names are map keys in the document; they become the
// `name` fields of the decoded values. Entries are kept in document order,
// repeats included, so a repeated key is rejected instead of overwritten.

#[derive(Debug, Deserialize)]
struct PolicyDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    lifecycle_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_entries")]
    phases: Vec<(String, Option<PhaseDocument>)>,
}

#[derive(Debug, Default, Deserialize)]
struct PhaseDocument {
    #[serde(default, deserialize_with = "deserialize_entries")]
    actions: Vec<(String, Option<Map<String, Value>>)>,
}

fn deserialize_entries<'de, D, V>(deserializer: D) -> std::result::Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V> {
        marker: PhantomData<V>,
    }

    impl<'de, V> Visitor<'de> for EntriesVisitor<V>
    where
        V: Deserialize<'de>,
    {
        type Value = Vec<(String, V)>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map keyed by name")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor {
        marker: PhantomData,
    })
}

impl PolicyDocument {
    fn into_policy(self, default_type: &str) -> Result<Policy> {
        let mut policy = Policy::new(self.name.unwrap_or_default());
        policy.lifecycle_type = self
            .lifecycle_type
            .unwrap_or_else(|| default_type.to_string());

        let mut seen_phases = HashSet::new();
        for (phase_name, body) in self.phases {
            if !seen_phases.insert(phase_name.clone()) {
                return Err(IlmError::DuplicatePhase(phase_name));
            }

            let mut phase = Phase::new(phase_name);
            for (action_name, params) in body.unwrap_or_default().actions {
                if phase.actions.contains_key(&action_name) {
                    return Err(IlmError::DuplicateAction {
                        action: action_name,
                        phase: phase.name,
                    });
                }
                phase.insert(Action::with_params(action_name, params.unwrap_or_default()));
            }
            policy.insert(phase);
        }
        Ok(policy)
    }
}

// ---------------------------------------------------------------------------
// DocumentFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            "json" => Ok(DocumentFormat::Json),
            _ => Err(IlmError::UnsupportedFormat(ext)),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a policy document. A document without `type` gets `default_type`;
/// a document without `name` gets an empty name.
pub fn parse_policy(text: &str, format: DocumentFormat, default_type: &str) -> Result<Policy> {
    let doc: PolicyDocument = match format {
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
        DocumentFormat::Json => serde_json::from_str(text)?,
    };
    doc.into_policy(default_type)
}

/// Read and decode a policy file. The format follows the file extension and
/// an unnamed policy takes the file stem as its name.
pub fn load_policy(path: &Path, default_type: &str) -> Result<Policy> {
    if !path.exists() {
        return Err(IlmError::DocumentNotFound(path.to_path_buf()));
    }
    let format = DocumentFormat::from_path(path)?;
    let data = std::fs::read_to_string(path)?;
    let mut policy = parse_policy(&data, format, default_type)?;
    if policy.name.is_empty() {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            policy.name = stem.to_string();
        }
    }
    Ok(policy)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
