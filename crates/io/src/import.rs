// Import definitions: how to build a `terraform import` ID for each resource type

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use serde::Deserialize;

use crate::error::PlanError;
use crate::plan::{read_file, PlanDocument, ResourceChange};

/// Priority that puts a resource first on import and last on removal.
pub const PRIORITY_FIRST: i64 = 1;

/// One entry of the definitions file.
///
/// ```json
/// "aws_route53_record": {
///   "priority": 1,
///   "separator": "_",
///   "variables": ["zone_id", "name", "type"]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ImportDefinition {
    pub separator: String,
    pub priority: i64,
    pub variables: Vec<String>,
}

/// Resource type to its definition.
pub type Definitions = BTreeMap<String, ImportDefinition>;

pub fn parse_definitions(content: &str) -> Result<Definitions, PlanError> {
    serde_json::from_str(content).map_err(|e| PlanError::Definitions(e.to_string()))
}

pub fn load_definitions(path: &Path) -> Result<Definitions, PlanError> {
    let defs = parse_definitions(&read_file(path)?)?;
    tracing::debug!(path = %path.display(), types = defs.len(), "loaded import definitions");
    Ok(defs)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEntry {
    pub address: String,
    pub id: String,
}

/// Ordered work for the import (up) and state rm (down) scripts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportPlan {
    pub imports: Vec<ImportEntry>,
    pub removals: Vec<String>,
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn import_id(rc: &ResourceChange, def: &ImportDefinition) -> Result<String, PlanError> {
    let after = rc.change.after.as_ref().and_then(|v| v.as_object());
    let mut parts = Vec::with_capacity(def.variables.len());
    for field in &def.variables {
        let value = after
            .and_then(|m| m.get(field))
            .ok_or_else(|| PlanError::MissingField {
                resource_type: rc.resource_type.clone(),
                field: field.clone(),
            })?;
        parts.push(render_value(value));
    }
    Ok(parts.join(&def.separator))
}

/// Build the import and removal lists for every created resource that has a
/// definition.
///
/// Resources with priority 1 are imported first and removed last; all
/// others keep plan order on import and reverse order on removal.
pub fn build_imports(document: &PlanDocument, defs: &Definitions) -> Result<ImportPlan, PlanError> {
    let created: Vec<&ResourceChange> = document
        .resource_changes
        .iter()
        .filter(|rc| rc.is_create())
        .collect();
    if created.is_empty() {
        return Err(PlanError::NoResourcesToCreate);
    }

    let mut imports = VecDeque::new();
    let mut removals = VecDeque::new();

    for rc in created {
        let Some(def) = defs.get(&rc.resource_type) else {
            tracing::warn!(
                resource_type = %rc.resource_type,
                provider = %rc.provider_name,
                address = %rc.address,
                "resource type has no import definition, skipping"
            );
            continue;
        };

        let entry = ImportEntry {
            address: rc.address.clone(),
            id: import_id(rc, def)?,
        };
        if def.priority == PRIORITY_FIRST {
            removals.push_back(entry.address.clone());
            imports.push_front(entry);
        } else {
            removals.push_front(entry.address.clone());
            imports.push_back(entry);
        }
    }

    if imports.is_empty() {
        return Err(PlanError::OnlyUndefinedResources);
    }

    tracing::debug!(imports = imports.len(), "built import list");
    Ok(ImportPlan {
        imports: imports.into(),
        removals: removals.into(),
    })
}
