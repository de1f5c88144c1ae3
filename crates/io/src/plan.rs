// Terraform plan readers: `terraform plan` text output and `terraform show -json`

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use terravalet_recon::AddressSet;

use crate::error::PlanError;

/// Addresses a plan wants to create and destroy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannedChanges {
    pub create: AddressSet,
    pub destroy: AddressSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Text,
    Json,
}

impl PlanFormat {
    /// JSON if the first non-blank character opens an object.
    pub fn sniff(content: &str) -> Self {
        match content.trim_start().as_bytes().first() {
            Some(b'{') => PlanFormat::Json,
            _ => PlanFormat::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON document
// ---------------------------------------------------------------------------

/// The subset of `terraform show -json` this tool reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub resource_changes: Vec<ResourceChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceChange {
    pub address: String,
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub provider_name: String,
    pub change: Change,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub after: Option<serde_json::Value>,
}

impl ResourceChange {
    /// True for a plain create, not the create half of a replace.
    pub fn is_create(&self) -> bool {
        self.change.actions.len() == 1 && self.change.actions[0] == "create"
    }
}

impl PlanDocument {
    pub fn from_json(content: &str) -> Result<Self, PlanError> {
        serde_json::from_str(content).map_err(|e| PlanError::Json(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

fn change_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"# (.+) will be (.+)").expect("change-line pattern"))
}

fn insert(set: &mut AddressSet, address: &str) -> Result<(), PlanError> {
    set.add(address).map(|_| ()).map_err(|source| PlanError::Address {
        address: address.to_string(),
        source,
    })
}

/// Parse human-readable `terraform plan` output.
///
/// Only lines like `  # module.ci.aws_instance.docker will be destroyed` are
/// looked at; everything else is ignored.
pub fn parse_text(content: &str) -> Result<PlannedChanges, PlanError> {
    let mut changes = PlannedChanges::default();

    for line in content.lines() {
        let Some(caps) = change_line().captures(line) else {
            continue;
        };
        let address = &caps[1];
        match &caps[2] {
            "created" => insert(&mut changes.create, address)?,
            "destroyed" => insert(&mut changes.destroy, address)?,
            "read during apply" => {}
            other => {
                return Err(PlanError::UnexpectedAction {
                    location: format!("line {line:?}"),
                    action: other.to_string(),
                })
            }
        }
    }

    Ok(changes)
}

/// Parse the `resource_changes` of a JSON plan.
pub fn parse_json(content: &str) -> Result<PlannedChanges, PlanError> {
    let document = PlanDocument::from_json(content)?;
    let mut changes = PlannedChanges::default();

    for rc in &document.resource_changes {
        let actions: Vec<&str> = rc.change.actions.iter().map(String::as_str).collect();
        match actions.as_slice() {
            ["create"] => insert(&mut changes.create, &rc.address)?,
            ["delete"] => insert(&mut changes.destroy, &rc.address)?,
            ["read"] | ["no-op"] => {}
            [] => {
                return Err(PlanError::MalformedChange {
                    address: rc.address.clone(),
                    reason: "no actions".to_string(),
                })
            }
            other => {
                return Err(PlanError::UnexpectedAction {
                    location: format!("resource {:?}", rc.address),
                    action: other.join(","),
                })
            }
        }
    }

    Ok(changes)
}

/// Parse a plan in whichever format it is in.
pub fn parse_plan(content: &str) -> Result<PlannedChanges, PlanError> {
    let format = PlanFormat::sniff(content);
    let changes = match format {
        PlanFormat::Json => parse_json(content)?,
        PlanFormat::Text => parse_text(content)?,
    };
    tracing::debug!(
        ?format,
        create = changes.create.len(),
        destroy = changes.destroy.len(),
        "parsed plan"
    );
    Ok(changes)
}

/// Read a file, keeping its path in the error.
pub fn read_file(path: &Path) -> Result<String, PlanError> {
    std::fs::read_to_string(path).map_err(|source| PlanError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_plan(path: &Path) -> Result<PlannedChanges, PlanError> {
    let content = read_file(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read plan");
    parse_plan(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT_PLAN: &str = r#"
Terraform will perform the following actions:

  # aws_instance.docker will be created
  + resource "aws_instance" "docker" {
      + ami = "ami-123"
    }

  # module.ci.aws_instance.docker will be destroyed
  - resource "aws_instance" "docker" {
    }

  # module.workers["windows-vs2019"].aws_autoscaling_schedule.night_mode will be created
  # module.ci.module.workers["windows-vs2019"].aws_autoscaling_schedule.night_mode will be destroyed
  # data.aws_caller_identity.current will be read during apply

Plan: 2 to add, 0 to change, 2 to destroy.
"#;

    #[test]
    fn text_plan_splits_create_and_destroy() {
        let changes = parse_text(TEXT_PLAN).unwrap();
        assert_eq!(
            changes.create.sorted(),
            vec![
                "aws_instance.docker".to_string(),
                r#"module.workers["windows-vs2019"].aws_autoscaling_schedule.night_mode"#.to_string(),
            ]
        );
        assert_eq!(
            changes.destroy.sorted(),
            vec![
                "module.ci.aws_instance.docker".to_string(),
                r#"module.ci.module.workers["windows-vs2019"].aws_autoscaling_schedule.night_mode"#.to_string(),
            ]
        );
        assert!(!changes.create.contains("data.aws_caller_identity.current"));
    }

    #[test]
    fn text_plan_rejects_unknown_action() {
        let err = parse_text("  # aws_instance.web will be updated in-place\n").unwrap_err();
        match err {
            PlanError::UnexpectedAction { location, action } => {
                assert_eq!(action, "updated in-place");
                assert!(location.contains("aws_instance.web"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn text_plan_without_changes_is_empty() {
        let changes = parse_text("No changes. Infrastructure is up-to-date.\n").unwrap();
        assert!(changes.create.is_empty());
        assert!(changes.destroy.is_empty());
    }

    #[test]
    fn json_plan_classifies_actions() {
        let json = r#"{
          "format_version": "1.1",
          "resource_changes": [
            {"address": "aws_vpc.main", "type": "aws_vpc", "change": {"actions": ["create"], "after": {"id": null}}},
            {"address": "module.net.aws_vpc.main", "type": "aws_vpc", "change": {"actions": ["delete"]}},
            {"address": "data.aws_region.current", "type": "aws_region", "change": {"actions": ["read"]}},
            {"address": "aws_s3_bucket.logs", "type": "aws_s3_bucket", "change": {"actions": ["no-op"]}}
          ]
        }"#;
        let changes = parse_json(json).unwrap();
        assert_eq!(changes.create.sorted(), vec!["aws_vpc.main".to_string()]);
        assert_eq!(changes.destroy.sorted(), vec!["module.net.aws_vpc.main".to_string()]);
    }

    #[test]
    fn json_plan_rejects_replace() {
        let json = r#"{"resource_changes": [
            {"address": "aws_instance.web", "type": "aws_instance", "change": {"actions": ["delete", "create"]}}
        ]}"#;
        let err = parse_json(json).unwrap_err();
        assert_eq!(
            err.to_string(),
            "resource \"aws_instance.web\", unexpected action \"delete,create\""
        );
    }

    #[test]
    fn json_plan_must_be_valid() {
        assert!(matches!(parse_json(""), Err(PlanError::Json(_))));
        assert!(matches!(
            parse_json(r#"{"resource_changes": [{"address": "a"}]}"#),
            Err(PlanError::Json(_))
        ));
    }

    #[test]
    fn format_is_sniffed() {
        assert_eq!(PlanFormat::sniff("  \n{\"a\":1}"), PlanFormat::Json);
        assert_eq!(PlanFormat::sniff("  # a will be created"), PlanFormat::Text);
        assert_eq!(PlanFormat::sniff(""), PlanFormat::Text);
    }

    #[test]
    fn load_plan_reads_either_format() {
        let dir = tempfile::tempdir().unwrap();

        let text = dir.path().join("plan.txt");
        std::fs::write(&text, TEXT_PLAN).unwrap();
        assert_eq!(load_plan(&text).unwrap().create.len(), 2);

        let json = dir.path().join("plan.json");
        std::fs::write(
            &json,
            r#"{"resource_changes":[{"address":"a.b","type":"a","change":{"actions":["delete"]}}]}"#,
        )
        .unwrap();
        assert!(load_plan(&json).unwrap().destroy.contains("a.b"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_plan(Path::new("does/not/exist.plan")).unwrap_err();
        assert!(matches!(err, PlanError::Read { .. }));
        assert!(err.to_string().starts_with("reading does/not/exist.plan:"));
    }
}
