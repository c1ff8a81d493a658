use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use edgegate_core::types::ACCOUNT_FIELD;

/// Definition of an MCP tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// One row of the tool table.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Backend function path segment.
    pub endpoint: &'static str,
    /// Mutating tools declare a `confirmed` flag and are served on the write endpoint.
    pub mutating: bool,
    pub input_schema: Value,
}

impl ToolSpec {
    fn new(
        name: &'static str,
        description: &'static str,
        endpoint: &'static str,
        mutating: bool,
        properties: Value,
        required: &[&str],
    ) -> Self {
        Self {
            name,
            description,
            endpoint,
            mutating,
            input_schema: input_schema(mutating, properties, required),
        }
    }

    /// Names listed under `required` in the input schema.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
    }

    /// First required argument absent from `arguments`, if any.
    pub fn missing_argument(&self, arguments: &Map<String, Value>) -> Option<&str> {
        self.required().find(|field| !arguments.contains_key(*field))
    }

    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema.clone(),
        }
    }
}

/// Subset of the tool table served by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolScope {
    All,
    /// Non-mutating tools only.
    Read,
    /// Mutating tools only.
    Write,
}

impl ToolScope {
    pub fn contains(self, spec: &ToolSpec) -> bool {
        match self {
            Self::All => true,
            Self::Read => !spec.mutating,
            Self::Write => spec.mutating,
        }
    }
}

fn input_schema(mutating: bool, properties: Value, required: &[&str]) -> Value {
    let mut props = Map::new();
    props.insert(
        ACCOUNT_FIELD.to_string(),
        json!({
            "type": "string",
            "description": "Account ID (optional, defaults to the configured account)"
        }),
    );
    if let Value::Object(extra) = properties {
        props.extend(extra);
    }
    if mutating {
        props.insert(
            "confirmed".to_string(),
            json!({
                "type": "boolean",
                "default": false,
                "description": "Must be true for the backend to apply the change"
            }),
        );
    }

    let mut schema = json!({
        "type": "object",
        "properties": props,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

const DASHBOARDS: [&str; 6] = ["email", "website", "paid", "organic", "leads", "executive"];

static CATALOGUE: LazyLock<Vec<ToolSpec>> = LazyLock::new(|| {
    vec![
        ToolSpec::new(
            "metrics_query",
            "Query marketing metrics (website, email, paid, leads)",
            "ai-metrics-query",
            false,
            json!({
                "metric_type": {"type": "string", "enum": ["email", "website", "paid", "organic", "leads"]},
                "date_range": {"type": "string", "enum": ["7d", "30d", "90d", "ytd"]},
                "brand_id": {"type": "string", "description": "Optional brand filter"}
            }),
            &["metric_type"],
        ),
        ToolSpec::new(
            "goals_status",
            "Get goal progress and master funnel status (2,200 leads/year target)",
            "ai-goals-status",
            false,
            json!({
                "goal_type": {"type": "string", "enum": ["leads", "mqls", "revenue", "channel_specific"]},
                "period": {"type": "string", "enum": ["monthly", "quarterly", "yearly"]}
            }),
            &[],
        ),
        ToolSpec::new(
            "insights_list",
            "List existing AI insights for dashboard",
            "ai-insights-list",
            false,
            json!({
                "dashboard_context": {"type": "string", "enum": DASHBOARDS},
                "status": {"type": "string", "enum": ["new", "seen", "actioned"]},
                "limit": {"type": "integer", "default": 10}
            }),
            &[],
        ),
        ToolSpec::new(
            "insights_generate",
            "Generate new AI insights based on current metrics",
            "ai-insights-generate",
            false,
            json!({
                "dashboard_context": {"type": "string", "enum": DASHBOARDS},
                "focus_area": {"type": "string"}
            }),
            &["dashboard_context"],
        ),
        ToolSpec::new(
            "memory_search",
            "Search knowledge base for historical context",
            "ai-memory-search",
            false,
            json!({
                "query": {"type": "string", "description": "Search query"},
                "category": {"type": "string", "enum": ["email", "website", "paid", "goals", "insights"]},
                "limit": {"type": "integer", "default": 5}
            }),
            &["query"],
        ),
        ToolSpec::new(
            "schema_describe",
            "Describe available data structures in bdgSignal",
            "ai-schema-describe",
            false,
            json!({
                "table_name": {"type": "string"},
                "category": {"type": "string", "enum": ["marketing", "email", "contacts", "tracking", "goals"]}
            }),
            &[],
        ),
        ToolSpec::new(
            "memory_save",
            "Save new knowledge to memory (requires confirmation)",
            "ai-memory-save",
            true,
            json!({
                "memory_type": {"type": "string", "enum": ["metric_snapshot", "insight", "learning", "action_taken"]},
                "category": {"type": "string"},
                "content": {"type": "string"},
                "structured_data": {"type": "object"}
            }),
            &["memory_type", "content"],
        ),
        ToolSpec::new(
            "contacts_create",
            "Create new contact (requires confirmation)",
            "ai-contacts-create",
            true,
            json!({
                "email": {"type": "string"},
                "first_name": {"type": "string"},
                "last_name": {"type": "string"},
                "company_name": {"type": "string"},
                "source": {"type": "string"}
            }),
            &["email"],
        ),
        ToolSpec::new(
            "contacts_update",
            "Update existing contact (requires confirmation)",
            "ai-contacts-update",
            true,
            json!({
                "contact_id": {"type": "string"},
                "email": {"type": "string", "description": "Fallback lookup by email"},
                "updates": {
                    "type": "object",
                    "properties": {
                        "first_name": {"type": "string"},
                        "lifecycle_stage": {"type": "string"},
                        "lead_score_adjustment": {"type": "integer"},
                        "add_tags": {"type": "array", "items": {"type": "string"}},
                        "remove_tags": {"type": "array", "items": {"type": "string"}}
                    }
                }
            }),
            &["updates"],
        ),
        ToolSpec::new(
            "segments_create",
            "Create new segment (requires confirmation)",
            "ai-segments-create",
            true,
            json!({
                "name": {"type": "string"},
                "description": {"type": "string"},
                "rules": {"type": "object"}
            }),
            &["name"],
        ),
        ToolSpec::new(
            "campaigns_create",
            "Create email campaign as DRAFT (requires confirmation, never auto-sends)",
            "ai-campaigns-create",
            true,
            json!({
                "name": {"type": "string"},
                "brand_id": {"type": "string"},
                "subject": {"type": "string"},
                "preheader": {"type": "string"},
                "html_content": {"type": "string"},
                "segment_ids": {"type": "array", "items": {"type": "string"}}
            }),
            &["name", "brand_id", "subject"],
        ),
        ToolSpec::new(
            "workflows_create",
            "Create automation workflow as DRAFT (requires confirmation)",
            "ai-workflows-create",
            true,
            json!({
                "name": {"type": "string"},
                "description": {"type": "string"},
                "brand_id": {"type": "string"},
                "trigger_type": {"type": "string"},
                "template": {
                    "type": "string",
                    "enum": ["welcome_series", "re_engagement", "lead_nurturing", "score_threshold"]
                }
            }),
            &["name"],
        ),
    ]
});

/// Registry of all tools the gateway can forward.
pub struct ToolRegistry;

impl ToolRegistry {
    /// Every row of the tool table, in catalogue order.
    pub fn specs() -> &'static [ToolSpec] {
        &CATALOGUE
    }

    /// Tool definitions for the MCP `tools/list` method.
    #[must_use]
    pub fn definitions(scope: ToolScope) -> Vec<ToolDefinition> {
        Self::specs()
            .iter()
            .filter(|spec| scope.contains(spec))
            .map(ToolSpec::definition)
            .collect()
    }

    /// Find a tool by name, restricted to `scope`.
    pub fn lookup(name: &str, scope: ToolScope) -> Option<&'static ToolSpec> {
        Self::specs()
            .iter()
            .find(|spec| spec.name == name && scope.contains(spec))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn all_tools_defined() {
        let tools = ToolRegistry::definitions(ToolScope::All);
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();

        assert!(names.contains(&"metrics_query"));
        assert!(names.contains(&"memory_save"));
        assert!(names.contains(&"workflows_create"));
        assert_eq!(tools.len(), 12);
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = ToolRegistry::specs().iter().map(|s| s.name).collect();
        assert_eq!(names.len(), ToolRegistry::specs().len());
    }

    #[test]
    fn read_and_write_partition_the_table() {
        let read = ToolRegistry::definitions(ToolScope::Read);
        let write = ToolRegistry::definitions(ToolScope::Write);
        assert_eq!(read.len(), 6);
        assert_eq!(write.len(), 6);
        assert_eq!(read.len() + write.len(), ToolRegistry::specs().len());
        assert!(read.iter().all(|t| !write.contains(t)));
    }

    #[test]
    fn mutating_tools_declare_confirmed() {
        for spec in ToolRegistry::specs() {
            let confirmed = &spec.input_schema["properties"]["confirmed"];
            if spec.mutating {
                assert_eq!(confirmed["type"], "boolean", "{}", spec.name);
                assert_eq!(confirmed["default"], false, "{}", spec.name);
            } else {
                assert!(confirmed.is_null(), "{}", spec.name);
            }
        }
    }

    #[test]
    fn every_tool_accepts_account_id() {
        for spec in ToolRegistry::specs() {
            assert_eq!(
                spec.input_schema["properties"][ACCOUNT_FIELD]["type"], "string",
                "{}",
                spec.name
            );
            assert!(spec.required().all(|field| field != ACCOUNT_FIELD));
        }
    }

    #[test]
    fn schemas_compile() {
        for spec in ToolRegistry::specs() {
            assert_eq!(spec.input_schema["type"], "object");
            assert!(
                jsonschema::validator_for(&spec.input_schema).is_ok(),
                "{} has an invalid schema",
                spec.name
            );
        }
    }

    #[test]
    fn lookup_respects_scope() {
        assert_eq!(
            ToolRegistry::lookup("metrics_query", ToolScope::All).map(|s| s.endpoint),
            Some("ai-metrics-query")
        );
        assert!(ToolRegistry::lookup("metrics_query", ToolScope::Write).is_none());
        assert!(ToolRegistry::lookup("contacts_create", ToolScope::Read).is_none());
        assert!(ToolRegistry::lookup("contacts_create", ToolScope::Write).is_some());
        assert!(ToolRegistry::lookup("nope", ToolScope::All).is_none());
    }

    #[test]
    fn campaigns_create_has_required_params() {
        let spec = ToolRegistry::lookup("campaigns_create", ToolScope::All).unwrap();
        let required: Vec<&str> = spec.required().collect();
        assert_eq!(required, ["name", "brand_id", "subject"]);

        let args = json!({"name": "Spring", "brand_id": "b1"});
        assert_eq!(spec.missing_argument(args.as_object().unwrap()), Some("subject"));
    }

    #[test]
    fn descriptions_are_advertised_verbatim() {
        let description = |name: &str| {
            ToolRegistry::lookup(name, ToolScope::All)
                .unwrap()
                .description
        };
        assert_eq!(
            description("goals_status"),
            "Get goal progress and master funnel status (2,200 leads/year target)"
        );
        assert_eq!(
            description("schema_describe"),
            "Describe available data structures in bdgSignal"
        );
        assert_eq!(
            description("insights_list"),
            "List existing AI insights for dashboard"
        );
        assert_eq!(
            description("contacts_create"),
            "Create new contact (requires confirmation)"
        );
        assert_eq!(
            description("workflows_create"),
            "Create automation workflow as DRAFT (requires confirmation)"
        );
    }

    #[test]
    fn tools_serialize() {
        let tools = ToolRegistry::definitions(ToolScope::All);
        let json = serde_json::to_string(&tools).unwrap();
        assert!(json.contains("metrics_query"));
        assert!(json.contains("inputSchema"));
    }
}
