//! Data product and source application documents
//!
//! Both are authored as `apiVersion` / `resourceType` / `resourceName` /
//! `data` files. Source applications are referenced from data products by
//! a relative `$ref` path.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{"$ref": "./path.yml"}` pointer to another local document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Ref {
    #[serde(rename = "$ref", default)]
    pub reference: String,
}

impl Ref {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// Event or entity reference with optional property rules
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchemaRef {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_cardinality: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cardinality: Option<i64>,
    /// Inline JSON schema narrowing the source schema
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Map<String, Value>>,
}

impl SchemaRef {
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
            && self.min_cardinality.is_none()
            && self.max_cardinality.is_none()
            && self.schema.as_ref().is_none_or(Map::is_empty)
    }

    /// Inline schema, when present and non-empty
    pub fn rules(&self) -> Option<&Map<String, Value>> {
        self.schema.as_ref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntitiesDef {
    pub tracked: Vec<SchemaRef>,
    pub enriched: Vec<SchemaRef>,
}

impl EntitiesDef {
    /// `("tracked" | "enriched", index, entity)` in document order
    pub fn iter_tagged(&self) -> impl Iterator<Item = (&'static str, usize, &SchemaRef)> {
        let tracked = self.tracked.iter().enumerate().map(|(i, e)| ("tracked", i, e));
        let enriched = self.enriched.iter().enumerate().map(|(i, e)| ("enriched", i, e));
        tracked.chain(enriched)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trigger {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub app_ids: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventSpec {
    pub resource_name: String,
    pub excluded_source_applications: Vec<Ref>,
    pub name: String,
    pub description: String,
    pub triggers: Vec<Trigger>,
    pub event: Option<SchemaRef>,
    pub entities: EntitiesDef,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataProductData {
    pub name: String,
    pub source_applications: Vec<Ref>,
    pub domain: String,
    pub owner: String,
    pub description: String,
    pub event_specifications: Vec<EventSpec>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataProduct {
    pub api_version: String,
    pub resource_type: String,
    pub resource_name: String,
    pub data: DataProductData,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceAppData {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub app_ids: Vec<String>,
    pub entities: Option<EntitiesDef>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceApp {
    pub api_version: String,
    pub resource_type: String,
    pub resource_name: String,
    pub data: SourceAppData,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_product_decodes_refs_and_specs() {
        let dp: DataProduct = serde_json::from_value(json!({
            "apiVersion": "v1",
            "resourceType": "data-product",
            "resourceName": "4c1f6a0e-0000-4000-8000-000000000001",
            "data": {
                "name": "Shop",
                "sourceApplications": [{"$ref": "./web.yml"}],
                "eventSpecifications": [{
                    "resourceName": "es-1",
                    "name": "Checkout",
                    "excludedSourceApplications": [{"$ref": "./web.yml"}],
                    "event": {"source": "iglu:com.acme/checkout/jsonschema/1-0-0"},
                    "entities": {"tracked": [{"source": "iglu:com.acme/user/jsonschema/1-0-0", "minCardinality": 1}]}
                }]
            }
        }))
        .unwrap();

        assert_eq!(dp.data.source_applications, vec![Ref::new("./web.yml")]);
        let spec = &dp.data.event_specifications[0];
        assert_eq!(spec.excluded_source_applications.len(), 1);
        assert_eq!(spec.entities.tracked[0].min_cardinality, Some(1));
        assert!(spec.entities.enriched.is_empty());
    }

    #[test]
    fn source_app_without_entities() {
        let sa: SourceApp = serde_json::from_value(json!({
            "apiVersion": "v1",
            "resourceType": "source-application",
            "resourceName": "x",
            "data": {"name": "Web", "appIds": ["web"]}
        }))
        .unwrap();
        assert!(sa.data.entities.is_none());
        assert_eq!(sa.data.app_ids, vec!["web".to_string()]);
    }

    #[test]
    fn schema_ref_empty_and_rules() {
        assert!(SchemaRef::default().is_empty());
        let with_empty_schema = SchemaRef {
            schema: Some(Map::new()),
            ..Default::default()
        };
        assert!(with_empty_schema.is_empty());
        assert!(with_empty_schema.rules().is_none());
    }

    #[test]
    fn iter_tagged_keeps_document_order() {
        let entities = EntitiesDef {
            tracked: vec![SchemaRef::default(), SchemaRef::default()],
            enriched: vec![SchemaRef::default()],
        };
        let tags: Vec<(&str, usize)> = entities.iter_tagged().map(|(k, i, _)| (k, i)).collect();
        assert_eq!(tags, vec![("tracked", 0), ("tracked", 1), ("enriched", 0)]);
    }
}
