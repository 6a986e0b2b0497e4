//! Reusable test content.

pub const WEB_APP_ID: &str = "5a0b8a5e-1c3f-4d2b-9b6e-3f1e2d4c5b6a";
pub const SHOP_ID: &str = "0e6e8f64-3a8e-4c38-9d1a-7f3c2b1a0d9e";

/// A `com.acme/user` entity schema at `version`
pub fn user_schema(version: &str) -> String {
    format!(
        r#"apiVersion: v1
resourceType: data-structure
meta:
  hidden: false
  schemaType: entity
  customData: {{}}
data:
  $schema: http://iglucentral.com/schemas/com.snowplowanalytics.self-desc/schema/jsonschema/1-0-0#
  self:
    vendor: com.acme
    name: user
    format: jsonschema
    version: {version}
  type: object
  properties:
    id:
      type: string
      maxLength: 36
"#
    )
}

/// Registry snapshot with `com.acme/user` deployed at `version` on `env`
pub fn user_snapshot(version: &str, env: &str) -> String {
    format!(
        r#"listing:
  - hash: user-hash
    vendor: com.acme
    name: user
    format: jsonschema
    meta:
      hidden: false
      schemaType: entity
      customData: {{}}
    deployments:
      - version: {version}
        env: {env}
        contentHash: deployed-before
destinations: [redshift, snowflake]
migrations:
  com.acme/user/jsonschema:
    redshift:
      changeType: major
      migrations:
        - migrationType: modification
          changeType: major
          path: /properties/id
          message: maxLength decreased
"#
    )
}

pub fn web_source_app(entities: &str) -> String {
    format!(
        r#"apiVersion: v1
resourceType: source-application
resourceName: {WEB_APP_ID}
data:
  name: Web
  appIds: [web]
{entities}"#
    )
}

pub fn shop_data_product(sa_ref: &str) -> String {
    format!(
        r#"apiVersion: v1
resourceType: data-product
resourceName: {SHOP_ID}
data:
  name: Shop
  sourceApplications:
    - $ref: {sa_ref}
  eventSpecifications:
    - resourceName: 7c1d2e3f-4a5b-4c6d-8e9f-0a1b2c3d4e5f
      name: Checkout
      event:
        source: iglu:com.acme/checkout/jsonschema/1-0-0
"#
    )
}
