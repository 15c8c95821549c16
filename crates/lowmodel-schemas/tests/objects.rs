use lowmodel_core::{
    build_target, BuildError, Buildable, DocumentIndex, ExtractOptions, HasExtensions,
    MergeKeyPolicy, SpecIndex,
};
use lowmodel_schemas::{build_object, v2, v3, LowObject, ObjectKind, Tag};
use pretty_assertions::assert_eq;
use serde_json::json;

fn build<T: Buildable>(source: &str) -> T {
    let index = DocumentIndex::parse(source).unwrap();
    build_target(index.root(), &index).unwrap()
}

#[test]
fn default_response_is_promoted() {
    let responses: v2::Responses = build(
        r#"{"200": {"description": "A"}, "default": {"description": "B"}, "404": {"description": "C"}}"#,
    );
    let codes: Vec<&str> = responses.codes.keys().map(|k| k.value.as_str()).collect();
    assert_eq!(codes, vec!["200", "404"]);
    assert_eq!(responses.default.value.description.value, "B");
    assert!(responses.default.key_node.is_some());
    assert!(responses.find_response_by_code("default").is_none());
    assert_eq!(
        responses
            .find_response_by_code("404")
            .unwrap()
            .value
            .description
            .value,
        "C"
    );
}

#[test]
fn default_promotion_ignores_case() {
    let responses: v2::Responses = build("Default:\n  description: B\n'200':\n  description: A\n");
    assert_eq!(responses.codes.len(), 1);
    assert_eq!(responses.default.value.description.value, "B");
}

#[test]
fn response_codes_hash_ignores_order() {
    let a: v2::Responses = build(
        "'200':\n  description: ok\n'404':\n  description: missing\ndefault:\n  description: other\n",
    );
    let b: v2::Responses = build(
        "default:\n  description: other\n'404':\n  description: missing\n'200':\n  description: ok\n",
    );
    let c: v2::Responses = build(
        "'200':\n  description: ok\n'404':\n  description: gone\ndefault:\n  description: other\n",
    );
    assert_eq!(a.hash(), b.hash());
    assert_ne!(a.hash(), c.hash());
}

#[test]
fn scopes_hash_ignores_order_but_not_values() {
    let a: v2::Scopes = build("read: Read access\nwrite: Write access\nx-tier: gold\n");
    let b: v2::Scopes = build("write: Write access\nread: Read access\nx-tier: gold\n");
    let c: v2::Scopes = build("read: Read access\nwrite: Write everything\nx-tier: gold\n");
    assert_eq!(a.hash(), b.hash());
    assert_ne!(a.hash(), c.hash());
    assert_eq!(a.values.len(), 2);
    assert_eq!(a.find_scope("write").unwrap().value, "Write access");
    assert_eq!(a.find_extension("x-tier").unwrap().value, json!("gold"));
}

#[test]
fn extension_order_changes_hash() {
    let a: v2::Scopes = build("read: r\nx-a: 1\nx-b: 2\n");
    let b: v2::Scopes = build("read: r\nx-b: 2\nx-a: 1\n");
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn hash_is_stable() {
    let source = "\
name: pets
description: Everything about pets
externalDocs:
  url: https://example.com/pets
x-display: Pets
";
    let first: Tag = build(source);
    let second: Tag = build(source);
    assert_eq!(first.hash(), first.hash());
    assert_eq!(first.hash(), second.hash());
    assert_eq!(first.external_docs.value.url.value, "https://example.com/pets");

    let changed: Tag = build(&source.replace("pets\n", "dogs\n"));
    assert_ne!(first.hash(), changed.hash());
}

#[test]
fn tag_external_docs_by_reference() {
    let source = "\
docs:
  url: https://example.com
tag:
  name: pets
  externalDocs:
    $ref: '#/docs'
";
    let index = DocumentIndex::parse(source).unwrap();
    let (_, tag_node) = index.tree().find_key("tag", index.root()).unwrap();
    let tag: Tag = build_target(tag_node, &index).unwrap();
    assert!(tag.external_docs.is_reference());
    assert_eq!(tag.external_docs.value.reference.pointer.as_deref(), Some("#/docs"));
    assert_eq!(tag.external_docs.value.url.value, "https://example.com");

    let inline: Tag = build("name: pets\nexternalDocs:\n  url: https://example.com\n");
    assert_eq!(tag.hash(), inline.hash());
}

#[test]
fn v3_response_fields() {
    let source = "\
description: A pet
headers:
  X-Rate-Limit:
    description: calls per hour
    required: true
  x-internal:
    description: still a header
content:
  application/json:
    example: {id: 1}
  text/plain:
    example: one
links:
  owner:
    operationId: getOwner
x-cache: true
";
    let response: v3::Response = build(source);
    let headers: Vec<&str> = response.headers.value.keys().map(|k| k.value.as_str()).collect();
    assert_eq!(headers, vec!["X-Rate-Limit", "x-internal"]);
    assert!(response.find_header("x-rate-limit").unwrap().value.required.value);
    assert_eq!(
        response.find_content("application/json").unwrap().value.example.value,
        json!({"id": 1})
    );
    assert_eq!(response.find_link("owner").unwrap().value.operation_id.value, "getOwner");
    assert_eq!(response.extensions().len(), 1);
}

#[test]
fn v3_content_order_is_significant() {
    let a: v3::Response = build("content:\n  application/json: {}\n  text/plain: {}\n");
    let b: v3::Response = build("content:\n  text/plain: {}\n  application/json: {}\n");
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn callback_expressions() {
    let source = "\
'{$request.body#/callbackUrl}':
  summary: notify
x-retry: 3
";
    let callback: v3::Callback = build(source);
    let item = callback
        .find_expression("{$request.body#/callbackUrl}")
        .unwrap();
    assert_eq!(item.value.summary.value, "notify");
    assert_eq!(callback.expression.as_ref().unwrap().value.len(), 1);
    assert_eq!(callback.extensions().len(), 1);

    let other: v3::Callback = build(&source.replace("notify", "alert"));
    assert_ne!(callback.hash(), other.hash());

    let empty: v3::Callback = build("x-retry: 3\n");
    assert!(empty.expression.is_none());
}

#[test]
fn callback_failure_names_expression() {
    let err = DocumentIndex::parse("'{$url}': [1]\n")
        .map(|index| build_target::<v3::Callback>(index.root(), &index).map(|_| ()))
        .unwrap()
        .unwrap_err();
    match &err {
        BuildError::NestedBuildFailure { label, .. } => assert_eq!(label, "{$url}"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(err.root_cause(), BuildError::StructuralMismatch { .. }));
}

#[test]
fn responses_must_be_a_mapping() {
    let index = DocumentIndex::parse("- a\n- b\n").unwrap();
    let err = build_target::<v2::Responses>(index.root(), &index).unwrap_err();
    assert!(matches!(err, BuildError::StructuralMismatch { .. }));
    assert_eq!(err.mark().unwrap().line, 1);
}

#[test]
fn build_object_by_kind() {
    let index = DocumentIndex::parse("name: pets\nx-a: 1\n").unwrap();
    let object = build_object(ObjectKind::Tag, index.root(), &index).unwrap();
    assert_eq!(object.kind(), ObjectKind::Tag);
    let direct: Tag = build_target(index.root(), &index).unwrap();
    assert_eq!(object.hash(), direct.hash());
    assert_eq!(object.extensions().len(), 1);
    assert!(matches!(object, LowObject::Tag(_)));
}

#[test]
fn objects_serialize_in_source_shape() {
    let tag: Tag = build("name: pets\nexternalDocs:\n  url: https://example.com\nx-a: [1]\n");
    assert_eq!(
        serde_json::to_value(&tag).unwrap(),
        json!({
            "name": "pets",
            "externalDocs": {"url": "https://example.com"},
            "x-a": [1]
        })
    );

    let responses: v2::Responses = build("'200':\n  description: ok\ndefault:\n  description: other\n");
    assert_eq!(
        serde_json::to_string(&responses).unwrap(),
        r#"{"200":{"description":"ok"},"default":{"description":"other"}}"#
    );
}

#[test]
fn repeated_default_spellings_are_all_removed() {
    let responses: v2::Responses = build(
        "default:\n  description: A\n'200':\n  description: ok\nDefault:\n  description: B\n",
    );
    let codes: Vec<&str> = responses.codes.keys().map(|k| k.value.as_str()).collect();
    assert_eq!(codes, vec!["200"]);
    assert_eq!(responses.default.value.description.value, "A");
    assert!(responses.find_response_by_code("default").is_none());
    assert!(responses.find_response_by_code("Default").is_none());
}

#[test]
fn header_flags_hash_apart() {
    let required: v3::Header = build("required: true\n");
    let deprecated: v3::Header = build("deprecated: true\n");
    let neither: v3::Header = build("required: false\n");
    assert!(required.required.value);
    assert!(deprecated.deprecated.value);
    assert_ne!(required.hash(), deprecated.hash());
    assert_ne!(required.hash(), neither.hash());
}

#[test]
fn merge_key_in_headers() {
    let source = "\
h: &h
  description: shared
response:
  description: ok
  headers:
    <<: *h
    X-A:
      description: a
";
    let index = DocumentIndex::parse(source).unwrap();
    let (_, node) = index.tree().find_key("response", index.root()).unwrap();
    let response: v3::Response = build_target(node, &index).unwrap();
    let headers: Vec<&str> = response.headers.value.keys().map(|k| k.value.as_str()).collect();
    assert_eq!(headers, vec!["X-A"]);

    let index = index.with_options(ExtractOptions::default().with_merge_keys(MergeKeyPolicy::Reject));
    let err = build_target::<v3::Response>(node, &index).unwrap_err();
    assert!(matches!(err.root_cause(), BuildError::MergeKey { .. }));
}
