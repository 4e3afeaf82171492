use crate::schema::INTROSPECTION_QUERY;
use crate::schema::IntrospectionError;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::schema::TypeKind;
use crate::schema::fetch_schema;
use indexmap::IndexMap;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::header;
use wiremock::matchers::method;

fn named(kind: &str, name: &str) -> serde_json::Value {
    json!({ "kind": kind, "name": name, "ofType": null })
}

fn wrapped(kind: &str, inner: serde_json::Value) -> serde_json::Value {
    json!({ "kind": kind, "name": null, "ofType": inner })
}

fn introspection_schema() -> serde_json::Value {
    json!({
        "__schema": {
            "queryType": { "name": "Query" },
            "mutationType": null,
            "subscriptionType": null,
            "types": [
                {
                    "kind": "OBJECT",
                    "name": "Query",
                    "description": null,
                    "fields": [
                        {
                            "name": "user",
                            "description": "Find a user.",
                            "args": [
                                {
                                    "name": "id",
                                    "description": null,
                                    "type": wrapped("NON_NULL", named("SCALAR", "ID")),
                                    "defaultValue": null
                                }
                            ],
                            "type": named("OBJECT", "User"),
                            "isDeprecated": false,
                            "deprecationReason": null
                        }
                    ],
                    "inputFields": null,
                    "interfaces": [],
                    "enumValues": null,
                    "possibleTypes": null
                },
                {
                    "kind": "OBJECT",
                    "name": "User",
                    "description": null,
                    "fields": [
                        {
                            "name": "tags",
                            "description": null,
                            "args": [
                                {
                                    "name": "first",
                                    "description": null,
                                    "type": named("SCALAR", "Int"),
                                    "defaultValue": "5"
                                }
                            ],
                            "type": wrapped("NON_NULL", wrapped("LIST", wrapped("NON_NULL", named("SCALAR", "String")))),
                            "isDeprecated": false,
                            "deprecationReason": null
                        }
                    ],
                    "inputFields": null,
                    "interfaces": [],
                    "enumValues": null,
                    "possibleTypes": null
                },
                {
                    "kind": "ENUM",
                    "name": "Role",
                    "description": null,
                    "fields": null,
                    "inputFields": null,
                    "interfaces": null,
                    "enumValues": [
                        { "name": "ADMIN", "description": null, "isDeprecated": false, "deprecationReason": null }
                    ],
                    "possibleTypes": null
                },
                { "kind": "SCALAR", "name": "ID", "description": null },
                { "kind": "SCALAR", "name": "Int", "description": null },
                { "kind": "SCALAR", "name": "String", "description": null }
            ],
            "directives": []
        }
    })
}

#[test]
fn builds_from_bare_schema_object() {
    let schema = Schema::from_introspection(introspection_schema()).unwrap();
    assert_eq!(schema.query_type().name, "Query");
    assert!(schema.mutation_type().is_none());

    let user = schema.find_field("query.user").unwrap();
    assert_eq!(user.description.as_deref(), Some("Find a user."));
    assert_eq!(user.argument("id").unwrap().value_type.to_string(), "ID!");

    let tags = schema.find_field("query.user.tags").unwrap();
    assert_eq!(tags.field_type.to_string(), "[String!]!");
    assert_eq!(tags.argument("first").unwrap().default_value.as_deref(), Some("5"));

    assert_eq!(schema.named_type("Role").unwrap().kind, TypeKind::Enum);
    assert_eq!(schema.named_type("Role").unwrap().enum_values, vec!["ADMIN"]);
}

#[test]
fn builds_from_full_response() {
    let response = json!({ "data": introspection_schema() });
    let schema = Schema::from_introspection(response).unwrap();
    assert!(schema.find_field("query.user.tags").is_some());
}

#[test]
fn missing_schema_member_is_an_error() {
    assert!(matches!(
        Schema::from_introspection(json!({ "data": null })),
        Err(SchemaBuildError::MissingSchema),
    ));
}

#[test]
fn malformed_schema_member_is_an_error() {
    assert!(matches!(
        Schema::from_introspection(json!({ "__schema": { "types": "nope" } })),
        Err(SchemaBuildError::InvalidIntrospectionJson(_)),
    ));
}

#[test]
fn query_type_must_exist() {
    let mut json = introspection_schema();
    json["__schema"]["queryType"] = json!({ "name": "Missing" });
    assert!(matches!(Schema::from_introspection(json), Err(SchemaBuildError::NoQueryType)));
}

#[tokio::test]
async fn fetches_schema_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-api-key", "secret"))
        .and(body_partial_json(json!({ "query": INTROSPECTION_QUERY })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": introspection_schema() })))
        .expect(1)
        .mount(&server)
        .await;

    let headers = IndexMap::from([("x-api-key".to_string(), "secret".to_string())]);
    let schema = fetch_schema(&reqwest::Client::new(), &server.uri(), &headers).await.unwrap();
    assert!(schema.find_field("query.user").is_some());
}

#[tokio::test]
async fn http_failure_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let result = fetch_schema(&reqwest::Client::new(), &server.uri(), &IndexMap::new()).await;
    assert!(matches!(
        result,
        Err(IntrospectionError::Status { status: 503, body }) if body == "down",
    ));
}

#[tokio::test]
async fn graphql_errors_are_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "introspection is disabled" }]
        })))
        .mount(&server)
        .await;

    let result = fetch_schema(&reqwest::Client::new(), &server.uri(), &IndexMap::new()).await;
    assert!(matches!(result, Err(IntrospectionError::GraphQLErrors(_))));
}
