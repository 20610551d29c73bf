//! HTML/JSON fixtures mimicking the service's web pages and record API

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// CSRF token embedded in the mock login form
pub const CSRF_TOKEN: &str = "csrf-fixture-token";

/// Session cookie the mock login endpoint sets
pub const SESSION_COOKIE: &str = "__airtable_session=sess-fixture";

/// API key embedded in the mock documentation page
pub const API_KEY: &str = "keyFixture123";

/// Login form HTML carrying the CSRF hidden input
pub fn login_page() -> String {
    format!(
        r#"<html><body><form action="/auth/login" method="post">
        <input type="hidden" name="_csrf" value="{CSRF_TOKEN}" />
        <input type="email" name="email" />
        <input type="password" name="password" />
        </form></body></html>"#
    )
}

/// Login response body carrying the post-login redirect marker
pub fn login_success_body() -> String {
    r#"<html><body><script>window.location = "/auth/redirectAfterSuccessfulLogin";</script></body></html>"#
        .to_string()
}

/// Login response body without the marker (wrong password page)
pub fn login_failure_body() -> String {
    "<html><body>Invalid email or password.</body></html>".to_string()
}

/// Post-login redirect page embedding `initData` on a single line
pub fn redirect_page(init_data: &Value) -> String {
    format!(
        "<html><head></head><body><script>var initData = {};</script></body></html>",
        serde_json::to_string(init_data).expect("fixture init data serializes")
    )
}

/// API documentation page embedding the base's key
pub fn api_docs_page(api_key: &str) -> String {
    format!(
        r#"<html><body><div class="docs" data-api-key="{api_key}">curl https://api.airtable.com/v0/ ...</div></body></html>"#
    )
}

/// Documentation page without a `data-api-key` attribute (expired session shape)
pub fn api_docs_page_without_key() -> String {
    "<html><body><div class=\"docs\">Please log in.</div></body></html>".to_string()
}

/// One page of the record listing endpoint
pub fn record_page(records: Vec<Value>, offset: Option<&str>) -> Value {
    match offset {
        Some(cursor) => json!({ "records": records, "offset": cursor }),
        None => json!({ "records": records }),
    }
}

/// A minimal record with an `id` and a `fields` map
pub fn record(id: &str, fields: Value) -> Value {
    json!({ "id": id, "fields": fields, "createdTime": "2024-01-01T00:00:00.000Z" })
}

/// `initData` for one base with the given visible tables
pub fn init_data_single_base(base_id: &str, base_name: &str, tables: &[(&str, &str)]) -> Value {
    let order: Vec<&str> = tables.iter().map(|(id, _)| *id).collect();
    let mut raw_tables = serde_json::Map::new();
    for (id, name) in tables {
        raw_tables.insert((*id).to_string(), json!({ "name": name }));
    }
    let mut raw_applications = serde_json::Map::new();
    raw_applications.insert(
        base_id.to_string(),
        json!({ "name": base_name, "visibleTableOrder": order }),
    );
    json!({
        "rawApplications": raw_applications,
        "rawTables": raw_tables,
    })
}

/// Mount the three-request login flow: form GET, credential POST (matched
/// on the fixture CSRF token, answering with the session cookie), and the
/// post-login redirect page embedding `init_data`.
pub async fn mount_login_flow(server: &MockServer, init_data: &Value) {
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string(login_page()))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({ "_csrf": CSRF_TOKEN })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION_COOKIE}; Path=/").as_str())
                .set_body_string(login_success_body()),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/redirectAfterSuccessfulLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_string(redirect_page(init_data)))
        .mount(server)
        .await;
}
