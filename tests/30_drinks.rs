mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

const ALL_SCOPES: &[&str] = &[
    "get:drink-details",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];

#[tokio::test]
async fn crud_round_trip() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    common::reset_db(false).await?;

    let client = reqwest::Client::new();
    let base = &server.base_url;
    let token = common::token_with_permissions(ALL_SCOPES);

    // Create
    let res = client
        .post(format!("{}/drinks", base))
        .bearer_auth(&token)
        .json(&json!({"title": "Water", "recipe": [{"color": "blue", "parts": 1}]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["drinks"]["title"], json!("Water"));
    assert_eq!(body["drinks"]["recipe"], json!([{"color": "blue", "parts": 1}]));
    let id = body["drinks"]["id"].as_i64().expect("created id");

    // Public listing shows the short representation
    let res = client.get(format!("{}/drinks", base)).send().await?;
    let body = res.json::<Value>().await?;
    let listed = body["drinks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"].as_i64() == Some(id))
        .expect("created drink listed")
        .clone();
    assert_eq!(listed["title"], json!("Water"));
    assert_eq!(listed["recipe"], json!([{"color": "blue"}]));

    // Privileged listing shows quantities
    let res = client
        .get(format!("{}/drinks-detail", base))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let detailed = body["drinks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["id"].as_i64() == Some(id))
        .expect("created drink in detail listing")
        .clone();
    assert_eq!(detailed["recipe"][0]["parts"], json!(1));

    // Patch the title only; the recipe must be untouched
    let res = client
        .patch(format!("{}/drinks/{}", base, id))
        .bearer_auth(&token)
        .json(&json!({"title": "Sparkling Water"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["drinks"][0]["title"], json!("Sparkling Water"));
    assert_eq!(
        body["drinks"][0]["recipe"],
        json!([{"color": "blue", "parts": 1}])
    );

    // Empty title is rejected, not treated as "unchanged"
    let res = client
        .patch(format!("{}/drinks/{}", base, id))
        .bearer_auth(&token)
        .json(&json!({"title": ""}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // A patch changing nothing is rejected
    let res = client
        .patch(format!("{}/drinks/{}", base, id))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Patch on an id that was never assigned
    let res = client
        .patch(format!("{}/drinks/{}", base, id + 999))
        .bearer_auth(&token)
        .json(&json!({"title": "Ghost"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], json!(404));

    // Delete echoes the numeric id
    let res = client
        .delete(format!("{}/drinks/{}", base, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["deleted"], json!(id));

    // Gone from the listing
    let res = client.get(format!("{}/drinks", base)).send().await?;
    let body = res.json::<Value>().await?;
    assert!(body["drinks"]
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["id"].as_i64() != Some(id)));

    // Deleting again is 404, not success
    let res = client
        .delete(format!("{}/drinks/{}", base, id))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn create_rejects_missing_fields() -> Result<()> {
    if !common::database_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let token = common::token_with_permissions(ALL_SCOPES);

    // No title
    let res = client
        .post(format!("{}/drinks", server.base_url))
        .bearer_auth(&token)
        .json(&json!({"recipe": [{"color": "red", "parts": 2}]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["error"], json!(400));

    // Empty title
    let res = client
        .post(format!("{}/drinks", server.base_url))
        .bearer_auth(&token)
        .json(&json!({"title": "  ", "recipe": [{"color": "red", "parts": 2}]}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // No recipe
    let res = client
        .post(format!("{}/drinks", server.base_url))
        .bearer_auth(&token)
        .json(&json!({"title": "Just A Name"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
