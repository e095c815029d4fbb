use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::{build_router, ServiceKind};
use server::state::AppState;

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");

    if std::env::var("DATABASE_URL").is_err() || std::env::var("SKIP_DB_TESTS").is_ok() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {}", e);
    }

    let app = build_router(ServiceKind::Users, AppState { db });
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

#[tokio::test]
async fn e2e_user_crud_roundtrip() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();
    let name = format!("tester_{}", Uuid::new_v4().simple());
    let email = format!("user_{}@example.com", Uuid::new_v4().simple());

    // Create
    let res = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"name": name, "email": email}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["email"], email);

    // Lookup by id and by name
    let res = c.get(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c
        .get(format!("{}/api/users/name/{}", app.base_url, name))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // Partial patch: only the name changes
    let res = c
        .patch(format!("{}/api/users/{}", app.base_url, id))
        .json(&json!({"name": "Renamed"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let patched = res.json::<serde_json::Value>().await?;
    assert_eq!(patched["name"], "Renamed");
    assert_eq!(patched["email"], email);

    // Delete; a second delete reports absence
    let res = c.delete(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = c.delete(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(format!("{}/api/users/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_email_case_insensitive_conflict() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();
    let local = format!("case_{}", Uuid::new_v4().simple());

    let res = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"name": "First", "email": format!("{}@example.com", local)}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"name": "Second", "email": format!("{}@EXAMPLE.COM", local.to_uppercase())}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn e2e_patch_email_uniqueness_rules() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();
    let email_a = format!("a_{}@example.com", Uuid::new_v4().simple());
    let email_b = format!("b_{}@example.com", Uuid::new_v4().simple());

    let a = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"name": "A", "email": email_a}))
        .send()
        .await?
        .json::<serde_json::Value>()
        .await?;
    let _b = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"name": "B", "email": email_b}))
        .send()
        .await?;
    let a_id = a["id"].as_str().expect("id");

    // Re-asserting the current email is not a conflict
    let res = c
        .patch(format!("{}/api/users/{}", app.base_url, a_id))
        .json(&json!({"email": email_a}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    // Taking another user's email is
    let res = c
        .patch(format!("{}/api/users/{}", app.base_url, a_id))
        .json(&json!({"email": email_b}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn e2e_create_missing_fields_is_rejected() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"name": "No Email"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .post(format!("{}/api/users", app.base_url))
        .json(&json!({"email": "nobody@example.com"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn e2e_paginated_listing_honors_per_page() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();

    for i in 0..2 {
        let res = c
            .post(format!("{}/api/users", app.base_url))
            .json(&json!({
                "name": format!("Page {}", Uuid::new_v4().simple()),
                "email": format!("page{}_{}@example.com", i, Uuid::new_v4().simple()),
            }))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::CREATED);
    }

    let res = c
        .get(format!("{}/api/users?page=1&per_page=1", app.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let page = res.json::<Vec<serde_json::Value>>().await?;
    assert_eq!(page.len(), 1);
    Ok(())
}
