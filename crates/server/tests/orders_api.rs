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

    let app = build_router(ServiceKind::Orders, AppState { db });
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
async fn e2e_order_create_and_fetch() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();
    let number = format!("ORD-{}", Uuid::new_v4().simple());
    let user_id = Uuid::new_v4();

    let res = c
        .post(format!("{}/api/orders", app.base_url))
        .json(&json!({
            "order_number": number,
            "user_id": user_id,
            "sku": "SKU-9",
            "quantity": 2,
            "price_at_order": 19.99,
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    assert_eq!(created["order_number"], number);
    assert_eq!(created["price_at_order"], 19.99);
    let id = created["id"].as_str().expect("id");

    let res = c.get(format!("{}/api/orders/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);

    let res = c
        .get(format!("{}/api/orders/number/{}", app.base_url, number))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched["id"], id);

    // Orders are immutable: no mutation routes exist
    let res = c
        .patch(format!("{}/api/orders/{}", app.base_url, id))
        .json(&json!({"quantity": 99}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::METHOD_NOT_ALLOWED);
    let res = c.delete(format!("{}/api/orders/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn e2e_duplicate_order_number_conflicts() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();
    let number = format!("ORD-{}", Uuid::new_v4().simple());
    let body = json!({
        "order_number": number,
        "user_id": Uuid::new_v4(),
        "sku": "SKU-9",
        "quantity": 1,
        "price_at_order": 5.0,
    });

    let res = c.post(format!("{}/api/orders", app.base_url)).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    let res = c.post(format!("{}/api/orders", app.base_url)).json(&body).send().await?;
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
        .post(format!("{}/api/orders", app.base_url))
        .json(&json!({"order_number": "ORD-MISSING", "sku": "SKU-9"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    Ok(())
}
