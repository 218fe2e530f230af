//! HTTP-level tests for the listing envelope, filters and visibility gating.

mod common;

use common::{body_json, TestApp};
use serde_json::json;
use sqlx::PgPool;

async fn seed_companies(app: &TestApp, admin: &str) {
    for (name, category, approved) in [
        ("Padaria Sol", "alimentacao", true),
        ("Pizzaria Lua", "alimentacao", false),
        ("Oficina Dois Irmãos", "servicos", true),
    ] {
        let created = body_json(
            app.post_json("/api/v1/companies", json!({"name": name, "category": category}))
                .await,
        )
        .await;
        if approved {
            let id = created["data"]["id"].as_i64().unwrap();
            app.put_as(&format!("/api/v1/admin/companies/{id}/approve"), admin)
                .await;
        }
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn anonymous_listing_only_shows_approved(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = app.admin_token().await;
    seed_companies(&app, &admin).await;

    let json = body_json(app.get("/api/v1/companies").await).await;
    assert_eq!(json["data"]["total"], 2);
    assert!(json["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["approved"] == true));

    let json = body_json(app.get("/api/v1/companies?approved_only=false").await).await;
    assert_eq!(json["data"]["total"], 2, "non-admins cannot lift the gate");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admins_may_list_unapproved(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = app.admin_token().await;
    seed_companies(&app, &admin).await;

    let json = body_json(
        app.get_as("/api/v1/companies?approved_only=false", &admin)
            .await,
    )
    .await;
    assert_eq!(json["data"]["total"], 3);

    let json = body_json(app.get_as("/api/v1/companies", &admin).await).await;
    assert_eq!(json["data"]["total"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn category_and_search_filters_combine(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = app.admin_token().await;
    seed_companies(&app, &admin).await;

    let json = body_json(
        app.get_as(
            "/api/v1/companies?approved_only=false&category=alimentacao&search=Lua",
            &admin,
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["name"], "Pizzaria Lua");

    let json = body_json(app.get("/api/v1/companies?search=%25").await).await;
    assert_eq!(json["data"]["total"], 0, "wildcards match literally");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn envelope_counts_and_past_last_page(pool: PgPool) {
    let app = common::build_test_app(pool);
    for i in 0..12 {
        app.post_json(
            "/api/v1/jobs",
            json!({"title": format!("Vaga {i}"), "company_name": "Prefeitura", "description": "Concurso"}),
        )
        .await;
    }

    let json = body_json(app.get("/api/v1/jobs?per_page=5&page=2").await).await;
    let data = &json["data"];
    assert_eq!(data["total"], 12);
    assert_eq!(data["pages"], 3);
    assert_eq!(data["current_page"], 2);
    assert_eq!(data["per_page"], 5);
    assert_eq!(data["items"].as_array().unwrap().len(), 5);

    let json = body_json(app.get("/api/v1/jobs?per_page=5&page=9").await).await;
    assert_eq!(json["data"]["items"], json!([]));
    assert_eq!(json["data"]["total"], 12);
    assert_eq!(json["data"]["pages"], 3);

    let json = body_json(app.get("/api/v1/jobs?per_page=0&page=-3").await).await;
    assert_eq!(json["data"]["per_page"], 1);
    assert_eq!(json["data"]["current_page"], 1);
    assert_eq!(json["data"]["pages"], 12);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_listing_has_zero_pages(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(app.get("/api/v1/news").await).await;
    assert_eq!(json["data"]["total"], 0);
    assert_eq!(json["data"]["pages"], 0);
    assert_eq!(json["data"]["current_page"], 1);
    assert_eq!(json["data"]["per_page"], 10);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn featured_jobs_come_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = app.admin_token().await;
    let mut ids = Vec::new();
    for title in ["Antiga", "Destaque", "Recente"] {
        let json = body_json(
            app.post_json(
                "/api/v1/jobs",
                json!({"title": title, "company_name": "Mercado", "description": "Vaga"}),
            )
            .await,
        )
        .await;
        ids.push(json["data"]["id"].as_i64().unwrap());
    }
    app.put_json_as(
        &format!("/api/v1/jobs/{}", ids[1]),
        json!({"featured": true}),
        &admin,
    )
    .await;

    let json = body_json(app.get("/api/v1/jobs").await).await;
    let titles: Vec<&str> = json["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Destaque", "Recente", "Antiga"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn job_filters(pool: PgPool) {
    let app = common::build_test_app(pool);
    for (title, contract, location, active) in [
        ("Vendedor", "CLT", "Centro, Cabreúva", true),
        ("Designer", "PJ", "Jacaré", true),
        ("Estoquista", "CLT", "Centro", false),
    ] {
        app.post_json(
            "/api/v1/jobs",
            json!({
                "title": title,
                "company_name": "Loja",
                "description": "Vaga",
                "contract_type": contract,
                "location": location,
                "active": active,
            }),
        )
        .await;
    }

    let json = body_json(app.get("/api/v1/jobs?contract_type=CLT").await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "Vendedor");

    let json = body_json(app.get("/api/v1/jobs?location=Centro").await).await;
    assert_eq!(json["data"]["total"], 1);

    let json = body_json(app.get("/api/v1/jobs?search=Loja").await).await;
    assert_eq!(json["data"]["total"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn property_price_and_neighborhood_filters(pool: PgPool) {
    let app = common::build_test_app(pool);
    for (title, purpose, price, neighborhood, address) in [
        ("Casa térrea", "venda", 300000.0, "Centro", "Rua das Flores, 10"),
        ("Apartamento", "locacao", 1500.0, "Centro", "Avenida Brasil, 200"),
        ("Sítio", "venda", 900000.0, "Jardim São Francisco", "Estrada do Pinhal, km 4"),
    ] {
        app.post_json(
            "/api/v1/properties",
            json!({
                "title": title,
                "property_type": "casa",
                "purpose": purpose,
                "price": price,
                "neighborhood": neighborhood,
                "address": address,
            }),
        )
        .await;
    }

    let json = body_json(
        app.get("/api/v1/properties?min_price=1000&max_price=300000")
            .await,
    )
    .await;
    assert_eq!(json["data"]["total"], 2);

    let json = body_json(
        app.get("/api/v1/properties?purpose=venda&neighborhood=Jardim")
            .await,
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "Sítio");
    assert_eq!(json["data"]["items"][0]["photos"], json!([]));

    let json = body_json(app.get("/api/v1/properties?neighborhood=Centro").await).await;
    assert_eq!(json["data"]["total"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn property_search_covers_address(pool: PgPool) {
    let app = common::build_test_app(pool);
    for (title, address) in [
        ("Casa com quintal", "Rua das Palmeiras, 45"),
        ("Sobrado", "Avenida Central, 900"),
    ] {
        app.post_json(
            "/api/v1/properties",
            json!({
                "title": title,
                "property_type": "casa",
                "purpose": "venda",
                "price": 250000.0,
                "address": address,
            }),
        )
        .await;
    }

    let json = body_json(app.get("/api/v1/properties?search=Palmeiras").await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "Casa com quintal");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_query_values_use_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = app.admin_token().await;
    seed_companies(&app, &admin).await;

    let response = app
        .get("/api/v1/companies?page=&per_page=&category=&approved_only=&search=")
        .await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(json["data"]["current_page"], 1);
    assert_eq!(json["data"]["per_page"], 10);

    let json = body_json(
        app.get_as("/api/v1/companies?approved_only=False", &admin)
            .await,
    )
    .await;
    assert_eq!(json["data"]["total"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_path_id_is_a_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = app.get("/api/v1/companies/abc").await;
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unpublished_news_is_hidden_from_anonymous_listing(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = app.admin_token().await;
    for (title, published) in [("Publicada", true), ("Rascunho", false)] {
        app.post_json_as(
            "/api/v1/news",
            json!({
                "title": title,
                "content": "Texto",
                "category": "cultura",
                "author": "Redação",
                "published": published,
            }),
            &admin,
        )
        .await;
    }

    let json = body_json(app.get("/api/v1/news").await).await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["title"], "Publicada");

    let json = body_json(app.get_as("/api/v1/news?published_only=false", &admin).await).await;
    assert_eq!(json["data"]["total"], 2);
}
