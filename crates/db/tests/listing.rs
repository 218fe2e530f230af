//! Integration tests for the shared listing engine: visibility gating,
//! filters, search, ordering and the page envelope.

use cityguide_core::pagination::PageRequest;
use cityguide_db::listing::ListQuery;
use cityguide_db::models::company::{CreateCompany, UpdateCompany};
use cityguide_db::models::job::CreateJob;
use cityguide_db::models::property::CreateProperty;
use cityguide_db::repositories::{CompanyRepo, JobRepo, PropertyRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_company(name: &str, category: &str) -> CreateCompany {
    CreateCompany {
        name: name.to_string(),
        description: None,
        category: category.to_string(),
        address: None,
        phone: None,
        email: None,
        website: None,
        plan: None,
    }
}

fn new_job(title: &str, company_name: &str) -> CreateJob {
    CreateJob {
        title: title.to_string(),
        company_name: company_name.to_string(),
        description: "Vaga em tempo integral".to_string(),
        location: Some("Centro, Cabreúva".to_string()),
        salary: None,
        contract_type: Some("CLT".to_string()),
        category: Some("vendas".to_string()),
        active: None,
        contact_email: None,
        contact_phone: None,
    }
}

fn new_property(title: &str, purpose: &str, price: f64) -> CreateProperty {
    CreateProperty {
        title: title.to_string(),
        description: None,
        property_type: "casa".to_string(),
        purpose: purpose.to_string(),
        price,
        address: None,
        neighborhood: Some("Jacaré".to_string()),
        bedrooms: Some(2),
        bathrooms: Some(1),
        area: None,
        contact_name: None,
        contact_email: None,
        contact_phone: None,
        active: None,
    }
}

async fn approve(pool: &PgPool, id: i64) {
    CompanyRepo::set_approved(pool, id, true).await.unwrap().unwrap();
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_total_is_independent_of_page(pool: PgPool) {
    for i in 0..7 {
        let c = CompanyRepo::create(&pool, &new_company(&format!("Loja {i}"), "vendas"))
            .await
            .unwrap();
        approve(&pool, c.id).await;
    }

    let first = CompanyRepo::list(&pool, &ListQuery::new(PageRequest::new(Some(1), Some(3)), true))
        .await
        .unwrap();
    assert_eq!(first.total, 7);
    assert_eq!(first.pages, 3);
    assert_eq!(first.items.len(), 3);

    let last = CompanyRepo::list(&pool, &ListQuery::new(PageRequest::new(Some(3), Some(3)), true))
        .await
        .unwrap();
    assert_eq!(last.total, 7);
    assert_eq!(last.items.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_page_past_end_is_empty(pool: PgPool) {
    JobRepo::create(&pool, &new_job("Vendedor", "Mercado Bom"), true)
        .await
        .unwrap();

    let page = JobRepo::list(&pool, &ListQuery::new(PageRequest::new(Some(5), Some(10)), true))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 1);
    assert_eq!(page.pages, 1);
    assert_eq!(page.current_page, 5);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_empty_table_has_zero_pages(pool: PgPool) {
    let page = JobRepo::list(&pool, &ListQuery::new(PageRequest::default(), true))
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.pages, 0);
}

// ---------------------------------------------------------------------------
// Visibility and filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_visibility_gate(pool: PgPool) {
    let hidden = CompanyRepo::create(&pool, &new_company("Oculta", "vendas"))
        .await
        .unwrap();
    let shown = CompanyRepo::create(&pool, &new_company("Visivel", "vendas"))
        .await
        .unwrap();
    approve(&pool, shown.id).await;

    let public = CompanyRepo::list(&pool, &ListQuery::new(PageRequest::default(), true))
        .await
        .unwrap();
    assert_eq!(public.total, 1);
    assert_eq!(public.items[0].id, shown.id);

    let all = CompanyRepo::list(&pool, &ListQuery::new(PageRequest::default(), false))
        .await
        .unwrap();
    assert_eq!(all.total, 2);
    assert!(all.items.iter().any(|c| c.id == hidden.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_category_filter_and_search_combine(pool: PgPool) {
    let mut sol = new_company("Padaria Sol", "alimentacao");
    sol.description = Some("Pães artesanais".into());
    let sol = CompanyRepo::create(&pool, &sol).await.unwrap();
    let lua = CompanyRepo::create(&pool, &new_company("Padaria Lua", "alimentacao"))
        .await
        .unwrap();
    let oficina = CompanyRepo::create(&pool, &new_company("Oficina Sol", "servicos"))
        .await
        .unwrap();
    for id in [sol.id, lua.id, oficina.id] {
        approve(&pool, id).await;
    }

    let query = ListQuery::new(PageRequest::default(), true)
        .equals("category", Some("alimentacao".into()))
        .search(Some("Sol".into()));
    let page = CompanyRepo::list(&pool, &query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, sol.id);

    // Search matches the description too.
    let query = ListQuery::new(PageRequest::default(), true).search(Some("artesanais".into()));
    let page = CompanyRepo::list(&pool, &query).await.unwrap();
    assert_eq!(page.total, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_wildcards_match_literally(pool: PgPool) {
    let c = CompanyRepo::create(&pool, &new_company("Promo 50% off", "vendas"))
        .await
        .unwrap();
    approve(&pool, c.id).await;
    let other = CompanyRepo::create(&pool, &new_company("Promo 500 off", "vendas"))
        .await
        .unwrap();
    approve(&pool, other.id).await;

    let query = ListQuery::new(PageRequest::default(), true).search(Some("50%".into()));
    let page = CompanyRepo::list(&pool, &query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, c.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_job_search_covers_company_name(pool: PgPool) {
    JobRepo::create(&pool, &new_job("Caixa", "Supermercado Serra"), true)
        .await
        .unwrap();
    JobRepo::create(&pool, &new_job("Caixa", "Farmácia Central"), true)
        .await
        .unwrap();

    let query = ListQuery::new(PageRequest::default(), true).search(Some("Serra".into()));
    let page = JobRepo::list(&pool, &query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].company_name, "Supermercado Serra");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_job_location_is_substring_filter(pool: PgPool) {
    JobRepo::create(&pool, &new_job("Caixa", "Mercado"), true)
        .await
        .unwrap();

    let hit = ListQuery::new(PageRequest::default(), true).contains("location", Some("Centro".into()));
    assert_eq!(JobRepo::list(&pool, &hit).await.unwrap().total, 1);

    let miss = ListQuery::new(PageRequest::default(), true).contains("location", Some("Jacaré".into()));
    assert_eq!(JobRepo::list(&pool, &miss).await.unwrap().total, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_price_bounds_are_inclusive(pool: PgPool) {
    for price in [100_000.0, 250_000.0, 400_000.0] {
        PropertyRepo::create(&pool, &new_property("Casa", "venda", price), true)
            .await
            .unwrap();
    }
    PropertyRepo::create(&pool, &new_property("Apto", "locacao", 1_500.0), true)
        .await
        .unwrap();

    let query = ListQuery::new(PageRequest::default(), true)
        .equals("purpose", Some("venda".into()))
        .between("price", Some(100_000.0), Some(250_000.0));
    let page = PropertyRepo::list(&pool, &query).await.unwrap();
    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|p| p.price <= 250_000.0 && p.price >= 100_000.0));
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_featured_first_then_newest(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 0..4 {
        let c = CompanyRepo::create(&pool, &new_company(&format!("Loja {i}"), "vendas"))
            .await
            .unwrap();
        approve(&pool, c.id).await;
        ids.push(c.id);
    }
    // Feature the two oldest.
    for id in &ids[..2] {
        let update = UpdateCompany {
            featured: Some(true),
            ..Default::default()
        };
        CompanyRepo::update(&pool, *id, &update).await.unwrap().unwrap();
    }

    let page = CompanyRepo::list(&pool, &ListQuery::new(PageRequest::default(), true))
        .await
        .unwrap();
    let featured: Vec<bool> = page.items.iter().map(|c| c.featured).collect();
    assert_eq!(featured, vec![true, true, false, false]);

    for pair in page.items.windows(2) {
        if pair[0].featured == pair[1].featured {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }
    // Newest first within each group.
    assert_eq!(page.items[0].id, ids[1]);
    assert_eq!(page.items[2].id, ids[3]);
}
