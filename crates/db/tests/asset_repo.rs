//! Integration tests for the asset repository.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Created rows read back with exactly the submitted values
//! - Soft-deleted assets are hidden from listing but still readable by id
//! - Uniqueness spans soft-deleted rows and honours the excluded id
//! - Search and type filter compose as `(name OR symbol OR description) AND type`

use assetdesk_core::asset_type::AssetType;
use assetdesk_core::listing::ListQuery;
use assetdesk_core::validation::AssetFields;
use assetdesk_db::models::asset::{unique_violation, UniqueColumn};
use assetdesk_db::repositories::AssetRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn fields(name: &str, symbol: &str, asset_type: AssetType, description: &str) -> AssetFields {
    AssetFields {
        name: name.to_string(),
        symbol: symbol.to_string(),
        asset_type,
        decimals: 8,
        description: description.to_string(),
        website: None,
        twitter: None,
        discord: None,
        telegram: None,
    }
}

fn search(text: &str) -> ListQuery {
    ListQuery::new(Some(text), None, None, None)
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_then_find_returns_submitted_values(pool: PgPool) {
    let mut input = fields("Bitcoin", "BTC", AssetType::Token, "Digital gold");
    input.website = Some("https://bitcoin.org".to_string());

    let created = AssetRepo::create(&pool, &input, Some("logos/btc.png"))
        .await
        .unwrap();
    let found = AssetRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("asset should exist");

    assert_eq!(found, created);
    assert_eq!(found.name, "Bitcoin");
    assert_eq!(found.symbol, "BTC");
    assert_eq!(found.asset_type, AssetType::Token);
    assert_eq!(found.decimals, 8);
    assert_eq!(found.logo.as_deref(), Some("logos/btc.png"));
    assert_eq!(found.description, "Digital gold");
    assert_eq!(found.website.as_deref(), Some("https://bitcoin.org"));
    assert!(found.deleted_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_stored_type_is_rejected_on_read(pool: PgPool) {
    let created = AssetRepo::create(&pool, &fields("Euro", "EUR", AssetType::Fiat, "EU"), None)
        .await
        .unwrap();

    // Bypass the CHECK constraint to simulate a drifted row.
    sqlx::query("ALTER TABLE assets DROP CONSTRAINT ck_assets_asset_type")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE assets SET asset_type = 'bond' WHERE id = $1")
        .bind(created.id)
        .execute(&pool)
        .await
        .unwrap();

    let result = AssetRepo::find_by_id(&pool, created.id).await;
    assert!(matches!(result, Err(sqlx::Error::Decode(_))));
}

// ---------------------------------------------------------------------------
// Soft delete / restore
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_hides_from_list_but_not_from_find(pool: PgPool) {
    let asset = AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();

    assert!(AssetRepo::soft_delete(&pool, asset.id).await.unwrap());

    let (items, total) = AssetRepo::list(&pool, &ListQuery::default()).await.unwrap();
    assert!(items.iter().all(|a| a.id != asset.id));
    assert_eq!(total, 0);

    let found = AssetRepo::find_by_id(&pool, asset.id).await.unwrap().unwrap();
    assert!(found.deleted_at.is_some());
    assert!(AssetRepo::find_active_by_id(&pool, asset.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_is_idempotent(pool: PgPool) {
    let asset = AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();

    assert!(AssetRepo::soft_delete(&pool, asset.id).await.unwrap());
    assert!(
        !AssetRepo::soft_delete(&pool, asset.id).await.unwrap(),
        "second soft_delete should return false"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_skips_soft_deleted_rows(pool: PgPool) {
    let input = fields("Bitcoin", "BTC", AssetType::Token, "x");
    let asset = AssetRepo::create(&pool, &input, None).await.unwrap();
    AssetRepo::soft_delete(&pool, asset.id).await.unwrap();

    let updated = AssetRepo::update(&pool, asset.id, &input, None).await.unwrap();
    assert!(updated.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_makes_asset_listable_again(pool: PgPool) {
    let asset = AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();

    assert!(!AssetRepo::restore(&pool, asset.id).await.unwrap(), "active row cannot be restored");

    AssetRepo::soft_delete(&pool, asset.id).await.unwrap();
    assert!(AssetRepo::restore(&pool, asset.id).await.unwrap());

    let (items, _) = AssetRepo::list(&pool, &ListQuery::default()).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, asset.id);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_fields_and_bumps_updated_at(pool: PgPool) {
    let asset = AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();

    // NOW() is the transaction start time; make sure the update happens later.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let mut input = fields("Bitcoin Cash", "BCH", AssetType::Token, "fork");
    input.decimals = 18;
    let updated = AssetRepo::update(&pool, asset.id, &input, Some("https://x.test/bch.png"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Bitcoin Cash");
    assert_eq!(updated.symbol, "BCH");
    assert_eq!(updated.decimals, 18);
    assert_eq!(updated.logo.as_deref(), Some("https://x.test/bch.png"));
    assert_eq!(updated.created_at, asset.created_at);
    assert!(updated.updated_at > asset.updated_at);
}

// ---------------------------------------------------------------------------
// Uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uniqueness_lookups_honour_excluded_id(pool: PgPool) {
    let btc = AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();

    assert!(AssetRepo::name_taken(&pool, "Bitcoin", None).await.unwrap());
    assert!(AssetRepo::symbol_taken(&pool, "BTC", None).await.unwrap());
    assert!(!AssetRepo::name_taken(&pool, "Bitcoin", Some(btc.id)).await.unwrap());
    assert!(!AssetRepo::symbol_taken(&pool, "BTC", Some(btc.id)).await.unwrap());
    assert!(!AssetRepo::name_taken(&pool, "Ethereum", None).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_deleted_rows_keep_their_name_reserved(pool: PgPool) {
    let btc = AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();
    AssetRepo::soft_delete(&pool, btc.id).await.unwrap();

    assert!(AssetRepo::name_taken(&pool, "Bitcoin", None).await.unwrap());

    let err = AssetRepo::create(&pool, &fields("Bitcoin", "XBT", AssetType::Token, "x"), None)
        .await
        .unwrap_err();
    assert_eq!(unique_violation(&err), Some(UniqueColumn::Name));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_symbol_insert_names_the_symbol_constraint(pool: PgPool) {
    AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();

    let err = AssetRepo::create(&pool, &fields("Bitcoin Two", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap_err();
    assert_eq!(unique_violation(&err), Some(UniqueColumn::Symbol));
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_orders_by_name(pool: PgPool) {
    for (name, symbol) in [("Cardano", "ADA"), ("Aave", "AAVE"), ("Bitcoin", "BTC")] {
        AssetRepo::create(&pool, &fields(name, symbol, AssetType::Token, "x"), None)
            .await
            .unwrap();
    }

    let (items, total) = AssetRepo::list(&pool, &ListQuery::default()).await.unwrap();
    let names: Vec<_> = items.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Aave", "Bitcoin", "Cardano"]);
    assert_eq!(total, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_description_only_hit(pool: PgPool) {
    let gold = AssetRepo::create(
        &pool,
        &fields("Bitcoin", "BTC", AssetType::Token, "Digital gold"),
        None,
    )
    .await
    .unwrap();
    AssetRepo::create(&pool, &fields("Ethereum", "ETH", AssetType::Token, "World computer"), None)
        .await
        .unwrap();

    let (items, total) = AssetRepo::list(&pool, &search("GOLD")).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, gold.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_symbol(pool: PgPool) {
    AssetRepo::create(&pool, &fields("Tether", "USDT", AssetType::Stablecoin, "x"), None)
        .await
        .unwrap();

    let (items, _) = AssetRepo::list(&pool, &search("usd")).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].symbol, "USDT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_and_type_filter_are_both_required(pool: PgPool) {
    // Matches search, wrong type (hit via description, the last OR branch).
    AssetRepo::create(
        &pool,
        &fields("Euro", "EUR", AssetType::Fiat, "Dollar alternative"),
        None,
    )
    .await
    .unwrap();
    // Right type, does not match search.
    AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "gold"), None)
        .await
        .unwrap();
    // Matches both.
    let usdc = AssetRepo::create(
        &pool,
        &fields("USD Coin", "USDC", AssetType::Stablecoin, "Dollar backed"),
        None,
    )
    .await
    .unwrap();
    // Right type, matches via name (first OR branch) only.
    let dai = AssetRepo::create(&pool, &fields("Dollar Dai", "DAI", AssetType::Token, "x"), None)
        .await
        .unwrap();

    let query = ListQuery::new(Some("dollar"), Some(AssetType::Stablecoin), None, None);
    let (items, total) = AssetRepo::list(&pool, &query).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, usdc.id);

    let query = ListQuery::new(Some("dollar"), Some(AssetType::Token), None, None);
    let (items, _) = AssetRepo::list(&pool, &query).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, dai.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_treats_wildcards_literally(pool: PgPool) {
    AssetRepo::create(&pool, &fields("Yield 100%", "Y100", AssetType::Token, "x"), None)
        .await
        .unwrap();
    AssetRepo::create(&pool, &fields("Yield 1000", "Y1000", AssetType::Token, "x"), None)
        .await
        .unwrap();

    let (items, _) = AssetRepo::list(&pool, &search("100%")).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].symbol, "Y100");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates_with_total(pool: PgPool) {
    for i in 0..12 {
        AssetRepo::create(
            &pool,
            &fields(&format!("Asset {i:02}"), &format!("A{i:02}"), AssetType::Token, "x"),
            None,
        )
        .await
        .unwrap();
    }

    let query = ListQuery::new(None, None, Some(2), Some(10));
    let (items, total) = AssetRepo::list(&pool, &query).await.unwrap();
    assert_eq!(total, 12);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Asset 10");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_all_includes_soft_deleted(pool: PgPool) {
    let a = AssetRepo::create(&pool, &fields("Bitcoin", "BTC", AssetType::Token, "x"), None)
        .await
        .unwrap();
    AssetRepo::create(&pool, &fields("Ethereum", "ETH", AssetType::Token, "x"), None)
        .await
        .unwrap();
    AssetRepo::soft_delete(&pool, a.id).await.unwrap();

    let all = AssetRepo::list_all_including_deleted(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(AssetRepo::count_active(&pool).await.unwrap(), 1);
}
