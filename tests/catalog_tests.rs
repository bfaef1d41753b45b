use anyhow::Result;
use catalog_bot::catalog::{Catalog, Reply, STOCK_ROW_SIZE};
use catalog_bot::errors::StorageError;
use catalog_bot::product::{Product, ProductDraft};
use catalog_bot::selector::SelectorId;
use catalog_bot::store::{init_storage, JsonFileStore};
use std::sync::Arc;
use tempfile::TempDir;

async fn setup_catalog() -> Result<(Catalog, TempDir)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("products.json");
    init_storage(&path).await?;
    Ok((Catalog::new(JsonFileStore::new(path)), dir))
}

fn draft(name: &str, price: f64, description: &str) -> ProductDraft {
    ProductDraft::new(name, price, description)
}

async fn stored(catalog: &Catalog) -> Result<Vec<Product>> {
    Ok(catalog.store().load().await?)
}

#[tokio::test]
async fn test_sequential_ids_from_empty_store() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;

    for expected in 1..=5 {
        let reply = catalog
            .add_product(draft(&format!("Item {expected}"), 1.0, ""))
            .await?;
        assert_eq!(reply, Reply::Added { id: expected });
    }

    let ids: Vec<i64> = stored(&catalog).await?.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    Ok(())
}

#[tokio::test]
async fn test_add_after_removing_middle_id() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    for name in ["a", "b", "c"] {
        catalog.add_product(draft(name, 1.0, "")).await?;
    }

    catalog.remove_product(2).await?;
    let reply = catalog.add_product(draft("d", 1.0, "")).await?;

    assert_eq!(reply, Reply::Added { id: 4 });
    Ok(())
}

#[tokio::test]
async fn test_remove_missing_id_is_idempotent() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    catalog.add_product(draft("Widget", 9.99, "A widget")).await?;
    let before = stored(&catalog).await?;

    let reply = catalog.remove_product(42).await?;

    assert_eq!(reply, Reply::Removed { id: 42 });
    assert_eq!(stored(&catalog).await?, before);
    Ok(())
}

#[tokio::test]
async fn test_edit_missing_id_reports_not_found() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    catalog.add_product(draft("Widget", 9.99, "A widget")).await?;
    let before = stored(&catalog).await?;

    let reply = catalog.edit_product(7, draft("Ghost", 0.0, "")).await?;

    assert_eq!(reply, Reply::NotFound { id: 7 });
    assert_eq!(stored(&catalog).await?, before);
    Ok(())
}

#[tokio::test]
async fn test_edit_overwrites_every_field() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    catalog.add_product(draft("Widget", 9.99, "A widget")).await?;
    catalog.add_product(draft("Gadget", 4.5, "A gadget")).await?;

    let reply = catalog.edit_product(1, draft("Widget", -1.0, "")).await?;

    assert_eq!(reply, Reply::Updated { id: 1 });
    let products = stored(&catalog).await?;
    assert_eq!(products[0], draft("Widget", -1.0, "").into_product(1));
    assert_eq!(products[1], draft("Gadget", 4.5, "A gadget").into_product(2));
    Ok(())
}

#[tokio::test]
async fn test_list_preserves_store_order() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    assert_eq!(catalog.list_products().await?, Reply::Listing(Vec::new()));

    catalog.add_product(draft("First", 1.0, "")).await?;
    catalog.add_product(draft("Second", 2.0, "")).await?;

    match catalog.list_products().await? {
        Reply::Listing(products) => {
            let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["First", "Second"]);
        }
        other => panic!("Unexpected reply: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_stock_row_groups() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    let mut added = 0;

    for (target, expected_rows) in [(0, 1), (4, 1), (5, 1), (6, 2), (11, 3)] {
        while added < target {
            added += 1;
            catalog
                .add_product(draft(&format!("P{added}"), 1.0, ""))
                .await?;
        }

        let Reply::Stock(view) = catalog.stock().await? else {
            panic!("stock did not return a stock view");
        };
        assert_eq!(view.rows.len(), expected_rows, "{target} products");
        assert!(view.rows.iter().all(|row| row.len() <= STOCK_ROW_SIZE));
        assert_eq!(view.rows.iter().map(Vec::len).sum::<usize>(), target);
    }
    Ok(())
}

#[tokio::test]
async fn test_select_product() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    catalog.add_product(draft("Widget", 9.99, "A widget")).await?;

    let detail = catalog
        .select_product(SelectorId(1))
        .await?
        .expect("product 1 exists");
    assert_eq!(detail.title, "Widget");
    assert_eq!(detail.id, 1);
    assert_eq!(detail.price, 9.99);
    assert_eq!(detail.description, "A widget");

    assert!(catalog.select_product(SelectorId(2)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_example_scenario() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;

    catalog.add_product(draft("Widget", 9.99, "A widget")).await?;
    catalog.add_product(draft("Gadget", 4.5, "A gadget")).await?;
    catalog
        .edit_product(1, draft("Widget Pro", 12.99, "Improved widget"))
        .await?;
    catalog.remove_product(2).await?;

    assert_eq!(
        stored(&catalog).await?,
        vec![draft("Widget Pro", 12.99, "Improved widget").into_product(1)]
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_store_fails_every_operation() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    tokio::fs::write(catalog.store().path(), "not json").await?;

    assert!(matches!(
        catalog.add_product(draft("Widget", 1.0, "")).await,
        Err(StorageError::Malformed { .. })
    ));
    assert!(matches!(
        catalog.list_products().await,
        Err(StorageError::Malformed { .. })
    ));
    assert!(matches!(
        catalog.select_product(SelectorId(1)).await,
        Err(StorageError::Malformed { .. })
    ));

    // Nothing was overwritten by the failed add
    let content = tokio::fs::read_to_string(catalog.store().path()).await?;
    assert_eq!(content, "not json");
    Ok(())
}

#[tokio::test]
async fn test_missing_store_file_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let catalog = Catalog::new(JsonFileStore::new(dir.path().join("absent.json")));

    assert!(matches!(
        catalog.stock().await,
        Err(StorageError::Read { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_adds_do_not_lose_updates() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    let catalog = Arc::new(catalog);

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move { catalog.add_product(draft(&format!("P{i}"), 1.0, "")).await })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let mut ids: Vec<i64> = stored(&catalog).await?.iter().map(|p| p.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    Ok(())
}

#[tokio::test]
async fn test_add_fails_when_id_space_is_exhausted() -> Result<()> {
    let (catalog, _dir) = setup_catalog().await?;
    let top = draft("Last", 1.0, "").into_product(i64::MAX);
    catalog.store().save(std::slice::from_ref(&top)).await?;
    let before = tokio::fs::read_to_string(catalog.store().path()).await?;

    let err = catalog.add_product(draft("Overflow", 2.0, "")).await.unwrap_err();
    assert!(matches!(err, StorageError::IdSpaceExhausted));
    assert!(err.to_string().contains(&i64::MAX.to_string()));

    // The file is left exactly as it was
    let after = tokio::fs::read_to_string(catalog.store().path()).await?;
    assert_eq!(before, after);
    assert_eq!(stored(&catalog).await?, vec![top]);
    Ok(())
}
