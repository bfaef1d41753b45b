//! # Catalog Module
//!
//! The product operations behind every bot command. Each operation reloads
//! the full product set from the store, applies one change, and writes the
//! set back when it mutated anything.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::errors::StorageError;
use crate::product::{next_product_id, Product, ProductDraft};
use crate::selector::SelectorId;
use crate::store::JsonFileStore;

/// Maximum number of product buttons per keyboard row
pub const STOCK_ROW_SIZE: usize = 5;

/// Outcome of a command, rendered by the bot layer
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Welcome,
    Help,
    Added { id: i64 },
    Updated { id: i64 },
    NotFound { id: i64 },
    Removed { id: i64 },
    Listing(Vec<Product>),
    Stock(StockView),
}

/// A product button in the stock view
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub label: String,
    pub id: SelectorId,
}

/// Product buttons grouped into rows of at most [`STOCK_ROW_SIZE`]
#[derive(Debug, Clone, PartialEq)]
pub struct StockView {
    pub rows: Vec<Vec<Selector>>,
}

impl StockView {
    /// Group products into button rows in store order.
    ///
    /// An empty product set still produces one empty row.
    pub fn from_products(products: &[Product]) -> Self {
        let selectors: Vec<Selector> = products
            .iter()
            .map(|p| Selector {
                label: p.name.clone(),
                id: SelectorId(p.id),
            })
            .collect();

        let mut rows: Vec<Vec<Selector>> = selectors
            .chunks(STOCK_ROW_SIZE)
            .map(|chunk| chunk.to_vec())
            .collect();
        if rows.is_empty() {
            rows.push(Vec::new());
        }

        Self { rows }
    }
}

/// Single-product card shown when a stock button is clicked
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub id: i64,
    pub price: f64,
    pub description: String,
}

impl From<&Product> for DetailView {
    fn from(product: &Product) -> Self {
        Self {
            title: product.name.clone(),
            id: product.id,
            price: product.price,
            description: product.description.clone(),
        }
    }
}

/// Product operations over a [`JsonFileStore`].
///
/// Mutations within this process are serialized so two concurrent commands
/// cannot interleave their load and save. Other processes writing the same
/// file are not coordinated with.
#[derive(Debug)]
pub struct Catalog {
    store: JsonFileStore,
    write_lock: Mutex<()>,
}

impl Catalog {
    pub fn new(store: JsonFileStore) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }

    /// Append a new product with the next free id
    pub async fn add_product(&self, draft: ProductDraft) -> Result<Reply, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load().await?;

        let Some(id) = next_product_id(&products) else {
            warn!("Product id space exhausted");
            return Err(StorageError::IdSpaceExhausted);
        };
        products.push(draft.into_product(id));
        self.store.save(&products).await?;

        info!(product_id = id, "Product added");
        Ok(Reply::Added { id })
    }

    /// Overwrite name, price and description of an existing product
    pub async fn edit_product(&self, id: i64, draft: ProductDraft) -> Result<Reply, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.store.load().await?;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            debug!(product_id = id, "Edit target not found");
            return Ok(Reply::NotFound { id });
        };
        product.apply(draft);
        self.store.save(&products).await?;

        info!(product_id = id, "Product updated");
        Ok(Reply::Updated { id })
    }

    /// Drop the product with this id; succeeds whether or not it existed
    pub async fn remove_product(&self, id: i64) -> Result<Reply, StorageError> {
        let _guard = self.write_lock.lock().await;
        let products = self.store.load().await?;

        let before = products.len();
        let remaining: Vec<Product> = products.into_iter().filter(|p| p.id != id).collect();
        self.store.save(&remaining).await?;

        info!(
            product_id = id,
            removed = before - remaining.len(),
            "Product removal processed"
        );
        Ok(Reply::Removed { id })
    }

    pub async fn list_products(&self) -> Result<Reply, StorageError> {
        let products = self.store.load().await?;
        Ok(Reply::Listing(products))
    }

    pub async fn stock(&self) -> Result<Reply, StorageError> {
        let products = self.store.load().await?;
        Ok(Reply::Stock(StockView::from_products(&products)))
    }

    /// Detail card for a clicked stock button, `None` if the product is gone
    pub async fn select_product(&self, id: SelectorId) -> Result<Option<DetailView>, StorageError> {
        let products = self.store.load().await?;
        Ok(products
            .iter()
            .find(|p| p.id == id.id())
            .map(DetailView::from))
    }
}
