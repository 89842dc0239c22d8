use std::sync::Arc;

use tracing::info;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::{NewProduct, Product};
use crate::domain::repositories::ProductRepository;
use crate::domain::timeouts::{bounded, OperationTimeouts};

/// Read access to the product catalog plus the admin insert
#[derive(Clone)]
pub struct Catalog {
    products: Arc<dyn ProductRepository>,
    timeouts: OperationTimeouts,
}

impl Catalog {
    pub fn new(products: Arc<dyn ProductRepository>, timeouts: OperationTimeouts) -> Self {
        Self { products, timeouts }
    }

    pub async fn add_product(&self, new_product: NewProduct) -> DomainResult<Product> {
        if new_product.name.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "product name is required".to_string(),
            ));
        }

        let product = Product::create(new_product);
        bounded(self.timeouts.long, "add_product", async {
            self.products.insert(&product).await?;
            Ok(())
        })
        .await?;

        info!(product = %product.id, name = %product.name, "added product");
        Ok(product)
    }

    pub async fn list(&self) -> DomainResult<Vec<Product>> {
        bounded(self.timeouts.long, "list_products", async {
            Ok(self.products.find_all().await?)
        })
        .await
    }

    /// Products whose name matches `query` as a regular expression
    pub async fn search(&self, query: &str) -> DomainResult<Vec<Product>> {
        if query.is_empty() {
            return Err(DomainError::InvalidArgument(
                "Invalid search index".to_string(),
            ));
        }

        bounded(self.timeouts.long, "search_products", async {
            Ok(self.products.search_by_name(query).await?)
        })
        .await
    }
}
