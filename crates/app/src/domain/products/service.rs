//! Products service.

use async_trait::async_trait;
use mockall::automock;
use trolley::stock;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, PriceRange, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products_by_name(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products_by_name(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn search_products(
        &self,
        keyword: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let keyword = keyword.trim();

        if keyword.is_empty() {
            return self.list_products().await;
        }

        let mut tx = self.db.begin().await?;

        let products = self.repository.search_products(&mut tx, keyword).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn find_products_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .find_products_by_name(&mut tx, name.trim())
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_products_in_price_range(
        &self,
        range: PriceRange,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self
            .repository
            .list_products_in_price_range(&mut tx, range.min(), range.max())
            .await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn list_in_stock_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_in_stock_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn has_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<bool, ProductsServiceError> {
        let product = self.get_product(product).await?;

        Ok(stock::has_stock(product.stock, quantity))
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        product.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_product(&mut tx, &product).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn set_stock(
        &self,
        product: ProductUuid,
        stock: u32,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self.repository.set_stock(&mut tx, product, stock).await?;

        tx.commit().await?;

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products in the order they were added.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieves all products sorted by name.
    async fn list_products_by_name(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Case-insensitive substring search over name and description.
    ///
    /// A blank keyword lists every product.
    async fn search_products(
        &self,
        keyword: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Case-insensitive substring search over the name only.
    async fn find_products_by_name(
        &self,
        name: &str,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Products priced within the range, both ends included.
    async fn list_products_in_price_range(
        &self,
        range: PriceRange,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Products with at least one unit in stock.
    async fn list_in_stock_products(&self) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Whether the product currently has `quantity` units available.
    async fn has_stock(
        &self,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<bool, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's name, description, price and image.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Overwrites the stock level.
    async fn set_stock(
        &self,
        product: ProductUuid,
        stock: u32,
    ) -> Result<ProductRecord, ProductsServiceError>;
}
