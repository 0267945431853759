//! SeaORM implementation of ProductRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{DomainError, ProductFilter, ProductRepository, SupplierSnapshot};
use crate::models::product::{ActiveModel, Column, Entity as ProductEntity, ProductDto, ProductInput};

/// SeaORM-based implementation of ProductRepository
pub struct SeaOrmProductRepository {
    db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// JSON columns of a product form
struct Documents {
    product_name: String,
    description: String,
    sizes: String,
    colors: String,
    additional_image_urls: String,
    price_ranges: String,
}

impl Documents {
    fn encode(input: &ProductInput) -> Result<Self, DomainError> {
        Ok(Self {
            product_name: serde_json::to_string(&input.product_name)?,
            description: serde_json::to_string(&input.description)?,
            sizes: serde_json::to_string(&input.sizes)?,
            colors: serde_json::to_string(&input.colors)?,
            additional_image_urls: serde_json::to_string(&input.additional_image_urls)?,
            price_ranges: serde_json::to_string(&input.price_ranges)?,
        })
    }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_all(&self, filter: ProductFilter) -> Result<Vec<ProductDto>, DomainError> {
        let mut query = ProductEntity::find();

        if let Some(supplier_id) = filter.supplier_id {
            query = query.filter(Column::SupplierId.eq(supplier_id));
        }
        if let Some(category) = filter.category {
            query = query.filter(Column::Category.eq(category));
        }

        let products = query
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ProductDto>, DomainError> {
        let product = ProductEntity::find_by_id(id.to_owned()).one(&self.db).await?;
        Ok(product.map(ProductDto::from))
    }

    async fn create(
        &self,
        input: ProductInput,
        supplier: SupplierSnapshot,
    ) -> Result<ProductDto, DomainError> {
        let now = chrono::Utc::now().to_rfc3339();
        let docs = Documents::encode(&input)?;

        let new_product = ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            product_name: Set(docs.product_name),
            description: Set(docs.description),
            category: Set(input.category.trim().to_string()),
            sub_category: Set(input.sub_category.trim().to_string()),
            sizes: Set(docs.sizes),
            colors: Set(docs.colors),
            main_image_url: Set(input.main_image_url),
            additional_image_urls: Set(docs.additional_image_urls),
            main_location: Set(input.main_location.trim().to_string()),
            price_ranges: Set(docs.price_ranges),
            supplier_id: Set(supplier.supplier_id),
            supplier_name: Set(supplier.supplier_name),
            supplier_number: Set(supplier.supplier_number),
            version: Set(1),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        };

        let result = new_product.insert(&self.db).await?;
        Ok(ProductDto::from(result))
    }

    async fn update(
        &self,
        id: &str,
        expected_version: i32,
        input: ProductInput,
    ) -> Result<ProductDto, DomainError> {
        let docs = Documents::encode(&input)?;

        // Conditional write: only the version that was read may be overwritten
        let result = ProductEntity::update_many()
            .col_expr(Column::ProductName, Expr::value(docs.product_name))
            .col_expr(Column::Description, Expr::value(docs.description))
            .col_expr(Column::Category, Expr::value(input.category.trim()))
            .col_expr(Column::SubCategory, Expr::value(input.sub_category.trim()))
            .col_expr(Column::Sizes, Expr::value(docs.sizes))
            .col_expr(Column::Colors, Expr::value(docs.colors))
            .col_expr(Column::MainImageUrl, Expr::value(input.main_image_url))
            .col_expr(
                Column::AdditionalImageUrls,
                Expr::value(docs.additional_image_urls),
            )
            .col_expr(Column::MainLocation, Expr::value(input.main_location.trim()))
            .col_expr(Column::PriceRanges, Expr::value(docs.price_ranges))
            .col_expr(Column::Version, Expr::col(Column::Version).add(1))
            .col_expr(Column::UpdatedAt, Expr::value(chrono::Utc::now().to_rfc3339()))
            .filter(Column::Id.eq(id))
            .filter(Column::Version.eq(expected_version))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return match self.find_by_id(id).await? {
                Some(current) => Err(DomainError::Conflict(format!(
                    "Product {} is at version {}, not {}",
                    id, current.version, expected_version
                ))),
                None => Err(DomainError::NotFound),
            };
        }

        self.find_by_id(id).await?.ok_or(DomainError::NotFound)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let result = ProductEntity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}
