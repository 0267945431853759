//! Catalog Service - versioned reference lists of product options
//!
//! Sizes, colors, delivery locations, quantity presets and categories are
//! kept as one shared dataset. Product writes register the values they use,
//! so listing categories never requires scanning the product table.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;
use serde::Serialize;
use std::str::FromStr;

use crate::domain::DomainError;
use crate::models::catalog_option::{self, Entity as CatalogOption};
use crate::models::catalog_version::{self, Entity as CatalogVersion};
use crate::validation::{
    QtyRole, ValidationError, validate_location_name, validate_new_option,
    validate_quantity_input,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Size,
    Color,
    Location,
    Quantity,
    Category,
    SubCategory,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 6] = [
        CatalogKind::Size,
        CatalogKind::Color,
        CatalogKind::Location,
        CatalogKind::Quantity,
        CatalogKind::Category,
        CatalogKind::SubCategory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Size => "size",
            CatalogKind::Color => "color",
            CatalogKind::Location => "location",
            CatalogKind::Quantity => "quantity",
            CatalogKind::Category => "category",
            CatalogKind::SubCategory => "sub_category",
        }
    }
}

impl FromStr for CatalogKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "size" | "sizes" => Ok(CatalogKind::Size),
            "color" | "colors" => Ok(CatalogKind::Color),
            "location" | "locations" => Ok(CatalogKind::Location),
            "quantity" | "quantities" => Ok(CatalogKind::Quantity),
            "category" | "categories" => Ok(CatalogKind::Category),
            "sub_category" | "sub_categories" | "subcategory" => Ok(CatalogKind::SubCategory),
            other => Err(DomainError::Validation(format!(
                "Unknown catalog list '{}'",
                other
            ))),
        }
    }
}

/// Static defaults every installation starts from
pub fn default_values(kind: CatalogKind) -> &'static [&'static str] {
    match kind {
        CatalogKind::Size => &["Small", "Medium", "Large", "XL"],
        CatalogKind::Color => &["Black", "White", "Grey", "Red", "Blue", "Green"],
        CatalogKind::Location => &["Riyadh", "Jeddah", "Dammam", "Mecca", "Medina"],
        CatalogKind::Quantity => &["1", "10", "50", "100", "500", "1000", "Unlimited"],
        CatalogKind::Category | CatalogKind::SubCategory => &[],
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub kind: &'static str,
    pub version: i32,
    pub values: Vec<String>,
}

async fn current_version<C: ConnectionTrait>(db: &C, kind: CatalogKind) -> Result<i32, DomainError> {
    let version = CatalogVersion::find_by_id(kind.as_str().to_owned())
        .one(db)
        .await?
        .map(|v| v.version)
        .unwrap_or(1);
    Ok(version)
}

async fn bump_version<C: ConnectionTrait>(db: &C, kind: CatalogKind) -> Result<(), DomainError> {
    let now = chrono::Utc::now().to_rfc3339();

    let result = CatalogVersion::update_many()
        .col_expr(
            catalog_version::Column::Version,
            Expr::col(catalog_version::Column::Version).add(1),
        )
        .col_expr(catalog_version::Column::UpdatedAt, Expr::value(now.clone()))
        .filter(catalog_version::Column::Kind.eq(kind.as_str()))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        catalog_version::ActiveModel {
            kind: Set(kind.as_str().to_owned()),
            version: Set(2),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn values_of<C: ConnectionTrait>(db: &C, kind: CatalogKind) -> Result<Vec<String>, DomainError> {
    let options = CatalogOption::find()
        .filter(catalog_option::Column::Kind.eq(kind.as_str()))
        .order_by_asc(catalog_option::Column::Id)
        .all(db)
        .await?;
    Ok(options.into_iter().map(|o| o.value).collect())
}

/// Current values of one list together with its version
pub async fn list_options(
    db: &DatabaseConnection,
    kind: CatalogKind,
) -> Result<CatalogSnapshot, DomainError> {
    Ok(CatalogSnapshot {
        kind: kind.as_str(),
        version: current_version(db, kind).await?,
        values: values_of(db, kind).await?,
    })
}

fn check_entry(kind: CatalogKind, value: &str) -> Result<String, ValidationError> {
    match kind {
        CatalogKind::Location => validate_location_name(value),
        CatalogKind::Quantity => {
            validate_quantity_input(value, QtyRole::Max)?;
            Ok(value.trim().to_string())
        }
        _ => Ok(value.trim().to_string()),
    }
}

/// Add a user-created option. Duplicates are rejected.
pub async fn add_option(
    db: &DatabaseConnection,
    kind: CatalogKind,
    value: &str,
) -> Result<CatalogSnapshot, DomainError> {
    let value = check_entry(kind, value)?;
    let existing = values_of(db, kind).await?;
    let value = validate_new_option(kind.as_str(), &existing, &value)?;

    let txn = db.begin().await?;
    catalog_option::ActiveModel {
        kind: Set(kind.as_str().to_owned()),
        value: Set(value.clone()),
        created_at: Set(chrono::Utc::now().to_rfc3339()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    bump_version(&txn, kind).await?;
    txn.commit().await?;

    tracing::info!("Catalog '{}' gained option '{}'", kind.as_str(), value);
    list_options(db, kind).await
}

/// Record values used by a product form. Known values are skipped silently and
/// the version only moves when something new was stored.
pub async fn register_values<C: ConnectionTrait>(
    db: &C,
    kind: CatalogKind,
    values: &[String],
) -> Result<usize, DomainError> {
    let existing: Vec<String> = values_of(db, kind)
        .await?
        .into_iter()
        .map(|v| v.to_lowercase())
        .collect();

    let mut fresh: Vec<String> = Vec::new();
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let key = value.to_lowercase();
        if !existing.contains(&key) && !fresh.iter().any(|f| f.to_lowercase() == key) {
            fresh.push(value.to_string());
        }
    }

    if fresh.is_empty() {
        return Ok(0);
    }

    let now = chrono::Utc::now().to_rfc3339();
    let rows = fresh.iter().map(|value| catalog_option::ActiveModel {
        kind: Set(kind.as_str().to_owned()),
        value: Set(value.clone()),
        created_at: Set(now.clone()),
        ..Default::default()
    });

    CatalogOption::insert_many(rows)
        .on_conflict(
            OnConflict::columns([catalog_option::Column::Kind, catalog_option::Column::Value])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    bump_version(db, kind).await?;

    tracing::debug!(
        "Registered {} new '{}' option(s)",
        fresh.len(),
        kind.as_str()
    );
    Ok(fresh.len())
}
