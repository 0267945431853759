use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

use crate::services::catalog_service::{CatalogKind, default_values};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(
        db.get_database_backend(),
        sql.to_owned(),
    ))
    .await?;
    Ok(())
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS suppliers (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            number TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Localized text, option sets and price tiers are JSON documents
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY NOT NULL,
            product_name TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            sub_category TEXT NOT NULL,
            sizes TEXT NOT NULL DEFAULT '[]',
            colors TEXT NOT NULL DEFAULT '[]',
            main_image_url TEXT NOT NULL,
            additional_image_urls TEXT NOT NULL DEFAULT '[]',
            main_location TEXT NOT NULL,
            price_ranges TEXT NOT NULL DEFAULT '[]',
            supplier_id TEXT NOT NULL,
            supplier_name TEXT NOT NULL,
            supplier_number TEXT,
            version INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            FOREIGN KEY (supplier_id) REFERENCES suppliers(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_products_supplier ON products(supplier_id)",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS cart_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            buyer_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            supplier_id TEXT NOT NULL,
            price REAL,
            quantity INTEGER NOT NULL,
            color TEXT,
            size TEXT,
            shipping_cost REAL,
            shipping_negotiable BOOLEAN NOT NULL DEFAULT 0,
            delivery_location TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        "CREATE INDEX IF NOT EXISTS idx_cart_items_buyer ON cart_items(buyer_id)",
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            bill_number TEXT NOT NULL UNIQUE,
            buyer_id TEXT NOT NULL,
            supplier_id TEXT NOT NULL,
            items TEXT NOT NULL DEFAULT '[]',
            subtotal REAL NOT NULL,
            shipping_cost REAL NOT NULL,
            vat REAL NOT NULL,
            discount REAL NOT NULL DEFAULT 0,
            coupon_code TEXT,
            total REAL NOT NULL,
            payment_status TEXT NOT NULL DEFAULT 'pending',
            sadad_number TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS catalog_options (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            value TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (kind, value)
        )
        "#,
    )
    .await?;

    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS catalog_versions (
            kind TEXT PRIMARY KEY NOT NULL,
            version INTEGER NOT NULL DEFAULT 1,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .await?;

    // Seed the reference option lists; existing rows are left untouched
    for kind in CatalogKind::ALL {
        execute(
            db,
            &format!(
                "INSERT OR IGNORE INTO catalog_versions (kind, version, updated_at) VALUES ('{}', 1, datetime('now'))",
                kind.as_str()
            ),
        )
        .await?;

        for value in default_values(kind) {
            db.execute(Statement::from_sql_and_values(
                db.get_database_backend(),
                "INSERT OR IGNORE INTO catalog_options (kind, value, created_at) VALUES (?, ?, datetime('now'))",
                [kind.as_str().into(), (*value).into()],
            ))
            .await?;
        }
    }

    Ok(())
}
