use axum_restaurant_api::{config::AppConfig, db::create_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    seed_customers(&pool).await?;
    seed_tables(&pool).await?;
    seed_menu(&pool).await?;
    seed_employees(&pool).await?;

    println!("Seed completed.");
    Ok(())
}

async fn seed_customers(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let customers = vec![
        ("Alice", "Nguyen", "+1-555-0101", "alice@example.com"),
        ("Bilal", "Khan", "+1-555-0102", "bilal@example.com"),
        ("Carla", "Mendes", "+1-555-0103", "carla@example.com"),
    ];

    for (first, last, phone, email) in customers {
        let exists: Option<(i32,)> = sqlx::query_as(
            "SELECT id FROM customers WHERE first_name = $1 AND last_name = $2",
        )
        .bind(first)
        .bind(last)
        .fetch_optional(pool)
        .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            "INSERT INTO customers (first_name, last_name, phone_number, email) VALUES ($1, $2, $3, $4)",
        )
        .bind(first)
        .bind(last)
        .bind(phone)
        .bind(email)
        .execute(pool)
        .await?;
    }

    println!("Seeded customers");
    Ok(())
}

async fn seed_tables(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let tables = vec![
        ("T1", 2, "indoor"),
        ("T2", 4, "indoor"),
        ("T3", 4, "indoor"),
        ("T4", 6, "outdoor"),
        ("T5", 8, "outdoor"),
    ];

    for (number, capacity, location) in tables {
        let exists: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM dining_tables WHERE table_number = $1")
                .bind(number)
                .fetch_optional(pool)
                .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            "INSERT INTO dining_tables (table_number, capacity, location, status) VALUES ($1, $2, $3, 'available')",
        )
        .bind(number)
        .bind(capacity)
        .bind(location)
        .execute(pool)
        .await?;
    }

    println!("Seeded dining tables");
    Ok(())
}

async fn seed_menu(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let items = vec![
        ("Margherita Pizza", "Tomato, mozzarella, basil", 1200_i64, "mains"),
        ("Chicken Biryani", "Fragrant rice with spiced chicken", 1500, "mains"),
        ("Caesar Salad", "Romaine, parmesan, croutons", 900, "starters"),
        ("Tiramisu", "Espresso-soaked sponge, mascarpone", 700, "desserts"),
    ];

    for (name, desc, price, category) in items {
        let exists: Option<(i32,)> = sqlx::query_as("SELECT id FROM menu WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            "INSERT INTO menu (name, description, price, category, availability) VALUES ($1, $2, $3, $4, TRUE)",
        )
        .bind(name)
        .bind(desc)
        .bind(price)
        .bind(category)
        .execute(pool)
        .await?;
    }

    println!("Seeded menu");
    Ok(())
}

async fn seed_employees(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let employees = vec![
        ("Dana", "Ortiz", "manager", "+1-555-0201", "dana@example.com", "2023-01-15", 520000_i64),
        ("Eli", "Park", "chef", "+1-555-0202", "eli@example.com", "2023-03-01", 430000),
        ("Femi", "Adeyemi", "delivery agent", "+1-555-0203", "femi@example.com", "2024-06-10", 310000),
    ];

    for (first, last, role, phone, email, hire_date, salary) in employees {
        let exists: Option<(i32,)> = sqlx::query_as(
            "SELECT id FROM employees WHERE first_name = $1 AND last_name = $2",
        )
        .bind(first)
        .bind(last)
        .fetch_optional(pool)
        .await?;
        if exists.is_some() {
            continue;
        }

        sqlx::query(
            r#"
            INSERT INTO employees (first_name, last_name, role, phone_number, email, hire_date, salary)
            VALUES ($1, $2, $3, $4, $5, $6::date, $7)
            "#,
        )
        .bind(first)
        .bind(last)
        .bind(role)
        .bind(phone)
        .bind(email)
        .bind(hire_date)
        .bind(salary)
        .execute(pool)
        .await?;
    }

    println!("Seeded employees");
    Ok(())
}
