use fieldbook_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    models::Role,
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let admin_id = ensure_profile(&pool, "admin@example.com", "admin123", "Site Admin", Role::Admin).await?;
    let owner_id = ensure_profile(&pool, "owner@example.com", "owner123", "Field Owner", Role::Owner).await?;
    let customer_id =
        ensure_profile(&pool, "customer@example.com", "customer123", "Sample Customer", Role::Customer).await?;
    seed_fields(&pool, owner_id).await?;

    println!("Seed completed. Admin: {admin_id}, Owner: {owner_id}, Customer: {customer_id}");
    Ok(())
}

async fn ensure_profile(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    name: &str,
    role: Role,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO profiles (id, email, password_hash, name, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (email) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(name)
    .bind(role.as_ref())
    .fetch_one(pool)
    .await?;

    println!("Ensured profile {email} (role={role})");
    Ok(id)
}

async fn seed_fields(pool: &sqlx::PgPool, owner_id: Uuid) -> anyhow::Result<()> {
    let fields = [
        (
            "Al Nakheel Arena",
            "Riyadh",
            "King Fahd Road",
            Decimal::new(25000, 2),
            "https://images.example.com/fields/nakheel.jpg",
            &["Floodlights", "Parking", "Changing Rooms"][..],
        ),
        (
            "Corniche Five-a-Side",
            "Jeddah",
            "Corniche Road",
            Decimal::new(18000, 2),
            "https://images.example.com/fields/corniche.jpg",
            &["Floodlights", "Cafe"][..],
        ),
        (
            "Desert Star Pitch",
            "Dammam",
            "Prince Mohammed Street",
            Decimal::new(15000, 2),
            "https://images.example.com/fields/desert-star.jpg",
            &["Parking"][..],
        ),
    ];

    for (name, location, address, price, image_url, amenities) in fields {
        let inserted: Option<(Uuid,)> = sqlx::query_as(
            r#"
            INSERT INTO fields (id, owner_id, name, location, address, price_per_booking)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (SELECT 1 FROM fields WHERE owner_id = $2 AND name = $3)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(name)
        .bind(location)
        .bind(address)
        .bind(price)
        .fetch_optional(pool)
        .await?;

        // already seeded
        let Some((field_id,)) = inserted else {
            continue;
        };

        sqlx::query(
            "INSERT INTO field_images (id, field_id, image_url, is_primary, position) VALUES ($1, $2, $3, TRUE, 0)",
        )
        .bind(Uuid::new_v4())
        .bind(field_id)
        .bind(image_url)
        .execute(pool)
        .await?;

        for amenity in amenities {
            sqlx::query("INSERT INTO field_amenities (id, field_id, amenity) VALUES ($1, $2, $3)")
                .bind(Uuid::new_v4())
                .bind(field_id)
                .bind(*amenity)
                .execute(pool)
                .await?;
        }
    }

    println!("Seeded fields");
    Ok(())
}
