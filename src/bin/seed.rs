use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use salon_booking_api::{
    booking::catalog::{default_services, default_stylists},
    config::AppConfig,
    db::{OrmConn, create_orm_conn, run_migrations},
    entity::{
        services::{ActiveModel as ServiceActive, Column as ServiceCol, Entity as Services},
        stylists::{ActiveModel as StylistActive, Column as StylistCol, Entity as Stylists},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let employee_id = ensure_user(&orm, "employee@example.com", "employee123", "employee").await?;
    let client_id = ensure_user(&orm, "client@example.com", "client123", "client").await?;
    seed_catalog(&orm).await?;

    println!("Seed completed. Employee ID: {employee_id}, Client ID: {client_id}");
    Ok(())
}

async fn ensure_user(
    orm: &OrmConn,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(UserCol::Email.eq(email))
        .one(orm)
        .await?
    {
        println!("User {email} already present (role={})", existing.role);
        return Ok(existing.id);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        role: Set(role.to_string()),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (role={role})");
    Ok(user.id)
}

async fn seed_catalog(orm: &OrmConn) -> anyhow::Result<()> {
    for service in default_services() {
        let exists = Services::find()
            .filter(ServiceCol::Name.eq(service.name.as_str()))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        ServiceActive {
            id: Set(Uuid::new_v4()),
            name: Set(service.name),
            description: Set(service.description),
            price: Set(service.price),
            duration: Set(service.duration),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(orm)
        .await?;
    }
    println!("Seeded services");

    for stylist in default_stylists() {
        let exists = Stylists::find()
            .filter(StylistCol::Name.eq(stylist.name.as_str()))
            .one(orm)
            .await?
            .is_some();
        if exists {
            continue;
        }
        StylistActive {
            id: Set(Uuid::new_v4()),
            name: Set(stylist.name),
            role: Set(stylist.role),
            image: Set(stylist.image),
            bio: Set(stylist.bio),
            created_at: NotSet,
            updated_at: NotSet,
        }
        .insert(orm)
        .await?;
    }
    println!("Seeded stylists");

    Ok(())
}
