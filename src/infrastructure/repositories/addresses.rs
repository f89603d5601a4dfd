use crate::domain::addresses::{Address, AddressChanges, AddressRepository, NewAddress};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::addresses::{ADDRESS_COLUMNS, AddressDbModel};
use async_trait::async_trait;

#[derive(Clone)]
pub struct PostgresAddressRepository {
    pool: DbPool,
}

impl PostgresAddressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PostgresAddressRepository {
    async fn create(&self, contact_id: i64, address: NewAddress) -> Result<Address, anyhow::Error> {
        let sql = format!(
            r#"
            INSERT INTO addresses (contact_id, street, city, province, country, postal_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ADDRESS_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, AddressDbModel>(&sql)
            .bind(contact_id)
            .bind(address.street)
            .bind(address.city)
            .bind(address.province)
            .bind(address.country)
            .bind(address.postal_code)
            .fetch_one(&self.pool)
            .await?;

        Ok(model.into())
    }

    async fn list_by_contact(&self, contact_id: i64) -> Result<Vec<Address>, anyhow::Error> {
        let sql = format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE contact_id = $1 ORDER BY id ASC"
        );
        let models = sqlx::query_as::<_, AddressDbModel>(&sql)
            .bind(contact_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(models.into_iter().map(Address::from).collect())
    }

    async fn find_by_id(&self, contact_id: i64, id: i64) -> Result<Option<Address>, anyhow::Error> {
        let sql =
            format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1 AND contact_id = $2");
        let model = sqlx::query_as::<_, AddressDbModel>(&sql)
            .bind(id)
            .bind(contact_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(model.map(Address::from))
    }

    async fn update(
        &self,
        contact_id: i64,
        id: i64,
        changes: AddressChanges,
    ) -> Result<Option<Address>, anyhow::Error> {
        let sql = format!(
            r#"
            UPDATE addresses
            SET street = COALESCE($3, street),
                city = COALESCE($4, city),
                province = COALESCE($5, province),
                country = $6,
                postal_code = COALESCE($7, postal_code),
                updated_at = NOW()
            WHERE id = $1 AND contact_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, AddressDbModel>(&sql)
            .bind(id)
            .bind(contact_id)
            .bind(changes.street)
            .bind(changes.city)
            .bind(changes.province)
            .bind(changes.country)
            .bind(changes.postal_code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(model.map(Address::from))
    }

    async fn delete(&self, contact_id: i64, id: i64) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND contact_id = $2")
            .bind(id)
            .bind(contact_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
