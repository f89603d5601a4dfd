use crate::domain::contacts::{
    Contact, ContactChanges, ContactRepository, ContactSearch, NewContact,
};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::contacts::{CONTACT_COLUMNS, ContactDbModel};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PostgresContactRepository {
    pool: DbPool,
}

impl PostgresContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escape LIKE wildcards so user input only ever matches literally.
pub fn like_pattern(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('%');
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, user_id: i64, search: &ContactSearch) {
    builder.push(" WHERE user_id = ").push_bind(user_id);

    if let Some(name) = &search.name {
        let pattern = like_pattern(name);
        builder
            .push(" AND (first_name ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR last_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(email) = &search.email {
        builder.push(" AND email ILIKE ").push_bind(like_pattern(email));
    }
    if let Some(phone) = &search.phone {
        builder.push(" AND phone ILIKE ").push_bind(like_pattern(phone));
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, user_id: i64, contact: NewContact) -> Result<Contact, anyhow::Error> {
        let sql = format!(
            r#"
            INSERT INTO contacts (user_id, first_name, last_name, email, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, ContactDbModel>(&sql)
            .bind(user_id)
            .bind(contact.first_name)
            .bind(contact.last_name)
            .bind(contact.email)
            .bind(contact.phone)
            .fetch_one(&self.pool)
            .await?;

        Ok(model.into())
    }

    async fn create_many(
        &self,
        user_id: i64,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, anyhow::Error> {
        if contacts.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;

        let mut query_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO contacts (user_id, first_name, last_name, email, phone) ");

        query_builder.push_values(contacts, |mut b, contact| {
            b.push_bind(user_id)
                .push_bind(contact.first_name)
                .push_bind(contact.last_name)
                .push_bind(contact.email)
                .push_bind(contact.phone);
        });
        query_builder.push(" RETURNING ").push(CONTACT_COLUMNS);

        let models = query_builder
            .build_query_as::<ContactDbModel>()
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut created: Vec<Contact> = models.into_iter().map(Contact::from).collect();
        created.sort_by_key(|c| c.id);
        Ok(created)
    }

    #[tracing::instrument(skip(self, search))]
    async fn search(
        &self,
        user_id: i64,
        search: ContactSearch,
    ) -> Result<(Vec<Contact>, i64), anyhow::Error> {
        let mut count_query: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM contacts");
        push_filters(&mut count_query, user_id, &search);
        let total: i64 = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        query.push(CONTACT_COLUMNS).push(" FROM contacts");
        push_filters(&mut query, user_id, &search);

        // Columns come from a closed enum, never from user input.
        query.push(" ORDER BY ");
        if search.sort.is_empty() {
            query.push("id ASC");
        } else {
            let mut separated = query.separated(", ");
            for (field, direction) in &search.sort {
                separated.push(format!("{} {}", field.column(), direction.keyword()));
            }
        }

        query
            .push(" LIMIT ")
            .push_bind(search.limit)
            .push(" OFFSET ")
            .push_bind(search.offset);

        let models = query
            .build_query_as::<ContactDbModel>()
            .fetch_all(&self.pool)
            .await?;

        Ok((models.into_iter().map(Contact::from).collect(), total))
    }

    async fn find_by_id(&self, user_id: i64, id: i64) -> Result<Option<Contact>, anyhow::Error> {
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = $1 AND user_id = $2");
        let model = sqlx::query_as::<_, ContactDbModel>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(model.map(Contact::from))
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        changes: ContactChanges,
    ) -> Result<Option<Contact>, anyhow::Error> {
        let sql = format!(
            r#"
            UPDATE contacts
            SET first_name = COALESCE($3, first_name),
                last_name = COALESCE($4, last_name),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, ContactDbModel>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(changes.first_name)
            .bind(changes.last_name)
            .bind(changes.email)
            .bind(changes.phone)
            .fetch_optional(&self.pool)
            .await?;

        Ok(model.map(Contact::from))
    }

    async fn update_image(
        &self,
        user_id: i64,
        id: i64,
        image_url: &str,
    ) -> Result<Option<Contact>, anyhow::Error> {
        let sql = format!(
            r#"
            UPDATE contacts SET image = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {CONTACT_COLUMNS}
            "#
        );

        let model = sqlx::query_as::<_, ContactDbModel>(&sql)
            .bind(id)
            .bind(user_id)
            .bind(image_url)
            .fetch_optional(&self.pool)
            .await?;

        Ok(model.map(Contact::from))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, anyhow::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
