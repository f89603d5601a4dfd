//! In-memory collaborators backing unit tests and the HTTP integration suite.

use crate::domain::addresses::{Address, AddressChanges, AddressRepository, NewAddress};
use crate::domain::contacts::{
    Contact, ContactChanges, ContactRepository, ContactSearch, ContactSortField, NewContact,
    SortDirection,
};
use crate::domain::images::{ImageStore, ImageUpload, UploadedImage};
use crate::domain::mailer::{EmailMessage, Mailer};
use crate::domain::users::{DuplicateUser, NewUser, User, UserRepository};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
    next_id: Arc<AtomicI64>,
}

impl MockUserRepository {
    fn modify<F>(&self, id: i64, f: F) -> Result<User, anyhow::Error>
    where
        F: FnOnce(&mut User),
    {
        let mut users = lock(&self.users);
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow::anyhow!("User {} not found", id))?;
        f(user);
        user.updated_at = OffsetDateTime::now_utc();
        Ok(user.clone())
    }

    /// Overwrite the reset expiry, for exercising the expired path.
    pub fn set_password_reset_expiry(&self, id: i64, expires_at: OffsetDateTime) {
        let _ = self.modify(id, |u| u.password_reset_token_expires_at = Some(expires_at));
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, anyhow::Error> {
        let mut users = lock(&self.users);
        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DuplicateUser { field: "Email" }.into());
        }
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(DuplicateUser { field: "Username" }.into());
        }

        let now = OffsetDateTime::now_utc();
        let user = User {
            id: self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1,
            email: new_user.email,
            username: new_user.username,
            password_hash: new_user.password_hash,
            role: new_user.role,
            image: None,
            is_verified: false,
            verified_at: None,
            email_verification_token: Some(new_user.email_verification_token),
            refresh_token_hash: None,
            password_reset_token_hash: None,
            password_reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, anyhow::Error> {
        Ok(lock(&self.users).iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        Ok(lock(&self.users).iter().find(|u| u.email == email).cloned())
    }

    async fn count_all(&self) -> Result<i64, anyhow::Error> {
        Ok(lock(&self.users).len() as i64)
    }

    async fn count_by_username(&self, username: &str) -> Result<i64, anyhow::Error> {
        Ok(lock(&self.users)
            .iter()
            .filter(|u| u.username == username)
            .count() as i64)
    }

    async fn mark_verified(
        &self,
        id: i64,
        verified_at: OffsetDateTime,
    ) -> Result<User, anyhow::Error> {
        self.modify(id, |u| {
            u.is_verified = true;
            u.verified_at = Some(verified_at);
            u.email_verification_token = None;
        })
    }

    async fn update_refresh_token_hash(
        &self,
        id: i64,
        token_hash: Option<String>,
    ) -> Result<(), anyhow::Error> {
        self.modify(id, |u| u.refresh_token_hash = token_hash)?;
        Ok(())
    }

    async fn store_password_reset(
        &self,
        id: i64,
        token_hash: String,
        expires_at: OffsetDateTime,
    ) -> Result<(), anyhow::Error> {
        self.modify(id, |u| {
            u.password_reset_token_hash = Some(token_hash);
            u.password_reset_token_expires_at = Some(expires_at);
        })?;
        Ok(())
    }

    async fn clear_password_reset(
        &self,
        id: i64,
        expected_reset_hash: &str,
    ) -> Result<bool, anyhow::Error> {
        let mut users = lock(&self.users);
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        if user.password_reset_token_hash.as_deref() != Some(expected_reset_hash) {
            return Ok(false);
        }

        user.password_reset_token_hash = None;
        user.password_reset_token_expires_at = None;
        user.updated_at = OffsetDateTime::now_utc();
        Ok(true)
    }

    async fn reset_password(
        &self,
        id: i64,
        expected_reset_hash: &str,
        new_password_hash: String,
        now: OffsetDateTime,
    ) -> Result<bool, anyhow::Error> {
        let mut users = lock(&self.users);
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };

        let matches = user.password_reset_token_hash.as_deref() == Some(expected_reset_hash)
            && user
                .password_reset_token_expires_at
                .is_some_and(|expires_at| expires_at > now);
        if !matches {
            return Ok(false);
        }

        user.password_hash = new_password_hash;
        user.password_reset_token_hash = None;
        user.password_reset_token_expires_at = None;
        user.refresh_token_hash = None;
        user.updated_at = OffsetDateTime::now_utc();
        Ok(true)
    }

    async fn update_image(&self, id: i64, image_url: &str) -> Result<User, anyhow::Error> {
        self.modify(id, |u| u.image = Some(image_url.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<bool, anyhow::Error> {
        let mut users = lock(&self.users);
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn ping(&self) -> Result<(), anyhow::Error> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    next_id: Arc<AtomicI64>,
}

impl MockContactRepository {
    fn build(&self, user_id: i64, contact: NewContact) -> Contact {
        let now = OffsetDateTime::now_utc();
        Contact {
            id: self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1,
            user_id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

fn compare(a: &Contact, b: &Contact, field: ContactSortField) -> Ordering {
    match field {
        ContactSortField::Id => a.id.cmp(&b.id),
        ContactSortField::FirstName => a.first_name.cmp(&b.first_name),
        ContactSortField::LastName => a.last_name.cmp(&b.last_name),
        ContactSortField::Email => a.email.cmp(&b.email),
        ContactSortField::Phone => a.phone.cmp(&b.phone),
        ContactSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        ContactSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn create(&self, user_id: i64, contact: NewContact) -> Result<Contact, anyhow::Error> {
        let contact = self.build(user_id, contact);
        lock(&self.contacts).push(contact.clone());
        Ok(contact)
    }

    async fn create_many(
        &self,
        user_id: i64,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, anyhow::Error> {
        let created: Vec<Contact> = contacts
            .into_iter()
            .map(|c| self.build(user_id, c))
            .collect();
        lock(&self.contacts).extend(created.iter().cloned());
        Ok(created)
    }

    async fn search(
        &self,
        user_id: i64,
        search: ContactSearch,
    ) -> Result<(Vec<Contact>, i64), anyhow::Error> {
        let mut matched: Vec<Contact> = lock(&self.contacts)
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter(|c| {
                search.name.as_deref().is_none_or(|name| {
                    contains_ci(Some(&c.first_name), name) || contains_ci(c.last_name.as_deref(), name)
                })
            })
            .filter(|c| {
                search
                    .email
                    .as_deref()
                    .is_none_or(|email| contains_ci(c.email.as_deref(), email))
            })
            .filter(|c| {
                search
                    .phone
                    .as_deref()
                    .is_none_or(|phone| contains_ci(c.phone.as_deref(), phone))
            })
            .cloned()
            .collect();

        let sort = if search.sort.is_empty() {
            vec![(ContactSortField::Id, SortDirection::Asc)]
        } else {
            search.sort.clone()
        };
        matched.sort_by(|a, b| {
            sort.iter()
                .map(|(field, direction)| match direction {
                    SortDirection::Asc => compare(a, b, *field),
                    SortDirection::Desc => compare(b, a, *field),
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        let total = matched.len() as i64;
        let page = matched
            .into_iter()
            .skip(search.offset.max(0) as usize)
            .take(search.limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn find_by_id(&self, user_id: i64, id: i64) -> Result<Option<Contact>, anyhow::Error> {
        Ok(lock(&self.contacts)
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned())
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        changes: ContactChanges,
    ) -> Result<Option<Contact>, anyhow::Error> {
        let mut contacts = lock(&self.contacts);
        let Some(contact) = contacts
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
        else {
            return Ok(None);
        };

        if let Some(first_name) = changes.first_name {
            contact.first_name = first_name;
        }
        if changes.last_name.is_some() {
            contact.last_name = changes.last_name;
        }
        if changes.email.is_some() {
            contact.email = changes.email;
        }
        if changes.phone.is_some() {
            contact.phone = changes.phone;
        }
        contact.updated_at = OffsetDateTime::now_utc();
        Ok(Some(contact.clone()))
    }

    async fn update_image(
        &self,
        user_id: i64,
        id: i64,
        image_url: &str,
    ) -> Result<Option<Contact>, anyhow::Error> {
        let mut contacts = lock(&self.contacts);
        Ok(contacts
            .iter_mut()
            .find(|c| c.id == id && c.user_id == user_id)
            .map(|c| {
                c.image = Some(image_url.to_string());
                c.updated_at = OffsetDateTime::now_utc();
                c.clone()
            }))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<bool, anyhow::Error> {
        let mut contacts = lock(&self.contacts);
        let before = contacts.len();
        contacts.retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(contacts.len() < before)
    }
}

#[derive(Clone, Default)]
pub struct MockAddressRepository {
    addresses: Arc<Mutex<Vec<Address>>>,
    next_id: Arc<AtomicI64>,
}

#[async_trait]
impl AddressRepository for MockAddressRepository {
    async fn create(&self, contact_id: i64, address: NewAddress) -> Result<Address, anyhow::Error> {
        let now = OffsetDateTime::now_utc();
        let address = Address {
            id: self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1,
            contact_id,
            street: address.street,
            city: address.city,
            province: address.province,
            country: address.country,
            postal_code: address.postal_code,
            created_at: now,
            updated_at: now,
        };
        lock(&self.addresses).push(address.clone());
        Ok(address)
    }

    async fn list_by_contact(&self, contact_id: i64) -> Result<Vec<Address>, anyhow::Error> {
        Ok(lock(&self.addresses)
            .iter()
            .filter(|a| a.contact_id == contact_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, contact_id: i64, id: i64) -> Result<Option<Address>, anyhow::Error> {
        Ok(lock(&self.addresses)
            .iter()
            .find(|a| a.id == id && a.contact_id == contact_id)
            .cloned())
    }

    async fn update(
        &self,
        contact_id: i64,
        id: i64,
        changes: AddressChanges,
    ) -> Result<Option<Address>, anyhow::Error> {
        let mut addresses = lock(&self.addresses);
        let Some(address) = addresses
            .iter_mut()
            .find(|a| a.id == id && a.contact_id == contact_id)
        else {
            return Ok(None);
        };

        if changes.street.is_some() {
            address.street = changes.street;
        }
        if changes.city.is_some() {
            address.city = changes.city;
        }
        if changes.province.is_some() {
            address.province = changes.province;
        }
        address.country = changes.country;
        if changes.postal_code.is_some() {
            address.postal_code = changes.postal_code;
        }
        address.updated_at = OffsetDateTime::now_utc();
        Ok(Some(address.clone()))
    }

    async fn delete(&self, contact_id: i64, id: i64) -> Result<bool, anyhow::Error> {
        let mut addresses = lock(&self.addresses);
        let before = addresses.len();
        addresses.retain(|a| !(a.id == id && a.contact_id == contact_id));
        Ok(addresses.len() < before)
    }
}

/// Records every message instead of delivering it.
#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl MockMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        lock(&self.sent).clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), anyhow::Error> {
        lock(&self.sent).push(message);
        Ok(())
    }
}

/// Accepts uploads and remembers which public ids are live.
#[derive(Clone, Default)]
pub struct MockImageStore {
    stored: Arc<Mutex<Vec<String>>>,
    next_id: Arc<AtomicI64>,
}

impl MockImageStore {
    pub fn stored(&self) -> Vec<String> {
        lock(&self.stored).clone()
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, anyhow::Error> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst) + 1;
        let public_id = format!("mock/{}", id);
        let format = image
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        lock(&self.stored).push(public_id.clone());
        Ok(UploadedImage {
            url: format!("http://images.test/{}.{}", public_id, format),
            secure_url: format!("https://images.test/{}.{}", public_id, format),
            public_id,
            format,
            bytes: image.bytes.len() as u64,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), anyhow::Error> {
        lock(&self.stored).retain(|id| id != public_id);
        Ok(())
    }
}
