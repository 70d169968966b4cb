//! Tenant directory
//!
//! Resolves a public slug to its Restaurant record and owns the setup-time
//! creation of restaurants. Resolution prefers the primary (`restaurantData`)
//! slot, then the slug index, then a full scan over `restaurant_*` records —
//! the scan covers stores written before the index existed.

use crate::auth::UserIdentity;
use crate::store::{
    self, KvStore, RedbStore, PRIMARY_RESTAURANT_KEY, RESTAURANT_KEY_PREFIX,
};
use shared::models::{Restaurant, RestaurantCreate};
use shared::util::{now_millis, prefixed_id, slugify};
use shared::{AppError, AppResult};

/// Slug-addressed directory of restaurant tenants
#[derive(Clone)]
pub struct TenantDirectory {
    store: RedbStore,
}

impl TenantDirectory {
    pub fn new(store: RedbStore) -> Self {
        Self { store }
    }

    /// Resolve a public slug to its restaurant
    ///
    /// Matching is exact and case-sensitive, with no normalization of the
    /// input. Two consecutive calls against an unchanged store return equal
    /// values. The `isActive` flag is deliberately not filtered here (the
    /// reference behavior); an inactive tenant is served with a warning.
    pub fn resolve(&self, slug: &str) -> AppResult<Restaurant> {
        // Fast path: the device's own restaurant
        if let Some(restaurant) = self.read_record(PRIMARY_RESTAURANT_KEY)?
            && restaurant.slug == slug
        {
            return Ok(warn_if_inactive(restaurant));
        }

        if let Some(record_key) = self.store.lookup_slug(slug)?
            && let Some(restaurant) = self.read_record(&record_key)?
            && restaurant.slug == slug
        {
            return Ok(warn_if_inactive(restaurant));
        }

        // Index miss: full scan over per-user records
        tracing::debug!(slug, "slug index miss, scanning restaurant records");
        for (key, bytes) in self.store.scan_prefix(RESTAURANT_KEY_PREFIX)? {
            match serde_json::from_slice::<Restaurant>(&bytes) {
                Ok(restaurant) if restaurant.slug == slug => {
                    return Ok(warn_if_inactive(restaurant));
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(key, %err, "skipping malformed restaurant record");
                }
            }
        }

        Err(AppError::tenant_not_found(slug))
    }

    /// Create a restaurant for the signed-in user (setup flow)
    ///
    /// Validates the payload, derives a unique slug from the name plus a
    /// millisecond suffix, and writes the per-user record, the primary slot,
    /// and the slug index in one transaction. A user owns at most one
    /// restaurant; the slug is immutable once written.
    pub fn create_restaurant(
        &self,
        user: &UserIdentity,
        payload: RestaurantCreate,
    ) -> AppResult<Restaurant> {
        let mut invalid: Vec<&str> = Vec::new();
        if payload.name.trim().is_empty() {
            invalid.push("name");
        }
        if payload.payment_methods.iter().all(|m| m.trim().is_empty()) {
            invalid.push("paymentMethods");
        }
        if !invalid.is_empty() {
            return Err(AppError::validation_fields(&invalid));
        }

        let record_key = store::restaurant_key(&user.id);
        if self.read_record(&record_key)?.is_some() {
            return Err(AppError::already_exists("Restaurant"));
        }

        let mut payment_methods: Vec<String> = Vec::new();
        for method in payload.payment_methods {
            let method = method.trim().to_string();
            if !method.is_empty() && !payment_methods.contains(&method) {
                payment_methods.push(method);
            }
        }

        let base = slugify(&payload.name);
        let slug = if base.is_empty() {
            now_millis().to_string()
        } else {
            format!("{}-{}", base, now_millis())
        };

        let restaurant = Restaurant {
            id: prefixed_id("rest"),
            user_id: user.id.clone(),
            name: payload.name.trim().to_string(),
            slug,
            description: payload.description,
            address: payload.address,
            phone: payload.phone,
            email: payload.email,
            payment_methods,
            is_active: true,
            created_at: Some(chrono::Utc::now()),
        };

        let txn = self.store.begin_write()?;
        if !self
            .store
            .claim_slug_txn(&txn, &restaurant.slug, &record_key)?
        {
            return Err(AppError::slug_taken(&restaurant.slug));
        }
        self.store.put_json_txn(&txn, &record_key, &restaurant)?;
        self.store
            .put_json_txn(&txn, PRIMARY_RESTAURANT_KEY, &restaurant)?;
        txn.commit().map_err(crate::store::StoreError::from)?;

        tracing::info!(
            restaurant_id = %restaurant.id,
            slug = %restaurant.slug,
            "restaurant created"
        );
        Ok(restaurant)
    }

    /// The restaurant owned by a user, if one exists
    pub fn restaurant_for_user(&self, user_id: &str) -> AppResult<Option<Restaurant>> {
        Ok(self.read_record(&store::restaurant_key(user_id))?)
    }

    /// Read one restaurant record, degrading a parse failure to None
    fn read_record(&self, key: &str) -> AppResult<Option<Restaurant>> {
        match self.store.get_json::<Restaurant>(key) {
            Ok(found) => Ok(found),
            Err(crate::store::StoreError::Serialization(err)) => {
                tracing::warn!(key, %err, "malformed restaurant record, treating as absent");
                Ok(None)
            }
            Err(other) => Err(other.into()),
        }
    }
}

fn warn_if_inactive(restaurant: Restaurant) -> Restaurant {
    if !restaurant.is_active {
        // Known oversight in the reference behavior: inactive tenants
        // still serve their public page. Kept, but made visible.
        tracing::warn!(
            restaurant_id = %restaurant.id,
            slug = %restaurant.slug,
            "serving inactive restaurant"
        );
    }
    restaurant
}
