use crate::prelude::*;

/// A trait for injecting persistence logic into the server.
pub trait DrinkStore: Send + Sync + 'static + Clone {
    /// Returns every drink in storage order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Drink>, StoreError>> + Send;

    /// Inserts a new drink. The title is required and must be unique.
    fn create(&self, input: DrinkInput) -> impl Future<Output = Result<Drink, StoreError>> + Send;

    /// Looks a drink up by id. Absence is not an error.
    fn get(&self, id: i64) -> impl Future<Output = Result<Option<Drink>, StoreError>> + Send;

    /// Applies the supplied fields of `input` to an existing drink.
    fn update(
        &self,
        id: i64,
        input: DrinkInput,
    ) -> impl Future<Output = Result<Drink, StoreError>> + Send;

    /// Removes a drink, returning its id.
    fn delete(&self, id: i64) -> impl Future<Output = Result<i64, StoreError>> + Send;
}

/// A trait for injecting authentication logic into the server.
pub trait AuthProvider: Send + Sync + 'static + Clone {
    /// Verifies a raw bearer token and returns its claims if successful.
    fn verify(&self, token: &str) -> impl Future<Output = Result<Claims, AuthError>> + Send;
}

/// Bundles the backends the server is built from.
pub trait DrinkeryServices: Send + Sync + 'static + Clone {
    type Store: DrinkStore;
    type Auth: AuthProvider;

    fn store(&self) -> &Self::Store;
    fn auth(&self) -> &Self::Auth;
}
