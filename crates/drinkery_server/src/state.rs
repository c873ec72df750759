use drinkery_core::prelude::*;

#[derive(Clone)]
pub struct AppState<R: DrinkeryServices> {
    pub services: R,
}

impl<S> DrinkeryServices for AppState<S>
where
    S: DrinkeryServices,
{
    type Store = S::Store;
    type Auth = S::Auth;

    fn store(&self) -> &Self::Store {
        self.services.store()
    }
    fn auth(&self) -> &Self::Auth {
        self.services.auth()
    }
}
