use drinkery_core::prelude::*;

#[derive(Clone)]
pub struct CoreServices<S, A> {
    pub store: S,
    pub auth: A,
}

impl<S, A> DrinkeryServices for CoreServices<S, A>
where
    S: DrinkStore,
    A: AuthProvider,
{
    type Store = S;
    type Auth = A;

    fn store(&self) -> &S {
        &self.store
    }
    fn auth(&self) -> &A {
        &self.auth
    }
}
