pub mod scopes {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}

pub mod routes {
    pub const HEALTH: &str = "/health";

    pub const DRINKS: &str = "/drinks";
    pub const DRINKS_DETAIL: &str = "/drinks-detail";
    pub const DRINKS_BY_ID: &str = "/drinks/{id}";
}
