// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/";
pub const ITEMS: &str = "/items";
pub const ITEM: &str = "/items/{id}";
pub const ITEMS_BY_CATEGORY: &str = "/items/category/{name}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
