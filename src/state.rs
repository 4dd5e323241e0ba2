use crate::service::ItemService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub items: ItemService,
}
