use std::sync::Arc;

use crate::application::admin::posts::AdminPostService;
use crate::application::repos::StoreHealth;

#[derive(Clone)]
pub struct AdminState {
    pub posts: AdminPostService,
    pub health: Arc<dyn StoreHealth>,
    pub admin_token: Arc<str>,
}
