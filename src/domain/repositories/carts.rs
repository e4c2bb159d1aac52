use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::value_objects::orders::CartLineModel;

#[async_trait]
#[automock]
pub trait CartRepository {
    /// Lines of the user's cart priced at the product's current final price.
    async fn list_cart_lines(&self, user_id: Uuid) -> Result<Vec<CartLineModel>>;
    async fn clear_cart(&self, user_id: Uuid) -> Result<()>;
}
