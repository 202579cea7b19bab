//! RejectOrder command handler
//!
//! Clients may reject their own NEW orders; managers may reject any NEW
//! order. Terminal orders admit no transition.

use async_trait::async_trait;

use crate::settlement::traits::{
    CommandContext, CommandHandler, CommandMetadata, SettlementError,
};
use shared::{OrderRecord, OrderStatus, Role};

/// RejectOrder action
#[derive(Debug, Clone)]
pub struct RejectOrderAction {
    pub order_id: u64,
}

#[async_trait]
impl CommandHandler for RejectOrderAction {
    type Output = OrderRecord;

    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<OrderRecord, SettlementError> {
        let mut order = ctx.load_order(self.order_id)?;

        if order.status != OrderStatus::New {
            return Err(SettlementError::OrderNotRejectable(self.order_id));
        }

        order.status = match metadata.role {
            Role::Manager => OrderStatus::RejectedByManager,
            Role::Client => {
                if order.client_id != metadata.actor_id {
                    return Err(SettlementError::Unauthorized(
                        "clients may only reject their own orders".to_string(),
                    ));
                }
                OrderStatus::RejectedByClient
            }
        };
        order.updated_at = metadata.timestamp;
        ctx.save_order(&order)?;

        Ok(order)
    }
}
