//! CreateOrder command handler
//!
//! Builds a NEW order with priced line items from a cart. The manager
//! resolves products and the actual price action before the transaction;
//! this handler prices, accumulates the total and persists everything as
//! one atomic unit. A failure on any line aborts the whole order.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::settlement::money::{discounted_unit_price, line_amount, validate_cart_item};
use crate::settlement::traits::{
    CommandContext, CommandHandler, CommandMetadata, SettlementError,
};
use shared::{CartItemInput, Currency, OrderItemRecord, OrderRecord, PriceAction, ProductInfo};

/// CreateOrder action
#[derive(Debug, Clone)]
pub struct CreateOrderAction {
    pub client_id: u64,
    pub currency: Currency,
    pub items: Vec<CartItemInput>,
    /// Products resolved by the manager before the transaction
    pub products: HashMap<u64, ProductInfo>,
    /// Actual price action at creation time, applied uniformly
    pub price_action: Option<PriceAction>,
}

#[async_trait]
impl CommandHandler for CreateOrderAction {
    type Output = OrderRecord;

    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<OrderRecord, SettlementError> {
        if self.items.is_empty() {
            return Err(SettlementError::InvalidAmount);
        }

        let order_id = ctx.next_order_id()?;
        let mut order =
            OrderRecord::new(order_id, self.client_id, self.currency, metadata.timestamp);

        for item in &self.items {
            validate_cart_item(item)?;

            let product = self
                .products
                .get(&item.product_id)
                .ok_or(SettlementError::ProductNotFound(item.product_id))?;

            let unit_price = discounted_unit_price(&product.price, self.price_action.as_ref());
            let amount = line_amount(&unit_price, item.count);

            // Total accumulates from the frozen line amounts; no separate
            // recomputation path exists
            order.amount = order.amount.checked_add(&amount)?;
            order.items.push(OrderItemRecord {
                product_id: item.product_id,
                count: item.count,
                amount,
            });
        }

        ctx.save_order(&order)?;
        Ok(order)
    }
}
