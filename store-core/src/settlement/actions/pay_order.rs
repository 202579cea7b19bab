//! PayOrder command handler
//!
//! Settles a NEW order against the payer's ledger balance. The balance
//! check and both mutations (payment row, status flip) happen inside one
//! write transaction; redb admits a single writer, so concurrent payments
//! cannot both pass the check against a stale balance.

use async_trait::async_trait;
use uuid::Uuid;

use crate::settlement::traits::{
    CommandContext, CommandHandler, CommandMetadata, SettlementError,
};
use shared::{OrderStatus, PaymentRecord};

/// PayOrder action
#[derive(Debug, Clone)]
pub struct PayOrderAction {
    pub client_id: u64,
    pub order_id: u64,
}

#[async_trait]
impl CommandHandler for PayOrderAction {
    type Output = PaymentRecord;

    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<PaymentRecord, SettlementError> {
        // Preconditions, first failure wins: existence, status, funds
        let mut order = ctx.load_order(self.order_id)?;

        if order.status != OrderStatus::New {
            return Err(SettlementError::OrderNotPayable(self.order_id));
        }

        let balance = ctx.balance(self.client_id, order.amount.currency)?;
        if !balance.try_ge(&order.amount)? {
            return Err(SettlementError::InsufficientFunds {
                balance,
                required: order.amount,
            });
        }

        let payment = PaymentRecord {
            id: ctx.next_payment_id()?,
            uuid: Uuid::new_v4(),
            client_id: self.client_id,
            order_id: order.id,
            // The order's frozen total, never the current catalog price
            amount: order.amount,
            created_at: metadata.timestamp,
            updated_at: metadata.timestamp,
        };
        ctx.save_payment(&payment)?;

        order.status = OrderStatus::Paid;
        order.paid_at = Some(metadata.timestamp);
        order.updated_at = metadata.timestamp;
        ctx.save_order(&order)?;

        Ok(payment)
    }
}
