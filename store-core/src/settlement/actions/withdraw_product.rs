//! WithdrawProduct command handler
//!
//! Compensating batch transition fired when the catalog permanently removes
//! a product: every NEW order containing it is rejected by manager. PAID
//! orders are history and stay untouched.

use async_trait::async_trait;

use crate::settlement::traits::{
    CommandContext, CommandHandler, CommandMetadata, SettlementError,
};
use shared::OrderStatus;

/// WithdrawProduct action
#[derive(Debug, Clone)]
pub struct WithdrawProductAction {
    pub product_id: u64,
}

#[async_trait]
impl CommandHandler for WithdrawProductAction {
    type Output = Vec<u64>;

    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<u64>, SettlementError> {
        let mut rejected = Vec::new();

        // The open-order index holds exactly the NEW orders
        for order_id in ctx.open_order_ids()? {
            let mut order = ctx.load_order(order_id)?;
            if !order.contains_product(self.product_id) {
                continue;
            }
            order.status = OrderStatus::RejectedByManager;
            order.updated_at = metadata.timestamp;
            ctx.save_order(&order)?;
            rejected.push(order_id);
        }

        Ok(rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::storage::SettlementStorage;
    use rust_decimal::Decimal;
    use shared::{Currency, Money, OrderItemRecord, OrderRecord, Role};

    fn test_metadata() -> CommandMetadata {
        CommandMetadata {
            actor_id: 0,
            role: Role::Manager,
            timestamp: 1_700_000_000_000,
        }
    }

    fn seed_order(
        storage: &SettlementStorage,
        id: u64,
        product_id: u64,
        status: OrderStatus,
    ) {
        let mut order = OrderRecord::new(id, 42, Currency::Uah, 0);
        order.items.push(OrderItemRecord {
            product_id,
            count: 1,
            amount: Money::new(Decimal::from(100), Currency::Uah),
        });
        order.status = status;
        let txn = storage.begin_write().unwrap();
        storage.store_order(&txn, &order).unwrap();
        txn.commit().unwrap();
    }

    async fn withdraw(storage: &SettlementStorage, product_id: u64) -> Vec<u64> {
        let txn = storage.begin_write().unwrap();
        let mut ctx = CommandContext::new(&txn, &storage);
        let rejected = WithdrawProductAction { product_id }
            .execute(&mut ctx, &test_metadata())
            .await
            .unwrap();
        drop(ctx);
        txn.commit().unwrap();
        rejected
    }

    #[tokio::test]
    async fn test_new_orders_with_product_are_rejected() {
        let storage = SettlementStorage::open_in_memory().unwrap();
        seed_order(&storage, 1, 7, OrderStatus::New);
        seed_order(&storage, 2, 7, OrderStatus::New);
        seed_order(&storage, 3, 8, OrderStatus::New);

        let mut rejected = withdraw(&storage, 7).await;
        rejected.sort();
        assert_eq!(rejected, vec![1, 2]);

        assert_eq!(
            storage.get_order(1).unwrap().unwrap().status,
            OrderStatus::RejectedByManager
        );
        assert_eq!(
            storage.get_order(2).unwrap().unwrap().status,
            OrderStatus::RejectedByManager
        );
        // Unrelated order untouched
        assert_eq!(storage.get_order(3).unwrap().unwrap().status, OrderStatus::New);
    }

    #[tokio::test]
    async fn test_paid_orders_stay_paid() {
        let storage = SettlementStorage::open_in_memory().unwrap();
        seed_order(&storage, 1, 7, OrderStatus::Paid);

        let rejected = withdraw(&storage, 7).await;
        assert!(rejected.is_empty());
        assert_eq!(storage.get_order(1).unwrap().unwrap().status, OrderStatus::Paid);
    }

    #[tokio::test]
    async fn test_no_matching_orders_is_a_noop() {
        let storage = SettlementStorage::open_in_memory().unwrap();
        assert!(withdraw(&storage, 7).await.is_empty());
    }
}
