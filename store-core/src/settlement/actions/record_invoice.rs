//! RecordInvoice command handler
//!
//! Manager-only stock-in from a supplier invoice. Each line becomes an
//! immutable entry in the stock ledger; availability derives from them.

use async_trait::async_trait;

use crate::settlement::money::MAX_QUANTITY;
use crate::settlement::traits::{
    CommandContext, CommandHandler, CommandMetadata, SettlementError,
};
use shared::{InvoiceItemInput, InvoiceItemRecord};

/// RecordInvoice action
#[derive(Debug, Clone)]
pub struct RecordInvoiceAction {
    pub items: Vec<InvoiceItemInput>,
}

#[async_trait]
impl CommandHandler for RecordInvoiceAction {
    type Output = Vec<InvoiceItemRecord>;

    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<Vec<InvoiceItemRecord>, SettlementError> {
        if !metadata.role.is_manager() {
            return Err(SettlementError::Unauthorized(
                "only managers may record stock-in".to_string(),
            ));
        }

        let mut records = Vec::with_capacity(self.items.len());
        for item in &self.items {
            if item.quantity < 1 || item.quantity > MAX_QUANTITY {
                return Err(SettlementError::InvalidQuantity {
                    product_id: item.product_id,
                    count: item.quantity,
                });
            }
            let record = InvoiceItemRecord {
                id: ctx.next_invoice_item_id()?,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_cost: item.unit_cost,
                recorded_at: metadata.timestamp,
            };
            ctx.save_invoice_item(&record)?;
            records.push(record);
        }

        Ok(records)
    }
}
