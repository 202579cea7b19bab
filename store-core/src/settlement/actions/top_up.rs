//! TopUp command handler
//!
//! Appends a manager-issued credit to a client's ledger. Top-ups are
//! immutable once written; the balance projection derives from them.

use async_trait::async_trait;

use crate::settlement::traits::{
    CommandContext, CommandHandler, CommandMetadata, SettlementError,
};
use shared::{Money, TopUpRecord};

/// TopUp action
#[derive(Debug, Clone)]
pub struct TopUpAction {
    pub client_id: u64,
    pub amount: Money,
}

#[async_trait]
impl CommandHandler for TopUpAction {
    type Output = TopUpRecord;

    async fn execute(
        &self,
        ctx: &mut CommandContext<'_>,
        metadata: &CommandMetadata,
    ) -> Result<TopUpRecord, SettlementError> {
        if !metadata.role.is_manager() {
            return Err(SettlementError::Unauthorized(
                "only managers may credit client accounts".to_string(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(SettlementError::InvalidAmount);
        }

        let topup = TopUpRecord {
            id: ctx.next_topup_id()?,
            client_id: self.client_id,
            amount: self.amount,
            created_at: metadata.timestamp,
        };
        ctx.save_topup(&topup)?;

        Ok(topup)
    }
}
