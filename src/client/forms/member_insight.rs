use async_trait::async_trait;

use super::{FieldErrors, FormController, FormModel};
use crate::client::language::Language;
use crate::client::services::ServiceClient;
use crate::models::{MemberInsight, UpdateMemberInsightParams};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberInsightData {
    pub notes: String,
}

/// Admin-only notes about a member.
pub struct MemberInsightModel;

pub type MemberInsightForm = FormController<MemberInsightModel>;

#[async_trait]
impl FormModel for MemberInsightModel {
    type Record = MemberInsight;
    type Data = MemberInsightData;

    fn initial_data(record: &MemberInsight) -> MemberInsightData {
        MemberInsightData {
            notes: record.notes.clone().unwrap_or_default(),
        }
    }

    fn validate(_data: &MemberInsightData, _lang: Language) -> FieldErrors {
        FieldErrors::new()
    }

    async fn save(&self, client: &ServiceClient, record: &MemberInsight, data: &MemberInsightData) -> Option<MemberInsight> {
        let params = UpdateMemberInsightParams {
            notes: Some(data.notes.trim().to_string()),
        };
        client.update_member_insight(record.id, &params).await
    }
}
