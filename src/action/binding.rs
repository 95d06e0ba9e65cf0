use crate::document;
use crate::model::{Attributes, CampaignRouting};
use serde_json::Value;

/// A model that can be captured and later put back, for `ResetAction`.
pub trait Snapshot {
    type Backup;

    fn backup(&self) -> Self::Backup;

    /// Puts back every field present in `backup`. Must not fail.
    fn restore(&mut self, backup: &Self::Backup);
}

/// A model with a persistence key and a document form, for `SaveAction`.
pub trait Persistable {
    fn persistence_key(&self) -> &str;

    fn to_document(&self) -> Value;
}

impl Snapshot for CampaignRouting {
    type Backup = CampaignRouting;

    fn backup(&self) -> Self::Backup {
        self.clone()
    }

    fn restore(&mut self, backup: &Self::Backup) {
        self.restore_from(backup);
    }
}

impl Persistable for CampaignRouting {
    fn persistence_key(&self) -> &str {
        self.campaign_id()
    }

    fn to_document(&self) -> Value {
        document::to_value(self)
    }
}

/// Keys present at backup time get their values back; keys added since stay.
impl Snapshot for Attributes {
    type Backup = Attributes;

    fn backup(&self) -> Self::Backup {
        self.clone()
    }

    fn restore(&mut self, backup: &Self::Backup) {
        for (key, value) in backup {
            self.insert(key.clone(), value.clone());
        }
    }
}
