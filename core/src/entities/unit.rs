//! Measure units (`/unidadmedida`), used by the supply form.

use serde::{Deserialize, Serialize};

use crate::resource::{Entity, EntityId, Reference, ResourceClient, Routes};

pub const ROUTES: Routes = Routes::rest("/unidadmedida");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureUnit {
    pub id: EntityId,
    #[serde(rename = "denominacion")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMeasureUnit {
    #[serde(rename = "denominacion")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureUnitPatch {
    #[serde(rename = "denominacion", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Entity for MeasureUnit {
    type Draft = NewMeasureUnit;
    type Patch = MeasureUnitPatch;
    const KIND: &'static str = "measure unit";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl MeasureUnit {
    pub fn reference(&self) -> Reference {
        Reference::new(self.id, self.name.clone())
    }
}

pub fn client(base_url: &str) -> ResourceClient<MeasureUnit> {
    ResourceClient::new(base_url, ROUTES)
}
