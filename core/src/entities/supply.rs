//! Supplies (`/articuloInsumo`): ingredients and resold goods.
//!
//! Reads embed the category and measure unit; writes reference them by id
//! and carry a `"type": "INSUMO"` tag, so the client uses [`SupplyShape`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::category::{supplies_category, FlatCategory};
use crate::entities::unit::MeasureUnit;
use crate::entities::{contains_ci, required};
use crate::error::{ApiError, ValidationError};
use crate::resource::{to_json_value, Entity, EntityId, IdRef, Reference, ResourceClient, Routes, WriteShape};

pub const ROUTES: Routes = Routes {
    list: "/articuloInsumo/listar",
    item: "/articuloInsumo",
    create: "/articuloInsumo/crear",
    update: "/articuloInsumo/modificar",
    delete: "/articuloInsumo/baja",
};

pub const WRITE_TYPE: &str = "INSUMO";

pub const DEFAULT_MAX_STOCK: i64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub id: EntityId,
    #[serde(rename = "denominacion")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: Reference,
    #[serde(rename = "unidadMedida")]
    pub unit: Reference,
    #[serde(rename = "precioCompra")]
    pub purchase_price: f64,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "stockActual", default)]
    pub stock: i64,
    #[serde(rename = "stockMinimo", default)]
    pub min_stock: i64,
    #[serde(rename = "stockMaximo", default)]
    pub max_stock: i64,
    #[serde(rename = "esParaElaborar", default)]
    pub for_elaboration: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSupply {
    #[serde(rename = "denominacion")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: Reference,
    #[serde(rename = "unidadMedida")]
    pub unit: Reference,
    #[serde(rename = "precioCompra")]
    pub purchase_price: f64,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "stockActual")]
    pub stock: i64,
    #[serde(rename = "stockMinimo")]
    pub min_stock: i64,
    #[serde(rename = "stockMaximo")]
    pub max_stock: i64,
    #[serde(rename = "esParaElaborar")]
    pub for_elaboration: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyPatch {
    #[serde(rename = "denominacion", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<Reference>,
    #[serde(rename = "unidadMedida", skip_serializing_if = "Option::is_none")]
    pub unit: Option<Reference>,
    #[serde(rename = "precioCompra", skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(rename = "precioVenta", skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(rename = "stockActual", skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(rename = "stockMinimo", skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
    #[serde(rename = "stockMaximo", skip_serializing_if = "Option::is_none")]
    pub max_stock: Option<i64>,
    #[serde(rename = "esParaElaborar", skip_serializing_if = "Option::is_none")]
    pub for_elaboration: Option<bool>,
}

impl From<NewSupply> for SupplyPatch {
    fn from(draft: NewSupply) -> Self {
        Self {
            name: Some(draft.name),
            category: Some(draft.category),
            unit: Some(draft.unit),
            purchase_price: Some(draft.purchase_price),
            sale_price: Some(draft.sale_price),
            stock: Some(draft.stock),
            min_stock: Some(draft.min_stock),
            max_stock: Some(draft.max_stock),
            for_elaboration: Some(draft.for_elaboration),
        }
    }
}

impl Entity for Supply {
    type Draft = NewSupply;
    type Patch = SupplyPatch;
    const KIND: &'static str = "supply";

    fn id(&self) -> EntityId {
        self.id
    }
}

/// Wire shape of supply writes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SupplyWrite<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    denominacion: &'a str,
    categoria: IdRef,
    unidad_medida: IdRef,
    precio_compra: f64,
    precio_venta: f64,
    stock_actual: i64,
    stock_minimo: i64,
    stock_maximo: i64,
    es_para_elaborar: bool,
}

impl<'a> From<&'a NewSupply> for SupplyWrite<'a> {
    fn from(s: &'a NewSupply) -> Self {
        Self {
            kind: WRITE_TYPE,
            denominacion: &s.name,
            categoria: s.category.id_ref(),
            unidad_medida: s.unit.id_ref(),
            precio_compra: s.purchase_price,
            precio_venta: s.sale_price,
            stock_actual: s.stock,
            stock_minimo: s.min_stock,
            stock_maximo: s.max_stock,
            es_para_elaborar: s.for_elaboration,
        }
    }
}

impl<'a> From<&'a Supply> for SupplyWrite<'a> {
    fn from(s: &'a Supply) -> Self {
        Self {
            kind: WRITE_TYPE,
            denominacion: &s.name,
            categoria: s.category.id_ref(),
            unidad_medida: s.unit.id_ref(),
            precio_compra: s.purchase_price,
            precio_venta: s.sale_price,
            stock_actual: s.stock,
            stock_minimo: s.min_stock,
            stock_maximo: s.max_stock,
            es_para_elaborar: s.for_elaboration,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SupplyShape;

impl WriteShape<Supply> for SupplyShape {
    fn create_body(&self, draft: &NewSupply) -> Result<Value, ApiError> {
        to_json_value(&SupplyWrite::from(draft))
    }

    fn update_body(&self, entity: &Supply) -> Result<Value, ApiError> {
        to_json_value(&SupplyWrite::from(entity))
    }
}

pub fn client(base_url: &str) -> ResourceClient<Supply> {
    ResourceClient::new(base_url, ROUTES).with_shape(SupplyShape)
}

pub fn search<'a>(supplies: &'a [Supply], term: &str) -> Vec<&'a Supply> {
    let term = term.trim();
    supplies.iter().filter(|s| contains_ci(&s.name, term)).collect()
}

/// Supplies that may be used as product ingredients.
pub fn ingredients(supplies: &[Supply]) -> Vec<&Supply> {
    supplies.iter().filter(|s| s.for_elaboration).collect()
}

/// Supply modal fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyForm {
    pub name: String,
    pub category_id: Option<EntityId>,
    pub unit_id: Option<EntityId>,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub for_elaboration: bool,
}

impl Default for SupplyForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category_id: None,
            unit_id: None,
            purchase_price: 0.0,
            sale_price: 0.0,
            stock: 0,
            min_stock: 0,
            max_stock: DEFAULT_MAX_STOCK,
            for_elaboration: false,
        }
    }
}

impl SupplyForm {
    pub fn from_supply(supply: &Supply) -> Self {
        Self {
            name: supply.name.clone(),
            category_id: Some(supply.category.id),
            unit_id: Some(supply.unit.id),
            purchase_price: supply.purchase_price,
            sale_price: supply.sale_price,
            stock: supply.stock,
            min_stock: supply.min_stock,
            max_stock: supply.max_stock,
            for_elaboration: supply.for_elaboration,
        }
    }

    /// Validate and resolve the form into a create payload.
    ///
    /// Supplies for elaboration are not sold: their sale price is forced to
    /// the purchase price and they are always filed under the "Insumos"
    /// category, whatever the category selector says.
    pub fn prepare(&self, categories: &[FlatCategory], units: &[MeasureUnit]) -> Result<NewSupply, ValidationError> {
        let name = required(&self.name, "denominacion")?;

        let unit_id = self.unit_id.ok_or(ValidationError::MissingField("unidadMedida"))?;
        let unit = units
            .iter()
            .find(|u| u.id == unit_id)
            .map(MeasureUnit::reference)
            .ok_or(ValidationError::UnknownUnit(unit_id))?;

        if !self.for_elaboration && self.sale_price < self.purchase_price {
            return Err(ValidationError::SalePriceBelowPurchase {
                sale: self.sale_price,
                purchase: self.purchase_price,
            });
        }
        let sale_price = if self.for_elaboration {
            self.purchase_price
        } else {
            self.sale_price
        };

        let category = if self.for_elaboration {
            supplies_category(categories)
                .map(FlatCategory::reference)
                .ok_or(ValidationError::SuppliesCategoryMissing)?
        } else {
            let id = self.category_id.ok_or(ValidationError::MissingField("categoria"))?;
            categories
                .iter()
                .find(|c| c.id == id)
                .map(FlatCategory::reference)
                .ok_or(ValidationError::UnknownCategory(id))?
        };

        Ok(NewSupply {
            name,
            category,
            unit,
            purchase_price: self.purchase_price,
            sale_price,
            stock: self.stock,
            min_stock: self.min_stock,
            max_stock: self.max_stock,
            for_elaboration: self.for_elaboration,
        })
    }
}
