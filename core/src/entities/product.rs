//! Manufactured products: the menu items built from supplies.
//!
//! Like supplies, writes reference the category and each ingredient by id
//! and carry a type tag; [`ProductShape`] produces that payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::category::FlatCategory;
use crate::entities::supply::{self, Supply};
use crate::entities::{contains_ci, required};
use crate::error::{ApiError, ValidationError};
use crate::resource::{to_json_value, Entity, EntityId, IdRef, Reference, ResourceClient, Routes, WriteShape};

pub const ROUTES: Routes = Routes {
    list: "/articuloManufacturadoDetalle/todos",
    item: "/articulosManufacturados",
    create: "/articuloManufacturadoDetalle/crearArticuloManufacturado",
    update: "/articulosManufacturados/modificar",
    delete: "/articulosManufacturados/baja",
};

pub const WRITE_TYPE: &str = "MANUFACTURADO";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,
    #[serde(rename = "denominacion")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "tiempoEstimadoMinutos", default)]
    pub estimated_minutes: i64,
    #[serde(rename = "preparacion", default)]
    pub preparation: String,
    #[serde(rename = "categoria")]
    pub category: Reference,
    #[serde(rename = "detalles", default)]
    pub details: Vec<ProductDetail>,
}

/// One ingredient line of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(rename = "cantidad")]
    pub quantity: f64,
    #[serde(rename = "articuloInsumo")]
    pub supply: Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(rename = "denominacion")]
    pub name: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "precioVenta")]
    pub sale_price: f64,
    #[serde(rename = "tiempoEstimadoMinutos")]
    pub estimated_minutes: i64,
    #[serde(rename = "preparacion")]
    pub preparation: String,
    #[serde(rename = "categoria")]
    pub category: Reference,
    #[serde(rename = "detalles")]
    pub details: Vec<ProductDetail>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(rename = "denominacion", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precioVenta", skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(rename = "tiempoEstimadoMinutos", skip_serializing_if = "Option::is_none")]
    pub estimated_minutes: Option<i64>,
    #[serde(rename = "preparacion", skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<Reference>,
    #[serde(rename = "detalles", skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ProductDetail>>,
}

impl From<NewProduct> for ProductPatch {
    fn from(draft: NewProduct) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
            sale_price: Some(draft.sale_price),
            estimated_minutes: Some(draft.estimated_minutes),
            preparation: Some(draft.preparation),
            category: Some(draft.category),
            details: Some(draft.details),
        }
    }
}

impl Entity for Product {
    type Draft = NewProduct;
    type Patch = ProductPatch;
    const KIND: &'static str = "product";

    fn id(&self) -> EntityId {
        self.id
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductWrite<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    denominacion: &'a str,
    descripcion: &'a str,
    precio_venta: f64,
    tiempo_estimado_minutos: i64,
    preparacion: &'a str,
    categoria: IdRef,
    detalles: Vec<DetailWrite>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DetailWrite {
    cantidad: f64,
    articulo_insumo: TypedRef,
}

#[derive(Debug, Serialize)]
struct TypedRef {
    id: EntityId,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ProductWrite<'_> {
    fn details(details: &[ProductDetail]) -> Vec<DetailWrite> {
        details
            .iter()
            .map(|d| DetailWrite {
                cantidad: d.quantity,
                articulo_insumo: TypedRef {
                    id: d.supply.id,
                    kind: supply::WRITE_TYPE,
                },
            })
            .collect()
    }
}

impl<'a> From<&'a NewProduct> for ProductWrite<'a> {
    fn from(p: &'a NewProduct) -> Self {
        Self {
            kind: WRITE_TYPE,
            denominacion: &p.name,
            descripcion: &p.description,
            precio_venta: p.sale_price,
            tiempo_estimado_minutos: p.estimated_minutes,
            preparacion: &p.preparation,
            categoria: p.category.id_ref(),
            detalles: Self::details(&p.details),
        }
    }
}

impl<'a> From<&'a Product> for ProductWrite<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            kind: WRITE_TYPE,
            denominacion: &p.name,
            descripcion: &p.description,
            precio_venta: p.sale_price,
            tiempo_estimado_minutos: p.estimated_minutes,
            preparacion: &p.preparation,
            categoria: p.category.id_ref(),
            detalles: Self::details(&p.details),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductShape;

impl WriteShape<Product> for ProductShape {
    fn create_body(&self, draft: &NewProduct) -> Result<Value, ApiError> {
        to_json_value(&ProductWrite::from(draft))
    }

    fn update_body(&self, entity: &Product) -> Result<Value, ApiError> {
        to_json_value(&ProductWrite::from(entity))
    }
}

pub fn client(base_url: &str) -> ResourceClient<Product> {
    ResourceClient::new(base_url, ROUTES).with_shape(ProductShape)
}

/// Products matching `term` in name or description and, when given, whose
/// category name is exactly `category`.
pub fn filter<'a>(products: &'a [Product], term: &str, category: Option<&str>) -> Vec<&'a Product> {
    let term = term.trim();
    products
        .iter()
        .filter(|p| contains_ci(&p.name, term) || contains_ci(&p.description, term))
        .filter(|p| category.map_or(true, |name| p.category.name == name))
        .collect()
}

/// Distinct category names in first-seen order, for the filter selector.
pub fn category_names(products: &[Product]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for product in products {
        if !names.contains(&product.category.name.as_str()) {
            names.push(&product.category.name);
        }
    }
    names
}

/// One ingredient row of the product form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ingredient {
    pub supply_id: EntityId,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub sale_price: f64,
    pub category_id: Option<EntityId>,
    pub estimated_minutes: i64,
    pub preparation: String,
    pub ingredients: Vec<Ingredient>,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            sale_price: product.sale_price,
            category_id: Some(product.category.id),
            estimated_minutes: product.estimated_minutes,
            preparation: product.preparation.clone(),
            ingredients: product
                .details
                .iter()
                .map(|d| Ingredient {
                    supply_id: d.supply.id,
                    quantity: d.quantity,
                })
                .collect(),
        }
    }

    pub fn prepare(&self, categories: &[FlatCategory], supplies: &[Supply]) -> Result<NewProduct, ValidationError> {
        let name = required(&self.name, "denominacion")?;
        let description = required(&self.description, "descripcion")?;
        if self.sale_price <= 0.0 {
            return Err(ValidationError::MissingField("precioVenta"));
        }
        let category_id = self.category_id.ok_or(ValidationError::MissingField("categoria"))?;
        let category = categories
            .iter()
            .find(|c| c.id == category_id)
            .map(FlatCategory::reference)
            .ok_or(ValidationError::UnknownCategory(category_id))?;

        let details = self
            .ingredients
            .iter()
            .map(|ingredient| {
                let supply = supplies
                    .iter()
                    .find(|s| s.id == ingredient.supply_id)
                    .ok_or(ValidationError::UnknownSupply(ingredient.supply_id))?;
                if !supply.for_elaboration {
                    return Err(ValidationError::NotAnIngredient(supply.id));
                }
                Ok(ProductDetail {
                    quantity: ingredient.quantity.max(0.0),
                    supply: Reference::new(supply.id, supply.name.clone()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NewProduct {
            name,
            description,
            sale_price: self.sale_price,
            estimated_minutes: self.estimated_minutes.max(0),
            preparation: self.preparation.trim().to_string(),
            category,
            details,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<FlatCategory> {
        vec![FlatCategory {
            id: 8,
            name: "Pizzas".to_string(),
            is_supply: false,
            parent_id: None,
        }]
    }

    fn supply(id: EntityId, name: &str, for_elaboration: bool) -> Supply {
        Supply {
            id,
            name: name.to_string(),
            category: Reference::new(1, "Insumos"),
            unit: Reference::new(1, "Kilogramo"),
            purchase_price: 10.0,
            sale_price: 10.0,
            stock: 5,
            min_stock: 1,
            max_stock: 10,
            for_elaboration,
        }
    }

    fn product(id: EntityId, name: &str, description: &str, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            sale_price: 9000.0,
            estimated_minutes: 20,
            preparation: String::new(),
            category: Reference::new(id, category),
            details: Vec::new(),
        }
    }

    fn form() -> ProductForm {
        ProductForm {
            name: "Muzzarella".to_string(),
            description: "Pizza de muzzarella".to_string(),
            sale_price: 9000.0,
            category_id: Some(8),
            estimated_minutes: 25,
            preparation: "Hornear".to_string(),
            ingredients: vec![Ingredient {
                supply_id: 3,
                quantity: -2.0,
            }],
        }
    }

    #[test]
    fn prepare_resolves_category_and_clamps_quantities() {
        let supplies = vec![supply(3, "Harina", true)];
        let draft = form().prepare(&categories(), &supplies).unwrap();

        assert_eq!(draft.category, Reference::new(8, "Pizzas"));
        assert_eq!(draft.details.len(), 1);
        assert_eq!(draft.details[0].quantity, 0.0);
        assert_eq!(draft.details[0].supply, Reference::new(3, "Harina"));
    }

    #[test]
    fn prepare_rejects_missing_required_fields() {
        let supplies = vec![supply(3, "Harina", true)];
        let no_price = ProductForm {
            sale_price: 0.0,
            ..form()
        };
        assert_eq!(
            no_price.prepare(&categories(), &supplies).unwrap_err(),
            ValidationError::MissingField("precioVenta")
        );

        let no_description = ProductForm {
            description: String::new(),
            ..form()
        };
        assert_eq!(
            no_description.prepare(&categories(), &supplies).unwrap_err(),
            ValidationError::MissingField("descripcion")
        );

        let bad_category = ProductForm {
            category_id: Some(99),
            ..form()
        };
        assert_eq!(
            bad_category.prepare(&categories(), &supplies).unwrap_err(),
            ValidationError::UnknownCategory(99)
        );
    }

    #[test]
    fn only_elaboration_supplies_are_ingredients() {
        let supplies = vec![supply(3, "Coca-Cola", false)];
        assert_eq!(
            form().prepare(&categories(), &supplies).unwrap_err(),
            ValidationError::NotAnIngredient(3)
        );
        assert_eq!(
            form().prepare(&categories(), &[]).unwrap_err(),
            ValidationError::UnknownSupply(3)
        );
    }

    #[test]
    fn write_shape_tags_product_and_ingredients() {
        let supplies = vec![supply(3, "Harina", true)];
        let draft = ProductForm {
            ingredients: vec![Ingredient {
                supply_id: 3,
                quantity: 0.5,
            }],
            ..form()
        }
        .prepare(&categories(), &supplies)
        .unwrap();

        let request = client("http://localhost:8080").build_create(&draft).unwrap();

        assert_eq!(
            request.url,
            "http://localhost:8080/articuloManufacturadoDetalle/crearArticuloManufacturado"
        );
        let body: Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "type": "MANUFACTURADO",
                "denominacion": "Muzzarella",
                "descripcion": "Pizza de muzzarella",
                "precioVenta": 9000.0,
                "tiempoEstimadoMinutos": 25,
                "preparacion": "Hornear",
                "categoria": { "id": 8 },
                "detalles": [
                    { "cantidad": 0.5, "articuloInsumo": { "id": 3, "type": "INSUMO" } }
                ]
            })
        );
    }

    #[test]
    fn filter_by_text_and_category() {
        let products = vec![
            product(1, "Muzzarella", "Pizza clásica", "Pizzas"),
            product(2, "Flan", "Con dulce de leche", "Postres"),
            product(3, "Fugazzeta", "Pizza con cebolla", "Pizzas"),
        ];

        assert_eq!(filter(&products, "pizza", None).len(), 2);
        assert_eq!(filter(&products, "", Some("Postres"))[0].id, 2);
        assert!(filter(&products, "flan", Some("Pizzas")).is_empty());
        assert_eq!(category_names(&products), vec!["Pizzas", "Postres"]);
    }

    #[test]
    fn form_prefills_from_product() {
        let mut p = product(4, "Muzzarella", "Pizza", "Pizzas");
        p.details.push(ProductDetail {
            quantity: 0.3,
            supply: Reference::new(3, "Harina"),
        });
        let form = ProductForm::from_product(&p);
        assert_eq!(form.category_id, Some(4));
        assert_eq!(
            form.ingredients,
            vec![Ingredient {
                supply_id: 3,
                quantity: 0.3
            }]
        );
    }
}
