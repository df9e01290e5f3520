//! Product categories and their subcategories (`/categoria`).
//!
//! The list endpoint returns top-level categories with their subcategories
//! embedded, and both levels are soft-deleted. Screens and forms work on the
//! flattened view produced by [`flatten`].

use serde::{Deserialize, Serialize};

use crate::entities::{contains_ci, required};
use crate::error::ValidationError;
use crate::resource::{Entity, EntityId, IdRef, Reference, ResourceClient, Routes};

pub const ROUTES: Routes = Routes {
    list: "/categoria/listar",
    item: "/categoria",
    create: "/categoria",
    update: "/categoria",
    delete: "/categoria",
};

/// Name of the category every supply for elaboration is filed under.
pub const SUPPLIES_CATEGORY: &str = "insumos";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    #[serde(rename = "denominacion")]
    pub name: String,
    #[serde(rename = "esInsumo", default)]
    pub is_supply: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(rename = "subcategorias", default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: EntityId,
    #[serde(rename = "denominacion")]
    pub name: String,
    #[serde(rename = "esInsumo", default)]
    pub is_supply: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// Create payload for both categories and subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    #[serde(rename = "denominacion")]
    pub name: String,
    #[serde(rename = "esInsumo")]
    pub is_supply: bool,
    #[serde(rename = "categoriaPadre", skip_serializing_if = "Option::is_none")]
    pub parent: Option<IdRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(rename = "denominacion", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "esInsumo", skip_serializing_if = "Option::is_none")]
    pub is_supply: Option<bool>,
}

impl From<NewCategory> for CategoryPatch {
    fn from(draft: NewCategory) -> Self {
        Self {
            name: Some(draft.name),
            is_supply: Some(draft.is_supply),
        }
    }
}

impl Entity for Category {
    type Draft = NewCategory;
    type Patch = CategoryPatch;
    const KIND: &'static str = "category";

    fn id(&self) -> EntityId {
        self.id
    }

    fn is_visible(&self) -> bool {
        !self.deleted
    }
}

pub fn client(base_url: &str) -> ResourceClient<Category> {
    ResourceClient::new(base_url, ROUTES)
}

/// One row of the flattened category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCategory {
    pub id: EntityId,
    pub name: String,
    pub is_supply: bool,
    /// `None` for top-level categories.
    pub parent_id: Option<EntityId>,
}

impl FlatCategory {
    pub fn reference(&self) -> Reference {
        Reference::new(self.id, self.name.clone())
    }

    pub fn is_supplies_category(&self) -> bool {
        self.is_supply && self.name.trim().to_lowercase() == SUPPLIES_CATEGORY
    }
}

/// Each live category followed by its live subcategories.
pub fn flatten(categories: &[Category]) -> Vec<FlatCategory> {
    let mut rows = Vec::new();
    for category in categories.iter().filter(|c| !c.deleted) {
        rows.push(FlatCategory {
            id: category.id,
            name: category.name.clone(),
            is_supply: category.is_supply,
            parent_id: None,
        });
        rows.extend(category.subcategories.iter().filter(|s| !s.deleted).map(|s| FlatCategory {
            id: s.id,
            name: s.name.clone(),
            is_supply: s.is_supply,
            parent_id: Some(category.id),
        }));
    }
    rows
}

/// The fixed "Insumos" category, if the backend has one.
pub fn supplies_category(rows: &[FlatCategory]) -> Option<&FlatCategory> {
    rows.iter().find(|row| row.is_supplies_category())
}

/// Categories a sellable supply may be filed under.
pub fn sale_categories(rows: &[FlatCategory]) -> Vec<&FlatCategory> {
    rows.iter().filter(|row| !row.is_supply).collect()
}

pub fn search<'a>(categories: &'a [Category], term: &str) -> Vec<&'a Category> {
    let term = term.trim();
    categories.iter().filter(|c| contains_ci(&c.name, term)).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub is_supply: bool,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            is_supply: category.is_supply,
        }
    }

    pub fn prepare(&self) -> Result<NewCategory, ValidationError> {
        Ok(NewCategory {
            name: required(&self.name, "denominacion")?,
            is_supply: self.is_supply,
            parent: None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubcategoryForm {
    pub name: String,
    pub is_supply: bool,
    pub parent_id: Option<EntityId>,
}

impl SubcategoryForm {
    /// The parent must be a live top-level category.
    pub fn prepare(&self, rows: &[FlatCategory]) -> Result<NewCategory, ValidationError> {
        let name = required(&self.name, "denominacion")?;
        let parent_id = self.parent_id.ok_or(ValidationError::MissingField("categoriaPadre"))?;
        if !rows.iter().any(|row| row.id == parent_id && row.parent_id.is_none()) {
            return Err(ValidationError::UnknownCategory(parent_id));
        }
        Ok(NewCategory {
            name,
            is_supply: self.is_supply,
            parent: Some(IdRef { id: parent_id }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"[
        {"id":1,"denominacion":"Insumos","esInsumo":true,"deleted":false,"subcategorias":[
            {"id":4,"denominacion":"Harinas","esInsumo":true,"deleted":false}
        ]},
        {"id":2,"denominacion":"Bebidas","esInsumo":false,"deleted":false,"subcategorias":[
            {"id":5,"denominacion":"Gaseosas","esInsumo":false,"deleted":false},
            {"id":6,"denominacion":"Vinos","esInsumo":false,"deleted":true}
        ]},
        {"id":3,"denominacion":"Postres","esInsumo":false,"deleted":true,"subcategorias":[
            {"id":7,"denominacion":"Helados","esInsumo":false,"deleted":false}
        ]}
    ]"#;

    fn listing() -> Vec<Category> {
        serde_json::from_str(LISTING).unwrap()
    }

    #[test]
    fn flatten_lists_parents_then_live_children() {
        let rows = flatten(&listing());
        let ids: Vec<EntityId> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 4, 2, 5]);
        assert_eq!(rows[1].parent_id, Some(1));
        assert_eq!(rows[2].parent_id, None);
        assert_eq!(rows[3].name, "Gaseosas");
    }

    #[test]
    fn subcategories_of_deleted_parent_are_dropped() {
        let rows = flatten(&listing());
        assert!(rows.iter().all(|r| r.id != 7));
    }

    #[test]
    fn supplies_category_is_found_case_insensitively() {
        let rows = flatten(&listing());
        assert_eq!(supplies_category(&rows).map(|r| r.id), Some(1));

        let no_supplies: Vec<FlatCategory> = rows.into_iter().filter(|r| r.id != 1).collect();
        assert!(supplies_category(&no_supplies).is_none());
    }

    #[test]
    fn sale_categories_exclude_supply_rows() {
        let rows = flatten(&listing());
        let ids: Vec<EntityId> = sale_categories(&rows).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn subcategory_form_needs_live_top_level_parent() {
        let rows = flatten(&listing());
        let mut form = SubcategoryForm {
            name: "Aguas".to_string(),
            is_supply: false,
            parent_id: None,
        };
        assert_eq!(
            form.prepare(&rows).unwrap_err(),
            ValidationError::MissingField("categoriaPadre")
        );

        form.parent_id = Some(5);
        assert_eq!(form.prepare(&rows).unwrap_err(), ValidationError::UnknownCategory(5));

        form.parent_id = Some(2);
        let draft = form.prepare(&rows).unwrap();
        assert_eq!(draft.parent, Some(IdRef { id: 2 }));
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({ "denominacion": "Aguas", "esInsumo": false, "categoriaPadre": { "id": 2 } })
        );
    }

    #[test]
    fn top_level_draft_has_no_parent_field() {
        let draft = CategoryForm {
            name: "Pizzas".to_string(),
            is_supply: false,
        }
        .prepare()
        .unwrap();
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("categoriaPadre").is_none());
    }

    #[test]
    fn search_filters_by_name() {
        let categories = listing();
        assert_eq!(search(&categories, "beb").len(), 1);
        assert_eq!(search(&categories, "").len(), 3);
    }
}
