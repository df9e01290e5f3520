//! In-memory state behind the mock routes.
//!
//! Ids are assigned by the server and never reused. Categories and their
//! subcategories draw from one id sequence, since both levels are addressed
//! through the same `/categoria/{id}` path.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::model::{
    Categoria, CategoriaInput, CategoriaPatch, Detalle, Empleado, EmpleadoInput, Id, IdRef, Insumo,
    InsumoInput, Manufacturado, ManufacturadoInput, Ref, Rol, RolInput, Subcategoria, UnidadMedida,
    UnidadMedidaInput,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Unprocessable(String),
}

/// Rows of one resource keyed by id.
#[derive(Debug, Clone)]
pub struct Table<R> {
    rows: BTreeMap<Id, R>,
    next_id: Id,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<R: Clone> Table<R> {
    pub fn allocate(&mut self) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert_with(&mut self, build: impl FnOnce(Id) -> R) -> R {
        let id = self.allocate();
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: Id) -> Option<&R> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut R> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: Id) -> Option<R> {
        self.rows.remove(&id)
    }

    pub fn all(&self) -> Vec<R> {
        self.rows.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A resource served by the plain REST handlers.
pub trait Record: Clone + Serialize + Send + Sync + 'static {
    type Input: DeserializeOwned + Send + 'static;
    const KIND: &'static str;

    fn build(id: Id, input: Self::Input) -> Self;
    fn apply(&mut self, input: Self::Input);
    fn table(backend: &Backend) -> &Table<Self>;
    fn table_mut(backend: &mut Backend) -> &mut Table<Self>;

    /// Returns `true` if the row was flagged and must be kept.
    fn soft_delete(&mut self) -> bool {
        false
    }
}

impl Record for Empleado {
    type Input = EmpleadoInput;
    const KIND: &'static str = "employee";

    fn build(id: Id, input: EmpleadoInput) -> Self {
        Self {
            id,
            nombre: input.nombre,
            apellido: input.apellido,
            email: input.email,
            dni: input.dni,
        }
    }

    fn apply(&mut self, input: EmpleadoInput) {
        *self = Self::build(self.id, input);
    }

    fn table(backend: &Backend) -> &Table<Self> {
        &backend.employees
    }

    fn table_mut(backend: &mut Backend) -> &mut Table<Self> {
        &mut backend.employees
    }
}

impl Record for Rol {
    type Input = RolInput;
    const KIND: &'static str = "role";

    fn build(id: Id, input: RolInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            auth0_role_id: input.auth0_role_id,
            deleted: false,
        }
    }

    fn apply(&mut self, input: RolInput) {
        self.name = input.name;
        self.description = input.description;
        if input.auth0_role_id.is_some() {
            self.auth0_role_id = input.auth0_role_id;
        }
    }

    fn table(backend: &Backend) -> &Table<Self> {
        &backend.roles
    }

    fn table_mut(backend: &mut Backend) -> &mut Table<Self> {
        &mut backend.roles
    }

    fn soft_delete(&mut self) -> bool {
        self.deleted = true;
        true
    }
}

impl Record for UnidadMedida {
    type Input = UnidadMedidaInput;
    const KIND: &'static str = "measure unit";

    fn build(id: Id, input: UnidadMedidaInput) -> Self {
        Self {
            id,
            denominacion: input.denominacion,
        }
    }

    fn apply(&mut self, input: UnidadMedidaInput) {
        self.denominacion = input.denominacion;
    }

    fn table(backend: &Backend) -> &Table<Self> {
        &backend.units
    }

    fn table_mut(backend: &mut Backend) -> &mut Table<Self> {
        &mut backend.units
    }
}

#[derive(Debug, Clone, Default)]
pub struct Backend {
    pub employees: Table<Empleado>,
    pub roles: Table<Rol>,
    pub units: Table<UnidadMedida>,
    pub categories: Table<Categoria>,
    pub supplies: Table<Insumo>,
    pub products: Table<Manufacturado>,
}

impl Backend {
    /// The "Insumos" supplies category and the usual measure units.
    pub fn seeded() -> Self {
        let mut backend = Self::default();
        backend.categories.insert_with(|id| Categoria {
            id,
            denominacion: "Insumos".to_string(),
            es_insumo: true,
            deleted: false,
            subcategorias: Vec::new(),
        });
        for name in ["Kilogramo", "Litro", "Unidad"] {
            backend.units.insert_with(|id| UnidadMedida {
                id,
                denominacion: name.to_string(),
            });
        }
        backend
    }

    // --- generic records ---

    pub fn create<R: Record>(&mut self, input: R::Input) -> R {
        R::table_mut(self).insert_with(|id| R::build(id, input))
    }

    pub fn update<R: Record>(&mut self, id: Id, input: R::Input) -> Result<R, BackendError> {
        let row = R::table_mut(self).get_mut(id).ok_or(BackendError::NotFound)?;
        row.apply(input);
        Ok(row.clone())
    }

    pub fn delete<R: Record>(&mut self, id: Id) -> Result<(), BackendError> {
        let table = R::table_mut(self);
        let row = table.get_mut(id).ok_or(BackendError::NotFound)?;
        if !row.soft_delete() {
            table.remove(id);
        }
        Ok(())
    }

    // --- categories ---

    /// A category at either level, subcategories in category shape.
    pub fn category(&self, id: Id) -> Option<Categoria> {
        self.categories.rows.values().find_map(|c| {
            if c.id == id {
                Some(c.clone())
            } else {
                c.subcategorias.iter().find(|s| s.id == id).map(Categoria::from)
            }
        })
    }

    pub fn create_category(&mut self, input: CategoriaInput) -> Result<Categoria, BackendError> {
        let Some(IdRef { id: parent_id }) = input.categoria_padre else {
            return Ok(self.categories.insert_with(|id| Categoria {
                id,
                denominacion: input.denominacion,
                es_insumo: input.es_insumo,
                deleted: false,
                subcategorias: Vec::new(),
            }));
        };

        if !self.categories.get(parent_id).is_some_and(|p| !p.deleted) {
            return Err(BackendError::Unprocessable(format!("unknown parent category {parent_id}")));
        }
        let sub = Subcategoria {
            id: self.categories.allocate(),
            denominacion: input.denominacion,
            es_insumo: input.es_insumo,
            deleted: false,
        };
        let parent = self.categories.get_mut(parent_id).ok_or(BackendError::NotFound)?;
        parent.subcategorias.push(sub.clone());
        Ok(Categoria::from(&sub))
    }

    pub fn update_category(&mut self, id: Id, patch: CategoriaPatch) -> Result<Categoria, BackendError> {
        if let Some(category) = self.categories.get_mut(id) {
            if let Some(name) = patch.denominacion {
                category.denominacion = name;
            }
            if let Some(is_supply) = patch.es_insumo {
                category.es_insumo = is_supply;
            }
            return Ok(category.clone());
        }
        let sub = self.subcategory_mut(id).ok_or(BackendError::NotFound)?;
        if let Some(name) = patch.denominacion {
            sub.denominacion = name;
        }
        if let Some(is_supply) = patch.es_insumo {
            sub.es_insumo = is_supply;
        }
        Ok(Categoria::from(&*sub))
    }

    pub fn delete_category(&mut self, id: Id) -> Result<(), BackendError> {
        if let Some(category) = self.categories.get_mut(id) {
            category.deleted = true;
            return Ok(());
        }
        let sub = self.subcategory_mut(id).ok_or(BackendError::NotFound)?;
        sub.deleted = true;
        Ok(())
    }

    fn subcategory_mut(&mut self, id: Id) -> Option<&mut Subcategoria> {
        self.categories
            .rows
            .values_mut()
            .flat_map(|c| c.subcategorias.iter_mut())
            .find(|s| s.id == id)
    }

    /// A live category or subcategory as an embedded reference.
    fn category_ref(&self, id: Id) -> Result<Ref, BackendError> {
        let live = self.categories.rows.values().filter(|c| !c.deleted).find_map(|c| {
            if c.id == id {
                Some(c.denominacion.clone())
            } else {
                c.subcategorias
                    .iter()
                    .find(|s| s.id == id && !s.deleted)
                    .map(|s| s.denominacion.clone())
            }
        });
        live.map(|denominacion| Ref { id, denominacion })
            .ok_or_else(|| BackendError::Unprocessable(format!("unknown category {id}")))
    }

    // --- supplies ---

    fn resolve_supply(&self, id: Id, input: InsumoInput) -> Result<Insumo, BackendError> {
        let categoria = self.category_ref(input.categoria.id)?;
        let unit = self
            .units
            .get(input.unidad_medida.id)
            .ok_or_else(|| BackendError::Unprocessable(format!("unknown measure unit {}", input.unidad_medida.id)))?;
        Ok(Insumo {
            id,
            denominacion: input.denominacion,
            categoria,
            unidad_medida: Ref {
                id: unit.id,
                denominacion: unit.denominacion.clone(),
            },
            precio_compra: input.precio_compra,
            precio_venta: input.precio_venta,
            stock_actual: input.stock_actual,
            stock_minimo: input.stock_minimo,
            stock_maximo: input.stock_maximo,
            es_para_elaborar: input.es_para_elaborar,
        })
    }

    pub fn create_supply(&mut self, input: InsumoInput) -> Result<Insumo, BackendError> {
        // Ids are allocated only for accepted writes.
        let supply = self.resolve_supply(0, input)?;
        Ok(self.supplies.insert_with(|id| Insumo { id, ..supply }))
    }

    pub fn update_supply(&mut self, id: Id, input: InsumoInput) -> Result<Insumo, BackendError> {
        if self.supplies.get(id).is_none() {
            return Err(BackendError::NotFound);
        }
        let supply = self.resolve_supply(id, input)?;
        self.supplies.rows.insert(id, supply.clone());
        Ok(supply)
    }

    pub fn delete_supply(&mut self, id: Id) -> Result<(), BackendError> {
        self.supplies.remove(id).map(|_| ()).ok_or(BackendError::NotFound)
    }

    // --- products ---

    fn resolve_product(&self, id: Id, input: ManufacturadoInput) -> Result<Manufacturado, BackendError> {
        let categoria = self.category_ref(input.categoria.id)?;
        let detalles = input
            .detalles
            .into_iter()
            .map(|d| {
                let supply = self.supplies.get(d.articulo_insumo.id).ok_or_else(|| {
                    BackendError::Unprocessable(format!("unknown supply {}", d.articulo_insumo.id))
                })?;
                Ok(Detalle {
                    cantidad: d.cantidad,
                    articulo_insumo: Ref {
                        id: supply.id,
                        denominacion: supply.denominacion.clone(),
                    },
                })
            })
            .collect::<Result<Vec<_>, BackendError>>()?;
        Ok(Manufacturado {
            id,
            denominacion: input.denominacion,
            descripcion: input.descripcion,
            precio_venta: input.precio_venta,
            tiempo_estimado_minutos: input.tiempo_estimado_minutos,
            preparacion: input.preparacion,
            categoria,
            detalles,
        })
    }

    pub fn create_product(&mut self, input: ManufacturadoInput) -> Result<Manufacturado, BackendError> {
        let product = self.resolve_product(0, input)?;
        Ok(self.products.insert_with(|id| Manufacturado { id, ..product }))
    }

    pub fn update_product(&mut self, id: Id, input: ManufacturadoInput) -> Result<Manufacturado, BackendError> {
        if self.products.get(id).is_none() {
            return Err(BackendError::NotFound);
        }
        let product = self.resolve_product(id, input)?;
        self.products.rows.insert(id, product.clone());
        Ok(product)
    }

    pub fn delete_product(&mut self, id: Id) -> Result<(), BackendError> {
        self.products.remove(id).map(|_| ()).ok_or(BackendError::NotFound)
    }
}
