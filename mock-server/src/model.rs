//! Wire types of the restaurant backend, in its own field names.
//!
//! Read shapes embed referenced records as `{ id, denominacion }`; write
//! inputs reference them as `{ id }`. Unknown fields in inputs are ignored,
//! so clients may send a whole record back on update.

use serde::{Deserialize, Serialize};

pub type Id = i64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Empleado {
    pub id: Id,
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    #[serde(default)]
    pub dni: String,
}

#[derive(Debug, Deserialize)]
pub struct EmpleadoInput {
    pub nombre: String,
    pub apellido: String,
    pub email: String,
    #[serde(default)]
    pub dni: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rol {
    pub id: Id,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "auth0RoleId", default, skip_serializing_if = "Option::is_none")]
    pub auth0_role_id: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

#[derive(Debug, Deserialize)]
pub struct RolInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "auth0RoleId", default)]
    pub auth0_role_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnidadMedida {
    pub id: Id,
    pub denominacion: String,
}

#[derive(Debug, Deserialize)]
pub struct UnidadMedidaInput {
    pub denominacion: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Categoria {
    pub id: Id,
    pub denominacion: String,
    #[serde(default)]
    pub es_insumo: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub subcategorias: Vec<Subcategoria>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategoria {
    pub id: Id,
    pub denominacion: String,
    #[serde(default)]
    pub es_insumo: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl From<&Subcategoria> for Categoria {
    fn from(sub: &Subcategoria) -> Self {
        Self {
            id: sub.id,
            denominacion: sub.denominacion.clone(),
            es_insumo: sub.es_insumo,
            deleted: sub.deleted,
            subcategorias: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaInput {
    pub denominacion: String,
    #[serde(default)]
    pub es_insumo: bool,
    #[serde(default)]
    pub categoria_padre: Option<IdRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaPatch {
    pub denominacion: Option<String>,
    pub es_insumo: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: Id,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ref {
    pub id: Id,
    pub denominacion: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insumo {
    pub id: Id,
    pub denominacion: String,
    pub categoria: Ref,
    pub unidad_medida: Ref,
    pub precio_compra: f64,
    pub precio_venta: f64,
    pub stock_actual: i64,
    pub stock_minimo: i64,
    pub stock_maximo: i64,
    pub es_para_elaborar: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsumoInput {
    pub denominacion: String,
    pub categoria: IdRef,
    pub unidad_medida: IdRef,
    pub precio_compra: f64,
    pub precio_venta: f64,
    #[serde(default)]
    pub stock_actual: i64,
    #[serde(default)]
    pub stock_minimo: i64,
    #[serde(default)]
    pub stock_maximo: i64,
    #[serde(default)]
    pub es_para_elaborar: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturado {
    pub id: Id,
    pub denominacion: String,
    pub descripcion: String,
    pub precio_venta: f64,
    pub tiempo_estimado_minutos: i64,
    pub preparacion: String,
    pub categoria: Ref,
    pub detalles: Vec<Detalle>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detalle {
    pub cantidad: f64,
    pub articulo_insumo: Ref,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturadoInput {
    pub denominacion: String,
    #[serde(default)]
    pub descripcion: String,
    pub precio_venta: f64,
    #[serde(default)]
    pub tiempo_estimado_minutos: i64,
    #[serde(default)]
    pub preparacion: String,
    pub categoria: IdRef,
    #[serde(default)]
    pub detalles: Vec<DetalleInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetalleInput {
    pub cantidad: f64,
    pub articulo_insumo: IdRef,
}
