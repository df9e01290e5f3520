//! App-wide context: one store per entity type, all sharing a transport.

use tracing::info;

use crate::config::DashboardConfig;
use crate::entities::category::{self, Category, FlatCategory};
use crate::entities::employee::{self, Employee};
use crate::entities::product::{self, Product};
use crate::entities::role::{self, Role};
use crate::entities::supply::{self, Supply};
use crate::entities::unit::{self, MeasureUnit};
use crate::error::StoreError;
use crate::http::{Transport, UreqTransport};
use crate::store::Store;

/// Built once at startup and passed by reference to whatever needs a store.
pub struct Dashboard<X: Transport + Clone = UreqTransport> {
    pub employees: Store<Employee, X>,
    pub roles: Store<Role, X>,
    pub categories: Store<Category, X>,
    pub units: Store<MeasureUnit, X>,
    pub supplies: Store<Supply, X>,
    pub products: Store<Product, X>,
}

impl Dashboard<UreqTransport> {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::with_transport(&config.api_base_url, UreqTransport::new())
    }
}

impl<X: Transport + Clone> Dashboard<X> {
    pub fn with_transport(base_url: &str, transport: X) -> Self {
        info!(base_url, "Dashboard ready");
        Self {
            employees: Store::new(employee::client(base_url), transport.clone()),
            roles: Store::new(role::client(base_url), transport.clone()),
            categories: Store::new(category::client(base_url), transport.clone()),
            units: Store::new(unit::client(base_url), transport.clone()),
            supplies: Store::new(supply::client(base_url), transport.clone()),
            products: Store::new(product::client(base_url), transport),
        }
    }

    /// Fetch every collection. A failing store does not stop the others;
    /// the first failure is returned.
    pub fn refresh_all(&mut self) -> Result<(), StoreError> {
        let results = [
            self.employees.fetch_all(),
            self.roles.fetch_all(),
            self.categories.fetch_all(),
            self.units.fetch_all(),
            self.supplies.fetch_all(),
            self.products.fetch_all(),
        ];
        results.into_iter().collect()
    }

    /// The category store's collection as flat rows, as the forms need it.
    pub fn flat_categories(&self) -> Vec<FlatCategory> {
        category::flatten(self.categories.items())
    }

    /// Supplies that may appear as product ingredients.
    pub fn ingredients(&self) -> Vec<&Supply> {
        supply::ingredients(self.supplies.items())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::mock::ScriptedTransport;

    const BASE: &str = "http://api.test";

    #[test]
    fn refresh_all_hits_every_list_endpoint_in_order() {
        let transport = Arc::new(ScriptedTransport::new());
        for _ in 0..6 {
            transport.respond(200, "[]");
        }
        let mut dashboard = Dashboard::with_transport(BASE, Arc::clone(&transport));

        dashboard.refresh_all().unwrap();

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://api.test/Empleados",
                "http://api.test/api/admin/roles",
                "http://api.test/categoria/listar",
                "http://api.test/unidadmedida",
                "http://api.test/articuloInsumo/listar",
                "http://api.test/articuloManufacturadoDetalle/todos",
            ]
        );
    }

    #[test]
    fn refresh_all_keeps_going_after_a_failure() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(500, "boom");
        transport.respond(200, r#"[{"id":1,"name":"admin"}]"#);
        for _ in 0..4 {
            transport.respond(200, "[]");
        }
        let mut dashboard = Dashboard::with_transport(BASE, Arc::clone(&transport));

        let err = dashboard.refresh_all().unwrap_err();

        assert!(matches!(err, StoreError::Fetch(_)));
        assert_eq!(transport.request_count(), 6);
        assert_eq!(dashboard.roles.items().len(), 1);
        assert!(dashboard.employees.error().is_some());
        assert!(dashboard.roles.error().is_none());
    }

    #[test]
    fn flat_categories_follow_the_category_store() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            200,
            r#"[{"id":1,"denominacion":"Insumos","esInsumo":true,"subcategorias":[
                {"id":2,"denominacion":"Harinas","esInsumo":true}
            ]}]"#,
        );
        let mut dashboard = Dashboard::with_transport(BASE, Arc::clone(&transport));

        dashboard.categories.fetch_all().unwrap();

        let rows = dashboard.flat_categories();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].parent_id, Some(1));
    }
}
